//! Purchase decision scoring and the advisor workflow that feeds it.
//!
//! The [`decision`] module is the pure core: it turns a [`decision::PurchaseInput`] into a
//! [`decision::Decision`] using one of two interchangeable scoring strategies. Everything else
//! resolves the inputs (profiles, image recognition), looks up cheaper alternatives or exposes the
//! engine over HTTP.

pub mod advisor;
pub mod alternatives;
pub mod config;
pub mod decision;
pub mod error;
pub mod profile;
pub mod recognition;
pub mod telemetry;
