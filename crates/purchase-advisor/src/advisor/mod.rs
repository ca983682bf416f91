//! Purchase advisor workflow: resolve the item, merge the user's profile, score the purchase.

pub mod request;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use request::{assemble_input, PurchaseRequest, DEFAULT_GOAL};
pub use router::advisor_router;
pub use service::{Advice, AdvisorError, PurchaseAdvisor};
