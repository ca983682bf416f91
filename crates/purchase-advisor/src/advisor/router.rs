use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use super::request::PurchaseRequest;
use super::service::{AdvisorError, PurchaseAdvisor};
use crate::decision::PurchaseInput;
use crate::error::AppError;
use crate::profile::{FinancialProfile, ProfileStore, UserId};
use crate::recognition::ItemRecognizer;

/// Router exposing purchase decisions and profile maintenance.
pub fn advisor_router<P, R>(advisor: Arc<PurchaseAdvisor<P, R>>) -> Router
where
    P: ProfileStore + 'static,
    R: ItemRecognizer + 'static,
{
    Router::new()
        .route("/api/v1/decisions", post(advise_handler::<P, R>))
        .route("/api/v1/decisions/score", post(score_handler::<P, R>))
        .route(
            "/api/v1/profiles/:user_id",
            get(profile_handler::<P, R>).put(save_profile_handler::<P, R>),
        )
        .with_state(advisor)
}

pub(crate) async fn advise_handler<P, R>(
    State(advisor): State<Arc<PurchaseAdvisor<P, R>>>,
    axum::Json(request): axum::Json<PurchaseRequest>,
) -> Response
where
    P: ProfileStore + 'static,
    R: ItemRecognizer + 'static,
{
    let advice = advisor.advise(request);
    (StatusCode::OK, axum::Json(advice)).into_response()
}

pub(crate) async fn score_handler<P, R>(
    State(advisor): State<Arc<PurchaseAdvisor<P, R>>>,
    axum::Json(input): axum::Json<PurchaseInput>,
) -> Response
where
    P: ProfileStore + 'static,
    R: ItemRecognizer + 'static,
{
    let decision = advisor.score_input(&input);
    (StatusCode::OK, axum::Json(decision)).into_response()
}

pub(crate) async fn profile_handler<P, R>(
    State(advisor): State<Arc<PurchaseAdvisor<P, R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    P: ProfileStore + 'static,
    R: ItemRecognizer + 'static,
{
    match advisor.profile(&UserId::new(user_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => advisor_error_response(error),
    }
}

pub(crate) async fn save_profile_handler<P, R>(
    State(advisor): State<Arc<PurchaseAdvisor<P, R>>>,
    Path(user_id): Path<String>,
    axum::Json(profile): axum::Json<FinancialProfile>,
) -> Response
where
    P: ProfileStore + 'static,
    R: ItemRecognizer + 'static,
{
    match advisor.save_profile(UserId::new(user_id), profile) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => advisor_error_response(error),
    }
}

fn advisor_error_response(error: AdvisorError) -> Response {
    AppError::from(error).into_response()
}
