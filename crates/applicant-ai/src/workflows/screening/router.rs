use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;

use super::cache::VerdictCache;
use super::client::CompletionClient;
use super::domain::ApplicationRecord;
use super::service::ScreeningService;

/// Router builder exposing the evaluate operation.
pub fn screening_router<C, K>(service: Arc<ScreeningService<C, K>>) -> Router
where
    C: CompletionClient + 'static,
    K: VerdictCache + 'static,
{
    Router::new()
        .route("/api/v1/evaluate", post(evaluate_handler::<C, K>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EvaluateQuery {
    /// Bypass the cached verdict and re-run the full evaluation.
    #[serde(default)]
    refresh: bool,
}

pub(crate) async fn evaluate_handler<C, K>(
    State(service): State<Arc<ScreeningService<C, K>>>,
    Query(query): Query<EvaluateQuery>,
    axum::Json(record): axum::Json<ApplicationRecord>,
) -> Response
where
    C: CompletionClient + 'static,
    K: VerdictCache + 'static,
{
    let verdict = service.evaluate(&record, query.refresh).await;
    (StatusCode::OK, axum::Json(verdict)).into_response()
}
