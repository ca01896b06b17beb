//! Public endpoints (no auth required).

use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

use crate::AppState;

const LIVENESS_MESSAGE: &str = "Recipe AI Backend is running.";

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(liveness))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "public",
    responses(
        (status = 200, description = "Liveness message", body = String, content_type = "text/plain")
    )
)]
pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

#[derive(OpenApi)]
#[openapi(paths(liveness))]
pub struct ApiDoc;
