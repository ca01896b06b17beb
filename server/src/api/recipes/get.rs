use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use super::{store_error_response, RecipeResponse};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::{store, AppState};

#[utoipa::path(
    get,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_recipe(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match store::get_by_id_for_owner(&state.pool, id, &caller.id) {
        Ok(recipe) => (StatusCode::OK, Json(RecipeResponse::from(recipe))).into_response(),
        Err(e) => store_error_response(e).into_response(),
    }
}
