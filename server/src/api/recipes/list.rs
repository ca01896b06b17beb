use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::{store_error_response, RecipeResponse};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::{store, AppState};

#[utoipa::path(
    get,
    path = "/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "The caller's recipes, newest first", body = [RecipeResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_recipes(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match store::list_by_owner(&state.pool, &caller.id) {
        Ok(recipes) => {
            let recipes: Vec<RecipeResponse> =
                recipes.into_iter().map(RecipeResponse::from).collect();
            (StatusCode::OK, Json(recipes)).into_response()
        }
        Err(e) => store_error_response(e).into_response(),
    }
}
