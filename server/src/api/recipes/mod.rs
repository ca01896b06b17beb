//! Recipe service: create/list/get over the store, scoped to the caller.

pub mod create;
pub mod get;
pub mod list;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::api::ErrorResponse;
use crate::models::Recipe;
use crate::store::StoreError;
use crate::AppState;

/// Returns the router for recipe endpoints (mounted at /recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route("/{id}", get(get::get_recipe))
}

/// Wire form of a stored recipe. Field names are camelCase to match what
/// the original frontend expects.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: Uuid,
    pub owner_id: String,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cook_time_minutes: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        // Ingredients live in a JSONB array of strings; anything else in
        // that column deserializes to an empty list rather than failing
        // the whole read.
        let ingredients = serde_json::from_value(recipe.ingredients).unwrap_or_default();

        Self {
            id: recipe.id,
            owner_id: recipe.owner_id,
            title: recipe.title,
            ingredients,
            instructions: recipe.instructions,
            cook_time_minutes: recipe.cook_time_minutes,
            created_at: recipe.created_at,
        }
    }
}

/// Map store failures to responses without leaking internals.
pub fn store_error_response(err: StoreError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        StoreError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        ),
        other => {
            tracing::error!("Store operation failed: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Server error".to_string(),
                }),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(create::create_recipe, list::list_recipes, get::get_recipe),
    components(schemas(create::CreateRecipeRequest, RecipeResponse))
)]
pub struct ApiDoc;
