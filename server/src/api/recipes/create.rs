use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use ladle_core::DEFAULT_COOK_TIME_MINUTES;
use serde::Deserialize;
use utoipa::ToSchema;

use super::{store_error_response, RecipeResponse};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::models::NewRecipe;
use crate::{store, AppState};

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    pub title: String,
    pub ingredients: Vec<String>,
    /// Newline-separated steps.
    pub instructions: String,
    /// The original client sends `cookTime`; both spellings are accepted.
    #[serde(default, alias = "cookTime")]
    pub cook_time_minutes: Option<i32>,
}

/// Reject a create request with missing or empty required fields.
fn validate(request: &CreateRecipeRequest) -> Result<(), &'static str> {
    if request.title.trim().is_empty() {
        return Err("Title cannot be empty");
    }
    if request.ingredients.iter().all(|i| i.trim().is_empty()) {
        return Err("Ingredients cannot be empty");
    }
    if request.instructions.trim().is_empty() {
        return Err("Instructions cannot be empty");
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created successfully", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateRecipeRequest>,
) -> impl IntoResponse {
    if let Err(message) = validate(&request) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response();
    }

    // Stored verbatim so a later fetch round-trips byte-for-byte.
    let ingredients_json = match serde_json::to_value(&request.ingredients) {
        Ok(value) => value,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Server error".to_string(),
                }),
            )
                .into_response()
        }
    };

    let record = NewRecipe {
        owner_id: &caller.id,
        title: &request.title,
        ingredients: ingredients_json,
        instructions: &request.instructions,
        cook_time_minutes: request
            .cook_time_minutes
            .unwrap_or(DEFAULT_COOK_TIME_MINUTES),
    };

    match store::create(&state.pool, record) {
        Ok(recipe) => (StatusCode::CREATED, Json(RecipeResponse::from(recipe))).into_response(),
        Err(e) => store_error_response(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, ingredients: &[&str], instructions: &str) -> CreateRecipeRequest {
        CreateRecipeRequest {
            title: title.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            instructions: instructions.to_string(),
            cook_time_minutes: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate(&request("T", &["a"], "Go.")).is_ok());
    }

    #[test]
    fn test_blank_title_rejected() {
        assert_eq!(
            validate(&request("  ", &["a"], "Go.")).unwrap_err(),
            "Title cannot be empty"
        );
    }

    #[test]
    fn test_empty_ingredients_rejected() {
        assert_eq!(
            validate(&request("T", &[], "Go.")).unwrap_err(),
            "Ingredients cannot be empty"
        );
        assert_eq!(
            validate(&request("T", &["", " "], "Go.")).unwrap_err(),
            "Ingredients cannot be empty"
        );
    }

    #[test]
    fn test_blank_instructions_rejected() {
        assert_eq!(
            validate(&request("T", &["a"], "\n")).unwrap_err(),
            "Instructions cannot be empty"
        );
    }

    #[test]
    fn test_cook_time_alias_is_accepted() {
        let request: CreateRecipeRequest = serde_json::from_str(
            r#"{"title":"T","ingredients":["a"],"instructions":"Go.","cookTime":40}"#,
        )
        .unwrap();

        assert_eq!(request.cook_time_minutes, Some(40));
    }

    #[test]
    fn test_cook_time_canonical_name_is_accepted() {
        let request: CreateRecipeRequest = serde_json::from_str(
            r#"{"title":"T","ingredients":["a"],"instructions":"Go.","cookTimeMinutes":15}"#,
        )
        .unwrap();

        assert_eq!(request.cook_time_minutes, Some(15));
    }
}
