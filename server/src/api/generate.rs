//! Generation gateway.
//!
//! `/ai-recipe` forwards an ingredient list to the external collaborator
//! and passes its raw output back unmodified. `/ai-recipe/save` runs the
//! full flow: generate, normalize to the canonical shape, persist for the
//! authenticated caller.

use axum::routing::post;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json, Router};
use ladle_core::normalize_generated;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{OpenApi, ToSchema};

use crate::api::recipes::{store_error_response, RecipeResponse};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::models::NewRecipe;
use crate::{store, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ai-recipe", post(generate_recipe))
        .route("/ai-recipe/save", post(generate_and_save))
}

/// Documented request shape; the handlers deliberately accept loose JSON
/// (see [`parse_ingredients`]).
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GenerateRequest {
    /// Ingredient names to cook with.
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenerateResponse {
    /// The collaborator's response body, passed through unmodified.
    #[schema(value_type = Object)]
    pub recipe: Value,
}

/// Pull a non-empty list of ingredient strings out of a request body.
///
/// The body is inspected as loose JSON so that a missing or mistyped field
/// maps to a 400 with an explanatory error instead of a deserialization
/// reject, and the collaborator is never called for invalid input.
fn parse_ingredients(body: &Value) -> Result<Vec<String>, &'static str> {
    let items = match body.get("ingredients") {
        Some(Value::Array(items)) => items,
        Some(_) | None => return Err("Ingredients must be an array"),
    };

    let ingredients = items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.trim().to_string()),
            _ => Err("Ingredients must be an array of strings"),
        })
        .collect::<Result<Vec<String>, _>>()?;

    let ingredients: Vec<String> = ingredients
        .into_iter()
        .filter(|item| !item.is_empty())
        .collect();

    if ingredients.is_empty() {
        return Err("Ingredients must not be empty");
    }

    Ok(ingredients)
}

#[utoipa::path(
    post,
    path = "/ai-recipe",
    tag = "generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Raw generated recipe", body = GenerateResponse),
        (status = 400, description = "Invalid ingredients", body = ErrorResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse)
    )
)]
pub async fn generate_recipe(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let ingredients = match parse_ingredients(&body) {
        Ok(ingredients) => ingredients,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: message.to_string(),
                }),
            )
                .into_response()
        }
    };

    let joined = ingredients.join(", ");
    tracing::debug!(ingredients = %joined, "forwarding to generation webhook");

    let raw = match state.generator.generate(&joined).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!("Generation webhook call failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to generate recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    // Upstream JSON stays JSON; anything else is passed through as a string.
    let recipe = serde_json::from_str::<Value>(&raw).unwrap_or(Value::String(raw));

    (StatusCode::OK, Json(GenerateResponse { recipe })).into_response()
}

#[utoipa::path(
    post,
    path = "/ai-recipe/save",
    tag = "generate",
    request_body = GenerateRequest,
    responses(
        (status = 201, description = "Recipe generated and saved", body = RecipeResponse),
        (status = 400, description = "Invalid ingredients", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 502, description = "Generated content unusable", body = ErrorResponse),
        (status = 500, description = "Generation or save failed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn generate_and_save(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let ingredients = match parse_ingredients(&body) {
        Ok(ingredients) => ingredients,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: message.to_string(),
                }),
            )
                .into_response()
        }
    };

    let raw = match state.generator.generate(&ingredients.join(", ")).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!("Generation webhook call failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to generate recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    // Nothing is persisted when the generated content cannot be normalized.
    let normalized = match normalize_generated(&raw, &ingredients) {
        Ok(normalized) => normalized,
        Err(e) => {
            tracing::error!("Generated content could not be normalized: {}", e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "Generated content could not be parsed".to_string(),
                }),
            )
                .into_response();
        }
    };

    let ingredients_json = match serde_json::to_value(&normalized.ingredients) {
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
        title: &normalized.title,
        ingredients: ingredients_json,
        instructions: &normalized.instructions,
        cook_time_minutes: normalized.cook_time_minutes,
    };

    match store::create(&state.pool, record) {
        Ok(recipe) => (StatusCode::CREATED, Json(RecipeResponse::from(recipe))).into_response(),
        Err(e) => store_error_response(e).into_response(),
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(generate_recipe, generate_and_save),
    components(schemas(GenerateRequest, GenerateResponse))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthMode;
    use crate::test_support::test_state;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use ladle_core::FakeGenerator;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn post_ai_recipe(
        generator: FakeGenerator,
        body: Value,
    ) -> (StatusCode, Value, Arc<FakeGenerator>) {
        let generator = Arc::new(generator);
        let state = test_state_shared(generator.clone());
        let app = router().with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/ai-recipe")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap();
        (status, json, generator)
    }

    fn test_state_shared(generator: Arc<FakeGenerator>) -> AppState {
        crate::test_support::test_state_with(generator, AuthMode::DevPermissive)
    }

    #[test]
    fn test_parse_ingredients_accepts_strings() {
        let body = serde_json::json!({"ingredients": ["chicken", " rice "]});

        assert_eq!(
            parse_ingredients(&body).unwrap(),
            vec!["chicken".to_string(), "rice".to_string()]
        );
    }

    #[test]
    fn test_parse_ingredients_rejects_missing_field() {
        let body = serde_json::json!({});

        assert_eq!(
            parse_ingredients(&body).unwrap_err(),
            "Ingredients must be an array"
        );
    }

    #[test]
    fn test_parse_ingredients_rejects_string_field() {
        let body = serde_json::json!({"ingredients": "chicken, rice"});

        assert_eq!(
            parse_ingredients(&body).unwrap_err(),
            "Ingredients must be an array"
        );
    }

    #[test]
    fn test_parse_ingredients_rejects_non_string_entries() {
        let body = serde_json::json!({"ingredients": ["chicken", 42]});

        assert_eq!(
            parse_ingredients(&body).unwrap_err(),
            "Ingredients must be an array of strings"
        );
    }

    #[test]
    fn test_parse_ingredients_rejects_empty_list() {
        let body = serde_json::json!({"ingredients": ["", "  "]});

        assert_eq!(
            parse_ingredients(&body).unwrap_err(),
            "Ingredients must not be empty"
        );
    }

    #[tokio::test]
    async fn test_invalid_body_never_reaches_collaborator() {
        let (status, json, generator) = post_ai_recipe(
            FakeGenerator::with_response("unused"),
            serde_json::json!({"ingredients": "not-an-array"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
        assert!(generator.requests().is_empty());
    }

    #[tokio::test]
    async fn test_plain_text_response_is_wrapped_as_string() {
        let (status, json, generator) = post_ai_recipe(
            FakeGenerator::with_response("Try a stir fry."),
            serde_json::json!({"ingredients": ["chicken", "rice"]}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["recipe"], "Try a stir fry.");
        assert_eq!(generator.requests(), vec!["chicken, rice"]);
    }

    #[tokio::test]
    async fn test_json_response_is_passed_through_as_json() {
        let (status, json, _) = post_ai_recipe(
            FakeGenerator::with_response(r#"{"title":"Stir Fry"}"#),
            serde_json::json!({"ingredients": ["chicken"]}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["recipe"]["title"], "Stir Fry");
    }

    #[tokio::test]
    async fn test_upstream_failure_maps_to_500() {
        let (status, json, _) = post_ai_recipe(
            FakeGenerator::failing(),
            serde_json::json!({"ingredients": ["chicken"]}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Failed to generate recipe");
    }

    #[tokio::test]
    async fn test_save_rejects_unusable_generated_content() {
        let generator = Arc::new(FakeGenerator::with_response("no structure here at all"));
        let state = test_state_shared(generator.clone());
        let app = router().with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/ai-recipe/save")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({"ingredients": ["chicken"]}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        // The collaborator was called, but nothing was persisted.
        assert_eq!(generator.requests(), vec!["chicken"]);
    }

    #[tokio::test]
    async fn test_save_requires_auth_in_enforced_mode() {
        let generator = Arc::new(FakeGenerator::with_response("unused"));
        let state = crate::test_support::test_state_with(
            generator.clone(),
            AuthMode::from_secret(Some("secret")),
        );
        let app = router().with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/ai-recipe/save")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({"ingredients": ["chicken"]}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(generator.requests().is_empty());
    }
}
