//! Webhook-backed generation collaborator.

use async_trait::async_trait;
use serde::Serialize;

use super::{GenerateError, RecipeGenerator};

/// Client for the workflow webhook that performs the actual generation.
/// Opaque to this system: a string of ingredients in, free-form recipe
/// content out.
#[derive(Debug, Clone)]
pub struct WebhookGenerator {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct WebhookRequest<'a> {
    ingredients: &'a str,
}

impl WebhookGenerator {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl RecipeGenerator for WebhookGenerator {
    async fn generate(&self, ingredients: &str) -> Result<String, GenerateError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&WebhookRequest { ingredients })
            .send()
            .await
            .map_err(|e| GenerateError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| GenerateError::RequestFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_forwards_joined_ingredients_and_returns_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhook/recipe"))
            .and(body_json(
                serde_json::json!({"ingredients": "chicken, rice"}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_string("Try a stir fry."))
            .expect(1)
            .mount(&server)
            .await;

        let generator = WebhookGenerator::new(format!("{}/webhook/recipe", server.uri()));
        let body = generator.generate("chicken, rice").await.unwrap();

        assert_eq!(body, "Try a stir fry.");
    }

    #[tokio::test]
    async fn test_upstream_error_status_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let generator = WebhookGenerator::new(server.uri());
        let err = generator.generate("rice").await.unwrap_err();

        match err {
            GenerateError::UpstreamStatus { status } => assert_eq!(status, 500),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_a_request_error() {
        // Port 9 (discard) has nothing listening in the test environment.
        let generator = WebhookGenerator::new("http://127.0.0.1:9/webhook".to_string());
        let err = generator.generate("rice").await.unwrap_err();

        assert!(matches!(err, GenerateError::RequestFailed(_)));
    }
}
