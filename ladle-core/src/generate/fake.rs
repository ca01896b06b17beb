//! Fake generation collaborator for testing.
//!
//! Returns a canned response (or a canned failure) and records what it was
//! asked for, so tests can run without a live webhook.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{GenerateError, RecipeGenerator};

#[derive(Debug, Default)]
pub struct FakeGenerator {
    response: Option<String>,
    requests: Mutex<Vec<String>>,
}

impl FakeGenerator {
    /// A generator that answers every call with `response`.
    pub fn with_response(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A generator that fails every call, for upstream-error paths.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Ingredient strings this generator has been called with.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecipeGenerator for FakeGenerator {
    async fn generate(&self, ingredients: &str) -> Result<String, GenerateError> {
        self.requests.lock().unwrap().push(ingredients.to_string());

        match &self.response {
            Some(response) => Ok(response.clone()),
            None => Err(GenerateError::RequestFailed(
                "fake generator configured to fail".to_string(),
            )),
        }
    }
}
