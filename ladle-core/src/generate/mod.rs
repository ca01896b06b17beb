//! Generation collaborator abstraction.
//!
//! The actual recipe generation happens in an external workflow-automation
//! webhook; this module hides it behind a trait so the HTTP layer and tests
//! share one contract.

mod fake;
mod webhook;

pub use fake::FakeGenerator;
pub use webhook::WebhookGenerator;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for generation calls.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Webhook request failed: {0}")]
    RequestFailed(String),

    #[error("Webhook returned error status {status}")]
    UpstreamStatus { status: u16 },
}

/// Trait for the external generation collaborator.
///
/// Implementations take the caller's ingredients as one comma-separated
/// string and return the collaborator's raw response body verbatim. One
/// best-effort attempt per call; there is no retry anywhere in the system.
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    async fn generate(&self, ingredients: &str) -> Result<String, GenerateError>;
}
