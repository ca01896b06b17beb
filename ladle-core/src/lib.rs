pub mod error;
pub mod generate;
pub mod normalize;
pub mod types;

pub use error::NormalizeError;
pub use generate::{FakeGenerator, GenerateError, RecipeGenerator, WebhookGenerator};
pub use normalize::{
    normalize_generated, COOK_TIME_KEYS, DEFAULT_COOK_TIME_MINUTES, INSTRUCTION_TEXT_KEYS,
};
pub use types::NormalizedRecipe;
