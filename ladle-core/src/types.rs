use serde::{Deserialize, Serialize};

/// Canonical recipe shape produced by normalization, ready for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecipe {
    pub title: String,
    /// Ordered ingredient strings; insertion order survives storage.
    pub ingredients: Vec<String>,
    /// Newline-separated steps, the canonical persisted form.
    pub instructions: String,
    pub cook_time_minutes: i32,
}
