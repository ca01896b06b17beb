use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// A stored recipe. Records are created once and never updated in place.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: Uuid,
    /// Subject of the caller that created the record; scopes every read.
    pub owner_id: String,
    pub title: String,
    /// Ordered ingredient strings, stored as a JSONB array.
    pub ingredients: serde_json::Value,
    /// Newline-separated steps.
    pub instructions: String,
    pub cook_time_minutes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub owner_id: &'a str,
    pub title: &'a str,
    pub ingredients: serde_json::Value,
    pub instructions: &'a str,
    pub cook_time_minutes: i32,
}
