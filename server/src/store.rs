//! Query surface for recipe records.
//!
//! All reads are scoped by owner. An ownership mismatch is reported as
//! [`StoreError::NotFound`], so callers cannot distinguish another owner's
//! record from one that does not exist.

use diesel::prelude::*;
use thiserror::Error;
use uuid::Uuid;

use crate::db::DbPool;
use crate::models::{NewRecipe, Recipe};
use crate::schema::recipes;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database connection unavailable")]
    Unavailable,

    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Query(#[from] diesel::result::Error),
}

/// Persist a new recipe and return it with `id` and `created_at` populated.
///
/// Creation is a single insert; no transaction spans multiple statements.
pub fn create(pool: &DbPool, record: NewRecipe<'_>) -> Result<Recipe, StoreError> {
    let mut conn = pool.get().map_err(|_| StoreError::Unavailable)?;

    let recipe = diesel::insert_into(recipes::table)
        .values(&record)
        .returning(Recipe::as_returning())
        .get_result(&mut conn)?;

    Ok(recipe)
}

/// All recipes owned by `owner_id`, newest first. Empty vec if none.
pub fn list_by_owner(pool: &DbPool, owner_id: &str) -> Result<Vec<Recipe>, StoreError> {
    let mut conn = pool.get().map_err(|_| StoreError::Unavailable)?;

    let results = recipes::table
        .filter(recipes::owner_id.eq(owner_id))
        .order(recipes::created_at.desc())
        .select(Recipe::as_select())
        .load(&mut conn)?;

    Ok(results)
}

/// A recipe by id, only if `owner_id` owns it.
pub fn get_by_id_for_owner(pool: &DbPool, id: Uuid, owner_id: &str) -> Result<Recipe, StoreError> {
    let mut conn = pool.get().map_err(|_| StoreError::Unavailable)?;

    recipes::table
        .filter(recipes::id.eq(id))
        .filter(recipes::owner_id.eq(owner_id))
        .select(Recipe::as_select())
        .first(&mut conn)
        .map_err(|e| match e {
            diesel::NotFound => StoreError::NotFound,
            other => StoreError::Query(other),
        })
}
