//! Movie entity model and DTOs.
//!
//! Actors are embedded in the movie rather than stored in their own table;
//! PostgreSQL keeps them in a `JSONB` column.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use workshop_core::types::{DbId, Timestamp};
use workshop_core::validation::{for_field, not_blank};

/// Maximum number of actors attached to one movie.
pub const MAX_ACTORS: usize = 50;

/// An actor credited on a movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Actor {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(range(min = 1, max = 150, message = "must be between 1 and 150"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

/// A stored movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: DbId,
    pub name: String,
    pub producer: String,
    pub release_date: NaiveDate,
    pub actors: Vec<Actor>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "create_actor_count", skip_on_field_errors = false))]
pub struct CreateMovie {
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "must be at most 200 characters")
    )]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub producer: String,
    pub release_date: NaiveDate,
    #[validate(nested)]
    #[serde(default)]
    pub actors: Vec<Actor>,
}

/// DTO for updating an existing movie. All fields optional; `actors`
/// replaces the whole list when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "update_actor_count", skip_on_field_errors = false))]
pub struct UpdateMovie {
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "must be at most 200 characters")
    )]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub producer: Option<String>,
    pub release_date: Option<NaiveDate>,
    #[validate(nested)]
    pub actors: Option<Vec<Actor>>,
}

// The actor cap is a struct-level check: `length` and `nested` on the same
// field would both write to the `actors` error key.

fn check_actor_count(actors: &[Actor]) -> Result<(), ValidationError> {
    if actors.len() > MAX_ACTORS {
        let err = ValidationError::new("length")
            .with_message(Cow::Owned(format!("must list at most {MAX_ACTORS} actors")));
        return Err(for_field("actors", err));
    }
    Ok(())
}

fn create_actor_count(input: &CreateMovie) -> Result<(), ValidationError> {
    check_actor_count(&input.actors)
}

fn update_actor_count(input: &UpdateMovie) -> Result<(), ValidationError> {
    input.actors.as_deref().map_or(Ok(()), check_actor_count)
}
