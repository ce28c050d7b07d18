//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use workshop_core::types::{DbId, Timestamp};
use workshop_core::validation::not_blank;

/// A row from the `users` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub age: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub name: String,
    #[validate(range(min = 1, max = 150, message = "must be between 1 and 150"))]
    pub age: i32,
}

/// DTO for updating an existing user. All fields optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub name: Option<String>,
    #[validate(range(min = 1, max = 150, message = "must be between 1 and 150"))]
    pub age: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use workshop_core::error::CoreError;
    use workshop_core::validation::validate;

    #[test]
    fn create_user_rules() {
        let ok = CreateUser {
            name: "Ada".into(),
            age: 36,
        };
        assert!(validate(&ok).is_ok());

        let bad = CreateUser {
            name: "  ".into(),
            age: 0,
        };
        let Err(CoreError::InvalidFields(fields)) = validate(&bad) else {
            panic!("expected field errors");
        };
        let paths: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(paths, vec!["age", "name"]);
    }

    #[test]
    fn update_user_skips_absent_fields() {
        assert!(validate(&UpdateUser::default()).is_ok());

        let bad = UpdateUser {
            name: None,
            age: Some(151),
        };
        assert!(validate(&bad).is_err());
    }

    #[test]
    fn user_round_trips_through_json_and_cbor() {
        let user = User {
            id: 7,
            name: "Grace".into(),
            age: 85,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let json = serde_json::to_vec(&user).unwrap();
        assert_eq!(serde_json::from_slice::<User>(&json).unwrap(), user);

        let cbor = serde_cbor::to_vec(&user).unwrap();
        assert_eq!(serde_cbor::from_slice::<User>(&cbor).unwrap(), user);
    }
}
