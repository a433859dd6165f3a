//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i64 },

    #[error("Duplicate entity: {0}")]
    Duplicate(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DomainError::NotFound {
            entity_type: "post",
            id: 7,
        };
        assert_eq!(err.to_string(), "Entity not found: post with id 7");
        assert_eq!(
            RepoError::Constraint("fk_posts_theme_id".to_string()).to_string(),
            "Constraint violation: fk_posts_theme_id"
        );
    }
}
