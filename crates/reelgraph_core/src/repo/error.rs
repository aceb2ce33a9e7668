//! Failure kinds surfaced by stores, services and the application facade.

use crate::model::entity::{EntityId, EntityKind};
use crate::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Recoverable failure of a core operation.
///
/// Anything outside these two kinds is a programming error and panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Candidate rejected before any mutation.
    Validation(ValidationError),
    /// One or more referenced ids are absent from the `kind` store.
    NotFound { kind: EntityKind, ids: Vec<EntityId> },
}

impl RepoError {
    pub fn not_found(kind: EntityKind, id: EntityId) -> Self {
        Self::NotFound {
            kind,
            ids: vec![id],
        }
    }

    /// Transport hint: maps to a "missing resource" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Transport hint: maps to a "bad input" outcome.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "validation failed: {err}"),
            Self::NotFound { kind, ids } => {
                let joined = ids
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{kind} not found: {joined}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

#[cfg(test)]
mod tests {
    use super::RepoError;
    use crate::model::entity::EntityKind;
    use crate::validation::ValidationError;

    #[test]
    fn not_found_message_lists_every_missing_id() {
        let err = RepoError::NotFound {
            kind: EntityKind::Person,
            ids: vec![4, 9],
        };
        assert_eq!(err.to_string(), "person not found: 4, 9");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn validation_error_converts_and_keeps_reason() {
        let err = RepoError::from(ValidationError::InvalidLogin);
        assert!(err.is_validation());
        assert!(err.to_string().contains("login must be non-empty"));
    }
}
