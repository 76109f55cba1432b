use crate::config::ConfigError;
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Not a stable API; intended for internal use and may change without notice.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    /// Construct an InternalError without origin-specific detail.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct a host-origin missing-row error.
    pub fn host_not_found(key: impl fmt::Display) -> Self {
        let key = key.to_string();

        Self {
            class: ErrorClass::NotFound,
            origin: ErrorOrigin::Host,
            message: format!("record not found: {key}"),
            detail: Some(ErrorDetail::Host(HostError::NotFound { key })),
        }
    }

    /// Construct a standardized unsupported-entity-path error.
    pub fn unsupported_entity_path(path: impl Into<String>) -> Self {
        let path = path.into();

        Self::new(
            ErrorClass::Unsupported,
            ErrorOrigin::Host,
            format!("unsupported entity path: '{path}'"),
        )
    }

    /// Construct a host-origin unsupported error.
    pub(crate) fn host_unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unsupported, ErrorOrigin::Host, message.into())
    }

    /// Construct a host-origin invariant violation.
    pub(crate) fn host_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Host,
            message.into(),
        )
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::NotFound)
    }

    /// Borrow the cascade configuration failure, if this error carries one.
    #[must_use]
    pub const fn as_cascade(&self) -> Option<&CascadeError> {
        match &self.detail {
            Some(ErrorDetail::Cascade(err)) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<CascadeError> for InternalError {
    fn from(err: CascadeError) -> Self {
        Self {
            class: ErrorClass::Unsupported,
            origin: ErrorOrigin::Cascade,
            message: err.to_string(),
            detail: Some(ErrorDetail::Cascade(err)),
        }
    }
}

impl From<ConfigError> for InternalError {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorClass::Unsupported, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Cascade(CascadeError),
    #[error("{0}")]
    Host(HostError),
}

///
/// CascadeError
///
/// Configuration failures raised by the cascade hooks before any related
/// record is touched. Never recovered locally.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CascadeError {
    #[error("{entity} does not support soft deletes")]
    NotSoftDeletable { entity: String },

    #[error(
        "{} [{}] must exist and resolve to a relation accessor on {entity}",
        relationship_label(.relations.len()),
        .relations.join(", ")
    )]
    InvalidCascadeRelationship {
        entity: String,
        relations: Vec<String>,
    },
}

const fn relationship_label(count: usize) -> &'static str {
    if count == 1 {
        "Relationship"
    } else {
        "Relationships"
    }
}

///
/// HostError
///
/// Host-specific structured error detail.
/// Never returned directly; always wrapped in [`ErrorDetail::Host`].
///

#[derive(Debug, ThisError)]
pub enum HostError {
    #[error("key not found: {key}")]
    NotFound { key: String },
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    NotFound,
    Internal,
    Unsupported,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotFound => "not_found",
            Self::Internal => "internal",
            Self::Unsupported => "unsupported",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Cascade,
    Config,
    Host,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Cascade => "cascade",
            Self::Config => "config",
            Self::Host => "host",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_relationship_message_is_singular_for_one_name() {
        let err = CascadeError::InvalidCascadeRelationship {
            entity: "app::Post".to_string(),
            relations: vec!["comments".to_string()],
        };

        assert_eq!(
            err.to_string(),
            "Relationship [comments] must exist and resolve to a relation accessor on app::Post"
        );
    }

    #[test]
    fn invalid_relationship_message_pluralizes_and_lists_every_name() {
        let err = CascadeError::InvalidCascadeRelationship {
            entity: "app::Post".to_string(),
            relations: vec!["invalid".to_string(), "another".to_string()],
        };

        assert_eq!(
            err.to_string(),
            "Relationships [invalid, another] must exist and resolve to a relation accessor on app::Post"
        );
    }

    #[test]
    fn cascade_error_converts_with_detail() {
        let err = InternalError::from(CascadeError::NotSoftDeletable {
            entity: "app::Draft".to_string(),
        });

        assert_eq!(err.class, ErrorClass::Unsupported);
        assert_eq!(err.origin, ErrorOrigin::Cascade);
        assert_eq!(err.message, "app::Draft does not support soft deletes");
        assert!(matches!(
            err.as_cascade(),
            Some(CascadeError::NotSoftDeletable { .. })
        ));
        assert_eq!(
            err.display_with_class(),
            "cascade:unsupported: app::Draft does not support soft deletes"
        );
    }
}
