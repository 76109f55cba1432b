use derive_more::Display;
use serde::{Deserialize, Serialize};
use softcascade_core::{
    config::ConfigError,
    error::{CascadeError, ErrorClass, ErrorOrigin as CoreErrorOrigin, InternalError},
};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable class + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_cascade(&self) -> bool {
        matches!(self.kind, ErrorKind::Cascade(_))
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = match (err.as_cascade(), err.class) {
            (Some(cascade), _) => ErrorKind::Cascade(cascade.into()),
            (None, ErrorClass::NotFound) => ErrorKind::NotFound,
            (None, ErrorClass::Unsupported) => ErrorKind::Unsupported,
            (None, ErrorClass::Internal | ErrorClass::InvariantViolation) => ErrorKind::Internal,
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

impl From<CascadeError> for Error {
    fn from(err: CascadeError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Config, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Cascade(CascadeErrorKind),

    /// Configuration document could not be read or parsed.
    Config,

    /// Target record or pivot does not exist.
    NotFound,

    /// The host cannot perform the operation for this entity.
    Unsupported,

    /// The caller cannot remediate this.
    Internal,
}

///
/// CascadeErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CascadeErrorKind {
    /// The entity carrying the behavior has no soft-delete capability.
    NotSoftDeletable,

    /// Declared cascade names that are not relation accessors.
    InvalidRelationship { relations: Vec<String> },
}

impl From<&CascadeError> for CascadeErrorKind {
    fn from(err: &CascadeError) -> Self {
        match err {
            CascadeError::NotSoftDeletable { .. } => Self::NotSoftDeletable,
            CascadeError::InvalidCascadeRelationship { relations, .. } => {
                Self::InvalidRelationship {
                    relations: relations.clone(),
                }
            }
        }
    }
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Cascade,
    Config,
    Host,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Cascade => Self::Cascade,
            CoreErrorOrigin::Config => Self::Config,
            CoreErrorOrigin::Host => Self::Host,
        }
    }
}

///
/// TESTS
///
