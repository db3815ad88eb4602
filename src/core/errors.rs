use thiserror::Error;

pub type OrgResult<T> = Result<T, OrgError>;

#[derive(Debug, Error)]
pub enum OrgError {
    #[error("{entity} {key:?} doesn't exist")]
    NotFound { entity: &'static str, key: String },
    #[error("{entity} {key:?} already exists")]
    AlreadyExists { entity: &'static str, key: String },
    #[error("invalid ID format: {id} (expected {expected})")]
    InvalidId { id: String, expected: String },
    #[error("resource id is wrong based on {0} ID")]
    IdMismatch(&'static str),
    #[error("invalid role {0:?}")]
    InvalidRole(String),
    #[error("op cli command failed: {reason}: {stderr}")]
    Cli { reason: String, stderr: String },
    #[error("could not unmarshal op cli stdout: {0}")]
    Decode(serde_json::Error),
    #[error("could not marshal storage: {0}")]
    Marshal(serde_json::Error),
    #[error("could not write file: {0}")]
    Write(std::io::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("unsupported backend: {0}")]
    UnsupportedBackend(String),
}

impl OrgError {
    pub(crate) fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub(crate) fn already_exists(entity: &'static str, key: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity,
            key: key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::io;

    use super::*;

    #[test]
    fn wrapped_cause_is_rendered_once() {
        let err = OrgError::Write(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(err.to_string(), "could not write file: denied");
        assert!(err.source().is_none());
    }
}
