use thiserror::Error;

/// Failures reported by the data-layer collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid image: {0}")]
    InvalidImage(String),
    #[error("unsupported url: {0}")]
    UnsupportedUrl(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("{0}")]
    Unknown(String),
}

impl ServiceError {
    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Errors produced by the bio use-case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BioError {
    #[error("underlying error")]
    Underlying(#[source] Option<ServiceError>),
}

impl BioError {
    pub fn cause(&self) -> Option<&ServiceError> {
        match self {
            Self::Underlying(cause) => cause.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn underlying_error_exposes_cause_as_source() {
        let err = BioError::Underlying(Some(ServiceError::unknown("offline")));

        assert_eq!(err.cause(), Some(&ServiceError::Unknown("offline".into())));
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("offline"));
    }

    #[test]
    fn underlying_error_without_cause_has_no_source() {
        let err = BioError::Underlying(None);

        assert!(err.cause().is_none());
        assert!(err.source().is_none());
    }
}
