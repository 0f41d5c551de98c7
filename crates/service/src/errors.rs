use thiserror::Error;

/// Failures of a single album store operation. Each one is terminal for
/// the request that caused it; the message is what the client sees.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    MalformedInput(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    NotFound(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn malformed() -> Self { Self::MalformedInput("invalid JSON".into()) }

    /// Stable label for logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            ServiceError::MalformedInput(_) => "malformed",
            ServiceError::InvalidArgument(_) => "invalid",
            ServiceError::NotFound(_) => "not_found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        assert_eq!(ServiceError::not_found("album").to_string(), "album not found");
        assert_eq!(ServiceError::malformed().to_string(), "invalid JSON");
        assert_eq!(ServiceError::InvalidArgument("x".into()).outcome(), "invalid");
    }
}
