use thiserror::Error;

pub type Result<T> = std::result::Result<T, FacetteError>;

#[derive(Debug, Error)]
pub enum FacetteError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl FacetteError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Toml(_) => "TOML_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_per_variant() {
        assert_eq!(FacetteError::NotFound("x".to_string()).code(), "NOT_FOUND");
        assert_eq!(
            FacetteError::Validation("x".to_string()).code(),
            "VALIDATION_FAILED"
        );
        assert_eq!(FacetteError::Internal("x".to_string()).code(), "INTERNAL_ERROR");
    }

    #[test]
    fn not_found_message_carries_subject() {
        let err = FacetteError::NotFound("collection: abc".to_string());
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "not found: collection: abc");
    }
}
