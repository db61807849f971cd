use crate::store::StoreError;
use sitewright_content::MutationError;
use thiserror::Error;

/// Common error type that can hold any sitewright error
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

impl From<String> for CommonError {
    fn from(s: String) -> Self {
        CommonError::Generic(s)
    }
}

impl From<&str> for CommonError {
    fn from(s: &str) -> Self {
        CommonError::Generic(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_mutation_errors() {
        let source = MutationError::InvalidOperation("bad index".to_string());
        let err: CommonError = source.into();
        assert_eq!(err.to_string(), "Mutation error: invalid operation: bad index");
    }

    #[test]
    fn test_wraps_store_errors() {
        let err: CommonError = StoreError::NotFound("tenant-1".to_string()).into();
        assert!(matches!(err, CommonError::Store(StoreError::NotFound(_))));
    }

    #[test]
    fn test_generic_from_str() {
        let err: CommonError = "boom".into();
        assert_eq!(err.to_string(), "Generic error: boom");
    }

    #[test]
    fn test_common_result_alias() {
        fn always_fails() -> crate::result::CommonResult<()> {
            Err("boom".into())
        }
        assert!(always_fails().is_err());
    }
}
