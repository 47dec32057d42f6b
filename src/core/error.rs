use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DynObjError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Key '{0}' not found")]
    KeyNotFound(String),

    #[error("Type mismatch for key '{key}': expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid seed: {0}")]
    InvalidSeed(String),
}

pub type Result<T> = std::result::Result<T, DynObjError>;

impl DynObjError {
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound(_))
    }

    pub fn is_invalid_key(&self) -> bool {
        matches!(self, Self::InvalidKey(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DynObjError::KeyNotFound("aa".into()).to_string(),
            "Key 'aa' not found"
        );

        let err = DynObjError::TypeMismatch {
            key: "bb".into(),
            expected: "INTEGER",
            found: "TEXT",
        };
        assert_eq!(
            err.to_string(),
            "Type mismatch for key 'bb': expected INTEGER, found TEXT"
        );
    }

    #[test]
    fn test_error_kind_helpers() {
        assert!(DynObjError::KeyNotFound("x".into()).is_key_not_found());
        assert!(!DynObjError::KeyNotFound("x".into()).is_invalid_key());
        assert!(DynObjError::InvalidKey("empty".into()).is_invalid_key());
    }
}
