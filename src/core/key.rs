use super::{DynObjError, Result};

/// Rules a key must satisfy before it can be added to a record.
///
/// Removal and lookup never validate keys: removing a key that could not
/// have been added is simply a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPolicy {
    /// Accept the empty string as a key
    pub allow_empty: bool,

    /// Maximum key length in bytes
    pub max_len: Option<usize>,

    /// Accept keys containing control characters
    pub allow_control_chars: bool,
}

impl Default for KeyPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyPolicy {
    /// Default policy: any non-empty key.
    pub const fn new() -> Self {
        Self {
            allow_empty: false,
            max_len: None,
            allow_control_chars: true,
        }
    }

    /// Policy that accepts every key, including the empty string.
    pub const fn permissive() -> Self {
        Self {
            allow_empty: true,
            max_len: None,
            allow_control_chars: true,
        }
    }

    /// Allow or reject the empty key
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Set maximum key length
    pub fn max_len(mut self, max: usize) -> Self {
        self.max_len = Some(max);
        self
    }

    /// Allow or reject control characters
    pub fn allow_control_chars(mut self, allow: bool) -> Self {
        self.allow_control_chars = allow;
        self
    }

    /// Check `key` against the policy, returning `InvalidKey` on the first violated rule
    pub fn validate(&self, key: &str) -> Result<()> {
        if key.is_empty() && !self.allow_empty {
            return Err(DynObjError::InvalidKey("key must not be empty".to_string()));
        }

        if let Some(max) = self.max_len {
            if key.len() > max {
                return Err(DynObjError::InvalidKey(format!(
                    "key '{}' is {} bytes long, limit is {}",
                    key,
                    key.len(),
                    max
                )));
            }
        }

        if !self.allow_control_chars && key.chars().any(char::is_control) {
            return Err(DynObjError::InvalidKey(format!(
                "key {:?} contains control characters",
                key
            )));
        }

        Ok(())
    }
}
