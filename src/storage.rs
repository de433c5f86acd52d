//! String key/value storage used by application code for persistence.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("stored value for {name} is not an integer: {value:?}")]
    InvalidInteger { name: String, value: String },
}

/// Key/value string store with typed integer helpers.
pub trait Storage {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, name: &str, value: &str);

    /// # Errors
    ///
    /// Returns [`StorageError::InvalidInteger`] if the stored value does not parse.
    fn get_int(&self, name: &str) -> Result<Option<i64>, StorageError> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };
        match value.trim().parse::<i64>() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(StorageError::InvalidInteger { name: name.to_owned(), value }),
        }
    }

    /// Stored integer, or `default` when missing or unparsable.
    fn get_int_or(&self, name: &str, default: i64) -> i64 {
        match self.get_int(name) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                tracing::warn!(error = %e, default, "falling back to default");
                default
            }
        }
    }

    fn set_int(&mut self, name: &str, value: i64) {
        self.set(name, &value.to_string());
    }
}

/// In-process [`Storage`].
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_owned(), value.to_owned());
    }
}
