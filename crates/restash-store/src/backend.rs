use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::StorageError;

/// Contract of the persistent key-value store: synchronous, string-keyed,
/// fallible on mutation (quota, disabled storage).
///
/// Mutating a backend directly bypasses change notification and is
/// unsupported; all writes go through [`Storage`](crate::storage::Storage).
pub trait StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, raw: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process backend holding raw strings in a map. Clones share the map.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    map: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, raw: &str) -> Result<(), StorageError> {
        self.map.borrow_mut().insert(key.to_owned(), raw.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.map.borrow_mut().remove(key);
        Ok(())
    }
}
