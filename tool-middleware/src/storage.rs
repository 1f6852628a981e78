//! Middleware that keeps activity output in a storage driver.

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::pipeline::Middleware;

/// Key under which a stored value can be retrieved.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(Uuid);

impl StorageKey {
    /// Generates a fresh random key.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for StorageKey {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Backend holding values captured by [`StorageMiddleware`].
pub trait StorageDriver: Send + Sync + fmt::Debug {
    /// Stores a value and returns its key.
    fn store(&self, value: String) -> StorageKey;

    /// Returns the value stored under `key`.
    fn load(&self, key: &StorageKey) -> Option<String>;

    /// Removes and returns the value stored under `key`.
    fn delete(&self, key: &StorageKey) -> Option<String>;
}

/// Volatile driver keeping values in process memory.
#[derive(Debug, Default)]
pub struct MemoryStorageDriver {
    entries: RwLock<HashMap<StorageKey, String>>,
}

impl MemoryStorageDriver {
    /// Creates an empty driver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageDriver for MemoryStorageDriver {
    fn store(&self, value: String) -> StorageKey {
        let key = StorageKey::random();
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value);
        key
    }

    fn load(&self, key: &StorageKey) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn delete(&self, key: &StorageKey) -> Option<String> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }
}

/// Named middleware that diverts activity output into a [`StorageDriver`].
///
/// An executor hands the output to [`StorageMiddleware::store`] and passes
/// the returned key on in place of the raw text.
#[derive(Clone, Debug)]
pub struct StorageMiddleware {
    name: String,
    driver: Arc<dyn StorageDriver>,
}

impl StorageMiddleware {
    /// Creates a storage middleware backed by the supplied driver.
    #[must_use]
    pub fn new(name: impl Into<String>, driver: Arc<dyn StorageDriver>) -> Self {
        Self {
            name: name.into(),
            driver,
        }
    }

    /// Stores activity output and returns the retrieval key.
    pub fn store(&self, output: impl Into<String>) -> StorageKey {
        let key = self.driver.store(output.into());
        debug!(middleware = %self.name, %key, "activity output stored");
        key
    }

    /// Returns previously stored output.
    #[must_use]
    pub fn retrieve(&self, key: &StorageKey) -> Option<String> {
        self.driver.load(key)
    }

    /// Returns the backing driver.
    #[must_use]
    pub fn driver(&self) -> &Arc<dyn StorageDriver> {
        &self.driver
    }
}

impl Middleware for StorageMiddleware {
    fn name(&self) -> &str {
        &self.name
    }
}
