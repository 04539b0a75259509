//! Registry of temporary tables deployed through a dialect.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Names of the temporary tables a dialect instance has deployed and not yet
/// dropped.
///
/// References to registered tables are never schema-qualified. Each dialect
/// owns its own registry, so two dialects never see each other's tables.
#[derive(Debug, Default)]
pub struct TemporaryTables {
    names: Mutex<BTreeSet<String>>,
}

impl TemporaryTables {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            names: Mutex::new(BTreeSet::new()),
        }
    }

    /// Records `name`. Returns false if it was already registered.
    pub fn register(&self, name: &str) -> bool {
        self.lock().insert(name.to_string())
    }

    /// Forgets `name`. Returns false if it was not registered.
    pub fn unregister(&self, name: &str) -> bool {
        self.lock().remove(name)
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains(name)
    }

    /// The registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    // The set holds plain names, so a panic while it was locked cannot leave
    // it half-updated.
    fn lock(&self) -> MutexGuard<'_, BTreeSet<String>> {
        self.names.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
