//! RAM-backed settings store
//!
//! Values survive for the lifetime of the store only. Useful on boards
//! without persistent memory that still want settings changes to stick
//! until power-off, and for exercising the core on the host.

use heapless::LinearMap;
use winder_hal::{SettingsStore, StorageKey, StoreError};

/// Fixed-capacity key/value store in RAM
#[derive(Debug, Clone, Default)]
pub struct MemoryStore<const N: usize> {
    values: LinearMap<StorageKey, u16, N>,
}

impl<const N: usize> MemoryStore<N> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            values: LinearMap::new(),
        }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing has been stored
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Forget every stored value
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl<const N: usize> SettingsStore for MemoryStore<N> {
    fn load(&mut self, key: StorageKey) -> Result<u16, StoreError> {
        self.values.get(&key).copied().ok_or(StoreError::NotFound)
    }

    fn save(&mut self, key: StorageKey, value: u16) -> Result<(), StoreError> {
        self.values
            .insert(key, value)
            .map(|_| ())
            .map_err(|_| StoreError::Full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_reports_not_found() {
        let mut store = MemoryStore::<2>::new();
        assert!(store.is_empty());
        assert_eq!(store.load(StorageKey::Profile), Err(StoreError::NotFound));
    }

    #[test]
    fn test_save_overwrites() {
        let mut store = MemoryStore::<2>::new();
        store.save(StorageKey::StallTimeout, 500).unwrap();
        store.save(StorageKey::StallTimeout, 600).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.load(StorageKey::StallTimeout), Ok(600));
    }

    #[test]
    fn test_full_store() {
        let mut store = MemoryStore::<1>::new();
        store.save(StorageKey::Profile, 2).unwrap();
        assert_eq!(
            store.save(StorageKey::StallTimeout, 500),
            Err(StoreError::Full)
        );
        // Existing keys can still be updated
        assert_eq!(store.save(StorageKey::Profile, 1), Ok(()));
    }

    #[test]
    fn test_clear() {
        let mut store = MemoryStore::<2>::new();
        store.save(StorageKey::Profile, 2).unwrap();
        store.clear();
        assert!(store.is_empty());
    }
}
