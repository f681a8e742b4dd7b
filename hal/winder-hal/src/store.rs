//! Persistent settings abstractions
//!
//! Provides the key/value port used to keep the winding profile and stall
//! timeout across restarts. Backing storage (EEPROM, flash with wear
//! leveling, RAM) is up to the implementation.

/// Storage keys for persisted settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageKey {
    /// Automation profile (Manual / Semi / Auto)
    Profile = 0,
    /// Stall timeout in milliseconds
    StallTimeout = 1,
}

/// Errors from settings storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Key not found (or no storage fitted)
    NotFound,
    /// Underlying storage operation failed
    Io,
    /// Storage is full
    Full,
    /// Stored value is out of range for the key
    Invalid,
}

/// Key/value settings storage
///
/// Values are 16-bit words, matching a classic EEPROM cell layout.
/// Callers treat every error as "use the default".
pub trait SettingsStore {
    /// Load the value stored under `key`
    fn load(&mut self, key: StorageKey) -> Result<u16, StoreError>;

    /// Store `value` under `key`
    fn save(&mut self, key: StorageKey, value: u16) -> Result<(), StoreError>;
}

impl<T: SettingsStore + ?Sized> SettingsStore for &mut T {
    fn load(&mut self, key: StorageKey) -> Result<u16, StoreError> {
        (**self).load(key)
    }

    fn save(&mut self, key: StorageKey, value: u16) -> Result<(), StoreError> {
        (**self).save(key, value)
    }
}

/// Storage stand-in for boards without persistent memory
///
/// Every load reports [`StoreError::NotFound`] and every save succeeds
/// without doing anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStore;

impl SettingsStore for NoStore {
    fn load(&mut self, _key: StorageKey) -> Result<u16, StoreError> {
        Err(StoreError::NotFound)
    }

    fn save(&mut self, _key: StorageKey, _value: u16) -> Result<(), StoreError> {
        Ok(())
    }
}
