//! Hand-written peripherals for host tests

use core::cell::Cell;

use winder_hal::{DutyCycleOutput, MonotonicClock, SettingsStore, StorageKey, StoreError};

/// Drive that records what it was told
#[derive(Debug, Default)]
pub struct MockDrive {
    pub duty: u8,
    pub writes: u32,
}

impl DutyCycleOutput for MockDrive {
    fn set_duty(&mut self, duty: u8) {
        self.duty = duty;
        self.writes += 1;
    }
}

/// Clock advanced by hand from the test body
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u32>,
}

impl ManualClock {
    pub fn at(now: u32) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl MonotonicClock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

/// Two-slot settings store
#[derive(Debug, Default)]
pub struct MockStore {
    pub profile: Option<u16>,
    pub stall_timeout: Option<u16>,
    pub fail_saves: bool,
    pub saves: u32,
}

impl MockStore {
    fn slot(&mut self, key: StorageKey) -> &mut Option<u16> {
        match key {
            StorageKey::Profile => &mut self.profile,
            StorageKey::StallTimeout => &mut self.stall_timeout,
        }
    }
}

impl SettingsStore for MockStore {
    fn load(&mut self, key: StorageKey) -> Result<u16, StoreError> {
        self.slot(key).ok_or(StoreError::NotFound)
    }

    fn save(&mut self, key: StorageKey, value: u16) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Io);
        }
        self.saves += 1;
        *self.slot(key) = Some(value);
        Ok(())
    }
}
