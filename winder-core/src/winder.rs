//! Winder motor control core
//!
//! [`Winder`] owns the motor state and is driven from a single control
//! loop: user commands and the periodic [`Winder::cycle`] all take
//! `&mut self`. The only thing shared with interrupt context is the
//! [`PulseCounter`], injected by reference at construction.
//!
//! # Usage
//!
//! ```ignore
//! static COUNTER: PulseCounter = PulseCounter::new();
//!
//! let mut winder = Winder::new(WinderConfig::default(), drive, clock, store, &COUNTER)?;
//! winder.set_profile(Profile::Semi);
//! winder.increase_stop_evolution();
//! winder.toggle();
//!
//! loop {
//!     if let Some(event) = winder.cycle() {
//!         // Stalled or TargetReached; the motor is already off
//!     }
//!     ticker.next().await;
//! }
//! ```

use winder_hal::{DutyCycleOutput, MonotonicClock, SettingsStore, StorageKey, StoreError};

use crate::config::{ConfigError, WinderConfig};
use crate::encoder::PulseCounter;
use crate::ramp::{RampAction, RampController};
use crate::safety::{NoSpinDetector, StallDetector};
use crate::state::{Event, MotorState, Profile};

/// Calibrated wound thread length for a pulse count
///
/// Empirical fit of thread length against drum revolutions.
pub fn thread_length(rotary_count: u32, evolution: u32) -> f64 {
    if rotary_count == 0 {
        return 0.0;
    }

    let evolution = f64::from(rotary_count) / f64::from(evolution);
    0.1502201 + 0.06363677 * evolution + 0.001051915 * evolution * evolution
}

/// Motor control core for one winder
pub struct Winder<'a, D, C, S> {
    config: WinderConfig,
    drive: D,
    clock: C,
    store: S,
    counter: &'a PulseCounter,
    /// Raw drive duty; 0 = off
    speed: u8,
    /// Winding target in evolutions; 0 = free run
    rotary_count_end: u32,
    /// Stall window in ms; 0 = stall detection disabled
    stall_timeout: u16,
    profile: Profile,
    no_spin: NoSpinDetector,
    stall: StallDetector,
    ramp: RampController,
}

impl<'a, D, C, S> Winder<'a, D, C, S>
where
    D: DutyCycleOutput,
    C: MonotonicClock,
    S: SettingsStore,
{
    /// Create the control core
    ///
    /// Loads the profile and stall timeout from `store`, falling back to
    /// `Manual` and `0` (disabled) when a value is missing or invalid.
    /// The drive is forced off and the encoder counter attached.
    pub fn new(
        config: WinderConfig,
        mut drive: D,
        clock: C,
        mut store: S,
        counter: &'a PulseCounter,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let profile = match store.load(StorageKey::Profile).and_then(Profile::try_from) {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Profile not loaded ({}), using Manual", e);
                Profile::Manual
            }
        };

        let stall_timeout = match store.load(StorageKey::StallTimeout).and_then(|t| {
            if t <= config.max_stall_ms {
                Ok(t)
            } else {
                Err(StoreError::Invalid)
            }
        }) {
            Ok(timeout) => timeout,
            Err(e) => {
                warn!("Stall timeout not loaded ({}), stall detection off", e);
                0
            }
        };

        drive.set_duty(0);
        counter.attach();

        info!(
            "Winder ready: profile={}, stall_timeout={}ms",
            profile, stall_timeout
        );

        Ok(Self {
            config,
            drive,
            clock,
            store,
            counter,
            speed: 0,
            rotary_count_end: 0,
            stall_timeout,
            profile,
            no_spin: NoSpinDetector::new(),
            stall: StallDetector::new(),
            ramp: RampController::new(),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &WinderConfig {
        &self.config
    }

    /// Get access to the drive output
    pub fn drive(&self) -> &D {
        &self.drive
    }

    /// Get access to the settings store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the shared encoder counter
    pub fn counter(&self) -> &'a PulseCounter {
        self.counter
    }

    // ---- Speed control ----

    /// Set the raw drive duty
    ///
    /// A non-zero speed clears the no-spin latch so encoder edges count
    /// again. No bounds are enforced here.
    pub fn set_speed(&mut self, speed: u8) {
        if speed != 0 {
            if !self.get_state().is_on() {
                self.stall.restart();
            }
            self.counter.set_no_spin(false);
        }
        self.speed = speed;
        self.drive.set_duty(speed);
    }

    /// Raw drive duty
    pub fn raw_speed(&self) -> u8 {
        self.speed
    }

    /// Speed as a percentage
    ///
    /// The scale starts one step below `min_speed`, so the slowest running
    /// speed reads as a few percent rather than zero.
    pub fn get_speed(&self) -> u8 {
        if !self.get_state().is_on() {
            return 0;
        }

        let min = f32::from(self.config.min_speed) - f32::from(self.config.step_speed);
        let max = f32::from(self.config.max_speed);
        (((f32::from(self.speed) - min) / (max - min)) * 100.0) as u8
    }

    /// One step faster; only while running and below the top step
    pub fn increase_speed(&mut self) {
        let step = self.config.step_speed;
        if self.speed >= self.config.min_speed
            && self.speed <= self.config.max_speed.saturating_sub(step)
        {
            self.set_speed(self.speed + step);
        }
    }

    /// One step slower, dropping straight to off below `min_speed`
    pub fn decrease_speed(&mut self) {
        if self.speed == 0 {
            return;
        }

        let slower = self.speed.saturating_sub(self.config.step_speed);
        if slower > self.config.min_speed {
            self.set_speed(slower);
        } else {
            self.set_speed(0);
        }
    }

    /// Start at `min_speed` when off, stop when on
    pub fn toggle(&mut self) {
        match self.get_state() {
            MotorState::On => self.set_speed(0),
            MotorState::Off => self.set_speed(self.config.min_speed),
        }
    }

    pub fn get_state(&self) -> MotorState {
        MotorState::from_speed(self.speed)
    }

    /// Check if encoder edges are being counted
    pub fn is_rotating(&self) -> bool {
        self.counter.is_rotating()
    }

    // ---- Rotation / length tracking ----

    /// Encoder pulses since the last reset
    pub fn rotary_count(&self) -> u32 {
        self.counter.count()
    }

    /// Completed drum revolutions
    pub fn get_evolution(&self) -> u32 {
        self.rotary_count() / self.config.evolution
    }

    /// Pulses left until the target, 0 when there is no target or it has
    /// been reached
    pub fn get_remaining_evolutions(&self) -> u32 {
        // One snapshot: the interrupt may advance the count between reads
        let count = self.rotary_count();
        if self.rotary_count_end == 0 || count / self.config.evolution >= self.rotary_count_end {
            return 0;
        }
        self.config.target_count(self.rotary_count_end) - count
    }

    /// Wound thread length in metres
    pub fn get_len(&self) -> f64 {
        thread_length(self.rotary_count(), self.config.evolution)
    }

    /// Winding target in evolutions (0 = free run)
    pub fn get_stop_evolution(&self) -> u32 {
        self.rotary_count_end
    }

    pub fn increase_stop_evolution(&mut self) {
        self.rotary_count_end = self.rotary_count_end.saturating_add(1);
    }

    /// Lower the target by one evolution and restart the count
    pub fn decrease_stop_evolution(&mut self) {
        self.counter.set_count(0);
        self.rotary_count_end = self.rotary_count_end.saturating_sub(1);
    }

    /// Set the target directly and restart the count
    pub fn set_stop_evolution(&mut self, evolutions: u32) {
        self.counter.set_count(0);
        self.rotary_count_end = evolutions;
    }

    /// Stop the motor and zero the rotation count
    pub fn reset(&mut self) {
        self.set_speed(0);
        self.counter.set_count(0);
    }

    // ---- Profile & stall timeout ----

    pub fn get_profile(&self) -> Profile {
        self.profile
    }

    /// Set the automation profile and persist it
    pub fn set_profile(&mut self, profile: Profile) {
        debug!("Profile {} -> {}", self.profile, profile);
        self.profile = profile;
        self.persist(StorageKey::Profile, profile.into());
    }

    pub fn next_profile(&mut self) {
        let next = self.profile.next();
        if next != self.profile {
            self.set_profile(next);
        }
    }

    pub fn prev_profile(&mut self) {
        let prev = self.profile.prev();
        if prev != self.profile {
            self.set_profile(prev);
        }
    }

    /// Stall window in ms (0 = disabled)
    pub fn get_stall_timeout(&self) -> u16 {
        self.stall_timeout
    }

    /// Set the stall window and persist it
    pub fn set_stall_timeout(&mut self, timeout_ms: u16) {
        debug!("Stall timeout {}ms -> {}ms", self.stall_timeout, timeout_ms);
        self.stall_timeout = timeout_ms;
        self.persist(StorageKey::StallTimeout, timeout_ms);
    }

    /// Lengthen the stall window; from off (or below the minimum) it jumps
    /// straight to `min_stall_ms`
    pub fn increase_stall_timeout(&mut self) {
        let WinderConfig {
            min_stall_ms: min,
            max_stall_ms: max,
            step_stall_ms: step,
            ..
        } = self.config;

        if self.stall_timeout < min {
            self.set_stall_timeout(min);
        } else if self.stall_timeout < max {
            self.set_stall_timeout(self.stall_timeout.saturating_add(step).min(max));
        }
    }

    /// Shorten the stall window; anything below `min_stall_ms` disables
    /// stall detection
    pub fn decrease_stall_timeout(&mut self) {
        let min = self.config.min_stall_ms;

        if self.stall_timeout > min {
            let shorter = self.stall_timeout.saturating_sub(self.config.step_stall_ms);
            self.set_stall_timeout(if shorter < min { 0 } else { shorter });
        } else if self.stall_timeout != 0 {
            self.set_stall_timeout(0);
        }
    }

    fn persist(&mut self, key: StorageKey, value: u16) {
        if let Err(e) = self.store.save(key, value) {
            warn!("Failed to save {}: {}", key, e);
        }
    }

    // ---- Cycle ----

    /// Run one control tick at the current clock time
    pub fn cycle(&mut self) -> Option<Event> {
        let now = self.clock.now_ms();
        self.cycle_at(now)
    }

    /// Run one control tick at `now`
    ///
    /// Off: no-spin detection. On: stall detection (when enabled), then the
    /// ramp controller when a target is set. Returns the forced stop made
    /// during this tick, if any.
    pub fn cycle_at(&mut self, now: u32) -> Option<Event> {
        match self.get_state() {
            MotorState::Off => {
                self.spin_detect(now);
                None
            }
            MotorState::On => {
                if self.stall_timeout != 0 && self.stall_detect(now) {
                    // The ramp must not re-energize a jammed motor
                    return Some(Event::Stalled);
                }

                if self.rotary_count_end == 0 || !self.profile.stops_at_target() {
                    return None;
                }

                // Auto runs spin_up and then spin_down in the same tick
                if self.profile == Profile::Auto {
                    self.spin_up(now);
                }
                self.spin_down(now)
            }
        }
    }

    fn spin_detect(&mut self, now: u32) {
        let count = self.counter.count();
        if self.no_spin.check(now, count, self.config.spin_timeout_ms) {
            if self.counter.is_rotating() {
                debug!("Shaft still at {} pulses, ignoring encoder", count);
            }
            self.counter.set_no_spin(true);
        }
    }

    /// Returns `true` if the drive was cut
    fn stall_detect(&mut self, now: u32) -> bool {
        let count = self.counter.count();
        if self.stall.check(now, count, self.stall_timeout) {
            warn!(
                "Motor stall: no pulses in {}ms at {} pulses, cutting drive",
                self.stall_timeout, count
            );
            self.set_speed(0);
            true
        } else {
            false
        }
    }

    /// Ramp up toward cruise speed while far from the target
    pub fn spin_up(&mut self, now: u32) -> Option<Event> {
        let remaining = self.get_remaining_evolutions();
        let action = self.ramp.spin_up(&self.config, now, remaining)?;
        self.apply(action)
    }

    /// Decelerate and stop at the target
    pub fn spin_down(&mut self, now: u32) -> Option<Event> {
        let remaining = self.get_remaining_evolutions();
        let action = self
            .ramp
            .spin_down(&self.config, now, remaining, self.speed)?;
        self.apply(action)
    }

    fn apply(&mut self, action: RampAction) -> Option<Event> {
        trace!("Ramp {} at speed {}", action, self.speed);
        match action {
            RampAction::Stop => {
                self.set_speed(0);
                // Drop the overshoot so a restart with a new target is exact
                self.counter
                    .set_count(self.config.target_count(self.rotary_count_end));
                info!("Target of {} evolutions reached", self.rotary_count_end);
                Some(Event::TargetReached)
            }
            RampAction::HoldMinimum => {
                self.set_speed(self.config.min_speed);
                None
            }
            RampAction::StepDown => {
                self.decrease_speed();
                None
            }
            RampAction::StepUp => {
                self.increase_speed();
                None
            }
        }
    }

    /// Stop the motor, detach the encoder and hand back the peripherals
    pub fn shutdown(mut self) -> (D, C, S) {
        self.speed = 0;
        self.drive.off();
        self.counter.detach();
        info!("Winder shut down");
        (self.drive, self.clock, self.store)
    }
}
