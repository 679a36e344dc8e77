// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{str::FromStr,
          sync::{Arc,
                 atomic::{AtomicU64, Ordering}},
          time::Duration};

/// Delay between two observable steps of the sort. A bigger delay is a slower
/// animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Speed(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
#[error(
    "Delay of {delay_ms} ms is not allowed, it must be between {} and {} ms, in steps of {} ms",
    Speed::MIN_DELAY_MS, Speed::MAX_DELAY_MS, Speed::DELAY_STEP_MS
)]
#[diagnostic(code(r3bl_bubble_viz::speed::invalid_delay))]
pub struct InvalidSpeedError {
    pub delay_ms: u64,
}

impl Speed {
    pub const MIN_DELAY_MS: u64 = 100;
    pub const MAX_DELAY_MS: u64 = 1_000;
    pub const DELAY_STEP_MS: u64 = 100;
    pub const DEFAULT_DELAY_MS: u64 = 500;

    /// # Errors
    ///
    /// Returns an error if `delay_ms` is out of range or not a multiple of the step.
    pub fn try_new(delay_ms: u64) -> Result<Self, InvalidSpeedError> {
        let is_in_range = (Self::MIN_DELAY_MS..=Self::MAX_DELAY_MS).contains(&delay_ms);
        if is_in_range && delay_ms.is_multiple_of(Self::DELAY_STEP_MS) {
            Ok(Self(delay_ms))
        } else {
            Err(InvalidSpeedError { delay_ms })
        }
    }

    #[must_use]
    pub fn as_millis(self) -> u64 { self.0 }

    #[must_use]
    pub fn as_duration(self) -> Duration { Duration::from_millis(self.0) }

    /// One step shorter delay, clamped.
    #[must_use]
    pub fn faster(self) -> Self {
        Self((self.0 - Self::DELAY_STEP_MS).max(Self::MIN_DELAY_MS))
    }

    /// One step longer delay, clamped.
    #[must_use]
    pub fn slower(self) -> Self {
        Self((self.0 + Self::DELAY_STEP_MS).min(Self::MAX_DELAY_MS))
    }
}

impl Default for Speed {
    fn default() -> Self { Self(Self::DEFAULT_DELAY_MS) }
}

impl TryFrom<u64> for Speed {
    type Error = InvalidSpeedError;

    fn try_from(delay_ms: u64) -> Result<Self, Self::Error> { Self::try_new(delay_ms) }
}

/// Lets `clap` parse `--speed 300`.
impl FromStr for Speed {
    type Err = miette::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let delay_ms = s
            .trim()
            .parse::<u64>()
            .map_err(|err| miette::miette!("\"{s}\" is not a delay in ms: {err}"))?;
        Ok(Self::try_new(delay_ms)?)
    }
}

/// Shared, always writable [`Speed`] setting. The driver reads it right before every
/// suspension, so a change takes effect on the next delay and never shortens one that
/// is already in flight.
#[derive(Debug, Clone)]
pub struct SpeedControl {
    delay_ms: Arc<AtomicU64>,
}

impl Default for SpeedControl {
    fn default() -> Self { Self::new(Speed::default()) }
}

impl SpeedControl {
    #[must_use]
    pub fn new(speed: Speed) -> Self {
        Self {
            delay_ms: Arc::new(AtomicU64::new(speed.as_millis())),
        }
    }

    #[must_use]
    pub fn get(&self) -> Speed { Speed(self.delay_ms.load(Ordering::Acquire)) }

    pub fn set(&self, speed: Speed) { self.delay_ms.store(speed.as_millis(), Ordering::Release); }

    /// Returns the new speed.
    pub fn faster(&self) -> Speed {
        let it = self.get().faster();
        self.set(it);
        it
    }

    /// Returns the new speed.
    pub fn slower(&self) -> Speed {
        let it = self.get().slower();
        self.set(it);
        it
    }
}
