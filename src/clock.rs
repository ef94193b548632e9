//! Wall clock time for report timestamps.
//!
//! The host may have no RTC and no other time source. [`NetworkClock`] takes
//! the time the module got from the network once and extrapolates from the
//! monotonic [`Instant`] afterwards.

use core::cell::Cell;

use chrono::{NaiveDateTime, TimeDelta};
use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};
use embassy_time::Instant;

pub trait WallClock {
    fn now(&self) -> NaiveDateTime;
}

pub struct NetworkClock {
    anchor: Mutex<CriticalSectionRawMutex, Cell<Option<(NaiveDateTime, Instant)>>>,
}

impl Default for NetworkClock {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkClock {
    pub const fn new() -> Self {
        Self {
            anchor: Mutex::new(Cell::new(None)),
        }
    }

    /// Anchor the clock to `local`, taken as the time right now.
    pub fn set(&self, local: NaiveDateTime) {
        self.set_at(local, Instant::now());
    }

    pub fn set_at(&self, local: NaiveDateTime, at: Instant) {
        self.anchor.lock(|a| a.set(Some((local, at))));
    }

    pub fn is_synced(&self) -> bool {
        self.anchor.lock(|a| a.get().is_some())
    }

    /// The wall clock time at `at`.
    ///
    /// Unsynced, this is the unix epoch plus the uptime.
    pub fn now_at(&self, at: Instant) -> NaiveDateTime {
        let (base, since) = self
            .anchor
            .lock(|a| a.get())
            .unwrap_or((NaiveDateTime::default(), Instant::from_ticks(0)));

        let elapsed = at.saturating_duration_since(since).as_millis();
        i64::try_from(elapsed)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .and_then(|delta| base.checked_add_signed(delta))
            .unwrap_or(base)
    }
}

impl WallClock for NetworkClock {
    fn now(&self) -> NaiveDateTime {
        self.now_at(Instant::now())
    }
}
