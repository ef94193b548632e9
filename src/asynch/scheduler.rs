//! Producer side of reporting.
//!
//! The producer adds to the count of the current window from wherever it
//! runs. Closing a window captures and resets the count in the same critical
//! section as `increment`, so no increment is lost or counted twice, and
//! hands the report to the upload worker without waiting for it.

use core::cell::Cell;

use chrono::{NaiveDateTime, Timelike};
use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};
use embassy_sync::channel::{Sender, TrySendError};
use embassy_time::{Duration, Instant};

use crate::clock::WallClock;
use crate::payload::UploadPayload;

/// Reporting period used when the host has no other preference
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportWindow {
    pub window_start: Instant,
    pub accumulated_count: u32,
}

pub struct ReportingScheduler<'d, W, const N: usize> {
    window: Mutex<CriticalSectionRawMutex, Cell<ReportWindow>>,
    period: Duration,
    clock: &'d W,
    payloads: Sender<'d, CriticalSectionRawMutex, UploadPayload, N>,
}

impl<'d, W: WallClock, const N: usize> ReportingScheduler<'d, W, N> {
    pub(crate) fn new(
        payloads: Sender<'d, CriticalSectionRawMutex, UploadPayload, N>,
        clock: &'d W,
        period: Duration,
    ) -> Self {
        Self {
            window: Mutex::new(Cell::new(ReportWindow {
                window_start: Instant::now(),
                accumulated_count: 0,
            })),
            period,
            clock,
            payloads,
        }
    }

    /// Add `n` to the current window.
    pub fn increment(&self, n: u32) {
        self.window.lock(|w| {
            let mut window = w.get();
            window.accumulated_count = window.accumulated_count.saturating_add(n);
            w.set(window);
        });
    }

    pub fn count(&self) -> u32 {
        self.window.lock(|w| w.get().accumulated_count)
    }

    pub fn window_start(&self) -> Instant {
        self.window.lock(|w| w.get().window_start)
    }

    /// When the current window is due to close
    pub fn deadline(&self) -> Instant {
        self.window_start() + self.period
    }

    pub fn poll(&self) -> Option<UploadPayload> {
        self.poll_at(Instant::now())
    }

    /// Close the window if `period` has elapsed at `now`, and queue its
    /// report.
    ///
    /// The returned payload is the closed window, even when the queue was
    /// full and the report had to be dropped.
    pub fn poll_at(&self, now: Instant) -> Option<UploadPayload> {
        let value = self.window.lock(|w| {
            let window = w.get();
            if now.saturating_duration_since(window.window_start) < self.period {
                return None;
            }
            w.set(ReportWindow {
                window_start: now,
                accumulated_count: 0,
            });
            Some(window.accumulated_count)
        })?;

        let payload = match UploadPayload::from_datetime(&self.clock.now(), value) {
            Ok(payload) => payload,
            Err(e) => {
                error!("Window of {} closed, timestamp unusable: {:?}", value, e);
                return None;
            }
        };

        debug!(
            "Window closed with {} at {} {}",
            value,
            payload.date.as_str(),
            payload.time.as_str()
        );
        match self.payloads.try_send(payload.clone()) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                warn!("Upload queue full, dropping report of {}", dropped.value)
            }
        }
        Some(payload)
    }
}

/// Turns successive counts of visible objects into objects that left.
///
/// Whenever the count drops, the difference is taken as having passed. A
/// detector that flickers (one object missed for a frame, then seen again)
/// is counted as a pass.
#[derive(Debug, Default, Clone)]
pub struct TransitionCounter {
    previous: u32,
}

impl TransitionCounter {
    pub const fn new() -> Self {
        Self { previous: 0 }
    }

    pub fn observe(&mut self, current: u32) -> u32 {
        let passed = self.previous.saturating_sub(current);
        self.previous = current;
        passed
    }
}

/// Time until the wall clock reaches the next multiple of `window`, counted
/// from midnight.
pub fn until_aligned(now: NaiveDateTime, window: Duration) -> Duration {
    let window = window.as_secs();
    if window == 0 {
        return Duration::from_secs(0);
    }
    let since_midnight = now.num_seconds_from_midnight() as u64;
    match since_midnight % window {
        0 => Duration::from_secs(0),
        r => Duration::from_secs(window - r),
    }
}
