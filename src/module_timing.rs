//! Default timings for the SIM800 family.
//!
//! These are the defaults picked up by [`crate::config::CellularConfig`]; a
//! config may override any of them.

use embassy_time::Duration;

/// Low time of `PWRKEY` to switch the module on, or off again when it is
/// already running
pub const PWR_TOGGLE_TIME: Duration = Duration::from_secs(2);

/// Time to wait for the firmware to boot after a power toggle
pub const BOOT_TIME: Duration = Duration::from_secs(10);

/// Wait between two `+CREG?` polls
pub const REGISTRATION_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Round trip allowance for `+HTTPACTION` to report the remote result
pub const HTTP_ACTION_TIME: Duration = Duration::from_secs(20);
