//! ### Security
pub mod impl_;
pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;
use responses::PinStatus;

/// Enter PIN +CPIN
///
/// The read command reports whether the SIM is ready or waiting for a
/// password.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CPIN?", PinStatus, timeout_ms = 5000)]
pub struct GetPinStatus;
