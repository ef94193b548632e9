//! ### Mobile equipment control and status
pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;
use responses::Clock;
use types::Functionality;

use super::NoResponse;

/// Set phone functionality +CFUN
#[derive(Clone, AtatCmd)]
#[at_cmd("+CFUN", NoResponse, timeout_ms = 10000)]
pub struct SetModuleFunctionality {
    #[at_arg(position = 0)]
    pub fun: Functionality,
}

/// Clock +CCLK
///
/// Returns the real time clock of the module, which is set from the network
/// time when network time synchronisation is enabled.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CCLK?", Clock, parse = Clock::from_response)]
pub struct GetClock;
