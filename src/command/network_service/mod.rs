//! ### Network service
pub mod responses;

use atat::atat_derive::AtatCmd;

use responses::{NetworkRegistrationStatus, SignalQuality};

/// Network registration +CREG
///
/// The read command returns `+CREG: <n>,<stat>`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CREG?", NetworkRegistrationStatus)]
pub struct GetNetworkRegistrationStatus;

/// Signal quality report +CSQ
///
/// Returns `+CSQ: <rssi>,<ber>`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CSQ", SignalQuality)]
pub struct GetSignalQuality;
