//! Responses for Security Commands
use atat::atat_derive::AtatResp;

use super::types::PinStatusCode;

/// Enter PIN +CPIN
#[derive(Debug, Clone, PartialEq, Eq, AtatResp)]
pub struct PinStatus {
    #[at_arg(position = 0)]
    pub code: PinStatusCode,
}

impl PinStatus {
    pub fn is_ready(&self) -> bool {
        self.code == PinStatusCode::Ready
    }
}
