//! Responses for bearer Commands
use atat::atat_derive::AtatResp;
use heapless::String;

use super::types::{BearerLinkStatus, GPRSAttachedState, ProfileId};

/// `+SAPBR: <cid>,<status>,<ip>`
#[derive(Debug, Clone, PartialEq, Eq, AtatResp)]
pub struct BearerStatus {
    #[at_arg(position = 0)]
    pub cid: ProfileId,
    #[at_arg(position = 1)]
    pub status: BearerLinkStatus,
    #[at_arg(position = 2)]
    pub ip: String<15>,
}

impl BearerStatus {
    pub fn is_connected(&self) -> bool {
        self.status == BearerLinkStatus::Connected
    }
}

/// `+CGATT: <state>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatResp)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GPRSAttached {
    #[at_arg(position = 0)]
    pub state: GPRSAttachedState,
}

impl GPRSAttached {
    pub fn is_attached(&self) -> bool {
        self.state == GPRSAttachedState::Attached
    }
}
