//! ### Packet switched data and IP application bearer
//!
//! The HTTP client of the module runs on top of a bearer profile configured
//! through +SAPBR. Profile 1 is used throughout.

pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;
use responses::{BearerStatus, GPRSAttached};
use types::{BearerCommand, ProfileId};

use super::NoResponse;

/// Bearer settings for applications based on IP +SAPBR
///
/// `AT+SAPBR=3,<cid>,<tag>,<value>`, e.g. `"CONTYPE","GPRS"` or `"APN","..."`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+SAPBR", NoResponse, timeout_ms = 5000)]
pub struct SetBearerParameter<'a> {
    #[at_arg(position = 0)]
    pub cmd_type: BearerCommand,
    #[at_arg(position = 1)]
    pub cid: ProfileId,
    #[at_arg(position = 2, len = 12)]
    pub tag: &'a str,
    #[at_arg(position = 3, len = 64)]
    pub value: &'a str,
}

impl<'a> SetBearerParameter<'a> {
    pub fn new(cid: ProfileId, tag: &'a str, value: &'a str) -> Self {
        Self {
            cmd_type: BearerCommand::SetParameter,
            cid,
            tag,
            value,
        }
    }
}

/// Bearer settings for applications based on IP +SAPBR
///
/// Opens or closes a bearer profile. Opening may take up to 85 seconds on a
/// poor network.
#[derive(Clone, AtatCmd)]
#[at_cmd("+SAPBR", NoResponse, timeout_ms = 85000)]
pub struct BearerAction {
    #[at_arg(position = 0)]
    pub cmd_type: BearerCommand,
    #[at_arg(position = 1)]
    pub cid: ProfileId,
}

/// Bearer settings for applications based on IP +SAPBR
///
/// `AT+SAPBR=2,<cid>` reports the state and address of a bearer profile.
#[derive(Clone, AtatCmd)]
#[at_cmd("+SAPBR", BearerStatus, timeout_ms = 5000)]
pub struct GetBearerStatus {
    #[at_arg(position = 0)]
    pub cmd_type: BearerCommand,
    #[at_arg(position = 1)]
    pub cid: ProfileId,
}

impl GetBearerStatus {
    pub fn new(cid: ProfileId) -> Self {
        Self {
            cmd_type: BearerCommand::Query,
            cid,
        }
    }
}

/// Attach or detach from GPRS service +CGATT
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGATT?", GPRSAttached, timeout_ms = 10000)]
pub struct GetGPRSAttached;
