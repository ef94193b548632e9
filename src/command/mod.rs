//! AT commands for the SIM800 family
//!
//! Only the subset needed to bring the module up, attach a bearer, drive the
//! built-in HTTP client, read the network clock and send a short message.

pub mod device_lock;
pub mod http;
pub mod mobile_control;
pub mod network_service;
pub mod psn;
pub mod sms;

use atat::atat_derive::{AtatCmd, AtatResp, AtatUrc};

#[derive(Debug, Clone, PartialEq, Eq, AtatResp)]
pub struct NoResponse;

/// Attention. Answers `OK` once the firmware has finished booting.
#[derive(Clone, AtatCmd)]
#[at_cmd("", NoResponse, timeout_ms = 2000)]
pub struct AT;

#[derive(Debug, Clone, AtatUrc)]
pub enum Urc {
    /// Outcome of a `+HTTPACTION` request, some time after its `OK`
    #[at_urc("+HTTPACTION")]
    HttpAction(http::urc::HttpActionResult),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::http::types::HttpMethod;
    use atat::AtatUrc;

    #[test]
    fn parse_http_action_urc() {
        let Some(Urc::HttpAction(result)) = Urc::parse(b"+HTTPACTION: 0,200,12") else {
            panic!("no +HTTPACTION URC");
        };
        assert_eq!(result.method, HttpMethod::Get);
        assert_eq!(result.status, 200);
        assert_eq!(result.length, 12);
    }

    #[test]
    fn other_lines_are_not_urcs() {
        assert!(Urc::parse(b"+CREG: 0,1").is_none());
    }
}
