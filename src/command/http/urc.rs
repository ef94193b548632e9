//! Unsolicited responses for HTTP Commands
use atat::atat_derive::AtatResp;

use super::types::HttpMethod;

/// `+HTTPACTION: <method>,<status>,<datalen>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatResp)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HttpActionResult {
    #[at_arg(position = 0)]
    pub method: HttpMethod,
    #[at_arg(position = 1)]
    pub status: u16,
    #[at_arg(position = 2)]
    pub length: u32,
}

impl HttpActionResult {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}
