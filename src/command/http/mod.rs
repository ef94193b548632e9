//! ### HTTP client
//!
//! The built-in HTTP(S) client of the SIM800 runs over bearer profile 1
//! configured with +SAPBR.
pub mod responses;
pub mod types;
pub mod urc;

use atat::atat_derive::AtatCmd;
use responses::HttpReadResponse;
use types::{HttpMethod, SslMode};

use super::NoResponse;

/// Initialize HTTP service +HTTPINIT
///
/// Answers `ERROR` while a previous session is still open.
#[derive(Clone, AtatCmd)]
#[at_cmd("+HTTPINIT", NoResponse, timeout_ms = 5000)]
pub struct HttpInit;

/// Terminate HTTP service +HTTPTERM
#[derive(Clone, AtatCmd)]
#[at_cmd("+HTTPTERM", NoResponse, timeout_ms = 5000)]
pub struct HttpTerm;

/// Enable HTTPS function +HTTPSSL
#[derive(Clone, AtatCmd)]
#[at_cmd("+HTTPSSL", NoResponse)]
pub struct SetHttpSsl {
    #[at_arg(position = 0)]
    pub mode: SslMode,
}

/// Set HTTP parameters value +HTTPPARA
#[derive(Clone, AtatCmd)]
#[at_cmd("+HTTPPARA", NoResponse)]
pub struct SetHttpParameter<'a> {
    #[at_arg(position = 0, len = 8)]
    pub tag: &'a str,
    #[at_arg(position = 1, len = 256)]
    pub value: &'a str,
}

impl<'a> SetHttpParameter<'a> {
    pub fn url(url: &'a str) -> Self {
        Self { tag: "URL", value: url }
    }
}

/// Set HTTP parameters value +HTTPPARA
///
/// The bearer profile identifier is the one numeric parameter, and is sent
/// without quotes.
#[derive(Clone, AtatCmd)]
#[at_cmd("+HTTPPARA", NoResponse)]
pub struct SetHttpCid {
    #[at_arg(position = 0, len = 8)]
    pub tag: &'static str,
    #[at_arg(position = 1)]
    pub cid: u8,
}

impl SetHttpCid {
    pub fn new(cid: u8) -> Self {
        Self { tag: "CID", cid }
    }
}

/// HTTP method action +HTTPACTION
///
/// `OK` only acknowledges the request. The outcome arrives later as the
/// [`urc::HttpActionResult`] URC `+HTTPACTION: <method>,<status>,<datalen>`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+HTTPACTION", NoResponse)]
pub struct HttpAction {
    #[at_arg(position = 0)]
    pub method: HttpMethod,
}

/// Read the HTTP server response +HTTPREAD
#[derive(Clone, AtatCmd)]
#[at_cmd("+HTTPREAD", HttpReadResponse, timeout_ms = 10000)]
pub struct HttpRead;
