//! ### Short message service
pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;
use atat::serde_bytes::Bytes;
use responses::MessageReference;
use types::MessageFormat;

use super::NoResponse;

/// Select SMS message format +CMGF
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMGF", NoResponse)]
pub struct SetMessageFormat {
    #[at_arg(position = 0)]
    pub format: MessageFormat,
}

/// Send SMS message +CMGS
///
/// In text mode the module answers with a `> ` prompt, after which the
/// message goes out as [`MessageText`].
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMGS", NoResponse, timeout_ms = 60000)]
pub struct SendMessage<'a> {
    #[at_arg(position = 0, len = 20)]
    pub number: &'a str,
}

/// Message body following the `+CMGS` prompt
///
/// Written raw and terminated with Ctrl-Z (0x1A). The module replies with
/// `+CMGS: <mr>` once the network accepted the message.
#[derive(Clone, AtatCmd)]
#[at_cmd(
    "",
    MessageReference,
    value_sep = false,
    cmd_prefix = "",
    termination = "\x1a",
    timeout_ms = 60000
)]
pub struct MessageText<'a> {
    #[at_arg(position = 0, len = 160)]
    pub text: &'a Bytes,
}

impl<'a> MessageText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text: Bytes::new(text.as_bytes()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atat::AtatCmd;

    #[test]
    fn message_text_is_written_raw() {
        let cmd = MessageText::new("hi, there");
        let mut buf = [0u8; 32];
        let len = cmd.write(&mut buf);
        assert_eq!(&buf[..len], b"hi, there\x1a");
    }

    #[test]
    fn send_message_quotes_number() {
        let cmd = SendMessage { number: "+4512345678" };
        let mut buf = [0u8; 32];
        let len = cmd.write(&mut buf);
        assert_eq!(&buf[..len], b"AT+CMGS=\"+4512345678\"\r\n");
    }
}
