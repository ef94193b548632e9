//! Responses for HTTP Commands
use core::fmt;

use atat::atat_derive::AtatResp;
use heapless::String;
use serde::{de, Deserialize, Deserializer};

/// Capacity of [`HttpBody`]. Longer bodies are cut off.
pub const MAX_BODY_LEN: usize = 512;

/// `+HTTPREAD: <datalen>` followed by the body on the next lines
#[derive(Debug, Clone, PartialEq, Eq, AtatResp)]
pub struct HttpReadResponse {
    #[at_arg(position = 0)]
    pub length: u32,
    #[at_arg(position = 1)]
    pub body: HttpBody,
}

/// Everything after the `+HTTPREAD:` header line, as text.
///
/// Bytes that are not UTF-8 end the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpBody(pub String<MAX_BODY_LEN>);

impl HttpBody {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl<'de> Deserialize<'de> for HttpBody {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BodyVisitor;

        impl<'de> de::Visitor<'de> for BodyVisitor {
            type Value = HttpBody;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an HTTP response body")
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let text = match core::str::from_utf8(value) {
                    Ok(text) => text,
                    Err(e) => core::str::from_utf8(&value[..e.valid_up_to()]).unwrap_or_default(),
                };
                let mut body = String::new();
                for c in text.chars() {
                    if body.push(c).is_err() {
                        break;
                    }
                }
                Ok(HttpBody(body))
            }
        }

        // The body is free text and always the last parameter, so it takes
        // the rest of the response.
        deserializer.deserialize_tuple(1, BodyVisitor)
    }
}
