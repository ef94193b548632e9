use core::fmt;

use serde::{de, Deserialize, Deserializer};

use super::types::PinStatusCode;

const VARIANTS: &[&str] = &[
    "READY",
    "SIM PIN",
    "SIM PUK",
    "PH_SIM PIN",
    "PH_SIM PUK",
    "SIM PIN2",
    "SIM PUK2",
];

impl<'de> Deserialize<'de> for PinStatusCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CodeVisitor;

        impl<'de> de::Visitor<'de> for CodeVisitor {
            type Value = PinStatusCode;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a +CPIN code")
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                match value {
                    b"READY" => Ok(PinStatusCode::Ready),
                    b"SIM PIN" => Ok(PinStatusCode::SimPin),
                    b"SIM PUK" => Ok(PinStatusCode::SimPuk),
                    b"PH_SIM PIN" => Ok(PinStatusCode::PhSimPin),
                    b"PH_SIM PUK" => Ok(PinStatusCode::PhSimPuk),
                    b"SIM PIN2" => Ok(PinStatusCode::SimPin2),
                    b"SIM PUK2" => Ok(PinStatusCode::SimPuk2),
                    _ => Err(de::Error::unknown_variant(
                        core::str::from_utf8(value).unwrap_or("?"),
                        VARIANTS,
                    )),
                }
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                self.visit_bytes(value.as_bytes())
            }
        }

        // `PH_SIM PIN` is not a plain identifier, so the code is taken as raw
        // bytes up to the next comma.
        deserializer.deserialize_bytes(CodeVisitor)
    }
}
