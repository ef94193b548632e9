//! The report handed from the scheduler to an uploader.

use core::fmt::Write as _;

use chrono::{Datelike, NaiveDateTime, Timelike};
use heapless::String;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Longest request URL accepted by `AT+HTTPPARA="URL"`
pub const URL_LEN: usize = 256;

/// One closed reporting window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UploadPayload {
    /// `DD/MM/YYYY`
    pub date: String<10>,
    /// `HH:MM`
    pub time: String<5>,
    pub value: u32,
}

impl UploadPayload {
    pub fn new(date: &str, time: &str, value: u32) -> Result<Self, Error> {
        Ok(Self {
            date: String::try_from(date).map_err(|_| Error::Overflow)?,
            time: String::try_from(time).map_err(|_| Error::Overflow)?,
            value,
        })
    }

    pub fn from_datetime(at: &NaiveDateTime, value: u32) -> Result<Self, Error> {
        let mut date = String::new();
        write!(date, "{:02}/{:02}/{:04}", at.day(), at.month(), at.year())
            .map_err(|_| Error::Overflow)?;
        let mut time = String::new();
        write!(time, "{:02}:{:02}", at.hour(), at.minute()).map_err(|_| Error::Overflow)?;
        Ok(Self { date, time, value })
    }

    /// `<base>?date=<date>&time=<time>&value=<value>`
    ///
    /// Nothing is percent-encoded, the endpoint expects the slashes and the
    /// colon as they are.
    pub fn url(&self, base: &str) -> Result<String<URL_LEN>, Error> {
        let joiner = if base.contains('?') { '&' } else { '?' };
        let mut url = String::new();
        write!(
            url,
            "{}{}date={}&time={}&value={}",
            base, joiner, self.date, self.time, self.value
        )
        .map_err(|_| Error::Overflow)?;
        Ok(url)
    }
}
