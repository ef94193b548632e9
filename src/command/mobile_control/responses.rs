//! Responses for Mobile equipment control Commands
use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Error, GenericError};

/// Clock +CCLK
///
/// `+CCLK: "yy/MM/dd,hh:mm:ss±zz"`, the zone being in quarters of an hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    pub local: NaiveDateTime,
    pub offset_quarters: i8,
}

impl atat::AtatResp for Clock {}

fn number<T: core::str::FromStr>(text: Option<&str>) -> Result<T, Error> {
    text.ok_or(Error::Parse)?.trim().parse().map_err(|_| Error::Parse)
}

impl Clock {
    pub fn from_response(response: &[u8]) -> Result<Self, Error> {
        let text = core::str::from_utf8(response).map_err(|_| Error::Parse)?;
        let info = text.trim().strip_prefix("+CCLK:").ok_or(Error::Parse)?;
        Self::parse(info)
    }

    pub fn parse(info: &str) -> Result<Self, Error> {
        let quoted = info.split('"').nth(1).ok_or(Error::Parse)?;
        let mut parts = quoted.split(',');
        let date = parts.next().ok_or(Error::Parse)?;
        let time_zone = parts.next().ok_or(Error::Parse)?;

        let (time, offset_quarters) = match time_zone.find(|c: char| c == '+' || c == '-') {
            Some(i) => (&time_zone[..i], number::<i8>(Some(&time_zone[i..]))?),
            None => (time_zone, 0),
        };

        let mut date = date.split('/');
        let year: i32 = number(date.next())?;
        let month: u32 = number(date.next())?;
        let day: u32 = number(date.next())?;

        let mut time = time.split(':');
        let hour: u32 = number(time.next())?;
        let minute: u32 = number(time.next())?;
        let second: u32 = number(time.next())?;

        let local = NaiveDate::from_ymd_opt(2000 + year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .ok_or(Error::Generic(GenericError::Clock))?;

        Ok(Self {
            local,
            offset_quarters,
        })
    }
}
