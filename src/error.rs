use embedded_io_async::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GenericError {
    Timeout,
    Clock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    // Transport errors
    Io(ErrorKind),
    IoPin,
    Overflow,

    /// Reply to a command: `ERROR`, `+CME ERROR`, `+CMS ERROR`, no reply
    /// before the deadline or a reply that did not parse.
    Atat(atat::Error),

    // Session errors
    BootFailed,
    NotRegistered,
    HttpInit,
    /// The GET action did not report success. Carries the HTTP status when
    /// the modem reported one.
    HttpRequest(Option<u16>),
    Sms,

    // Malformed or unexpected response text
    Parse,

    // Generic shared errors, e.g. from `core::`
    Generic(GenericError),
}

impl Error {
    /// The serial link or the power pin failed, as opposed to the module
    /// answering something other than `OK`.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Io(_)
                | Error::IoPin
                | Error::Overflow
                | Error::Atat(atat::Error::Read | atat::Error::Write)
        )
    }
}

impl From<atat::Error> for Error {
    fn from(e: atat::Error) -> Self {
        Self::Atat(e)
    }
}

impl From<GenericError> for Error {
    fn from(e: GenericError) -> Self {
        Self::Generic(e)
    }
}
