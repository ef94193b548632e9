//! Responses for Network service Commands
use atat::atat_derive::{AtatEnum, AtatResp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetworkRegistrationStat {
    /// • 0: not registered, the MT is not currently searching a new operator to register to
    NotRegistered = 0,
    /// • 1: registered, home network
    Registered = 1,
    /// • 2: not registered, but the MT is currently searching a new operator to register to
    NotRegisteredSearching = 2,
    /// • 3: registration denied
    RegistrationDenied = 3,
    /// • 4: unknown
    Unknown = 4,
    /// • 5: registered, roaming
    RegisteredRoaming = 5,
}

/// Network registration +CREG
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatResp)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NetworkRegistrationStatus {
    #[at_arg(position = 0)]
    pub n: u8,
    #[at_arg(position = 1)]
    pub stat: NetworkRegistrationStat,
}

impl NetworkRegistrationStatus {
    pub fn is_registered(&self) -> bool {
        matches!(
            self.stat,
            NetworkRegistrationStat::Registered | NetworkRegistrationStat::RegisteredRoaming
        )
    }
}

/// Signal quality report +CSQ
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatResp)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalQuality {
    /// 0..=31, 99 when not known or not detectable
    #[at_arg(position = 0)]
    pub rssi: u8,
    #[at_arg(position = 1)]
    pub ber: u8,
}

impl SignalQuality {
    /// Received signal strength in dBm
    pub fn dbm(&self) -> Option<i16> {
        match self.rssi {
            0 => Some(-115),
            1 => Some(-111),
            r @ 2..=30 => Some(-110 + (r as i16 - 2) * 2),
            31 => Some(-52),
            _ => None,
        }
    }
}
