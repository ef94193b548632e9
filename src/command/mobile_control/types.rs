//! Argument and parameter types used by Mobile equipment control Commands
use atat::atat_derive::AtatEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Functionality {
    Minimum = 0,
    Full = 1,
    /// Disable both transmit and receive RF circuits
    DisableRF = 4,
}
