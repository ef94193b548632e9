//! Argument and parameter types used by Security Commands

/// `<code>` of `+CPIN:`, as text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinStatusCode {
    Ready,
    SimPin,
    SimPuk,
    PhSimPin,
    PhSimPuk,
    SimPin2,
    SimPuk2,
}
