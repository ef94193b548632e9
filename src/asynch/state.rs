/// Whether the module is believed to be switched on. `PWRKEY` is a toggle,
/// so this is tracked rather than read back.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    Off,
    On,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistrationState {
    Unknown,
    Registered,
    NotRegistered,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BearerState {
    Inactive,
    Active,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HttpState {
    Uninitialized,
    Initialized,
    SessionOpen,
    Terminated,
}

/// What is known about the module between two commands.
///
/// Everything but the power state is forgotten when the module is switched
/// off.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModemSession {
    power: PowerState,
    registration: RegistrationState,
    bearer: BearerState,
    http: HttpState,
}

impl Default for ModemSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ModemSession {
    pub const fn new() -> Self {
        Self {
            power: PowerState::Off,
            registration: RegistrationState::Unknown,
            bearer: BearerState::Inactive,
            http: HttpState::Uninitialized,
        }
    }

    pub fn power(&self) -> PowerState {
        self.power
    }

    pub fn registration(&self) -> RegistrationState {
        self.registration
    }

    pub fn bearer(&self) -> BearerState {
        self.bearer
    }

    pub fn http(&self) -> HttpState {
        self.http
    }

    pub(crate) fn toggle_power(&mut self) {
        let next = match self.power {
            PowerState::Off => PowerState::On,
            PowerState::On => PowerState::Off,
        };
        self.set_power(next);
    }

    pub(crate) fn set_power(&mut self, power: PowerState) {
        self.power = power;
        if power == PowerState::Off {
            self.registration = RegistrationState::Unknown;
            self.bearer = BearerState::Inactive;
            self.http = HttpState::Uninitialized;
        }
    }

    pub(crate) fn set_registration(&mut self, registration: RegistrationState) {
        if self.registration != registration {
            info!("Registration changed to {:?}", registration);
        }
        self.registration = registration;
    }

    pub(crate) fn set_bearer(&mut self, bearer: BearerState) {
        self.bearer = bearer;
    }

    pub(crate) fn set_http(&mut self, http: HttpState) {
        self.http = http;
    }

    /// An HTTP service was initialised and not terminated since.
    pub fn http_open(&self) -> bool {
        matches!(self.http, HttpState::Initialized | HttpState::SessionOpen)
    }
}
