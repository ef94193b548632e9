use core::convert::Infallible;
use embassy_time::Duration;
use embedded_hal::digital::{ErrorType, OutputPin, PinState};

use crate::module_timing;

pub struct NoPin;

impl ErrorType for NoPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Inverts an output, for boards where `PWRKEY` is driven through a
/// transistor.
pub struct ReverseOutputPin<P: OutputPin<Error = Infallible>>(pub P);

impl<P: OutputPin<Error = Infallible>> ErrorType for ReverseOutputPin<P> {
    type Error = Infallible;
}

impl<P: OutputPin<Error = Infallible>> OutputPin for ReverseOutputPin<P> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set_high()
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set_low()
    }

    fn set_state(&mut self, state: PinState) -> Result<(), Self::Error> {
        match state {
            PinState::Low => self.0.set_state(PinState::High),
            PinState::High => self.0.set_state(PinState::Low),
        }
    }
}

pub trait CellularConfig<'a> {
    type PowerPin: OutputPin;

    const POWER_TOGGLE_TIME: Duration = module_timing::PWR_TOGGLE_TIME;
    const BOOT_WAIT: Duration = module_timing::BOOT_TIME;

    /// Number of `AT` checks, each followed by a power cycle on failure,
    /// before the module is given up on.
    const MAX_BOOT_ATTEMPTS: u8 = 3;
    const HTTP_INIT_ATTEMPTS: u8 = 3;

    const REGISTRATION_POLL_INTERVAL: Duration = module_timing::REGISTRATION_POLL_INTERVAL;
    const REGISTRATION_ATTEMPTS: u8 = 24;

    const HTTP_ACTION_TIMEOUT: Duration = module_timing::HTTP_ACTION_TIME;

    /// Treat a missing or non-200 `+HTTPACTION` result as a failed upload.
    /// When disabled the result is only logged.
    const VERIFY_HTTP_ACTION: bool = true;
    const READ_RESPONSE_BODY: bool = false;

    /// Anchor the [`crate::clock::NetworkClock`] to `+CCLK` on every upload
    const SYNC_CLOCK: bool = false;

    const APN: Apn<'a> = Apn::None;

    fn power_pin(&mut self) -> Option<&mut Self::PowerPin>;
}

#[derive(Debug, Clone, Default)]
pub enum Apn<'a> {
    #[default]
    None,
    Given {
        name: &'a str,
    },
}
