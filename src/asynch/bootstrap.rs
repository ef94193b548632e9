use embassy_time::Timer;
use embedded_io_async::{Read, Write};

use super::state::PowerState;
use super::Modem;
use crate::command::AT;
use crate::config::CellularConfig;
use crate::error::Error;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootState {
    Off,
    Booting,
    Checking,
    Ready,
    Failed,
}

/// Switches the module on and waits until it answers `AT`.
///
/// Every unanswered check is followed by another power pulse and boot wait.
/// After `MAX_BOOT_ATTEMPTS` checks the module is given up on, and nothing
/// else is sent to it.
pub struct ModemBootstrap<'m, 'a, R, W: Write, C> {
    modem: &'m mut Modem<'a, R, W, C>,
    state: BootState,
    checks: u8,
}

impl<'m, 'a, R, W, C> ModemBootstrap<'m, 'a, R, W, C>
where
    R: Read,
    W: Write,
    C: CellularConfig<'a>,
{
    pub(crate) fn new(modem: &'m mut Modem<'a, R, W, C>) -> Self {
        Self {
            modem,
            state: BootState::Off,
            checks: 0,
        }
    }

    pub fn state(&self) -> BootState {
        self.state
    }

    /// Number of `AT` checks sent so far
    pub fn checks(&self) -> u8 {
        self.checks
    }

    pub async fn run(&mut self) -> Result<(), Error> {
        if C::MAX_BOOT_ATTEMPTS == 0 {
            error!("No boot attempts allowed, not powering the module");
            self.state = BootState::Failed;
            return Err(Error::BootFailed);
        }

        self.boot().await?;

        loop {
            self.state = BootState::Checking;
            self.checks += 1;

            if self.check_alive().await? {
                info!("Module answered after {} check(s)", self.checks);
                self.state = BootState::Ready;
                self.modem.session.set_power(PowerState::On);
                return Ok(());
            }

            warn!(
                "Module not answering ({}/{}), power cycling",
                self.checks,
                C::MAX_BOOT_ATTEMPTS
            );
            self.boot().await?;

            if self.checks >= C::MAX_BOOT_ATTEMPTS {
                error!("Module failed to start after {} checks", self.checks);
                self.state = BootState::Failed;
                return Err(Error::BootFailed);
            }
        }
    }

    async fn boot(&mut self) -> Result<(), Error> {
        self.state = BootState::Booting;
        self.modem.pwr().toggle().await?;
        Timer::after(C::BOOT_WAIT).await;
        Ok(())
    }

    /// `Ok(false)` for any reply but `OK`, and for no reply at all.
    async fn check_alive(&mut self) -> Result<bool, Error> {
        match self.modem.at.send(&AT).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_transport() => Err(e),
            Err(e) => {
                debug!("AT not answered: {:?}", e);
                Ok(false)
            }
        }
    }
}
