use embassy_time::Timer;
use embedded_hal::digital::OutputPin as _;

use super::state::ModemSession;
use crate::{config::CellularConfig, error::Error};

/// Drives `PWRKEY`.
///
/// The same pulse switches the module on when it is off and off when it is
/// on.
pub(crate) struct PwrCtrl<'b, C> {
    config: &'b mut C,
    session: &'b mut ModemSession,
}

impl<'a, 'b, C> PwrCtrl<'b, C>
where
    C: CellularConfig<'a>,
{
    pub(crate) fn new(config: &'b mut C, session: &'b mut ModemSession) -> Self {
        Self { config, session }
    }

    /// Pull `PWRKEY` low for `POWER_TOGGLE_TIME`, then release it.
    pub(crate) async fn toggle(&mut self) -> Result<(), Error> {
        if let Some(pin) = self.config.power_pin() {
            pin.set_low().map_err(|_| Error::IoPin)?;
            Timer::after(C::POWER_TOGGLE_TIME).await;
            pin.set_high().map_err(|_| Error::IoPin)?;
        } else {
            warn!("No power pin configured");
        }
        self.session.toggle_power();
        debug!("Power toggled, module now {:?}", self.session.power());
        Ok(())
    }
}
