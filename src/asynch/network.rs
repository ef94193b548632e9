use embassy_time::Timer;
use embedded_io_async::{Read, Write};

use super::state::{BearerState, RegistrationState};
use super::Modem;
use crate::clock::NetworkClock;
use crate::command::device_lock::responses::PinStatus;
use crate::command::device_lock::GetPinStatus;
use crate::command::mobile_control::responses::Clock;
use crate::command::mobile_control::types::Functionality;
use crate::command::mobile_control::{GetClock, SetModuleFunctionality};
use crate::command::network_service::responses::{NetworkRegistrationStatus, SignalQuality};
use crate::command::network_service::{GetNetworkRegistrationStatus, GetSignalQuality};
use crate::command::psn::responses::{BearerStatus, GPRSAttached};
use crate::command::psn::types::{BearerCommand, ProfileId};
use crate::command::psn::{BearerAction, GetBearerStatus, GetGPRSAttached, SetBearerParameter};
use crate::config::{Apn, CellularConfig};
use crate::error::Error;

/// Bearer profile used for the HTTP client
pub const BEARER_PROFILE: ProfileId = ProfileId(1);

/// Network side of a session: registration, the GPRS bearer and the
/// status queries around it.
pub struct NetworkAttachment<'m, 'a, R, W: Write, C> {
    modem: &'m mut Modem<'a, R, W, C>,
}

impl<'m, 'a, R, W, C> NetworkAttachment<'m, 'a, R, W, C>
where
    R: Read,
    W: Write,
    C: CellularConfig<'a>,
{
    pub(crate) fn new(modem: &'m mut Modem<'a, R, W, C>) -> Self {
        Self { modem }
    }

    /// Configure and open the GPRS bearer.
    ///
    /// Best effort. A rejected step is logged and the remaining steps are
    /// still sent; only transport errors are returned.
    pub async fn attach(&mut self) -> Result<BearerState, Error> {
        self.set_bearer_parameter("CONTYPE", "GPRS").await?;
        if let Apn::Given { name } = C::APN {
            self.set_bearer_parameter("APN", name).await?;
        }

        let opened = self
            .modem
            .at
            .send(&BearerAction {
                cmd_type: BearerCommand::Open,
                cid: BEARER_PROFILE,
            })
            .await;

        let state = match opened {
            Ok(_) => {
                info!("Bearer opened");
                BearerState::Active
            }
            Err(e) if e.is_transport() => return Err(e),
            Err(e) => {
                warn!("Opening the bearer failed: {:?}", e);
                BearerState::Inactive
            }
        };
        self.modem.session.set_bearer(state);
        Ok(state)
    }

    async fn set_bearer_parameter(&mut self, tag: &str, value: &str) -> Result<(), Error> {
        match self
            .modem
            .at
            .send(&SetBearerParameter::new(BEARER_PROFILE, tag, value))
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if e.is_transport() => Err(e),
            Err(e) => {
                warn!("Bearer parameter {} not accepted: {:?}", tag, e);
                Ok(())
            }
        }
    }

    pub async fn bearer_status(&mut self) -> Result<BearerStatus, Error> {
        let status = self
            .modem
            .at
            .send(&GetBearerStatus::new(BEARER_PROFILE))
            .await?;
        self.modem.session.set_bearer(if status.is_connected() {
            BearerState::Active
        } else {
            BearerState::Inactive
        });
        Ok(status)
    }

    pub async fn registration(&mut self) -> Result<NetworkRegistrationStatus, Error> {
        let status = self.modem.at.send(&GetNetworkRegistrationStatus).await?;
        self.modem.session.set_registration(if status.is_registered() {
            RegistrationState::Registered
        } else {
            RegistrationState::NotRegistered
        });
        Ok(status)
    }

    /// Poll `+CREG?` every `REGISTRATION_POLL_INTERVAL`, at most
    /// `REGISTRATION_ATTEMPTS` times.
    ///
    /// A poll the module answers with an error or not at all counts as not
    /// registered.
    pub async fn wait_for_registration(&mut self) -> Result<NetworkRegistrationStatus, Error> {
        for attempt in 1..=C::REGISTRATION_ATTEMPTS {
            match self.registration().await {
                Ok(status) if status.is_registered() => return Ok(status),
                Ok(status) => debug!("Not registered yet: {:?}", status.stat),
                Err(e) if e.is_transport() => return Err(e),
                Err(e) => debug!("No registration status: {:?}", e),
            }
            if attempt < C::REGISTRATION_ATTEMPTS {
                Timer::after(C::REGISTRATION_POLL_INTERVAL).await;
            }
        }
        warn!(
            "Not registered after {} polls",
            C::REGISTRATION_ATTEMPTS
        );
        self.modem
            .session
            .set_registration(RegistrationState::NotRegistered);
        Err(Error::NotRegistered)
    }

    pub async fn set_full_functionality(&mut self) -> Result<(), Error> {
        self.modem
            .at
            .send(&SetModuleFunctionality {
                fun: Functionality::Full,
            })
            .await?;
        Ok(())
    }

    pub async fn sim_status(&mut self) -> Result<PinStatus, Error> {
        self.modem.at.send(&GetPinStatus).await
    }

    pub async fn signal_quality(&mut self) -> Result<SignalQuality, Error> {
        self.modem.at.send(&GetSignalQuality).await
    }

    pub async fn gprs_attached(&mut self) -> Result<GPRSAttached, Error> {
        self.modem.at.send(&GetGPRSAttached).await
    }

    pub async fn network_time(&mut self) -> Result<Clock, Error> {
        self.modem.at.send(&GetClock).await
    }

    /// Anchor `clock` to the module's network time.
    pub async fn sync_clock(&mut self, clock: &NetworkClock) -> Result<Clock, Error> {
        let time = self.network_time().await?;
        clock.set(time.local);
        info!("Clock synced to network time");
        Ok(time)
    }
}
