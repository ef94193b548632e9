pub mod at;
pub mod bootstrap;
pub mod channel;
pub mod http;
pub mod network;
mod pwr;
pub mod resources;
pub mod runner;
pub mod scheduler;
pub mod sms;
pub mod state;
pub mod uploader;

use embassy_time::Duration;
use embedded_io_async::{Read, Write};

use crate::clock::WallClock;
use crate::config::CellularConfig;
use at::AtDriver;
use bootstrap::ModemBootstrap;
use http::HttpSession;
use network::NetworkAttachment;
use pwr::PwrCtrl;
use resources::{AtResources, Resources};
use runner::Runner;
use scheduler::ReportingScheduler;
use sms::SmsSender;
use state::ModemSession;
use uploader::Uploader;

/// A SIM800 module on a serial port.
///
/// Owns the transport, the configuration (and with it the power pin) and the
/// tracked session state. All traffic to the module goes through `&mut`
/// access to this object.
pub struct Modem<'a, R, W: Write, C> {
    at: AtDriver<'a, R, W>,
    config: C,
    session: ModemSession,
}

impl<'a, R, W, C> Modem<'a, R, W, C>
where
    R: Read,
    W: Write,
    C: CellularConfig<'a>,
{
    pub fn new(reader: R, writer: W, resources: &'a mut AtResources, config: C) -> Self {
        Self {
            at: AtDriver::new(reader, writer, resources),
            config,
            session: ModemSession::new(),
        }
    }

    pub fn session(&self) -> &ModemSession {
        &self.session
    }

    pub fn at(&mut self) -> &mut AtDriver<'a, R, W> {
        &mut self.at
    }

    pub fn bootstrap(&mut self) -> ModemBootstrap<'_, 'a, R, W, C> {
        ModemBootstrap::new(self)
    }

    pub fn network(&mut self) -> NetworkAttachment<'_, 'a, R, W, C> {
        NetworkAttachment::new(self)
    }

    pub fn http(&mut self) -> HttpSession<'_, 'a, R, W, C> {
        HttpSession::new(self)
    }

    pub fn sms(&mut self) -> SmsSender<'_, 'a, R, W> {
        SmsSender::new(&mut self.at)
    }

    /// Pulse `PWRKEY` once.
    pub async fn toggle_power(&mut self) -> Result<(), crate::error::Error> {
        self.pwr().toggle().await
    }

    /// Hand back the reader and the configuration. The writer stays with the
    /// AT client and is dropped.
    pub fn release(self) -> (R, C) {
        (self.at.release(), self.config)
    }

    pub(crate) fn pwr(&mut self) -> PwrCtrl<'_, C> {
        PwrCtrl::new(&mut self.config, &mut self.session)
    }
}

/// Wire the reporting side to a background upload worker.
///
/// The returned [`Runner`] must be driven with `.run()` in a background
/// task. The [`ReportingScheduler`] stays with the producer.
pub fn new<'d, U, W, const N: usize>(
    resources: &'d Resources<N>,
    uploader: U,
    clock: &'d W,
    window: Duration,
) -> (ReportingScheduler<'d, W, N>, Runner<'d, U, N>)
where
    U: Uploader,
    W: WallClock,
{
    let scheduler = ReportingScheduler::new(resources.payloads.sender(), clock, window);
    let runner = Runner::new(resources.payloads.receiver(), uploader);
    (scheduler, runner)
}
