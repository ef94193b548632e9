use embedded_io_async::{Read, Write};

use super::Modem;
use crate::clock::NetworkClock;
use crate::command::sms::responses::MessageReference;
use crate::config::CellularConfig;
use crate::error::Error;
use crate::payload::UploadPayload;

/// Delivers one report to the remote endpoint.
///
/// Implemented by [`CellularUploader`]. Any other transport, e.g. a
/// WiFi HTTP client on the host, can be plugged into the
/// [`super::runner::Runner`] the same way.
#[allow(async_fn_in_trait)]
pub trait Uploader {
    async fn upload(&mut self, payload: &UploadPayload) -> Result<(), Error>;
}

/// Uploads through the HTTP client of a SIM800.
///
/// The module is only powered while a report is on its way: every upload
/// boots it, attaches, sends one GET and switches it off again.
pub struct CellularUploader<'a, R, W: Write, C> {
    modem: Modem<'a, R, W, C>,
    endpoint: &'a str,
    clock: Option<&'a NetworkClock>,
}

impl<'a, R, W, C> CellularUploader<'a, R, W, C>
where
    R: Read,
    W: Write,
    C: CellularConfig<'a>,
{
    pub fn new(modem: Modem<'a, R, W, C>, endpoint: &'a str) -> Self {
        Self {
            modem,
            endpoint,
            clock: None,
        }
    }

    /// Clock to anchor to the network time when `SYNC_CLOCK` is set.
    pub fn with_clock(mut self, clock: &'a NetworkClock) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn modem(&mut self) -> &mut Modem<'a, R, W, C> {
        &mut self.modem
    }

    pub fn release(self) -> Modem<'a, R, W, C> {
        self.modem
    }

    /// Boot, check registration once, read the network time into `clock`,
    /// power down.
    pub async fn sync_time(&mut self, clock: &NetworkClock) -> Result<(), Error> {
        self.modem.bootstrap().run().await?;
        let result = self.sync_if_registered(clock).await;
        self.teardown(result).await
    }

    /// Boot, wait for registration, send, power down.
    pub async fn send_sms(&mut self, number: &str, text: &str) -> Result<MessageReference, Error> {
        self.modem.bootstrap().run().await?;
        let result = self.registered_sms(number, text).await;
        self.teardown(result).await
    }

    async fn sync_if_registered(&mut self, clock: &NetworkClock) -> Result<(), Error> {
        let mut network = self.modem.network();
        if !network.registration().await?.is_registered() {
            warn!("Not registered, network time unavailable");
            return Err(Error::NotRegistered);
        }
        network.sync_clock(clock).await?;
        Ok(())
    }

    async fn registered_sms(&mut self, number: &str, text: &str) -> Result<MessageReference, Error> {
        self.modem.network().wait_for_registration().await?;
        self.modem.sms().send(number, text).await
    }

    async fn deliver(&mut self, url: &str) -> Result<(), Error> {
        if C::SYNC_CLOCK {
            if let Some(clock) = self.clock {
                if let Err(e) = self.modem.network().sync_clock(clock).await {
                    warn!("Clock sync failed: {:?}", e);
                }
            }
        }

        self.modem.network().attach().await?;
        self.modem.http().get(url).await?;
        Ok(())
    }

    /// Switch the module off again after a successful boot, keeping the
    /// first error.
    async fn teardown<T>(&mut self, result: Result<T, Error>) -> Result<T, Error> {
        let down = self.modem.toggle_power().await;
        if let Err(e) = &down {
            error!("Power down failed: {:?}", e);
        }
        let value = result?;
        down.map(|_| value)
    }
}

impl<'a, R, W, C> Uploader for CellularUploader<'a, R, W, C>
where
    R: Read,
    W: Write,
    C: CellularConfig<'a>,
{
    async fn upload(&mut self, payload: &UploadPayload) -> Result<(), Error> {
        let url = payload.url(self.endpoint)?;
        info!(
            "Uploading {} for {} {}",
            payload.value,
            payload.date.as_str(),
            payload.time.as_str()
        );

        self.modem.bootstrap().run().await?;
        let result = self.deliver(&url).await;
        self.teardown(result).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asynch::resources::AtResources;
    use crate::asynch::state::PowerState;
    use crate::test_helpers::{init_logger, modem, MockPin, MockSerial, SyncingConfig, TestConfig};
    use embassy_futures::block_on;

    const ENDPOINT: &str = "https://example.com/exec";

    fn payload() -> UploadPayload {
        UploadPayload::new("10/10/2024", "09:17", 306).unwrap()
    }

    #[test]
    fn upload_runs_the_whole_session() {
        init_logger();
        let serial = MockSerial::new();
        serial.reply("AT+HTTPACTION=0", "\r\nOK\r\n\r\n+HTTPACTION: 0,200,2\r\n");
        let pin = MockPin::new();
        let mut resources = AtResources::new();
        let modem = modem(&serial, &mut resources, TestConfig::new(pin.clone()));
        let mut uploader = CellularUploader::new(modem, ENDPOINT);

        block_on(uploader.upload(&payload())).unwrap();

        assert_eq!(
            serial.written(),
            [
                "AT",
                "AT+SAPBR=3,1,\"CONTYPE\",\"GPRS\"",
                "AT+SAPBR=1,1",
                "AT+HTTPTERM",
                "AT+HTTPINIT",
                "AT+HTTPPARA=\"CID\",1",
                "AT+HTTPSSL=1",
                "AT+HTTPPARA=\"URL\",\"https://example.com/exec?date=10/10/2024&time=09:17&value=306\"",
                "AT+HTTPACTION=0",
                "AT+HTTPTERM",
            ]
        );
        // Power on, then off again
        assert_eq!(pin.toggles(), 2);
        assert_eq!(uploader.modem().session().power(), PowerState::Off);
    }

    #[test]
    fn boot_failure_sends_nothing_else() {
        let serial = MockSerial::new();
        serial.reply("AT", "\r\nERROR\r\n");
        let pin = MockPin::new();
        let mut resources = AtResources::new();
        let modem = modem(&serial, &mut resources, TestConfig::new(pin.clone()));
        let mut uploader = CellularUploader::new(modem, ENDPOINT);

        assert_eq!(block_on(uploader.upload(&payload())), Err(Error::BootFailed));
        assert_eq!(serial.written(), ["AT", "AT", "AT"]);
    }

    #[test]
    fn failed_request_still_powers_down() {
        let serial = MockSerial::new();
        serial.reply("AT+HTTPINIT", "\r\nERROR\r\n");
        let pin = MockPin::new();
        let mut resources = AtResources::new();
        let modem = modem(&serial, &mut resources, TestConfig::new(pin.clone()));
        let mut uploader = CellularUploader::new(modem, ENDPOINT);

        assert_eq!(block_on(uploader.upload(&payload())), Err(Error::HttpInit));
        assert_eq!(pin.toggles(), 2);
        assert_eq!(uploader.modem().session().power(), PowerState::Off);
    }

    #[test]
    fn upload_syncs_clock_when_configured() {
        let serial = MockSerial::new();
        serial.reply("AT+CCLK?", "\r\n+CCLK: \"24/10/10,09:17:03+08\"\r\n\r\nOK\r\n");
        serial.reply("AT+HTTPACTION=0", "\r\nOK\r\n\r\n+HTTPACTION: 0,200,2\r\n");
        let clock = NetworkClock::new();
        let mut resources = AtResources::new();
        let modem = modem(&serial, &mut resources, SyncingConfig::new(MockPin::new()));
        let mut uploader = CellularUploader::new(modem, ENDPOINT).with_clock(&clock);

        block_on(uploader.upload(&payload())).unwrap();
        assert!(clock.is_synced());
        assert_eq!(serial.written()[1], "AT+CCLK?");
    }

    #[test]
    fn sync_time_needs_registration() {
        let serial = MockSerial::new();
        serial.reply("AT+CREG?", "\r\n+CREG: 0,3\r\n\r\nOK\r\n");
        let pin = MockPin::new();
        let mut resources = AtResources::new();
        let modem = modem(&serial, &mut resources, TestConfig::new(pin.clone()));
        let mut uploader = CellularUploader::new(modem, ENDPOINT);
        let clock = NetworkClock::new();

        assert_eq!(block_on(uploader.sync_time(&clock)), Err(Error::NotRegistered));
        assert!(!clock.is_synced());
        assert_eq!(serial.count("AT+CCLK?"), 0);
        assert_eq!(pin.toggles(), 2);
    }

    #[test]
    fn sync_time_sets_clock() {
        let serial = MockSerial::new();
        serial.reply("AT+CREG?", "\r\n+CREG: 0,1\r\n\r\nOK\r\n");
        serial.reply("AT+CCLK?", "\r\n+CCLK: \"24/10/10,09:17:03+08\"\r\n\r\nOK\r\n");
        let mut resources = AtResources::new();
        let modem = modem(&serial, &mut resources, TestConfig::new(MockPin::new()));
        let mut uploader = CellularUploader::new(modem, ENDPOINT);
        let clock = NetworkClock::new();

        block_on(uploader.sync_time(&clock)).unwrap();
        assert!(clock.is_synced());
    }

    #[test]
    fn send_sms_after_registration() {
        let serial = MockSerial::new();
        serial.reply("AT+CREG?", "\r\n+CREG: 0,1\r\n\r\nOK\r\n");
        serial.reply("AT+CMGS=\"+4915112345678\"", "\r\n> ");
        serial.reply("boot ok", "\r\n+CMGS: 9\r\n\r\nOK\r\n");
        let mut resources = AtResources::new();
        let modem = modem(&serial, &mut resources, TestConfig::new(MockPin::new()));
        let mut uploader = CellularUploader::new(modem, ENDPOINT);

        let reference = block_on(uploader.send_sms("+4915112345678", "boot ok")).unwrap();
        assert_eq!(reference.mr, 9);
        assert_eq!(uploader.modem().session().power(), PowerState::Off);
    }
}
