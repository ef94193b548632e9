use embedded_io_async::{Read, Write};

use super::state::HttpState;
use super::Modem;
use crate::command::http::responses::HttpReadResponse;
use crate::command::http::types::{HttpMethod, SslMode};
use crate::command::http::urc::HttpActionResult;
use crate::command::http::{
    HttpAction, HttpInit, HttpRead, HttpTerm, SetHttpCid, SetHttpParameter, SetHttpSsl,
};
use crate::command::Urc;
use crate::config::CellularConfig;
use crate::error::Error;

use super::network::BEARER_PROFILE;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HttpSessionState {
    Idle,
    TerminatingPrior,
    Initializing,
    TlsEnabled,
    UrlSet,
    Requesting,
    Reading,
    Terminated,
}

/// Outcome of a GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// `None` when `+HTTPACTION` never arrived
    pub action: Option<HttpActionResult>,
    pub body: Option<HttpReadResponse>,
}

/// One GET through the HTTP client of the module.
///
/// A session left open by an earlier run makes `+HTTPINIT` fail, so every
/// request starts with `+HTTPTERM`. The service is terminated again when the
/// request ends, whatever the outcome.
pub struct HttpSession<'m, 'a, R, W: Write, C> {
    modem: &'m mut Modem<'a, R, W, C>,
    state: HttpSessionState,
}

impl<'m, 'a, R, W, C> HttpSession<'m, 'a, R, W, C>
where
    R: Read,
    W: Write,
    C: CellularConfig<'a>,
{
    pub(crate) fn new(modem: &'m mut Modem<'a, R, W, C>) -> Self {
        Self {
            modem,
            state: HttpSessionState::Idle,
        }
    }

    pub fn state(&self) -> HttpSessionState {
        self.state
    }

    pub async fn get(&mut self, url: &str) -> Result<HttpResponse, Error> {
        let result = self.request(url).await;

        if self.modem.session.http_open() {
            if let Err(e) = self.terminate().await {
                warn!("Terminating HTTP service failed: {:?}", e);
            }
        }
        result
    }

    async fn request(&mut self, url: &str) -> Result<HttpResponse, Error> {
        self.state = HttpSessionState::TerminatingPrior;
        if let Err(e) = self.modem.at.send(&HttpTerm).await {
            if e.is_transport() {
                return Err(e);
            }
            debug!("No HTTP service to terminate: {:?}", e);
        }
        self.modem.session.set_http(HttpState::Terminated);

        self.state = HttpSessionState::Initializing;
        self.init().await?;

        self.step("Binding bearer profile", &SetHttpCid::new(BEARER_PROFILE.0))
            .await?;

        self.state = HttpSessionState::TlsEnabled;
        self.step(
            "Enabling TLS",
            &SetHttpSsl {
                mode: SslMode::Enabled,
            },
        )
        .await?;

        self.state = HttpSessionState::UrlSet;
        self.step("Setting URL", &SetHttpParameter::url(url)).await?;
        self.modem.session.set_http(HttpState::SessionOpen);

        self.state = HttpSessionState::Requesting;
        let action = self.action().await?;
        match action {
            Some(result) if result.is_success() => {
                info!("GET succeeded, {} bytes", result.length)
            }
            Some(result) => warn!("GET answered with status {}", result.status),
            None => warn!("No +HTTPACTION result within timeout"),
        }

        if C::VERIFY_HTTP_ACTION {
            match action {
                Some(result) if result.is_success() => {}
                other => return Err(Error::HttpRequest(other.map(|r| r.status))),
            }
        }

        let body = if C::READ_RESPONSE_BODY {
            self.state = HttpSessionState::Reading;
            self.read().await?
        } else {
            None
        };

        Ok(HttpResponse { action, body })
    }

    /// Send a setup command, logging a refusal.
    async fn step<Cmd: atat::AtatCmd>(&mut self, what: &str, cmd: &Cmd) -> Result<(), Error> {
        match self.modem.at.send(cmd).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_transport() => Err(e),
            Err(e) => {
                warn!("{} failed: {:?}", what, e);
                Ok(())
            }
        }
    }

    /// Request the GET and wait for its `+HTTPACTION` result.
    async fn action(&mut self) -> Result<Option<HttpActionResult>, Error> {
        let mut sub = self.modem.at.subscribe()?;

        let sent = self
            .modem
            .at
            .send(&HttpAction {
                method: HttpMethod::Get,
            })
            .await;
        match sent {
            Ok(_) => {}
            Err(e) if e.is_transport() => return Err(e),
            Err(e) => {
                warn!("+HTTPACTION not accepted: {:?}", e);
                return Ok(None);
            }
        }

        let result = self
            .modem
            .at
            .wait_urc(&mut sub, C::HTTP_ACTION_TIMEOUT, |urc| match urc {
                Urc::HttpAction(result) => Some(result),
            })
            .await;
        match result {
            Ok(result) => Ok(Some(result)),
            Err(e) if e.is_transport() => Err(e),
            Err(_) => Ok(None),
        }
    }

    async fn init(&mut self) -> Result<(), Error> {
        for attempt in 1..=C::HTTP_INIT_ATTEMPTS {
            match self.modem.at.send(&HttpInit).await {
                Ok(_) => {
                    self.modem.session.set_http(HttpState::Initialized);
                    return Ok(());
                }
                Err(e) if e.is_transport() => return Err(e),
                Err(e) => warn!(
                    "HTTP init failed ({}/{}): {:?}",
                    attempt,
                    C::HTTP_INIT_ATTEMPTS,
                    e
                ),
            }
        }
        error!("HTTP service could not be initialized");
        Err(Error::HttpInit)
    }

    async fn read(&mut self) -> Result<Option<HttpReadResponse>, Error> {
        match self.modem.at.send(&HttpRead).await {
            Ok(read) => {
                debug!("Response body: {}", read.body.as_str());
                Ok(Some(read))
            }
            Err(e) if e.is_transport() => Err(e),
            Err(e) => {
                warn!("No body in +HTTPREAD response: {:?}", e);
                Ok(None)
            }
        }
    }

    async fn terminate(&mut self) -> Result<(), Error> {
        if let Err(e) = self.modem.at.send(&HttpTerm).await {
            if e.is_transport() {
                return Err(e);
            }
            warn!("+HTTPTERM not accepted: {:?}", e);
        }
        self.modem.session.set_http(HttpState::Terminated);
        self.state = HttpSessionState::Terminated;
        Ok(())
    }
}
