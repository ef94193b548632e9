//! Scripted stand-ins for the serial port and the power pin.

use core::convert::Infallible;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::String;
use std::sync::Once;
use std::vec::Vec;

use embassy_time::{Duration, Instant, Timer};
use env_logger::Env;

use crate::asynch::resources::AtResources;
use crate::asynch::uploader::Uploader;
use crate::asynch::Modem;
use crate::config::{Apn, CellularConfig};
use crate::error::Error;
use crate::payload::UploadPayload;

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
            .is_test(true)
            .try_init();
    });
}

const DEFAULT_REPLY: &str = "\r\nOK\r\n";

/// Piece of a scripted reply
#[derive(Clone)]
enum Chunk {
    Bytes(Vec<u8>),
    /// Nothing arrives for this long
    Pause(Duration),
    /// A started pause, so that a dropped read does not restart it
    Until(Instant),
}

type Reply = Vec<Chunk>;

struct Rule {
    pattern: String,
    prefix: bool,
    /// The last reply is repeated once the others are used up
    replies: VecDeque<Reply>,
}

impl Rule {
    fn matches(&self, line: &str) -> bool {
        if self.prefix {
            line.starts_with(&self.pattern)
        } else {
            line == self.pattern
        }
    }

    fn next_reply(&mut self) -> Reply {
        if self.replies.len() > 1 {
            self.replies.pop_front().unwrap_or_default()
        } else {
            self.replies.front().cloned().unwrap_or_default()
        }
    }
}

#[derive(Default)]
struct Inner {
    rules: Vec<Rule>,
    written: Vec<String>,
    line: Vec<u8>,
    rx: VecDeque<Chunk>,
}

impl Inner {
    fn commit_line(&mut self) {
        if self.line.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.line).into_owned();
        self.line.clear();

        let reply = match self.rules.iter_mut().find(|r| r.matches(&line)) {
            Some(rule) => rule.next_reply(),
            None => vec![Chunk::Bytes(DEFAULT_REPLY.into())],
        };
        self.rx.extend(reply);
        self.written.push(line);
    }

    /// Copy out what is due now, or tell when to look again.
    fn take(&mut self, buf: &mut [u8]) -> Result<usize, Instant> {
        loop {
            match self.rx.front_mut() {
                None => return Err(Instant::now() + Duration::from_millis(1)),
                Some(Chunk::Bytes(bytes)) => {
                    let n = buf.len().min(bytes.len());
                    buf[..n].copy_from_slice(&bytes[..n]);
                    bytes.drain(..n);
                    if bytes.is_empty() {
                        self.rx.pop_front();
                    }
                    if n > 0 {
                        return Ok(n);
                    }
                }
                Some(Chunk::Pause(gap)) => {
                    let until = Instant::now() + *gap;
                    if let Some(front) = self.rx.front_mut() {
                        *front = Chunk::Until(until);
                    }
                }
                Some(Chunk::Until(at)) => {
                    if *at > Instant::now() {
                        return Err(*at);
                    }
                    self.rx.pop_front();
                }
            }
        }
    }
}

/// A module that answers every line written to it.
///
/// A line ends at `\r`, `\n` or Ctrl-Z. Lines without a rule are answered
/// with `OK`. Replies can be delivered in pieces with gaps in between. Reads
/// pend while nothing is due. Clones share the same state.
#[derive(Clone, Default)]
pub struct MockSerial {
    inner: Rc<RefCell<Inner>>,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `reply` for lines equal to `line`.
    pub fn reply(&self, line: &str, reply: &str) {
        self.add_rule(line, false, vec![Chunk::Bytes(reply.into())]);
    }

    /// Queue a reply that need not be UTF-8.
    pub fn reply_bytes(&self, line: &str, reply: &[u8]) {
        self.add_rule(line, false, vec![Chunk::Bytes(reply.into())]);
    }

    /// Queue a reply arriving as `parts`, `gap` apart.
    pub fn reply_split(&self, line: &str, parts: &[&str], gap: Duration) {
        let mut reply = Vec::new();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                reply.push(Chunk::Pause(gap));
            }
            reply.push(Chunk::Bytes(part.as_bytes().into()));
        }
        self.add_rule(line, false, reply);
    }

    /// Queue `reply` for lines starting with `prefix`.
    pub fn reply_prefix(&self, prefix: &str, reply: &str) {
        self.add_rule(prefix, true, vec![Chunk::Bytes(reply.into())]);
    }

    fn add_rule(&self, pattern: &str, prefix: bool, reply: Reply) {
        let mut inner = self.inner.borrow_mut();
        match inner
            .rules
            .iter_mut()
            .find(|r| r.prefix == prefix && r.pattern == pattern)
        {
            Some(rule) => rule.replies.push_back(reply),
            None => inner.rules.push(Rule {
                pattern: pattern.into(),
                prefix,
                replies: VecDeque::from([reply]),
            }),
        }
    }

    /// Unsolicited bytes, as if they arrived before the next command.
    pub fn push_rx(&self, bytes: &[u8]) {
        self.inner
            .borrow_mut()
            .rx
            .push_back(Chunk::Bytes(bytes.into()));
    }

    pub fn written(&self) -> Vec<String> {
        self.inner.borrow().written.clone()
    }

    pub fn count(&self, line: &str) -> usize {
        self.inner
            .borrow()
            .written
            .iter()
            .filter(|l| *l == line)
            .count()
    }
}

impl embedded_io_async::ErrorType for MockSerial {
    type Error = Infallible;
}

impl embedded_io_async::Read for MockSerial {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        loop {
            let due = self.inner.borrow_mut().take(buf);
            match due {
                Ok(n) => return Ok(n),
                Err(at) => Timer::at(at).await,
            }
        }
    }
}

impl embedded_io_async::Write for MockSerial {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        let mut inner = self.inner.borrow_mut();
        for &byte in buf {
            match byte {
                b'\r' | b'\n' | 0x1A => inner.commit_line(),
                b => inner.line.push(b),
            }
        }
        Ok(buf.len())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A [`Modem`] reading from and writing to `serial`.
pub fn modem<'a, C: CellularConfig<'a>>(
    serial: &MockSerial,
    resources: &'a mut AtResources,
    config: C,
) -> Modem<'a, MockSerial, MockSerial, C> {
    Modem::new(serial.clone(), serial.clone(), resources, config)
}

/// Records every level it is driven to.
#[derive(Clone, Default)]
pub struct MockPin {
    levels: Rc<RefCell<Vec<bool>>>,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn levels(&self) -> Vec<bool> {
        self.levels.borrow().clone()
    }

    /// Completed low-then-high pulses
    pub fn toggles(&self) -> usize {
        self.levels
            .borrow()
            .windows(2)
            .filter(|w| !w[0] && w[1])
            .count()
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(true);
        Ok(())
    }
}

/// Default behaviour with millisecond timings
pub struct TestConfig {
    pin: MockPin,
}

impl TestConfig {
    pub fn new(pin: MockPin) -> Self {
        Self { pin }
    }
}

impl<'a> CellularConfig<'a> for TestConfig {
    type PowerPin = MockPin;

    const POWER_TOGGLE_TIME: Duration = Duration::from_millis(1);
    const BOOT_WAIT: Duration = Duration::from_millis(1);
    const REGISTRATION_POLL_INTERVAL: Duration = Duration::from_millis(1);
    const REGISTRATION_ATTEMPTS: u8 = 3;
    const HTTP_ACTION_TIMEOUT: Duration = Duration::from_millis(200);

    fn power_pin(&mut self) -> Option<&mut Self::PowerPin> {
        Some(&mut self.pin)
    }
}

pub struct ApnConfig {
    pin: MockPin,
}

impl ApnConfig {
    pub fn new(pin: MockPin) -> Self {
        Self { pin }
    }
}

impl<'a> CellularConfig<'a> for ApnConfig {
    type PowerPin = MockPin;

    const POWER_TOGGLE_TIME: Duration = Duration::from_millis(1);
    const BOOT_WAIT: Duration = Duration::from_millis(1);
    const REGISTRATION_POLL_INTERVAL: Duration = Duration::from_millis(1);
    const REGISTRATION_ATTEMPTS: u8 = 3;
    const HTTP_ACTION_TIMEOUT: Duration = Duration::from_millis(200);
    const APN: Apn<'a> = Apn::Given { name: "internet" };

    fn power_pin(&mut self) -> Option<&mut Self::PowerPin> {
        Some(&mut self.pin)
    }
}

pub struct LenientConfig {
    pin: MockPin,
}

impl LenientConfig {
    pub fn new(pin: MockPin) -> Self {
        Self { pin }
    }
}

impl<'a> CellularConfig<'a> for LenientConfig {
    type PowerPin = MockPin;

    const POWER_TOGGLE_TIME: Duration = Duration::from_millis(1);
    const BOOT_WAIT: Duration = Duration::from_millis(1);
    const REGISTRATION_POLL_INTERVAL: Duration = Duration::from_millis(1);
    const REGISTRATION_ATTEMPTS: u8 = 3;
    const HTTP_ACTION_TIMEOUT: Duration = Duration::from_millis(200);
    const VERIFY_HTTP_ACTION: bool = false;
    const READ_RESPONSE_BODY: bool = true;

    fn power_pin(&mut self) -> Option<&mut Self::PowerPin> {
        Some(&mut self.pin)
    }
}

pub struct SyncingConfig {
    pin: MockPin,
}

impl SyncingConfig {
    pub fn new(pin: MockPin) -> Self {
        Self { pin }
    }
}

impl<'a> CellularConfig<'a> for SyncingConfig {
    type PowerPin = MockPin;

    const POWER_TOGGLE_TIME: Duration = Duration::from_millis(1);
    const BOOT_WAIT: Duration = Duration::from_millis(1);
    const REGISTRATION_POLL_INTERVAL: Duration = Duration::from_millis(1);
    const REGISTRATION_ATTEMPTS: u8 = 3;
    const HTTP_ACTION_TIMEOUT: Duration = Duration::from_millis(200);
    const SYNC_CLOCK: bool = true;

    fn power_pin(&mut self) -> Option<&mut Self::PowerPin> {
        Some(&mut self.pin)
    }
}

/// Keeps every payload it is given, failing on the `fail_on`th (1-based).
#[derive(Default)]
pub struct RecordingUploader {
    pub attempts: Vec<UploadPayload>,
    fail_on: Option<usize>,
}

impl RecordingUploader {
    pub fn failing_on(attempt: usize) -> Self {
        Self {
            attempts: Vec::new(),
            fail_on: Some(attempt),
        }
    }
}

impl Uploader for RecordingUploader {
    async fn upload(&mut self, payload: &UploadPayload) -> Result<(), Error> {
        self.attempts.push(payload.clone());
        if self.fail_on == Some(self.attempts.len()) {
            Err(Error::HttpInit)
        } else {
            Ok(())
        }
    }
}
