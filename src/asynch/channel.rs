use embassy_time::{with_timeout, Duration};
use embedded_io_async::Read;

use crate::error::Error;

/// Time to wait for more bytes while discarding stale input
const DRAIN_WAIT: Duration = Duration::from_millis(5);
const DRAIN_LIMIT: usize = 4096;

/// Receive side of the transport to the module.
///
/// Opening and configuring the port (device, baud rate) is left to whoever
/// builds the reader.
///
/// Reads are abandoned at every deadline and once a reply is in, so `R::read`
/// must be cancel-safe: bytes already taken off the line must not be lost
/// when the read future is dropped. A buffered UART (DMA ring or interrupt
/// fed) satisfies this.
pub struct SerialChannel<R> {
    reader: R,
}

impl<R: Read> SerialChannel<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn release(self) -> R {
        self.reader
    }

    pub fn reader(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Read whatever arrives within `wait`. `Ok(0)` when nothing did.
    ///
    /// Relies on `R::read` being cancel-safe, see [`SerialChannel`].
    pub async fn read_available(&mut self, buf: &mut [u8], wait: Duration) -> Result<usize, Error> {
        match with_timeout(wait, self.reader.read(buf)).await {
            Ok(res) => res.map_err(|e| Error::Io(embedded_io_async::Error::kind(&e))),
            Err(_) => Ok(0),
        }
    }

    /// Discard pending input, e.g. a late reply to the previous command.
    pub async fn drain(&mut self) -> Result<usize, Error> {
        let mut scratch = [0u8; 64];
        let mut total = 0;
        while total < DRAIN_LIMIT {
            let n = self.read_available(&mut scratch, DRAIN_WAIT).await?;
            if n == 0 {
                break;
            }
            total += n;
        }
        if total > 0 {
            trace!("Discarded {} stale bytes", total);
        }
        Ok(total)
    }
}
