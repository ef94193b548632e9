//! Command/response exchange through the `atat` client.
//!
//! The ingress is fed from the reader only while a command or a URC is being
//! waited for. Nothing is retried here.

use atat::asynch::{AtatClient, Client};
use atat::{AtDigester, AtatCmd, AtatIngress, Ingress, UrcChannel, UrcSubscription};
use embassy_futures::select::{select, Either};
use embassy_time::{with_timeout, Duration};
use embedded_io_async::{Read, Write};

use super::channel::SerialChannel;
use super::resources::{AtResources, CMD_BUF_SIZE, INGRESS_BUF_SIZE, URC_CAPACITY, URC_SUBSCRIBERS};
use crate::command::Urc;
use crate::error::Error;

pub type AtSubscription<'a> = UrcSubscription<'a, Urc, URC_CAPACITY, URC_SUBSCRIBERS>;

pub struct AtDriver<'a, R, W: Write> {
    client: Client<'a, W, INGRESS_BUF_SIZE>,
    ingress: Ingress<'a, AtDigester<Urc>, Urc, INGRESS_BUF_SIZE, URC_CAPACITY, URC_SUBSCRIBERS>,
    urc_channel: &'a UrcChannel<Urc, URC_CAPACITY, URC_SUBSCRIBERS>,
    channel: SerialChannel<R>,
}

impl<'a, R: Read, W: Write> AtDriver<'a, R, W> {
    pub fn new(reader: R, writer: W, resources: &'a mut AtResources) -> Self {
        let client = Client::new(
            writer,
            &resources.res_slot,
            &mut resources.cmd_buf,
            atat::Config::default(),
        );
        let ingress = Ingress::new(
            AtDigester::<Urc>::new(),
            &mut resources.ingress_buf,
            &resources.res_slot,
            &resources.urc_channel,
        );

        Self {
            client,
            ingress,
            urc_channel: &resources.urc_channel,
            channel: SerialChannel::new(reader),
        }
    }

    /// Hand back the reader. The writer stays with the client.
    pub fn release(self) -> R {
        self.channel.release()
    }

    /// Send `cmd` and wait for its final result code, at most
    /// `Cmd::MAX_TIMEOUT_MS`.
    ///
    /// `ERROR`, `+CME ERROR`, `+CMS ERROR` and the deadline all come back as
    /// [`Error::Atat`].
    pub async fn send<Cmd: AtatCmd>(&mut self, cmd: &Cmd) -> Result<Cmd::Response, Error> {
        if Cmd::MAX_LEN > CMD_BUF_SIZE {
            error!("Command needs {} bytes, buffer holds {}", Cmd::MAX_LEN, CMD_BUF_SIZE);
            return Err(Error::Overflow);
        }

        self.channel.drain().await?;
        self.ingress.clear();

        match select(
            self.client.send(cmd),
            self.ingress.read_from(self.channel.reader()),
        )
        .await
        {
            Either::First(res) => res.map_err(|e| {
                debug!("Command failed: {:?}", e);
                Error::from(e)
            }),
            Either::Second(never) => never,
        }
    }

    /// Start collecting URCs. Take the subscription before sending the
    /// command whose URC is wanted, it may arrive together with the `OK`.
    pub fn subscribe(&self) -> Result<AtSubscription<'a>, Error> {
        self.urc_channel.subscribe().map_err(|_| Error::Overflow)
    }

    /// Wait until `matches` picks a URC out of `sub`, at most `timeout`.
    ///
    /// Bytes already buffered after the last reply are kept, so a URC split
    /// across reads still completes.
    pub async fn wait_urc<T>(
        &mut self,
        sub: &mut AtSubscription<'a>,
        timeout: Duration,
        mut matches: impl FnMut(Urc) -> Option<T>,
    ) -> Result<T, Error> {
        let wanted = async {
            loop {
                if let Some(found) = matches(sub.next_message_pure().await) {
                    return found;
                }
            }
        };

        match with_timeout(
            timeout,
            select(wanted, self.ingress.read_from(self.channel.reader())),
        )
        .await
        {
            Ok(Either::First(found)) => Ok(found),
            Ok(Either::Second(never)) => never,
            Err(_) => {
                debug!("No URC within {} ms", timeout.as_millis());
                Err(Error::Atat(atat::Error::Timeout))
            }
        }
    }
}
