use atat::{ResponseSlot, UrcChannel};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::command::Urc;
use crate::payload::UploadPayload;

/// Reports waiting for the upload worker, by default.
pub const PAYLOAD_QUEUE_CAPACITY: usize = 4;

pub const CMD_BUF_SIZE: usize = 384;
pub const INGRESS_BUF_SIZE: usize = 1024;
pub const URC_CAPACITY: usize = 2;
pub const URC_SUBSCRIBERS: usize = 1;

/// Buffers of the AT client and the ingress feeding it. Must outlive the
/// [`super::Modem`] built on them.
pub struct AtResources {
    pub(crate) res_slot: ResponseSlot<INGRESS_BUF_SIZE>,
    pub(crate) urc_channel: UrcChannel<Urc, URC_CAPACITY, URC_SUBSCRIBERS>,
    pub(crate) cmd_buf: [u8; CMD_BUF_SIZE],
    pub(crate) ingress_buf: [u8; INGRESS_BUF_SIZE],
}

impl Default for AtResources {
    fn default() -> Self {
        Self::new()
    }
}

impl AtResources {
    pub const fn new() -> Self {
        Self {
            res_slot: ResponseSlot::new(),
            urc_channel: UrcChannel::new(),
            cmd_buf: [0; CMD_BUF_SIZE],
            ingress_buf: [0; INGRESS_BUF_SIZE],
        }
    }
}

/// Storage shared by the [`super::scheduler::ReportingScheduler`] and the
/// [`super::runner::Runner`]. Must outlive both, e.g. in a `static`.
pub struct Resources<const N: usize = PAYLOAD_QUEUE_CAPACITY> {
    pub(crate) payloads: Channel<CriticalSectionRawMutex, UploadPayload, N>,
}

impl<const N: usize> Default for Resources<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Resources<N> {
    pub const fn new() -> Self {
        Self {
            payloads: Channel::new(),
        }
    }
}
