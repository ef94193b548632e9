use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Receiver;

use super::uploader::Uploader;
use crate::error::Error;
use crate::payload::UploadPayload;

/// Background upload worker.
///
/// You must call `.run()` in a background task for reports to leave the
/// device. Reports are uploaded one at a time in the order their windows
/// closed. A report that fails to upload is dropped.
pub struct Runner<'d, U, const N: usize> {
    payloads: Receiver<'d, CriticalSectionRawMutex, UploadPayload, N>,
    uploader: U,
}

impl<'d, U: Uploader, const N: usize> Runner<'d, U, N> {
    pub(crate) fn new(
        payloads: Receiver<'d, CriticalSectionRawMutex, UploadPayload, N>,
        uploader: U,
    ) -> Self {
        Self { payloads, uploader }
    }

    pub fn uploader(&mut self) -> &mut U {
        &mut self.uploader
    }

    /// Wait for the next report and upload it.
    pub async fn process_next(&mut self) -> Result<(), Error> {
        let payload = self.payloads.receive().await;
        match self.uploader.upload(&payload).await {
            Ok(()) => {
                info!("Uploaded value {} for {}", payload.value, payload.time.as_str());
                Ok(())
            }
            Err(e) => {
                error!(
                    "Upload of value {} for {} failed: {:?}",
                    payload.value,
                    payload.time.as_str(),
                    e
                );
                Err(e)
            }
        }
    }

    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.process_next().await;
        }
    }
}
