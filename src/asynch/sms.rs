use embedded_io_async::{Read, Write};

use super::at::AtDriver;
use crate::command::sms::responses::MessageReference;
use crate::command::sms::types::MessageFormat;
use crate::command::sms::{MessageText, SendMessage, SetMessageFormat};
use crate::error::{Error, GenericError};

/// Text mode short messages.
pub struct SmsSender<'m, 'a, R, W: Write> {
    at: &'m mut AtDriver<'a, R, W>,
}

impl<'m, 'a, R: Read, W: Write> SmsSender<'m, 'a, R, W> {
    pub(crate) fn new(at: &'m mut AtDriver<'a, R, W>) -> Self {
        Self { at }
    }

    pub async fn send(&mut self, number: &str, text: &str) -> Result<MessageReference, Error> {
        self.at
            .send(&SetMessageFormat {
                format: MessageFormat::Text,
            })
            .await
            .map_err(|e| refused("Text mode not accepted", e))?;

        match self.at.send(&SendMessage { number }).await {
            Ok(_) => {}
            Err(Error::Atat(atat::Error::Timeout)) => {
                warn!("No message prompt");
                return Err(GenericError::Timeout.into());
            }
            Err(e) => return Err(refused("Message refused", e)),
        }

        let reference = self
            .at
            .send(&MessageText::new(text))
            .await
            .map_err(|e| refused("Message not submitted", e))?;
        info!("Message sent, reference {}", reference.mr);
        Ok(reference)
    }
}

/// Transport errors pass through, anything the module answered becomes
/// [`Error::Sms`].
fn refused(what: &str, e: Error) -> Error {
    if e.is_transport() {
        e
    } else {
        warn!("{}: {:?}", what, e);
        Error::Sms
    }
}
