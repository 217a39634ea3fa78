use crate::transport::{ResponsePayload, Transport};
use crate::{log_info, log_warn};

use super::{ChatSession, Message};

impl<T: Transport> ChatSession<T> {
    pub fn on_response(&mut self, payload: ResponsePayload) {
        if self.is_closed() {
            return;
        }

        if self.pending.take().is_none() {
            log_warn!("Response arrived with no request pending");
        }

        let text = payload.into_text();
        log_info!("Received response ({} chars)", text.chars().count());
        self.messages.push(Message::new_assistant(text));
    }
}
