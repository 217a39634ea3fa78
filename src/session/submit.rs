use std::time::Instant;

use crate::transport::{OutboundEvent, Transport};
use crate::{log_debug, log_error, log_info};

use super::{ChatSession, Message, NotificationLevel, PendingRequest};

impl<T: Transport> ChatSession<T> {
    /// Sends `text` as a user message.
    ///
    /// A no-op returning false when the text is blank, the socket is not
    /// connected, a reply is still pending, or the session is closed.
    pub fn submit(&mut self, text: &str) -> bool {
        if text.trim().is_empty() || !self.can_submit() {
            log_debug!(
                "Submission refused (connected={}, pending={}, closed={})",
                self.connected,
                self.is_pending(),
                self.is_closed()
            );
            return false;
        }

        let Some(transport) = self.transport.as_mut() else {
            return false;
        };

        self.messages.push(Message::new_user(text));
        self.pending = Some(PendingRequest {
            sent_at: Instant::now(),
        });

        match transport.emit(OutboundEvent::message(text)) {
            Ok(()) => log_info!("Sent message ({} chars)", text.chars().count()),
            Err(e) => {
                log_error!("Failed to send message: {}", e);
                self.pending = None;
                self.notify(NotificationLevel::Error, format!("Message not sent: {}", e));
            }
        }
        true
    }

    /// Submits the input buffer, clearing it when the submission is accepted.
    pub fn submit_input(&mut self) -> bool {
        let text = self.input.clone();
        let accepted = self.submit(&text);
        if accepted {
            self.input.clear();
        }
        accepted
    }
}
