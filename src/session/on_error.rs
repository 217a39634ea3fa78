use crate::log_warn;
use crate::transport::{ErrorPayload, Transport};

use super::{ChatSession, NotificationLevel};

impl<T: Transport> ChatSession<T> {
    /// Surfaces a server error as a toast. The log is left untouched, and the
    /// pending request counts as finished so the input is usable again.
    pub fn on_error(&mut self, error: ErrorPayload) {
        if self.is_closed() {
            return;
        }

        let text = error.display_message();
        log_warn!("Server error: {}", text);

        self.pending = None;
        self.notify(NotificationLevel::Error, text);
    }
}
