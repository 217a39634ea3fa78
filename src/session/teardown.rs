use crate::log_info;
use crate::transport::Transport;

use super::ChatSession;

impl<T: Transport> ChatSession<T> {
    /// Closes the transport and ends the session. Safe to call more than once.
    pub fn teardown(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            transport.close();
            self.connected = false;
            log_info!("Chat session closed");
        }
    }
}
