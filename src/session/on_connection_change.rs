use crate::log_info;
use crate::transport::Transport;

use super::ChatSession;

impl<T: Transport> ChatSession<T> {
    pub fn on_connection_change(&mut self, is_connected: bool) {
        if self.is_closed() {
            return;
        }
        log_info!("Socket {}", if is_connected { "connected" } else { "disconnected" });
        self.connected = is_connected;
    }
}
