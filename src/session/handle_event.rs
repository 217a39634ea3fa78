use crate::transport::{Transport, TransportEvent};

use super::ChatSession;

impl<T: Transport> ChatSession<T> {
    pub fn handle_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Connected => self.on_connection_change(true),
            TransportEvent::Disconnected => self.on_connection_change(false),
            TransportEvent::Response(payload) => self.on_response(payload),
            TransportEvent::Error(error) => self.on_error(error),
        }
    }
}
