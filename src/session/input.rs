use crate::transport::Transport;

use super::ChatSession;

impl<T: Transport> ChatSession<T> {
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The input field is disabled while disconnected.
    pub fn input_enabled(&self) -> bool {
        !self.is_closed() && self.connected
    }

    pub fn push_char(&mut self, ch: char) {
        if self.input_enabled() && !ch.is_control() {
            self.input.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if self.input_enabled() {
            self.input.pop();
        }
    }
}
