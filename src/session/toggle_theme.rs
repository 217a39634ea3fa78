use crate::transport::Transport;

use super::ChatSession;

impl<T: Transport> ChatSession<T> {
    pub fn toggle_theme(&mut self) {
        if self.is_closed() {
            return;
        }
        self.theme = self.theme.toggled();
    }
}
