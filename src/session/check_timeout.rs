use std::time::Instant;

use crate::log_warn;
use crate::transport::Transport;

use super::{ChatSession, NotificationLevel, TIMEOUT_MESSAGE};

impl<T: Transport> ChatSession<T> {
    /// Gives up on a request pending longer than the configured timeout.
    /// Returns true when the pending request was abandoned.
    pub fn check_timeout(&mut self, now: Instant) -> bool {
        let (Some(pending), Some(timeout)) = (self.pending, self.request_timeout) else {
            return false;
        };
        if self.is_closed() || now.saturating_duration_since(pending.sent_at) < timeout {
            return false;
        }

        log_warn!("No reply after {:?}, clearing pending request", timeout);
        self.pending = None;
        self.notifications.push(NotificationLevel::Warning, TIMEOUT_MESSAGE, now);
        true
    }

    /// Per-tick housekeeping. Returns true if anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let timed_out = self.check_timeout(now);
        let pruned = self.notifications.prune(now);
        timed_out || pruned
    }
}
