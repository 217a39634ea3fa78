// src/session/mod.rs
//! Chat session - conversation log, connection flag, pending request and theme
//!
//! All mutation happens on the app loop, one event at a time. Only one
//! request may be in flight: replies carry no correlation id, so a second
//! submission is refused until the first is answered, fails, or times out.

mod check_timeout;
mod handle_event;
mod initialize;
mod input;
mod message;
mod notification;
mod on_connection_change;
mod on_error;
mod on_response;
mod submit;
mod teardown;
mod toggle_theme;

use std::time::{Duration, Instant};

use crate::config::ClientConfig;
use crate::theme::Theme;
use crate::transport::Transport;

pub use message::{Message, MessageId, Role};
pub use notification::{Notification, NotificationLevel, Notifications};

pub const TIMEOUT_MESSAGE: &str = "The assistant did not reply in time. Please try again.";

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub welcome_message: String,
    pub request_timeout: Option<Duration>,
    pub toast_duration: Duration,
    pub theme: Theme,
}

impl SessionOptions {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            welcome_message: config.welcome_message.clone(),
            request_timeout: config.request_timeout(),
            toast_duration: config.toast_duration(),
            theme: if config.dark_theme { Theme::Dark } else { Theme::Light },
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

/// The request currently awaiting a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRequest {
    pub sent_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Open,
    Closed,
}

#[derive(Debug)]
pub struct ChatSession<T: Transport> {
    messages: Vec<Message>,
    connected: bool,
    pending: Option<PendingRequest>,
    theme: Theme,
    input: String,
    notifications: Notifications,
    request_timeout: Option<Duration>,
    /// `None` once the session is torn down.
    transport: Option<T>,
}

impl<T: Transport> ChatSession<T> {
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<PendingRequest> {
        self.pending
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn transport(&self) -> Option<&T> {
        self.transport.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        if self.transport.is_some() {
            SessionStatus::Open
        } else {
            SessionStatus::Closed
        }
    }

    pub fn is_closed(&self) -> bool {
        self.status() == SessionStatus::Closed
    }

    /// Whether a submission would currently be accepted, ignoring the text.
    pub fn can_submit(&self) -> bool {
        !self.is_closed() && self.connected && self.pending.is_none()
    }

    fn notify(&mut self, level: NotificationLevel, text: impl Into<String>) {
        self.notifications.push(level, text, Instant::now());
    }
}

impl<T: Transport> Drop for ChatSession<T> {
    fn drop(&mut self) {
        self.teardown();
    }
}
