use crate::transport::{Transport, TransportSender};
use crate::{log_error, log_info};

use super::{ChatSession, Message, NotificationLevel, Notifications, SessionOptions};

impl<T: Transport> ChatSession<T> {
    /// Opens the transport and seeds the log with the welcome message.
    ///
    /// Connection failures never surface here: `connected` stays false until
    /// the transport reports `Connected`, and an open error becomes a toast.
    pub fn initialize(mut transport: T, events: TransportSender, options: SessionOptions) -> Self {
        let mut notifications = Notifications::new(options.toast_duration);

        if let Err(e) = transport.open(events) {
            log_error!("Failed to open transport: {}", e);
            notifications.push(
                NotificationLevel::Error,
                format!("Could not connect: {}", e),
                std::time::Instant::now(),
            );
        } else {
            log_info!("Chat session initialized");
        }

        Self {
            messages: vec![Message::new_assistant(options.welcome_message)],
            connected: false,
            pending: None,
            theme: options.theme,
            input: String::new(),
            notifications,
            request_timeout: options.request_timeout,
            transport: Some(transport),
        }
    }
}
