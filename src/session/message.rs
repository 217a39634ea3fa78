// src/session/message.rs
use chrono::{DateTime, Local};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Name shown above the message in the chat view.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "Assistant",
        }
    }
}

/// One entry of the conversation log. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    id: MessageId,
    role: Role,
    text: String,
    timestamp: DateTime<Local>,
}

impl Message {
    pub fn new_user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text.into())
    }

    pub fn new_assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text.into())
    }

    fn new(role: Role, text: String) -> Self {
        Self {
            id: MessageId::new(),
            role,
            text,
            timestamp: Local::now(),
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_do_not_collide_on_rapid_creation() {
        let ids: HashSet<MessageId> = (0..1000).map(|_| Message::new_user("hi").id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_roles() {
        let user = Message::new_user("hello");
        let assistant = Message::new_assistant("hi there");

        assert_eq!(user.role(), Role::User);
        assert_eq!(user.role().as_str(), "user");
        assert_eq!(assistant.role().label(), "Assistant");
        assert!(assistant.timestamp() >= user.timestamp());
    }
}
