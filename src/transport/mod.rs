// src/transport/mod.rs
//! Transport - bidirectional event channel between the chat session and the assistant backend

pub mod endpoint;
pub mod packet;
pub mod payload;
pub mod socket_io;

use tokio::sync::mpsc;

use crate::error::Result;

pub use payload::{ErrorPayload, MessagePayload, ResponsePayload, FALLBACK_ERROR_MESSAGE};
pub use socket_io::SocketIoTransport;

/// Events delivered by a transport to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    Connected,
    Disconnected,
    Response(ResponsePayload),
    Error(ErrorPayload),
}

/// Events a session sends to the server.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundEvent {
    Message(MessagePayload),
}

impl OutboundEvent {
    pub fn message(text: impl Into<String>) -> Self {
        OutboundEvent::Message(MessagePayload { message: text.into() })
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::Message(_) => "message",
        }
    }

    pub fn data(&self) -> Result<serde_json::Value> {
        match self {
            OutboundEvent::Message(payload) => Ok(serde_json::to_value(payload)?),
        }
    }
}

pub type TransportSender = mpsc::UnboundedSender<TransportEvent>;
pub type TransportReceiver = mpsc::UnboundedReceiver<TransportEvent>;

pub fn transport_channel() -> (TransportSender, TransportReceiver) {
    mpsc::unbounded_channel()
}

/// A connection to the assistant backend.
///
/// `open` hands the transport the sender it reports lifecycle and inbound
/// events through; dropping that sender in `close` releases every listener.
pub trait Transport {
    fn open(&mut self, events: TransportSender) -> Result<()>;

    fn emit(&mut self, event: OutboundEvent) -> Result<()>;

    fn close(&mut self);
}
