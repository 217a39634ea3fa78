// src/transport/packet.rs
//! Engine.IO v4 / Socket.IO v4 text packet codec
//!
//! Every websocket text frame is one Engine.IO packet: a single type digit
//! followed by its data. Engine.IO `message` packets (`4`) carry one
//! Socket.IO packet, which again starts with a type digit, optionally
//! followed by a `/namespace,` prefix, an ack id, and a JSON body.
//! Binary attachments are not used by the chat protocol.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::error::{ChatError, Result};

/// Body of the Engine.IO `open` packet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    pub ping_interval: u64,
    pub ping_timeout: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_payload: Option<u64>,
}

impl Handshake {
    /// How long to wait for any frame before declaring the connection dead.
    pub fn heartbeat_deadline(&self) -> Duration {
        Duration::from_millis(self.ping_interval.saturating_add(self.ping_timeout))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping(String),
    Pong(String),
    Message(SocketPacket),
    Upgrade,
    Noop,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    Connect(Option<Value>),
    Disconnect,
    Event { name: String, data: Value },
    ConnectError(Value),
    /// Acks and binary packets; carries the raw type digit.
    Unsupported(u8),
}

impl SocketPacket {
    pub fn event(name: impl Into<String>, data: Value) -> Self {
        SocketPacket::Event { name: name.into(), data }
    }
}

impl EnginePacket {
    pub fn parse(frame: &str) -> Result<Self> {
        let mut chars = frame.chars();
        let kind = chars
            .next()
            .ok_or_else(|| ChatError::ProtocolError("empty frame".to_string()))?;
        let body = chars.as_str();

        match kind {
            '0' => Ok(EnginePacket::Open(serde_json::from_str(body)?)),
            '1' => Ok(EnginePacket::Close),
            '2' => Ok(EnginePacket::Ping(body.to_string())),
            '3' => Ok(EnginePacket::Pong(body.to_string())),
            '4' => Ok(EnginePacket::Message(SocketPacket::parse(body)?)),
            '5' => Ok(EnginePacket::Upgrade),
            '6' => Ok(EnginePacket::Noop),
            other => Err(ChatError::ProtocolError(format!(
                "unknown engine packet type '{}'",
                other
            ))),
        }
    }

    pub fn encode(&self) -> Result<String> {
        let frame = match self {
            EnginePacket::Open(handshake) => format!("0{}", serde_json::to_string(handshake)?),
            EnginePacket::Close => "1".to_string(),
            EnginePacket::Ping(data) => format!("2{}", data),
            EnginePacket::Pong(data) => format!("3{}", data),
            EnginePacket::Message(packet) => format!("4{}", packet.encode()?),
            EnginePacket::Upgrade => "5".to_string(),
            EnginePacket::Noop => "6".to_string(),
        };
        Ok(frame)
    }
}

impl SocketPacket {
    pub fn parse(body: &str) -> Result<Self> {
        let kind = body
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(|| ChatError::ProtocolError(format!("bad socket packet: {}", body)))?
            as u8;
        let rest = strip_ack_id(strip_namespace(&body[1..]));

        match kind {
            0 => {
                if rest.is_empty() {
                    Ok(SocketPacket::Connect(None))
                } else {
                    Ok(SocketPacket::Connect(Some(serde_json::from_str(rest)?)))
                }
            }
            1 => Ok(SocketPacket::Disconnect),
            2 => {
                let mut args: Vec<Value> = serde_json::from_str(rest)?;
                if args.is_empty() {
                    return Err(ChatError::ProtocolError("event without a name".to_string()));
                }
                let name = match args.remove(0) {
                    Value::String(name) => name,
                    other => {
                        return Err(ChatError::ProtocolError(format!(
                            "event name is not a string: {}",
                            other
                        )))
                    }
                };
                let data = if args.is_empty() { Value::Null } else { args.remove(0) };
                Ok(SocketPacket::Event { name, data })
            }
            4 => {
                let data = if rest.is_empty() { Value::Null } else { serde_json::from_str(rest)? };
                Ok(SocketPacket::ConnectError(data))
            }
            other => Ok(SocketPacket::Unsupported(other)),
        }
    }

    pub fn encode(&self) -> Result<String> {
        let body = match self {
            SocketPacket::Connect(None) => "0".to_string(),
            SocketPacket::Connect(Some(auth)) => format!("0{}", serde_json::to_string(auth)?),
            SocketPacket::Disconnect => "1".to_string(),
            SocketPacket::Event { name, data } => {
                let args = match data {
                    Value::Null => vec![Value::String(name.clone())],
                    data => vec![Value::String(name.clone()), data.clone()],
                };
                format!("2{}", serde_json::to_string(&args)?)
            }
            SocketPacket::ConnectError(data) => format!("4{}", serde_json::to_string(data)?),
            SocketPacket::Unsupported(kind) => {
                return Err(ChatError::ProtocolError(format!(
                    "cannot encode socket packet type {}",
                    kind
                )))
            }
        };
        Ok(body)
    }
}

fn strip_namespace(body: &str) -> &str {
    if body.starts_with('/') {
        match body.find(',') {
            Some(idx) => &body[idx + 1..],
            None => "",
        }
    } else {
        body
    }
}

fn strip_ack_id(body: &str) -> &str {
    body.trim_start_matches(|c: char| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_open_handshake() {
        let frame = r#"0{"sid":"lv_VI97HAXpY6yYWAAAC","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;
        let EnginePacket::Open(handshake) = EnginePacket::parse(frame).unwrap() else {
            panic!("expected open packet");
        };
        assert_eq!(handshake.sid, "lv_VI97HAXpY6yYWAAAC");
        assert_eq!(handshake.heartbeat_deadline(), Duration::from_millis(45_000));
    }

    #[test]
    fn test_parse_response_event() {
        let packet = EnginePacket::parse(r#"42["response",{"text":"Tell me more."}]"#).unwrap();
        assert_eq!(
            packet,
            EnginePacket::Message(SocketPacket::event("response", json!({ "text": "Tell me more." })))
        );
    }

    #[test]
    fn test_parse_event_with_namespace_and_ack_id() {
        let packet = EnginePacket::parse(r#"42/chat,17["error","boom"]"#).unwrap();
        assert_eq!(packet, EnginePacket::Message(SocketPacket::event("error", json!("boom"))));
    }

    #[test]
    fn test_parse_event_without_data() {
        let packet = SocketPacket::parse(r#"2["response"]"#).unwrap();
        assert_eq!(packet, SocketPacket::event("response", Value::Null));
    }

    #[test]
    fn test_parse_connect_and_connect_error() {
        assert_eq!(
            SocketPacket::parse(r#"0{"sid":"abc"}"#).unwrap(),
            SocketPacket::Connect(Some(json!({ "sid": "abc" })))
        );
        assert_eq!(
            SocketPacket::parse(r#"4{"message":"Not authorized"}"#).unwrap(),
            SocketPacket::ConnectError(json!({ "message": "Not authorized" }))
        );
    }

    #[test]
    fn test_parse_heartbeat_and_close() {
        assert_eq!(EnginePacket::parse("2").unwrap(), EnginePacket::Ping(String::new()));
        assert_eq!(EnginePacket::parse("1").unwrap(), EnginePacket::Close);
        assert_eq!(EnginePacket::parse("41").unwrap(), EnginePacket::Message(SocketPacket::Disconnect));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(EnginePacket::parse("").is_err());
        assert!(EnginePacket::parse("9hello").is_err());
        assert!(EnginePacket::parse("42not json").is_err());
        assert!(EnginePacket::parse("42[]").is_err());
        assert!(EnginePacket::parse("42[5]").is_err());
    }

    #[test]
    fn test_encode_outbound_frames() {
        let connect = EnginePacket::Message(SocketPacket::Connect(None));
        assert_eq!(connect.encode().unwrap(), "40");

        let event = EnginePacket::Message(SocketPacket::event(
            "message",
            json!({ "message": "I feel anxious" }),
        ));
        assert_eq!(event.encode().unwrap(), r#"42["message",{"message":"I feel anxious"}]"#);

        assert_eq!(EnginePacket::Pong(String::new()).encode().unwrap(), "3");
        assert_eq!(EnginePacket::Message(SocketPacket::Disconnect).encode().unwrap(), "41");
    }
}
