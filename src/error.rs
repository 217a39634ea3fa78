use thiserror::Error;
use tokio_tungstenite::tungstenite;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid socket URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("WebSocket error: {0}")]
    WebSocketError(#[from] Box<tungstenite::Error>),

    #[error("Protocol error: {0}")]
    ProtocolError(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl From<tungstenite::Error> for ChatError {
    fn from(error: tungstenite::Error) -> Self {
        ChatError::WebSocketError(Box::new(error))
    }
}

impl From<&str> for ChatError {
    fn from(error: &str) -> Self {
        ChatError::TransportError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
