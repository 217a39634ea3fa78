// src/transport/endpoint.rs
//! Maps the configured server address onto the Socket.IO websocket endpoint

use url::Url;

use crate::error::{ChatError, Result};

const DEFAULT_SOCKET_IO_PATH: &str = "/socket.io/";

/// `http://host:3001` becomes `ws://host:3001/socket.io/?EIO=4&transport=websocket`.
pub fn socket_io_endpoint(base: &str) -> Result<Url> {
    let mut url = Url::parse(base.trim())?;

    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => {
            return Err(ChatError::ConfigError(format!(
                "Unsupported socket URL scheme: {}",
                other
            )))
        }
    };
    url.set_scheme(scheme)
        .map_err(|_| ChatError::ConfigError(format!("Cannot use scheme {} for {}", scheme, base)))?;

    if url.path().is_empty() || url.path() == "/" {
        url.set_path(DEFAULT_SOCKET_IO_PATH);
    } else if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    url.query_pairs_mut()
        .clear()
        .append_pair("EIO", "4")
        .append_pair("transport", "websocket");

    Ok(url)
}
