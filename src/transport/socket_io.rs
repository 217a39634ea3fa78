// src/transport/socket_io.rs
//! Socket.IO client over a websocket, driven by one tokio task per transport

use futures::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::{
    connect_async,
    tungstenite::Message,
    MaybeTlsStream,
    WebSocketStream,
};
use url::Url;

use crate::error::{ChatError, Result};
use crate::transport::{
    endpoint::socket_io_endpoint,
    packet::{EnginePacket, SocketPacket},
    ErrorPayload, OutboundEvent, ResponsePayload, Transport, TransportEvent, TransportSender,
};
use crate::{log_debug, log_error, log_info, log_warn};

/// Used until the server's handshake tells us its ping interval.
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(20);

/// How long a closing connection gets to say goodbye before it is aborted.
const CLOSE_GRACE: Duration = Duration::from_secs(1);

/// Reported for an emit the server never got.
pub const CONNECTION_LOST_MESSAGE: &str = "Message not sent: connection lost";

type Socket = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

#[derive(Debug)]
enum Command {
    Emit(OutboundEvent),
    Close,
}

#[derive(Debug)]
enum ConnectionEnd {
    ClosedByClient,
    Dropped(String),
}

#[derive(Debug)]
pub struct SocketIoTransport {
    endpoint: Url,
    reconnect_delay: Duration,
    commands: Option<mpsc::UnboundedSender<Command>>,
    connected: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl SocketIoTransport {
    pub fn new(socket_url: &str, reconnect_delay: Duration) -> Result<Self> {
        Ok(Self {
            endpoint: socket_io_endpoint(socket_url)?,
            reconnect_delay,
            commands: None,
            connected: Arc::new(AtomicBool::new(false)),
            task: None,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

impl Transport for SocketIoTransport {
    fn open(&mut self, events: TransportSender) -> Result<()> {
        if self.commands.is_some() {
            return Err(ChatError::TransportError("transport is already open".to_string()));
        }

        let (commands, command_rx) = mpsc::unbounded_channel();
        let connection = Connection {
            endpoint: self.endpoint.clone(),
            reconnect_delay: self.reconnect_delay,
            commands: command_rx,
            events,
            connected: Arc::clone(&self.connected),
        };

        log_info!("Opening socket transport to {}", self.endpoint);
        self.task = Some(tokio::spawn(connection.run()));
        self.commands = Some(commands);
        Ok(())
    }

    fn emit(&mut self, event: OutboundEvent) -> Result<()> {
        let commands = self
            .commands
            .as_ref()
            .ok_or_else(|| ChatError::TransportError("transport is not open".to_string()))?;

        if !self.is_connected() {
            return Err(ChatError::TransportError("not connected to the server".to_string()));
        }

        commands
            .send(Command::Emit(event))
            .map_err(|_| ChatError::TransportError("connection task has stopped".to_string()))
    }

    fn close(&mut self) {
        if let Some(commands) = self.commands.take() {
            log_info!("Closing socket transport to {}", self.endpoint);
            let _ = commands.send(Command::Close);
        }

        // A task stuck in connect never reads the close command.
        let Some(mut task) = self.task.take() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    if tokio::time::timeout(CLOSE_GRACE, &mut task).await.is_err() {
                        log_warn!("Socket task did not stop within {:?}, aborting", CLOSE_GRACE);
                        task.abort();
                    }
                });
            }
            Err(_) => task.abort(),
        }
    }
}

impl Drop for SocketIoTransport {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// State owned by the background connection task.
struct Connection {
    endpoint: Url,
    reconnect_delay: Duration,
    commands: mpsc::UnboundedReceiver<Command>,
    events: TransportSender,
    connected: Arc<AtomicBool>,
}

impl Connection {
    async fn run(mut self) {
        loop {
            let end = match connect_async(self.endpoint.as_str()).await {
                Ok((socket, _)) => {
                    log_info!("Websocket established to {}", self.endpoint);
                    self.drive(socket).await
                }
                Err(e) => ConnectionEnd::Dropped(e.to_string()),
            };

            if self.connected.swap(false, Ordering::SeqCst) {
                let _ = self.events.send(TransportEvent::Disconnected);
            }

            match end {
                ConnectionEnd::ClosedByClient => break,
                ConnectionEnd::Dropped(reason) => {
                    log_warn!(
                        "Socket connection lost ({}), retrying in {:?}",
                        reason,
                        self.reconnect_delay
                    );
                }
            }

            if !self.wait_before_reconnect().await {
                break;
            }
        }
        log_info!("Socket transport to {} stopped", self.endpoint);
    }

    /// Returns false when the transport was closed during the wait.
    async fn wait_before_reconnect(&mut self) -> bool {
        let delay = tokio::time::sleep(self.reconnect_delay);
        tokio::pin!(delay);

        loop {
            tokio::select! {
                _ = &mut delay => return !self.events.is_closed(),
                command = self.commands.recv() => match command {
                    Some(Command::Emit(event)) => self.report_lost(&event),
                    Some(Command::Close) | None => return false,
                },
            }
        }
    }

    async fn drive(&mut self, socket: Socket) -> ConnectionEnd {
        let (mut sink, mut stream) = socket.split();
        let mut deadline = HANDSHAKE_TIMEOUT;

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Emit(event)) => {
                        let frame = match encode_event(&event) {
                            Ok(frame) => frame,
                            Err(e) => {
                                log_error!("Failed to encode '{}' event: {}", event.name(), e);
                                let error = ErrorPayload::Text(format!("Message not sent: {}", e));
                                let _ = self.events.send(TransportEvent::Error(error));
                                continue;
                            }
                        };
                        log_debug!("Sending frame: {}", frame);
                        if let Err(e) = sink.send(Message::text(frame)).await {
                            self.report_lost(&event);
                            return ConnectionEnd::Dropped(e.to_string());
                        }
                    }
                    Some(Command::Close) | None => {
                        let _ = sink.send(Message::text("41")).await;
                        let _ = sink.close().await;
                        return ConnectionEnd::ClosedByClient;
                    }
                },
                frame = tokio::time::timeout(deadline, stream.next()) => {
                    let frame = match frame {
                        Err(_) => return ConnectionEnd::Dropped("heartbeat timed out".to_string()),
                        Ok(None) => return ConnectionEnd::Dropped("socket closed".to_string()),
                        Ok(Some(Err(e))) => return ConnectionEnd::Dropped(e.to_string()),
                        Ok(Some(Ok(frame))) => frame,
                    };

                    let text = match frame {
                        Message::Text(text) => text,
                        Message::Close(_) => {
                            return ConnectionEnd::Dropped("server closed the socket".to_string())
                        }
                        _ => continue,
                    };

                    log_debug!("Received frame: {}", text.as_str());
                    let packet = match EnginePacket::parse(text.as_str()) {
                        Ok(packet) => packet,
                        Err(e) => {
                            log_warn!("Ignoring malformed frame ({}): {}", e, text.as_str());
                            continue;
                        }
                    };

                    match packet {
                        EnginePacket::Open(handshake) => {
                            deadline = handshake.heartbeat_deadline();
                            log_debug!("Handshake sid={} deadline={:?}", handshake.sid, deadline);
                            let connect = EnginePacket::Message(SocketPacket::Connect(None));
                            if let Err(e) = send_packet(&mut sink, &connect).await {
                                return ConnectionEnd::Dropped(e.to_string());
                            }
                        }
                        EnginePacket::Ping(data) => {
                            if let Err(e) = send_packet(&mut sink, &EnginePacket::Pong(data)).await {
                                return ConnectionEnd::Dropped(e.to_string());
                            }
                        }
                        EnginePacket::Close => {
                            return ConnectionEnd::Dropped("server closed the session".to_string())
                        }
                        EnginePacket::Message(packet) => {
                            if let Some(end) = self.dispatch(packet) {
                                return end;
                            }
                        }
                        EnginePacket::Pong(_) | EnginePacket::Upgrade | EnginePacket::Noop => {}
                    }
                }
            }
        }
    }

    /// An emit accepted while the socket was going down. The session hears
    /// about it as an error so its pending request ends now.
    fn report_lost(&self, event: &OutboundEvent) {
        log_warn!("Dropping '{}' event, the connection is gone", event.name());
        let error = ErrorPayload::Text(CONNECTION_LOST_MESSAGE.to_string());
        let _ = self.events.send(TransportEvent::Error(error));
    }

    /// Forwards a Socket.IO packet to the session; `Some` ends the connection.
    fn dispatch(&self, packet: SocketPacket) -> Option<ConnectionEnd> {
        let event = match packet {
            SocketPacket::Connect(_) => {
                self.connected.store(true, Ordering::SeqCst);
                log_info!("Socket connected");
                TransportEvent::Connected
            }
            SocketPacket::Disconnect => {
                return Some(ConnectionEnd::Dropped("server disconnected the socket".to_string()))
            }
            SocketPacket::Event { name, data } => match name.as_str() {
                "response" => TransportEvent::Response(ResponsePayload::from_value(data)),
                "error" => TransportEvent::Error(ErrorPayload::from_value(data)),
                other => {
                    log_debug!("Ignoring unhandled event '{}'", other);
                    return None;
                }
            },
            SocketPacket::ConnectError(data) => {
                log_warn!("Server refused the connection: {}", data);
                TransportEvent::Error(ErrorPayload::from_value(data))
            }
            SocketPacket::Unsupported(kind) => {
                log_debug!("Ignoring unsupported socket packet type {}", kind);
                return None;
            }
        };

        if self.events.send(event).is_err() {
            // Nobody is listening any more; the session has been torn down.
            return Some(ConnectionEnd::ClosedByClient);
        }
        None
    }
}

fn encode_event(event: &OutboundEvent) -> Result<String> {
    EnginePacket::Message(SocketPacket::event(event.name(), event.data()?)).encode()
}

async fn send_packet<S>(sink: &mut S, packet: &EnginePacket) -> Result<()>
where
    S: futures::Sink<Message, Error = tokio_tungstenite::tungstenite::Error> + Unpin,
{
    let frame = packet.encode()?;
    sink.send(Message::text(frame)).await?;
    Ok(())
}
