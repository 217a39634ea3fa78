// src/event.rs
//! Single event stream for the app loop: ticks, terminal input, app
//! commands and whatever the socket reports.

use color_eyre::eyre::OptionExt;
use futures::{FutureExt, StreamExt};
use ratatui::crossterm::event::Event as CrosstermEvent;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::transport::{TransportEvent, TransportReceiver};

/// Drives the typing indicator and toast expiry.
const TICK_FPS: f64 = 10.0;

#[derive(Clone, Debug)]
pub enum Event {
    Tick,
    Crossterm(CrosstermEvent),
    App(AppEvent),
    /// Lifecycle or inbound event from the chat socket.
    Transport(TransportEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    // Chat
    Submit,
    ToggleTheme,

    // Scrolling
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollToBottom,

    // System
    Quit,
}

#[derive(Debug)]
pub struct EventHandler {
    sender: mpsc::UnboundedSender<Event>,
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Spawns the reader task. It also forwards `transport` until the socket
    /// side hangs up.
    pub fn new(transport: TransportReceiver) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let reader = EventReader {
            sender: sender.clone(),
            transport: Some(transport),
        };
        tokio::spawn(reader.run());
        Self { sender, receiver }
    }

    pub async fn next(&mut self) -> color_eyre::Result<Event> {
        self.receiver
            .recv()
            .await
            .ok_or_eyre("Event channel closed")
    }

    /// Queue an app event behind whatever is already waiting.
    pub fn send(&mut self, app_event: AppEvent) {
        let _ = self.sender.send(Event::App(app_event));
    }
}

struct EventReader {
    sender: mpsc::UnboundedSender<Event>,
    /// `None` once the transport has dropped its sender.
    transport: Option<TransportReceiver>,
}

impl EventReader {
    async fn run(mut self) {
        let mut terminal = crossterm::event::EventStream::new();
        let mut tick = tokio::time::interval(Duration::from_secs_f64(1.0 / TICK_FPS));

        loop {
            let terminal_event = terminal.next().fuse();
            let transport_event = next_transport_event(&mut self.transport);

            let event = tokio::select! {
                _ = self.sender.closed() => break,
                _ = tick.tick() => Event::Tick,
                Some(Ok(event)) = terminal_event => Event::Crossterm(event),
                forwarded = transport_event => match forwarded {
                    Some(event) => Event::Transport(event),
                    None => {
                        self.transport = None;
                        continue;
                    }
                },
            };

            if self.sender.send(event).is_err() {
                break;
            }
        }
    }
}

/// Pending forever once the transport is gone, so the select stops polling it.
async fn next_transport_event(transport: &mut Option<TransportReceiver>) -> Option<TransportEvent> {
    match transport {
        Some(receiver) => receiver.recv().await,
        None => std::future::pending().await,
    }
}
