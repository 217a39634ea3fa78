use crate::config::ClientConfig;
use crate::event::{AppEvent, Event, EventHandler};
use crate::render::MarkdownRenderer;
use crate::session::{ChatSession, SessionOptions};
use crate::transport::{transport_channel, SocketIoTransport};
use crate::log_info;
use color_eyre::Result;
use ratatui::{
    crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    DefaultTerminal,
};
use std::time::Instant;
use throbber_widgets_tui::ThrobberState;
use tui_scrollview::ScrollViewState;

/// Application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// Loaded configuration
    pub config: ClientConfig,
    /// Conversation state and the socket behind it
    pub session: ChatSession<SocketIoTransport>,
    /// Terminal, tick and socket events, in arrival order
    pub events: EventHandler,
    pub renderer: MarkdownRenderer,
    /// Message list scroll position
    pub scroll: ScrollViewState,
    /// Keep the newest message in view
    pub follow_tail: bool,
    /// Typing indicator animation
    pub throbber: ThrobberState,
    seen_messages: usize,
    seen_pending: bool,
}

impl App {
    /// Constructs a new instance of [`App`] and opens the socket.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = SocketIoTransport::new(&config.socket_url, config.reconnect_delay())?;
        log_info!("Connecting to {}", transport.endpoint());

        let (sender, transport_events) = transport_channel();
        let session = ChatSession::initialize(transport, sender, SessionOptions::from_config(&config));

        Ok(Self {
            running: true,
            config,
            session,
            events: EventHandler::new(transport_events),
            renderer: MarkdownRenderer::default(),
            scroll: ScrollViewState::default(),
            follow_tail: true,
            throbber: ThrobberState::default(),
            seen_messages: 0,
            seen_pending: false,
        })
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut needs_redraw = true;

        while self.running {
            if needs_redraw {
                terminal.draw(|frame| frame.render_widget(&mut self, frame.area()))?;
                needs_redraw = false;
            }

            let event = self.events.next().await?;
            needs_redraw = self.handle_event(event)?;
        }

        self.session.teardown();
        Ok(())
    }

    /// Returns whether the screen needs redrawing.
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Tick => Ok(self.tick(Instant::now())),
            Event::Crossterm(event) => match event {
                crossterm::event::Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_events(key_event)?;
                    Ok(true)
                }
                crossterm::event::Event::Resize(_, _) => Ok(true),
                _ => Ok(false),
            },
            Event::App(app_event) => {
                self.handle_app_event(app_event);
                Ok(true)
            }
            Event::Transport(transport_event) => {
                self.session.handle_event(transport_event);
                Ok(true)
            }
        }
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) -> Result<()> {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        match key_event.code {
            KeyCode::Esc => self.events.send(AppEvent::Quit),
            KeyCode::Char('c' | 'C') if ctrl => self.events.send(AppEvent::Quit),
            KeyCode::Char('t' | 'T') if ctrl => self.events.send(AppEvent::ToggleTheme),
            KeyCode::Enter => self.events.send(AppEvent::Submit),
            KeyCode::Backspace => self.session.backspace(),
            KeyCode::Up => self.events.send(AppEvent::ScrollUp),
            KeyCode::Down => self.events.send(AppEvent::ScrollDown),
            KeyCode::PageUp => self.events.send(AppEvent::PageUp),
            KeyCode::PageDown => self.events.send(AppEvent::PageDown),
            KeyCode::End => self.events.send(AppEvent::ScrollToBottom),
            KeyCode::Char(ch) if !ctrl => self.session.push_char(ch),
            _ => {}
        }
        Ok(())
    }

    pub fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::Submit => {
                if self.session.submit_input() {
                    self.follow_tail = true;
                }
            }
            AppEvent::ToggleTheme => self.session.toggle_theme(),
            AppEvent::ScrollUp => {
                self.follow_tail = false;
                self.scroll.scroll_up();
            }
            AppEvent::ScrollDown => self.scroll.scroll_down(),
            AppEvent::PageUp => {
                self.follow_tail = false;
                self.scroll.scroll_page_up();
            }
            AppEvent::PageDown => self.scroll.scroll_page_down(),
            AppEvent::ScrollToBottom => self.follow_tail = true,
            AppEvent::Quit => self.quit(),
        }
    }

    /// Handles the tick event of the terminal. Returns whether anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.session.tick(now);
        if self.session.is_pending() {
            self.throbber.calc_next();
            changed = true;
        }
        changed
    }

    /// Jumps back to the newest message whenever the log grows or the typing
    /// indicator appears or disappears.
    pub fn sync_follow_tail(&mut self) {
        let messages = self.session.messages().len();
        let pending = self.session.is_pending();
        if messages != self.seen_messages || pending != self.seen_pending {
            self.follow_tail = true;
            self.seen_messages = messages;
            self.seen_pending = pending;
        }
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
