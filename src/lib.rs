pub mod util;
pub mod error;
pub mod config;
pub mod theme;
pub mod transport;
pub mod session;
pub mod render;
pub mod event;
pub mod app;
pub mod ui;

pub use config::ClientConfig;
pub use error::{ChatError, Result};
