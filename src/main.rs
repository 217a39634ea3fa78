use support_chat_tui::app::App;
use support_chat_tui::{util, ClientConfig};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = ClientConfig::load()?;
    util::log::init(&config.log_dir, config.debug)?;

    let terminal = ratatui::init();
    let result = match App::new(config) {
        Ok(app) => app.run(terminal).await,
        Err(e) => Err(e),
    };
    ratatui::restore();
    result
}
