//! Content Studio - terminal admin client for a schema-driven content API
//!
//! A Ratatui-based TUI for authoring content types and creating or editing
//! entries against them.

mod api;
mod app;
mod cli;
mod config;
mod entry;
mod platform;
mod schema;
mod state;
mod ui;

use anyhow::Result;
use api::{ApiClient, AuthContext};
use app::App;
use cli::Cli;
use config::AppConfig;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "content_studio_tui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse_args();
    let config = AppConfig::load()?.merged_with(cli.overrides());
    if cli.save_config {
        config.save()?;
    }

    let auth = config.api_token.clone().map(AuthContext::bearer);
    let client = ApiClient::new(config.api_base_url(), auth)
        .with_required_flag(config.send_required_flag());
    tracing::info!(base_url = client.base_url(), "starting");

    let mut app = App::new(Arc::new(client), config);
    app.reload_content_types();
    if let Some(content_type_id) = cli.content_type {
        app.open_entry_editor(content_type_id, cli.entry);
    } else if cli.new_type {
        app.open_schema_builder();
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Apply results of finished background requests
        app.drain_events();

        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Press {
                    app.handle_key(key).await?;
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
