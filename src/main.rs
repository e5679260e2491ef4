mod clipboard;
mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::Mutex;

use config::AppConfig;
use controller::AppController;
use model::{AppModel, Catalog, ClaimStore, UiState};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::parse();

    if let Err(e) = logging::init_logging(&config.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== lbry-tui starting ===");

    let catalog = Catalog::load(&config.catalog)
        .with_context(|| format!("could not load catalog {}", config.catalog.display()))?;
    tracing::info!(
        catalog = %config.catalog.display(),
        entries = catalog.feed().len(),
        "Catalog loaded"
    );
    let catalog = Arc::new(catalog);

    let store = ClaimStore::new(catalog.clone(), config.resolve_delay());

    let ui_state = UiState {
        display_mode: config.display,
        obscure_nsfw: config.obscure_nsfw,
        show_placeholders: config.placeholders,
        ..UiState::default()
    };
    let model = Arc::new(Mutex::new(AppModel::new(ui_state, config.balance)));

    let controller = AppController::new(model.clone(), store, catalog, Arc::new(config));

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("lbry-tui shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        // Re-derive every entry; fires lazy resolves for the ones that need a record
        controller.sync_feed().await;

        let (ui_state, content_state, draft, subscriptions, should_quit) = {
            let model_guard = model.lock().await;

            // Auto-clear old errors (after 5 seconds)
            model_guard.auto_clear_old_errors().await;

            (
                model_guard.get_ui_state().await,
                model_guard.get_content_state().await,
                model_guard.get_publish_draft().await,
                model_guard.get_subscriptions().await,
                model_guard.should_quit().await,
            )
        };

        let now = Utc::now();
        terminal.draw(|f| {
            AppView::render(f, &ui_state, &content_state, &draft, &subscriptions, now);
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Errors surface through the model's error popup
                let _ = controller.handle_key_event(key).await;
            }
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}
