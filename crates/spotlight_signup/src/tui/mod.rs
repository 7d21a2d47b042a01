//! Terminal UI for the signup wizard.

mod chrome;
mod controller;
mod screen;
mod screens;

pub use controller::{ActiveScreen, SignupController};
pub use screen::{Screen, ScreenContext, ScreenTransition};
pub use screens::{CompleteScreen, ContactFocus, ContactFormScreen, GameRegistrationScreen, RegistrationFocus};

use std::io;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use spotlight_wizard::{Catalog, RecordingHooks, Wizard};
use tracing::{error, info};

use crate::CampaignConfig;

/// File the TUI logs to, so log lines do not corrupt the screen.
pub const TUI_LOG_FILE: &str = "spotlight_signup.log";

/// Runs the interactive wizard until the user quits.
pub fn run_tui(campaign: CampaignConfig, catalog: Catalog) -> Result<()> {
    let log_file = std::fs::File::create(TUI_LOG_FILE)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(title = %campaign.title(), games = catalog.len(), "Starting signup TUI");

    let wizard = Wizard::new(catalog, campaign.rules().clone(), RecordingHooks::new());
    let mut controller = SignupController::new(wizard, campaign);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = controller.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Signup loop error");
    }

    let requests = controller.wizard().hooks().requests();
    if !requests.is_empty() {
        info!(count = requests.len(), "Workflow requests made during the session");
    }
    if let Some(game) = controller.wizard().selected_game() {
        println!("Registered {} under {}", game.name(), game.theme().unwrap_or_default());
    }

    res
}
