//! Listing wizard - terminal form for business directory listings
//!
//! A Ratatui-based TUI that walks a business owner through a multi-step
//! listing form and submits it to the listing service.

mod api;
mod app;
mod config;
mod listing;
mod platform;
mod state;
mod ui;

use anyhow::Result;
use api::ListingClient;
use app::App;
use clap::Parser;
use config::WizardConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use listing::{BusinessKind, ListingId};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Create or edit a business directory listing
#[derive(Debug, Parser)]
#[command(name = "listing-wizard", version, about)]
struct Cli {
    /// Edit an existing listing instead of creating a new one
    #[arg(long, value_name = "LISTING_ID")]
    edit: Option<ListingId>,

    /// Listing service address (overrides LISTING_SERVICE_ADDRESS and the config file)
    #[arg(long, value_name = "URL")]
    address: Option<String>,

    /// Skip the type picker: product, service or both
    #[arg(long, value_name = "KIND", conflicts_with = "edit")]
    kind: Option<BusinessKind>,

    /// Store --address and --kind as defaults in the config file, then exit
    #[arg(long, conflicts_with = "edit")]
    save_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "listing_wizard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut config = WizardConfig::load().unwrap_or_else(|err| {
        tracing::warn!("ignoring unreadable config: {err:#}");
        WizardConfig::default()
    });
    if cli.save_config {
        config.remember(cli.address.as_deref(), cli.kind);
        let path = config.save()?;
        println!("Saved {}", path.display());
        return Ok(());
    }
    let address = config.resolve_address(cli.address.as_deref());
    let client = ListingClient::new(address, config.connect_timeout()).await;
    tracing::info!(address = client.address(), "listing service client ready");

    let mut app = App::new(Box::new(client), config).await;
    if let Some(id) = cli.edit {
        if let Err(err) = app.open_listing(id).await {
            app.push_error(format!("{err:#}"));
        }
    } else if let Some(kind) = cli.kind {
        app.start_with_kind(kind);
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

    if let Some(id) = app.state.last_submitted {
        println!("{id}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    let poll_duration = std::time::Duration::from_millis(100);
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(poll_duration)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                // Global quit: Ctrl+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return Ok(());
                }

                app.handle_key(key).await?;
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["listing-wizard"]).unwrap();
        assert!(cli.edit.is_none());
        assert!(cli.address.is_none());
        assert!(cli.kind.is_none());
        assert!(!cli.save_config);
    }

    #[test]
    fn test_cli_edit_takes_listing_id() {
        let id = ListingId::new();
        let arg = id.to_string();
        let cli = Cli::try_parse_from(["listing-wizard", "--edit", arg.as_str()]).unwrap();
        assert_eq!(cli.edit, Some(id));
    }

    #[test]
    fn test_cli_rejects_bad_listing_id() {
        assert!(Cli::try_parse_from(["listing-wizard", "--edit", "not-a-uuid"]).is_err());
    }

    #[test]
    fn test_cli_kind() {
        let cli = Cli::try_parse_from(["listing-wizard", "--kind", "both"]).unwrap();
        assert_eq!(cli.kind, Some(BusinessKind::Both));
        assert!(Cli::try_parse_from(["listing-wizard", "--kind", "shop"]).is_err());
    }

    #[test]
    fn test_cli_save_config() {
        let cli = Cli::try_parse_from([
            "listing-wizard",
            "--save-config",
            "--address",
            "http://10.0.0.5:50061",
        ])
        .unwrap();
        assert!(cli.save_config);
        assert_eq!(cli.address.as_deref(), Some("http://10.0.0.5:50061"));
        let id = ListingId::new().to_string();
        let result = Cli::try_parse_from(["listing-wizard", "--save-config", "--edit", id.as_str()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_edit_conflicts_with_kind() {
        let id = ListingId::new().to_string();
        let result =
            Cli::try_parse_from(["listing-wizard", "--edit", id.as_str(), "--kind", "product"]);
        assert!(result.is_err());
    }
}
