//! Program TUI Entry Point
//!
//! Browse the conference program in the terminal.
//!
//! Configuration is read from `~/.config/conference-program/program.toml`.
//! Environment overrides:
//!   PROGRAM_CONFIG              Alternate config file
//!   PROGRAM_SCHEDULE_URL        Schedule endpoint
//!   PROGRAM_TIMEOUT_SECS        HTTP timeout
//!   PROGRAM_COMPACT_BREAKPOINT  Width below which the compact layout is used
//!   PROGRAM_PREAMBLE_URL        Markdown shown under "About"
//!   PROGRAM_TUI_LOG             Log file (logging is off when unset)
//!   RUST_LOG                    Log filter (default `warn`)

use std::env;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use program_core::{load_config, load_config_from_path, ConfigOverrides, ProgramConfig};
use program_tui::App;

/// Filter used when `RUST_LOG` is unset; keeps load-time warnings
const DEFAULT_LOG_FILTER: &str = "warn";

/// The terminal belongs to the UI, so logs go to a file or nowhere
fn init_logging() -> anyhow::Result<()> {
    let file_layer = match env::var_os("PROGRAM_TUI_LOG") {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("cannot open log file {}", PathBuf::from(&path).display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(log_filter())
        .init();
    Ok(())
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn env_overrides() -> ConfigOverrides {
    let mut overrides = ConfigOverrides::new();
    if let Ok(url) = env::var("PROGRAM_SCHEDULE_URL") {
        overrides = overrides.with_schedule_url(url);
    }
    if let Some(secs) = env::var("PROGRAM_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
    {
        overrides = overrides.with_timeout_secs(secs);
    }
    if let Some(columns) = env::var("PROGRAM_COMPACT_BREAKPOINT")
        .ok()
        .and_then(|v| v.parse().ok())
    {
        overrides = overrides.with_compact_breakpoint(columns);
    }
    if let Ok(url) = env::var("PROGRAM_PREAMBLE_URL") {
        overrides = overrides.with_preamble_url(url);
    }
    overrides
}

fn resolve_config() -> anyhow::Result<ProgramConfig> {
    let overrides = env_overrides();
    let config = match env::var_os("PROGRAM_CONFIG") {
        Some(path) => load_config_from_path(Some(PathBuf::from(path)), &overrides)?,
        None => load_config(&overrides)?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    // Configuration errors are reported before the terminal is taken over
    let config = resolve_config().context("invalid configuration")?;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: program-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  • SSH without -t flag");
        eprintln!("  • Piped stdin/stdout");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&config, &mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}

async fn run_app(
    config: &ProgramConfig,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> anyhow::Result<()> {
    let mut app = App::new(config)?;
    app.run(terminal).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_default_filter_keeps_warnings() {
        let filter = EnvFilter::new(DEFAULT_LOG_FILTER);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }
}
