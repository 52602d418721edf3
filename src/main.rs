//! scicalc - Terminal Scientific Calculator
//!
//! A scientific calculator with a right-aligned display and a clickable
//! keypad. Supports arithmetic with standard precedence, powers, square
//! roots, logarithms, trigonometry and the constants π and e.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use scicalc::application::{App, AppMode};
use scicalc::domain::CalculatorConfig;
use scicalc::infrastructure::ConfigRepository;
use scicalc::presentation::{render_ui, InputHandler, Theme};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "scicalc", version, about = "Terminal scientific calculator")]
struct Cli {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Decimal places kept when showing evaluated results
    #[arg(long)]
    precision: Option<usize>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write the default configuration to this path and exit
    #[arg(long, value_name = "PATH")]
    init_config: Option<PathBuf>,
}

/// Installs a file-backed subscriber. The terminal belongs to the UI, so
/// nothing is logged unless a log file is given.
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Entry point for the scicalc terminal calculator.
///
/// Loads configuration, sets up the terminal interface and runs the main
/// event loop until the user quits. The terminal is restored even when the
/// event loop fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(path) = cli.log_file.as_deref() {
        init_logging(path)?;
    }

    if let Some(path) = cli.init_config.as_deref() {
        let written = ConfigRepository::save_config(&CalculatorConfig::default(), path)?;
        println!("Wrote default configuration to {written}");
        return Ok(());
    }

    let mut config = match cli.config.as_deref() {
        Some(path) => ConfigRepository::load_config(path)?,
        None => CalculatorConfig::default(),
    };
    if let Some(precision) = cli.precision {
        config.precision = precision;
    }
    info!(precision = config.effective_precision(), "starting scicalc");

    let theme = Theme::from_config(&config.theme);
    let mut app = App::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &theme);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    info!("scicalc exited");
    Ok(())
}

/// Main application event loop.
///
/// Redraws after every event. Quits on 'q' in normal mode or on Ctrl+C.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, theme: &Theme) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app, theme))?;
        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') if matches!(app.mode, AppMode::Normal) => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
            },
            Event::Mouse(mouse) => InputHandler::handle_mouse_event(app, mouse, area),
            _ => {}
        }
    }
}
