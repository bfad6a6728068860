mod app;
mod clock;
mod domain;
mod history;
mod input;
mod logging;
mod notifications;
mod persistence;
mod registry;
mod report;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use history::HistoryStore;
use persistence::{
    ensure_data_dir, history_file, init_local_data_dir, load_settings, save_settings,
    settings_file, AppSettings, JsonFileBackend,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "tempo")]
#[command(about = "A terminal focus timer with per-task countdowns and a completion history", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .tempo directory in the current directory
    Init,
    /// Print the completion history with per-day statistics
    History,
    /// Write the history to task_history_<date>.json
    Export {
        /// Directory to write into. Defaults to the current directory.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete every history record
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let data_dir = init_local_data_dir()?;
        save_settings(settings_file(&data_dir), &AppSettings::default())?;
        println!("Initialized tempo directory: {}", data_dir.display());
        println!();
        println!("Run 'tempo' to start tracking tasks.");
        return Ok(());
    }

    let data_dir = ensure_data_dir()?;
    // Keep the handle alive until exit so buffered records get flushed
    let _logger = match logging::init_logging(&data_dir) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    let mut store = open_history(&data_dir);

    match cli.command {
        Some(Commands::History) => {
            print!("{}", report::generate_summary(&store));
            Ok(())
        }
        Some(Commands::Export { output }) => {
            let dir = match output {
                Some(dir) => dir,
                None => std::env::current_dir().context("Failed to read current directory")?,
            };
            let path = store.export_to(&dir, chrono::Local::now().date_naive())?;
            println!("Exported history to {}", path.display());
            Ok(())
        }
        Some(Commands::Clear { yes }) => {
            let Some(pending) = store.request_clear() else {
                println!("History is already empty");
                return Ok(());
            };
            if !yes {
                println!("{}", pending.prompt());
                println!("Re-run with --yes to confirm.");
                store.confirm_clear(pending, false);
                return Ok(());
            }
            let count = pending.record_count();
            store.confirm_clear(pending, true);
            if let Some(err) = store.take_persist_error() {
                anyhow::bail!("Failed to clear history: {}", err);
            }
            println!("Cleared {} records", count);
            Ok(())
        }
        Some(Commands::Init) | None => run_tui(&data_dir, store),
    }
}

fn open_history(data_dir: &Path) -> HistoryStore {
    HistoryStore::load(Box::new(JsonFileBackend::new(history_file(data_dir))))
}

fn run_tui(data_dir: &Path, history: HistoryStore) -> Result<()> {
    let settings = match load_settings(settings_file(data_dir)) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("using default settings: {:#}", e);
            AppSettings::default()
        }
    };
    let export_dir = std::env::current_dir().unwrap_or_else(|_| data_dir.to_path_buf());
    log::info!("starting tui data_dir={}", data_dir.display());

    let mut app = AppState::new(history, settings, export_dir);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Timers do not survive the session
    app.shutdown();

    if let Err(err) = &result {
        log::error!("tui exited with error: {:#}", err);
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());
    }
}
