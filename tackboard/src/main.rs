//! `Tackboard` — terminal kanban board.
//!
//! Columns and tasks are created with the mouse or keyboard and reordered
//! by dragging. The board is saved in the background after every change
//! and restored on the next start.
//!
//! ```bash
//! cargo run --bin tackboard
//!
//! # Keep the board somewhere else, in the binary format
//! cargo run --bin tackboard -- --data-dir ./board --format postcard
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_appender::non_blocking::WorkerGuard;

use tackboard::app::App;
use tackboard::board::{BoardController, UuidIds};
use tackboard::config::{BoardConfig, CliArgs};
use tackboard::storage::{self, BackgroundWriter, FileStore};
use tackboard::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match BoardConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            BoardConfig::default()
        }
    };
    // Storage flags still apply when the config file was unusable.
    let config = BoardConfig {
        data_dir: cli.data_dir.clone().unwrap_or(config.data_dir),
        format: cli.format.unwrap_or(config.format),
        ..config
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(data_dir = %config.data_dir.display(), format = %config.format, "tackboard starting");

    let store = FileStore::new(&config.data_dir);
    let snapshot = storage::load_snapshot(&store, config.format);
    let (writer, writer_handle) = BackgroundWriter::spawn(store, config.format);
    let board = BoardController::new(snapshot, writer, UuidIds);
    let app = App::new(board)
        .with_column_width(config.column_width)
        .with_drag_threshold(config.drag_threshold);

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app. It owns the writer, so it must be gone before the
    // writer task can finish. The event loop blocks this worker thread.
    let result = tokio::task::block_in_place(|| run_app(&mut terminal, app, &config));

    let restored = restore_terminal(&mut terminal);

    // Flush the last snapshot even if the terminal could not be restored.
    writer_handle.shutdown().await;
    tracing::info!("tackboard exiting");
    result.and(restored)
}

/// Leave raw mode, mouse capture and the alternate screen.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("tackboard.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop. Consumes the app so its snapshot writer is
/// dropped on return.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App<BackgroundWriter>,
    config: &BoardConfig,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| {
            app.resize(frame.area());
            ui::draw(frame, &app);
        })?;

        if event::poll(config.poll_timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key_event(key),
                Event::Mouse(mouse) => app.handle_mouse_event(mouse),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
