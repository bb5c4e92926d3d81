//! `prospects` — track sales prospects captured from QR codes.
//!
//! # Usage
//!
//! ```
//! prospects                                  # terminal UI
//! prospects list --filter uncontacted --sort desc
//! echo -e "Jane Doe\njane@example.com" | prospects scan
//! prospects toggle <ID>
//! prospects remind <ID> --wait
//! ```

mod app;
mod commands;
mod notifier;
mod scanner;
mod settings;
mod ui;

use std::{
  fs::OpenOptions,
  io::{self, Write},
  path::{Path, PathBuf},
  sync::Mutex,
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use notifier::TimerNotifier;
use prospects_core::{Filter, Prospects, Sort};
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "prospects", version, about = "Track sales prospects captured from QR codes")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", global = true)]
  config: Option<PathBuf>,

  /// Prospect store file (overrides the config file and the default location).
  #[arg(long, value_name = "FILE", global = true)]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Interactive terminal UI (the default).
  Tui,

  /// Print prospects.
  List {
    /// all | contacted | uncontacted
    #[arg(short, long, default_value_t = Filter::All)]
    filter: Filter,

    /// ascending | descending
    #[arg(short, long, default_value_t = Sort::Ascending)]
    sort: Sort,

    /// Emit JSON instead of a table.
    #[arg(long)]
    json: bool,
  },

  /// Add a prospect by hand.
  Add {
    #[arg(long)]
    name:  Option<String>,
    #[arg(long)]
    email: Option<String>,
  },

  /// Add a prospect from a two-line scan payload (name, then email).
  Scan {
    /// The payload; read from stdin when omitted.
    payload: Option<String>,

    /// Use a built-in sample payload instead of a real scan.
    #[arg(long, conflicts_with = "payload")]
    simulate: bool,
  },

  /// Flip a prospect between contacted and uncontacted.
  Toggle { id: Uuid },

  /// Schedule a one-shot reminder to contact a prospect.
  Remind {
    id: Uuid,

    /// Stay running until the reminder fires and print it.
    #[arg(long)]
    wait: bool,
  },

  /// Print the store file location.
  Path,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let settings = Settings::load(args.config.as_deref())?;
  let store = settings.store(args.store.as_deref())?;
  let command = args.command.unwrap_or(Command::Tui);

  let log_file = log_file_for(&command);
  init_tracing(log_file.as_deref())?;
  tracing::info!(path = %store.path().display(), "using prospect store");

  if let Command::Path = command {
    println!("{}", store.path().display());
    return Ok(());
  }

  let mut repo = Prospects::initialize(store).await;
  let (notifier, mut fired) = TimerNotifier::new(settings.notifications.enabled);
  let delay = settings.reminder_delay();

  match command {
    Command::Tui => {
      let mut app = App::new(repo, notifier, fired, delay);
      run_tui(&mut app).await
    }
    Command::List { filter, sort, json } => commands::list(&repo, filter, sort, json),
    Command::Add { name, email } => commands::add(&mut repo, name, email).await,
    Command::Scan { payload, simulate } => {
      let payload = match (payload, simulate) {
        (_, true) => scanner::simulated_payload().to_owned(),
        (Some(payload), false) => payload,
        (None, false) => match scanner::read_stdin_payload() {
          Ok(payload) => payload,
          Err(e) => {
            tracing::error!(error = %e, "scanning failed");
            return Ok(());
          }
        },
      };
      commands::scan(&mut repo, &payload).await
    }
    Command::Toggle { id } => commands::toggle(&mut repo, id).await,
    Command::Remind { id, wait } => {
      commands::remind(&repo, &notifier, &mut fired, id, delay, wait).await
    }
    Command::Path => Ok(()),
  }
}

/// The TUI owns the terminal, so it logs to a file in the data directory.
/// Everything else, or a platform without one, logs to stderr.
fn log_file_for(command: &Command) -> Option<PathBuf> {
  match command {
    Command::Tui => settings::default_log_path(),
    _ => None,
  }
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy();

  match log_file {
    Some(path) => {
      if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
          .with_context(|| format!("creating log directory {}", parent.display()))?;
      }
      let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    }
    None => {
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    }
  }
  Ok(())
}

// ─── Terminal UI ──────────────────────────────────────────────────────────────

async fn run_tui(app: &mut App) -> Result<()> {
  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    app.drain_messages();
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;
    if app.take_bell() {
      let out = terminal.backend_mut();
      out.write_all(b"\x07").and_then(|()| Write::flush(out)).context("ringing bell")?;
    }

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && !app.handle_key(key).await?
    {
      break;
    }
  }

  Ok(())
}
