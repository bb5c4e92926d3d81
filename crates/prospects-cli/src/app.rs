//! Application state machine and event dispatcher.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use prospects_core::{
  Filter, Prospect, ProspectEvent, Prospects, SaveStatus, Sort,
  reminder::{self, ReminderRequest},
  scan,
};
use prospects_store_json::JsonFileStore;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{notifier::TimerNotifier, scanner};

/// Tab order.
pub const FILTERS: [Filter; 3] = [Filter::All, Filter::Contacted, Filter::Uncontacted];

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// The prospect list and its backing store.
  pub repo: Prospects<JsonFileStore>,

  /// Which tab is showing.
  pub filter: Filter,

  pub sort: Sort,

  /// Cursor position within the *visible* list.
  pub list_cursor: usize,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// A fired reminder asked for a sound; the event loop rings once.
  bell: bool,

  notifier:       TimerNotifier,
  reminder_delay: Duration,
  fired:          mpsc::UnboundedReceiver<ReminderRequest>,
  changes:        mpsc::UnboundedReceiver<String>,
}

impl App {
  pub fn new(
    mut repo: Prospects<JsonFileStore>,
    notifier: TimerNotifier,
    fired: mpsc::UnboundedReceiver<ReminderRequest>,
    reminder_delay: Duration,
  ) -> Self {
    let (tx, changes) = mpsc::unbounded_channel();
    repo.subscribe(move |event, people| {
      let _ = tx.send(describe(event, people));
    });

    Self {
      repo,
      filter: Filter::All,
      sort: Sort::Ascending,
      list_cursor: 0,
      status_msg: String::new(),
      bell: false,
      notifier,
      reminder_delay,
      fired,
      changes,
    }
  }

  // ── Visible list ──────────────────────────────────────────────────────────

  pub fn visible(&self) -> Vec<&Prospect> { self.repo.view(self.filter, self.sort) }

  /// The prospect under the cursor, if any.
  pub fn cursor_prospect(&self) -> Option<&Prospect> {
    self.visible().get(self.list_cursor).copied()
  }

  fn clamp_cursor(&mut self) {
    let len = self.visible().len();
    self.list_cursor = self.list_cursor.min(len.saturating_sub(1));
  }

  // ── Background messages ───────────────────────────────────────────────────

  /// Pull repository change notices and fired reminders into the status bar.
  pub fn drain_messages(&mut self) {
    while let Ok(msg) = self.changes.try_recv() {
      self.status_msg = msg;
    }
    while let Ok(request) = self.fired.try_recv() {
      self.status_msg = format!("Reminder: {} ({})", request.title, request.subtitle);
      self.bell |= request.sound;
    }
  }

  /// Whether to ring the terminal bell; clears the request.
  pub fn take_bell(&mut self) -> bool { std::mem::take(&mut self.bell) }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    match key.code {
      KeyCode::Char('q') => return Ok(false),

      // Tabs
      KeyCode::Tab => self.select_filter(next_filter(self.filter, 1)),
      KeyCode::BackTab => self.select_filter(next_filter(self.filter, FILTERS.len() - 1)),
      KeyCode::Char(c @ '1'..='3') => {
        let index = c as usize - '1' as usize;
        self.select_filter(FILTERS[index]);
      }

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.visible().len();
        if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      // Sorting
      KeyCode::Char('s') => {
        self.sort = self.sort.flipped();
        self.status_msg = format!("Sorted {}", self.sort.label());
      }

      // Actions
      KeyCode::Char(' ') | KeyCode::Enter => self.toggle_cursor().await?,
      KeyCode::Char('r') => self.remind_cursor().await?,
      KeyCode::Char('a') => self.simulated_scan().await,

      _ => {}
    }
    Ok(true)
  }

  fn select_filter(&mut self, filter: Filter) {
    self.filter = filter;
    self.list_cursor = 0;
  }

  async fn toggle_cursor(&mut self) -> anyhow::Result<()> {
    let Some(id) = self.cursor_prospect().map(Prospect::id) else {
      return Ok(());
    };
    let status = self.repo.toggle(id).await?;
    log_unsaved(status);
    self.clamp_cursor();
    Ok(())
  }

  /// Schedule a reminder for the prospect under the cursor. Only offered for
  /// uncontacted prospects.
  async fn remind_cursor(&mut self) -> anyhow::Result<()> {
    let Some(prospect) = self.cursor_prospect().filter(|p| !p.is_contacted()) else {
      return Ok(());
    };
    let name = prospect.name.clone();
    let scheduled = reminder::schedule(&self.notifier, prospect, self.reminder_delay).await?;
    if scheduled.is_some() {
      self.status_msg = format!(
        "Reminder for {name} in {}s",
        self.reminder_delay.as_secs()
      );
    }
    Ok(())
  }

  async fn simulated_scan(&mut self) {
    let payload = scanner::simulated_payload();
    match scan::parse(payload) {
      Some(prospect) => log_unsaved(self.repo.add(prospect).await),
      None => self.status_msg = "Scan not recognised".into(),
    }
  }
}

fn next_filter(current: Filter, step: usize) -> Filter {
  let index = FILTERS.iter().position(|f| *f == current).unwrap_or(0);
  FILTERS[(index + step) % FILTERS.len()]
}

fn log_unsaved(status: SaveStatus) {
  if let SaveStatus::Failed(reason) = status {
    tracing::warn!(%reason, "change kept in memory only");
  }
}

fn describe(event: &ProspectEvent, people: &[Prospect]) -> String {
  let name_of = |id: Uuid| {
    people
      .iter()
      .find(|p| p.id() == id)
      .map(|p| p.name.clone())
      .unwrap_or_default()
  };
  match *event {
    ProspectEvent::Added(id) => format!("Added {}", name_of(id)),
    ProspectEvent::Toggled { id, contacted: true } => {
      format!("Marked {} contacted", name_of(id))
    }
    ProspectEvent::Toggled { id, contacted: false } => {
      format!("Marked {} uncontacted", name_of(id))
    }
  }
}
