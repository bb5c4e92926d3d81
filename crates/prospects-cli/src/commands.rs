//! One-shot subcommands.

use std::time::Duration;

use anyhow::{Context as _, Result, bail};
use prospects_core::{
  Filter, Prospect, Prospects, SaveStatus, Sort, reminder,
  scan, store::ProspectStore,
};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::notifier::TimerNotifier;

/// Print the filtered, sorted list.
pub fn list<S: ProspectStore>(
  repo: &Prospects<S>,
  filter: Filter,
  sort: Sort,
  json: bool,
) -> Result<()> {
  let shown = repo.view(filter, sort);
  if json {
    println!(
      "{}",
      serde_json::to_string_pretty(&shown).context("serialising prospects")?
    );
    return Ok(());
  }

  println!("{} ({})", filter.title(), sort.label());
  for p in shown {
    println!("{}", format_row(p));
  }
  Ok(())
}

pub fn format_row(p: &Prospect) -> String {
  let marker = if p.is_contacted() { "[x]" } else { "[ ]" };
  format!("{marker} {}  {:<24} {}", p.id(), p.name, p.email_address)
}

pub async fn add<S: ProspectStore>(
  repo: &mut Prospects<S>,
  name: Option<String>,
  email: Option<String>,
) -> Result<()> {
  let mut prospect = Prospect::default();
  if let Some(name) = name {
    prospect.name = name;
  }
  if let Some(email) = email {
    prospect.email_address = email;
  }
  let id = prospect.id();
  report_save(repo.add(prospect).await);
  println!("{id}");
  Ok(())
}

/// Add the prospect encoded in `payload`. A malformed payload adds nothing
/// and is not an error.
pub async fn scan<S: ProspectStore>(repo: &mut Prospects<S>, payload: &str) -> Result<()> {
  let Some(prospect) = scan::parse(payload) else {
    tracing::info!("scan payload is not two lines; nothing added");
    return Ok(());
  };
  let id = prospect.id();
  report_save(repo.add(prospect).await);
  println!("{id}");
  Ok(())
}

pub async fn toggle<S: ProspectStore>(repo: &mut Prospects<S>, id: Uuid) -> Result<()> {
  report_save(repo.toggle(id).await?);
  if let Some(p) = repo.get(id) {
    println!("{}", format_row(p));
  }
  Ok(())
}

/// Schedule a reminder for an uncontacted prospect, optionally waiting for
/// it to fire.
pub async fn remind<S: ProspectStore>(
  repo: &Prospects<S>,
  notifier: &TimerNotifier,
  fired: &mut mpsc::UnboundedReceiver<reminder::ReminderRequest>,
  id: Uuid,
  delay: Duration,
  wait: bool,
) -> Result<()> {
  let Some(prospect) = repo.get(id) else {
    bail!("prospect not found: {id}");
  };
  if prospect.is_contacted() {
    bail!("{} has already been contacted", prospect.name);
  }

  let Some(reminder_id) = reminder::schedule(notifier, prospect, delay).await? else {
    return Ok(());
  };
  println!("{reminder_id}");

  if wait && let Some(request) = fired.recv().await {
    println!("{}", announce(&request));
  }
  Ok(())
}

/// The line printed when a reminder fires, led by a bell if it asks for sound.
fn announce(request: &reminder::ReminderRequest) -> String {
  let bell = if request.sound { "\x07" } else { "" };
  format!("{bell}{}: {}", request.title, request.subtitle)
}

fn report_save(status: SaveStatus) {
  if let SaveStatus::Failed(reason) = status {
    tracing::warn!(%reason, "change kept in memory only");
  }
}
