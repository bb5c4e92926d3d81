//! [`Prospects`] — the authoritative in-memory prospect list.
//!
//! Every mutation saves the whole list through the [`ProspectStore`] and then
//! notifies observers, in that order. Mutating methods take `&mut self`, so
//! a repository has exactly one writer; share it behind a lock if more than
//! one task needs to mutate it.

use uuid::Uuid;

use crate::{
  Error, Result,
  prospect::Prospect,
  store::ProspectStore,
  view::{self, Filter, Sort},
};

// ─── Events ──────────────────────────────────────────────────────────────────

/// What changed in the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProspectEvent {
  Added(Uuid),
  Toggled { id: Uuid, contacted: bool },
}

/// Outcome of the save attempted after a mutation.
///
/// A failed save is logged and leaves the in-memory list as the source of
/// truth; nothing is rolled back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
  Persisted,
  Failed(String),
}

impl SaveStatus {
  pub fn is_persisted(&self) -> bool { matches!(self, Self::Persisted) }
}

type Observer = Box<dyn FnMut(&ProspectEvent, &[Prospect]) + Send>;

// ─── Repository ──────────────────────────────────────────────────────────────

/// The prospect list plus its backing store and observers.
pub struct Prospects<S> {
  store:     S,
  people:    Vec<Prospect>,
  observers: Vec<Observer>,
}

impl<S: ProspectStore> Prospects<S> {
  /// Load the persisted list from `store`.
  ///
  /// Any load error is logged and the repository starts empty.
  pub async fn initialize(store: S) -> Self {
    let people = match store.load().await {
      Ok(people) => {
        tracing::debug!(count = people.len(), "loaded prospects");
        people
      }
      Err(e) => {
        tracing::warn!(error = %e, "could not load prospects; starting empty");
        Vec::new()
      }
    };
    Self {
      store,
      people,
      observers: Vec::new(),
    }
  }

  /// All prospects in insertion order.
  pub fn people(&self) -> &[Prospect] { &self.people }

  pub fn get(&self, id: Uuid) -> Option<&Prospect> {
    self.people.iter().find(|p| p.id() == id)
  }

  pub fn len(&self) -> usize { self.people.len() }

  pub fn is_empty(&self) -> bool { self.people.is_empty() }

  pub fn store(&self) -> &S { &self.store }

  /// The filtered, sorted view of the current list.
  pub fn view(&self, filter: Filter, sort: Sort) -> Vec<&Prospect> {
    view::project(&self.people, filter, sort)
  }

  /// Register `observer` to run after every mutation, once the save has been
  /// attempted. Observers run in registration order.
  pub fn subscribe(
    &mut self,
    observer: impl FnMut(&ProspectEvent, &[Prospect]) + Send + 'static,
  ) {
    self.observers.push(Box::new(observer));
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Append `prospect`, save, and notify. No deduplication is performed.
  pub async fn add(&mut self, prospect: Prospect) -> SaveStatus {
    let id = prospect.id();
    self.people.push(prospect);
    let status = self.save().await;
    self.notify(ProspectEvent::Added(id));
    status
  }

  /// Flip the contacted flag of the prospect with `id`, save, and notify.
  ///
  /// Returns [`Error::ProspectNotFound`] without saving or notifying when no
  /// such prospect exists.
  pub async fn toggle(&mut self, id: Uuid) -> Result<SaveStatus> {
    let prospect = self
      .people
      .iter_mut()
      .find(|p| p.id() == id)
      .ok_or(Error::ProspectNotFound(id))?;
    prospect.toggle_contacted();
    let contacted = prospect.is_contacted();

    let status = self.save().await;
    self.notify(ProspectEvent::Toggled { id, contacted });
    Ok(status)
  }

  async fn save(&self) -> SaveStatus {
    match self.store.save(&self.people).await {
      Ok(()) => SaveStatus::Persisted,
      Err(e) => {
        tracing::error!(error = %e, count = self.people.len(), "unable to save prospects");
        SaveStatus::Failed(e.to_string())
      }
    }
  }

  fn notify(&mut self, event: ProspectEvent) {
    for observer in &mut self.observers {
      observer(&event, &self.people);
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{Arc, Mutex};

  use super::*;

  #[derive(Debug, thiserror::Error)]
  #[error("{0}")]
  struct FakeError(&'static str);

  /// Records every saved collection; can be told to fail loads or saves.
  #[derive(Default)]
  struct RecordingStore {
    initial:    Vec<Prospect>,
    fail_load:  bool,
    fail_save:  bool,
    saves:      Arc<Mutex<Vec<Vec<Prospect>>>>,
  }

  impl ProspectStore for RecordingStore {
    type Error = FakeError;

    async fn load(&self) -> Result<Vec<Prospect>, FakeError> {
      if self.fail_load {
        return Err(FakeError("corrupt"));
      }
      Ok(self.initial.clone())
    }

    async fn save(&self, people: &[Prospect]) -> Result<(), FakeError> {
      if self.fail_save {
        return Err(FakeError("disk full"));
      }
      self.saves.lock().unwrap().push(people.to_vec());
      Ok(())
    }
  }

  impl RecordingStore {
    fn save_count(&self) -> usize { self.saves.lock().unwrap().len() }

    fn last_save(&self) -> Vec<Prospect> {
      self.saves.lock().unwrap().last().cloned().unwrap_or_default()
    }
  }

  async fn repo_with(names: &[&str]) -> Prospects<RecordingStore> {
    let store = RecordingStore {
      initial: names.iter().map(|n| Prospect::new(*n, "")).collect(),
      ..Default::default()
    };
    Prospects::initialize(store).await
  }

  // ─── Initialization ──────────────────────────────────────────────────────

  #[tokio::test]
  async fn initialize_uses_loaded_people() {
    let repo = repo_with(&["Ann", "Bob"]).await;
    assert_eq!(repo.len(), 2);
    assert_eq!(repo.people()[1].name, "Bob");
  }

  #[tokio::test]
  async fn load_failure_starts_empty() {
    let store = RecordingStore {
      initial: vec![Prospect::default()],
      fail_load: true,
      ..Default::default()
    };
    let repo = Prospects::initialize(store).await;
    assert!(repo.is_empty());
  }

  // ─── Add ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn add_appends_and_persists() {
    let mut repo = repo_with(&["Ann"]).await;
    let p = Prospect::new("Zed", "zed@x.com");

    let status = repo.add(p.clone()).await;

    assert!(status.is_persisted());
    assert_eq!(repo.len(), 2);
    assert_eq!(repo.people().last(), Some(&p));
    assert_eq!(repo.store().save_count(), 1);
    assert_eq!(repo.store().last_save(), repo.people());
  }

  #[tokio::test]
  async fn add_accepts_duplicates() {
    let mut repo = repo_with(&[]).await;
    repo.add(Prospect::new("Ann", "a@x.com")).await;
    repo.add(Prospect::new("Ann", "a@x.com")).await;
    assert_eq!(repo.len(), 2);
  }

  #[tokio::test]
  async fn failed_save_keeps_memory_state() {
    let store = RecordingStore {
      fail_save: true,
      ..Default::default()
    };
    let mut repo = Prospects::initialize(store).await;

    let status = repo.add(Prospect::new("Ann", "")).await;

    assert_eq!(status, SaveStatus::Failed("disk full".into()));
    assert_eq!(repo.len(), 1);
  }

  // ─── Toggle ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn toggle_flips_only_the_target() {
    let mut repo = repo_with(&["Ann", "Bob", "Cid"]).await;
    let before = repo.people().to_vec();
    let id = before[1].id();

    let status = repo.toggle(id).await.unwrap();

    assert!(status.is_persisted());
    assert!(repo.get(id).unwrap().is_contacted());
    assert_eq!(repo.people()[0], before[0]);
    assert_eq!(repo.people()[2], before[2]);
    assert_eq!(repo.store().save_count(), 1);
    assert!(repo.store().last_save()[1].is_contacted());
  }

  #[tokio::test]
  async fn toggle_twice_restores() {
    let mut repo = repo_with(&["Ann"]).await;
    let id = repo.people()[0].id();
    repo.toggle(id).await.unwrap();
    repo.toggle(id).await.unwrap();
    assert!(!repo.get(id).unwrap().is_contacted());
    assert_eq!(repo.store().save_count(), 2);
  }

  #[tokio::test]
  async fn toggle_unknown_id_is_an_error() {
    let mut repo = repo_with(&["Ann"]).await;
    let notified = Arc::new(Mutex::new(0));
    let counter = notified.clone();
    repo.subscribe(move |_, _| *counter.lock().unwrap() += 1);

    let missing = Uuid::new_v4();
    let err = repo.toggle(missing).await.unwrap_err();

    assert!(matches!(err, Error::ProspectNotFound(id) if id == missing));
    assert_eq!(repo.store().save_count(), 0);
    assert_eq!(*notified.lock().unwrap(), 0);
  }

  // ─── Observers ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn observers_run_after_save() {
    let mut repo = repo_with(&[]).await;
    let saves = repo.store().saves.clone();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();
    repo.subscribe(move |event, people| {
      let persisted = saves.lock().unwrap().last().cloned();
      log.lock().unwrap().push((*event, people.len(), persisted));
    });

    let p = Prospect::new("Ann", "");
    let id = p.id();
    repo.add(p).await;
    repo.toggle(id).await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].0, ProspectEvent::Added(id));
    assert_eq!(seen[0].1, 1);
    assert_eq!(seen[0].2.as_deref().map(<[Prospect]>::len), Some(1));
    assert_eq!(seen[1].0, ProspectEvent::Toggled { id, contacted: true });
    assert!(seen[1].2.as_ref().unwrap()[0].is_contacted());
  }

  #[tokio::test]
  async fn observers_are_notified_even_when_save_fails() {
    let store = RecordingStore {
      fail_save: true,
      ..Default::default()
    };
    let mut repo = Prospects::initialize(store).await;
    let count = Arc::new(Mutex::new(0));
    let c = count.clone();
    repo.subscribe(move |_, _| *c.lock().unwrap() += 1);

    repo.add(Prospect::default()).await;
    assert_eq!(*count.lock().unwrap(), 1);
  }

  #[tokio::test]
  async fn view_delegates_to_projection() {
    let mut repo = repo_with(&["Bob", "Ann", "Cid"]).await;
    let bob = repo.people()[0].id();
    repo.toggle(bob).await.unwrap();

    let names: Vec<_> = repo
      .view(Filter::Uncontacted, Sort::Ascending)
      .iter()
      .map(|p| p.name.as_str())
      .collect();
    assert_eq!(names, ["Ann", "Cid"]);
  }
}
