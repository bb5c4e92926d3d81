//! One-shot reminders about a prospect.
//!
//! Delivery is delegated to a [`Notifier`]. Submitted reminders are not
//! tracked, cancelled, or queried afterwards.

use std::{future::Future, time::Duration};

use uuid::Uuid;

use crate::{Result, prospect::Prospect};

/// Delay between scheduling a reminder and its delivery.
pub const DEFAULT_REMINDER_DELAY: Duration = Duration::from_secs(5);

// ─── Request ─────────────────────────────────────────────────────────────────

/// A request handed to a [`Notifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
  pub identifier: Uuid,
  pub title:      String,
  pub subtitle:   String,
  pub delay:      Duration,
  pub repeats:    bool,
  pub sound:      bool,
}

impl ReminderRequest {
  /// A fire-once reminder to get in touch with `prospect` after `delay`.
  pub fn for_prospect(prospect: &Prospect, delay: Duration) -> Self {
    Self {
      identifier: Uuid::new_v4(),
      title:      format!("Contact {}", prospect.name),
      subtitle:   prospect.email_address.clone(),
      delay,
      repeats:    false,
      sound:      true,
    }
  }
}

// ─── Notifier ────────────────────────────────────────────────────────────────

/// Whether the notifier may deliver reminders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Authorization {
  #[default]
  NotDetermined,
  Denied,
  Authorized,
}

/// A delivery service for reminders.
pub trait Notifier: Send + Sync {
  fn authorization_status(&self) -> impl Future<Output = Authorization> + Send + '_;

  /// Ask for permission to deliver. Returns `true` if granted.
  fn request_authorization(&self) -> impl Future<Output = bool> + Send + '_;

  /// Queue `request` for delivery after its delay.
  fn add(&self, request: ReminderRequest) -> impl Future<Output = Result<()>> + Send + '_;
}

/// Submit a reminder for `prospect`, asking for authorization first when it
/// has not already been granted.
///
/// Returns the submitted identifier, or `None` when authorization was
/// refused. Refusal is logged and never retried.
pub async fn schedule<N: Notifier>(
  notifier: &N,
  prospect: &Prospect,
  delay: Duration,
) -> Result<Option<Uuid>> {
  let authorized = match notifier.authorization_status().await {
    Authorization::Authorized => true,
    Authorization::NotDetermined | Authorization::Denied => {
      notifier.request_authorization().await
    }
  };

  if !authorized {
    tracing::warn!(prospect = %prospect.id(), "reminder authorization denied");
    return Ok(None);
  }

  let request = ReminderRequest::for_prospect(prospect, delay);
  let identifier = request.identifier;
  notifier.add(request).await?;
  tracing::info!(
    prospect = %prospect.id(),
    reminder = %identifier,
    delay_secs = delay.as_secs(),
    "reminder scheduled"
  );
  Ok(Some(identifier))
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use super::*;

  struct FakeNotifier {
    status:    Authorization,
    grant:     bool,
    requested: Mutex<u32>,
    added:     Mutex<Vec<ReminderRequest>>,
  }

  impl FakeNotifier {
    fn new(status: Authorization, grant: bool) -> Self {
      Self {
        status,
        grant,
        requested: Mutex::new(0),
        added: Mutex::new(Vec::new()),
      }
    }
  }

  impl Notifier for FakeNotifier {
    async fn authorization_status(&self) -> Authorization { self.status }

    async fn request_authorization(&self) -> bool {
      *self.requested.lock().unwrap() += 1;
      self.grant
    }

    async fn add(&self, request: ReminderRequest) -> Result<()> {
      self.added.lock().unwrap().push(request);
      Ok(())
    }
  }

  fn jane() -> Prospect { Prospect::new("Jane Doe", "jane@x.com") }

  #[test]
  fn request_content() {
    let req = ReminderRequest::for_prospect(&jane(), DEFAULT_REMINDER_DELAY);
    assert_eq!(req.title, "Contact Jane Doe");
    assert_eq!(req.subtitle, "jane@x.com");
    assert_eq!(req.delay, Duration::from_secs(5));
    assert!(!req.repeats);
  }

  #[tokio::test]
  async fn authorized_submits_without_asking() {
    let n = FakeNotifier::new(Authorization::Authorized, false);
    let id = schedule(&n, &jane(), DEFAULT_REMINDER_DELAY).await.unwrap();

    let added = n.added.lock().unwrap();
    assert_eq!(added.len(), 1);
    assert_eq!(Some(added[0].identifier), id);
    assert_eq!(*n.requested.lock().unwrap(), 0);
  }

  #[tokio::test]
  async fn undetermined_asks_then_submits_when_granted() {
    let n = FakeNotifier::new(Authorization::NotDetermined, true);
    let id = schedule(&n, &jane(), Duration::from_secs(60)).await.unwrap();

    assert!(id.is_some());
    assert_eq!(*n.requested.lock().unwrap(), 1);
    assert_eq!(n.added.lock().unwrap()[0].delay, Duration::from_secs(60));
  }

  #[tokio::test]
  async fn refused_authorization_submits_nothing() {
    let n = FakeNotifier::new(Authorization::Denied, false);
    let id = schedule(&n, &jane(), DEFAULT_REMINDER_DELAY).await.unwrap();

    assert!(id.is_none());
    assert_eq!(*n.requested.lock().unwrap(), 1);
    assert!(n.added.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn each_reminder_gets_its_own_identifier() {
    let n = FakeNotifier::new(Authorization::Authorized, true);
    let p = jane();
    let a = schedule(&n, &p, DEFAULT_REMINDER_DELAY).await.unwrap();
    let b = schedule(&n, &p, DEFAULT_REMINDER_DELAY).await.unwrap();
    assert_ne!(a, b);
  }
}
