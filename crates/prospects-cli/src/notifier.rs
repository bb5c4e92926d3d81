//! In-process reminder delivery backed by tokio timers.

use prospects_core::{
  Error,
  reminder::{Authorization, Notifier, ReminderRequest},
};
use tokio::sync::{Mutex, mpsc};

/// Delivers each reminder on a channel once its delay has elapsed.
///
/// Authorization is granted on request when notifications are enabled in the
/// settings and refused otherwise.
pub struct TimerNotifier {
  enabled: bool,
  status:  Mutex<Authorization>,
  fired:   mpsc::UnboundedSender<ReminderRequest>,
}

impl TimerNotifier {
  pub fn new(enabled: bool) -> (Self, mpsc::UnboundedReceiver<ReminderRequest>) {
    let (fired, rx) = mpsc::unbounded_channel();
    let notifier = Self {
      enabled,
      status: Mutex::new(Authorization::NotDetermined),
      fired,
    };
    (notifier, rx)
  }
}

impl Notifier for TimerNotifier {
  async fn authorization_status(&self) -> Authorization { *self.status.lock().await }

  async fn request_authorization(&self) -> bool {
    let granted = self.enabled;
    *self.status.lock().await = if granted {
      Authorization::Authorized
    } else {
      Authorization::Denied
    };
    granted
  }

  async fn add(&self, request: ReminderRequest) -> prospects_core::Result<()> {
    if self.fired.is_closed() {
      return Err(Error::Notifier("reminder receiver has been dropped".into()));
    }
    let tx = self.fired.clone();
    tokio::spawn(async move {
      tokio::time::sleep(request.delay).await;
      tracing::info!(reminder = %request.identifier, title = %request.title, "reminder fired");
      let _ = tx.send(request);
    });
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use prospects_core::{Prospect, reminder};

  use super::*;

  #[tokio::test]
  async fn delivers_after_delay() {
    let (n, mut rx) = TimerNotifier::new(true);
    let p = Prospect::new("Jane Doe", "jane@x.com");

    let id = reminder::schedule(&n, &p, Duration::from_millis(10))
      .await
      .unwrap()
      .unwrap();
    assert_eq!(n.authorization_status().await, Authorization::Authorized);

    let fired = rx.recv().await.unwrap();
    assert_eq!(fired.identifier, id);
    assert_eq!(fired.title, "Contact Jane Doe");
  }

  #[tokio::test]
  async fn disabled_notifications_refuse_authorization() {
    let (n, mut rx) = TimerNotifier::new(false);
    let p = Prospect::default();

    let id = reminder::schedule(&n, &p, Duration::ZERO).await.unwrap();
    assert!(id.is_none());
    assert_eq!(n.authorization_status().await, Authorization::Denied);
    assert!(rx.try_recv().is_err());
  }

  #[tokio::test]
  async fn closed_receiver_is_an_error() {
    let (n, rx) = TimerNotifier::new(true);
    drop(rx);
    let req = ReminderRequest::for_prospect(&Prospect::default(), Duration::ZERO);
    assert!(n.add(req).await.is_err());
  }
}
