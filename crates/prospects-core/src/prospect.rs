//! Prospect — a tracked contact captured from a scan or typed in.
//!
//! The `contacted` flag is readable by anyone but only flipped by
//! [`Prospects::toggle`](crate::repository::Prospects::toggle), so every
//! change to it goes through the persist-then-notify path.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name given to a prospect when none is supplied.
pub const DEFAULT_NAME: &str = "Anonymous";

/// A single contact record.
///
/// Serialised with camelCase keys (`id`, `name`, `emailAddress`,
/// `isContacted`). All four keys are required on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prospect {
  id:                Uuid,
  pub name:          String,
  pub email_address: String,
  is_contacted:      bool,
}

impl Default for Prospect {
  fn default() -> Self {
    Self {
      id:            Uuid::new_v4(),
      name:          DEFAULT_NAME.to_owned(),
      email_address: String::new(),
      is_contacted:  false,
    }
  }
}

impl Prospect {
  /// A fresh, uncontacted prospect with a newly generated id.
  pub fn new(name: impl Into<String>, email_address: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      email_address: email_address.into(),
      ..Self::default()
    }
  }

  pub fn id(&self) -> Uuid { self.id }

  pub fn is_contacted(&self) -> bool { self.is_contacted }

  pub(crate) fn toggle_contacted(&mut self) {
    self.is_contacted = !self.is_contacted;
  }
}
