//! Core types and trait definitions for the prospect tracker.
//!
//! This crate is deliberately free of file-system and terminal dependencies.
//! Persistence goes through [`store::ProspectStore`], reminder delivery
//! through [`reminder::Notifier`]; concrete implementations live elsewhere.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod prospect;
pub mod reminder;
pub mod repository;
pub mod scan;
pub mod store;
pub mod view;

pub use error::{Error, Result};
pub use prospect::Prospect;
pub use repository::{ProspectEvent, Prospects, SaveStatus};
pub use view::{Filter, Sort};
