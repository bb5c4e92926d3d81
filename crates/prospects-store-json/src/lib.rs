//! JSON file backend for the prospect store.
//!
//! The whole collection lives in one file and is rewritten on every save via
//! a temporary sibling file and an atomic rename.

mod encode;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{APP_DIR_NAME, JsonFileStore, STORE_FILE_NAME, default_store_path};
