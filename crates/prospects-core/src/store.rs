//! The `ProspectStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `prospects-store-json`).
//! The repository and the CLI depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::prospect::Prospect;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Whole-collection persistence for prospects.
///
/// There are no partial writes: every `save` replaces the full collection and
/// every `load` returns it in stored order.
pub trait ProspectStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the persisted collection.
  ///
  /// Backends should return an empty collection when nothing has been saved
  /// yet and an error when stored data cannot be read or decoded.
  fn load(&self) -> impl Future<Output = Result<Vec<Prospect>, Self::Error>> + Send + '_;

  /// Replace the persisted collection with `people`.
  ///
  /// A crash part-way through must leave the previous collection readable.
  fn save<'a>(
    &'a self,
    people: &'a [Prospect],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
