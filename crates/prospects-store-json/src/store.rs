//! [`JsonFileStore`] — the JSON file implementation of [`ProspectStore`].

use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
};

use prospects_core::{Prospect, store::ProspectStore};
use tokio::io::AsyncWriteExt as _;

use crate::{
  Error, Result,
  encode::{decode_people, encode_people},
};

/// File name of the store inside the application data directory.
pub const STORE_FILE_NAME: &str = "Prospects.json";

/// Directory under the platform data directory that holds application files.
pub const APP_DIR_NAME: &str = "prospects";

/// `<data dir>/prospects/Prospects.json`, e.g.
/// `~/.local/share/prospects/Prospects.json` on Linux.
pub fn default_store_path() -> Result<PathBuf> {
  let data = dirs::data_dir().ok_or(Error::NoDataDir)?;
  Ok(data.join(APP_DIR_NAME).join(STORE_FILE_NAME))
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A prospect store backed by a single JSON file.
///
/// Cloning is cheap; clones refer to the same file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
  path: PathBuf,
}

impl JsonFileStore {
  /// A store at `path`. Nothing is touched on disk until the first save.
  pub fn open(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// A store at [`default_store_path`].
  pub fn default_location() -> Result<Self> {
    Ok(Self::open(default_store_path()?))
  }

  pub fn path(&self) -> &Path { &self.path }
}

/// The sibling file a save writes before renaming over `path`.
pub(crate) fn temp_path(path: &Path) -> PathBuf {
  let name = path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_else(|| STORE_FILE_NAME.to_owned());
  path.with_file_name(format!(".{name}.tmp-{}", std::process::id()))
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    tokio::fs::create_dir_all(parent)
      .await
      .map_err(|e| Error::io(parent, e))?;
  }

  let tmp = temp_path(path);
  let written = write_synced(&tmp, bytes).await;
  let committed = match written {
    Ok(()) => tokio::fs::rename(&tmp, path)
      .await
      .map_err(|e| Error::io(path, e)),
    Err(e) => Err(e),
  };

  if committed.is_err() {
    // The target still holds the previous collection.
    let _ = tokio::fs::remove_file(&tmp).await;
  }
  committed
}

async fn write_synced(tmp: &Path, bytes: &[u8]) -> Result<()> {
  let mut file = create_private(tmp).await?;
  file.write_all(bytes).await.map_err(|e| Error::io(tmp, e))?;
  file.sync_all().await.map_err(|e| Error::io(tmp, e))
}

/// Creates `path` afresh with owner-only permissions (0600 on unix) from the
/// moment it exists. A leftover from an interrupted save is removed first.
pub(crate) async fn create_private(path: &Path) -> Result<tokio::fs::File> {
  match tokio::fs::remove_file(path).await {
    Ok(()) => tracing::debug!(path = %path.display(), "removed stale temporary file"),
    Err(e) if e.kind() == ErrorKind::NotFound => {}
    Err(e) => return Err(Error::io(path, e)),
  }

  let mut options = tokio::fs::OpenOptions::new();
  options.write(true).create_new(true);
  #[cfg(unix)]
  options.mode(0o600);
  options.open(path).await.map_err(|e| Error::io(path, e))
}

// ─── ProspectStore impl ──────────────────────────────────────────────────────

impl ProspectStore for JsonFileStore {
  type Error = Error;

  async fn load(&self) -> Result<Vec<Prospect>> {
    let bytes = match tokio::fs::read(&self.path).await {
      Ok(bytes) => bytes,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        tracing::debug!(path = %self.path.display(), "no saved prospects yet");
        return Ok(Vec::new());
      }
      Err(e) => return Err(Error::io(&self.path, e)),
    };
    decode_people(&bytes)
  }

  async fn save(&self, people: &[Prospect]) -> Result<()> {
    let bytes = encode_people(people)?;
    write_atomic(&self.path, &bytes).await?;
    tracing::debug!(path = %self.path.display(), count = people.len(), "saved prospects");
    Ok(())
  }
}
