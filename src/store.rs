//! Persistence of the user state document.
//!
//! One JSON file holds the whole [`UserState`]; every save overwrites the
//! full document, there is no partial persistence. To avoid leaving a
//! half-written file behind on a crash mid-save, the document is written to
//! a temp file next to the target and renamed into place.
//!
//! Load is forgiving on purpose: a missing, unreadable, or unparsable file
//! is reported and treated as "no stored state" so the caller falls back to
//! first-run initialization instead of dying on a corrupt document.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument, warn};

use crate::error::StoreError;
use crate::state::UserState;

/// File name of the state document inside the data directory.
const STATE_FILE: &str = "usuario.json";

/// Save/load of the full [`UserState`] at a fixed path.
#[derive(Debug, Clone)]
pub struct UserStateStore {
    path: PathBuf,
}

impl UserStateStore {
    /// Store backed by `<data_dir>/usuario.json`. The directory is created
    /// on first save.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(STATE_FILE),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize and persist the full state, overwriting prior contents.
    ///
    /// On failure the in-memory state is untouched and the prior on-disk
    /// document is either intact or fully replaced, never truncated.
    #[instrument(level = "info", skip_all, fields(path = %self.path.display()))]
    pub async fn save(&self, state: &UserState) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await?;
        }
        let json = serde_json::to_string_pretty(state)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;

        info!(articles = state.len(), "Saved user state");
        Ok(())
    }

    /// Load the stored state, or `None` when there is none to load.
    ///
    /// Both "file does not exist" and "file exists but cannot be read or
    /// parsed" end up as `None`; the latter is logged so the corruption is
    /// visible.
    #[instrument(level = "info", skip_all, fields(path = %self.path.display()))]
    pub async fn load(&self) -> Option<UserState> {
        let body = match fs::read_to_string(&self.path).await {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No stored user state");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read user state; treating as first run");
                return None;
            }
        };
        match serde_json::from_str::<UserState>(&body) {
            Ok(state) => {
                info!(articles = state.len(), name = %state.display_name, "Loaded user state");
                Some(state)
            }
            Err(e) => {
                warn!(error = %e, "Stored user state is unparsable; treating as first run");
                None
            }
        }
    }
}
