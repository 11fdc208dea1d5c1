use chrono::Utc;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::Identity;

/// Identity persisted between admin console runs
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Restore the saved identity unless it is missing, unreadable or expired
    pub fn load(&self) -> Option<Identity> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Cannot read session file {}: {}", self.path.display(), e);
                return None;
            }
        };

        let identity: Identity = match serde_json::from_str(&data) {
            Ok(identity) => identity,
            Err(e) => {
                warn!("Discarding corrupt session file: {}", e);
                return None;
            }
        };

        if identity.is_expired_at(Utc::now()) {
            debug!("Saved session expired");
            self.clear();
            return None;
        }
        Some(identity)
    }

    pub fn save(&self, identity: &Identity) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let data = serde_json::to_string(identity)?;
        fs::write(&self.path, data)
    }

    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed session file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Cannot remove session file {}: {}", self.path.display(), e),
        }
    }
}
