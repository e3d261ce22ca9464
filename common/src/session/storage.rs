use crate::errors::StorageError;
use crate::logger::Logger;
use crate::types::identity::Identity;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// JSON file holding the signed-in identity between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
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

    /// A missing file is a guest session.
    pub fn load(&self) -> Result<Identity, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Identity::Guest),
            Err(e) => Err(e.into()),
        }
    }

    pub fn load_or_guest(&self, logger: &Logger) -> Identity {
        self.load().unwrap_or_else(|e| {
            logger.warn(format!(
                "Ignoring session file {}: {e}",
                self.path.display()
            ));
            Identity::Guest
        })
    }

    /// Writes to a sibling temp file and renames it over the old one.
    pub fn save(&self, identity: &Identity) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(identity)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
