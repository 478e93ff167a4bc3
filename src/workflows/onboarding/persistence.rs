use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Durable home for the single serialized form snapshot. The controller
/// owns the only reference; there is no hidden global state.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, SnapshotError>;
    fn save(&self, raw: &str) -> Result<(), SnapshotError>;
    fn clear(&self) -> Result<(), SnapshotError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot storage unavailable: {0}")]
    Unavailable(String),
}

/// One JSON blob at a fixed path. Absent file means "no snapshot".
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<String>, SnapshotError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SnapshotError::Unavailable(err.to_string())),
        }
    }

    fn save(&self, raw: &str) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|err| SnapshotError::Unavailable(err.to_string()))?;
            }
        }
        fs::write(&self.path, raw).map_err(|err| SnapshotError::Unavailable(err.to_string()))
    }

    fn clear(&self) -> Result<(), SnapshotError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SnapshotError::Unavailable(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_file_reads_as_no_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileSnapshotStore::new(dir.path().join("onboarding.json"));
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn save_load_clear_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileSnapshotStore::new(dir.path().join("state/onboarding.json"));

        store.save(r#"{"businessName":"Acme"}"#).expect("save");
        assert_eq!(
            store.load().expect("load").as_deref(),
            Some(r#"{"businessName":"Acme"}"#)
        );

        store.clear().expect("clear");
        assert!(store.load().expect("reload").is_none());
        // Clearing twice stays quiet.
        store.clear().expect("second clear");
    }
}
