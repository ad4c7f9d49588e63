use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use minegrid_core::{Snapshot, SnapshotStore, StoreError};

/// Keeps the active session as a JSON file, rewritten after every action.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotStore for FileStore {
    fn load(&mut self) -> Result<Option<Snapshot>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(Snapshot::from_json(&json)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let json = snapshot.to_json()?;
        fs::write(&self.path, json)?;
        log::trace!("Saved session to {}", self.path.display());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minegrid_core::{Session, Settings};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("minegrid-{}-{}.json", std::process::id(), name))
    }

    #[test]
    fn missing_file_loads_nothing() {
        let mut store = FileStore::new(temp_path("missing"));

        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn saves_and_loads_sessions() {
        let path = temp_path("roundtrip");
        let mut store = FileStore::new(&path);
        let mut session = Session::with_seed(Settings::beginner(), 11);
        session.reveal((4, 4)).unwrap();

        store.save(&session.snapshot()).unwrap();
        assert_eq!(store.load().unwrap(), Some(session.snapshot()));

        store.clear().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn garbage_file_is_an_error() {
        let path = temp_path("garbage");
        fs::write(&path, "{ not json").unwrap();
        let mut store = FileStore::new(&path);

        assert!(matches!(store.load(), Err(StoreError::Snapshot(_))));
        store.clear().unwrap();
    }
}
