use std::{
    fs,
    path::{Path, PathBuf},
};

use liftlog_domain::{self as domain, AliasRepository, DailySetsRepository, ImportRepository};
use log::debug;

use crate::{
    dto::Snapshot,
    memory::{MemoryStorage, State},
};

/// Persists all data as a single JSON document.
///
/// The file is read once when opening the store and rewritten on each change. A change that
/// cannot be written is discarded.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    memory: MemoryStorage,
}

impl JsonFileStorage {
    /// Opens the store at `path`. A missing file results in an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, JsonFileError> {
        let path = path.into();

        let memory = if path.exists() {
            debug!("reading {}", path.display());
            let content = fs::read_to_string(&path)?;
            let snapshot: Snapshot = serde_json::from_str(&content)?;
            MemoryStorage::with_state(
                snapshot
                    .try_into()
                    .map_err(|err: domain::ImportMethodError| {
                        JsonFileError::InvalidData(err.to_string())
                    })?,
            )
        } else {
            debug!("{} does not exist yet", path.display());
            MemoryStorage::new()
        };

        Ok(Self { path, memory })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to a copy of the current state and keeps it only if it was written.
    fn change<T, E>(&self, change: impl FnOnce(&mut State) -> Result<T, E>) -> Result<T, E>
    where
        E: From<domain::StorageError>,
    {
        let mut state = self.memory.lock()?;
        let mut changed = state.clone();
        let result = change(&mut changed)?;
        write_snapshot(&self.path, &Snapshot::from(&changed))
            .map_err(|err| domain::StorageError::Other(Box::new(err)))?;
        *state = changed;
        Ok(result)
    }
}

fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), JsonFileError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, serde_json::to_string_pretty(snapshot)?)?;
    fs::rename(&tmp_path, path)?;

    debug!("wrote {}", path.display());

    Ok(())
}

#[derive(thiserror::Error, Debug)]
pub enum JsonFileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl domain::DailySetsRepository for JsonFileStorage {
    fn read_daily_sets(&self) -> Result<Vec<domain::DailySets>, domain::ReadError> {
        self.memory.read_daily_sets()
    }

    fn replace_daily_sets(
        &self,
        daily_sets: domain::DailySets,
    ) -> Result<domain::DailySets, domain::UpdateError> {
        self.change(|state| state.replace_daily_sets(daily_sets))
    }

    fn delete_daily_sets(
        &self,
        id: domain::DailySetsID,
    ) -> Result<domain::DailySetsID, domain::DeleteError> {
        self.change(|state| state.delete_daily_sets(id))
    }
}

impl domain::ImportRepository for JsonFileStorage {
    fn read_imports(&self) -> Result<Vec<domain::Import>, domain::ReadError> {
        self.memory.read_imports()
    }

    fn create_import(
        &self,
        import: domain::Import,
        daily_sets: Vec<domain::DailySets>,
    ) -> Result<domain::Import, domain::CreateError> {
        self.change(|state| state.create_import(import, daily_sets))
    }

    fn delete_import(&self, id: domain::ImportID) -> Result<domain::ImportID, domain::DeleteError> {
        self.change(|state| state.delete_import(id))
    }
}

impl domain::AliasRepository for JsonFileStorage {
    fn read_aliases(&self) -> Result<String, domain::ReadError> {
        self.memory.read_aliases()
    }

    fn write_aliases(
        &self,
        source: String,
        renamed: Vec<domain::DailySets>,
    ) -> Result<String, domain::UpdateError> {
        self.change(|state| state.write_aliases(source, renamed))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::tests::data::{ALIASES, DAILY_SETS, IMPORT, IMPORT_2};

    use super::*;

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::open(dir.path().join("data.json")).unwrap();

        assert!(storage.read_daily_sets().unwrap().is_empty());
        assert!(storage.read_imports().unwrap().is_empty());
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_persist_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");

        {
            let storage = JsonFileStorage::open(&path).unwrap();
            storage
                .create_import(IMPORT.clone(), DAILY_SETS[..2].to_vec())
                .unwrap();
            storage
                .create_import(IMPORT_2.clone(), DAILY_SETS[2..].to_vec())
                .unwrap();
            storage.write_aliases(ALIASES.to_string(), vec![]).unwrap();
            storage.delete_daily_sets(DAILY_SETS[1].id).unwrap();
        }

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let storage = JsonFileStorage::open(&path).unwrap();
        assert_eq!(
            storage.read_imports().unwrap(),
            vec![IMPORT.clone(), IMPORT_2.clone()]
        );
        assert_eq!(
            storage.read_daily_sets().unwrap(),
            vec![DAILY_SETS[0].clone(), DAILY_SETS[2].clone()]
        );
        assert_eq!(storage.read_aliases().unwrap(), ALIASES);

        storage.delete_import(IMPORT.id).unwrap();
        let mut daily_sets = DAILY_SETS[2].clone();
        daily_sets.sets_string = "10@65,8@65".to_string();
        daily_sets.is_valid = true;
        storage.replace_daily_sets(daily_sets.clone()).unwrap();

        let storage = JsonFileStorage::open(&path).unwrap();
        assert_eq!(storage.read_imports().unwrap(), vec![IMPORT_2.clone()]);
        assert_eq!(storage.read_daily_sets().unwrap(), vec![daily_sets]);
    }

    #[test]
    fn test_failed_change_is_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let storage = JsonFileStorage::open(&path).unwrap();

        assert!(matches!(
            storage.delete_import(IMPORT.id),
            Err(domain::DeleteError::NotFound)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_change_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file");
        fs::write(&file, "").unwrap();
        let storage = JsonFileStorage::open(file.join("data.json")).unwrap();

        assert!(matches!(
            storage.create_import(IMPORT.clone(), DAILY_SETS[..2].to_vec()),
            Err(domain::CreateError::Storage(domain::StorageError::Other(_)))
        ));
        assert!(storage.read_imports().unwrap().is_empty());
        assert!(storage.read_daily_sets().unwrap().is_empty());

        assert!(matches!(
            storage.write_aliases(ALIASES.to_string(), vec![]),
            Err(domain::UpdateError::Storage(domain::StorageError::Other(_)))
        ));
        assert!(matches!(
            storage.read_aliases(),
            Err(domain::ReadError::NotFound)
        ));
    }

    #[test]
    fn test_open_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        fs::write(&path, "{").unwrap();
        assert!(matches!(
            JsonFileStorage::open(&path),
            Err(JsonFileError::Json(_))
        ));

        fs::write(
            &path,
            r#"{"imports": [{"id": "00000000-0000-0000-0000-000000000001", "name": "", "method": "CSV"}]}"#,
        )
        .unwrap();
        assert!(matches!(
            JsonFileStorage::open(&path),
            Err(JsonFileError::InvalidData(_))
        ));
    }
}
