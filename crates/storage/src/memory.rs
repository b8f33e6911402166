use std::sync::{Mutex, MutexGuard};

use liftlog_domain as domain;
use log::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct State {
    pub imports: Vec<domain::Import>,
    pub daily_sets: Vec<domain::DailySets>,
    pub aliases: Option<String>,
}

/// Keeps all data in memory. Records are kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: Mutex<State>,
}

impl State {
    pub fn replace_daily_sets(
        &mut self,
        daily_sets: domain::DailySets,
    ) -> Result<domain::DailySets, domain::UpdateError> {
        let entry = self
            .daily_sets
            .iter_mut()
            .find(|d| d.id == daily_sets.id)
            .ok_or(domain::UpdateError::NotFound)?;
        entry.clone_from(&daily_sets);
        Ok(daily_sets)
    }

    pub fn delete_daily_sets(
        &mut self,
        id: domain::DailySetsID,
    ) -> Result<domain::DailySetsID, domain::DeleteError> {
        let len = self.daily_sets.len();
        self.daily_sets.retain(|d| d.id != id);
        if self.daily_sets.len() == len {
            return Err(domain::DeleteError::NotFound);
        }
        Ok(id)
    }

    pub fn create_import(
        &mut self,
        import: domain::Import,
        daily_sets: Vec<domain::DailySets>,
    ) -> Result<domain::Import, domain::CreateError> {
        if self.imports.iter().any(|i| i.id == import.id)
            || self
                .daily_sets
                .iter()
                .any(|d| daily_sets.iter().any(|n| n.id == d.id))
        {
            return Err(domain::CreateError::Conflict);
        }

        debug!("storing import {} with {} records", import.id, daily_sets.len());
        self.imports.push(import.clone());
        self.daily_sets.extend(daily_sets);

        Ok(import)
    }

    pub fn delete_import(
        &mut self,
        id: domain::ImportID,
    ) -> Result<domain::ImportID, domain::DeleteError> {
        let len = self.imports.len();
        self.imports.retain(|i| i.id != id);
        if self.imports.len() == len {
            return Err(domain::DeleteError::NotFound);
        }
        self.daily_sets.retain(|d| d.import_id != id);
        Ok(id)
    }

    /// Stores the alias source and replaces the renamed records. Nothing is changed if one of
    /// the records does not exist.
    pub fn write_aliases(
        &mut self,
        source: String,
        renamed: Vec<domain::DailySets>,
    ) -> Result<String, domain::UpdateError> {
        if !renamed
            .iter()
            .all(|r| self.daily_sets.iter().any(|d| d.id == r.id))
        {
            return Err(domain::UpdateError::NotFound);
        }

        for daily_sets in renamed {
            self.replace_daily_sets(daily_sets)?;
        }
        self.aliases = Some(source.clone());

        Ok(source)
    }
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_state(state: State) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, State>, domain::StorageError> {
        self.state
            .lock()
            .map_err(|_| domain::StorageError::Poisoned)
    }
}

impl domain::DailySetsRepository for MemoryStorage {
    fn read_daily_sets(&self) -> Result<Vec<domain::DailySets>, domain::ReadError> {
        Ok(self.lock()?.daily_sets.clone())
    }

    fn replace_daily_sets(
        &self,
        daily_sets: domain::DailySets,
    ) -> Result<domain::DailySets, domain::UpdateError> {
        self.lock()?.replace_daily_sets(daily_sets)
    }

    fn delete_daily_sets(
        &self,
        id: domain::DailySetsID,
    ) -> Result<domain::DailySetsID, domain::DeleteError> {
        self.lock()?.delete_daily_sets(id)
    }
}

impl domain::ImportRepository for MemoryStorage {
    fn read_imports(&self) -> Result<Vec<domain::Import>, domain::ReadError> {
        Ok(self.lock()?.imports.clone())
    }

    fn create_import(
        &self,
        import: domain::Import,
        daily_sets: Vec<domain::DailySets>,
    ) -> Result<domain::Import, domain::CreateError> {
        self.lock()?.create_import(import, daily_sets)
    }

    fn delete_import(&self, id: domain::ImportID) -> Result<domain::ImportID, domain::DeleteError> {
        self.lock()?.delete_import(id)
    }
}

impl domain::AliasRepository for MemoryStorage {
    fn read_aliases(&self) -> Result<String, domain::ReadError> {
        self.lock()?
            .aliases
            .clone()
            .ok_or(domain::ReadError::NotFound)
    }

    fn write_aliases(
        &self,
        source: String,
        renamed: Vec<domain::DailySets>,
    ) -> Result<String, domain::UpdateError> {
        self.lock()?.write_aliases(source, renamed)
    }
}
