use std::collections::{BTreeMap, BTreeSet};

use chrono::Duration;
use log::{debug, error, info, warn};

use crate::{
    AliasRepository, AliasTable, CreateError, DailySets, DailySetsID, DailySetsRepository,
    DeleteError, ExerciseArc, Import, ImportID, ImportMethod, ImportRepository, ImportedLog,
    IndividualSet, ReadError, UpdateError, arcs, exercise_log, exercise_of_line, exercise_sets,
    import_log, is_valid, sanitize_sets,
};

pub struct Service<R> {
    repository: R,
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::Poisoned) => {
                    error!("failed to {} {}, storage is unusable: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R> Service<R>
where
    R: DailySetsRepository + ImportRepository + AliasRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Returns the current alias table. Missing or unreadable aliases result in an empty table.
    pub fn get_aliases(&self) -> AliasTable {
        match self.repository.read_aliases() {
            Ok(source) => AliasTable::parse(&source),
            Err(ReadError::NotFound) => {
                debug!("no aliases defined");
                AliasTable::default()
            }
            Err(err) => {
                warn!("failed to read aliases, continuing without aliases: {err}");
                AliasTable::default()
            }
        }
    }

    pub fn get_alias_source(&self) -> Result<String, ReadError> {
        match self.repository.read_aliases() {
            Err(ReadError::NotFound) => Ok(String::new()),
            result => log_on_error!(result, ReadError, "get", "aliases"),
        }
    }

    /// Replaces the alias source and renames all stored records according to the new table.
    ///
    /// The aliases and the renamed records are stored in a single operation. Returns the number
    /// of renamed records.
    pub fn replace_aliases(&self, source: String) -> Result<usize, UpdateError> {
        let aliases = AliasTable::parse(&source);

        let renamed = self
            .read_daily_sets()?
            .into_iter()
            .filter_map(|mut daily_sets| {
                let exercise = exercise_of_line(&daily_sets.raw_line, &aliases)?;
                if exercise == daily_sets.exercise {
                    return None;
                }
                debug!("renaming '{}' to '{exercise}'", daily_sets.exercise);
                daily_sets.exercise = exercise;
                Some(daily_sets)
            })
            .collect::<Vec<_>>();
        let count = renamed.len();

        log_on_error!(
            self.repository.write_aliases(source, renamed),
            UpdateError,
            "replace",
            "aliases"
        )?;

        info!("renamed {count} records");

        Ok(count)
    }

    /// Imports a log and stores it together with all extracted records.
    pub fn import_log(
        &self,
        content: &str,
        method: ImportMethod,
    ) -> Result<ImportedLog, CreateError> {
        let aliases = self.get_aliases();
        let mut imported = import_log(content, &aliases, method);
        imported.id = ImportID::new_v4();
        for daily_sets in &mut imported.daily_sets {
            daily_sets.import_id = imported.id;
        }

        if imported.daily_sets.is_empty() {
            warn!("no sets found in import");
        }

        log_on_error!(
            self.repository.create_import(
                Import {
                    id: imported.id,
                    name: imported.name.clone(),
                    method,
                },
                imported.daily_sets.clone(),
            ),
            CreateError,
            "create",
            "import"
        )?;

        info!(
            "imported {} records ({} invalid)",
            imported.daily_sets.len(),
            imported.invalid_count()
        );

        Ok(imported)
    }

    pub fn get_imports(&self) -> Result<Vec<Import>, ReadError> {
        log_on_error!(self.repository.read_imports(), ReadError, "get", "imports")
    }

    pub fn delete_import(&self, id: ImportID) -> Result<ImportID, DeleteError> {
        log_on_error!(
            self.repository.delete_import(id),
            DeleteError,
            "delete",
            "import"
        )
    }

    pub fn get_exercises(&self) -> Result<BTreeSet<String>, ReadError> {
        Ok(self
            .read_daily_sets()?
            .into_iter()
            .map(|d| d.exercise)
            .collect())
    }

    /// Returns all records of an exercise in chronological order.
    pub fn get_daily_sets_of(&self, exercise: &str) -> Result<Vec<DailySets>, ReadError> {
        let mut daily_sets = self
            .read_daily_sets()?
            .into_iter()
            .filter(|d| d.exercise == exercise)
            .collect::<Vec<_>>();
        daily_sets.sort_by_key(|d| d.date);
        Ok(daily_sets)
    }

    pub fn get_exercise_sets(&self) -> Result<BTreeMap<String, Vec<IndividualSet>>, ReadError> {
        let mut daily_sets = self.read_daily_sets()?;
        daily_sets.sort_by_key(|d| d.date);
        Ok(exercise_sets(&daily_sets))
    }

    pub fn get_exercise_log(&self, exercise: &str) -> Result<String, ReadError> {
        let sets = self
            .get_daily_sets_of(exercise)?
            .iter()
            .flat_map(DailySets::individual_sets)
            .collect::<Vec<_>>();
        Ok(exercise_log(&sets))
    }

    pub fn get_arcs(
        &self,
        exercise: &str,
        separator: Duration,
        min_length: usize,
    ) -> Result<Vec<ExerciseArc>, ReadError> {
        let daily_sets = self.get_daily_sets_of(exercise)?;
        if daily_sets.is_empty() {
            return Err(ReadError::NotFound);
        }
        Ok(arcs(&daily_sets, separator, min_length))
    }

    /// Replaces the sets string of a record. The input is sanitized and validated like an
    /// imported line, comments found in the input replace the previous comments.
    pub fn edit_sets_string(
        &self,
        id: DailySetsID,
        sets_string: &str,
    ) -> Result<DailySets, UpdateError> {
        let mut daily_sets = self
            .read_daily_sets()?
            .into_iter()
            .find(|d| d.id == id)
            .ok_or(UpdateError::NotFound)?;

        let (sanitized, comments) = sanitize_sets(sets_string);
        if sanitized.is_empty() {
            return Err(UpdateError::Other(
                format!("no sets found in '{sets_string}'").into(),
            ));
        }

        daily_sets.is_valid = is_valid(&sanitized);
        if !daily_sets.is_valid {
            warn!("invalid sets string: {sanitized}");
        }
        daily_sets.sets_string = sanitized;
        if !comments.is_empty() {
            daily_sets.comments = comments;
        }

        log_on_error!(
            self.repository.replace_daily_sets(daily_sets),
            UpdateError,
            "replace",
            "daily sets"
        )
    }

    pub fn delete_daily_sets(&self, id: DailySetsID) -> Result<DailySetsID, DeleteError> {
        log_on_error!(
            self.repository.delete_daily_sets(id),
            DeleteError,
            "delete",
            "daily sets"
        )
    }

    fn read_daily_sets(&self) -> Result<Vec<DailySets>, ReadError> {
        log_on_error!(
            self.repository.read_daily_sets(),
            ReadError,
            "get",
            "daily sets"
        )
    }
}
