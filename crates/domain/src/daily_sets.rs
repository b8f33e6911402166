use chrono::NaiveDate;
use derive_more::{Deref, Display};
use uuid::Uuid;

use crate::{CreateError, DeleteError, IndividualSet, ReadError, UpdateError, parse_sets};

pub trait DailySetsRepository {
    fn read_daily_sets(&self) -> Result<Vec<DailySets>, ReadError>;
    fn replace_daily_sets(&self, daily_sets: DailySets) -> Result<DailySets, UpdateError>;
    fn delete_daily_sets(&self, id: DailySetsID) -> Result<DailySetsID, DeleteError>;
}

pub trait ImportRepository {
    fn read_imports(&self) -> Result<Vec<Import>, ReadError>;
    /// Stores an import together with all of its records.
    fn create_import(
        &self,
        import: Import,
        daily_sets: Vec<DailySets>,
    ) -> Result<Import, CreateError>;
    /// Deletes an import and all records belonging to it.
    fn delete_import(&self, id: ImportID) -> Result<ImportID, DeleteError>;
}

pub trait AliasRepository {
    /// Returns the alias source text, [`ReadError::NotFound`] if none was stored yet.
    fn read_aliases(&self) -> Result<String, ReadError>;
    /// Stores the alias source together with the records renamed by it.
    fn write_aliases(&self, source: String, renamed: Vec<DailySets>)
    -> Result<String, UpdateError>;
}

/// The sets of one exercise on one day, as written on a single log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySets {
    pub id: DailySetsID,
    pub exercise: String,
    pub date: NaiveDate,
    pub sets_string: String,
    pub comments: String,
    pub is_valid: bool,
    pub raw_line: String,
    pub import_id: ImportID,
}

impl DailySets {
    #[must_use]
    pub fn individual_sets(&self) -> Vec<IndividualSet> {
        if !self.is_valid {
            return vec![];
        }
        parse_sets(&self.exercise, &self.sets_string, self.date)
    }
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct DailySetsID(Uuid);

impl DailySetsID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for DailySetsID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for DailySetsID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// One imported log source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub id: ImportID,
    pub name: String,
    pub method: ImportMethod,
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ImportID(Uuid);

impl ImportID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for ImportID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ImportID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImportMethod {
    #[default]
    #[display("HTML")]
    Html,
    #[display("Apple Notes")]
    AppleNotes,
}

impl TryFrom<&str> for ImportMethod {
    type Error = ImportMethodError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "html" => Ok(ImportMethod::Html),
            "apple notes" | "apple-notes" => Ok(ImportMethod::AppleNotes),
            _ => Err(ImportMethodError::Unknown(value.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImportMethodError {
    #[error("unknown import method '{0}'")]
    Unknown(String),
}
