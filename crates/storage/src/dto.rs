use chrono::NaiveDate;
use liftlog_domain as domain;
use uuid::Uuid;

use crate::memory::State;

/// Persisted form of the whole store.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    #[serde(default)]
    pub imports: Vec<Import>,
    #[serde(default)]
    pub daily_sets: Vec<DailySets>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<String>,
}

impl From<&State> for Snapshot {
    fn from(value: &State) -> Self {
        Self {
            imports: value.imports.iter().map(Import::from).collect(),
            daily_sets: value.daily_sets.iter().map(DailySets::from).collect(),
            aliases: value.aliases.clone(),
        }
    }
}

impl TryFrom<Snapshot> for State {
    type Error = domain::ImportMethodError;

    fn try_from(value: Snapshot) -> Result<Self, Self::Error> {
        Ok(Self {
            imports: value
                .imports
                .into_iter()
                .map(domain::Import::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            daily_sets: value
                .daily_sets
                .into_iter()
                .map(domain::DailySets::from)
                .collect(),
            aliases: value.aliases,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub id: Uuid,
    pub name: String,
    pub method: String,
}

impl From<&domain::Import> for Import {
    fn from(value: &domain::Import) -> Self {
        Self {
            id: *value.id,
            name: value.name.clone(),
            method: value.method.to_string(),
        }
    }
}

impl TryFrom<Import> for domain::Import {
    type Error = domain::ImportMethodError;

    fn try_from(value: Import) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: value.name,
            method: domain::ImportMethod::try_from(value.method.as_str())?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DailySets {
    pub id: Uuid,
    pub exercise: String,
    pub date: NaiveDate,
    pub sets_string: String,
    #[serde(default)]
    pub comments: String,
    pub is_valid: bool,
    #[serde(default)]
    pub raw_line: String,
    pub import_id: Uuid,
}

impl From<&domain::DailySets> for DailySets {
    fn from(value: &domain::DailySets) -> Self {
        Self {
            id: *value.id,
            exercise: value.exercise.clone(),
            date: value.date,
            sets_string: value.sets_string.clone(),
            comments: value.comments.clone(),
            is_valid: value.is_valid,
            raw_line: value.raw_line.clone(),
            import_id: *value.import_id,
        }
    }
}

impl From<DailySets> for domain::DailySets {
    fn from(value: DailySets) -> Self {
        Self {
            id: value.id.into(),
            exercise: value.exercise,
            date: value.date,
            sets_string: value.sets_string,
            comments: value.comments,
            is_valid: value.is_valid,
            raw_line: value.raw_line,
            import_id: value.import_id.into(),
        }
    }
}
