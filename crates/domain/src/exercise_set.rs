use std::{collections::BTreeMap, fmt};

use chrono::NaiveDate;
use log::{debug, warn};

use crate::{DailySets, Reps, Weight, parse_sets};

/// A single performed set.
///
/// One [`DailySets`] record expands into one or more individual sets:
/// `2x10@135, 8,7@145` becomes `10@135, 10@135, 8@145, 7@145`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndividualSet {
    pub exercise: String,
    pub reps: Reps,
    pub weight: Weight,
    pub partial_reps: bool,
    pub date: NaiveDate,
}

impl IndividualSet {
    /// `reps@weight`, or only the reps for sets without added weight.
    #[must_use]
    pub fn simple_str(&self) -> String {
        if self.weight.is_bodyweight() {
            self.reps.to_string()
        } else {
            format!("{}@{}", self.reps, self.weight)
        }
    }
}

impl fmt::Display for IndividualSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.exercise, self.simple_str(), self.date)
    }
}

/// Expands all valid records into individual sets, grouped by exercise.
#[must_use]
pub fn exercise_sets<'a>(
    daily_sets: impl IntoIterator<Item = &'a DailySets>,
) -> BTreeMap<String, Vec<IndividualSet>> {
    let mut result: BTreeMap<String, Vec<IndividualSet>> = BTreeMap::new();

    for d in daily_sets.into_iter().filter(|d| d.is_valid) {
        debug!("daily sets: {}, {}, {}", d.exercise, d.date, d.sets_string);
        let sets = parse_sets(&d.exercise, &d.sets_string, d.date);

        if sets.is_empty() {
            continue;
        }

        if sets.len() > 6 {
            warn!(
                "more than 6 sets on {} for {}: {}",
                d.date, d.exercise, d.sets_string
            );
        }

        result.entry(d.exercise.clone()).or_default().extend(sets);
    }

    result
}
