use std::fmt;

use chrono::NaiveDate;

use crate::{IndividualSet, Reps, Weight};

/// Compact notation of the sets of one day, e.g. `2x8@200, 6,5@210`.
///
/// Sets are accumulated in the order given. Repeating a set increments the multiplier of the
/// last entry, a set with different reps but the same weight extends the current weight group,
/// and any other set starts a new weight group. A multiplier of 1 is omitted when rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateSets {
    groups: Vec<WeightGroup>,
}

#[derive(Debug, Clone, PartialEq)]
struct WeightGroup {
    weight: Weight,
    entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    multiplier: u32,
    reps: Reps,
}

impl DateSets {
    pub fn push(&mut self, set: &IndividualSet) {
        if let Some(group) = self.groups.last_mut() {
            if group.weight == set.weight {
                match group.entries.last_mut() {
                    Some(entry) if entry.reps == set.reps => entry.multiplier += 1,
                    _ => group.entries.push(Entry {
                        multiplier: 1,
                        reps: set.reps,
                    }),
                }
                return;
            }
        }

        self.groups.push(WeightGroup {
            weight: set.weight,
            entries: vec![Entry {
                multiplier: 1,
                reps: set.reps,
            }],
        });
    }
}

impl<'a> FromIterator<&'a IndividualSet> for DateSets {
    fn from_iter<T: IntoIterator<Item = &'a IndividualSet>>(iter: T) -> Self {
        let mut date_sets = DateSets::default();
        for set in iter {
            date_sets.push(set);
        }
        date_sets
    }
}

impl fmt::Display for DateSets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{group}")?;
        }
        Ok(())
    }
}

impl fmt::Display for WeightGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            if entry.multiplier > 1 {
                write!(f, "{}x", entry.multiplier)?;
            }
            write!(f, "{}", entry.reps)?;
        }
        if !self.weight.is_bodyweight() {
            write!(f, "@{}", self.weight)?;
        }
        Ok(())
    }
}

/// Renders the sets of one date as `"<date>\n<compact notation>"`.
#[must_use]
pub fn build_date_sets_string(date: NaiveDate, sets: &[IndividualSet]) -> String {
    format!("{date}\n{}", sets.iter().collect::<DateSets>())
}

/// Renders the sets of one exercise as a log, one paragraph per date in order of appearance.
#[must_use]
pub fn exercise_log(sets: &[IndividualSet]) -> String {
    sets.chunk_by(|a, b| a.date == b.date)
        .map(|day| build_date_sets_string(day[0].date, day))
        .collect::<Vec<_>>()
        .join("\n\n")
}
