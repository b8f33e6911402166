//! The sets string dialect used by persisted records.
//!
//! A sets string consists of weight groups `<set-specs>@<weight>` separated by commas, e.g.
//! `10@65,~8@70,5+1@75,4,5@80,2x3@85`. Without any `@` the whole string is a single group of
//! sets without added weight. A set-spec is `R` or `NxR`, where `R` may be marked as partial by
//! `~` and may consist of multiple `+` separated components that are summed up.

use chrono::NaiveDate;
use log::{debug, warn};

use crate::{IndividualSet, Reps, Weight};

#[derive(Debug, Clone, PartialEq)]
pub enum SetSpec {
    Simple {
        count: u32,
        reps: f64,
        partial: bool,
    },
    Disjoint {
        count: u32,
        components: Vec<f64>,
        partial: bool,
    },
}

impl SetSpec {
    #[must_use]
    pub fn count(&self) -> u32 {
        match self {
            SetSpec::Simple { count, .. } | SetSpec::Disjoint { count, .. } => *count,
        }
    }

    #[must_use]
    pub fn is_partial(&self) -> bool {
        match self {
            SetSpec::Simple { partial, .. } | SetSpec::Disjoint { partial, .. } => *partial,
        }
    }

    /// Sum of all components, each truncated to its integer part (`4.5` counts as 4).
    ///
    /// Saturates at `u32::MAX`, so oversized values are rejected by [`Reps::new`].
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn total_reps(&self) -> u32 {
        match self {
            SetSpec::Simple { reps, .. } => reps.trunc() as u32,
            SetSpec::Disjoint { components, .. } => components
                .iter()
                .fold(0_u32, |sum, c| sum.saturating_add(c.trunc() as u32)),
        }
    }
}

impl TryFrom<&str> for SetSpec {
    type Error = SetSpecError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let partial = value.contains('~');
        let value = value.replace('~', "");

        let (count, reps) = match value.split_once('x') {
            Some((count, reps)) => (
                count
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|count| *count > 0)
                    .ok_or_else(|| SetSpecError::InvalidCount(count.to_string()))?,
                reps,
            ),
            None => (1, value.as_str()),
        };

        let components = reps
            .split('+')
            .map(|r| match r.trim().parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
                _ => Err(SetSpecError::InvalidReps(reps.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(match components.as_slice() {
            [reps] => SetSpec::Simple {
                count,
                reps: *reps,
                partial,
            },
            _ => SetSpec::Disjoint {
                count,
                components,
                partial,
            },
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SetSpecError {
    #[error("invalid number of sets '{0}'")]
    InvalidCount(String),
    #[error("invalid number of reps '{0}'")]
    InvalidReps(String),
}

/// Splits a sets string into `[set-specs, weight, set-specs, weight, ...]`.
///
/// The part before the first `@` always holds set-specs. Every later part is split at its first
/// comma into the weight of the previous group and the set-specs of the next group:
/// `10@65,~8@70,4,5@80` becomes `["10", "65", "~8", "70", "4,5", "80"]`.
#[must_use]
pub fn split_sets_string(sets_string: &str) -> Vec<&str> {
    let mut fragments = sets_string.split('@');
    let mut result = vec![];

    if let Some(first) = fragments.next() {
        result.push(first);
    }

    for fragment in fragments {
        match fragment.split_once(',') {
            Some((weight, set_specs)) => {
                result.push(weight);
                result.push(set_specs);
            }
            None => result.push(fragment),
        }
    }

    result
}

/// Crude structural check of a sets string.
///
/// Strings without `@` are assumed to be valid. Otherwise the number of set-spec lists and
/// weights has to match and the last weight has to be a number. Some malformed strings pass,
/// [`parse_sets`] skips those groups later.
#[must_use]
pub fn is_valid(sets_string: &str) -> bool {
    let sets_string = strip_whitespace(sets_string);

    if !sets_string.contains('@') {
        return true;
    }

    let parts = split_sets_string(&sets_string);

    parts.len() % 2 == 0 && parts.last().is_some_and(|w| w.parse::<f32>().is_ok())
}

/// Expands a sets string into individual sets, in the order they appear.
///
/// Malformed groups are skipped and logged, other groups of the same string are still expanded.
#[must_use]
pub fn parse_sets(exercise: &str, sets_string: &str, date: NaiveDate) -> Vec<IndividualSet> {
    let sets_string = strip_whitespace(sets_string);

    if !sets_string.contains('@') {
        return expand_group(exercise, &sets_string, Weight::BODYWEIGHT, date);
    }

    let parts = split_sets_string(&sets_string);

    if parts.len() % 2 != 0 {
        warn!("unmatched sets and weights: {date}, {exercise}: {sets_string}");
        return vec![];
    }

    let mut result = vec![];

    for pair in parts.chunks_exact(2) {
        let [set_specs, weight] = pair else {
            continue;
        };
        match Weight::try_from(*weight) {
            Ok(weight) => {
                debug!("  {set_specs}@{weight}");
                result.extend(expand_group(exercise, set_specs, weight, date));
            }
            Err(err) => {
                warn!("failed to parse weight '{weight}' ({err}): {date}, {exercise}: {sets_string}");
            }
        }
    }

    result
}

fn expand_group(
    exercise: &str,
    set_specs: &str,
    weight: Weight,
    date: NaiveDate,
) -> Vec<IndividualSet> {
    let mut result = vec![];

    for set_spec in set_specs.split(',') {
        let spec = match SetSpec::try_from(set_spec) {
            Ok(spec) => spec,
            Err(err) => {
                warn!("failed to parse set '{set_spec}' ({err}): {date}, {exercise}");
                continue;
            }
        };

        let reps = match Reps::new(spec.total_reps()) {
            Ok(reps) => reps,
            Err(err) => {
                warn!("suspicious number of reps ({err}): {date}, {exercise}: {set_spec}@{weight}");
                break;
            }
        };

        for _ in 0..spec.count() {
            result.push(IndividualSet {
                exercise: exercise.to_string(),
                reps,
                weight,
                partial_reps: spec.is_partial(),
                date,
            });
        }
    }

    result
}

/// Lays out a sets string with one weight group per line: `2x8@135,6,5@145` becomes
/// `2x8 @ 135\n6,5 @ 145`.
#[must_use]
pub fn format_for_cell(sets_string: &str) -> String {
    let sets_string = strip_whitespace(sets_string);

    if !sets_string.contains('@') {
        return sets_string;
    }

    split_sets_string(&sets_string)
        .chunks(2)
        .map(|pair| match pair {
            [set_specs, weight] => format!("{set_specs} @ {weight}"),
            _ => pair.concat(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}
