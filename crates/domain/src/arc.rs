use chrono::{Duration, NaiveDate};

use crate::DailySets;

pub const DEFAULT_SEPARATOR_DAYS: i64 = 30;
pub const DEFAULT_MIN_ARC_LENGTH: usize = 4;

/// Consecutive training days of one exercise without a longer break in between.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseArc {
    pub daily_sets: Vec<DailySets>,
}

impl ExerciseArc {
    #[must_use]
    pub fn len(&self) -> usize {
        self.daily_sets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.daily_sets.is_empty()
    }

    #[must_use]
    pub fn begin(&self) -> Option<NaiveDate> {
        self.daily_sets.first().map(|d| d.date)
    }

    #[must_use]
    pub fn end(&self) -> Option<NaiveDate> {
        self.daily_sets.last().map(|d| d.date)
    }
}

/// Splits date ordered records into arcs. A new arc starts when the gap to the preceding
/// record is at least `separator`.
#[must_use]
pub fn segment_arcs(daily_sets: &[DailySets], separator: Duration) -> Vec<ExerciseArc> {
    let Some((first, rest)) = daily_sets.split_first() else {
        return vec![];
    };

    let mut result = vec![];
    let mut current = vec![first.clone()];
    let mut last = first.date;

    for d in rest {
        if d.date - last >= separator {
            result.push(ExerciseArc {
                daily_sets: std::mem::take(&mut current),
            });
        }
        current.push(d.clone());
        last = d.date;
    }

    result.push(ExerciseArc {
        daily_sets: current,
    });

    result
}

/// Removes all arcs with at most `min_length` records. The most recent arc is always kept.
#[must_use]
pub fn prune_arcs(mut arcs: Vec<ExerciseArc>, min_length: usize) -> Vec<ExerciseArc> {
    let Some(last) = arcs.pop() else {
        return arcs;
    };

    arcs.retain(|a| a.len() > min_length);
    arcs.push(last);
    arcs
}

#[must_use]
pub fn arcs(daily_sets: &[DailySets], separator: Duration, min_length: usize) -> Vec<ExerciseArc> {
    prune_arcs(segment_arcs(daily_sets, separator), min_length)
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{DailySetsID, ImportID};

    fn from_num_days(days: i32) -> NaiveDate {
        NaiveDate::from_num_days_from_ce_opt(days).unwrap()
    }

    fn daily_sets(days: &[i32]) -> Vec<DailySets> {
        days.iter()
            .map(|d| DailySets {
                id: DailySetsID::from(u128::try_from(*d).unwrap()),
                exercise: "bb bench".to_string(),
                date: from_num_days(*d),
                sets_string: "5@100".to_string(),
                comments: String::new(),
                is_valid: true,
                raw_line: String::new(),
                import_id: ImportID::nil(),
            })
            .collect()
    }

    fn days(arcs: &[ExerciseArc]) -> Vec<Vec<i32>> {
        arcs.iter()
            .map(|a| {
                a.daily_sets
                    .iter()
                    .map(|d| d.date.num_days_from_ce())
                    .collect()
            })
            .collect()
    }

    #[rstest]
    #[case::empty(&[], vec![])]
    #[case::single(&[1], vec![vec![1]])]
    #[case::no_gap(&[1, 3, 5, 30], vec![vec![1, 3, 5, 30]])]
    #[case::gap_below_separator(&[1, 30], vec![vec![1, 30]])]
    #[case::gap_equal_to_separator(&[1, 31], vec![vec![1], vec![31]])]
    #[case::gap_from_previous_record(&[1, 20, 40, 60, 100], vec![vec![1, 20, 40, 60], vec![100]])]
    fn test_segment_arcs(#[case] input: &[i32], #[case] expected: Vec<Vec<i32>>) {
        assert_eq!(
            days(&segment_arcs(&daily_sets(input), Duration::days(30))),
            expected
        );
    }

    #[rstest]
    #[case::keeps_last(&[1, 100], vec![vec![100]])]
    #[case::drops_short(&[1, 2, 3, 4, 100, 101, 102, 103, 104, 200], vec![vec![100, 101, 102, 103, 104], vec![200]])]
    #[case::only_last(&[1], vec![vec![1]])]
    #[case::empty(&[], vec![])]
    fn test_arcs(#[case] input: &[i32], #[case] expected: Vec<Vec<i32>>) {
        assert_eq!(
            days(&arcs(
                &daily_sets(input),
                Duration::days(DEFAULT_SEPARATOR_DAYS),
                DEFAULT_MIN_ARC_LENGTH
            )),
            expected
        );
    }

    #[test]
    fn test_segment_arcs_partition() {
        let input = daily_sets(&[1, 2, 40, 41, 42, 100, 129, 160, 161, 300]);
        let separator = Duration::days(30);
        let arcs = segment_arcs(&input, separator);

        assert_eq!(
            arcs.iter()
                .flat_map(|a| a.daily_sets.clone())
                .collect::<Vec<_>>(),
            input
        );

        for arc in &arcs {
            assert!(!arc.is_empty());
            for pair in arc.daily_sets.windows(2) {
                assert!(pair[1].date - pair[0].date < separator);
            }
        }

        for pair in arcs.windows(2) {
            assert!(pair[1].begin().unwrap() - pair[0].end().unwrap() >= separator);
        }
    }

    #[test]
    fn test_exercise_arc_bounds() {
        let arc = ExerciseArc {
            daily_sets: daily_sets(&[5, 9]),
        };
        assert_eq!(arc.len(), 2);
        assert_eq!(arc.begin(), Some(from_num_days(5)));
        assert_eq!(arc.end(), Some(from_num_days(9)));
    }
}
