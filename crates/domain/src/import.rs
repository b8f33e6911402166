use chrono::NaiveDate;
use log::{debug, warn};

use crate::{
    AliasTable, DailySets, DailySetsID, ImportID, ImportMethod, is_valid, parse_exercise,
    sanitize_sets,
};

/// Result of scanning one log source.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedLog {
    pub id: ImportID,
    pub name: String,
    pub method: ImportMethod,
    pub daily_sets: Vec<DailySets>,
}

impl ImportedLog {
    /// Number of records whose sets string failed validation.
    #[must_use]
    pub fn invalid_count(&self) -> usize {
        self.daily_sets.iter().filter(|d| !d.is_valid).count()
    }
}

/// Extracts the daily sets of an exported workout log.
///
/// The log is expected to have one element per line. Only lines inside `<body>` are considered.
/// A line containing `<h2>` sets the date of the following lines, any other line containing `:`
/// is read as `exercise: sets`:
///
/// ```text
/// <body>
/// <h2>8/6/25</h2>
/// <li>Rear delt rows SS1 : 3x15 at 12.5<br></li>
/// </body>
/// ```
///
/// All records get fresh ids, the id of the import itself is left nil.
#[must_use]
pub fn import_log(content: &str, aliases: &AliasTable, method: ImportMethod) -> ImportedLog {
    let mut daily_sets = vec![];
    let mut in_body = false;
    let mut current_date: Option<NaiveDate> = None;

    for (line_num, raw_line) in content.lines().enumerate() {
        let line_num = line_num + 1;
        let line = raw_line.trim().to_lowercase();

        if line.contains("<body>") {
            in_body = true;
        } else if line.contains("</body>") {
            in_body = false;
        }

        if !in_body {
            continue;
        }

        if line.contains("<h2>") {
            match parse_header_date(&line) {
                Some(date) => {
                    debug!("current date: {date}");
                    current_date = Some(date);
                }
                None => match current_date {
                    Some(date) => {
                        warn!("failed to parse date on line {line_num}, keeping {date}: '{line}'");
                    }
                    None => warn!("failed to parse date on line {line_num}: '{line}'"),
                },
            }
            continue;
        }

        let Some((exercise_part, sets_part)) = line.split_once(':') else {
            continue;
        };

        debug!("(line {line_num}) {line}");

        let Some(date) = current_date else {
            warn!("skipping line {line_num} without preceding date: '{line}'");
            continue;
        };

        let exercise = parse_exercise(exercise_part, aliases);
        let (sets_string, comments) = sanitize_sets(sets_part);

        if sets_string.is_empty() {
            warn!("skipping line {line_num} without sets: '{line}'");
            continue;
        }

        let valid = is_valid(&sets_string);
        if !valid {
            warn!("invalid sets string on line {line_num}: '{line}' ({sets_string})");
        }

        daily_sets.push(DailySets {
            id: DailySetsID::new_v4(),
            exercise,
            date,
            sets_string,
            comments,
            is_valid: valid,
            raw_line: raw_line.trim().to_string(),
            import_id: ImportID::nil(),
        });
    }

    ImportedLog {
        id: ImportID::nil(),
        name: import_name(method, &daily_sets),
        method,
        daily_sets,
    }
}

/// Reads `M/D/Y` from a line like `<h2>8/6/2025 monday</h2>`. Two-digit years are taken as 20xx.
#[must_use]
pub fn parse_header_date(line: &str) -> Option<NaiveDate> {
    let (_, rest) = line.split_once("<h2>")?;
    let rest = rest.split("</h2>").next().unwrap_or_default();
    let date_part = rest.split_whitespace().next()?;

    let mut fields = date_part.split('/').map(|f| f.parse::<i32>().ok());
    let (Some(Some(month)), Some(Some(day)), Some(Some(year)), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return None;
    };

    let year = if year < 2000 { year + 2000 } else { year };

    NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
}

/// Derives the exercise name of a stored log line again, e.g. after the aliases were changed.
#[must_use]
pub fn exercise_of_line(raw_line: &str, aliases: &AliasTable) -> Option<String> {
    let line = raw_line.trim().to_lowercase();
    let (exercise_part, _) = line.split_once(':')?;
    Some(parse_exercise(exercise_part, aliases))
}

fn import_name(method: ImportMethod, daily_sets: &[DailySets]) -> String {
    let first = daily_sets.iter().map(|d| d.date).min();
    let last = daily_sets.iter().map(|d| d.date).max();

    match (first, last) {
        (Some(first), Some(last)) => format!("{method}, {first} to {last}"),
        _ => method.to_string(),
    }
}
