use crate::AliasTable;

/// Applied in order, later entries rely on earlier ones (e.g. "hex bar" -> "hexbar" -> "hb").
const REPLACEMENTS: &[(&str, &str)] = &[
    ("-", ""),
    ("’", ""),
    (".", ""),
    (";", ","),
    ("barbell", "bb"),
    ("dumbbell", "db"),
    ("ez bar", "ezbar"),
    ("t bar", "tbar"),
    ("hex bar", "hexbar"),
    ("hexbar", "hb"),
    ("triceps", "tricep"),
    ("tricep", "tri"),
    ("curls", "curl"),
    ("rows", "row"),
    ("ups", "up"),
    ("downs", "down"),
    ("extensions", "extension"),
    ("kickbacks", "kickback"),
    ("raises", "raise"),
    ("hangs", "hang"),
    ("deadlifts", "deadlift"),
];

const SUPERSET_MARKER: &str = " ss";

/// Normalizes the exercise part of a log line, e.g. `<li>bb rows (o) (hyp) ss2 ` -> `bb row`.
#[must_use]
pub fn normalize_exercise_name(fragment: &str) -> String {
    let mut name = fragment.to_lowercase();

    if let Some(idx) = name.find('>') {
        name.replace_range(..=idx, "");
    }

    if let Some(open) = name.find('(') {
        match name.rfind(')') {
            Some(close) if close > open => {
                name.replace_range(open..=close, "");
            }
            _ => name.truncate(open),
        }
    }

    if let Some(idx) = name.find(SUPERSET_MARKER) {
        name.truncate(idx);
    }

    for (from, to) in REPLACEMENTS {
        name = name.replace(from, to);
    }

    name.trim().to_string()
}

/// Normalizes an exercise name and resolves it to its canonical name.
#[must_use]
pub fn parse_exercise(fragment: &str, aliases: &AliasTable) -> String {
    let name = normalize_exercise_name(fragment);
    aliases.resolve(&name).to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::superset("<li>Rear delt rows SS1 ", "rear delt row")]
    #[case::multiple_parentheses("<li>bb rows (o) (hyp) ", "bb row")]
    #[case::parentheses_and_superset("<li>bb rows (o) (hyp) ss2 ", "bb row")]
    #[case::unclosed_parenthesis("<div>pull ups (wide", "pull up")]
    #[case::closing_before_opening("<li>curls) (ez", "curl)")]
    #[case::no_markup("Incline Dumbbell Press", "incline db press")]
    #[case::hex_bar("<li>Hex Bar Deadlifts", "hb deadlift")]
    #[case::triceps("<li>Triceps Extensions", "tri extension")]
    #[case::ez_bar("<li>EZ Bar Curls", "ezbar curl")]
    #[case::t_bar("<li>T-Bar Rows", "tbar row")]
    #[case::punctuation("<li>Lat pull-downs; wide grip.", "lat pulldown, wide grip")]
    #[case::apostrophe("<li>Farmer’s walk", "farmers walk")]
    #[case::empty("<li>", "")]
    #[case::only_parentheses("<li>(warmup)", "")]
    fn test_normalize_exercise_name(#[case] fragment: &str, #[case] expected: &str) {
        assert_eq!(normalize_exercise_name(fragment), expected);
    }

    #[test]
    fn test_parse_exercise() {
        let aliases = AliasTable::parse(".bb bench\nbench press\n");
        assert_eq!(parse_exercise("<li>Bench Press (paused)", &aliases), "bb bench");
        assert_eq!(parse_exercise("<li>Squats", &aliases), "squats");
    }
}
