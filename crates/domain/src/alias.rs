use std::collections::{BTreeMap, BTreeSet};

use log::warn;

/// Mapping from alternative exercise names to the canonical exercise name.
///
/// The table is built from a small text format:
///
/// ```text
/// # comment
/// .bb bench
/// bench
/// bench press
/// ```
///
/// A line starting with `.` starts a new canonical name, which is also an alias of itself.
/// All following lines up to the next `.` line are aliases of that canonical name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable(BTreeMap<String, String>);

impl AliasTable {
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let mut aliases = BTreeMap::new();
        let mut canonical_name: Option<&str> = None;

        for (line_num, line) in source.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(name) = line.strip_prefix('.') {
                let name = name.trim();
                if name.is_empty() {
                    canonical_name = None;
                } else {
                    canonical_name = Some(name);
                    insert(&mut aliases, name, name);
                }
                continue;
            }

            match canonical_name {
                Some(name) => insert(&mut aliases, line, name),
                None => warn!(
                    "ignoring alias without canonical name on line {}: '{line}'",
                    line_num + 1
                ),
            }
        }

        Self(aliases)
    }

    /// Resolves a single level of aliasing. The result is never looked up again.
    #[must_use]
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.0.get(name).map_or(name, String::as_str)
    }

    #[must_use]
    pub fn canonical_names(&self) -> BTreeSet<&str> {
        self.0.values().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn insert(aliases: &mut BTreeMap<String, String>, alias: &str, canonical_name: &str) {
    if let Some(previous) = aliases.insert(alias.to_string(), canonical_name.to_string()) {
        if previous != canonical_name {
            warn!("alias '{alias}' moved from '{previous}' to '{canonical_name}'");
        }
    }
}

#[must_use]
pub fn parse_alias_file(source: &str) -> AliasTable {
    AliasTable::parse(source)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    const SOURCE: &str = "
# Bench variations
.bb bench
bench
bench press

.pull up
pullup
chin up
.
orphan
";

    #[test]
    fn test_parse() {
        let aliases = AliasTable::parse(SOURCE);
        assert_eq!(
            aliases.iter().collect::<Vec<_>>(),
            vec![
                ("bb bench", "bb bench"),
                ("bench", "bb bench"),
                ("bench press", "bb bench"),
                ("chin up", "pull up"),
                ("pull up", "pull up"),
                ("pullup", "pull up"),
            ]
        );
        assert_eq!(
            aliases.canonical_names(),
            BTreeSet::from(["bb bench", "pull up"])
        );
    }

    #[test]
    fn test_parse_replaces_duplicate_alias() {
        let aliases = AliasTable::parse(".a\nx\n.b\nx\n");
        assert_eq!(aliases.resolve("x"), "b");
        assert_eq!(aliases.len(), 3);
    }

    #[rstest]
    #[case("")]
    #[case("# only a comment\n\n")]
    #[case("alias before any canonical name")]
    fn test_parse_empty(#[case] source: &str) {
        assert!(parse_alias_file(source).is_empty());
    }

    #[rstest]
    #[case("bench", "bb bench")]
    #[case("bb bench", "bb bench")]
    #[case("chin up", "pull up")]
    #[case("squat", "squat")]
    #[case("", "")]
    fn test_resolve(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(AliasTable::parse(SOURCE).resolve(name), expected);
    }

    #[test]
    fn test_resolve_does_not_chain() {
        let aliases = AliasTable::parse(".b\na\n.c\nb\n");
        assert_eq!(aliases.resolve("a"), "b");
        assert_eq!(aliases.resolve("b"), "c");
    }
}
