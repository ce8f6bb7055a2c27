//! [`SearchPatterns`] definition.

use postgres_types::ToSql;

/// `ILIKE` patterns matching any of the words of a search input.
#[derive(Clone, Debug, Eq, PartialEq, ToSql)]
#[postgres(transparent)]
pub struct SearchPatterns(Vec<String>);

impl SearchPatterns {
    /// Creates new [`SearchPatterns`] out of the given `input`, one per
    /// whitespace separated word.
    ///
    /// [`None`] if the `input` is blank.
    #[must_use]
    pub fn new(input: &str) -> Option<Self> {
        let patterns = input
            .split_whitespace()
            .map(|word| {
                let escaped = word
                    .replace('\\', r"\\")
                    .replace('%', r"\%")
                    .replace('_', r"\_");
                format!("%{escaped}%")
            })
            .collect::<Vec<_>>();
        (!patterns.is_empty()).then_some(Self(patterns))
    }
}

#[cfg(test)]
mod spec {
    use super::SearchPatterns;

    #[test]
    fn wraps_each_word() {
        assert_eq!(
            SearchPatterns::new("  kowalski  gmail ").unwrap().0,
            ["%kowalski%", "%gmail%"],
        );
    }

    #[test]
    fn escapes_wildcards() {
        assert_eq!(
            SearchPatterns::new(r"50%_off\").unwrap().0,
            [r"%50\%\_off\\%"],
        );
    }

    #[test]
    fn rejects_blank_input() {
        assert!(SearchPatterns::new(" \t ").is_none());
        assert!(SearchPatterns::new("").is_none());
    }
}
