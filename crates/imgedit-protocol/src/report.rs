//! Report line grammar and drained command reports

use regex::Regex;
use std::sync::LazyLock;

/// `"> <label> <dot fill> <value>"`, the tool's padded report column format
#[allow(clippy::expect_used)]
static REPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^>\s*([\w\s]+?)\s+\.+\s+(.+)$").expect("report line pattern is valid")
});

/// Parse one trimmed output line into a `(label, value)` pair
///
/// Lines that do not match the grammar yield `None`; the tool pads its
/// columns and mixes prose into the same stream, so non-matching lines are
/// discarded silently rather than treated as errors.
pub fn parse_report_line(line: &str) -> Option<(String, String)> {
    let captures = REPORT_LINE.captures(line)?;
    Some((
        captures[1].trim().to_string(),
        captures[2].trim().to_string(),
    ))
}

/// Ordered label/value pairs accumulated from one command's report lines
///
/// Labels keep first-seen order; a repeated label updates its value in place
/// without reordering. A report may legitimately be empty: the tool signals
/// failure only through its own text, so emptiness is a fact for the caller
/// to interpret, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandReport {
    pairs: Vec<(String, String)>,
}

impl CommandReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pair, updating in place when the label was already seen
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        if let Some(pair) = self.pairs.iter_mut().find(|(l, _)| *l == label) {
            pair.1 = value;
        } else {
            self.pairs.push((label, value));
        }
    }

    /// Look up a value by label
    pub fn get(&self, label: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    /// Labels in first-seen order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(l, _)| l.as_str())
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no line matched the grammar
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
