//! Disabled-entry detection in raw upstream text
//!
//! Chart authors often ship optional settings commented out:
//!
//! ```yaml
//! # replicas: 3
//! ## -- nodeSelector: {}
//! ```
//!
//! Such keys never reach the parsed tree. Best-effort only: the match is on
//! the last path segment, so a disabled key of the same name at another
//! level also counts, and unusual comment styles are missed.

use std::collections::HashMap;

use hvm_values::KeyPath;
use regex::Regex;

/// Comment prefixes searched for anywhere in the text once the line scan fails
const DISABLED_PREFIXES: [&str; 4] = ["#", "# ", "## ", "# -- "];

/// Whether the last segment of `path` appears as a disabled entry in `source`
///
/// First scans line by line for a trimmed line made of one or more `#`, an
/// optional `--` marker, then `name:`. Falls back to a substring search of
/// the whole text for `#name:`, `# name:`, `## name:` or `# -- name:`.
#[must_use]
pub fn is_disabled_in_source(source: &str, path: &KeyPath) -> bool {
    path.last()
        .is_some_and(|name| has_disabled_line(source, name) || has_disabled_token(source, name))
}

fn has_disabled_line(source: &str, name: &str) -> bool {
    let Ok(pattern) = Regex::new(&format!(r"^#+\s*(?:--\s*)?{}\s*:", regex::escape(name))) else {
        return false;
    };
    source.lines().any(|line| pattern.is_match(line.trim()))
}

fn has_disabled_token(source: &str, name: &str) -> bool {
    DISABLED_PREFIXES
        .iter()
        .any(|prefix| source.contains(&format!("{prefix}{name}:")))
}

/// Memoized [`is_disabled_in_source`] over one upstream text
///
/// Answers depend only on the last path segment, so they are cached per key
/// name for the duration of a run.
#[derive(Debug)]
pub struct CommentIndex<'a> {
    source: &'a str,
    answers: HashMap<String, bool>,
}

impl<'a> CommentIndex<'a> {
    /// Index over `source`
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            answers: HashMap::new(),
        }
    }

    /// Whether `path` is disabled in the indexed text
    pub fn is_disabled(&mut self, path: &KeyPath) -> bool {
        let Some(name) = path.last() else {
            return false;
        };
        if let Some(&known) = self.answers.get(name) {
            return known;
        }
        let answer = is_disabled_in_source(self.source, path);
        self.answers.insert(name.to_string(), answer);
        answer
    }
}
