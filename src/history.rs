//! Parsing of revision history output.
//!
//! A history command prints one revision per line: the revision identifier,
//! a run of whitespace, then the comment. Lines that do not have both parts
//! are logged and skipped.

use std::sync::LazyLock;

use log::warn;
use regex::Regex;
use serde::Serialize;

use crate::defaults::IMPLEMENTATION_NAME;

/// One entry of a revision history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisionHistoryItem {
    pub revision: String,
    pub comment: String,
}

impl RevisionHistoryItem {
    pub fn new(revision: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            revision: revision.into(),
            comment: comment.into(),
        }
    }
}

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n").expect("valid line break regex"));

static FIELD_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid separator regex"));

/// Parse raw history output into `(revision, comment)` items.
///
/// The comment keeps its internal whitespace and may be empty when the
/// revision is only followed by whitespace. Blank lines are ignored; lines
/// with no whitespace after the revision are dropped with a warning.
pub fn parse_history(output: &str) -> Vec<RevisionHistoryItem> {
    let mut history = Vec::new();
    for line in LINE_BREAK.split(output) {
        let line = line.trim_start();
        if line.is_empty() {
            continue;
        }
        let mut fields = FIELD_SEPARATOR.splitn(line, 2);
        match (fields.next(), fields.next()) {
            (Some(revision), Some(comment)) => {
                history.push(RevisionHistoryItem::new(revision, comment));
            }
            _ => warn!(
                "{}: History item returned less than 2 items, ignoring [{}].",
                IMPLEMENTATION_NAME, line
            ),
        }
    }
    history
}
