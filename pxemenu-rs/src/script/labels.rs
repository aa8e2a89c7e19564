//! Label block splitter.
//!
//! A script is partitioned into named blocks, one per `:name` marker.  Each
//! block holds the marker line itself followed by every non-blank line up to
//! the next marker.  Blank lines are dropped everywhere; lines before the
//! first marker belong to no block.

use std::collections::BTreeMap;

use serde::Serialize;

use super::directive::label_name;

/// A named run of script lines, marker line first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelBlock {
    pub name: String,
    pub lines: Vec<String>,
}

impl LabelBlock {
    /// Lines after the marker.
    pub fn body(&self) -> &[String] {
        self.lines.get(1..).unwrap_or(&[])
    }
}

/// Label name → block.
pub type LabelMap = BTreeMap<String, LabelBlock>;

/// Split `lines` into label blocks.
///
/// Lines are right-trimmed.  When a name occurs twice, the later block
/// replaces the earlier one.
pub fn split_labels<S: AsRef<str>>(lines: &[S]) -> LabelMap {
    let mut labels = LabelMap::new();
    let mut current: Option<LabelBlock> = None;

    for raw in lines {
        let line = raw.as_ref().trim_end();
        if line.is_empty() {
            continue;
        }
        if let Some(name) = label_name(line) {
            if let Some(done) = current.take() {
                labels.insert(done.name.clone(), done);
            }
            current = Some(LabelBlock { name: name.to_owned(), lines: vec![line.to_owned()] });
        } else if let Some(block) = current.as_mut() {
            block.lines.push(line.to_owned());
        }
    }
    if let Some(done) = current {
        labels.insert(done.name.clone(), done);
    }
    labels
}

/// Lines before the first label marker (blank lines included).
pub fn preamble<S: AsRef<str>>(lines: &[S]) -> impl Iterator<Item = &str> {
    lines
        .iter()
        .map(|l| l.as_ref())
        .take_while(|l| label_name(l.trim_end()).is_none())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
