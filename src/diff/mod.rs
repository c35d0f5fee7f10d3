//! Word diff: word-level alignment between a baseline and a comparison.
//!
//! DESIGN
//! ======
//! Both inputs are tokenized on word boundaries and each distinct token is
//! interned to an id. The id sequences are aligned with a linear-space Myers
//! search (`myers.rs`), which keeps a longest common subsequence without
//! building an N x M table. Inside each run of changes all removed text is
//! emitted before all added text, and adjacent segments of the same kind are
//! merged, so a changed phrase renders as one removed block followed by one
//! added block.
//!
//! INVARIANTS
//! ==========
//! - Segments whose kind is not `Removed` concatenate to the comparison.
//! - Segments whose kind is not `Added` concatenate to the baseline.
//! - No two adjacent segments share a kind.

mod myers;
pub mod tokenize;

use std::collections::HashMap;

use tokenize::{is_word, tokenize};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Unchanged,
    Added,
    Removed,
}

/// A contiguous run of tokens sharing one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSegment {
    pub text: String,
    pub kind: SegmentKind,
}

impl DiffSegment {
    pub fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self { text: text.into(), kind }
    }
}

/// Word counts per segment kind. Whitespace and punctuation are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub unchanged: usize,
    pub added: usize,
    pub removed: usize,
}

/// Result of [`diff_words`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordDiff {
    segments: Vec<DiffSegment>,
    stats: DiffStats,
}

impl WordDiff {
    #[must_use]
    pub fn segments(&self) -> &[DiffSegment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffSegment> {
        self.segments.iter()
    }

    #[must_use]
    pub fn stats(&self) -> DiffStats {
        self.stats
    }

    /// Rebuild the baseline from unchanged and removed segments.
    #[must_use]
    pub fn baseline(&self) -> String {
        self.collect_except(SegmentKind::Added)
    }

    /// Rebuild the comparison from unchanged and added segments.
    #[must_use]
    pub fn comparison(&self) -> String {
        self.collect_except(SegmentKind::Removed)
    }

    fn collect_except(&self, skip: SegmentKind) -> String {
        self.segments
            .iter()
            .filter(|s| s.kind != skip)
            .map(|s| s.text.as_str())
            .collect()
    }
}

impl IntoIterator for WordDiff {
    type Item = DiffSegment;
    type IntoIter = std::vec::IntoIter<DiffSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a> IntoIterator for &'a WordDiff {
    type Item = &'a DiffSegment;
    type IntoIter = std::slice::Iter<'a, DiffSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

// =============================================================================
// ENTRY POINT
// =============================================================================

/// Diff `comparison` against `baseline` at word granularity.
#[must_use]
pub fn diff_words(baseline: &str, comparison: &str) -> WordDiff {
    let mut out = SegmentBuilder::default();

    if baseline == comparison {
        out.segments.push(DiffSegment::new(SegmentKind::Unchanged, baseline));
        out.stats.unchanged = tokenize(baseline).into_iter().filter(|t| is_word(t)).count();
        return out.finish();
    }

    let old = tokenize(baseline);
    let new = tokenize(comparison);
    let (old_ids, new_ids) = intern(&old, &new);

    for run in myers::align(&old_ids, &new_ids) {
        let tokens = match run.kind {
            SegmentKind::Added => &new[run.range],
            SegmentKind::Unchanged | SegmentKind::Removed => &old[run.range],
        };
        for token in tokens {
            out.push(run.kind, token);
        }
    }

    out.finish()
}

/// Map equal tokens on both sides to the same id.
fn intern<'a>(old: &[&'a str], new: &[&'a str]) -> (Vec<usize>, Vec<usize>) {
    let mut ids: HashMap<&'a str, usize> = HashMap::new();
    let mut id_of = |token: &&'a str| {
        let next = ids.len();
        *ids.entry(*token).or_insert(next)
    };
    let old_ids = old.iter().map(&mut id_of).collect();
    let new_ids = new.iter().map(&mut id_of).collect();
    (old_ids, new_ids)
}

// =============================================================================
// SEGMENTS
// =============================================================================

/// Accumulates tokens into merged segments, holding back removed and added
/// text until the next unchanged token so each change run is ordered
/// removed-then-added.
#[derive(Default)]
struct SegmentBuilder {
    segments: Vec<DiffSegment>,
    removed: String,
    added: String,
    stats: DiffStats,
}

impl SegmentBuilder {
    fn push(&mut self, kind: SegmentKind, token: &str) {
        let word = is_word(token);
        match kind {
            SegmentKind::Removed => {
                self.removed.push_str(token);
                self.stats.removed += usize::from(word);
            }
            SegmentKind::Added => {
                self.added.push_str(token);
                self.stats.added += usize::from(word);
            }
            SegmentKind::Unchanged => {
                self.flush_changes();
                self.stats.unchanged += usize::from(word);
                match self.segments.last_mut() {
                    Some(last) if last.kind == SegmentKind::Unchanged => last.text.push_str(token),
                    _ => self.segments.push(DiffSegment::new(SegmentKind::Unchanged, token)),
                }
            }
        }
    }

    fn flush_changes(&mut self) {
        if !self.removed.is_empty() {
            let text = std::mem::take(&mut self.removed);
            self.segments.push(DiffSegment::new(SegmentKind::Removed, text));
        }
        if !self.added.is_empty() {
            let text = std::mem::take(&mut self.added);
            self.segments.push(DiffSegment::new(SegmentKind::Added, text));
        }
    }

    fn finish(mut self) -> WordDiff {
        self.flush_changes();
        WordDiff { segments: self.segments, stats: self.stats }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
