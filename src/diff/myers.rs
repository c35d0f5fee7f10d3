//! Linear-space Myers alignment over interned token ids.
//!
//! Divide and conquer on the middle snake: memory is O(N + M) and time is
//! O((N + M) * D), where D is the number of edited tokens. Common prefixes
//! and suffixes are peeled off at every level before searching.

use std::ops::{Index, IndexMut, Range};

use super::SegmentKind;

/// One aligned run. `Unchanged` and `Removed` ranges index the baseline,
/// `Added` ranges index the comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Run {
    pub kind: SegmentKind,
    pub range: Range<usize>,
}

/// Align `old` against `new`, returning runs in document order.
pub(super) fn align(old: &[usize], new: &[usize]) -> Vec<Run> {
    let bound = max_d(old.len(), new.len());
    let mut search = Search {
        old,
        new,
        forward: Frontier::new(bound),
        backward: Frontier::new(bound),
        runs: Vec::new(),
    };
    search.conquer(0..old.len(), 0..new.len());
    search.runs
}

/// Upper bound on the edit distance explored from either end.
fn max_d(n: usize, m: usize) -> usize {
    (n + m).div_ceil(2) + 1
}

fn common_prefix(a: &[usize], b: &[usize]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[usize], b: &[usize]) -> usize {
    a.iter().rev().zip(b.iter().rev()).take_while(|(x, y)| x == y).count()
}

fn signed(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}

// =============================================================================
// FRONTIER
// =============================================================================

/// Furthest-reaching x per diagonal `k`, indexed from `-bound` to `bound`.
struct Frontier {
    offset: isize,
    reach: Vec<isize>,
}

impl Frontier {
    fn new(bound: usize) -> Self {
        Self { offset: signed(bound), reach: vec![0; 2 * bound + 1] }
    }
}

impl Index<isize> for Frontier {
    type Output = isize;

    fn index(&self, k: isize) -> &isize {
        &self.reach[(k + self.offset).unsigned_abs()]
    }
}

impl IndexMut<isize> for Frontier {
    fn index_mut(&mut self, k: isize) -> &mut isize {
        &mut self.reach[(k + self.offset).unsigned_abs()]
    }
}

// =============================================================================
// SEARCH
// =============================================================================

struct Search<'a> {
    old: &'a [usize],
    new: &'a [usize],
    forward: Frontier,
    backward: Frontier,
    runs: Vec<Run>,
}

impl Search<'_> {
    fn emit(&mut self, kind: SegmentKind, range: Range<usize>) {
        if !range.is_empty() {
            self.runs.push(Run { kind, range });
        }
    }

    fn conquer(&mut self, mut old: Range<usize>, mut new: Range<usize>) {
        let prefix = common_prefix(&self.old[old.clone()], &self.new[new.clone()]);
        self.emit(SegmentKind::Unchanged, old.start..old.start + prefix);
        old.start += prefix;
        new.start += prefix;

        let suffix = common_suffix(&self.old[old.clone()], &self.new[new.clone()]);
        let tail = old.end - suffix..old.end;
        old.end -= suffix;
        new.end -= suffix;

        if old.is_empty() || new.is_empty() {
            self.emit(SegmentKind::Removed, old);
            self.emit(SegmentKind::Added, new);
        } else if let Some((x, y)) = self.middle_snake(&old, &new) {
            self.conquer(old.start..x, new.start..y);
            self.conquer(x..old.end, y..new.end);
        } else {
            self.emit(SegmentKind::Removed, old);
            self.emit(SegmentKind::Added, new);
        }

        self.emit(SegmentKind::Unchanged, tail);
    }

    /// Split point of an optimal path through `old` x `new`, found by running
    /// the greedy search from both corners until the frontiers overlap.
    /// Both ranges must be non-empty with no common prefix or suffix.
    fn middle_snake(&mut self, old: &Range<usize>, new: &Range<usize>) -> Option<(usize, usize)> {
        let n = signed(old.len());
        let m = signed(new.len());
        let delta = n - m;
        let odd = delta & 1 == 1;
        let d_max = signed(max_d(old.len(), new.len()));

        self.forward[1] = 0;
        self.backward[1] = 0;

        for d in 0..d_max {
            for k in (-d..=d).rev().step_by(2) {
                let mut x = if k == -d || (k != d && self.forward[k - 1] < self.forward[k + 1]) {
                    self.forward[k + 1]
                } else {
                    self.forward[k - 1] + 1
                };
                let y = x - k;
                let (x0, y0) = (x, y);
                if x < n && (0..m).contains(&y) {
                    let a = &self.old[old.start + x.unsigned_abs()..old.end];
                    let b = &self.new[new.start + y.unsigned_abs()..new.end];
                    x += signed(common_prefix(a, b));
                }
                self.forward[k] = x;
                if odd && (k - delta).abs() < d && x + self.backward[delta - k] >= n {
                    return split(old, new, x0, y0);
                }
            }

            for k in (-d..=d).rev().step_by(2) {
                let mut x = if k == -d || (k != d && self.backward[k - 1] < self.backward[k + 1]) {
                    self.backward[k + 1]
                } else {
                    self.backward[k - 1] + 1
                };
                let mut y = x - k;
                if x < n && (0..m).contains(&y) {
                    let a = &self.old[old.start..old.end - x.unsigned_abs()];
                    let b = &self.new[new.start..new.end - y.unsigned_abs()];
                    let advance = signed(common_suffix(a, b));
                    x += advance;
                    y += advance;
                }
                self.backward[k] = x;
                if !odd && (k - delta).abs() <= d && x + self.forward[delta - k] >= n {
                    return split(old, new, n - x, m - y);
                }
            }
        }
        None
    }
}

/// Convert a local split point to absolute indices. Points that would not
/// shrink the problem are rejected so recursion always terminates.
fn split(old: &Range<usize>, new: &Range<usize>, x: isize, y: isize) -> Option<(usize, usize)> {
    let n = signed(old.len());
    let m = signed(new.len());
    if !(0..=n).contains(&x) || !(0..=m).contains(&y) {
        return None;
    }
    if (x, y) == (0, 0) || (x, y) == (n, m) {
        return None;
    }
    Some((old.start + x.unsigned_abs(), new.start + y.unsigned_abs()))
}
