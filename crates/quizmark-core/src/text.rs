//! Answer text normalization and similarity.
//!
//! Similarity is the Ratcliff/Obershelp "gestalt" ratio: find the longest
//! common block, recurse on the pieces to its left and right, and report
//! `2 * matched / total_len`. Comparison is per `char` over the normalized
//! strings.

use std::collections::{HashMap, HashSet};

use crate::constants::AUTOJUNK_MIN_LEN;
use crate::numeric::clamp_unit;

/// Trim, lower-case, and collapse runs of whitespace into single spaces.
pub fn normalize_text(value: &str) -> String {
    value
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Similarity ratio in `[0, 1]` between an expected and a submitted answer.
///
/// Returns `0.0` when either raw input is empty. Both strings are normalized
/// with [`normalize_text`] before matching.
pub fn similarity(expected: &str, submitted: &str) -> f64 {
    if expected.is_empty() || submitted.is_empty() {
        return 0.0;
    }
    let a: Vec<char> = normalize_text(expected).chars().collect();
    let b: Vec<char> = normalize_text(submitted).chars().collect();
    clamp_unit(SequenceMatcher::new(&a, &b).ratio())
}

/// A contiguous run where `a[a_start..a_start + len] == b[b_start..b_start + len]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub len: usize,
}

/// Longest-matching-block sequence matcher over two `char` slices.
///
/// When `b` has at least [`AUTOJUNK_MIN_LEN`] elements, characters that
/// occur in more than `len / 100 + 1` positions of `b` are "popular" and are
/// not used to seed a match. They can still be absorbed when a match is
/// extended, which keeps long repetitive answers from degenerating into
/// quadratic scans.
pub struct SequenceMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    b_index: HashMap<char, Vec<usize>>,
}

impl<'a> SequenceMatcher<'a> {
    pub fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &ch) in b.iter().enumerate() {
            b_index.entry(ch).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            let popular: HashSet<char> = b_index
                .iter()
                .filter(|(_, positions)| positions.len() > limit)
                .map(|(&ch, _)| ch)
                .collect();
            for ch in popular {
                b_index.remove(&ch);
            }
        }

        Self { a, b, b_index }
    }

    /// Longest block in `a[a_lo..a_hi]` x `b[b_lo..b_hi]`.
    ///
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    /// A zero-length result means nothing matched.
    pub fn find_longest_match(
        &self,
        a_lo: usize,
        a_hi: usize,
        b_lo: usize,
        b_hi: usize,
    ) -> MatchBlock {
        let (a, b) = (self.a, self.b);
        let mut best_i = a_lo;
        let mut best_j = b_lo;
        let mut best_len = 0usize;

        // run_len[j] = length of the match ending at a[i - 1], b[j]
        let mut run_len: HashMap<usize, usize> = HashMap::new();
        for (i, ch) in a.iter().enumerate().take(a_hi).skip(a_lo) {
            let mut next_run_len: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b_index.get(ch) {
                for &j in positions {
                    if j < b_lo {
                        continue;
                    }
                    if j >= b_hi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_run_len.insert(j, k);
                    if k > best_len {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_len = k;
                    }
                }
            }
            run_len = next_run_len;
        }

        // Grow the block over equal neighbours, including popular characters
        // that were left out of the index.
        while best_i > a_lo && best_j > b_lo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_len += 1;
        }
        while best_i + best_len < a_hi
            && best_j + best_len < b_hi
            && a[best_i + best_len] == b[best_j + best_len]
        {
            best_len += 1;
        }

        MatchBlock {
            a_start: best_i,
            b_start: best_j,
            len: best_len,
        }
    }

    /// All matching blocks, ordered by position.
    pub fn matching_blocks(&self) -> Vec<MatchBlock> {
        let mut blocks = Vec::new();
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
            let block = self.find_longest_match(a_lo, a_hi, b_lo, b_hi);
            if block.len == 0 {
                continue;
            }
            if a_lo < block.a_start && b_lo < block.b_start {
                pending.push((a_lo, block.a_start, b_lo, block.b_start));
            }
            let (a_end, b_end) = (block.a_start + block.len, block.b_start + block.len);
            if a_end < a_hi && b_end < b_hi {
                pending.push((a_end, a_hi, b_end, b_hi));
            }
            blocks.push(block);
        }

        blocks.sort();
        blocks
    }

    /// `2 * matched / (len(a) + len(b))`, or `1.0` when both are empty.
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matched: usize = self.matching_blocks().iter().map(|block| block.len).sum();
        2.0 * matched as f64 / total as f64
    }
}
