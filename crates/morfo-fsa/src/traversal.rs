// Matching and perfect hashing over any `Fsa`.

use crate::flags::FsaFlags;
use crate::{Fsa, FsaError};

/// Classification of a [`FsaTraversal::match_into`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// The whole sequence is stored in the automaton.
    ExactMatch,
    /// No arc for the byte at `index`.
    NoMatch,
    /// A stored sequence is a strict prefix of the input; `index` is its length.
    AutomatonHasPrefix,
    /// The input was consumed without reaching a final arc; `node` is where
    /// continuations of the input start.
    SequenceIsAPrefix,
}

impl MatchKind {
    /// Numeric code of the classification.
    pub fn code(self) -> i32 {
        match self {
            MatchKind::ExactMatch => 0,
            MatchKind::NoMatch => -1,
            MatchKind::AutomatonHasPrefix => -3,
            MatchKind::SequenceIsAPrefix => -4,
        }
    }
}

/// Result of a match, reusable across calls.
///
/// The meaning of `index` and `node` depends on `kind`:
///
/// | kind                 | index                      | node                      |
/// |----------------------|----------------------------|---------------------------|
/// | `ExactMatch`         | position of the last byte  | node holding the last arc |
/// | `NoMatch`            | position of the failed byte| node where the arc is missing |
/// | `AutomatonHasPrefix` | length of the stored prefix| `0`                       |
/// | `SequenceIsAPrefix`  | `0`                        | node reached              |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub kind: MatchKind,
    pub index: usize,
    pub node: usize,
}

impl Default for MatchResult {
    fn default() -> Self {
        MatchResult {
            kind: MatchKind::NoMatch,
            index: 0,
            node: 0,
        }
    }
}

impl MatchResult {
    pub fn new(kind: MatchKind, index: usize, node: usize) -> Self {
        MatchResult { kind, index, node }
    }

    #[inline]
    pub fn reset(&mut self, kind: MatchKind, index: usize, node: usize) {
        self.kind = kind;
        self.index = index;
        self.node = node;
    }
}

/// Outcome of [`FsaTraversal::perfect_hash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PerfectHash {
    /// Dense 0-based rank of the sequence among all stored sequences.
    Found(usize),
    NoMatch,
    AutomatonHasPrefix,
    SequenceIsAPrefix,
}

impl PerfectHash {
    pub fn value(self) -> Option<usize> {
        match self {
            PerfectHash::Found(hash) => Some(hash),
            _ => None,
        }
    }

    /// The hash, or the negative [`MatchKind::code`] of the miss.
    pub fn code(self) -> i64 {
        match self {
            PerfectHash::Found(hash) => hash as i64,
            PerfectHash::NoMatch => MatchKind::NoMatch.code() as i64,
            PerfectHash::AutomatonHasPrefix => MatchKind::AutomatonHasPrefix.code() as i64,
            PerfectHash::SequenceIsAPrefix => MatchKind::SequenceIsAPrefix.code() as i64,
        }
    }
}

/// Matching algorithms bound to one automaton.
pub struct FsaTraversal<'a, F: ?Sized> {
    fsa: &'a F,
}

impl<'a, F: Fsa + ?Sized> FsaTraversal<'a, F> {
    pub fn new(fsa: &'a F) -> Self {
        FsaTraversal { fsa }
    }

    /// Match `sequence` starting from `node`, allocating a fresh result.
    pub fn match_sequence(&self, sequence: &[u8], node: usize) -> MatchResult {
        let mut result = MatchResult::default();
        self.match_into(&mut result, sequence, node);
        result
    }

    /// Match `sequence` starting from the root node.
    pub fn match_from_root(&self, sequence: &[u8]) -> MatchResult {
        self.match_sequence(sequence, self.fsa.root_node())
    }

    /// Match `sequence` starting from `node`, writing into `result`.
    ///
    /// A sequence that ends on a non-final arc, or ends exactly at a node
    /// boundary, is reported as [`MatchKind::SequenceIsAPrefix`] without
    /// checking whether that node also completes a stored sequence.
    pub fn match_into(&self, result: &mut MatchResult, sequence: &[u8], node: usize) {
        if node == 0 {
            result.reset(MatchKind::NoMatch, 0, node);
            return;
        }

        let fsa = self.fsa;
        let end = sequence.len();
        let mut node = node;
        for (i, &label) in sequence.iter().enumerate() {
            let arc = fsa.arc(node, label);
            if arc == 0 {
                result.reset(MatchKind::NoMatch, i, node);
                return;
            }

            if fsa.is_arc_final(arc) && i + 1 == end {
                result.reset(MatchKind::ExactMatch, i, node);
                return;
            }

            if fsa.is_arc_terminal(arc) {
                result.reset(MatchKind::AutomatonHasPrefix, i + 1, 0);
                return;
            }

            node = fsa.end_node(arc);
        }

        result.reset(MatchKind::SequenceIsAPrefix, 0, node);
    }

    /// Rank of `sequence` among all sequences stored under `node`.
    ///
    /// Ranks follow arc order, which is label order only when the automaton
    /// was built with sorted arcs. Requires [`FsaFlags::NUMBERS`].
    pub fn perfect_hash(&self, sequence: &[u8], node: usize) -> Result<PerfectHash, FsaError> {
        let fsa = self.fsa;
        if !fsa.flags().contains(FsaFlags::NUMBERS) {
            return Err(FsaError::NumbersUnsupported);
        }
        let Some((&first, _)) = sequence.split_first() else {
            return Err(FsaError::EmptySequence);
        };

        let last = sequence.len() - 1;
        let mut hash = 0usize;
        let mut index = 0;
        let mut label = first;
        let mut arc = fsa.first_arc(node);

        while arc != 0 {
            if fsa.arc_label(arc) == label {
                if fsa.is_arc_final(arc) {
                    if index == last {
                        return Ok(PerfectHash::Found(hash));
                    }
                    hash += 1;
                }

                if fsa.is_arc_terminal(arc) {
                    return Ok(PerfectHash::AutomatonHasPrefix);
                }

                if index == last {
                    return Ok(PerfectHash::SequenceIsAPrefix);
                }

                arc = fsa.first_arc(fsa.end_node(arc));
                index += 1;
                label = sequence[index];
                continue;
            }

            // Everything under a skipped sibling ranks before the match.
            if fsa.is_arc_final(arc) {
                hash += 1;
            }
            if !fsa.is_arc_terminal(arc) {
                hash += fsa.right_language_count(fsa.end_node(arc))?;
            }
            arc = fsa.next_arc(arc);
        }

        Ok(PerfectHash::NoMatch)
    }

    /// [`perfect_hash`](Self::perfect_hash) from the root node.
    pub fn perfect_hash_from_root(&self, sequence: &[u8]) -> Result<PerfectHash, FsaError> {
        self.perfect_hash(sequence, self.fsa.root_node())
    }
}
