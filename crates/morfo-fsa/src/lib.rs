//! Compact finite state automaton (FSA) reader.
//!
//! This crate decodes the packed `CFSA2` automaton format used by morphological
//! dictionaries and provides the generic algorithms that run on top of it:
//! matching, perfect hashing, sequence enumeration and whole-automaton visits.
//!
//! # Architecture
//!
//! - [`header`] -- Magic number and version byte parsing
//! - [`flags`] -- Automaton flag word
//! - [`vint`] -- Variable-length integer coding used inside the arc blob
//! - [`cfsa2`] -- Packed binary decoder implementing [`Fsa`]
//! - [`iter`] -- Final-state enumerator (explicit DFS stack)
//! - [`traversal`] -- Matching and perfect hashing
//! - [`visit`] -- Pre-order and post-order state visitors
//! - [`info`] -- Automaton statistics
//!
//! Nodes and arcs are plain byte offsets (`usize`) into the arc blob. Offset
//! `0` doubles as the "no arc" / "no node" sentinel.

use std::io::{self, Read};

pub mod cfsa2;
pub mod flags;
pub mod header;
pub mod info;
pub mod iter;
pub mod traversal;
pub mod visit;
pub mod vint;

#[cfg(any(test, feature = "testing"))]
pub mod fixture;

pub use cfsa2::Cfsa2;
pub use flags::FsaFlags;
pub use header::{FsaHeader, FsaVersion};
pub use iter::{SequenceEnumerator, Sequences, sequences};
pub use traversal::{FsaTraversal, MatchKind, MatchResult, PerfectHash};

/// Error type for automaton loading and traversal.
#[derive(Debug, thiserror::Error)]
pub enum FsaError {
    #[error("invalid magic number in FSA header")]
    InvalidMagic,
    #[error("unexpected end of automaton data")]
    Truncated,
    #[error("unknown automaton version: 0x{0:02x}")]
    UnknownVersion(u8),
    #[error("automaton format {0} is not supported")]
    UnsupportedFormat(FsaVersion),
    #[error("version mismatch: expected {expected}, got {actual}")]
    VersionMismatch {
        expected: FsaVersion,
        actual: FsaVersion,
    },
    #[error("unrecognized flags: 0x{0:04x}")]
    UnrecognizedFlags(u16),
    #[error("corrupt automaton: {0}")]
    Corrupt(String),
    #[error("automaton was not built with right-language counts (NUMBERS)")]
    NumbersUnsupported,
    #[error("input sequence must not be empty")]
    EmptySequence,
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for FsaError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            FsaError::Truncated
        } else {
            FsaError::Io(err)
        }
    }
}

/// Node and arc access over a compiled automaton.
///
/// Every method takes and returns byte offsets into the automaton's backing
/// buffer. Implementations are immutable after construction, so a single
/// instance can be shared by any number of readers.
pub trait Fsa {
    /// Offset of the root node. `0` for an empty automaton.
    fn root_node(&self) -> usize;

    /// Offset of the first arc of `node`.
    fn first_arc(&self, node: usize) -> usize;

    /// Offset of the arc following `arc`, or `0` if `arc` is the node's last arc.
    fn next_arc(&self, arc: usize) -> usize;

    /// Arc of `node` labelled `label`, or `0` if there is none.
    ///
    /// Arcs are not sorted, so this is a linear scan over the node's fan-out.
    fn arc(&self, node: usize, label: u8) -> usize {
        let mut arc = self.first_arc(node);
        while arc != 0 {
            if self.arc_label(arc) == label {
                return arc;
            }
            arc = self.next_arc(arc);
        }
        0
    }

    /// Destination node of a non-terminal arc.
    fn end_node(&self, arc: usize) -> usize;

    /// Label byte carried by `arc`.
    fn arc_label(&self, arc: usize) -> u8;

    /// Whether `arc` completes a stored sequence.
    fn is_arc_final(&self, arc: usize) -> bool;

    /// Whether `arc` has no destination node.
    fn is_arc_terminal(&self, arc: usize) -> bool;

    /// Flags the automaton was compiled with.
    fn flags(&self) -> FsaFlags;

    /// Number of sequences reachable from `node`.
    ///
    /// Only available for automata compiled with [`FsaFlags::NUMBERS`].
    fn right_language_count(&self, _node: usize) -> Result<usize, FsaError> {
        Err(FsaError::NumbersUnsupported)
    }

    /// Number of outgoing arcs of `node`.
    fn arc_count(&self, node: usize) -> usize {
        let mut count = 0;
        let mut arc = self.first_arc(node);
        while arc != 0 {
            count += 1;
            arc = self.next_arc(arc);
        }
        count
    }

    /// Size of the arc blob in bytes, when the representation has one.
    fn size_in_bytes(&self) -> Option<usize> {
        None
    }
}

impl<F: Fsa + ?Sized> Fsa for Box<F> {
    fn root_node(&self) -> usize {
        (**self).root_node()
    }
    fn first_arc(&self, node: usize) -> usize {
        (**self).first_arc(node)
    }
    fn next_arc(&self, arc: usize) -> usize {
        (**self).next_arc(arc)
    }
    fn arc(&self, node: usize, label: u8) -> usize {
        (**self).arc(node, label)
    }
    fn end_node(&self, arc: usize) -> usize {
        (**self).end_node(arc)
    }
    fn arc_label(&self, arc: usize) -> u8 {
        (**self).arc_label(arc)
    }
    fn is_arc_final(&self, arc: usize) -> bool {
        (**self).is_arc_final(arc)
    }
    fn is_arc_terminal(&self, arc: usize) -> bool {
        (**self).is_arc_terminal(arc)
    }
    fn flags(&self) -> FsaFlags {
        (**self).flags()
    }
    fn right_language_count(&self, node: usize) -> Result<usize, FsaError> {
        (**self).right_language_count(node)
    }
    fn size_in_bytes(&self) -> Option<usize> {
        (**self).size_in_bytes()
    }
}

/// Read an automaton from a stream, selecting the decoder from the header's
/// version byte.
///
/// Only [`FsaVersion::Cfsa2`] has a decoder; the legacy `FSA5` and `CFSA`
/// versions are recognized and rejected with [`FsaError::UnsupportedFormat`].
pub fn read<R: Read>(mut reader: R) -> Result<Box<dyn Fsa + Send + Sync>, FsaError> {
    let header = FsaHeader::read(&mut reader)?;
    match header.version {
        FsaVersion::Cfsa2 => Ok(Box::new(Cfsa2::read_body(reader)?)),
        other => Err(FsaError::UnsupportedFormat(other)),
    }
}
