// Enumeration of every sequence reachable from a node.

use crate::Fsa;

/// Initial stack depth; both buffers grow by this much when exhausted.
const EXPECTED_MAX_STATES: usize = 15;

/// Depth-first enumerator over the right language of a node.
///
/// Holds only the DFS stack, not the automaton: every call takes the automaton
/// by reference, so one enumerator can be kept next to a shared automaton
/// handle and restarted for each query without reallocating.
///
/// ```
/// # use morfo_fsa::{Cfsa2, Fsa, SequenceEnumerator};
/// // {"ab", "ac"}
/// let data = [
///     0x5c, 0x66, 0x73, 0x61, 0xc6, 0x00, 0x07, 0x00,
///     0xc0, b'^', 0xc0, b'a', 0x20, b'b', 0x00, 0x60, b'c', 0x00,
/// ];
/// let fsa = Cfsa2::from_bytes(&data)?;
/// let mut seqs = SequenceEnumerator::new();
/// seqs.restart_from(&fsa, fsa.root_node());
/// let mut found = Vec::new();
/// while let Some(seq) = seqs.next_sequence(&fsa) {
///     found.push(seq.to_vec());
/// }
/// assert_eq!(found, [b"ab", b"ac"]);
/// # Ok::<(), morfo_fsa::FsaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SequenceEnumerator {
    /// Current arc at each depth; `0` once a level is exhausted.
    arcs: Vec<usize>,
    /// Label chosen at each depth.
    buffer: Vec<u8>,
    /// Number of live stack entries.
    position: usize,
}

impl Default for SequenceEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceEnumerator {
    /// Create an enumerator with nothing to enumerate until
    /// [`restart_from`](Self::restart_from) is called.
    pub fn new() -> Self {
        Self {
            arcs: vec![0; EXPECTED_MAX_STATES],
            buffer: vec![0; EXPECTED_MAX_STATES],
            position: 0,
        }
    }

    /// Create an enumerator positioned at `node`.
    pub fn from_node<F: Fsa + ?Sized>(fsa: &F, node: usize) -> Self {
        let mut it = Self::new();
        it.restart_from(fsa, node);
        it
    }

    /// Restart the enumeration at `node`, reusing the existing buffers.
    /// Node `0` yields nothing.
    pub fn restart_from<F: Fsa + ?Sized>(&mut self, fsa: &F, node: usize) {
        self.position = 0;
        if node != 0 {
            self.push_node(fsa, node);
        }
    }

    /// Produce the next sequence, or `None` once the enumeration is finished.
    ///
    /// The returned slice points into the enumerator's own buffer and is
    /// overwritten by the next call.
    pub fn next_sequence<F: Fsa + ?Sized>(&mut self, fsa: &F) -> Option<&[u8]> {
        while self.position > 0 {
            let last = self.position - 1;
            let arc = self.arcs[last];

            if arc == 0 {
                // This level is exhausted.
                self.position -= 1;
                continue;
            }

            self.arcs[last] = fsa.next_arc(arc);
            self.buffer[last] = fsa.arc_label(arc);

            if !fsa.is_arc_terminal(arc) {
                self.push_node(fsa, fsa.end_node(arc));
            }

            if fsa.is_arc_final(arc) {
                return Some(&self.buffer[..=last]);
            }
        }
        None
    }

    fn push_node<F: Fsa + ?Sized>(&mut self, fsa: &F, node: usize) {
        if self.position == self.arcs.len() {
            let len = self.arcs.len() + EXPECTED_MAX_STATES;
            self.arcs.resize(len, 0);
            self.buffer.resize(len, 0);
        }
        self.arcs[self.position] = fsa.first_arc(node);
        self.position += 1;
    }
}

/// Owning iterator adapter over [`SequenceEnumerator`].
pub struct Sequences<'a, F: ?Sized> {
    fsa: &'a F,
    enumerator: SequenceEnumerator,
}

impl<F: Fsa + ?Sized> Iterator for Sequences<'_, F> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        self.enumerator.next_sequence(self.fsa).map(<[u8]>::to_vec)
    }
}

/// Iterate over copies of every sequence reachable from `node`.
pub fn sequences<F: Fsa + ?Sized>(fsa: &F, node: usize) -> Sequences<'_, F> {
    Sequences {
        fsa,
        enumerator: SequenceEnumerator::from_node(fsa, node),
    }
}
