// Minimal CFSA2 writer for building test automata.
//
// The output is an unminimized trie laid out in pre-order, which is enough to
// exercise every arc encoding the decoder understands: indexed and explicit
// labels, implicit (NEXT) and v-int destinations, and right-language counts.

use crate::cfsa2::{BIT_FINAL_ARC, BIT_LAST_ARC, BIT_TARGET_NEXT, LABEL_INDEX_SIZE};
use crate::flags::FsaFlags;
use crate::header::{FsaVersion, MAGIC};
use crate::vint::{vint_len, write_vint};

/// Label of the epsilon arc leading to the root.
const EPSILON_LABEL: u8 = b'^';

struct TrieArc {
    label: u8,
    is_final: bool,
    target: Option<usize>,
}

/// Serializes a set of byte sequences into a CFSA2 file image.
#[derive(Debug, Clone)]
pub struct Cfsa2Builder {
    numbers: bool,
    max_indexed_labels: usize,
}

impl Default for Cfsa2Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Cfsa2Builder {
    pub fn new() -> Self {
        Cfsa2Builder {
            numbers: false,
            max_indexed_labels: LABEL_INDEX_SIZE,
        }
    }

    /// Prefix every node with its right-language count.
    pub fn with_numbers(mut self, numbers: bool) -> Self {
        self.numbers = numbers;
        self
    }

    /// Store at most `count` of the most frequent labels in the label table.
    /// `0` forces every label to be written explicitly.
    pub fn with_indexed_labels(mut self, count: usize) -> Self {
        self.max_indexed_labels = count.min(LABEL_INDEX_SIZE);
        self
    }

    /// Build the file image. Input order does not matter; duplicates and
    /// empty sequences are dropped.
    pub fn build<S: AsRef<[u8]>>(&self, sequences: &[S]) -> Vec<u8> {
        let mut input: Vec<&[u8]> = sequences
            .iter()
            .map(AsRef::as_ref)
            .filter(|s| !s.is_empty())
            .collect();
        input.sort_unstable();
        input.dedup();

        let nodes = build_trie(&input);
        let counts = right_language_counts(&nodes);
        let labels = self.frequent_labels(&nodes);
        let mut index = [0u8; 256];
        for (i, &label) in labels.iter().enumerate() {
            index[label as usize] = (i + 1) as u8;
        }

        let mut flags = FsaFlags::FLEXIBLE | FsaFlags::STOPBIT | FsaFlags::NEXTBIT;
        if self.numbers {
            flags = flags | FsaFlags::NUMBERS;
        }

        let mut out = MAGIC.to_be_bytes().to_vec();
        out.push(FsaVersion::Cfsa2.as_byte());
        out.extend_from_slice(&flags.bits().to_be_bytes());
        if labels.is_empty() {
            out.push(0);
        } else {
            out.push((labels.len() + 1) as u8);
            out.push(0);
            out.extend_from_slice(&labels);
        }

        let layout = Layout {
            nodes: &nodes,
            counts: &counts,
            index: &index,
            numbers: self.numbers,
        };
        layout.write(&mut out);
        out
    }

    /// Labels ordered by descending arc frequency, ties by byte value.
    fn frequent_labels(&self, nodes: &[Vec<TrieArc>]) -> Vec<u8> {
        let mut freq = [0usize; 256];
        for arc in nodes.iter().flatten() {
            freq[arc.label as usize] += 1;
        }
        let mut labels: Vec<u8> = (0..=u8::MAX).filter(|&b| freq[b as usize] > 0).collect();
        labels.sort_by(|a, b| freq[*b as usize].cmp(&freq[*a as usize]).then(a.cmp(b)));
        labels.truncate(self.max_indexed_labels);
        labels
    }
}

/// Insert sorted, unique, non-empty sequences into a trie. Node 0 is the
/// root and nodes are created in pre-order.
fn build_trie(input: &[&[u8]]) -> Vec<Vec<TrieArc>> {
    let mut nodes: Vec<Vec<TrieArc>> = vec![Vec::new()];
    for seq in input {
        let mut node = 0;
        for (i, &label) in seq.iter().enumerate() {
            let len = nodes[node].len();
            let pos = match nodes[node].last() {
                Some(arc) if arc.label == label => len - 1,
                _ => {
                    nodes[node].push(TrieArc {
                        label,
                        is_final: false,
                        target: None,
                    });
                    len
                }
            };

            if i + 1 == seq.len() {
                nodes[node][pos].is_final = true;
                continue;
            }

            node = match nodes[node][pos].target {
                Some(target) => target,
                None => {
                    let target = nodes.len();
                    nodes.push(Vec::new());
                    nodes[node][pos].target = Some(target);
                    target
                }
            };
        }
    }
    nodes
}

fn right_language_counts(nodes: &[Vec<TrieArc>]) -> Vec<usize> {
    let mut counts = vec![0; nodes.len()];
    // Children always have larger indices than their parents.
    for k in (0..nodes.len()).rev() {
        counts[k] = nodes[k]
            .iter()
            .map(|arc| arc.is_final as usize + arc.target.map_or(0, |t| counts[t]))
            .sum();
    }
    counts
}

struct Layout<'a> {
    nodes: &'a [Vec<TrieArc>],
    counts: &'a [usize],
    index: &'a [u8; 256],
    numbers: bool,
}

impl Layout<'_> {
    fn is_empty(&self) -> bool {
        self.nodes[0].is_empty()
    }

    fn epsilon_size(&self) -> usize {
        let count = if self.numbers { vint_len(self.counts[0]) } else { 0 };
        let address = if self.is_empty() { 1 } else { 0 };
        count + 2 + address
    }

    fn node_size(&self, k: usize, offsets: &[usize]) -> usize {
        let mut size = if self.numbers { vint_len(self.counts[k]) } else { 0 };
        for arc in &self.nodes[k] {
            size += 1;
            if self.index[arc.label as usize] == 0 {
                size += 1;
            }
            size += match arc.target {
                Some(t) if t == k + 1 => 0,
                Some(t) => vint_len(offsets[t]),
                None => 1,
            };
        }
        size
    }

    /// Node offsets depend on v-int address sizes, which depend on offsets;
    /// iterate until stable.
    fn offsets(&self) -> Vec<usize> {
        let mut offsets = vec![0; self.nodes.len()];
        loop {
            let mut changed = false;
            let mut offset = self.epsilon_size();
            for k in 0..self.nodes.len() {
                if offsets[k] != offset {
                    offsets[k] = offset;
                    changed = true;
                }
                offset += self.node_size(k, &offsets);
            }
            if !changed {
                return offsets;
            }
        }
    }

    fn write(&self, out: &mut Vec<u8>) {
        if self.numbers {
            write_vint(out, self.counts[0]);
        }
        if self.is_empty() {
            out.extend_from_slice(&[BIT_LAST_ARC, EPSILON_LABEL, 0]);
            return;
        }
        out.extend_from_slice(&[BIT_TARGET_NEXT | BIT_LAST_ARC, EPSILON_LABEL]);

        let offsets = self.offsets();
        let base = out.len() - offsets[0];
        for (k, arcs) in self.nodes.iter().enumerate() {
            debug_assert_eq!(out.len() - base, offsets[k]);
            if self.numbers {
                write_vint(out, self.counts[k]);
            }
            for (j, arc) in arcs.iter().enumerate() {
                let index = self.index[arc.label as usize];
                let next = arc.target == Some(k + 1);
                let mut flag = index;
                if arc.is_final {
                    flag |= BIT_FINAL_ARC;
                }
                if j + 1 == arcs.len() {
                    flag |= BIT_LAST_ARC;
                }
                if next {
                    flag |= BIT_TARGET_NEXT;
                }
                out.push(flag);
                if index == 0 {
                    out.push(arc.label);
                }
                if !next {
                    write_vint(out, arc.target.map_or(0, |t| offsets[t]));
                }
            }
        }
    }
}
