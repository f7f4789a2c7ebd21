// CFSA2 packed automaton decoder.
//
// Body layout after the header:
//   u16 (big-endian) flag word
//   u8   label table size N
//   N    label bytes (slot 0 unused, slots past 31 unreachable)
//   ...  arc blob
//
// Arc layout inside the blob:
//   flag byte: [NEXT:1][LAST:1][FINAL:1][LABEL_INDEX:5]
//   explicit label byte, present when LABEL_INDEX == 0
//   v-int destination offset, present when NEXT is clear

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};
use log::debug;

use crate::flags::FsaFlags;
use crate::header::{FsaHeader, FsaVersion};
use crate::vint::{read_vint, skip_vint, try_read_vint};
use crate::{Fsa, FsaError};

/// The destination node immediately follows this arc's node.
pub const BIT_TARGET_NEXT: u8 = 1 << 7;

/// This is the last arc of its node.
pub const BIT_LAST_ARC: u8 = 1 << 6;

/// This arc completes a stored sequence.
pub const BIT_FINAL_ARC: u8 = 1 << 5;

/// Number of flag-byte bits holding a label table index.
pub const LABEL_INDEX_BITS: u32 = 5;

pub const LABEL_INDEX_MASK: u8 = (1 << LABEL_INDEX_BITS) - 1;

/// Largest usable label table index.
pub const LABEL_INDEX_SIZE: usize = (1 << LABEL_INDEX_BITS) - 1;

/// A CFSA2 automaton held in memory.
///
/// Nodes and arcs are offsets into `arcs`; nothing besides the raw blob and
/// the label table is materialized.
pub struct Cfsa2 {
    arcs: Vec<u8>,
    label_mapping: [u8; LABEL_INDEX_SIZE + 1],
    label_count: usize,
    flags: FsaFlags,
    has_numbers: bool,
    root: usize,
}

impl std::fmt::Debug for Cfsa2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cfsa2")
            .field("size", &self.arcs.len())
            .field("flags", &self.flags)
            .field("labels", &self.label_count)
            .field("root", &self.root)
            .finish()
    }
}

impl Cfsa2 {
    /// Read a complete automaton (header included) from a stream.
    pub fn read<R: Read>(mut reader: R) -> Result<Self, FsaError> {
        let header = FsaHeader::read(&mut reader)?;
        if header.version != FsaVersion::Cfsa2 {
            return Err(FsaError::VersionMismatch {
                expected: FsaVersion::Cfsa2,
                actual: header.version,
            });
        }
        Self::read_body(reader)
    }

    /// Load an automaton from an in-memory file image.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FsaError> {
        Self::read(data)
    }

    /// Read the version-specific body; the header must already be consumed.
    pub(crate) fn read_body<R: Read>(mut reader: R) -> Result<Self, FsaError> {
        let flags = FsaFlags::from_bits(reader.read_u16::<BigEndian>()?)?;

        let stored = reader.read_u8()? as usize;
        let mut labels = vec![0u8; stored];
        reader.read_exact(&mut labels)?;

        // A flag byte can only address slots 1..=31; anything stored past
        // that is read and dropped.
        let label_count = stored.min(LABEL_INDEX_SIZE + 1);
        let mut label_mapping = [0u8; LABEL_INDEX_SIZE + 1];
        label_mapping[..label_count].copy_from_slice(&labels[..label_count]);

        let mut arcs = Vec::new();
        reader.read_to_end(&mut arcs)?;

        Self::from_parts(flags, label_mapping, label_count, arcs)
    }

    fn from_parts(
        flags: FsaFlags,
        label_mapping: [u8; LABEL_INDEX_SIZE + 1],
        label_count: usize,
        arcs: Vec<u8>,
    ) -> Result<Self, FsaError> {
        if arcs.is_empty() {
            return Err(FsaError::Corrupt("empty arc blob".into()));
        }
        let has_numbers = flags.contains(FsaFlags::NUMBERS);

        let root = find_root(&arcs, has_numbers)
            .ok_or_else(|| FsaError::Corrupt("epsilon node runs past the end of the arc blob".into()))?;
        if root != 0 && root >= arcs.len() {
            return Err(FsaError::Corrupt(format!(
                "root node offset {root} outside arc blob of {} bytes",
                arcs.len()
            )));
        }

        debug!(
            "loaded CFSA2 automaton: {} bytes, flags {}, {} labels, root at {}",
            arcs.len(),
            flags,
            label_count.saturating_sub(1),
            root
        );

        Ok(Cfsa2 {
            arcs,
            label_mapping,
            label_count,
            flags,
            has_numbers,
            root,
        })
    }

    /// The raw arc blob.
    pub fn arcs(&self) -> &[u8] {
        &self.arcs
    }

    /// The addressable part of the label table, including the unused slot 0.
    pub fn label_mapping(&self) -> &[u8] {
        &self.label_mapping[..self.label_count]
    }

    #[inline]
    pub fn is_arc_last(&self, arc: usize) -> bool {
        self.arcs[arc] & BIT_LAST_ARC != 0
    }

    #[inline]
    pub fn is_next_set(&self, arc: usize) -> bool {
        self.arcs[arc] & BIT_TARGET_NEXT != 0
    }

    /// Offset of the byte following `arc`.
    fn skip_arc(&self, arc: usize) -> usize {
        let flag = self.arcs[arc];
        let mut offset = arc + 1;
        if flag & LABEL_INDEX_MASK == 0 {
            offset += 1;
        }
        if flag & BIT_TARGET_NEXT == 0 {
            offset = skip_vint(&self.arcs, offset);
        }
        debug_assert!(offset <= self.arcs.len(), "arc {arc} runs past the end of the automaton");
        offset
    }

    /// Destination of `arc`; `0` for terminal arcs.
    ///
    /// With the NEXT bit set the destination is implicit: the node that starts
    /// right after the last arc of the current node.
    fn destination_offset(&self, arc: usize) -> usize {
        if self.is_next_set(arc) {
            let mut last = arc;
            while !self.is_arc_last(last) {
                last = self.skip_arc(last);
            }
            self.skip_arc(last)
        } else {
            let at = if self.arcs[arc] & LABEL_INDEX_MASK == 0 {
                arc + 2
            } else {
                arc + 1
            };
            read_vint(&self.arcs, at)
        }
    }
}

impl Fsa for Cfsa2 {
    fn root_node(&self) -> usize {
        self.root
    }

    #[inline]
    fn first_arc(&self, node: usize) -> usize {
        if self.has_numbers {
            skip_vint(&self.arcs, node)
        } else {
            node
        }
    }

    #[inline]
    fn next_arc(&self, arc: usize) -> usize {
        if self.is_arc_last(arc) {
            0
        } else {
            self.skip_arc(arc)
        }
    }

    fn end_node(&self, arc: usize) -> usize {
        let node = self.destination_offset(arc);
        debug_assert!(node != 0, "cannot follow terminal arc {arc}");
        debug_assert!(node < self.arcs.len(), "node {node} out of bounds");
        node
    }

    #[inline]
    fn arc_label(&self, arc: usize) -> u8 {
        let index = (self.arcs[arc] & LABEL_INDEX_MASK) as usize;
        if index > 0 {
            self.label_mapping[index]
        } else {
            self.arcs[arc + 1]
        }
    }

    #[inline]
    fn is_arc_final(&self, arc: usize) -> bool {
        self.arcs[arc] & BIT_FINAL_ARC != 0
    }

    fn is_arc_terminal(&self, arc: usize) -> bool {
        self.destination_offset(arc) == 0
    }

    fn flags(&self) -> FsaFlags {
        self.flags
    }

    fn right_language_count(&self, node: usize) -> Result<usize, FsaError> {
        if !self.has_numbers {
            return Err(FsaError::NumbersUnsupported);
        }
        Ok(read_vint(&self.arcs, node))
    }

    fn size_in_bytes(&self) -> Option<usize> {
        Some(self.arcs.len())
    }
}

/// Follow the epsilon arc at offset 0 with bounds checks, since the blob has
/// not been validated yet.
fn find_root(arcs: &[u8], has_numbers: bool) -> Option<usize> {
    let epsilon = if has_numbers {
        try_read_vint(arcs, 0)?.1
    } else {
        0
    };
    let flag = *arcs.get(epsilon)?;
    if flag & BIT_TARGET_NEXT != 0 {
        let mut arc = epsilon;
        loop {
            let last = *arcs.get(arc)? & BIT_LAST_ARC != 0;
            arc = checked_skip_arc(arcs, arc)?;
            if last {
                return Some(arc);
            }
        }
    } else {
        let at = if flag & LABEL_INDEX_MASK == 0 {
            epsilon + 2
        } else {
            epsilon + 1
        };
        Some(try_read_vint(arcs, at)?.0)
    }
}

fn checked_skip_arc(arcs: &[u8], arc: usize) -> Option<usize> {
    let flag = *arcs.get(arc)?;
    let mut offset = arc + 1;
    if flag & LABEL_INDEX_MASK == 0 {
        arcs.get(offset)?;
        offset += 1;
    }
    if flag & BIT_TARGET_NEXT == 0 {
        offset = try_read_vint(arcs, offset)?.1;
    }
    Some(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::MAGIC;

    fn build_file(flags: u16, labels: &[u8], blob: &[u8]) -> Vec<u8> {
        let mut data = MAGIC.to_be_bytes().to_vec();
        data.push(FsaVersion::Cfsa2.as_byte());
        data.extend_from_slice(&flags.to_be_bytes());
        data.push(labels.len() as u8);
        data.extend_from_slice(labels);
        data.extend_from_slice(blob);
        data
    }

    const PLAIN: u16 = 0b111;

    // {"ab", "ac"} with explicit labels.
    const AB_AC: [u8; 10] = [0xc0, b'^', 0xc0, b'a', 0x20, b'b', 0x00, 0x60, b'c', 0x00];

    #[test]
    fn explicit_labels() {
        let fsa = Cfsa2::from_bytes(&build_file(PLAIN, &[], &AB_AC)).unwrap();
        assert_eq!(fsa.root_node(), 2);

        let a = fsa.first_arc(fsa.root_node());
        assert_eq!(fsa.arc_label(a), b'a');
        assert!(fsa.is_arc_last(a));
        assert!(!fsa.is_arc_final(a));
        assert!(!fsa.is_arc_terminal(a));
        assert_eq!(fsa.next_arc(a), 0);

        let node = fsa.end_node(a);
        assert_eq!(node, 4);
        let b = fsa.first_arc(node);
        let c = fsa.next_arc(b);
        assert_eq!((fsa.arc_label(b), fsa.arc_label(c)), (b'b', b'c'));
        assert!(fsa.is_arc_final(b) && fsa.is_arc_terminal(b));
        assert!(fsa.is_arc_final(c) && fsa.is_arc_terminal(c));
        assert_eq!(fsa.next_arc(c), 0);
        assert_eq!(fsa.arc(node, b'c'), c);
        assert_eq!(fsa.arc(node, b'd'), 0);
        assert_eq!(fsa.arc_count(node), 2);
    }

    #[test]
    fn indexed_labels() {
        // "a" only; label index 1 maps to 'a'.
        let blob = [0xc0, b'^', 0x61, 0x00];
        let fsa = Cfsa2::from_bytes(&build_file(PLAIN, &[0, b'a'], &blob)).unwrap();
        let arc = fsa.first_arc(fsa.root_node());
        assert_eq!(fsa.arc_label(arc), b'a');
        assert!(fsa.is_arc_final(arc));
        assert!(fsa.is_arc_terminal(arc));
        assert_eq!(fsa.label_mapping(), &[0, b'a']);
    }

    #[test]
    fn explicit_destination_offsets() {
        // Root arc 'x' stores its destination (offset 5) as a v-int.
        let blob = [0xc0, b'^', 0x40, b'x', 0x05, 0x60, b'y', 0x00];
        let fsa = Cfsa2::from_bytes(&build_file(PLAIN, &[], &blob)).unwrap();
        let x = fsa.arc(fsa.root_node(), b'x');
        assert_eq!(fsa.end_node(x), 5);
        let y = fsa.arc(5, b'y');
        assert!(fsa.is_arc_final(y));
    }

    #[test]
    fn right_language_counts() {
        let blob = [
            0x02, 0xc0, b'^', // epsilon node
            0x02, 0xc0, b'a', // root
            0x02, 0x20, b'b', 0x00, 0x60, b'c', 0x00,
        ];
        let flags = PLAIN | FsaFlags::NUMBERS.bits();
        let fsa = Cfsa2::from_bytes(&build_file(flags, &[], &blob)).unwrap();
        assert_eq!(fsa.root_node(), 3);
        assert_eq!(fsa.right_language_count(fsa.root_node()).unwrap(), 2);
        let a = fsa.first_arc(fsa.root_node());
        assert_eq!(a, 4);
        let node = fsa.end_node(a);
        assert_eq!(node, 6);
        assert_eq!(fsa.right_language_count(node).unwrap(), 2);
        assert_eq!(fsa.arc_label(fsa.first_arc(node)), b'b');
    }

    #[test]
    fn counts_require_numbers_flag() {
        let fsa = Cfsa2::from_bytes(&build_file(PLAIN, &[], &AB_AC)).unwrap();
        let err = fsa.right_language_count(fsa.root_node()).unwrap_err();
        assert!(matches!(err, FsaError::NumbersUnsupported));
    }

    #[test]
    fn reject_unrecognized_flags() {
        let err = Cfsa2::from_bytes(&build_file(0x0040, &[], &AB_AC)).unwrap_err();
        assert!(matches!(err, FsaError::UnrecognizedFlags(0x0040)));
    }

    #[test]
    fn reject_other_versions() {
        let mut data = build_file(PLAIN, &[], &AB_AC);
        data[4] = FsaVersion::Fsa5.as_byte();
        let err = Cfsa2::from_bytes(&data).unwrap_err();
        assert!(matches!(
            err,
            FsaError::VersionMismatch {
                expected: FsaVersion::Cfsa2,
                actual: FsaVersion::Fsa5
            }
        ));
    }

    #[test]
    fn reject_truncated_label_table() {
        let mut data = build_file(PLAIN, &[], &[]);
        data[7] = 4;
        data.extend_from_slice(&[0, b'a']);
        let err = Cfsa2::from_bytes(&data).unwrap_err();
        assert!(matches!(err, FsaError::Truncated));
    }

    #[test]
    fn oversized_label_table_drops_unreachable_slots() {
        // 40 stored labels; index 31 is the last one a flag byte can reach.
        let mut labels: Vec<u8> = (0..40u8).map(|i| b'0' + i).collect();
        labels[1] = b'a';
        labels[31] = b'z';
        // Root arcs: 'a' via index 1, 'z' via index 31, both final and terminal.
        let blob = [0xc0, b'^', 0x21, 0x00, 0x7f, 0x00];
        let fsa = Cfsa2::from_bytes(&build_file(PLAIN, &labels, &blob)).unwrap();
        assert_eq!(fsa.label_mapping().len(), LABEL_INDEX_SIZE + 1);
        assert_eq!(fsa.label_mapping()[31], b'z');

        let a = fsa.first_arc(fsa.root_node());
        let z = fsa.next_arc(a);
        assert_eq!((fsa.arc_label(a), fsa.arc_label(z)), (b'a', b'z'));
        assert!(fsa.is_arc_final(z) && fsa.is_arc_terminal(z));
        assert_eq!(fsa.next_arc(z), 0);
    }

    #[test]
    fn reject_truncated_oversized_label_table() {
        let mut data = build_file(PLAIN, &[], &[]);
        data[7] = 200;
        data.extend_from_slice(&[0u8; 50]);
        let err = Cfsa2::from_bytes(&data).unwrap_err();
        assert!(matches!(err, FsaError::Truncated));
    }

    #[test]
    fn reject_empty_blob() {
        let err = Cfsa2::from_bytes(&build_file(PLAIN, &[], &[])).unwrap_err();
        assert!(matches!(err, FsaError::Corrupt(_)));
    }

    #[test]
    fn reject_root_out_of_bounds() {
        let blob = [0x40, b'^', 0x7f];
        let err = Cfsa2::from_bytes(&build_file(PLAIN, &[], &blob)).unwrap_err();
        assert!(matches!(err, FsaError::Corrupt(_)));

        let blob = [0x40, b'^', 0x80];
        let err = Cfsa2::from_bytes(&build_file(PLAIN, &[], &blob)).unwrap_err();
        assert!(matches!(err, FsaError::Corrupt(_)));
    }

    #[test]
    fn terminal_epsilon_means_empty() {
        let blob = [0x60, b'^', 0x00];
        let fsa = Cfsa2::from_bytes(&build_file(PLAIN, &[], &blob)).unwrap();
        assert_eq!(fsa.root_node(), 0);
    }

    #[test]
    fn debug_output_is_compact() {
        let fsa = Cfsa2::from_bytes(&build_file(PLAIN, &[], &AB_AC)).unwrap();
        let text = format!("{fsa:?}");
        assert!(text.contains("size: 10"));
        assert!(text.contains("root: 2"));
    }
}
