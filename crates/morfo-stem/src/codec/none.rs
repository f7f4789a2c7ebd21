// Identity codec: the target is stored verbatim.

use super::{CodecError, SequenceEncoder};

/// Stores the target as is, ignoring the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoEncoder;

impl SequenceEncoder for NoEncoder {
    fn encode(&self, reuse: &mut Vec<u8>, _source: &[u8], target: &[u8]) {
        reuse.clear();
        reuse.extend_from_slice(target);
    }

    fn decode(&self, reuse: &mut Vec<u8>, _source: &[u8], encoded: &[u8]) -> Result<(), CodecError> {
        reuse.clear();
        reuse.extend_from_slice(encoded);
        Ok(())
    }

    fn prefix_bytes(&self) -> usize {
        0
    }
}
