// Suffix trimming codec: {K}{suffix}.

use super::{
    CodecError, REMOVE_EVERYTHING, SequenceEncoder, check_len, decode_count, encode_count,
    shared_prefix_length,
};

/// Encodes the target by trimming the unshared suffix of the source.
///
/// Output is `{K}{suffix}`: drop `K - 'A'` bytes from the end of the source,
/// then append `suffix`.
///
/// | source | target   | encoded |
/// |--------|----------|---------|
/// | `foo`  | `foobar` | `Abar`  |
/// | `foo`  | `bar`    | `Dbar`  |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrimSuffixEncoder;

impl SequenceEncoder for TrimSuffixEncoder {
    fn encode(&self, reuse: &mut Vec<u8>, source: &[u8], target: &[u8]) {
        let mut shared = shared_prefix_length(source, target);
        let mut truncate = source.len() - shared;
        if truncate >= REMOVE_EVERYTHING {
            truncate = REMOVE_EVERYTHING;
            shared = 0;
        }

        reuse.clear();
        reuse.push(encode_count(truncate));
        reuse.extend_from_slice(&target[shared..]);
    }

    fn decode(&self, reuse: &mut Vec<u8>, source: &[u8], encoded: &[u8]) -> Result<(), CodecError> {
        check_len(encoded, 1)?;
        let mut truncate = decode_count(encoded[0]);
        if truncate == REMOVE_EVERYTHING {
            truncate = source.len();
        }

        let keep = source.len().saturating_sub(truncate);
        reuse.clear();
        reuse.extend_from_slice(&source[..keep]);
        reuse.extend_from_slice(&encoded[1..]);
        Ok(())
    }

    fn prefix_bytes(&self) -> usize {
        1
    }
}
