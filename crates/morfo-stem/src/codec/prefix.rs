// Prefix and suffix trimming codec: {P}{K}{suffix}.

use super::{
    CodecError, REMOVE_EVERYTHING, SequenceEncoder, check_len, decode_count, encode_count,
    shared_prefix_length,
};

/// Encodes the target by trimming a prefix and a suffix off the source.
///
/// Output is `{P}{K}{suffix}`: drop `P - 'A'` bytes from the start and
/// `K - 'A'` bytes from the end of the source, then append `suffix`.
///
/// | source | target | encoded |
/// |--------|--------|---------|
/// | `abc`  | `abcd` | `AAd`   |
/// | `abc`  | `xyz`  | `ADxyz` |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrimPrefixAndSuffixEncoder;

impl SequenceEncoder for TrimPrefixAndSuffixEncoder {
    fn encode(&self, reuse: &mut Vec<u8>, source: &[u8], target: &[u8]) {
        // Longest encodable infix of source that starts target; first wins.
        let mut max_len = 0;
        let mut max_index = 0;
        for i in 0..source.len() {
            let shared = shared_prefix_length(&source[i..], target);
            if shared > max_len
                && i < REMOVE_EVERYTHING
                && source.len() - (i + shared) < REMOVE_EVERYTHING
            {
                max_len = shared;
                max_index = i;
            }
        }

        let mut truncate_prefix = max_index;
        let mut truncate_suffix = source.len() - (max_index + max_len);
        if truncate_prefix >= REMOVE_EVERYTHING || truncate_suffix >= REMOVE_EVERYTHING {
            max_len = 0;
            truncate_prefix = REMOVE_EVERYTHING;
            truncate_suffix = REMOVE_EVERYTHING;
        }

        reuse.clear();
        reuse.push(encode_count(truncate_prefix));
        reuse.push(encode_count(truncate_suffix));
        reuse.extend_from_slice(&target[max_len..]);
    }

    fn decode(&self, reuse: &mut Vec<u8>, source: &[u8], encoded: &[u8]) -> Result<(), CodecError> {
        check_len(encoded, 2)?;
        let mut truncate_prefix = decode_count(encoded[0]);
        let mut truncate_suffix = decode_count(encoded[1]);
        if truncate_prefix == REMOVE_EVERYTHING || truncate_suffix == REMOVE_EVERYTHING {
            truncate_prefix = source.len();
            truncate_suffix = 0;
        }

        let start = truncate_prefix.min(source.len());
        let len = source.len().saturating_sub(truncate_prefix + truncate_suffix);
        reuse.clear();
        reuse.extend_from_slice(&source[start..start + len]);
        reuse.extend_from_slice(&encoded[2..]);
        Ok(())
    }

    fn prefix_bytes(&self) -> usize {
        2
    }
}
