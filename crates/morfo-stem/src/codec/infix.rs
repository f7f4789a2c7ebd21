// Infix and suffix trimming codec: {X}{L}{K}{suffix}.

use super::{
    CodecError, REMOVE_EVERYTHING, SequenceEncoder, check_len, decode_count, encode_count,
    shared_prefix_length,
};

/// Encodes the target by removing an infix and trimming the suffix of the
/// source.
///
/// Output is `{X}{L}{K}{suffix}`: remove `L - 'A'` bytes starting at index
/// `X - 'A'`, drop `K - 'A'` bytes from the end of what remains, then append
/// `suffix`. Useful for languages that inflect with infixes or prefixes
/// (`nieduży` -> `duży`).
///
/// | source    | target  | encoded |
/// |-----------|---------|---------|
/// | `ayz`     | `abc`   | `AACbc` |
/// | `aillent` | `aller` | `BBCr`  |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrimInfixAndSuffixEncoder;

impl SequenceEncoder for TrimInfixAndSuffixEncoder {
    fn encode(&self, reuse: &mut Vec<u8>, source: &[u8], target: &[u8]) {
        let mut max_infix_index = 0;
        let mut max_sub_length = shared_prefix_length(source, target);
        let mut max_infix_length = 0;

        // Only infixes at the start, or right after the common prefix, are tried.
        let mut scratch = Vec::with_capacity(source.len());
        for i in [0, max_sub_length] {
            for j in 1..=source.len() - i {
                scratch.clear();
                scratch.extend_from_slice(&source[..i]);
                scratch.extend_from_slice(&source[i + j..]);

                let shared = shared_prefix_length(&scratch, target);
                if shared > 0
                    && shared > max_sub_length
                    && i < REMOVE_EVERYTHING
                    && j < REMOVE_EVERYTHING
                {
                    max_sub_length = shared;
                    max_infix_length = j;
                    max_infix_index = i;
                }
            }
        }

        let mut truncate_suffix = source.len() - (max_infix_length + max_sub_length);

        // Removing a trailing "infix" is the same as trimming the suffix.
        if truncate_suffix == 0 && max_infix_index + max_infix_length == source.len() {
            truncate_suffix = max_infix_length;
            max_infix_length = 0;
            max_infix_index = 0;
        }

        if max_infix_index >= REMOVE_EVERYTHING
            || max_infix_length >= REMOVE_EVERYTHING
            || truncate_suffix >= REMOVE_EVERYTHING
        {
            max_infix_index = 0;
            max_sub_length = 0;
            max_infix_length = REMOVE_EVERYTHING;
            truncate_suffix = REMOVE_EVERYTHING;
        }

        reuse.clear();
        reuse.push(encode_count(max_infix_index));
        reuse.push(encode_count(max_infix_length));
        reuse.push(encode_count(truncate_suffix));
        reuse.extend_from_slice(&target[max_sub_length..]);
    }

    fn decode(&self, reuse: &mut Vec<u8>, source: &[u8], encoded: &[u8]) -> Result<(), CodecError> {
        check_len(encoded, 3)?;
        let mut infix_index = decode_count(encoded[0]);
        let mut infix_length = decode_count(encoded[1]);
        let mut truncate_suffix = decode_count(encoded[2]);
        if infix_length == REMOVE_EVERYTHING || truncate_suffix == REMOVE_EVERYTHING {
            infix_index = 0;
            infix_length = source.len();
            truncate_suffix = 0;
        }

        let head = infix_index.min(source.len());
        let start = (infix_index + infix_length).min(source.len());
        let len = source
            .len()
            .saturating_sub(infix_index + infix_length + truncate_suffix)
            .min(source.len() - start);

        reuse.clear();
        reuse.extend_from_slice(&source[..head]);
        reuse.extend_from_slice(&source[start..start + len]);
        reuse.extend_from_slice(&encoded[3..]);
        Ok(())
    }

    fn prefix_bytes(&self) -> usize {
        3
    }
}
