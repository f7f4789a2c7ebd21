// Relative sequence codecs.
//
// A stored stem is encoded as a diff against the inflected form it belongs
// to: a few count bytes saying what to trim from the inflected form, then a
// literal suffix to append. Counts are biased by 'A' to stay printable; the
// biased value of 255 means "drop the whole source".

mod infix;
mod none;
mod prefix;
mod suffix;

use std::fmt;
use std::str::FromStr;

pub use infix::TrimInfixAndSuffixEncoder;
pub use none::NoEncoder;
pub use prefix::TrimPrefixAndSuffixEncoder;
pub use suffix::TrimSuffixEncoder;

/// Largest count value; reserved as the "remove everything" marker.
pub const REMOVE_EVERYTHING: usize = 255;

/// Error type for decoding malformed encoded sequences.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("encoded sequence too short: expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}

/// Encodes a target sequence relative to a source sequence, and back.
pub trait SequenceEncoder {
    /// Encode `target` relative to `source` into `reuse` (cleared first).
    fn encode(&self, reuse: &mut Vec<u8>, source: &[u8], target: &[u8]);

    /// Reconstruct the target from `source` and `encoded` into `reuse`
    /// (cleared first).
    fn decode(&self, reuse: &mut Vec<u8>, source: &[u8], encoded: &[u8]) -> Result<(), CodecError>;

    /// Number of count bytes preceding the literal suffix.
    fn prefix_bytes(&self) -> usize;
}

/// The codec a dictionary was compiled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncoderType {
    Suffix,
    Prefix,
    Infix,
    None,
}

impl EncoderType {
    pub const ALL: [EncoderType; 4] = [
        EncoderType::Suffix,
        EncoderType::Prefix,
        EncoderType::Infix,
        EncoderType::None,
    ];

    /// Name used in dictionary metadata.
    pub fn name(self) -> &'static str {
        match self {
            EncoderType::Suffix => "SUFFIX",
            EncoderType::Prefix => "PREFIX",
            EncoderType::Infix => "INFIX",
            EncoderType::None => "NONE",
        }
    }

    fn encoder(self) -> &'static dyn SequenceEncoder {
        match self {
            EncoderType::Suffix => &TrimSuffixEncoder,
            EncoderType::Prefix => &TrimPrefixAndSuffixEncoder,
            EncoderType::Infix => &TrimInfixAndSuffixEncoder,
            EncoderType::None => &NoEncoder,
        }
    }
}

impl SequenceEncoder for EncoderType {
    fn encode(&self, reuse: &mut Vec<u8>, source: &[u8], target: &[u8]) {
        self.encoder().encode(reuse, source, target)
    }

    fn decode(&self, reuse: &mut Vec<u8>, source: &[u8], encoded: &[u8]) -> Result<(), CodecError> {
        self.encoder().decode(reuse, source, encoded)
    }

    fn prefix_bytes(&self) -> usize {
        self.encoder().prefix_bytes()
    }
}

impl fmt::Display for EncoderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when an encoder name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sequence encoder: {0:?}")]
pub struct UnknownEncoder(pub String);

impl FromStr for EncoderType {
    type Err = UnknownEncoder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        EncoderType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownEncoder(name.to_string()))
    }
}

#[inline]
fn encode_count(count: usize) -> u8 {
    debug_assert!(count <= REMOVE_EVERYTHING);
    (count as u8).wrapping_add(b'A')
}

#[inline]
fn decode_count(code: u8) -> usize {
    code.wrapping_sub(b'A') as usize
}

fn shared_prefix_length(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn check_len(encoded: &[u8], expected: usize) -> Result<(), CodecError> {
    if encoded.len() < expected {
        return Err(CodecError::Truncated {
            expected,
            actual: encoded.len(),
        });
    }
    Ok(())
}
