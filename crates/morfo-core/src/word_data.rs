// Dictionary lookup result.

use std::borrow::Cow;
use std::fmt;

use encoding_rs::Encoding;

use crate::tags::split_tags;

/// One result of a dictionary lookup: the queried word, its stem (lemma) and
/// the tag stored with it.
///
/// Stem and tag are kept as raw bytes in the dictionary's encoding and decoded
/// on access. Lookups reuse `WordData` values between calls; clone a result to
/// keep it.
#[derive(Clone, PartialEq, Eq)]
pub struct WordData {
    word: String,
    stem: Vec<u8>,
    tag: Vec<u8>,
    encoding: &'static Encoding,
}

impl WordData {
    /// Create an empty record for a dictionary using `encoding`.
    pub fn new(encoding: &'static Encoding) -> Self {
        WordData {
            word: String::new(),
            stem: Vec::new(),
            tag: Vec::new(),
            encoding,
        }
    }

    /// Build a record from already decoded parts.
    pub fn with_parts(
        encoding: &'static Encoding,
        word: impl Into<String>,
        stem: impl Into<Vec<u8>>,
        tag: impl Into<Vec<u8>>,
    ) -> Self {
        WordData {
            word: word.into(),
            stem: stem.into(),
            tag: tag.into(),
            encoding,
        }
    }

    /// Clear the record and set its word, keeping the buffers' capacity.
    pub fn reset(&mut self, word: &str) {
        self.word.clear();
        self.word.push_str(word);
        self.stem.clear();
        self.tag.clear();
    }

    /// The word this record was produced for.
    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn stem_bytes(&self) -> &[u8] {
        &self.stem
    }

    pub fn tag_bytes(&self) -> &[u8] {
        &self.tag
    }

    /// Mutable stem buffer, filled in by the stem decoder.
    pub fn stem_buffer_mut(&mut self) -> &mut Vec<u8> {
        &mut self.stem
    }

    pub fn set_tag(&mut self, tag: &[u8]) {
        self.tag.clear();
        self.tag.extend_from_slice(tag);
    }

    /// Decoded stem, or `None` if the stem is empty.
    pub fn stem(&self) -> Option<Cow<'_, str>> {
        self.decode(&self.stem)
    }

    /// Decoded tag, or `None` if the entry carries no tag.
    pub fn tag(&self) -> Option<Cow<'_, str>> {
        self.decode(&self.tag)
    }

    /// Tag split into its `+`/`|` separated tokens.
    pub fn tags(&self) -> Vec<String> {
        match self.tag() {
            Some(tag) => split_tags(&tag).map(str::to_owned).collect(),
            None => Vec::new(),
        }
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        if bytes.is_empty() {
            return None;
        }
        Some(self.encoding.decode_without_bom_handling(bytes).0)
    }
}

impl fmt::Debug for WordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordData")
            .field("word", &self.word)
            .field("stem", &self.stem())
            .field("tag", &self.tag())
            .field("encoding", &self.encoding.name())
            .finish()
    }
}

impl fmt::Display for WordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}",
            self.word,
            self.stem().unwrap_or_default(),
            self.tag().unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{ISO_8859_2, UTF_8};

    #[test]
    fn decodes_in_dictionary_encoding() {
        // "pół" in ISO-8859-2
        let data = WordData::with_parts(ISO_8859_2, "połowa", [b'p', 0xf3, 0xb3], b"subst:sg".to_vec());
        assert_eq!(data.stem().as_deref(), Some("pół"));
        assert_eq!(data.tag().as_deref(), Some("subst:sg"));
        assert_eq!(data.word(), "połowa");
    }

    #[test]
    fn empty_parts_are_none() {
        let data = WordData::new(UTF_8);
        assert_eq!(data.stem(), None);
        assert_eq!(data.tag(), None);
        assert!(data.tags().is_empty());
    }

    #[test]
    fn reset_clears_previous_result() {
        let mut data = WordData::with_parts(UTF_8, "running", "run", "VERB");
        data.reset("walked");
        assert_eq!(data.word(), "walked");
        assert!(data.stem_bytes().is_empty());
        assert!(data.tag_bytes().is_empty());

        data.stem_buffer_mut().extend_from_slice(b"walk");
        data.set_tag(b"VERB+PAST");
        assert_eq!(data.stem().as_deref(), Some("walk"));
        assert_eq!(data.tags(), ["VERB", "PAST"]);
    }

    #[test]
    fn clones_are_independent() {
        let mut data = WordData::with_parts(UTF_8, "running", "run", "VERB");
        let kept = data.clone();
        data.reset("other");
        assert_eq!(kept.word(), "running");
        assert_ne!(kept, data);
    }

    #[test]
    fn display_is_tab_separated() {
        let data = WordData::with_parts(UTF_8, "psa", "pies", "subst:sg:gen:m2");
        assert_eq!(data.to_string(), "psa\tpies\tsubst:sg:gen:m2");
    }
}
