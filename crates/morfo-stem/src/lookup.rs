// Word lookup over a dictionary automaton.
//
// Every dictionary sequence has the shape
//
//     inflected-form SEP encoded-stem [SEP tag]
//
// so looking up a word means walking the automaton along the word's bytes,
// stepping over the separator arc, and enumerating everything below it.

use std::fmt;
use std::sync::Arc;

use morfo_core::WordData;
use morfo_fsa::{Fsa, FsaTraversal, MatchKind, MatchResult, SequenceEnumerator};

use crate::codec::SequenceEncoder;
use crate::dictionary::Dictionary;

/// Number of result records added whenever the pool runs out.
const EXPAND_SIZE: usize = 10;

/// Anything that maps a word to its dictionary entries.
pub trait Stemmer {
    fn lookup(&mut self, word: &str) -> &[WordData];
}

/// Looks up words in a shared [`Dictionary`].
///
/// Holds per-caller scratch state (enumerator stack, byte buffers and a pool
/// of result records) that is reused between calls, so a `DictionaryLookup`
/// is cheap to query repeatedly but is not shareable. Create one per thread
/// from the same `Arc<Dictionary>`.
pub struct DictionaryLookup {
    dictionary: Arc<Dictionary>,
    enumerator: SequenceEnumerator,
    match_result: MatchResult,
    word_bytes: Vec<u8>,
    forms: Vec<WordData>,
    count: usize,
}

impl DictionaryLookup {
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        DictionaryLookup {
            dictionary,
            enumerator: SequenceEnumerator::new(),
            match_result: MatchResult::default(),
            word_bytes: Vec::new(),
            forms: Vec::new(),
            count: 0,
        }
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    pub fn separator_char(&self) -> char {
        self.dictionary.metadata().separator_char()
    }

    /// Look up `word` and return its entries in automaton order.
    ///
    /// The returned records are overwritten by the next call; clone them to
    /// keep them. Unknown words, words containing the separator and words
    /// that cannot be represented in the dictionary encoding all yield an
    /// empty slice.
    pub fn lookup(&mut self, word: &str) -> &[WordData] {
        let DictionaryLookup {
            dictionary,
            enumerator,
            match_result,
            word_bytes,
            forms,
            count,
        } = self;
        *count = 0;

        let metadata = dictionary.metadata();
        let word = metadata.input_conversion().apply(word);
        if word.contains(metadata.separator_char()) {
            return &[];
        }

        let encoding = metadata.encoding();
        let (bytes, _, unmappable) = encoding.encode(&word);
        if unmappable {
            return &[];
        }
        word_bytes.clear();
        word_bytes.extend_from_slice(&bytes);

        let fsa = dictionary.fsa();
        FsaTraversal::new(fsa).match_into(match_result, &word_bytes[..], fsa.root_node());
        if match_result.kind != MatchKind::SequenceIsAPrefix {
            return &[];
        }

        let separator = metadata.separator();
        let arc = fsa.arc(match_result.node, separator);
        if arc == 0 || fsa.is_arc_final(arc) {
            return &[];
        }

        let output_word = metadata.output_conversion().apply(&word);
        let codec = metadata.encoder_type();
        enumerator.restart_from(fsa, fsa.end_node(arc));
        while let Some(sequence) = enumerator.next_sequence(fsa) {
            let (encoded, tag) = match sequence.iter().position(|&b| b == separator) {
                Some(i) => (&sequence[..i], &sequence[i + 1..]),
                None => (sequence, &[][..]),
            };

            if *count == forms.len() {
                forms.resize(forms.len() + EXPAND_SIZE, WordData::new(encoding));
            }
            let data = &mut forms[*count];
            data.reset(&output_word);
            if let Err(err) = codec.decode(data.stem_buffer_mut(), &word_bytes[..], encoded) {
                log::warn!("skipping malformed entry for {output_word:?}: {err}");
                continue;
            }
            data.set_tag(tag);
            *count += 1;
        }

        &forms[..*count]
    }
}

impl Stemmer for DictionaryLookup {
    fn lookup(&mut self, word: &str) -> &[WordData] {
        DictionaryLookup::lookup(self, word)
    }
}

impl fmt::Debug for DictionaryLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionaryLookup")
            .field("dictionary", &self.dictionary)
            .field("pool", &self.forms.len())
            .field("results", &self.count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::ISO_8859_2;
    use morfo_fsa::fixture::Cfsa2Builder;

    const SUFFIX_INFO: &str = "fsa.dict.encoder=SUFFIX\nfsa.dict.separator=+\n";

    fn lookup_for<S: AsRef<[u8]>>(info: &str, entries: &[S]) -> DictionaryLookup {
        let data = Cfsa2Builder::new().build(entries);
        let dictionary = Dictionary::read_from(data.as_slice(), info.as_bytes()).unwrap();
        DictionaryLookup::new(Arc::new(dictionary))
    }

    fn stems_and_tags(results: &[WordData]) -> Vec<(String, String)> {
        results
            .iter()
            .map(|d| {
                (
                    d.stem().unwrap_or_default().into_owned(),
                    d.tag().unwrap_or_default().into_owned(),
                )
            })
            .collect()
    }

    #[test]
    fn finds_stem_and_tag() {
        let mut lookup = lookup_for(SUFFIX_INFO, &["running+E+VERB"]);
        let results = lookup.lookup("running");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].word(), "running");
        assert_eq!(results[0].stem().as_deref(), Some("run"));
        assert_eq!(results[0].tags(), ["VERB"]);
    }

    #[test]
    fn unknown_words_are_empty() {
        let mut lookup = lookup_for(SUFFIX_INFO, &["running+E+VERB"]);
        assert!(lookup.lookup("zzz").is_empty());
        // Prefixes and extensions of a known form.
        assert!(lookup.lookup("run").is_empty());
        assert!(lookup.lookup("runningly").is_empty());
        assert!(lookup.lookup("").is_empty());
    }

    #[test]
    fn word_with_separator_is_empty() {
        let mut lookup = lookup_for(SUFFIX_INFO, &["running+E+VERB"]);
        assert!(lookup.lookup("running+E").is_empty());
    }

    #[test]
    fn ambiguous_forms() {
        let mut lookup = lookup_for(
            SUFFIX_INFO,
            &[
                "psa+Cies+subst:sg:gen:m2",
                "psa+Cies+subst:sg:acc:m2",
                "psem+Dies+subst:sg:inst:m2",
            ],
        );
        assert_eq!(
            stems_and_tags(lookup.lookup("psa")),
            [
                ("pies".to_string(), "subst:sg:acc:m2".to_string()),
                ("pies".to_string(), "subst:sg:gen:m2".to_string()),
            ]
        );
        assert_eq!(lookup.lookup("psem").len(), 1);
    }

    #[test]
    fn missing_and_empty_tags() {
        let mut lookup = lookup_for(SUFFIX_INFO, &["kot+A", "psa+Cies+"]);
        assert_eq!(lookup.lookup("kot")[0].tag(), None);
        let results = lookup.lookup("psa");
        assert_eq!(results[0].stem().as_deref(), Some("pies"));
        assert_eq!(results[0].tag(), None);
        assert!(results[0].tags().is_empty());
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let mut lookup = lookup_for("fsa.dict.encoder=INFIX\nfsa.dict.separator=+\n", &["kot+AA+bad", "kot+AAA+subst"]);
        let results = lookup.lookup("kot");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].tag().as_deref(), Some("subst"));
    }

    #[test]
    fn custom_separator_and_prefix_codec() {
        let mut lookup = lookup_for(
            "fsa.dict.encoder=PREFIX\nfsa.dict.separator=|\n",
            &["najlepszy|DA|adj:sup"],
        );
        let results = lookup.lookup("najlepszy");
        assert_eq!(results[0].stem().as_deref(), Some("lepszy"));
        assert_eq!(results[0].tag().as_deref(), Some("adj:sup"));
        // '+' is an ordinary character here.
        assert!(lookup.lookup("naj+lepszy").is_empty());
        assert_eq!(lookup.separator_char(), '|');
    }

    #[test]
    fn single_byte_encoding() {
        let entry = ISO_8859_2.encode("łąka+A+subst:sg:nom:f").0.into_owned();
        let mut lookup = lookup_for("fsa.dict.encoder=SUFFIX\nfsa.dict.separator=+\nfsa.dict.encoding=iso-8859-2\n", &[entry]);
        let results = lookup.lookup("łąka");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].stem().as_deref(), Some("łąka"));
        // Not representable in ISO-8859-2.
        assert!(lookup.lookup("пёс").is_empty());
    }

    #[test]
    fn conversions() {
        let info = "fsa.dict.encoder=SUFFIX\n\
                    fsa.dict.separator=+\n\
                    fsa.dict.input-conversion=ó o\n\
                    fsa.dict.output-conversion=o 0\n";
        let mut lookup = lookup_for(info, &["kot+A+subst"]);
        let results = lookup.lookup("kót");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].word(), "k0t");
        assert_eq!(results[0].stem().as_deref(), Some("kot"));
    }

    #[test]
    fn pool_grows_and_is_reused() {
        let mut entries: Vec<String> = (0..25).map(|i| format!("dom+A+t{i:02}")).collect();
        entries.push("kot+A+subst".to_string());
        let mut lookup = lookup_for(SUFFIX_INFO, &entries);

        assert_eq!(lookup.lookup("dom").len(), 25);
        let results = lookup.lookup("kot");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].word(), "kot");
        assert_eq!(results[0].tag().as_deref(), Some("subst"));
        assert_eq!(lookup.forms.len(), 30);
    }

    #[test]
    fn stemmer_trait_object() {
        let mut lookup = lookup_for(SUFFIX_INFO, &["running+E+VERB"]);
        let stemmer: &mut dyn Stemmer = &mut lookup;
        assert_eq!(stemmer.lookup("running").len(), 1);
    }
}
