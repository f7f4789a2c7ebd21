// Ordered string replacement tables applied to words before and after lookup.

use std::borrow::Cow;
use std::str::FromStr;

/// Error type for conversion table parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("conversion pair must have exactly two tokens: {0:?}")]
    Malformed(String),
    #[error("conversion is ambiguous, {0:?} is mapped more than once")]
    Ambiguous(String),
}

/// An ordered list of `from -> to` replacements.
///
/// The textual form is a comma-separated list of pairs, each pair being two
/// whitespace-separated tokens:
///
/// ```
/// # use morfo_core::ConversionTable;
/// let table: ConversionTable = "ó o, ł l".parse()?;
/// assert_eq!(table.apply("łódź"), "lodź");
/// # Ok::<(), morfo_core::ConversionError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionTable {
    pairs: Vec<(String, String)>,
}

impl ConversionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the textual form. An empty or blank string yields an empty table.
    pub fn parse(text: &str) -> Result<Self, ConversionError> {
        let mut table = ConversionTable::new();
        // Trailing separators are tolerated.
        let text = text.trim_end_matches(|c: char| c == ',' || c.is_whitespace());
        if text.trim().is_empty() {
            return Ok(table);
        }
        for pair in text.split(',') {
            let mut tokens = pair.split_whitespace();
            match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(from), Some(to), None) => table.insert(from, to)?,
                _ => return Err(ConversionError::Malformed(pair.trim().to_string())),
            }
        }
        Ok(table)
    }

    /// Append a replacement. Each source string may only be mapped once.
    pub fn insert(&mut self, from: &str, to: &str) -> Result<(), ConversionError> {
        if self.pairs.iter().any(|(f, _)| f == from) {
            return Err(ConversionError::Ambiguous(from.to_string()));
        }
        self.pairs.push((from.to_string(), to.to_string()));
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Replace every occurrence of each source string, pair by pair in
    /// insertion order. Borrows the input when nothing matches.
    pub fn apply<'a>(&self, word: &'a str) -> Cow<'a, str> {
        let mut result = Cow::Borrowed(word);
        for (from, to) in &self.pairs {
            if result.contains(from.as_str()) {
                result = Cow::Owned(result.replace(from.as_str(), to));
            }
        }
        result
    }
}

impl FromStr for ConversionTable {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConversionTable::parse(s)
    }
}
