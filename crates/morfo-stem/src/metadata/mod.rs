// Dictionary metadata (`.info` files).
//
// Every automaton file `X.dict` comes with an `X.info` properties file that
// says how the sequences inside it were built: which byte separates the
// inflected form from the encoded stem and tag, how stems are encoded, which
// text encoding the bytes use, and which character conversions to apply.

mod properties;

use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};
use morfo_core::{ConversionError, ConversionTable};

use crate::codec::{EncoderType, UnknownEncoder};

pub use properties::Properties;

pub const SEPARATOR: &str = "fsa.dict.separator";
pub const ENCODING: &str = "fsa.dict.encoding";
pub const ENCODER: &str = "fsa.dict.encoder";
pub const LICENSE: &str = "fsa.dict.license";
pub const AUTHOR: &str = "fsa.dict.author";
pub const CREATED: &str = "fsa.dict.created";
pub const IGNORE_DIACRITICS: &str = "fsa.dict.speller.ignore-diacritics";
pub const INPUT_CONVERSION: &str = "fsa.dict.input-conversion";
pub const OUTPUT_CONVERSION: &str = "fsa.dict.output-conversion";

const KNOWN_ATTRIBUTES: [&str; 9] = [
    SEPARATOR,
    ENCODING,
    ENCODER,
    LICENSE,
    AUTHOR,
    CREATED,
    IGNORE_DIACRITICS,
    INPUT_CONVERSION,
    OUTPUT_CONVERSION,
];

/// Metadata file extension.
pub const METADATA_EXTENSION: &str = "info";

/// Error type for reading and validating dictionary metadata.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("failed to read metadata: {0}")]
    Io(#[from] io::Error),

    #[error("malformed escape {escape:?} on line {line}")]
    MalformedEscape { line: usize, escape: String },

    #[error("required attribute missing: {0}")]
    MissingAttribute(&'static str),

    #[error("separator must be a single character encodable as one byte, got {0:?}")]
    InvalidSeparator(String),

    #[error("unknown text encoding: {0:?}")]
    UnknownEncoding(String),

    #[error(transparent)]
    UnknownEncoder(#[from] UnknownEncoder),

    #[error("attribute {key} is not a boolean: {value:?}")]
    InvalidBoolean { key: &'static str, value: String },

    #[error("invalid conversion table in {key}: {source}")]
    Conversion {
        key: &'static str,
        #[source]
        source: ConversionError,
    },
}

/// Validated dictionary attributes.
#[derive(Debug, Clone)]
pub struct DictionaryMetadata {
    separator: u8,
    separator_char: char,
    encoding: &'static Encoding,
    encoder: EncoderType,
    ignore_diacritics: bool,
    input_conversion: ConversionTable,
    output_conversion: ConversionTable,
    attributes: Properties,
}

impl DictionaryMetadata {
    /// Parse and validate a `.info` stream.
    pub fn read<R: Read>(reader: R) -> Result<Self, MetadataError> {
        let props = Properties::load(BufReader::new(reader))?;
        Self::from_properties(props)
    }

    /// Validate already parsed attributes.
    pub fn from_properties(attributes: Properties) -> Result<Self, MetadataError> {
        for key in attributes.keys() {
            if !KNOWN_ATTRIBUTES.contains(&key) {
                log::debug!("ignoring unknown metadata attribute {key}");
            }
        }

        let encoder: EncoderType = attributes
            .get(ENCODER)
            .ok_or(MetadataError::MissingAttribute(ENCODER))?
            .parse()?;

        let encoding = match attributes.get(ENCODING) {
            Some(label) => Encoding::for_label(label.trim().as_bytes())
                .ok_or_else(|| MetadataError::UnknownEncoding(label.to_string()))?,
            None => UTF_8,
        };

        let value = attributes
            .get(SEPARATOR)
            .ok_or(MetadataError::MissingAttribute(SEPARATOR))?;
        let mut chars = value.chars();
        let separator_char = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(MetadataError::InvalidSeparator(value.to_string())),
        };
        let separator = encode_separator(encoding, separator_char)
            .ok_or_else(|| MetadataError::InvalidSeparator(separator_char.to_string()))?;

        let ignore_diacritics = match attributes.get(IGNORE_DIACRITICS) {
            Some(value) => parse_bool(value).ok_or_else(|| MetadataError::InvalidBoolean {
                key: IGNORE_DIACRITICS,
                value: value.to_string(),
            })?,
            None => false,
        };

        let input_conversion = conversion(&attributes, INPUT_CONVERSION)?;
        let output_conversion = conversion(&attributes, OUTPUT_CONVERSION)?;

        Ok(DictionaryMetadata {
            separator,
            separator_char,
            encoding,
            encoder,
            ignore_diacritics,
            input_conversion,
            output_conversion,
            attributes,
        })
    }

    /// `X.dict` -> `X.info`; a path without extension gets `.info` appended.
    pub fn expected_metadata_file_name(dictionary: impl AsRef<Path>) -> PathBuf {
        dictionary.as_ref().with_extension(METADATA_EXTENSION)
    }

    /// Separator byte in the dictionary encoding.
    pub fn separator(&self) -> u8 {
        self.separator
    }

    pub fn separator_char(&self) -> char {
        self.separator_char
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn encoder_type(&self) -> EncoderType {
        self.encoder
    }

    pub fn license(&self) -> Option<&str> {
        self.attributes.get(LICENSE)
    }

    pub fn author(&self) -> Option<&str> {
        self.attributes.get(AUTHOR)
    }

    pub fn created(&self) -> Option<&str> {
        self.attributes.get(CREATED)
    }

    pub fn ignore_diacritics(&self) -> bool {
        self.ignore_diacritics
    }

    pub fn input_conversion(&self) -> &ConversionTable {
        &self.input_conversion
    }

    pub fn output_conversion(&self) -> &ConversionTable {
        &self.output_conversion
    }

    /// Raw attribute value, including keys this crate does not interpret.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key)
    }

    pub fn attributes(&self) -> &Properties {
        &self.attributes
    }
}

fn encode_separator(encoding: &'static Encoding, c: char) -> Option<u8> {
    let mut buf = [0u8; 4];
    let (bytes, _, had_errors) = encoding.encode(c.encode_utf8(&mut buf));
    match *bytes {
        [b] if !had_errors => Some(b),
        _ => None,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn conversion(attributes: &Properties, key: &'static str) -> Result<ConversionTable, MetadataError> {
    match attributes.get(key) {
        Some(text) => {
            ConversionTable::parse(text).map_err(|source| MetadataError::Conversion { key, source })
        }
        None => Ok(ConversionTable::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::ISO_8859_2;

    fn metadata(text: &str) -> Result<DictionaryMetadata, MetadataError> {
        DictionaryMetadata::read(text.as_bytes())
    }

    #[test]
    fn defaults() {
        let meta = metadata("fsa.dict.encoder=SUFFIX\nfsa.dict.separator=+\n").unwrap();
        assert_eq!(meta.separator(), b'+');
        assert_eq!(meta.separator_char(), '+');
        assert_eq!(meta.encoding(), UTF_8);
        assert_eq!(meta.encoder_type(), EncoderType::Suffix);
        assert!(!meta.ignore_diacritics());
        assert!(meta.input_conversion().is_empty());
        assert!(meta.output_conversion().is_empty());
        assert_eq!(meta.license(), None);
    }

    #[test]
    fn full_attribute_set() {
        let meta = metadata(
            "# Polish\n\
             fsa.dict.separator=|\n\
             fsa.dict.encoding=iso-8859-2\n\
             fsa.dict.encoder=infix\n\
             fsa.dict.license=LGPL\n\
             fsa.dict.author=Jan Kowalski\n\
             fsa.dict.created=2024-01-01\n\
             fsa.dict.speller.ignore-diacritics=yes\n\
             fsa.dict.input-conversion=ó o\n\
             fsa.dict.output-conversion=o ó, x y\n\
             fsa.dict.frequency-included=false\n",
        )
        .unwrap();
        assert_eq!(meta.separator(), b'|');
        assert_eq!(meta.encoding(), ISO_8859_2);
        assert_eq!(meta.encoder_type(), EncoderType::Infix);
        assert_eq!(meta.license(), Some("LGPL"));
        assert_eq!(meta.author(), Some("Jan Kowalski"));
        assert_eq!(meta.created(), Some("2024-01-01"));
        assert!(meta.ignore_diacritics());
        assert_eq!(meta.input_conversion().len(), 1);
        assert_eq!(meta.output_conversion().len(), 2);
        assert_eq!(meta.attribute("fsa.dict.frequency-included"), Some("false"));
    }

    #[test]
    fn encoder_is_required() {
        let err = metadata("fsa.dict.separator=+\n").unwrap_err();
        assert!(matches!(err, MetadataError::MissingAttribute(ENCODER)));
    }

    #[test]
    fn separator_is_required() {
        let err = metadata("fsa.dict.encoder=SUFFIX\n").unwrap_err();
        assert!(matches!(err, MetadataError::MissingAttribute(SEPARATOR)));
        assert_eq!(err.to_string(), "required attribute missing: fsa.dict.separator");
    }

    #[test]
    fn unknown_encoder() {
        let err = metadata("fsa.dict.encoder=FSA5\n").unwrap_err();
        assert!(matches!(err, MetadataError::UnknownEncoder(_)));
    }

    #[test]
    fn unknown_encoding() {
        let err = metadata("fsa.dict.encoder=SUFFIX\nfsa.dict.encoding=klingon\n").unwrap_err();
        assert!(matches!(err, MetadataError::UnknownEncoding(label) if label == "klingon"));
    }

    #[test]
    fn separator_must_be_one_byte() {
        for bad in ["++", "", "ł"] {
            let text = format!("fsa.dict.encoder=SUFFIX\nfsa.dict.separator={bad}\n");
            assert!(
                matches!(metadata(&text), Err(MetadataError::InvalidSeparator(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn separator_in_single_byte_encoding() {
        let meta = metadata(
            "fsa.dict.encoder=SUFFIX\nfsa.dict.encoding=iso-8859-2\nfsa.dict.separator=ł\n",
        )
        .unwrap();
        assert_eq!(meta.separator(), 0xb3);
        assert_eq!(meta.separator_char(), 'ł');
    }

    #[test]
    fn invalid_boolean() {
        let err = metadata(
            "fsa.dict.encoder=SUFFIX\nfsa.dict.separator=+\nfsa.dict.speller.ignore-diacritics=maybe\n",
        )
        .unwrap_err();
        assert!(matches!(err, MetadataError::InvalidBoolean { .. }));
    }

    #[test]
    fn invalid_conversion() {
        let err =
            metadata("fsa.dict.encoder=SUFFIX\nfsa.dict.separator=+\nfsa.dict.input-conversion=a\n")
                .unwrap_err();
        assert!(matches!(
            err,
            MetadataError::Conversion {
                key: INPUT_CONVERSION,
                ..
            }
        ));
    }

    #[test]
    fn metadata_file_name() {
        assert_eq!(
            DictionaryMetadata::expected_metadata_file_name("dicts/pl.dict"),
            PathBuf::from("dicts/pl.info")
        );
        assert_eq!(
            DictionaryMetadata::expected_metadata_file_name("dicts/polish"),
            PathBuf::from("dicts/polish.info")
        );
    }
}
