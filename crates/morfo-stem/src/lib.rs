//! Dictionary lookup and stemming over compact FSA dictionaries.
//!
//! A dictionary is a `CFSA2` automaton (read by [`morfo_fsa`]) whose sequences
//! have the shape `form SEP encoded-stem SEP tag`, plus a `.info` metadata file
//! describing the separator, the stem codec and the text encoding.
//!
//! # Architecture
//!
//! - [`codec`] -- Relative stem codecs (`SUFFIX`, `PREFIX`, `INFIX`, `NONE`)
//! - [`metadata`] -- `.info` parsing and attribute validation
//! - [`dictionary`] -- Automaton plus metadata, loaded from files or streams
//! - [`lookup`] -- Word lookup producing [`WordData`] records
//!
//! ```no_run
//! use std::sync::Arc;
//! use morfo_stem::{Dictionary, DictionaryLookup};
//!
//! let dictionary = Arc::new(Dictionary::read("pl.dict")?);
//! let mut lookup = DictionaryLookup::new(Arc::clone(&dictionary));
//! for data in lookup.lookup("psa") {
//!     println!("{data}");
//! }
//! # Ok::<(), morfo_stem::DictionaryError>(())
//! ```

pub mod codec;
pub mod dictionary;
pub mod lookup;
pub mod metadata;

pub use codec::{CodecError, EncoderType, SequenceEncoder};
pub use dictionary::{Dictionary, DictionaryError};
pub use lookup::{DictionaryLookup, Stemmer};
pub use metadata::{DictionaryMetadata, MetadataError};
pub use morfo_core::WordData;
