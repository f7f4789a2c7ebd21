//! Shared types for morfo dictionary lookups.
//!
//! - [`word_data`] -- A single lookup result (word, stem, tag)
//! - [`tags`] -- Splitting compound tags into tokens
//! - [`conversion`] -- Ordered character replacement tables

pub mod conversion;
pub mod tags;
pub mod word_data;

pub use conversion::{ConversionError, ConversionTable};
pub use tags::split_tags;
pub use word_data::WordData;
