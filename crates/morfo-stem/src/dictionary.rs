// A loaded dictionary: automaton plus metadata.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use morfo_fsa::{Fsa, FsaError};

use crate::metadata::{DictionaryMetadata, MetadataError};

/// Error type for dictionary loading.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    /// A dictionary or metadata file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("failed to load automaton: {0}")]
    Fsa(#[from] FsaError),

    #[error("invalid dictionary metadata: {0}")]
    Metadata(#[from] MetadataError),
}

/// An immutable automaton together with the metadata describing its
/// sequences. Share it between lookups with `Arc<Dictionary>`.
pub struct Dictionary {
    fsa: Box<dyn Fsa + Send + Sync>,
    metadata: DictionaryMetadata,
}

impl Dictionary {
    pub fn new(fsa: Box<dyn Fsa + Send + Sync>, metadata: DictionaryMetadata) -> Self {
        Dictionary { fsa, metadata }
    }

    /// Load `path` and the metadata file next to it (`X.dict` -> `X.info`).
    pub fn read(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let info_path = DictionaryMetadata::expected_metadata_file_name(path);
        let fsa_file = open(path)?;
        let info_file = open(&info_path)?;
        let dictionary = Self::read_from(BufReader::new(fsa_file), info_file)?;
        log::info!(
            "loaded dictionary {} ({} encoder, {})",
            path.display(),
            dictionary.metadata.encoder_type(),
            dictionary.metadata.encoding().name()
        );
        Ok(dictionary)
    }

    /// Load from an automaton stream and a metadata stream.
    pub fn read_from<F: Read, M: Read>(fsa: F, metadata: M) -> Result<Self, DictionaryError> {
        let metadata = DictionaryMetadata::read(metadata)?;
        let fsa = morfo_fsa::read(fsa)?;
        Ok(Dictionary::new(fsa, metadata))
    }

    pub fn fsa(&self) -> &(dyn Fsa + Send + Sync) {
        self.fsa.as_ref()
    }

    pub fn metadata(&self) -> &DictionaryMetadata {
        &self.metadata
    }
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
            .field("flags", &self.fsa.flags())
            .field("size_in_bytes", &self.fsa.size_in_bytes())
            .field("metadata", &self.metadata)
            .finish()
    }
}

fn open(path: &Path) -> Result<File, DictionaryError> {
    File::open(path).map_err(|source| DictionaryError::Open {
        path: path.to_path_buf(),
        source,
    })
}
