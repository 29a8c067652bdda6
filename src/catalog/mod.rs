pub mod entry;
pub mod word_list;

use std::fs;
use std::path::{Path, PathBuf};

use rust_embed::Embed;
use thiserror::Error;

pub use entry::{Stage, StageSelector, VocabularyEntry};

#[derive(Embed)]
#[folder = "assets/data/"]
struct DataAssets;

const BUNDLED_VOCABULARY: &str = "vocabulary.json";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read vocabulary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse vocabulary data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("bundled asset {0} is missing")]
    MissingAsset(&'static str),
    #[error("vocabulary data contains no usable entries")]
    Empty,
}

/// Read-only, ordered collection of vocabulary entries, loaded once at startup.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: Vec<VocabularyEntry>,
}

impl Catalog {
    pub fn bundled() -> Result<Self, CatalogError> {
        let file =
            DataAssets::get(BUNDLED_VOCABULARY).ok_or(CatalogError::MissingAsset(BUNDLED_VOCABULARY))?;
        Self::from_json(&String::from_utf8_lossy(file.data.as_ref()))
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        // `null` array slots are skipped like records missing a word.
        let raw: Vec<Option<VocabularyEntry>> = serde_json::from_str(json)?;
        let catalog = Self::from_entries(raw.into_iter().flatten().collect());
        if catalog.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(catalog)
    }

    /// Builds a catalog from already-parsed entries, dropping any without a
    /// word or a category.
    pub fn from_entries(raw: Vec<VocabularyEntry>) -> Self {
        let total = raw.len();
        let entries: Vec<VocabularyEntry> = raw.into_iter().filter(|e| e.is_usable()).collect();
        let dropped = total - entries.len();
        if dropped > 0 {
            tracing::warn!(dropped, "skipped vocabulary entries without word or category");
        }
        tracing::info!(entries = entries.len(), "vocabulary catalog loaded");
        Self { entries }
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
