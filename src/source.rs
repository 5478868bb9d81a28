//! Document source seam.
//!
//! The pipeline never fetches text itself; a [`DocumentSource`] hands it
//! the complete raw markdown for a named document. Fetch failures
//! propagate to the caller unrecovered; there is no retry and no partial
//! result.

use std::fs;
use std::path::PathBuf;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::search::Document;
use crate::Options;

/// Failure to produce a document's raw text.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The name is not in the source's registry.
    #[error("unknown document \"{0}\"")]
    UnknownDocument(String),
    /// The registered backing store could not be read.
    #[error("failed to read document \"{name}\"")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Supplies complete raw text for a named document.
pub trait DocumentSource {
    fn fetch(&self, name: &str) -> Result<String, SourceError>;
}

/// Filesystem-backed source over a fixed registry of named documents.
#[derive(Debug, Default)]
pub struct FsSource {
    registry: FxHashMap<String, PathBuf>,
    /// Registration order; the registry map itself is unordered.
    names: Vec<String>,
}

impl FsSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document name with its backing file path.
    pub fn register(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        let name = name.into();
        if !self.registry.contains_key(&name) {
            self.names.push(name.clone());
        }
        self.registry.insert(name, path.into());
    }

    /// Registered document names, in registration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl DocumentSource for FsSource {
    fn fetch(&self, name: &str) -> Result<String, SourceError> {
        let path = self
            .registry
            .get(name)
            .ok_or_else(|| SourceError::UnknownDocument(name.to_string()))?;
        fs::read_to_string(path).map_err(|source| SourceError::Io {
            name: name.to_string(),
            source,
        })
    }
}

/// Fetch and parse each named document in order.
pub fn load_documents(
    source: &impl DocumentSource,
    names: &[String],
    options: &Options,
) -> Result<Vec<Document>, SourceError> {
    let mut documents = Vec::with_capacity(names.len());
    for name in names {
        let raw = source.fetch(name)?;
        documents.push(Document::parse(name.clone(), &raw, options));
    }
    Ok(documents)
}
