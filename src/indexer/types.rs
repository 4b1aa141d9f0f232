//! Indexer type definitions.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::MatcherError;

#[derive(Error, Debug)]
pub enum IndexerError {
    /// The site root is missing or not a directory
    #[error("Site root is not a directory: {}", .0.display())]
    InvalidRoot(PathBuf),
    /// Translation file patterns could not be compiled
    #[error(transparent)]
    Matcher(#[from] MatcherError),
}
