//! Translation file discovery.

pub mod types;
pub mod workspace;

pub use types::IndexerError;
pub use workspace::load_translation_dir;
