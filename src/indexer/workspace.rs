//! Builds a [`TranslationTable`] from the locale files under a site root.

use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

use crate::config::{
    FileMatcher,
    I18nSettings,
};
use crate::indexer::types::IndexerError;
use crate::input::translation::load_translation_file;
use crate::ir::translation::TranslationTable;

/// Loads every translation file under `site_root` into one table.
///
/// Files are visited in path order, so when two files provide the same key
/// for the same language the later path wins. Unreadable or malformed
/// files are logged and skipped.
///
/// # Errors
/// Returns error if `site_root` is not a directory or the configured
/// patterns are invalid.
pub fn load_translation_dir(
    site_root: &Path,
    settings: &I18nSettings,
) -> Result<TranslationTable, IndexerError> {
    tracing::debug!(site_root = %site_root.display(), "Loading translation files");

    if !site_root.is_dir() {
        return Err(IndexerError::InvalidRoot(site_root.to_path_buf()));
    }

    let matcher = FileMatcher::new(site_root.to_path_buf(), settings)?;
    let mut table = TranslationTable::new();

    for file in find_translation_files(&matcher) {
        match load_translation_file(site_root, &file) {
            Ok(Some((language, tree))) => table.insert(language, tree),
            Ok(None) => {}
            Err(error) => {
                tracing::warn!("Skipping translation file: {}", error);
            }
        }
    }

    tracing::debug!(languages = table.len(), "Translation files loaded");
    Ok(table)
}

/// 翻訳ファイルを検索
fn find_translation_files(matcher: &FileMatcher) -> Vec<PathBuf> {
    let site_root = matcher.site_root();
    let mut found_files = Vec::new();

    for result in WalkBuilder::new(site_root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .sort_by_file_path(Path::cmp)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        if matcher.is_translation_file(entry.path()) {
            found_files.push(entry.path().to_path_buf());
        }
    }

    found_files
}
