//! Checks a site's translation files and reports keys missing per language.

use std::path::PathBuf;
use std::process::ExitCode;

use site_i18n::config::load_site_settings;
use site_i18n::i18n::check_consistency;
use site_i18n::indexer::load_translation_dir;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let site_root = std::env::args_os().nth(1).map_or_else(|| PathBuf::from("."), PathBuf::from);

    let settings = match load_site_settings(&site_root) {
        Ok(settings) => settings.i18n,
        Err(error) => {
            tracing::error!("Failed to load configuration: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let table = match load_translation_dir(&site_root, &settings) {
        Ok(table) => table,
        Err(error) => {
            tracing::error!("Failed to load translations: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let missing = check_consistency(&table, &settings.key_separator);
    for entry in &missing {
        tracing::warn!(language = %entry.language, key = %entry.key, "{}", entry);
    }

    tracing::info!(
        root = %site_root.display(),
        languages = table.len(),
        missing = missing.len(),
        "Translation check finished"
    );

    if missing.is_empty() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
