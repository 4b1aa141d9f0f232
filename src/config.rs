//! Site configuration: settings types, `.site-i18n.json` loading and validation.

/// Config file loader
mod loader;
/// Translation file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use loader::{
    CONFIG_FILE_NAME,
    config_path,
    load_site_settings,
};
pub use matcher::{
    FileMatcher,
    MatcherError,
};
pub use types::{
    ConfigError,
    I18nSettings,
    MissingKeyPolicy,
    PageSettings,
    SiteSettings,
    TranslationFilesConfig,
    ValidationError,
};
