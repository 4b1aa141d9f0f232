use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::types::is_valid_language_code;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "i18n.keySeparator")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }

    /// Nests the field path under `parent`.
    fn prefixed(self, parent: &str) -> Self {
        Self { field_path: format!("{parent}.{}", self.field_path), message: self.message }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to read configuration file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Renders validation errors as a numbered list.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// What to show when a bound key does not resolve for the active language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MissingKeyPolicy {
    /// Leave the node's current text untouched.
    #[default]
    KeepExisting,
    /// Retry against `defaultLanguage`, then leave the node untouched.
    FallbackToDefault,
}

/// Top-level settings read from `.site-i18n.json`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    pub i18n: I18nSettings,
    pub page: PageSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// Used when no preference is stored or the stored one is malformed.
    pub default_language: String,

    /// Preference storage key holding the chosen language.
    pub storage_key: String,

    pub key_separator: String,

    /// Attribute holding a node's binding key (`data-i18n="hero.title"`).
    pub binding_attribute: String,
    /// Attribute holding a selector control's language (`data-lang="fr"`).
    pub language_attribute: String,
    /// Class marking language selector controls.
    pub selector_class: String,
    /// Class set on the selector control of the active language.
    pub active_class: String,

    pub missing_key_policy: MissingKeyPolicy,

    pub translation_files: TranslationFilesConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    pub file_pattern: String,
    pub exclude_patterns: Vec<String>,
}

/// Settings for the page controllers (navbar, header, splash, contact form).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSettings {
    /// Header turns active once the scroll offset is strictly greater than this.
    pub scroll_threshold: u32,
    pub splash_timeout_ms: u64,
    /// Delay between fading the splash screen and removing it.
    pub splash_fade_ms: u64,
    /// How long the contact form success message stays visible.
    pub message_timeout_ms: u64,
    pub contact_recipient: String,
}

impl SiteSettings {
    /// # Errors
    /// Every invalid field of `i18n` and `page`, with its JSON path.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(i18n_errors) = self.i18n.validate() {
            errors.extend(i18n_errors.into_iter().map(|e| e.prefixed("i18n")));
        }
        if let Err(page_errors) = self.page.validate() {
            errors.extend(page_errors.into_iter().map(|e| e.prefixed("page")));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl I18nSettings {
    /// # Errors
    /// - Required field is empty
    /// - Malformed default language
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if !is_valid_language_code(&self.default_language) {
            errors.push(ValidationError::new(
                "defaultLanguage",
                format!(
                    "'{}' is not a valid language code. Example: \"en\" or \"pt-BR\"",
                    self.default_language
                ),
            ));
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        for (field, value) in [
            ("storageKey", &self.storage_key),
            ("bindingAttribute", &self.binding_attribute),
            ("languageAttribute", &self.language_attribute),
            ("selectorClass", &self.selector_class),
            ("activeClass", &self.active_class),
        ] {
            if value.trim().is_empty() {
                errors.push(ValidationError::new(field, "The value cannot be empty"));
            }
        }

        if self.translation_files.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                "The pattern cannot be empty. Example: \"**/locales/*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.translation_files.file_pattern) {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                format!("Invalid glob pattern '{}': {e}", self.translation_files.file_pattern),
            ));
        }

        for (index, pattern) in self.translation_files.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("translationFiles.excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl PageSettings {
    /// # Errors
    /// - Zero timeouts
    /// - Recipient that is not an email address
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.splash_timeout_ms == 0 {
            errors.push(ValidationError::new("splashTimeoutMs", "The timeout must be positive"));
        }
        if self.message_timeout_ms == 0 {
            errors.push(ValidationError::new("messageTimeoutMs", "The timeout must be positive"));
        }

        let recipient = self.contact_recipient.trim();
        let looks_like_address = recipient
            .split_once('@')
            .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'));
        if !looks_like_address {
            errors.push(ValidationError::new(
                "contactRecipient",
                format!("'{recipient}' is not an email address"),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            storage_key: "preferred-language".to_string(),
            key_separator: ".".to_string(),
            binding_attribute: "data-i18n".to_string(),
            language_attribute: "data-lang".to_string(),
            selector_class: "lang-btn".to_string(),
            active_class: "active".to_string(),
            missing_key_policy: MissingKeyPolicy::default(),
            translation_files: TranslationFilesConfig::default(),
        }
    }
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self {
            file_pattern: "**/{locales,lang,i18n}/**/*.json".to_string(),
            exclude_patterns: vec!["node_modules/**".to_string()],
        }
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            scroll_threshold: 80,
            splash_timeout_ms: 4000,
            splash_fade_ms: 500,
            message_timeout_ms: 5000,
            contact_recipient: "nexorawebdev@gmail.com".to_string(),
        }
    }
}
