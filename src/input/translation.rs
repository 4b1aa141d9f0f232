//! Translation file input definitions

use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;
use thiserror::Error;

use crate::ir::translation::{
    LanguageNode,
    LanguageTree,
    TranslationTable,
};
use crate::types::is_valid_language_code;

/// Errors raised while reading translation data.
#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Failed to read translation file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse translation file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected a JSON object for {context}, found {found}")]
    NotAnObject { context: String, found: &'static str },
}

/// Name of a JSON value's type, for error messages.
const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Converts a JSON value into a [`LanguageNode`].
///
/// Numbers and booleans become leaves holding their JSON text, arrays become
/// branches keyed by element index, and `null` yields `None`.
#[must_use]
pub fn node_from_json(value: &Value) -> Option<LanguageNode> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(LanguageNode::Leaf(s.clone())),
        Value::Bool(_) | Value::Number(_) => Some(LanguageNode::Leaf(value.to_string())),
        Value::Array(items) => Some(LanguageNode::Branch(
            items
                .iter()
                .enumerate()
                .filter_map(|(index, item)| Some((index.to_string(), node_from_json(item)?)))
                .collect(),
        )),
        Value::Object(map) => Some(LanguageNode::Branch(
            map.iter()
                .filter_map(|(key, item)| Some((key.clone(), node_from_json(item)?)))
                .collect(),
        )),
    }
}

/// Converts a JSON object into a [`LanguageTree`].
///
/// # Errors
/// Returns [`TranslationError::NotAnObject`] if `value` is not an object.
pub fn tree_from_json(value: &Value) -> Result<LanguageTree, TranslationError> {
    match node_from_json(value) {
        Some(LanguageNode::Branch(tree)) if value.is_object() => Ok(tree),
        _ => Err(TranslationError::NotAnObject {
            context: "a language tree".to_string(),
            found: json_type_name(value),
        }),
    }
}

/// Builds a table from a `{ "<code>": { ... }, ... }` document.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use site_i18n::input::translation::table_from_json;
///
/// let table = table_from_json(&json!({
///     "en": { "nav": { "home": "Home" } },
///     "fr": { "nav": { "home": "Accueil" } }
/// }))
/// .unwrap();
///
/// assert_eq!(table.resolve("fr", "nav.home", ".").into_option().as_deref(), Some("Accueil"));
/// ```
///
/// # Errors
/// Returns [`TranslationError::NotAnObject`] if the document or any language
/// entry is not an object.
pub fn table_from_json(value: &Value) -> Result<TranslationTable, TranslationError> {
    let Value::Object(languages) = value else {
        return Err(TranslationError::NotAnObject {
            context: "a translation table".to_string(),
            found: json_type_name(value),
        });
    };

    let mut table = TranslationTable::new();
    for (language, tree) in languages {
        let tree = tree_from_json(tree).map_err(|_| TranslationError::NotAnObject {
            context: format!("language '{language}'"),
            found: json_type_name(tree),
        })?;
        table.insert(language.clone(), tree);
    }
    Ok(table)
}

/// ISO 639-1 language codes, sorted for binary search
const ISO_639_1: &[&str] = &[
    "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg", "bh",
    "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv", "cy", "da",
    "de", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi", "fj", "fo", "fr",
    "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr", "ht", "hu", "hy", "hz",
    "ia", "id", "ie", "ig", "ii", "ik", "io", "is", "it", "iu", "ja", "jv", "ka", "kg", "ki", "kj",
    "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw", "ky", "la", "lb", "lg", "li", "ln",
    "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml", "mn", "mr", "ms", "mt", "my", "na", "nb",
    "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv", "ny", "oc", "oj", "om", "or", "os", "pa", "pi",
    "pl", "ps", "pt", "qu", "rm", "rn", "ro", "ru", "rw", "sa", "sc", "sd", "se", "sg", "si", "sk",
    "sl", "sm", "sn", "so", "sq", "sr", "ss", "st", "su", "sv", "sw", "ta", "te", "tg", "th", "ti",
    "tk", "tl", "tn", "to", "tr", "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz", "ve", "vi", "vo",
    "wa", "wo", "xh", "yi", "yo", "za", "zh", "zu",
];

/// ファイル名やディレクトリ名が言語コードかどうか
///
/// プライマリサブタグが ISO 639-1 の 2 文字コードで、全体が言語コードの形式を満たすもの。
fn is_language_segment(segment: &str) -> bool {
    let primary = segment.split(['-', '_']).next().unwrap_or_default().to_ascii_lowercase();
    ISO_639_1.binary_search(&primary.as_str()).is_ok() && is_valid_language_code(segment)
}

/// Detect language from a translation file path relative to the site root
///
/// Only the two segments nearest the file are considered. The parent
/// directory wins when it is a language code, otherwise the file stem is
/// used. Segments above the parent are ignored.
///
/// # Examples
/// - `locales/en.json` → `en`
/// - `lang/pt-BR.json` → `pt-BR`
/// - `i18n/fr/site.json` → `fr`
/// - `locales/fr/ui.json` → `fr`
/// - `locales/common.json` → `None`
///
/// # Returns
/// Detected language code or `None`
#[must_use]
pub fn detect_language_from_path(relative_path: &Path) -> Option<String> {
    let parent = relative_path
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned());
    if let Some(parent) = parent
        && is_language_segment(&parent)
    {
        return Some(parent);
    }

    let file_name = relative_path.file_name()?.to_string_lossy();
    let stem = file_name.split('.').next().unwrap_or_default();
    is_language_segment(stem).then(|| stem.to_string())
}

/// Load a translation file into a `(language, tree)` pair.
///
/// The language is detected from the part of `file_path` below `site_root`.
/// Returns `Ok(None)` when no language can be detected.
///
/// # Errors
/// Returns error if file read or JSON parse fails, or the root is not an object.
pub fn load_translation_file(
    site_root: &Path,
    file_path: &Path,
) -> Result<Option<(String, LanguageTree)>, TranslationError> {
    let relative_path = file_path.strip_prefix(site_root).unwrap_or(file_path);
    let Some(language) = detect_language_from_path(relative_path) else {
        tracing::warn!(path = %relative_path.display(), "Could not detect language from path");
        return Ok(None);
    };

    let content = std::fs::read_to_string(file_path)
        .map_err(|source| TranslationError::Io { path: file_path.to_path_buf(), source })?;

    let json: Value = serde_json::from_str(&content)
        .map_err(|source| TranslationError::Parse { path: file_path.to_path_buf(), source })?;

    let tree = tree_from_json(&json)?;
    tracing::debug!(path = %relative_path.display(), %language, "Loaded translation file");

    Ok(Some((language, tree)))
}
