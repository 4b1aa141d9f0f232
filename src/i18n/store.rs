//! Translation store: active language, document application, persistence.

use crate::config::{
    I18nSettings,
    MissingKeyPolicy,
};
use crate::dom::{
    Document,
    Listener,
};
use crate::ir::translation::{
    Resolution,
    TranslationTable,
};
use crate::storage::PreferenceStore;
use crate::types::is_valid_language_code;

/// Holder of the active language.
///
/// Owned by a [`TranslationStore`] so that independent stores never share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageContext {
    /// Currently selected language code.
    active: String,
}

impl LanguageContext {
    /// Context starting at `language`.
    #[must_use]
    pub fn new(language: impl Into<String>) -> Self {
        Self { active: language.into() }
    }

    /// Currently selected language code.
    #[must_use]
    pub fn active_language(&self) -> &str {
        &self.active
    }

    /// Replaces the selected language code.
    pub fn set_active_language(&mut self, language: impl Into<String>) {
        self.active = language.into();
    }
}

/// What one pass of [`TranslationStore::apply_to_document`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Bound nodes whose text was replaced.
    pub updated: usize,
    /// Binding keys left unresolved, one entry per node.
    pub missing: Vec<String>,
}

/// Keeps bound document nodes in sync with the active language.
#[derive(Debug, Clone)]
pub struct TranslationStore {
    /// Every language's strings, read-only.
    table: TranslationTable,
    /// Active language holder.
    context: LanguageContext,
    /// Attribute names, storage key and missing key policy.
    settings: I18nSettings,
    /// Set once [`initialize`](Self::initialize) has run.
    initialized: bool,
}

impl TranslationStore {
    /// Creates a store whose active language is the configured default.
    #[must_use]
    pub fn new(table: TranslationTable, settings: I18nSettings) -> Self {
        let context = LanguageContext::new(settings.default_language.clone());
        Self { table, context, settings, initialized: false }
    }

    /// Translation table this store reads from.
    #[must_use]
    pub const fn table(&self) -> &TranslationTable {
        &self.table
    }

    /// Settings the store was created with.
    #[must_use]
    pub const fn settings(&self) -> &I18nSettings {
        &self.settings
    }

    /// This store's language context.
    #[must_use]
    pub const fn context(&self) -> &LanguageContext {
        &self.context
    }

    /// Currently selected language code.
    #[must_use]
    pub fn active_language(&self) -> &str {
        self.context.active_language()
    }

    /// Sets the active language without touching the document or storage.
    pub fn set_active_language(&mut self, language: impl Into<String>) {
        self.context.set_active_language(language);
    }

    /// Configured `defaultLanguage`.
    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.settings.default_language
    }

    /// Languages present in the table, in sorted order.
    pub fn language_codes(&self) -> impl Iterator<Item = &str> {
        self.table.language_codes()
    }

    /// Whether the table has strings for `language`.
    #[must_use]
    pub fn has_language(&self, language: &str) -> bool {
        self.table.contains(language)
    }

    /// Whether [`initialize`](Self::initialize) has run.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Resolves `path` for `language` using the configured key separator.
    #[must_use]
    pub fn resolve(&self, language: &str, path: &str) -> Resolution {
        self.table.resolve(language, path, &self.settings.key_separator)
    }

    /// [`resolve`](Self::resolve), then the missing key policy.
    fn resolve_for_display(&self, language: &str, path: &str) -> Resolution {
        match (self.resolve(language, path), self.settings.missing_key_policy) {
            (Resolution::NotFound, MissingKeyPolicy::FallbackToDefault)
                if language != self.default_language() =>
            {
                self.resolve(self.default_language(), path)
            }
            (resolution, _) => resolution,
        }
    }

    /// Rewrites every bound node whose key resolves for `language`.
    ///
    /// Nodes whose key does not resolve keep their current text.
    pub fn apply_to_document(&self, doc: &mut dyn Document, language: &str) -> ApplyReport {
        let mut report = ApplyReport::default();

        for node in doc.query_attribute(&self.settings.binding_attribute) {
            let Some(key) =
                doc.attribute(node, &self.settings.binding_attribute).map(ToString::to_string)
            else {
                continue;
            };

            match self.resolve_for_display(language, &key) {
                Resolution::Found(text) => {
                    doc.set_text(node, &text);
                    report.updated += 1;
                }
                Resolution::NotFound => {
                    tracing::debug!(%language, %key, %node, "Translation key not found");
                    report.missing.push(key);
                }
            }
        }

        report
    }

    /// Makes `language` active: indicator, document text and stored preference.
    ///
    /// Unknown languages are accepted; nothing resolves for them, so bound
    /// text stays as it is. Storage failures are logged and ignored.
    pub fn switch_language(
        &mut self,
        doc: &mut dyn Document,
        storage: &mut dyn PreferenceStore,
        language: &str,
    ) -> ApplyReport {
        tracing::debug!(from = %self.active_language(), to = %language, "Switching language");

        self.context.set_active_language(language);
        self.update_indicator(doc, language);
        let report = self.apply_to_document(doc, language);

        if let Err(error) = storage.set(&self.settings.storage_key, language) {
            tracing::warn!("Failed to persist language preference: {}", error);
        }

        report
    }

    /// Marks exactly the selector controls for `language` as active.
    fn update_indicator(&self, doc: &mut dyn Document, language: &str) {
        for control in doc.query_class(&self.settings.selector_class) {
            let is_selected = doc.attribute(control, &self.settings.language_attribute)
                == Some(language);
            doc.set_class(control, &self.settings.active_class, is_selected);
        }
    }

    /// The stored language, or the default when it is absent, malformed or unreadable.
    #[must_use]
    pub fn preferred_language(&self, storage: &dyn PreferenceStore) -> String {
        match storage.get(&self.settings.storage_key) {
            Ok(Some(language)) if is_valid_language_code(&language) => language,
            Ok(Some(language)) => {
                tracing::debug!(%language, "Ignoring malformed stored language");
                self.settings.default_language.clone()
            }
            Ok(None) => self.settings.default_language.clone(),
            Err(error) => {
                tracing::warn!("Failed to read language preference: {}", error);
                self.settings.default_language.clone()
            }
        }
    }

    /// Applies the stored preference and wires the selector controls.
    ///
    /// Only the first call does anything; later calls return `None`.
    pub fn initialize(
        &mut self,
        doc: &mut dyn Document,
        storage: &mut dyn PreferenceStore,
    ) -> Option<ApplyReport> {
        if self.initialized {
            tracing::debug!("Translation store already initialized");
            return None;
        }
        self.initialized = true;

        let language = self.preferred_language(storage);
        let report = self.switch_language(doc, storage, &language);

        for control in doc.query_class(&self.settings.selector_class) {
            let Some(code) =
                doc.attribute(control, &self.settings.language_attribute).map(ToString::to_string)
            else {
                continue;
            };
            doc.add_listener(control, Listener::SwitchLanguage(code));
        }

        tracing::debug!(
            language = %self.active_language(),
            updated = report.updated,
            missing = report.missing.len(),
            "Translation store initialized"
        );
        Some(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::ir::translation::key_paths;
    use crate::storage::{
        MemoryStore,
        StorageError,
    };
    use crate::test_utils::{
        sample_page,
        sample_table,
    };

    /// Storage whose every access fails.
    #[derive(Debug)]
    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }
    }

    /// Store over the en/fr sample table with default settings.
    fn store() -> TranslationStore {
        TranslationStore::new(sample_table(), I18nSettings::default())
    }

    /// Value persisted under the default storage key.
    fn stored_language(storage: &MemoryStore) -> Option<String> {
        storage.get("preferred-language").unwrap()
    }

    #[googletest::test]
    fn test_resolves_every_shared_key_to_non_empty_text() {
        let store = store();
        let table = store.table();
        let mut shared: Option<std::collections::BTreeSet<String>> = None;
        for (_, tree) in table.iter() {
            let paths = key_paths(tree, ".");
            shared = Some(match shared {
                Some(acc) => acc.intersection(&paths).cloned().collect(),
                None => paths,
            });
        }

        for language in table.language_codes() {
            for key in shared.iter().flatten() {
                let text = store.resolve(language, key).into_option();
                assert!(text.is_some_and(|t| !t.is_empty()), "{language}/{key}");
            }
        }
    }

    #[googletest::test]
    fn test_switch_to_french_and_back() {
        let (mut doc, nodes) = sample_page();
        let mut storage = MemoryStore::new();
        let mut store = store();

        store.switch_language(&mut doc, &mut storage, "fr");
        expect_that!(doc.text(nodes.nav_home), some(eq("Accueil")));
        expect_that!(doc.text(nodes.footer_home), some(eq("Accueil")));
        expect_that!(doc.text(nodes.nav_about), some(eq("À propos")));

        store.switch_language(&mut doc, &mut storage, "en");
        expect_that!(doc.text(nodes.nav_home), some(eq("Home")));
        expect_that!(doc.text(nodes.footer_home), some(eq("Home")));
    }

    #[googletest::test]
    fn test_switch_moves_active_indicator() {
        let (mut doc, nodes) = sample_page();
        let mut storage = MemoryStore::new();
        let mut store = store();

        store.switch_language(&mut doc, &mut storage, "fr");
        expect_that!(doc.has_class(nodes.fr_button, "active"), eq(true));
        expect_that!(doc.has_class(nodes.en_button, "active"), eq(false));

        store.switch_language(&mut doc, &mut storage, "en");
        expect_that!(doc.has_class(nodes.fr_button, "active"), eq(false));
        expect_that!(doc.has_class(nodes.en_button, "active"), eq(true));
    }

    #[rstest]
    fn test_switch_is_idempotent() {
        let (mut once_doc, _) = sample_page();
        let mut once_storage = MemoryStore::new();
        let mut once_store = store();
        once_store.switch_language(&mut once_doc, &mut once_storage, "fr");

        let (mut twice_doc, _) = sample_page();
        let mut twice_storage = MemoryStore::new();
        let mut twice_store = store();
        twice_store.switch_language(&mut twice_doc, &mut twice_storage, "fr");
        let second = twice_store.switch_language(&mut twice_doc, &mut twice_storage, "fr");

        assert_eq!(format!("{once_doc:?}"), format!("{twice_doc:?}"));
        assert_eq!(once_storage, twice_storage);
        assert_eq!(once_store.active_language(), twice_store.active_language());
        assert_eq!(second.updated, 6);
    }

    #[googletest::test]
    fn test_switch_to_unknown_language_keeps_text_but_persists() {
        let (mut doc, nodes) = sample_page();
        let before = format!("{doc:?}");
        let mut storage = MemoryStore::new();
        let mut store = store();

        let report = store.switch_language(&mut doc, &mut storage, "xx");

        expect_that!(report.updated, eq(0));
        expect_that!(report.missing.len(), eq(8));
        expect_that!(doc.text(nodes.nav_home), some(eq("Home")));
        expect_that!(doc.text(nodes.hero_title), some(eq("Websites that work")));
        expect_that!(store.active_language(), eq("xx"));
        expect_that!(stored_language(&storage).as_deref(), some(eq("xx")));
        // No control matches "xx", and the classes are otherwise unchanged
        expect_that!(doc.has_class(nodes.en_button, "active"), eq(false));
        expect_that!(doc.has_class(nodes.fr_button, "active"), eq(false));
        assert_eq!(format!("{doc:?}"), before);
    }

    #[googletest::test]
    fn test_missing_key_keeps_existing_text() {
        let (mut doc, nodes) = sample_page();
        let mut storage = MemoryStore::new();
        let mut store = store();

        store.switch_language(&mut doc, &mut storage, "en");
        expect_that!(doc.text(nodes.hero_subtitle), some(eq("Built for growth")));

        let report = store.switch_language(&mut doc, &mut storage, "fr");

        expect_that!(doc.text(nodes.hero_subtitle), some(eq("Built for growth")));
        expect_that!(doc.text(nodes.untranslated), some(eq("Placeholder tagline")));
        assert_eq!(report.missing, vec!["hero.subtitle", "hero.tagline"]);
    }

    #[googletest::test]
    fn test_fallback_policy_uses_default_language() {
        let (mut doc, nodes) = sample_page();
        let mut storage = MemoryStore::new();
        let settings = I18nSettings {
            missing_key_policy: MissingKeyPolicy::FallbackToDefault,
            ..I18nSettings::default()
        };
        let mut store = TranslationStore::new(sample_table(), settings);

        let report = store.switch_language(&mut doc, &mut storage, "fr");

        expect_that!(doc.text(nodes.hero_subtitle), some(eq("Built for growth")));
        expect_that!(doc.text(nodes.hero_title), some(eq("Des sites qui fonctionnent")));
        assert_eq!(report.missing, vec!["hero.tagline"]);
    }

    #[rstest]
    #[case("en")]
    #[case("fr")]
    fn test_switch_then_read_preference(#[case] language: &str) {
        let (mut doc, _) = sample_page();
        let mut storage = MemoryStore::new();
        let mut store = store();

        store.switch_language(&mut doc, &mut storage, language);

        assert_eq!(stored_language(&storage).as_deref(), Some(language));
    }

    #[googletest::test]
    fn test_initialize_applies_stored_preference() {
        let (mut doc, nodes) = sample_page();
        let mut storage = MemoryStore::with_values([("preferred-language", "fr")]);
        let mut store = store();

        let report = store.initialize(&mut doc, &mut storage);

        expect_that!(report.is_some(), eq(true));
        expect_that!(store.active_language(), eq("fr"));
        expect_that!(doc.has_class(nodes.fr_button, "active"), eq(true));
        expect_that!(doc.has_class(nodes.en_button, "active"), eq(false));
        expect_that!(doc.text(nodes.nav_home), some(eq("Accueil")));
        expect_that!(doc.text(nodes.hero_title), some(eq("Des sites qui fonctionnent")));
    }

    #[googletest::test]
    fn test_initialize_attaches_selector_listeners() {
        let (mut doc, nodes) = sample_page();
        let mut storage = MemoryStore::new();
        let mut store = store();

        store.initialize(&mut doc, &mut storage);

        assert_eq!(
            doc.listeners(nodes.fr_button).to_vec(),
            vec![Listener::SwitchLanguage("fr".to_string())]
        );
        assert_eq!(
            doc.listeners(nodes.en_button).to_vec(),
            vec![Listener::SwitchLanguage("en".to_string())]
        );
    }

    #[googletest::test]
    fn test_initialize_runs_once() {
        let (mut doc, nodes) = sample_page();
        let mut storage = MemoryStore::new();
        let mut store = store();

        store.initialize(&mut doc, &mut storage);
        let second = store.initialize(&mut doc, &mut storage);

        expect_that!(second.is_none(), eq(true));
        expect_that!(doc.listeners(nodes.fr_button).len(), eq(1));
    }

    #[rstest]
    #[case::absent(None)]
    #[case::empty(Some(""))]
    #[case::malformed(Some("français"))]
    fn test_initialize_falls_back_to_default(#[case] stored: Option<&str>) {
        let (mut doc, nodes) = sample_page();
        let mut storage = MemoryStore::with_values(stored.map(|v| ("preferred-language", v)));
        let mut store = store();

        store.initialize(&mut doc, &mut storage);

        assert_eq!(store.active_language(), "en");
        assert!(doc.has_class(nodes.en_button, "active"));
        assert_eq!(stored_language(&storage).as_deref(), Some("en"));
    }

    #[googletest::test]
    fn test_broken_storage_is_ignored() {
        let (mut doc, nodes) = sample_page();
        let mut storage = BrokenStore;
        let mut store = store();

        store.initialize(&mut doc, &mut storage);
        store.switch_language(&mut doc, &mut storage, "fr");

        expect_that!(store.active_language(), eq("fr"));
        expect_that!(doc.text(nodes.nav_home), some(eq("Accueil")));
    }

    #[googletest::test]
    fn test_custom_attributes_and_separator() {
        let mut doc = crate::dom::NodeRegistry::new();
        let body = doc.body();
        let node = doc.append(
            body,
            crate::dom::Element::new("span").attr("data-t", "nav/home").text("Home"),
        );
        let settings = I18nSettings {
            binding_attribute: "data-t".to_string(),
            key_separator: "/".to_string(),
            ..I18nSettings::default()
        };
        let mut store = TranslationStore::new(sample_table(), settings);

        store.switch_language(&mut doc, &mut MemoryStore::new(), "fr");

        expect_that!(doc.text(node), some(eq("Accueil")));
    }

    #[googletest::test]
    fn test_stores_are_independent() {
        let mut first = store();
        let second = store();

        first.set_active_language("fr");

        expect_that!(first.active_language(), eq("fr"));
        expect_that!(second.active_language(), eq("en"));
        expect_that!(first.has_language("fr"), eq(true));
        expect_that!(first.has_language("de"), eq(false));
    }
}
