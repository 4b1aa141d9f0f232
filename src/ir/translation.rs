//! 翻訳データの中間表現
//!
//! A [`TranslationTable`] maps language codes to [`LanguageTree`]s, and a
//! dotted key path is resolved by walking a tree one segment at a time.

use std::collections::{
    BTreeMap,
    BTreeSet,
};

/// One language's nested strings, keyed by the first path segment.
pub type LanguageTree = BTreeMap<String, LanguageNode>;

/// A node in a [`LanguageTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageNode {
    /// A translated string.
    Leaf(String),
    /// A nested mapping of further nodes.
    Branch(LanguageTree),
}

impl LanguageNode {
    /// Builds a leaf node.
    #[must_use]
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::Leaf(text.into())
    }

    /// Builds a branch node from `(key, node)` pairs.
    #[must_use]
    pub fn branch<K: Into<String>>(children: impl IntoIterator<Item = (K, Self)>) -> Self {
        Self::Branch(children.into_iter().map(|(key, node)| (key.into(), node)).collect())
    }

    /// Deep-merges `other` into `self`.
    ///
    /// Branches merge key by key; anything else is replaced by `other`.
    pub fn merge(&mut self, other: Self) {
        match (self, other) {
            (Self::Branch(children), Self::Branch(incoming)) => merge_trees(children, incoming),
            (this, other) => *this = other,
        }
    }
}

/// Deep-merges `incoming` into `target`; later leaves win.
pub fn merge_trees(target: &mut LanguageTree, incoming: LanguageTree) {
    for (key, node) in incoming {
        match target.get_mut(&key) {
            Some(existing) => existing.merge(node),
            None => {
                target.insert(key, node);
            }
        }
    }
}

/// Outcome of walking a [`LanguageTree`] by a key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The path ends at a leaf.
    Found(String),
    /// A segment is missing, a leaf was hit early, or the path ends at a branch.
    NotFound,
}

impl Resolution {
    /// Whether the path resolved to a leaf.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Converts into an `Option`, dropping the not-found case.
    #[must_use]
    pub fn into_option(self) -> Option<String> {
        match self {
            Self::Found(text) => Some(text),
            Self::NotFound => None,
        }
    }
}

/// Resolves `path` inside a single language tree.
///
/// # Examples
/// ```
/// use site_i18n::ir::translation::{LanguageNode, LanguageTree, Resolution, resolve_in_tree};
///
/// let mut tree = LanguageTree::new();
/// tree.insert("nav".to_string(), LanguageNode::branch([("home", LanguageNode::leaf("Home"))]));
///
/// assert_eq!(resolve_in_tree(&tree, "nav.home", "."), Resolution::Found("Home".to_string()));
/// assert_eq!(resolve_in_tree(&tree, "nav", "."), Resolution::NotFound);
/// assert_eq!(resolve_in_tree(&tree, "nav.home.extra", "."), Resolution::NotFound);
/// ```
#[must_use]
pub fn resolve_in_tree(tree: &LanguageTree, path: &str, separator: &str) -> Resolution {
    let mut segments = path.split(separator);

    let Some(mut node) = segments.next().and_then(|first| tree.get(first)) else {
        return Resolution::NotFound;
    };

    for segment in segments {
        let LanguageNode::Branch(children) = node else {
            return Resolution::NotFound;
        };
        let Some(child) = children.get(segment) else {
            return Resolution::NotFound;
        };
        node = child;
    }

    match node {
        LanguageNode::Leaf(text) => Resolution::Found(text.clone()),
        LanguageNode::Branch(_) => Resolution::NotFound,
    }
}

/// Collects the key path of every leaf in `tree`, joined by `separator`.
#[must_use]
pub fn key_paths(tree: &LanguageTree, separator: &str) -> BTreeSet<String> {
    let mut result = BTreeSet::new();
    collect_key_paths(tree, separator, None, &mut result);
    result
}

/// Recursive helper for [`key_paths`].
fn collect_key_paths(
    tree: &LanguageTree,
    separator: &str,
    prefix: Option<&str>,
    result: &mut BTreeSet<String>,
) {
    for (key, node) in tree {
        let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
        match node {
            LanguageNode::Leaf(_) => {
                result.insert(full_key);
            }
            LanguageNode::Branch(children) => {
                collect_key_paths(children, separator, Some(&full_key), result);
            }
        }
    }
}

/// Language code → language tree.
///
/// Read-only once handed to a [`TranslationStore`](crate::i18n::store::TranslationStore).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    /// Trees keyed by language code.
    languages: BTreeMap<String, LanguageTree>,
}

impl TranslationTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a language, merging into an existing tree for the same code.
    pub fn insert(&mut self, language: impl Into<String>, tree: LanguageTree) {
        let language = language.into();
        match self.languages.get_mut(&language) {
            Some(existing) => {
                tracing::debug!(%language, "Merging additional strings into existing language");
                merge_trees(existing, tree);
            }
            None => {
                self.languages.insert(language, tree);
            }
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>, tree: LanguageTree) -> Self {
        self.insert(language, tree);
        self
    }

    /// Tree for `language`.
    #[must_use]
    pub fn get(&self, language: &str) -> Option<&LanguageTree> {
        self.languages.get(language)
    }

    /// Whether `language` has a tree.
    #[must_use]
    pub fn contains(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    /// Language codes in sorted order.
    pub fn language_codes(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Iterates `(code, tree)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageTree)> {
        self.languages.iter().map(|(code, tree)| (code.as_str(), tree))
    }

    /// Number of languages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Resolves `path` for `language`.
    ///
    /// An unknown language resolves nothing. There is no fallback to another
    /// language here; see [`MissingKeyPolicy`](crate::config::MissingKeyPolicy).
    #[must_use]
    pub fn resolve(&self, language: &str, path: &str, separator: &str) -> Resolution {
        self.languages
            .get(language)
            .map_or(Resolution::NotFound, |tree| resolve_in_tree(tree, path, separator))
    }
}
