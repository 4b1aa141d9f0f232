//! 翻訳テーブルの整合性チェックモジュール

use std::collections::BTreeSet;
use std::fmt;

use crate::ir::translation::{
    TranslationTable,
    key_paths,
};

/// ある言語に存在しない翻訳キー
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MissingKey {
    /// キーが欠けている言語コード
    pub language: String,
    /// 区切り文字で連結されたキーパス
    pub key: String,
}

impl fmt::Display for MissingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Translation key '{}' is missing for '{}'", self.key, self.language)
    }
}

/// 言語間で欠けている翻訳キーを列挙する
///
/// いずれかの言語に存在するリーフのキーパスについて、
/// それを持たない言語ごとに [`MissingKey`] を生成します。
///
/// # Arguments
/// * `table` - チェック対象の翻訳テーブル
/// * `separator` - キーパスの区切り文字
///
/// # Returns
/// 言語コード、キーの順に並んだ欠落キーのリスト
#[must_use]
pub fn check_consistency(table: &TranslationTable, separator: &str) -> Vec<MissingKey> {
    let per_language: Vec<(&str, BTreeSet<String>)> =
        table.iter().map(|(language, tree)| (language, key_paths(tree, separator))).collect();

    // 全言語のキーの和集合
    let all_keys: BTreeSet<&String> = per_language.iter().flat_map(|(_, keys)| keys).collect();

    let mut missing = Vec::new();
    for (language, keys) in &per_language {
        for key in &all_keys {
            if !keys.contains(*key) {
                missing.push(MissingKey { language: (*language).to_string(), key: (*key).clone() });
            }
        }
    }

    tracing::debug!(
        languages = per_language.len(),
        keys = all_keys.len(),
        missing = missing.len(),
        "Checked translation consistency"
    );
    missing
}
