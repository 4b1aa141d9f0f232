//! site-i18n
//!
//! マーケティングサイト向けの多言語テキスト置換とページ挙動のヘッドレス実装
//!
//! Translation tables map language codes to nested string trees. A
//! [`TranslationStore`](i18n::TranslationStore) rewrites every node bound
//! with `data-i18n` when the active language changes, persists the choice,
//! and restores it on the next start. The page controllers in [`site`]
//! (navigation drawer, dropdowns, scroll header, splash screen, contact
//! form) run against the same [`Document`](dom::Document) abstraction.

pub mod config;
pub mod dom;
pub mod i18n;
pub mod indexer;
pub mod input;
pub mod ir;
pub mod site;
pub mod storage;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use i18n::{
    ApplyReport,
    TranslationStore,
};
pub use ir::translation::{
    LanguageNode,
    LanguageTree,
    Resolution,
    TranslationTable,
};
