//! Language switching over a document and translation consistency checks.

pub mod diagnostics;
pub mod store;

pub use diagnostics::{
    MissingKey,
    check_consistency,
};
pub use store::{
    ApplyReport,
    LanguageContext,
    TranslationStore,
};
