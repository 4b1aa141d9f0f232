//! Translation input: JSON conversion and locale file loading.

pub mod translation;
