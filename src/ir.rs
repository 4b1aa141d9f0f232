//! Intermediate representations.

pub mod translation;
