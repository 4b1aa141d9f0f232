//! Document abstraction and its in-memory implementation.

pub mod document;
pub mod registry;

pub use document::{
    Document,
    Element,
    Listener,
};
pub use registry::NodeRegistry;
