//! Utility modules for sgf-doc.

pub mod text;

pub use text::{collapse_whitespace, simple_text};
