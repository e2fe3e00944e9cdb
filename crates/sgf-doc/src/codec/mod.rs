//! Text encoding/decoding for SGF.
//!
//! - [`value`]: raw text <-> typed single values
//! - [`text`]: character reader/writer and escaping
//! - [`document`]: whole documents and games

pub mod document;
pub mod text;
pub mod value;

pub use document::{decode_document, encode_document, encode_game};
pub use text::{Reader, Writer};
pub use value::{format_value, parse_value};
