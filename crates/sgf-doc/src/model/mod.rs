//! Data model for SGF documents.
//!
//! This module contains the in-memory representation of SGF data:
//! - Values (typed raw text, single or composed)
//! - Properties (identifier, schema, values)
//! - Nodes and the per-game node arena
//! - Games and documents
//! - The tree builder (all structural edits)

pub mod builder;
pub mod document;
pub mod game;
pub mod go;
pub mod node;
pub mod property;
pub mod value;

pub use builder::TreeBuilder;
pub use document::Document;
pub use game::{BoardSize, BoardSizeStatus, Game, GameType};
pub use go::{GoMove, GoPoint, GoStone};
pub use node::{Node, NodeId};
pub use property::{
    validate_values, Multiplicity, Property, PropertyCategory, PropertySchema, PropertyType,
};
pub use value::{
    Color, ComposedValue, Double, PropertyValue, SingleValue, ValueKind, ValueShape,
};
