//! sgf-doc: a typed model of SGF game records with a canonical encoder and
//! integration with the SGFC checker.
//!
//! # Overview
//!
//! An SGF document is a forest of game trees. Each node carries properties
//! whose values are plain text on the wire; this crate gives every value a
//! kind (Number, Real, Point, ...) while keeping the raw text recoverable,
//! so nothing is lost when a value does not parse.
//!
//! # Quick Start
//!
//! ```rust
//! use sgf_doc::codec::{decode_document, encode_document};
//! use sgf_doc::model::{BoardSize, GameType, PropertyType};
//!
//! let mut doc = decode_document("(;GM[1]SZ[9];B[cc];W[gg])").unwrap();
//! let game = doc.game_mut(0).unwrap();
//! assert_eq!(game.game_type(), GameType::Go);
//! assert_eq!(game.board_size().size(), Some(BoardSize::square(9)));
//!
//! game.set_board_size(BoardSize::new(9, 13)).unwrap();
//! let root = game.root_node().unwrap();
//! assert!(root.property(PropertyType::SZ).unwrap().value().is_composed());
//!
//! assert_eq!(encode_document(&doc), "(;GM[1]SZ[9:13]\n;B[cc]\n;W[gg])\n");
//! ```
//!
//! # Modules
//!
//! - [`model`]: values, properties, nodes, games, documents, tree builder
//! - [`codec`]: SGF text encoding and decoding
//! - [`validate`]: advisory SGF rule checks
//! - [`message`]: diagnostics and the engine output translator
//! - [`backend`]: running the engine through temporary files
//! - [`frontend`]: reading and writing documents through the engine
//! - [`constants`]: message IDs, SGF tokens, board limits
//! - [`error`]: error types
//!
//! # Engine
//!
//! The backend runs `sgfc` as `<engine> <arguments...> <input> <output>`.
//! Set `SGFC_PATH` and use [`BackendOptions::from_env`] to point at a
//! specific binary.

pub mod backend;
pub mod codec;
pub mod constants;
pub mod error;
pub mod frontend;
pub mod message;
pub mod model;
pub mod util;
pub mod validate;

// Re-export commonly used types at crate root
pub use backend::{Arguments, BackendController, BackendOptions, Engine, ExitCode, SaveResult};
pub use codec::{decode_document, encode_document, encode_game};
pub use error::{
    ArgumentPolicyError, DecodeError, EngineError, ErrorCode, GameMetadataError, ProtocolError,
    StructureError, ValidationError, ValueError,
};
pub use frontend::{DocumentReader, DocumentWriter, ReadResult, WriteResult};
pub use message::{Message, MessageType};
pub use model::{
    BoardSize, BoardSizeStatus, ComposedValue, Document, Game, GameType, Node, NodeId, Property,
    PropertyType, PropertyValue, SingleValue, TreeBuilder, ValueKind,
};
pub use validate::{validate_document, validate_game};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
