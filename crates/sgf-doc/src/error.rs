//! Error types for the SGF model, codec, and backend integration.

use std::io;

use thiserror::Error;

use crate::constants;
use crate::message::{Message, MessageType};
use crate::model::{NodeId, PropertyType, ValueKind};

/// Error codes grouping the error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// S001: Tree invariant violation
    Structure,
    /// S002: Property value count/shape violation
    Value,
    /// S003: Temporary artifact or filesystem failure
    Protocol,
    /// S004: Engine reported a non-success exit classification
    Engine,
    /// S005: Banned or unparseable engine argument
    ArgumentPolicy,
    /// S006: Text is not structurally decodable
    Decode,
    /// S007: Root metadata cannot be written
    Metadata,
    /// S008: Game violates an SGF rule the model can represent
    Validation,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "S001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::Structure => "S001",
            ErrorCode::Value => "S002",
            ErrorCode::Protocol => "S003",
            ErrorCode::Engine => "S004",
            ErrorCode::ArgumentPolicy => "S005",
            ErrorCode::Decode => "S006",
            ErrorCode::Metadata => "S007",
            ErrorCode::Validation => "S008",
        }
    }
}

/// Error raised by [`TreeBuilder`](crate::model::TreeBuilder) operations.
///
/// A builder call that returns one of these leaves the tree untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("[S001] node {node:?} does not exist in this game")]
    UnknownNode { node: NodeId },

    #[error("[S001] node {node:?} already has parent {parent:?}")]
    AlreadyAttached { node: NodeId, parent: NodeId },

    #[error("[S001] node {node:?} is the game's root node")]
    NodeIsRoot { node: NodeId },

    #[error("[S001] attaching {node:?} below {target:?} would create a cycle")]
    WouldCreateCycle { node: NodeId, target: NodeId },

    #[error("[S001] node {node:?} has no parent")]
    NoParent { node: NodeId },

    #[error("[S001] node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("[S001] node {node:?} has no {direction} sibling")]
    NoSibling { node: NodeId, direction: &'static str },
}

/// Error raised when a property's values violate its schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("[S002] property {property} requires at least one value")]
    Empty { property: PropertyType },

    #[error("[S002] property {property} accepts a single value, got {count}")]
    TooManyValues { property: PropertyType, count: usize },

    #[error("[S002] property {property} value {index} has shape {found} which the schema does not allow")]
    ShapeMismatch {
        property: PropertyType,
        index: usize,
        found: String,
    },

    #[error("[S002] an unknown property needs an identifier")]
    UnnamedUnknown,

    #[error("[S002] value of kind {kind:?} cannot be composed")]
    NotComposable { kind: ValueKind },
}

/// Error raised when writing `GM` or `SZ` into a game's root node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameMetadataError {
    #[error("[S007] game has no root node")]
    NoRoot,

    #[error("[S007] game type Unknown has no GM number")]
    UnknownGameType,

    #[error(transparent)]
    Value(#[from] ValueError),
}

/// Error raised by the advisory checks in [`validate`](crate::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("[S008] node {node:?}: {source}")]
    InvalidValues { node: NodeId, source: ValueError },

    #[error("[S008] node {node:?}: root property {property} outside the root node")]
    RootPropertyOutsideRoot { node: NodeId, property: PropertyType },

    #[error("[S008] node {node:?} mixes move and setup properties")]
    MixedMoveAndSetup { node: NodeId },

    #[error("[S008] invalid board size in {property}")]
    InvalidBoardSize { property: PropertyType },

    #[error("[S008] game {index}: {source}")]
    InGame {
        index: usize,
        source: Box<ValidationError>,
    },
}

/// Error raised by the temporary-file protocol with the engine.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("[S003] failed to create temporary file: {source}")]
    CreateTempFile { source: io::Error },

    #[error("[S003] failed to write SGF content to {path}: {source}")]
    Write { path: String, source: io::Error },

    #[error("[S003] failed to read SGF content from {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("[S003] failed to delete temporary file {path}: {source}")]
    Delete { path: String, source: io::Error },

    #[error("[S003] failed to invoke engine {program}: {source}")]
    Spawn { program: String, source: io::Error },
}

impl ProtocolError {
    fn source_io(&self) -> &io::Error {
        match self {
            ProtocolError::CreateTempFile { source }
            | ProtocolError::Write { source, .. }
            | ProtocolError::Read { source, .. }
            | ProtocolError::Delete { source, .. }
            | ProtocolError::Spawn { source, .. } => source,
        }
    }

    /// Returns the reserved message ID that describes this failure.
    pub fn message_id(&self) -> i32 {
        if self.source_io().kind() == io::ErrorKind::OutOfMemory {
            return constants::OUT_OF_MEMORY_ERROR;
        }
        match self {
            ProtocolError::CreateTempFile { .. } | ProtocolError::Write { .. } => {
                constants::SAVE_SGF_CONTENT_TO_FILESYSTEM_ERROR
            }
            ProtocolError::Read { .. } => constants::READ_SGF_CONTENT_FROM_FILESYSTEM_ERROR,
            ProtocolError::Delete { .. } => constants::DELETE_FILE_ERROR,
            ProtocolError::Spawn { .. } => constants::ENGINE_INVOCATION_ERROR,
        }
    }

    /// Converts the failure into the single fatal message reported to callers.
    pub fn to_message(&self) -> Message {
        Message::fatal(self.message_id(), self.to_string())
            .with_library_error_number(self.source_io().raw_os_error())
    }
}

/// Error returned when the engine does not report success.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("[S004] engine finished with {exit_code:?}: {summary}")]
    NotSuccessful {
        exit_code: crate::backend::ExitCode,
        summary: String,
    },
}

/// Error raised when engine arguments fail the pre-flight policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentPolicyError {
    #[error("[S005] argument {argument:?} is not allowed")]
    Banned { argument: String },

    #[error("[S005] argument {argument:?} is not an engine option")]
    Unparseable { argument: String },
}

impl ArgumentPolicyError {
    /// Returns the reserved message ID that describes this failure.
    pub fn message_id(&self) -> i32 {
        match self {
            ArgumentPolicyError::Banned { .. } => constants::BANNED_ARGUMENT,
            ArgumentPolicyError::Unparseable { .. } => constants::PARSE_ARGUMENT_ERROR,
        }
    }

    /// Converts the failure into the single fatal message reported to callers.
    pub fn to_message(&self) -> Message {
        Message::fatal(self.message_id(), self.to_string())
    }
}

/// Error during text decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("[S006] line {line} col {column}: unexpected end of input while reading {context}")]
    UnexpectedEof {
        line: u32,
        column: u32,
        context: &'static str,
    },

    #[error("[S006] line {line} col {column}: expected {expected}, found {found:?}")]
    Unexpected {
        line: u32,
        column: u32,
        expected: &'static str,
        found: char,
    },

    #[error("[S006] line {line} col {column}: property has no value")]
    MissingValue { line: u32, column: u32 },

    #[error("[S006] line {line} col {column}: game tree has no nodes")]
    EmptyGameTree { line: u32, column: u32 },

    #[error("[S006] line {line} col {column}: {source}")]
    InvalidProperty {
        line: u32,
        column: u32,
        source: ValueError,
    },
}

impl DecodeError {
    /// Returns the (line, column) the error refers to.
    pub fn location(&self) -> (u32, u32) {
        match self {
            DecodeError::UnexpectedEof { line, column, .. }
            | DecodeError::Unexpected { line, column, .. }
            | DecodeError::MissingValue { line, column }
            | DecodeError::EmptyGameTree { line, column }
            | DecodeError::InvalidProperty { line, column, .. } => (*line, *column),
        }
    }

    /// Converts the failure into a fatal message positioned at the error.
    pub fn to_message(&self) -> Message {
        let (line, column) = self.location();
        Message::new(
            constants::INVALID_MESSAGE_ID,
            MessageType::Fatal,
            self.to_string(),
        )
        .with_location(Some(line), Some(column))
    }
}

impl StructureError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::Structure
    }
}

impl ValueError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::Value
    }
}

impl GameMetadataError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            GameMetadataError::Value(_) => ErrorCode::Value,
            _ => ErrorCode::Metadata,
        }
    }
}

impl ValidationError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::Validation
    }
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::Decode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_ids() {
        let err = ProtocolError::Delete {
            path: "/tmp/x".to_string(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert_eq!(err.message_id(), constants::DELETE_FILE_ERROR);

        let oom = ProtocolError::Write {
            path: "/tmp/x".to_string(),
            source: io::Error::from(io::ErrorKind::OutOfMemory),
        };
        assert_eq!(oom.message_id(), constants::OUT_OF_MEMORY_ERROR);
    }

    #[test]
    fn test_protocol_error_message_is_fatal() {
        let err = ProtocolError::Read {
            path: "/nope".to_string(),
            source: io::Error::from_raw_os_error(2),
        };
        let message = err.to_message();
        assert_eq!(message.message_type(), MessageType::Fatal);
        assert_eq!(message.id(), constants::READ_SGF_CONTENT_FROM_FILESYSTEM_ERROR);
        assert_eq!(message.library_error_number(), Some(2));
        assert_eq!(message.line(), None);
    }

    #[test]
    fn test_argument_policy_ids() {
        let banned = ArgumentPolicyError::Banned { argument: "-i".into() };
        assert_eq!(banned.to_message().id(), constants::BANNED_ARGUMENT);
        let bad = ArgumentPolicyError::Unparseable { argument: "x".into() };
        assert_eq!(bad.to_message().id(), constants::PARSE_ARGUMENT_ERROR);
    }

    #[test]
    fn test_error_code_strings() {
        let err = StructureError::NoParent { node: NodeId::from_index(3) };
        assert_eq!(err.code().code(), "S001");
        let err = DecodeError::MissingValue { line: 1, column: 4 };
        assert_eq!(err.code().code(), "S006");
        assert_eq!(err.location(), (1, 4));
    }
}
