//! Well-known values: reserved message IDs, SGF string tokens, board limits.
//!
//! Engine-generated messages always carry IDs `>= 0`. IDs generated by this
//! crate are negative, except [`UNKNOWN_SGFC_MESSAGE_ID`], which stays in the
//! engine's non-negative range because it marks an engine message whose ID
//! could not be recovered.

use crate::model::BoardSize;

// =============================================================================
// MESSAGE IDS
// =============================================================================

/// Engine message whose ID could not be determined from the raw text.
pub const UNKNOWN_SGFC_MESSAGE_ID: i32 = i32::MAX;

/// A message without a valid ID. Seeing this indicates a bug in this crate.
pub const INVALID_MESSAGE_ID: i32 = -1;

/// Engine arguments could not be parsed.
pub const PARSE_ARGUMENT_ERROR: i32 = -2;

/// SGF content could not be saved to the filesystem.
pub const SAVE_SGF_CONTENT_TO_FILESYSTEM_ERROR: i32 = -3;

/// SGF content could not be read from the filesystem.
pub const READ_SGF_CONTENT_FROM_FILESYSTEM_ERROR: i32 = -4;

/// A temporary file could not be deleted.
pub const DELETE_FILE_ERROR: i32 = -5;

/// The system ran out of memory during a filesystem operation.
pub const OUT_OF_MEMORY_ERROR: i32 = -6;

/// An engine argument is on the deny-list.
pub const BANNED_ARGUMENT: i32 = -7;

/// The engine process could not be started.
pub const ENGINE_INVOCATION_ERROR: i32 = -8;

/// Highest message ID documented by the engine.
pub const MAX_ENGINE_MESSAGE_ID: i32 = 80;

/// Returns true if `id` belongs to the engine's documented catalog.
pub fn is_engine_message_id(id: i32) -> bool {
    (1..=MAX_ENGINE_MESSAGE_ID).contains(&id)
}

// =============================================================================
// SGF TOKENS
// =============================================================================

pub const NONE_VALUE_STRING: &str = "";
pub const DOUBLE_NORMAL_STRING: &str = "1";
pub const DOUBLE_EMPHASIZED_STRING: &str = "2";
pub const COLOR_BLACK_STRING: &str = "B";
pub const COLOR_WHITE_STRING: &str = "W";
pub const GO_MOVE_PASS_STRING: &str = "";

/// Legacy pass notation, only meaningful on boards up to 19x19.
pub const GO_MOVE_LEGACY_PASS_STRING: &str = "tt";

// =============================================================================
// GAME TYPE / BOARD SIZE
// =============================================================================

/// `game_type_as_number()` result when GM holds something other than a
/// single Number.
pub const GAME_TYPE_NAN: i64 = i64::MIN;

pub const BOARD_SIZE_MINIMUM: BoardSize = BoardSize { columns: 1, rows: 1 };
pub const BOARD_SIZE_MAXIMUM_GO: BoardSize = BoardSize { columns: 52, rows: 52 };
pub const BOARD_SIZE_DEFAULT_GO: BoardSize = BoardSize { columns: 19, rows: 19 };
pub const BOARD_SIZE_DEFAULT_CHESS: BoardSize = BoardSize { columns: 8, rows: 8 };

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_ids_do_not_collide_with_engine_ids() {
        let reserved = [
            INVALID_MESSAGE_ID,
            PARSE_ARGUMENT_ERROR,
            SAVE_SGF_CONTENT_TO_FILESYSTEM_ERROR,
            READ_SGF_CONTENT_FROM_FILESYSTEM_ERROR,
            DELETE_FILE_ERROR,
            OUT_OF_MEMORY_ERROR,
            BANNED_ARGUMENT,
            ENGINE_INVOCATION_ERROR,
        ];
        for id in reserved {
            assert!(id < 0);
            assert!(!is_engine_message_id(id));
        }
        assert!(UNKNOWN_SGFC_MESSAGE_ID > 0);
        assert!(!is_engine_message_id(UNKNOWN_SGFC_MESSAGE_ID));
    }
}
