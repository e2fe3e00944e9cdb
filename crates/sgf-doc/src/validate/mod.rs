//! Semantic checks on a decoded game.
//!
//! The decoder keeps whatever the engine approved, so these checks are
//! advisory: they report SGF rules that the model can represent but the
//! standard forbids. Applications opt in by calling them.

use crate::error::ValidationError;
use crate::model::{
    validate_values, BoardSizeStatus, Document, Game, PropertyCategory, PropertyType,
};

/// Validates every game of a document, stopping at the first problem.
pub fn validate_document(document: &Document) -> Result<(), ValidationError> {
    for (index, game) in document.games().iter().enumerate() {
        validate_game(game).map_err(|source| ValidationError::InGame {
            index,
            source: Box::new(source),
        })?;
    }
    Ok(())
}

/// Validates one game:
/// - property values match their schema
/// - root properties appear only in the root node
/// - no node mixes move and setup properties
/// - the board size, if present, is valid for the game type
pub fn validate_game(game: &Game) -> Result<(), ValidationError> {
    let Some(root) = game.root() else {
        return Ok(());
    };
    for id in game.descendants(root) {
        let Some(node) = game.node(id) else { continue };
        let mut has_move = false;
        let mut has_setup = false;
        for property in node.properties() {
            let property_type = property.property_type();
            validate_values(property_type, property.values())
                .map_err(|source| ValidationError::InvalidValues { node: id, source })?;
            match property_type.category() {
                Some(PropertyCategory::Root) if id != root => {
                    return Err(ValidationError::RootPropertyOutsideRoot {
                        node: id,
                        property: property_type,
                    });
                }
                Some(PropertyCategory::Move) => has_move = true,
                Some(PropertyCategory::Setup) => has_setup = true,
                _ => {}
            }
        }
        if has_move && has_setup {
            return Err(ValidationError::MixedMoveAndSetup { node: id });
        }
    }
    if game.board_size() == BoardSizeStatus::Invalid {
        return Err(ValidationError::InvalidBoardSize {
            property: PropertyType::SZ,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_document;

    fn check(text: &str) -> Result<(), ValidationError> {
        validate_document(&decode_document(text).unwrap())
    }

    #[test]
    fn test_valid_game() {
        assert!(check("(;FF[4]GM[1]SZ[19];B[pd];W[dp])").is_ok());
    }

    #[test]
    fn test_root_property_outside_root() {
        let err = check("(;FF[4];B[pd]SZ[19])").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InGame { index: 0, ref source }
                if matches!(**source, ValidationError::RootPropertyOutsideRoot { property: PropertyType::SZ, .. })
        ));
    }

    #[test]
    fn test_mixed_move_and_setup() {
        let err = check("(;GM[1];B[pd]AW[dd])").unwrap_err();
        assert!(err.to_string().contains("move and setup"));
    }

    #[test]
    fn test_invalid_board_size() {
        assert!(check("(;SZ[0])").is_err());
        assert!(check("(;GM[1]SZ[53])").is_err());
        assert!(check("(;GM[3]SZ[53])").is_ok());
    }

    #[test]
    fn test_surplus_values_reported() {
        let err = check("(;GM[1][2])").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InGame { ref source, .. }
                if matches!(**source, ValidationError::InvalidValues {
                    source: crate::error::ValueError::TooManyValues { count: 2, .. },
                    ..
                })
        ));
        assert!(check("(;AB[aa][bb])").is_ok());
    }

    #[test]
    fn test_second_game_reported_by_index() {
        let err = check("(;SZ[9])(;SZ[x])").unwrap_err();
        assert!(matches!(err, ValidationError::InGame { index: 1, .. }));
    }
}
