//! A document: the ordered collection of games in one SGF text.

use crate::model::game::Game;

/// An SGF document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    games: Vec<Game>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_games(games: impl IntoIterator<Item = Game>) -> Self {
        Self {
            games: games.into_iter().collect(),
        }
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn games_mut(&mut self) -> &mut [Game] {
        &mut self.games
    }

    pub fn game(&self, index: usize) -> Option<&Game> {
        self.games.get(index)
    }

    pub fn game_mut(&mut self, index: usize) -> Option<&mut Game> {
        self.games.get_mut(index)
    }

    pub fn append_game(&mut self, game: Game) {
        self.games.push(game);
    }

    /// Removes and returns the game at `index`, or `None` if out of range.
    pub fn remove_game(&mut self, index: usize) -> Option<Game> {
        (index < self.games.len()).then(|| self.games.remove(index))
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_game_out_of_range() {
        let mut doc = Document::with_games([Game::with_root(), Game::new()]);
        assert!(doc.remove_game(5).is_none());
        assert!(!doc.remove_game(1).unwrap().has_root());
        assert_eq!(doc.len(), 1);
    }
}
