//! Go-specific views of Point, Move and Stone values.
//!
//! SGF encodes a Go point as two letters, `a`..`z` for 0..25 followed by
//! `A`..`Z` for 26..51, column first. The origin is the upper-left corner.

use std::fmt;

use crate::constants::{
    BOARD_SIZE_MAXIMUM_GO, BOARD_SIZE_MINIMUM, GO_MOVE_LEGACY_PASS_STRING, GO_MOVE_PASS_STRING,
};
use crate::model::{BoardSize, Color};

/// Column letters used by hybrid notation ("D16"). The letter I is skipped.
const HYBRID_COLUMNS: &[u8] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

fn letter_to_index(c: u8) -> Option<u32> {
    match c {
        b'a'..=b'z' => Some((c - b'a') as u32),
        b'A'..=b'Z' => Some((c - b'A') as u32 + 26),
        _ => None,
    }
}

fn index_to_letter(i: u32) -> char {
    if i < 26 {
        (b'a' + i as u8) as char
    } else {
        (b'A' + (i - 26) as u8) as char
    }
}

/// Returns true if `size` is within the Go limits (1x1 to 52x52).
fn is_go_board(size: BoardSize) -> bool {
    (BOARD_SIZE_MINIMUM.columns..=BOARD_SIZE_MAXIMUM_GO.columns).contains(&size.columns)
        && (BOARD_SIZE_MINIMUM.rows..=BOARD_SIZE_MAXIMUM_GO.rows).contains(&size.rows)
}

/// A point on a Go board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GoPoint {
    x: u32,
    y: u32,
    board_size: BoardSize,
}

impl GoPoint {
    /// Creates a point from zero-based coordinates. Returns `None` if the
    /// board is not a valid Go board or the point lies outside it.
    pub fn new(x: u32, y: u32, board_size: BoardSize) -> Option<GoPoint> {
        if !is_go_board(board_size)
            || i64::from(x) >= board_size.columns
            || i64::from(y) >= board_size.rows
        {
            return None;
        }
        Some(GoPoint { x, y, board_size })
    }

    /// Decodes SGF notation ("dd").
    pub fn from_sgf(raw: &str, board_size: BoardSize) -> Option<GoPoint> {
        let bytes = raw.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let x = letter_to_index(bytes[0])?;
        let y = letter_to_index(bytes[1])?;
        GoPoint::new(x, y, board_size)
    }

    /// Zero-based column, counted from the left edge.
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row, counted from the top edge.
    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn board_size(&self) -> BoardSize {
        self.board_size
    }

    /// SGF notation, e.g. "dd".
    pub fn to_sgf(&self) -> String {
        let mut s = String::with_capacity(2);
        s.push(index_to_letter(self.x));
        s.push(index_to_letter(self.y));
        s
    }

    /// Figure notation: one-based (column, row) with row 1 at the bottom.
    pub fn to_figure(&self) -> (u32, u32) {
        // `new` bounds rows to 1..=52 and y below rows.
        let rows = self.board_size.rows as u32;
        (self.x + 1, rows - self.y)
    }

    /// Hybrid notation, e.g. "D16". Only defined for boards up to 25 columns.
    pub fn to_hybrid(&self) -> Option<String> {
        let column = *HYBRID_COLUMNS.get(self.x as usize)? as char;
        let (_, row) = self.to_figure();
        Some(format!("{column}{row}"))
    }
}

impl fmt::Display for GoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sgf())
    }
}

/// A Go move: a pass or a stone played at a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoMove {
    Pass,
    Play(GoPoint),
}

impl GoMove {
    /// Decodes SGF notation. The empty string is a pass; "tt" is also a pass
    /// on boards no larger than 19x19.
    pub fn from_sgf(raw: &str, board_size: BoardSize) -> Option<GoMove> {
        if !is_go_board(board_size) {
            return None;
        }
        if raw == GO_MOVE_PASS_STRING {
            return Some(GoMove::Pass);
        }
        if raw == GO_MOVE_LEGACY_PASS_STRING && board_size.columns <= 19 && board_size.rows <= 19 {
            return Some(GoMove::Pass);
        }
        GoPoint::from_sgf(raw, board_size).map(GoMove::Play)
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, GoMove::Pass)
    }

    pub fn point(&self) -> Option<GoPoint> {
        match self {
            GoMove::Pass => None,
            GoMove::Play(p) => Some(*p),
        }
    }
}

/// A Go stone: a color and a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GoStone {
    pub color: Color,
    pub point: GoPoint,
}
