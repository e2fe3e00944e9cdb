//! Value types for SGF properties.
//!
//! Every property value keeps enough information to reproduce its raw text
//! exactly. Values that fail to parse as their declared kind become
//! [`SingleValue::Unknown`] instead of being dropped.

use std::borrow::Cow;
use std::fmt;

use crate::codec::value::{format_value, parse_value};
use crate::constants::{
    COLOR_BLACK_STRING, COLOR_WHITE_STRING, DOUBLE_EMPHASIZED_STRING, DOUBLE_NORMAL_STRING,
};
use crate::error::ValueError;
use crate::model::go::{GoMove, GoPoint, GoStone};
use crate::model::{BoardSize, GameType};

/// Value kinds defined by the SGF standard (plus `Unknown`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// The empty value `[]`.
    None,
    Number,
    Real,
    Double,
    Color,
    SimpleText,
    Text,
    Point,
    Move,
    Stone,
    /// Raw text that did not parse as the declared kind.
    Unknown,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The SGF Double type: normal or emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Double {
    Normal,
    Emphasized,
}

impl Double {
    /// Returns the SGF token for this value ("1" or "2").
    pub fn as_str(self) -> &'static str {
        match self {
            Double::Normal => DOUBLE_NORMAL_STRING,
            Double::Emphasized => DOUBLE_EMPHASIZED_STRING,
        }
    }

    /// Parses the SGF token. Anything but "1" or "2" is rejected.
    pub fn from_str_token(s: &str) -> Option<Double> {
        match s {
            DOUBLE_NORMAL_STRING => Some(Double::Normal),
            DOUBLE_EMPHASIZED_STRING => Some(Double::Emphasized),
            _ => None,
        }
    }
}

/// The SGF Color type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Returns the SGF token for this color ("B" or "W").
    pub fn as_str(self) -> &'static str {
        match self {
            Color::Black => COLOR_BLACK_STRING,
            Color::White => COLOR_WHITE_STRING,
        }
    }

    /// Parses the SGF token.
    pub fn from_str_token(s: &str) -> Option<Color> {
        match s {
            COLOR_BLACK_STRING => Some(Color::Black),
            COLOR_WHITE_STRING => Some(Color::White),
            _ => None,
        }
    }

    /// Returns the other color.
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

/// A single (non-composed) property value.
///
/// Number and Real keep their original text next to the parsed number, so
/// `+5` and `5` stay distinguishable and round-trip exactly.
#[derive(Debug, Clone, PartialEq)]
pub enum SingleValue {
    /// The empty value.
    None,

    /// Signed integer.
    Number { raw: String, value: i64 },

    /// Decimal number.
    Real { raw: String, value: f64 },

    Double(Double),

    Color(Color),

    /// Single-line text. The raw text is stored; see [`SingleValue::as_simple_text`].
    SimpleText(String),

    /// Formatted text with hard line breaks.
    Text(String),

    /// Game-specific point.
    Point(String),

    /// Game-specific move.
    Move(String),

    /// Game-specific stone.
    Stone(String),

    /// Raw text that did not parse as its declared kind.
    Unknown(String),
}

impl SingleValue {
    /// Parses `raw` as a value of `kind`. Never fails: unparseable input
    /// yields [`SingleValue::Unknown`] with the raw text preserved.
    pub fn parse(raw: &str, kind: ValueKind) -> SingleValue {
        parse_value(raw, kind)
    }

    /// Creates a Number value.
    pub fn number(value: i64) -> SingleValue {
        SingleValue::Number { raw: value.to_string(), value }
    }

    /// Creates a Real value. Non-finite numbers have no SGF representation
    /// and become `Unknown`.
    pub fn real(value: f64) -> SingleValue {
        let raw = value.to_string();
        if value.is_finite() {
            SingleValue::Real { raw, value }
        } else {
            SingleValue::Unknown(raw)
        }
    }

    pub fn simple_text(text: impl Into<String>) -> SingleValue {
        SingleValue::SimpleText(text.into())
    }

    pub fn text(text: impl Into<String>) -> SingleValue {
        SingleValue::Text(text.into())
    }

    pub fn point(raw: impl Into<String>) -> SingleValue {
        SingleValue::Point(raw.into())
    }

    pub fn move_value(raw: impl Into<String>) -> SingleValue {
        SingleValue::Move(raw.into())
    }

    pub fn stone(raw: impl Into<String>) -> SingleValue {
        SingleValue::Stone(raw.into())
    }

    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            SingleValue::None => ValueKind::None,
            SingleValue::Number { .. } => ValueKind::Number,
            SingleValue::Real { .. } => ValueKind::Real,
            SingleValue::Double(_) => ValueKind::Double,
            SingleValue::Color(_) => ValueKind::Color,
            SingleValue::SimpleText(_) => ValueKind::SimpleText,
            SingleValue::Text(_) => ValueKind::Text,
            SingleValue::Point(_) => ValueKind::Point,
            SingleValue::Move(_) => ValueKind::Move,
            SingleValue::Stone(_) => ValueKind::Stone,
            SingleValue::Unknown(_) => ValueKind::Unknown,
        }
    }

    /// Returns the raw (unescaped) text of this value.
    pub fn raw_value(&self) -> Cow<'_, str> {
        format_value(self)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, SingleValue::Unknown(_))
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            SingleValue::Number { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            SingleValue::Real { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<Double> {
        match self {
            SingleValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            SingleValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Returns the SimpleText content with every whitespace character other
    /// than space converted to a space.
    pub fn as_simple_text(&self) -> Option<Cow<'_, str>> {
        match self {
            SingleValue::SimpleText(raw) => Some(crate::util::text::simple_text(raw)),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SingleValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<&str> {
        match self {
            SingleValue::Point(raw) => Some(raw),
            _ => None,
        }
    }

    pub fn as_move(&self) -> Option<&str> {
        match self {
            SingleValue::Move(raw) => Some(raw),
            _ => None,
        }
    }

    pub fn as_stone(&self) -> Option<&str> {
        match self {
            SingleValue::Stone(raw) => Some(raw),
            _ => None,
        }
    }

    // =========================================================================
    // Game-specific views
    // =========================================================================

    /// Returns a Go view of this Point value. `None` unless `game_type` is
    /// Go and the raw text is a valid point on a board of `board_size`.
    pub fn to_go_point(&self, game_type: GameType, board_size: BoardSize) -> Option<GoPoint> {
        match (game_type, self) {
            (GameType::Go, SingleValue::Point(raw)) => GoPoint::from_sgf(raw, board_size),
            _ => None,
        }
    }

    /// Returns a Go view of this Move value.
    pub fn to_go_move(&self, game_type: GameType, board_size: BoardSize) -> Option<GoMove> {
        match (game_type, self) {
            (GameType::Go, SingleValue::Move(raw)) => GoMove::from_sgf(raw, board_size),
            _ => None,
        }
    }

    /// Returns a Go view of this Stone value with the given color.
    pub fn to_go_stone(
        &self,
        color: Color,
        game_type: GameType,
        board_size: BoardSize,
    ) -> Option<GoStone> {
        match (game_type, self) {
            (GameType::Go, SingleValue::Stone(raw)) => GoPoint::from_sgf(raw, board_size)
                .map(|point| GoStone { color, point }),
            _ => None,
        }
    }
}

/// Two single values serialized as `first:second`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedValue {
    first: SingleValue,
    second: SingleValue,
}

impl ComposedValue {
    /// Composes two values. The empty value cannot be part of a composition.
    pub fn new(first: SingleValue, second: SingleValue) -> Result<ComposedValue, ValueError> {
        for half in [&first, &second] {
            if half.kind() == ValueKind::None {
                return Err(ValueError::NotComposable { kind: half.kind() });
            }
        }
        Ok(ComposedValue { first, second })
    }

    /// Composes two values already known to be non-empty.
    pub(crate) fn from_parts(first: SingleValue, second: SingleValue) -> ComposedValue {
        debug_assert!(first.kind() != ValueKind::None && second.kind() != ValueKind::None);
        ComposedValue { first, second }
    }

    pub fn first(&self) -> &SingleValue {
        &self.first
    }

    pub fn second(&self) -> &SingleValue {
        &self.second
    }

    /// Returns the combined raw text `first:second` (unescaped).
    pub fn raw_value(&self) -> String {
        format!("{}:{}", self.first.raw_value(), self.second.raw_value())
    }
}

/// Shape of a property value: a single kind or a pair of kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueShape {
    Single(ValueKind),
    Composed(ValueKind, ValueKind),
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueShape::Single(kind) => write!(f, "{kind}"),
            ValueShape::Composed(first, second) => write!(f, "{first}:{second}"),
        }
    }
}

/// A value attached to a property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Single(SingleValue),
    Composed(ComposedValue),
}

impl PropertyValue {
    /// Returns the shape of this value.
    pub fn shape(&self) -> ValueShape {
        match self {
            PropertyValue::Single(v) => ValueShape::Single(v.kind()),
            PropertyValue::Composed(c) => ValueShape::Composed(c.first.kind(), c.second.kind()),
        }
    }

    pub fn is_composed(&self) -> bool {
        matches!(self, PropertyValue::Composed(_))
    }

    pub fn as_single(&self) -> Option<&SingleValue> {
        match self {
            PropertyValue::Single(v) => Some(v),
            PropertyValue::Composed(_) => None,
        }
    }

    pub fn as_composed(&self) -> Option<&ComposedValue> {
        match self {
            PropertyValue::Composed(c) => Some(c),
            PropertyValue::Single(_) => None,
        }
    }

    /// Returns true if this value, or any half of it, is `Unknown`.
    pub fn has_unknown(&self) -> bool {
        match self {
            PropertyValue::Single(v) => v.is_unknown(),
            PropertyValue::Composed(c) => c.first.is_unknown() || c.second.is_unknown(),
        }
    }

    /// Returns the raw (unescaped) text of this value.
    pub fn raw_value(&self) -> Cow<'_, str> {
        match self {
            PropertyValue::Single(v) => v.raw_value(),
            PropertyValue::Composed(c) => Cow::Owned(c.raw_value()),
        }
    }
}

impl From<SingleValue> for PropertyValue {
    fn from(value: SingleValue) -> Self {
        PropertyValue::Single(value)
    }
}

impl From<ComposedValue> for PropertyValue {
    fn from(value: ComposedValue) -> Self {
        PropertyValue::Composed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_keeps_original_text() {
        let v = SingleValue::parse("+19", ValueKind::Number);
        assert_eq!(v.as_number(), Some(19));
        assert_eq!(v.raw_value(), "+19");
        assert_eq!(SingleValue::number(-3).raw_value(), "-3");
    }

    #[test]
    fn test_unparseable_becomes_unknown() {
        let v = SingleValue::parse("abc", ValueKind::Number);
        assert_eq!(v, SingleValue::Unknown("abc".to_string()));
        assert_eq!(v.raw_value(), "abc");
    }

    #[test]
    fn test_double_tokens() {
        assert_eq!(SingleValue::parse("1", ValueKind::Double).as_double(), Some(Double::Normal));
        assert_eq!(SingleValue::parse("2", ValueKind::Double).as_double(), Some(Double::Emphasized));
        assert!(SingleValue::parse("3", ValueKind::Double).is_unknown());
        assert!(SingleValue::parse("01", ValueKind::Double).is_unknown());
    }

    #[test]
    fn test_real_constructor_rejects_non_finite() {
        assert!(SingleValue::real(f64::NAN).is_unknown());
        assert_eq!(SingleValue::real(6.5).as_real(), Some(6.5));
        assert_eq!(SingleValue::real(6.5).raw_value(), "6.5");
    }

    #[test]
    fn test_simple_text_view() {
        let v = SingleValue::simple_text("a\tb\nc");
        assert_eq!(v.as_simple_text().as_deref(), Some("a b c"));
        assert_eq!(v.raw_value(), "a\tb\nc");
    }

    #[test]
    fn test_composed_value() {
        let c = ComposedValue::new(SingleValue::point("aa"), SingleValue::point("cc")).unwrap();
        assert_eq!(c.raw_value(), "aa:cc");
        let value = PropertyValue::from(c);
        assert_eq!(value.shape(), ValueShape::Composed(ValueKind::Point, ValueKind::Point));
        assert!(value.is_composed());
    }

    #[test]
    fn test_composed_rejects_none_half() {
        let err = ComposedValue::new(SingleValue::None, SingleValue::number(1)).unwrap_err();
        assert_eq!(err, ValueError::NotComposable { kind: ValueKind::None });
    }

    #[test]
    fn test_go_point_only_for_go() {
        let v = SingleValue::point("dd");
        let size = BoardSize::square(19);
        assert_eq!(v.to_go_point(GameType::Go, size).map(|p| (p.x(), p.y())), Some((3, 3)));
        assert_eq!(v.to_go_point(GameType::Chess, size), None);
        assert_eq!(SingleValue::move_value("dd").to_go_point(GameType::Go, size), None);
        assert_eq!(v.to_go_point(GameType::Go, BoardSize::square(1 << 32)), None);
    }

    #[test]
    fn test_go_stone_view() {
        let stone = SingleValue::stone("ab")
            .to_go_stone(Color::White, GameType::Go, BoardSize::square(9))
            .unwrap();
        assert_eq!(stone.color, Color::White);
        assert_eq!((stone.point.x(), stone.point.y()), (0, 1));
    }
}
