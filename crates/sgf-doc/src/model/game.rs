//! A single game: one tree of nodes plus the metadata derived from its root.
//!
//! Game type and board size are read from the root node's `GM` and `SZ`
//! properties on every call. Nothing is cached, so editing the root through
//! [`Game::node_mut`] is immediately visible.

use crate::constants::{
    BOARD_SIZE_DEFAULT_CHESS, BOARD_SIZE_DEFAULT_GO, BOARD_SIZE_MAXIMUM_GO, BOARD_SIZE_MINIMUM,
    GAME_TYPE_NAN,
};
use crate::error::{GameMetadataError, StructureError};
use crate::model::builder::TreeBuilder;
use crate::model::go::{GoMove, GoPoint};
use crate::model::node::{Node, NodeId};
use crate::model::property::{Property, PropertyType};
use crate::model::value::{ComposedValue, PropertyValue, SingleValue};

/// Game types defined by the SGF standard, numbered as in the `GM` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameType {
    Go,
    Othello,
    Chess,
    GomokuAndRenju,
    NineMensMorris,
    Backgammon,
    ChineseChess,
    Shogi,
    LinesOfAction,
    Ataxx,
    Hex,
    Jungle,
    Neutron,
    PhilosophersFootball,
    Quadrature,
    Trax,
    Tantrix,
    Amazons,
    Octi,
    Gess,
    Twixt,
    Zertz,
    Plateau,
    Yinsh,
    Punct,
    Gobblet,
    Hive,
    Exxit,
    Hnefatal,
    Kuba,
    Tripples,
    Chase,
    TumblingDown,
    Sahara,
    Byte,
    Focus,
    Dvonn,
    Tamsk,
    Gipf,
    Kropki,
    /// A `GM` value that is not a single Number, or a Number the standard
    /// does not define.
    Unknown,
}

/// Game types indexed by `GM` number minus one.
const GAME_TYPES_BY_NUMBER: [GameType; 40] = [
    GameType::Go,
    GameType::Othello,
    GameType::Chess,
    GameType::GomokuAndRenju,
    GameType::NineMensMorris,
    GameType::Backgammon,
    GameType::ChineseChess,
    GameType::Shogi,
    GameType::LinesOfAction,
    GameType::Ataxx,
    GameType::Hex,
    GameType::Jungle,
    GameType::Neutron,
    GameType::PhilosophersFootball,
    GameType::Quadrature,
    GameType::Trax,
    GameType::Tantrix,
    GameType::Amazons,
    GameType::Octi,
    GameType::Gess,
    GameType::Twixt,
    GameType::Zertz,
    GameType::Plateau,
    GameType::Yinsh,
    GameType::Punct,
    GameType::Gobblet,
    GameType::Hive,
    GameType::Exxit,
    GameType::Hnefatal,
    GameType::Kuba,
    GameType::Tripples,
    GameType::Chase,
    GameType::TumblingDown,
    GameType::Sahara,
    GameType::Byte,
    GameType::Focus,
    GameType::Dvonn,
    GameType::Tamsk,
    GameType::Gipf,
    GameType::Kropki,
];

impl GameType {
    /// The game type assumed when `GM` is absent.
    pub const DEFAULT: GameType = GameType::Go;

    /// Maps a `GM` number to a game type.
    pub fn from_number(number: i64) -> Option<GameType> {
        let index = usize::try_from(number.checked_sub(1)?).ok()?;
        GAME_TYPES_BY_NUMBER.get(index).copied()
    }

    /// Returns the `GM` number, or `None` for `Unknown`.
    pub fn as_number(self) -> Option<i64> {
        GAME_TYPES_BY_NUMBER
            .iter()
            .position(|t| *t == self)
            .map(|i| i as i64 + 1)
    }
}

/// Board dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSize {
    pub columns: i64,
    pub rows: i64,
}

impl BoardSize {
    pub fn new(columns: i64, rows: i64) -> BoardSize {
        BoardSize { columns, rows }
    }

    pub fn square(size: i64) -> BoardSize {
        BoardSize { columns: size, rows: size }
    }

    pub fn is_square(&self) -> bool {
        self.columns == self.rows
    }

    /// Returns the canonical `SZ` value: a Number for square boards,
    /// `columns:rows` otherwise.
    pub fn to_property_value(&self) -> PropertyValue {
        if self.is_square() {
            return SingleValue::number(self.columns).into();
        }
        PropertyValue::Composed(ComposedValue::from_parts(
            SingleValue::number(self.columns),
            SingleValue::number(self.rows),
        ))
    }
}

/// Result of reading the board size from a root node.
///
/// `None` means there is no data; `Invalid` means data is present but
/// violates the SGF rules. The two are never interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardSizeStatus {
    None,
    Invalid,
    Valid(BoardSize),
}

impl BoardSizeStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, BoardSizeStatus::Valid(_))
    }

    pub fn size(&self) -> Option<BoardSize> {
        match self {
            BoardSizeStatus::Valid(size) => Some(*size),
            _ => None,
        }
    }
}

/// One game tree.
///
/// Nodes live in an arena indexed by [`NodeId`]. Slots freed by
/// [`TreeBuilder::discard`] or [`Game::set_root`] are never reused, so the
/// arena only grows during a session and [`Game::node_count`] scans it.
/// Encode and decode again to compact a heavily edited game.
#[derive(Debug, Clone, Default)]
pub struct Game {
    pub(crate) nodes: Vec<Option<Node>>,
    pub(crate) root: Option<NodeId>,
}

impl Game {
    /// Creates a game without a tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a game whose tree is a single empty root node.
    pub fn with_root() -> Self {
        let mut game = Game::new();
        let root = game.alloc(Node::new());
        game.root = Some(root);
        game
    }

    // =========================================================================
    // Tree access
    // =========================================================================

    pub fn has_root(&self) -> bool {
        self.root.is_some()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root_node(&self) -> Option<&Node> {
        self.root.and_then(|id| self.node(id))
    }

    /// Makes the detached node `root` the new root. The previous tree is
    /// discarded. Passing `None` discards the tree entirely.
    pub fn set_root(&mut self, root: Option<NodeId>) -> Result<(), StructureError> {
        if let Some(id) = root {
            let node = self.node(id).ok_or(StructureError::UnknownNode { node: id })?;
            if let Some(parent) = node.parent {
                return Err(StructureError::AlreadyAttached { node: id, parent });
            }
            if self.root == Some(id) {
                return Ok(());
            }
        }
        if let Some(old) = self.root.take() {
            self.free_subtree(old);
        }
        self.root = root;
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    /// Mutable access to a node's properties. Links stay private to the
    /// tree builder.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Returns a builder for structural changes to this game's tree.
    pub fn tree_builder(&mut self) -> TreeBuilder<'_> {
        TreeBuilder::new(self)
    }

    /// Number of live nodes, attached or detached.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or(&[])
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|c| *c == id)?;
        siblings.get(index + 1).copied()
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|c| *c == id)?;
        index.checked_sub(1).map(|i| siblings[i])
    }

    /// Returns the topmost ancestor of `id` (the node itself if detached).
    pub fn root_of(&self, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        self.node(current)?;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        Some(current)
    }

    /// Returns true if `ancestor` is `node` or lies on its path to the root.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        self.root == Some(id)
    }

    /// Nodes of `start`'s subtree in depth-first pre-order.
    pub fn descendants(&self, start: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.node(id) {
                out.push(id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// The main line: the root followed by first children down to a leaf.
    pub fn main_line(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.root;
        while let Some(id) = current {
            out.push(id);
            current = self.node(id).and_then(Node::first_child);
        }
        out
    }

    // =========================================================================
    // Derived metadata
    // =========================================================================

    /// Game type from the root's `GM` property. Missing root, missing
    /// property and `GM[]` all give [`GameType::DEFAULT`].
    pub fn game_type(&self) -> GameType {
        match self.game_type_property_value() {
            GameTypeValue::Absent => GameType::DEFAULT,
            GameTypeValue::Number(n) => GameType::from_number(n).unwrap_or(GameType::Unknown),
            GameTypeValue::NotANumber => GameType::Unknown,
        }
    }

    /// The `GM` number; the default game type's number if absent, or
    /// [`GAME_TYPE_NAN`] if the property is not a single Number.
    pub fn game_type_as_number(&self) -> i64 {
        match self.game_type_property_value() {
            GameTypeValue::Absent => GameType::DEFAULT.as_number().unwrap_or(1),
            GameTypeValue::Number(n) => n,
            GameTypeValue::NotANumber => GAME_TYPE_NAN,
        }
    }

    fn game_type_property_value(&self) -> GameTypeValue {
        let Some(property) = self.root_node().and_then(|r| r.property(PropertyType::GM)) else {
            return GameTypeValue::Absent;
        };
        match property.values() {
            [PropertyValue::Single(SingleValue::None)] => GameTypeValue::Absent,
            [PropertyValue::Single(SingleValue::Number { value, .. })] => {
                GameTypeValue::Number(*value)
            }
            _ => GameTypeValue::NotANumber,
        }
    }

    /// Board size from the root's `SZ` property.
    pub fn board_size(&self) -> BoardSizeStatus {
        let Some(property) = self.root_node().and_then(|r| r.property(PropertyType::SZ)) else {
            return BoardSizeStatus::None;
        };
        let size = match property.values() {
            [PropertyValue::Single(SingleValue::None)] => return BoardSizeStatus::None,
            [PropertyValue::Single(SingleValue::Number { value, .. })] => BoardSize::square(*value),
            [PropertyValue::Composed(c)] => match (c.first().as_number(), c.second().as_number()) {
                (Some(columns), Some(rows)) => BoardSize::new(columns, rows),
                _ => return BoardSizeStatus::Invalid,
            },
            _ => return BoardSizeStatus::Invalid,
        };
        if size.columns < BOARD_SIZE_MINIMUM.columns || size.rows < BOARD_SIZE_MINIMUM.rows {
            return BoardSizeStatus::Invalid;
        }
        if self.game_type() == GameType::Go
            && (size.columns > BOARD_SIZE_MAXIMUM_GO.columns || size.rows > BOARD_SIZE_MAXIMUM_GO.rows)
        {
            return BoardSizeStatus::Invalid;
        }
        BoardSizeStatus::Valid(size)
    }

    /// Like [`Game::board_size`], but substitutes the standard's default for
    /// Go (19x19) and Chess (8x8) when no size is present.
    pub fn effective_board_size(&self) -> BoardSizeStatus {
        match (self.board_size(), self.game_type()) {
            (BoardSizeStatus::None, GameType::Go) => BoardSizeStatus::Valid(BOARD_SIZE_DEFAULT_GO),
            (BoardSizeStatus::None, GameType::Chess) => {
                BoardSizeStatus::Valid(BOARD_SIZE_DEFAULT_CHESS)
            }
            (status, _) => status,
        }
    }

    pub fn has_board_size(&self) -> bool {
        self.board_size().is_valid()
    }

    /// Writes `GM` into the root node.
    pub fn set_game_type(&mut self, game_type: GameType) -> Result<(), GameMetadataError> {
        let number = game_type
            .as_number()
            .ok_or(GameMetadataError::UnknownGameType)?;
        let property = Property::single(PropertyType::GM, SingleValue::number(number))?;
        self.root_node_mut()?.set_property(property);
        Ok(())
    }

    /// Writes `SZ` into the root node in canonical form.
    pub fn set_board_size(&mut self, size: BoardSize) -> Result<(), GameMetadataError> {
        let property = Property::single(PropertyType::SZ, size.to_property_value())?;
        self.root_node_mut()?.set_property(property);
        Ok(())
    }

    fn root_node_mut(&mut self) -> Result<&mut Node, GameMetadataError> {
        self.root
            .and_then(|id| self.node_mut(id))
            .ok_or(GameMetadataError::NoRoot)
    }

    // =========================================================================
    // Go views
    // =========================================================================

    fn go_context(&self) -> Option<BoardSize> {
        if self.game_type() != GameType::Go {
            return None;
        }
        self.effective_board_size().size()
    }

    /// Interprets a Point value in this game's context.
    pub fn go_point(&self, value: &SingleValue) -> Option<GoPoint> {
        value.to_go_point(GameType::Go, self.go_context()?)
    }

    /// Interprets a Move value in this game's context.
    pub fn go_move(&self, value: &SingleValue) -> Option<GoMove> {
        value.to_go_move(GameType::Go, self.go_context()?)
    }

    // =========================================================================
    // Arena
    // =========================================================================

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        self.nodes.push(Some(node));
        NodeId::from_index(self.nodes.len() - 1)
    }

    /// Frees `id` and its subtree. Freed slots are never reused, so stale
    /// ids keep failing lookups.
    pub(crate) fn free_subtree(&mut self, id: NodeId) {
        for node in self.descendants(id) {
            if let Some(slot) = self.nodes.get_mut(node.index()) {
                *slot = None;
            }
        }
    }
}

enum GameTypeValue {
    Absent,
    Number(i64),
    NotANumber,
}
