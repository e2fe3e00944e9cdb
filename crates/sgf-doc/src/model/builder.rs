//! Structural edits of a game tree.
//!
//! All parent/child links are changed here. Every operation validates its
//! preconditions before touching the arena, so a call that returns an error
//! leaves the tree exactly as it was.
//!
//! # Example
//!
//! ```rust
//! use sgf_doc::model::{Game, Node, Property, PropertyType, SingleValue};
//!
//! let mut game = Game::with_root();
//! let root = game.root().unwrap();
//! let mut tree = game.tree_builder();
//! let black = tree.add_child(root, Node::with_properties([
//!     Property::single(PropertyType::B, SingleValue::move_value("pd")).unwrap(),
//! ])).unwrap();
//! let white = tree.add_child(black, Node::new()).unwrap();
//! assert_eq!(game.main_line(), vec![root, black, white]);
//! ```

use crate::error::StructureError;
use crate::model::game::Game;
use crate::model::node::{Node, NodeId};

/// Mutating view of a [`Game`]'s tree structure.
#[derive(Debug)]
pub struct TreeBuilder<'a> {
    game: &'a mut Game,
}

impl<'a> TreeBuilder<'a> {
    pub(crate) fn new(game: &'a mut Game) -> Self {
        Self { game }
    }

    /// Read access to the game being edited.
    pub fn game(&self) -> &Game {
        self.game
    }

    /// Creates a detached node in the game's arena.
    pub fn create_node(&mut self, node: Node) -> NodeId {
        let mut node = node;
        node.parent = None;
        node.children.clear();
        self.game.alloc(node)
    }

    /// Creates `node` and appends it as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId, StructureError> {
        self.check_exists(parent)?;
        Ok(self.attach_new(parent, node))
    }

    /// Creates `node` below a `parent` the caller knows to exist.
    pub(crate) fn attach_new(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.create_node(node);
        self.link(parent, id, None);
        id
    }

    /// Appends the detached node `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), StructureError> {
        self.check_attachable(child, parent)?;
        self.link(parent, child, None);
        Ok(())
    }

    /// Inserts the detached node `node` immediately before `sibling`.
    pub fn insert_before(&mut self, sibling: NodeId, node: NodeId) -> Result<(), StructureError> {
        let (parent, index) = self.position(sibling)?;
        self.check_attachable(node, parent)?;
        self.link(parent, node, Some(index));
        Ok(())
    }

    /// Inserts the detached node `node` immediately after `sibling`.
    pub fn insert_after(&mut self, sibling: NodeId, node: NodeId) -> Result<(), StructureError> {
        let (parent, index) = self.position(sibling)?;
        self.check_attachable(node, parent)?;
        self.link(parent, node, Some(index + 1));
        Ok(())
    }

    /// Puts the detached node `new` in the place of `old` below `parent`.
    /// `old` is detached with its subtree and may be re-attached later.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        old: NodeId,
        new: NodeId,
    ) -> Result<(), StructureError> {
        self.check_exists(parent)?;
        self.check_exists(old)?;
        if self.game.parent(old) != Some(parent) {
            return Err(StructureError::NotAChild { parent, child: old });
        }
        self.check_attachable(new, parent)?;
        let index = self.child_index(parent, old)?;
        self.children_mut(parent)?[index] = new;
        self.set_parent(old, None);
        self.set_parent(new, Some(parent));
        Ok(())
    }

    /// Detaches `node` from its parent. The subtree stays alive in the
    /// arena and can be attached again.
    pub fn remove(&mut self, node: NodeId) -> Result<(), StructureError> {
        let (parent, index) = self.position(node)?;
        self.children_mut(parent)?.remove(index);
        self.set_parent(node, None);
        Ok(())
    }

    /// Detaches `node` (if attached) and frees it together with its
    /// subtree. Ids of freed nodes stop resolving.
    pub fn discard(&mut self, node: NodeId) -> Result<(), StructureError> {
        self.check_exists(node)?;
        if self.game.is_root(node) {
            return Err(StructureError::NodeIsRoot { node });
        }
        if self.game.parent(node).is_some() {
            self.remove(node)?;
        }
        self.game.free_subtree(node);
        Ok(())
    }

    /// Swaps `node` with its previous sibling.
    pub fn promote_variation(&mut self, node: NodeId) -> Result<(), StructureError> {
        let (parent, index) = self.position(node)?;
        if index == 0 {
            return Err(StructureError::NoSibling { node, direction: "previous" });
        }
        self.children_mut(parent)?.swap(index - 1, index);
        Ok(())
    }

    /// Swaps `node` with its next sibling.
    pub fn demote_variation(&mut self, node: NodeId) -> Result<(), StructureError> {
        let (parent, index) = self.position(node)?;
        let children = self.children_mut(parent)?;
        if index + 1 >= children.len() {
            return Err(StructureError::NoSibling { node, direction: "next" });
        }
        children.swap(index, index + 1);
        Ok(())
    }

    /// Moves `node` to the first child position of its parent, keeping the
    /// relative order of the other children.
    pub fn make_main_variation(&mut self, node: NodeId) -> Result<(), StructureError> {
        let (parent, index) = self.position(node)?;
        self.children_mut(parent)?[..=index].rotate_right(1);
        Ok(())
    }

    // =========================================================================
    // Checks
    // =========================================================================

    fn check_exists(&self, node: NodeId) -> Result<(), StructureError> {
        if self.game.contains(node) {
            Ok(())
        } else {
            Err(StructureError::UnknownNode { node })
        }
    }

    /// `node` must be a live, detached, non-root node that is not an
    /// ancestor of `target`.
    fn check_attachable(&self, node: NodeId, target: NodeId) -> Result<(), StructureError> {
        self.check_exists(node)?;
        self.check_exists(target)?;
        if let Some(parent) = self.game.parent(node) {
            return Err(StructureError::AlreadyAttached { node, parent });
        }
        if self.game.is_root(node) {
            return Err(StructureError::NodeIsRoot { node });
        }
        if self.game.is_ancestor_or_self(node, target) {
            return Err(StructureError::WouldCreateCycle { node, target });
        }
        Ok(())
    }

    /// Returns the parent of `node` and its index among the parent's children.
    fn position(&self, node: NodeId) -> Result<(NodeId, usize), StructureError> {
        self.check_exists(node)?;
        let parent = self
            .game
            .parent(node)
            .ok_or(StructureError::NoParent { node })?;
        let index = self.child_index(parent, node)?;
        Ok((parent, index))
    }

    fn child_index(&self, parent: NodeId, child: NodeId) -> Result<usize, StructureError> {
        self.game
            .children(parent)
            .iter()
            .position(|c| *c == child)
            .ok_or(StructureError::NotAChild { parent, child })
    }

    // =========================================================================
    // Raw link updates (callers have validated)
    // =========================================================================

    /// Links `child` below `parent`. Every caller has checked that `parent`
    /// exists; a missing parent leaves the tree unchanged.
    fn link(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) {
        let Some(node) = self.game.node_mut(parent) else {
            return;
        };
        match index {
            Some(i) => node.children.insert(i, child),
            None => node.children.push(child),
        }
        self.set_parent(child, Some(parent));
    }

    fn children_mut(&mut self, parent: NodeId) -> Result<&mut Vec<NodeId>, StructureError> {
        self.game
            .node_mut(parent)
            .map(|node| &mut node.children)
            .ok_or(StructureError::UnknownNode { node: parent })
    }

    fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) {
        if let Some(n) = self.game.node_mut(node) {
            n.parent = parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// root -> a -> (b, c)
    fn sample() -> (Game, NodeId, NodeId, NodeId, NodeId) {
        let mut game = Game::with_root();
        let root = game.root().unwrap();
        let mut tree = game.tree_builder();
        let a = tree.add_child(root, Node::new()).unwrap();
        let b = tree.add_child(a, Node::new()).unwrap();
        let c = tree.add_child(a, Node::new()).unwrap();
        (game, root, a, b, c)
    }

    /// Every child points back at its parent and appears exactly once.
    fn assert_consistent(game: &Game) {
        let Some(root) = game.root() else { return };
        let mut seen = Vec::new();
        for id in game.descendants(root) {
            assert!(!seen.contains(&id), "node {id:?} reachable twice");
            seen.push(id);
            for child in game.children(id) {
                assert_eq!(game.parent(*child), Some(id));
            }
        }
    }

    #[test]
    fn test_append_and_navigate() {
        let (game, root, a, b, c) = sample();
        assert_eq!(game.main_line(), vec![root, a, b]);
        assert_eq!(game.next_sibling(b), Some(c));
        assert_eq!(game.previous_sibling(c), Some(b));
        assert_eq!(game.previous_sibling(b), None);
        assert_eq!(game.root_of(c), Some(root));
        assert_consistent(&game);
    }

    #[test]
    fn test_attach_rejects_attached_node() {
        let (mut game, root, _a, b, _c) = sample();
        let err = game.tree_builder().append_child(root, b).unwrap_err();
        assert!(matches!(err, StructureError::AlreadyAttached { .. }));
        assert_consistent(&game);
    }

    #[test]
    fn test_attach_rejects_root() {
        let (mut game, root, _a, _b, c) = sample();
        let err = game.tree_builder().append_child(c, root).unwrap_err();
        assert_eq!(err, StructureError::NodeIsRoot { node: root });
    }

    #[test]
    fn test_attach_rejects_cycle() {
        let (mut game, _root, a, b, _c) = sample();
        let mut tree = game.tree_builder();
        tree.remove(a).unwrap();
        let err = tree.append_child(b, a).unwrap_err();
        assert_eq!(err, StructureError::WouldCreateCycle { node: a, target: b });
        let err = tree.append_child(a, a).unwrap_err();
        assert!(matches!(err, StructureError::WouldCreateCycle { .. }));
    }

    #[test]
    fn test_remove_keeps_subtree_reattachable() {
        let (mut game, root, a, b, c) = sample();
        let mut tree = game.tree_builder();
        tree.remove(a).unwrap();
        assert_eq!(tree.game().children(root), &[] as &[NodeId]);
        assert_eq!(tree.game().children(a), &[b, c]);
        tree.append_child(root, a).unwrap();
        assert_eq!(game.main_line(), vec![root, a, b]);
        assert_consistent(&game);
    }

    #[test]
    fn test_remove_detached_fails() {
        let (mut game, root, _a, _b, _c) = sample();
        let err = game.tree_builder().remove(root).unwrap_err();
        assert_eq!(err, StructureError::NoParent { node: root });
    }

    #[test]
    fn test_discard_frees_subtree() {
        let (mut game, root, a, b, c) = sample();
        let before = game.node_count();
        game.tree_builder().discard(a).unwrap();
        assert_eq!(game.node_count(), before - 3);
        for id in [a, b, c] {
            assert!(!game.contains(id));
        }
        let err = game.tree_builder().append_child(root, b).unwrap_err();
        assert_eq!(err, StructureError::UnknownNode { node: b });
        assert!(game.tree_builder().discard(root).is_err());
    }

    #[test]
    fn test_insert_before_and_after() {
        let (mut game, _root, a, b, c) = sample();
        let mut tree = game.tree_builder();
        let x = tree.create_node(Node::new());
        let y = tree.create_node(Node::new());
        tree.insert_before(b, x).unwrap();
        tree.insert_after(b, y).unwrap();
        assert_eq!(game.children(a), &[x, b, y, c]);
        assert_consistent(&game);
    }

    #[test]
    fn test_insert_next_to_detached_fails() {
        let (mut game, root, _a, _b, _c) = sample();
        let mut tree = game.tree_builder();
        let x = tree.create_node(Node::new());
        let err = tree.insert_before(root, x).unwrap_err();
        assert_eq!(err, StructureError::NoParent { node: root });
        assert!(!tree.game().node(x).unwrap().has_parent());
    }

    #[test]
    fn test_replace_child() {
        let (mut game, root, a, b, c) = sample();
        let mut tree = game.tree_builder();
        let x = tree.create_node(Node::new());
        tree.replace_child(a, b, x).unwrap();
        assert_eq!(tree.game().children(a), &[x, c]);
        assert_eq!(tree.game().parent(b), None);

        let err = tree.replace_child(root, c, b).unwrap_err();
        assert_eq!(err, StructureError::NotAChild { parent: root, child: c });
        assert_consistent(&game);
    }

    #[test]
    fn test_variation_order() {
        let (mut game, _root, a, b, c) = sample();
        let mut tree = game.tree_builder();
        let d = tree.add_child(a, Node::new()).unwrap();

        tree.promote_variation(c).unwrap();
        assert_eq!(tree.game().children(a), &[c, b, d]);
        assert!(matches!(
            tree.promote_variation(c),
            Err(StructureError::NoSibling { direction: "previous", .. })
        ));

        tree.demote_variation(c).unwrap();
        assert_eq!(tree.game().children(a), &[b, c, d]);
        assert!(matches!(
            tree.demote_variation(d),
            Err(StructureError::NoSibling { direction: "next", .. })
        ));

        tree.make_main_variation(d).unwrap();
        assert_eq!(tree.game().children(a), &[d, b, c]);
        assert_consistent(&game);
    }

    #[test]
    fn test_set_root_replaces_tree() {
        let (mut game, root, _a, _b, _c) = sample();
        let new_root = game.tree_builder().create_node(Node::new());
        game.set_root(Some(new_root)).unwrap();
        assert_eq!(game.root(), Some(new_root));
        assert!(!game.contains(root));
        assert_eq!(game.node_count(), 1);
    }

    // =========================================================================
    // Arbitrary operation sequences
    // =========================================================================

    /// Operand values index into every id created so far, freed ones
    /// included, modulo its length.
    #[derive(Debug, Clone)]
    enum TreeOp {
        Create,
        AddChild(usize),
        Append(usize, usize),
        InsertBefore(usize, usize),
        InsertAfter(usize, usize),
        Replace(usize, usize, usize),
        Remove(usize),
        Discard(usize),
        Promote(usize),
        Demote(usize),
        MakeMain(usize),
    }

    fn arb_op() -> impl Strategy<Value = TreeOp> {
        let i = || 0usize..64;
        prop_oneof![
            Just(TreeOp::Create),
            i().prop_map(TreeOp::AddChild),
            (i(), i()).prop_map(|(a, b)| TreeOp::Append(a, b)),
            (i(), i()).prop_map(|(a, b)| TreeOp::InsertBefore(a, b)),
            (i(), i()).prop_map(|(a, b)| TreeOp::InsertAfter(a, b)),
            (i(), i(), i()).prop_map(|(a, b, c)| TreeOp::Replace(a, b, c)),
            i().prop_map(TreeOp::Remove),
            i().prop_map(TreeOp::Discard),
            i().prop_map(TreeOp::Promote),
            i().prop_map(TreeOp::Demote),
            i().prop_map(TreeOp::MakeMain),
        ]
    }

    fn pick(ids: &[NodeId], i: usize) -> NodeId {
        ids[i % ids.len()]
    }

    fn apply(game: &mut Game, ids: &mut Vec<NodeId>, op: &TreeOp) -> Result<(), StructureError> {
        let mut tree = game.tree_builder();
        match *op {
            TreeOp::Create => {
                ids.push(tree.create_node(Node::new()));
                Ok(())
            }
            TreeOp::AddChild(p) => tree.add_child(pick(ids, p), Node::new()).map(|id| ids.push(id)),
            TreeOp::Append(p, c) => tree.append_child(pick(ids, p), pick(ids, c)),
            TreeOp::InsertBefore(s, n) => tree.insert_before(pick(ids, s), pick(ids, n)),
            TreeOp::InsertAfter(s, n) => tree.insert_after(pick(ids, s), pick(ids, n)),
            TreeOp::Replace(p, o, n) => tree.replace_child(pick(ids, p), pick(ids, o), pick(ids, n)),
            TreeOp::Remove(n) => tree.remove(pick(ids, n)),
            TreeOp::Discard(n) => tree.discard(pick(ids, n)),
            TreeOp::Promote(n) => tree.promote_variation(pick(ids, n)),
            TreeOp::Demote(n) => tree.demote_variation(pick(ids, n)),
            TreeOp::MakeMain(n) => tree.make_main_variation(pick(ids, n)),
        }
    }

    type Links = (Option<NodeId>, Vec<Option<(Option<NodeId>, Vec<NodeId>)>>);

    fn links(game: &Game) -> Links {
        let slots = game
            .nodes
            .iter()
            .map(|slot| slot.as_ref().map(|n| (n.parent, n.children.clone())))
            .collect();
        (game.root, slots)
    }

    /// Checks every live node: links agree in both directions, each node has
    /// at most one parent, and walking up from any node terminates.
    fn check_links(game: &Game) -> Result<(), TestCaseError> {
        let live: Vec<NodeId> = (0..game.nodes.len())
            .map(NodeId::from_index)
            .filter(|id| game.contains(*id))
            .collect();
        if let Some(root) = game.root {
            prop_assert!(game.contains(root));
            prop_assert_eq!(game.parent(root), None);
        }
        for &id in &live {
            for child in game.children(id) {
                prop_assert!(game.contains(*child));
                prop_assert_eq!(game.parent(*child), Some(id));
            }
            if let Some(parent) = game.parent(id) {
                prop_assert!(game.contains(parent));
                let count = game.children(parent).iter().filter(|c| **c == id).count();
                prop_assert_eq!(count, 1);
            }
            let mut steps = 0;
            let mut current = id;
            while let Some(parent) = game.parent(current) {
                steps += 1;
                prop_assert!(steps <= live.len(), "cycle above {:?}", id);
                current = parent;
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_builder_preserves_tree_invariants(ops in prop::collection::vec(arb_op(), 1..80)) {
            let mut game = Game::with_root();
            let mut ids: Vec<NodeId> = game.root().into_iter().collect();
            for op in &ops {
                let before = links(&game);
                if apply(&mut game, &mut ids, op).is_err() {
                    prop_assert_eq!(links(&game), before, "failed {:?} changed the tree", op);
                }
                check_links(&game)?;
            }
        }
    }
}
