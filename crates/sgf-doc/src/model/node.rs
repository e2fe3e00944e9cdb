//! Nodes of a game tree.
//!
//! Nodes live in the arena of the [`Game`](crate::model::Game) that created
//! them and are addressed by [`NodeId`]. Parent and child links can only be
//! changed through the [`TreeBuilder`](crate::model::TreeBuilder), which keeps
//! the single-parent and acyclicity invariants.

use crate::model::property::{Property, PropertyType};

/// Handle to a node in a game's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> NodeId {
        NodeId(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// A node: a set of properties plus links into the tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    properties: Vec<Property>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    /// Creates a detached node without properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detached node with the given properties. Later properties
    /// replace earlier ones with the same identifier.
    pub fn with_properties(properties: impl IntoIterator<Item = Property>) -> Self {
        let mut node = Node::new();
        for property in properties {
            node.set_property(property);
        }
        node
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }

    /// Returns the property of the given type. For `PropertyType::Unknown`
    /// this returns the first unknown property; use
    /// [`Node::property_by_name`] to address a specific one.
    pub fn property(&self, property_type: PropertyType) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.property_type() == property_type)
    }

    pub fn property_by_name(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name() == name)
    }

    pub fn has_property(&self, property_type: PropertyType) -> bool {
        self.property(property_type).is_some()
    }

    /// Adds `property`, replacing in place any property with the same
    /// identifier.
    pub fn set_property(&mut self, property: Property) {
        match self
            .properties
            .iter_mut()
            .find(|p| p.name() == property.name())
        {
            Some(existing) => *existing = property,
            None => self.properties.push(property),
        }
    }

    /// Removes and returns the property of the given type.
    pub fn remove_property(&mut self, property_type: PropertyType) -> Option<Property> {
        let index = self
            .properties
            .iter()
            .position(|p| p.property_type() == property_type)?;
        Some(self.properties.remove(index))
    }

    pub fn remove_property_by_name(&mut self, name: &str) -> Option<Property> {
        let index = self.properties.iter().position(|p| p.name() == name)?;
        Some(self.properties.remove(index))
    }

    pub fn clear_properties(&mut self) {
        self.properties.clear();
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// Children in variation order. The first child is the main line.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn first_child(&self) -> Option<NodeId> {
        self.children.first().copied()
    }

    pub fn last_child(&self) -> Option<NodeId> {
        self.children.last().copied()
    }
}
