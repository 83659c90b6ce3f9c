//! Node storage types.

use alloc::vec::Vec;
use glam::{Quat, Vec3};

slotmap::new_key_type! {
    /// Handle to a node in a [`SceneGraph`](crate::SceneGraph).
    pub struct NodeKey;
}

/// Render-cull state of a node's subtree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CullHint {
    /// Render this subtree.
    #[default]
    Shown,
    /// Skip rendering this subtree. Simulation still runs.
    Hidden,
}

impl CullHint {
    /// The cull state matching a visibility flag.
    pub fn from_visible(visible: bool) -> Self {
        if visible {
            Self::Shown
        } else {
            Self::Hidden
        }
    }
}

/// A single transform node.
#[derive(Clone, Debug)]
pub struct SceneNode {
    /// Parent node, if attached.
    pub(crate) parent: Option<NodeKey>,
    /// Attached children, in attach order.
    pub(crate) children: Vec<NodeKey>,
    /// Local translation.
    pub translation: Vec3,
    /// Local rotation.
    pub rotation: Quat,
    /// Local scale.
    pub scale: Vec3,
    /// Cull state of this node's subtree.
    pub cull: CullHint,
}

impl SceneNode {
    pub(crate) fn new() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            cull: CullHint::Shown,
        }
    }

    /// Parent node, if attached.
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Attached children, in attach order.
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cull_hint_matches_visibility() {
        assert_eq!(CullHint::from_visible(true), CullHint::Shown);
        assert_eq!(CullHint::from_visible(false), CullHint::Hidden);
    }

    #[test]
    fn new_node_is_identity() {
        let node = SceneNode::new();
        assert_eq!(node.translation, Vec3::ZERO);
        assert_eq!(node.rotation, Quat::IDENTITY);
        assert_eq!(node.scale, Vec3::ONE);
        assert_eq!(node.cull, CullHint::Shown);
    }
}
