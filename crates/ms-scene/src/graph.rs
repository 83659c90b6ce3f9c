//! The scene graph arena.

use alloc::vec::Vec;
use glam::{Mat4, Quat, Vec3};
use slotmap::SlotMap;

use crate::node::{CullHint, NodeKey, SceneNode};

/// Arena of transform nodes rooted at a single shared node.
///
/// Setters on missing keys are no-ops and getters return `None`; live
/// code never holds a stale key because nodes are only destroyed by
/// whoever spawned them.
#[derive(Debug)]
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, SceneNode>,
    root: NodeKey,
}

impl SceneGraph {
    /// Create a graph containing only the root node.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::new());
        Self { nodes, root }
    }

    /// The shared root every visible subtree hangs off.
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether only the root exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Whether `key` refers to a live node.
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Spawn a fresh node attached under `parent`.
    pub fn spawn_child(&mut self, parent: NodeKey) -> NodeKey {
        let key = self.nodes.insert(SceneNode::new());
        self.attach(parent, key);
        key
    }

    /// Attach `child` under `parent`, detaching it from any previous
    /// parent first.
    pub fn attach(&mut self, parent: NodeKey, child: NodeKey) {
        if parent == child || !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return;
        }
        self.detach(child);
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
    }

    /// Detach `child` from its parent, leaving it alive but unattached.
    pub fn detach(&mut self, child: NodeKey) {
        let Some(parent) = self.nodes.get(child).and_then(SceneNode::parent) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|&c| c != child);
        }
        self.nodes[child].parent = None;
    }

    /// Destroy `key` and every descendant. The root cannot be removed.
    pub fn remove_subtree(&mut self, key: NodeKey) {
        if key == self.root {
            return;
        }
        self.detach(key);
        let mut pending = Vec::new();
        pending.push(key);
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(next) {
                pending.extend(node.children);
            }
        }
    }

    /// Immutable access to a node.
    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    /// Set a node's local translation.
    pub fn set_translation(&mut self, key: NodeKey, translation: Vec3) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.translation = translation;
        }
    }

    /// A node's local translation.
    pub fn translation(&self, key: NodeKey) -> Option<Vec3> {
        self.nodes.get(key).map(|n| n.translation)
    }

    /// Set a node's local rotation.
    pub fn set_rotation(&mut self, key: NodeKey, rotation: Quat) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.rotation = rotation;
        }
    }

    /// A node's local rotation.
    pub fn rotation(&self, key: NodeKey) -> Option<Quat> {
        self.nodes.get(key).map(|n| n.rotation)
    }

    /// Set a node's local scale.
    pub fn set_scale(&mut self, key: NodeKey, scale: Vec3) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.scale = scale;
        }
    }

    /// A node's local scale.
    pub fn scale(&self, key: NodeKey) -> Option<Vec3> {
        self.nodes.get(key).map(|n| n.scale)
    }

    /// Set the cull state of a node's subtree.
    pub fn set_cull(&mut self, key: NodeKey, cull: CullHint) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.cull = cull;
        }
    }

    /// A node's own cull state, ignoring ancestors.
    pub fn cull(&self, key: NodeKey) -> Option<CullHint> {
        self.nodes.get(key).map(|n| n.cull)
    }

    /// Whether the renderer would draw this node: the node and all of
    /// its ancestors are shown, and it is attached to the root.
    pub fn visible_in_render(&self, key: NodeKey) -> bool {
        let mut current = key;
        loop {
            let Some(node) = self.nodes.get(current) else {
                return false;
            };
            if node.cull == CullHint::Hidden {
                return false;
            }
            match node.parent {
                Some(parent) => current = parent,
                None => return current == self.root,
            }
        }
    }

    /// Local transform matrix of a node.
    pub fn local_transform(&self, key: NodeKey) -> Option<Mat4> {
        self.nodes
            .get(key)
            .map(|n| Mat4::from_scale_rotation_translation(n.scale, n.rotation, n.translation))
    }

    /// Root-to-node transform, composing the whole parent chain.
    pub fn world_transform(&self, key: NodeKey) -> Option<Mat4> {
        let mut transform = self.local_transform(key)?;
        let mut current = self.nodes.get(key)?.parent;
        while let Some(parent) = current {
            let node = self.nodes.get(parent)?;
            transform =
                Mat4::from_scale_rotation_translation(node.scale, node.rotation, node.translation)
                    * transform;
            current = node.parent;
        }
        Some(transform)
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
