//! Stands and shadows that follow their instruments on and off stage.

use ms_ir::InstrumentKind;
use ms_scene::{CullHint, NodeKey, SceneGraph};
use ms_stage::Registry;

/// A fixed stage fixture shown exactly while any instrument of its kind
/// is visible (a piano stand has no business on an empty stage).
#[derive(Clone, Copy, Debug)]
pub struct StageProp {
    node: NodeKey,
    kind: InstrumentKind,
}

impl StageProp {
    /// Tie `node` to the visibility of `kind`.
    pub fn new(node: NodeKey, kind: InstrumentKind) -> Self {
        Self { node, kind }
    }

    /// The prop's scene node.
    pub fn node(&self) -> NodeKey {
        self.node
    }

    /// Re-derive the prop's cull state from the registry.
    pub fn update(&self, registry: &Registry, scene: &mut SceneGraph) {
        scene.set_cull(
            self.node,
            CullHint::from_visible(registry.any_visible(self.kind)),
        );
    }
}
