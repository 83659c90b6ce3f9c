//! The per-frame instrument contract and its shared wiring.
//!
//! Every visual instrument owns a three-level node chain (offset →
//! placement → geometry) hanging off the stage root. The offset node
//! carries the per-instance stacking displacement, the placement node
//! the family's fixed stage position, and the geometry node the visual
//! asset and the cull flag.

use ms_ir::{InstrumentKind, Settings};
use ms_scene::{CullHint, NodeKey, SceneGraph};

use crate::registry::Siblings;

/// How fast instruments move when transitioning between stack slots.
pub const TRANSITION_SPEED: f32 = 2500.0;

/// Per-frame context handed to [`Instrument::tick`].
pub struct TickContext<'a> {
    /// The scene graph all node mutation goes through.
    pub scene: &'a mut SceneGraph,
    /// Read-only view of every other instrument in the registry.
    pub siblings: Siblings<'a>,
    /// Live visualizer settings.
    pub settings: &'a Settings,
}

/// State shared by every instrument, regardless of family.
#[derive(Debug)]
pub struct InstrumentCore {
    kind: InstrumentKind,
    offset: NodeKey,
    placement: NodeKey,
    geometry: NodeKey,
    visible: bool,
    stack_index: f32,
}

impl InstrumentCore {
    /// Spawn the node chain under the stage root and start hidden.
    pub fn new(kind: InstrumentKind, scene: &mut SceneGraph) -> Self {
        let offset = scene.spawn_child(scene.root());
        let placement = scene.spawn_child(offset);
        let geometry = scene.spawn_child(placement);
        scene.set_cull(geometry, CullHint::Hidden);
        Self {
            kind,
            offset,
            placement,
            geometry,
            visible: false,
            stack_index: 0.0,
        }
    }

    /// The family this instrument stacks with.
    pub fn kind(&self) -> InstrumentKind {
        self.kind
    }

    /// Node carrying the per-instance stacking displacement.
    pub fn offset_node(&self) -> NodeKey {
        self.offset
    }

    /// Node carrying the family's fixed stage position and rotation.
    pub fn placement_node(&self) -> NodeKey {
        self.placement
    }

    /// Node carrying the visual asset; its cull flag tracks visibility.
    pub fn geometry_node(&self) -> NodeKey {
        self.geometry
    }

    /// Whether the instrument should currently render.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Current (possibly fractional) slot in the same-kind stack.
    pub fn stack_index(&self) -> f32 {
        self.stack_index
    }

    /// Store a freshly computed visibility flag and mirror it into the
    /// geometry subtree's cull state. The cull flag is never allowed to
    /// go stale: it is rewritten on every call.
    pub fn apply_visibility(&mut self, visible: bool, scene: &mut SceneGraph) {
        self.visible = visible;
        scene.set_cull(self.geometry, CullHint::from_visible(visible));
    }

    /// Compute this frame's stack slot and ease toward it.
    ///
    /// A visible instrument targets its rank among the currently-visible
    /// instruments of its kind, in registry order. A hidden one targets
    /// one past the end of the visible stack, so it drifts off the edge
    /// while fading out. With easing disabled the index snaps straight
    /// to the target; otherwise it decays toward it exponentially, and
    /// is clamped to `[0, same-kind count]` either way.
    pub fn index_for_moving(
        &mut self,
        delta: f32,
        siblings: &Siblings<'_>,
        settings: &Settings,
    ) -> f32 {
        let target = if self.visible {
            siblings.visible_rank(self.kind) as f32
        } else {
            siblings.visible_count(self.kind).saturating_sub(1) as f32
        };
        match settings.transition.easing_divisor() {
            None => {
                self.stack_index = target;
                target
            }
            Some(divisor) => {
                self.stack_index += delta * TRANSITION_SPEED * (target - self.stack_index) / divisor;
                let total = siblings.total_count(self.kind) as f32;
                self.stack_index = self.stack_index.clamp(0.0, total);
                self.stack_index
            }
        }
    }
}

/// A visual instrument on the stage.
///
/// Implementations own their node chain through an embedded
/// [`InstrumentCore`] and must not touch anything else in the scene.
pub trait Instrument {
    /// Shared state.
    fn core(&self) -> &InstrumentCore;

    /// Shared state, mutably.
    fn core_mut(&mut self) -> &mut InstrumentCore;

    /// Whether the instrument should be shown at `time`, judged purely
    /// from its own event schedule. Families differ here: sustained
    /// instruments linger through short gaps, percussion keys off its
    /// hit window. An implementation that cannot decide must answer
    /// `false`; there is no error channel at this layer.
    fn calc_visibility(&self, time: f64) -> bool;

    /// Apply the eased/snapped stack index to the offset node, in this
    /// family's stacking direction. Implementations obtain the index by
    /// calling [`InstrumentCore::index_for_moving`] exactly once.
    fn move_for_multi_channel(&mut self, delta: f32, ctx: &mut TickContext<'_>);

    /// Advance one frame. Every implementation must, in order: call
    /// [`Instrument::set_visibility`] exactly once with `time`, run its
    /// own note/animation update, then call
    /// [`Instrument::move_for_multi_channel`] with `delta`.
    fn tick(&mut self, time: f64, delta: f32, ctx: &mut TickContext<'_>);

    /// The family this instrument stacks with.
    fn kind(&self) -> InstrumentKind {
        self.core().kind()
    }

    /// Recompute visibility at `time` and mirror it into the cull flag.
    /// Wiring only — the decision itself lives in
    /// [`Instrument::calc_visibility`]. Not meant to be overridden.
    fn set_visibility(&mut self, time: f64, scene: &mut SceneGraph) {
        let visible = self.calc_visibility(time);
        self.core_mut().apply_visibility(visible, scene);
    }
}
