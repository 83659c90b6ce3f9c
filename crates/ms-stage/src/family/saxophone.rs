//! Saxophones.

use alloc::vec::Vec;
use glam::{Quat, Vec3};
use ms_ir::{note_periods, ChannelEvent, InstrumentKind, NotePeriod};
use ms_scene::{NodeKey, SceneGraph};

use crate::family::sustained_visible;
use crate::instrument::{Instrument, InstrumentCore, TickContext};

/// Degrees of arc between consecutive saxophones around the stage
/// center.
const STACK_ARC: f32 = -17.0;

/// How much the bell stretches at full velocity.
const BELL_STRETCH: f32 = 0.5;

/// A saxophone on the circular riser; its bell stretches with the note
/// being blown.
pub struct Saxophone {
    core: InstrumentCore,
    periods: Vec<NotePeriod>,
    bell: NodeKey,
}

impl Saxophone {
    /// Build a saxophone for one channel segment's events.
    pub fn new(scene: &mut SceneGraph, events: &[ChannelEvent], end_of_track: f64) -> Self {
        let core = InstrumentCore::new(InstrumentKind::Saxophone, scene);
        // Placed off-center so that rotating the offset node walks the
        // instrument around a circle.
        scene.set_translation(core.placement_node(), Vec3::new(0.0, 21.0, 46.0));
        let bell = scene.spawn_child(core.geometry_node());
        Self {
            core,
            periods: note_periods(events, end_of_track),
            bell,
        }
    }

    fn blowing(&self, time: f64) -> Option<&NotePeriod> {
        self.periods.iter().find(|p| p.playing(time))
    }
}

impl Instrument for Saxophone {
    fn core(&self) -> &InstrumentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut InstrumentCore {
        &mut self.core
    }

    fn calc_visibility(&self, time: f64) -> bool {
        sustained_visible(&self.periods, time)
    }

    fn move_for_multi_channel(&mut self, delta: f32, ctx: &mut TickContext<'_>) {
        let index = self
            .core
            .index_for_moving(delta, &ctx.siblings, ctx.settings);
        ctx.scene.set_rotation(
            self.core.offset_node(),
            Quat::from_rotation_y((STACK_ARC * index).to_radians()),
        );
    }

    fn tick(&mut self, time: f64, delta: f32, ctx: &mut TickContext<'_>) {
        self.set_visibility(time, ctx.scene);
        let stretch = match self.blowing(time) {
            Some(period) => 1.0 + BELL_STRETCH * f32::from(period.velocity) / 127.0,
            None => 1.0,
        };
        ctx.scene
            .set_scale(self.bell, Vec3::new(1.0, stretch, 1.0));
        self.move_for_multi_channel(delta, ctx);
    }
}
