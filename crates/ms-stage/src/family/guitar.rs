//! Guitars.

use alloc::vec::Vec;
use glam::{Quat, Vec3};
use ms_ir::{note_periods, ChannelEvent, InstrumentKind, NotePeriod};
use ms_scene::SceneGraph;

use crate::family::sustained_visible;
use crate::instrument::{Instrument, InstrumentCore, TickContext};

/// Consecutive guitars fan out to the side and down.
const STACK_OFFSET: Vec3 = Vec3::new(5.0, -4.0, 0.0);

/// How far the body leans into a strum, in degrees.
const STRUM_LEAN: f32 = 4.0;

/// A guitar that leans into the strum while anything sounds.
pub struct Guitar {
    core: InstrumentCore,
    periods: Vec<NotePeriod>,
}

impl Guitar {
    /// Build a guitar for one channel segment's events.
    pub fn new(scene: &mut SceneGraph, events: &[ChannelEvent], end_of_track: f64) -> Self {
        let core = InstrumentCore::new(InstrumentKind::Guitar, scene);
        scene.set_translation(core.placement_node(), Vec3::new(43.4, 35.3, 7.1));
        scene.set_rotation(
            core.placement_node(),
            Quat::from_rotation_y(-45f32.to_radians()),
        );
        Self {
            core,
            periods: note_periods(events, end_of_track),
        }
    }

    fn sounding(&self, time: f64) -> bool {
        self.periods.iter().any(|p| p.playing(time))
    }
}

impl Instrument for Guitar {
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
        ctx.scene
            .set_translation(self.core.offset_node(), STACK_OFFSET * index);
    }

    fn tick(&mut self, time: f64, delta: f32, ctx: &mut TickContext<'_>) {
        self.set_visibility(time, ctx.scene);
        let lean = if self.sounding(time) { STRUM_LEAN } else { 0.0 };
        ctx.scene.set_rotation(
            self.core.geometry_node(),
            Quat::from_rotation_x(lean.to_radians()),
        );
        self.move_for_multi_channel(delta, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use alloc::boxed::Box;
    use ms_ir::{EventPayload, Settings};

    fn note(time: f64, n: u8) -> ChannelEvent {
        ChannelEvent::new(
            time,
            1,
            EventPayload::NoteOn {
                note: n,
                velocity: 80,
            },
        )
    }

    fn off(time: f64, n: u8) -> ChannelEvent {
        ChannelEvent::new(time, 1, EventPayload::NoteOff { note: n })
    }

    #[test]
    fn leans_while_sounding() {
        let mut scene = SceneGraph::new();
        let mut registry = Registry::new();
        let guitar = Guitar::new(&mut scene, &[note(1.0, 45), off(2.0, 45)], 30.0);
        let geometry = guitar.core().geometry_node();
        registry.add(Box::new(guitar));

        registry.tick_all(&mut scene, &Settings::default(), 1.5, 0.016);
        assert_ne!(scene.rotation(geometry), Some(Quat::IDENTITY));

        registry.tick_all(&mut scene, &Settings::default(), 2.5, 0.016);
        assert_eq!(scene.rotation(geometry), Some(Quat::IDENTITY));
    }

    #[test]
    fn guitars_fan_sideways() {
        let mut scene = SceneGraph::new();
        let mut registry = Registry::new();
        let first = Guitar::new(&mut scene, &[note(0.0, 45)], 30.0);
        let second = Guitar::new(&mut scene, &[note(0.0, 50)], 30.0);
        let offset = second.core().offset_node();
        registry.add(Box::new(first));
        registry.add(Box::new(second));

        registry.tick_all(&mut scene, &Settings::default(), 0.5, 0.016);
        assert_eq!(scene.translation(offset), Some(STACK_OFFSET));
    }
}
