//! Keyboards (pianos and electric pianos).

use alloc::vec::Vec;
use glam::{Quat, Vec3};
use ms_ir::{note_periods, ChannelEvent, InstrumentKind, NotePeriod};
use ms_scene::{NodeKey, SceneGraph};

use crate::family::sustained_visible;
use crate::instrument::{Instrument, InstrumentCore, TickContext};

/// Number of keys on the model.
pub const KEY_COUNT: usize = 88;

/// MIDI note of the lowest key (A0).
const LOWEST_KEY: u8 = 21;

/// How far a pressed key dips, in degrees.
const KEY_PRESS_ANGLE: f32 = 8.0;

/// Consecutive keyboards stack up and back along this vector.
const STACK_OFFSET: Vec3 = Vec3::new(-5.865, 3.03, -6.826);

/// A full-width keyboard with per-key press animation.
pub struct Keyboard {
    core: InstrumentCore,
    periods: Vec<NotePeriod>,
    keys: Vec<Key>,
}

struct Key {
    node: NodeKey,
    note: u8,
}

impl Keyboard {
    /// Build a keyboard for one channel segment's events.
    pub fn new(scene: &mut SceneGraph, events: &[ChannelEvent], end_of_track: f64) -> Self {
        let core = InstrumentCore::new(InstrumentKind::Keyboard, scene);
        scene.set_translation(core.placement_node(), Vec3::new(-50.0, 32.0, -6.0));
        scene.set_rotation(
            core.placement_node(),
            Quat::from_rotation_y(45f32.to_radians()),
        );

        let keys = (0..KEY_COUNT as u8)
            .map(|i| {
                let note = LOWEST_KEY + i;
                let node = scene.spawn_child(core.geometry_node());
                scene.set_translation(node, Vec3::new(f32::from(i) * 0.9, 0.0, 0.0));
                Key { node, note }
            })
            .collect();

        Self {
            core,
            periods: note_periods(events, end_of_track),
            keys,
        }
    }

    fn animate_keys(&self, time: f64, scene: &mut SceneGraph) {
        let mut pressed = [false; 128];
        for period in &self.periods {
            if period.playing(time) {
                if let Some(slot) = pressed.get_mut(period.note as usize) {
                    *slot = true;
                }
            }
        }
        for key in &self.keys {
            let angle = if pressed[key.note as usize] {
                KEY_PRESS_ANGLE
            } else {
                0.0
            };
            scene.set_rotation(key.node, Quat::from_rotation_x(angle.to_radians()));
        }
    }
}

impl Instrument for Keyboard {
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
        self.animate_keys(time, ctx.scene);
        self.move_for_multi_channel(delta, ctx);
    }
}
