//! The percussion channel's drum kit.

use alloc::vec::Vec;
use glam::{Quat, Vec3};
use ms_ir::{ChannelEvent, EventPayload, InstrumentKind};
use ms_scene::{NodeKey, SceneGraph};

use crate::family::{LINGER_WINDOW, LOOKAHEAD_WINDOW};
use crate::instrument::{Instrument, InstrumentCore, TickContext};
use crate::stick::{Hit, Stick};

/// GM-1 percussion notes rendered on the cymbal.
const CYMBAL_NOTES: [u8; 3] = [49, 55, 57];

/// How far the drum head dips on a full-velocity hit.
const RECOIL_DISTANCE: f32 = -2.0;

/// Units per second the head travels back up after a hit.
const RECOIL_COMEBACK: f32 = 22.0;

/// Cymbal wobble shape; see the rotation falloff in `wobble_angle`.
const WOBBLE_SPEED: f32 = 7.0;
const WOBBLE_DAMPENING: f32 = 1.0;
const WOBBLE_AMPLITUDE: f32 = 1.5;

/// Seconds until a struck cymbal settles.
const WOBBLE_DURATION: f32 = 4.5;

/// The drum kit: a recoiling drum, a wobbling cymbal, and one stick
/// swinging through every hit.
pub struct DrumKit {
    core: InstrumentCore,
    drum: NodeKey,
    cymbal: NodeKey,
    cymbal_hits: Vec<f64>,
    cymbal_cursor: usize,
    cymbal_anim: Option<f32>,
    stick: Stick,
    first_hit: f64,
    last_hit: f64,
}

impl DrumKit {
    /// Build the kit from the percussion channel's events.
    pub fn new(scene: &mut SceneGraph, events: &[ChannelEvent]) -> Self {
        let core = InstrumentCore::new(InstrumentKind::DrumKit, scene);
        scene.set_translation(core.placement_node(), Vec3::new(0.0, 0.0, -80.0));

        let drum = scene.spawn_child(core.geometry_node());
        let cymbal = scene.spawn_child(core.geometry_node());
        scene.set_translation(cymbal, Vec3::new(-18.0, 48.0, -10.0));
        let stick_node = scene.spawn_child(core.geometry_node());
        scene.set_translation(stick_node, Vec3::new(0.0, 2.0, 18.0));

        let hits: Vec<Hit> = events
            .iter()
            .filter_map(|e| match e.payload {
                EventPayload::NoteOn { velocity, .. } if velocity > 0 => Some(Hit {
                    time: e.time,
                    velocity,
                }),
                _ => None,
            })
            .collect();
        let cymbal_hits = events
            .iter()
            .filter_map(|e| match e.payload {
                EventPayload::NoteOn { note, velocity } if velocity > 0 && CYMBAL_NOTES.contains(&note) => {
                    Some(e.time)
                }
                _ => None,
            })
            .collect();

        let first_hit = hits.first().map_or(f64::INFINITY, |h| h.time);
        let last_hit = hits.last().map_or(f64::NEG_INFINITY, |h| h.time);

        Self {
            core,
            drum,
            cymbal,
            cymbal_hits,
            cymbal_cursor: 0,
            cymbal_anim: None,
            stick: Stick::new(stick_node, hits),
            first_hit,
            last_hit,
        }
    }

    fn update_drum(&mut self, time: f64, delta: f32, scene: &mut SceneGraph) {
        if let Some(strike) = self.stick.tick(time, delta, scene) {
            let depth = f32::from(strike.velocity) / 127.0 * RECOIL_DISTANCE;
            scene.set_translation(self.drum, Vec3::new(0.0, depth, 0.0));
        } else {
            let y = scene.translation(self.drum).map_or(0.0, |t| t.y);
            if y < -1e-4 {
                let back = (y + RECOIL_COMEBACK * delta).min(0.0);
                scene.set_translation(self.drum, Vec3::new(0.0, back, 0.0));
            } else {
                scene.set_translation(self.drum, Vec3::ZERO);
            }
        }
    }

    fn update_cymbal(&mut self, time: f64, delta: f32, scene: &mut SceneGraph) {
        let mut struck = false;
        while self.cymbal_cursor < self.cymbal_hits.len()
            && self.cymbal_hits[self.cymbal_cursor] <= time
        {
            self.cymbal_cursor += 1;
            struck = true;
        }
        if struck {
            self.cymbal_anim = Some(0.0);
        }
        let angle = self.cymbal_anim.map_or(0.0, wobble_angle);
        scene.set_rotation(self.cymbal, Quat::from_rotation_x(angle));
        if let Some(anim) = &mut self.cymbal_anim {
            *anim += delta;
        }
    }
}

/// Radians of cymbal tilt `anim` seconds after a strike: an oscillation
/// with a cubic falloff.
fn wobble_angle(anim: f32) -> f32 {
    use core::f32::consts::PI;
    if anim >= WOBBLE_DURATION {
        return 0.0;
    }
    WOBBLE_AMPLITUDE * libm::cosf(anim * WOBBLE_SPEED * PI)
        / (3.0 + libm::powf(anim, 3.0) * WOBBLE_SPEED * WOBBLE_DAMPENING * PI)
}

impl Instrument for DrumKit {
    fn core(&self) -> &InstrumentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut InstrumentCore {
        &mut self.core
    }

    fn calc_visibility(&self, time: f64) -> bool {
        // The kit sits on stage for the whole stretch it participates
        // in, not just around individual hits.
        self.first_hit - LOOKAHEAD_WINDOW <= time && time <= self.last_hit + LINGER_WINDOW
    }

    fn move_for_multi_channel(&mut self, delta: f32, ctx: &mut TickContext<'_>) {
        let index = self
            .core
            .index_for_moving(delta, &ctx.siblings, ctx.settings);
        ctx.scene
            .set_translation(self.core.offset_node(), Vec3::new(0.0, 10.0 * index, 0.0));
    }

    fn tick(&mut self, time: f64, delta: f32, ctx: &mut TickContext<'_>) {
        self.set_visibility(time, ctx.scene);
        self.update_drum(time, delta, ctx.scene);
        self.update_cymbal(time, delta, ctx.scene);
        self.move_for_multi_channel(delta, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use alloc::boxed::Box;
    use ms_ir::Settings;
    use ms_scene::CullHint;

    fn hit(time: f64, note: u8) -> ChannelEvent {
        ChannelEvent::new(
            time,
            9,
            EventPayload::NoteOn {
                note,
                velocity: 127,
            },
        )
    }

    fn kit_with(scene: &mut SceneGraph, events: &[ChannelEvent]) -> DrumKit {
        DrumKit::new(scene, events)
    }

    #[test]
    fn visible_from_before_first_hit_to_after_last() {
        let mut scene = SceneGraph::new();
        let kit = kit_with(&mut scene, &[hit(2.0, 38), hit(10.0, 38)]);
        assert!(!kit.calc_visibility(0.5));
        assert!(kit.calc_visibility(1.5));
        assert!(kit.calc_visibility(6.0)); // mid-gap, still on stage
        assert!(kit.calc_visibility(11.5));
        assert!(!kit.calc_visibility(12.5));
    }

    #[test]
    fn kit_with_no_hits_never_shows() {
        let mut scene = SceneGraph::new();
        let kit = kit_with(&mut scene, &[]);
        assert!(!kit.calc_visibility(0.0));
        assert!(!kit.calc_visibility(100.0));
    }

    #[test]
    fn drum_recoils_on_the_hit_and_comes_back() {
        let mut scene = SceneGraph::new();
        let mut registry = Registry::new();
        let kit = kit_with(&mut scene, &[hit(1.0, 38)]);
        let drum = kit.drum;
        registry.add(Box::new(kit));

        registry.tick_all(&mut scene, &Settings::default(), 1.0, 0.016);
        let dipped = scene.translation(drum).unwrap().y;
        assert!((dipped - RECOIL_DISTANCE).abs() < 1e-5);

        let mut time = 1.0;
        for _ in 0..10 {
            time += 0.016;
            registry.tick_all(&mut scene, &Settings::default(), time, 0.016);
        }
        assert_eq!(scene.translation(drum).unwrap().y, 0.0);
    }

    #[test]
    fn cymbal_wobbles_after_a_crash_then_settles() {
        let mut scene = SceneGraph::new();
        let mut registry = Registry::new();
        let kit = kit_with(&mut scene, &[hit(1.0, 49)]);
        let cymbal = kit.cymbal;
        registry.add(Box::new(kit));

        registry.tick_all(&mut scene, &Settings::default(), 1.0, 0.016);
        assert!(!scene
            .rotation(cymbal)
            .unwrap()
            .abs_diff_eq(Quat::IDENTITY, 1e-4));

        // Long after the wobble window the cymbal is level again.
        registry.tick_all(&mut scene, &Settings::default(), 6.0, 5.0);
        registry.tick_all(&mut scene, &Settings::default(), 6.1, 0.016);
        assert!(scene
            .rotation(cymbal)
            .unwrap()
            .abs_diff_eq(Quat::IDENTITY, 1e-4));
    }

    #[test]
    fn snare_hit_does_not_wobble_the_cymbal() {
        let mut scene = SceneGraph::new();
        let mut registry = Registry::new();
        let kit = kit_with(&mut scene, &[hit(1.0, 38)]);
        let cymbal = kit.cymbal;
        registry.add(Box::new(kit));

        registry.tick_all(&mut scene, &Settings::default(), 1.0, 0.016);
        assert!(scene
            .rotation(cymbal)
            .unwrap()
            .abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn geometry_cull_follows_the_hit_window() {
        let mut scene = SceneGraph::new();
        let mut registry = Registry::new();
        let kit = kit_with(&mut scene, &[hit(5.0, 38)]);
        let geometry = kit.core().geometry_node();
        registry.add(Box::new(kit));

        registry.tick_all(&mut scene, &Settings::default(), 0.0, 0.016);
        assert_eq!(scene.cull(geometry), Some(CullHint::Hidden));
        registry.tick_all(&mut scene, &Settings::default(), 5.0, 0.016);
        assert_eq!(scene.cull(geometry), Some(CullHint::Shown));
    }
}
