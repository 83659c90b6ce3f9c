//! Strike animation for sticks and mallets.
//!
//! A stick idles fully raised (and culled), swings down so that it
//! meets the drum exactly at each hit time, then recoils back up. The
//! downswing is driven purely by time-to-next-hit, so it self-corrects
//! regardless of frame rate.

use alloc::vec::Vec;
use glam::Quat;
use ms_scene::{CullHint, NodeKey, SceneGraph};

/// Resting angle of a raised stick, in degrees.
pub const MAX_ANGLE: f32 = 50.0;

/// Seconds the downswing takes from fully raised to contact.
const STRIKE_WINDOW: f32 = 0.2;

/// Degrees per second a stick recoils upward after a strike.
const RECOIL_SPEED: f32 = 280.0;

/// One scheduled stick contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    /// Seconds since the start of the performance.
    pub time: f64,
    /// Strike velocity.
    pub velocity: u8,
}

/// A strike that landed this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strike {
    /// Velocity of the landed hit.
    pub velocity: u8,
}

/// Swings a stick node through its scheduled hits.
pub struct Stick {
    node: NodeKey,
    hits: Vec<Hit>,
    next: usize,
    angle: f32,
}

impl Stick {
    /// Animate `node` through `hits`, which must be sorted by time.
    pub fn new(node: NodeKey, hits: Vec<Hit>) -> Self {
        Self {
            node,
            hits,
            next: 0,
            angle: MAX_ANGLE,
        }
    }

    /// Current raise angle in degrees; 0 is contact.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Hits not yet landed.
    pub fn hits_remaining(&self) -> usize {
        self.hits.len() - self.next
    }

    /// Advance the animation. Returns the hit that landed this frame,
    /// if any; when several came due at once, the last one.
    pub fn tick(&mut self, time: f64, delta: f32, scene: &mut SceneGraph) -> Option<Strike> {
        let mut struck = None;
        while self.next < self.hits.len() && self.hits[self.next].time <= time {
            struck = Some(Strike {
                velocity: self.hits[self.next].velocity,
            });
            self.next += 1;
        }

        let proposed = match self.hits.get(self.next) {
            Some(hit) => MAX_ANGLE * ((hit.time - time) as f32 / STRIKE_WINDOW),
            None => MAX_ANGLE,
        };
        if proposed >= MAX_ANGLE {
            // Not yet winding down; recoil from the last strike.
            if self.angle < MAX_ANGLE {
                self.angle = (self.angle + RECOIL_SPEED * delta).min(MAX_ANGLE);
            }
        } else {
            self.angle = proposed.clamp(0.0, MAX_ANGLE);
        }

        scene.set_rotation(self.node, Quat::from_rotation_x(self.angle.to_radians()));
        // A fully raised stick is not worth drawing.
        scene.set_cull(self.node, CullHint::from_visible(self.angle < MAX_ANGLE));
        struck
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(time: f64) -> Hit {
        Hit {
            time,
            velocity: 100,
        }
    }

    fn stick_in(scene: &mut SceneGraph, hits: &[Hit]) -> Stick {
        let node = scene.spawn_child(scene.root());
        Stick::new(node, hits.to_vec())
    }

    #[test]
    fn idle_stick_is_raised_and_culled() {
        let mut scene = SceneGraph::new();
        let mut stick = stick_in(&mut scene, &[hit(100.0)]);
        assert_eq!(stick.tick(0.0, 0.016, &mut scene), None);
        assert_eq!(stick.angle(), MAX_ANGLE);
        assert_eq!(scene.cull(stick.node), Some(CullHint::Hidden));
    }

    #[test]
    fn stick_winds_down_toward_the_hit() {
        let mut scene = SceneGraph::new();
        let mut stick = stick_in(&mut scene, &[hit(1.0)]);
        stick.tick(0.9, 0.016, &mut scene);
        let halfway = stick.angle();
        assert!(halfway < MAX_ANGLE);
        assert_eq!(scene.cull(stick.node), Some(CullHint::Shown));

        stick.tick(0.95, 0.016, &mut scene);
        assert!(stick.angle() < halfway);
    }

    #[test]
    fn strike_lands_at_hit_time() {
        let mut scene = SceneGraph::new();
        let mut stick = stick_in(&mut scene, &[hit(1.0)]);
        stick.tick(0.9, 0.016, &mut scene);
        let strike = stick.tick(1.001, 0.016, &mut scene);
        assert_eq!(strike, Some(Strike { velocity: 100 }));
        assert_eq!(stick.hits_remaining(), 0);
    }

    #[test]
    fn overdue_hits_collapse_to_the_last() {
        let mut scene = SceneGraph::new();
        let hits = [
            Hit {
                time: 0.5,
                velocity: 10,
            },
            Hit {
                time: 0.6,
                velocity: 99,
            },
        ];
        let mut stick = stick_in(&mut scene, &hits);
        let strike = stick.tick(1.0, 0.016, &mut scene);
        assert_eq!(strike, Some(Strike { velocity: 99 }));
    }

    #[test]
    fn stick_recoils_and_hides_after_the_strike() {
        let mut scene = SceneGraph::new();
        let mut stick = stick_in(&mut scene, &[hit(1.0)]);
        stick.tick(0.99, 0.016, &mut scene);
        stick.tick(1.0, 0.016, &mut scene);
        assert!(stick.angle() < MAX_ANGLE);

        let mut time = 1.0;
        for _ in 0..20 {
            time += 0.016;
            stick.tick(time, 0.016, &mut scene);
        }
        assert_eq!(stick.angle(), MAX_ANGLE);
        assert_eq!(scene.cull(stick.node), Some(CullHint::Hidden));
    }
}
