//! Spark shower effect for struck instruments.

use alloc::vec::Vec;
use glam::Vec3;
use ms_scene::{NodeKey, SceneGraph};
use rand::Rng;
use rand_pcg::Pcg32;

use crate::particle::{advance_particles, Particle, ParticleGenerator};

/// Sparks spawned per second while the effect is active.
const SPARKS_PER_SECOND: f32 = 120.0;

/// Downward acceleration applied to every spark.
const GRAVITY: f32 = 30.0;

/// Sparks die when they fall this far below the emitter.
const FLOOR: f32 = -2.0;

/// A shower of sparks thrown upward and outward from an emitter node,
/// falling under gravity until they hit the floor plane.
pub struct SparkShower {
    emitter: NodeKey,
    sparks: Vec<Spark>,
    rng: Pcg32,
    spawn_debt: f32,
}

impl SparkShower {
    /// Create a shower whose emitter node hangs under `parent`.
    pub fn new(scene: &mut SceneGraph, parent: NodeKey, seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            emitter: scene.spawn_child(parent),
            sparks: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            spawn_debt: 0.0,
        }
    }

    /// The emitter node, for positioning by the owner.
    pub fn emitter_node(&self) -> NodeKey {
        self.emitter
    }

    /// Sparks currently alive.
    pub fn live_count(&self) -> usize {
        self.sparks.len()
    }

    fn spawn_spark(&mut self, scene: &mut SceneGraph) {
        let node = scene.spawn_child(self.emitter);
        let velocity = Vec3::new(
            self.rng.gen_range(-4.0..4.0),
            self.rng.gen_range(6.0..12.0),
            self.rng.gen_range(-4.0..4.0),
        );
        self.sparks.push(Spark {
            node,
            position: Vec3::ZERO,
            velocity,
        });
    }
}

impl ParticleGenerator for SparkShower {
    fn tick(&mut self, delta: f32, active: bool, scene: &mut SceneGraph) {
        if active {
            self.spawn_debt += delta * SPARKS_PER_SECOND;
            while self.spawn_debt >= 1.0 {
                self.spawn_debt -= 1.0;
                self.spawn_spark(scene);
            }
        } else {
            self.spawn_debt = 0.0;
        }
        advance_particles(&mut self.sparks, delta, scene);
    }
}

struct Spark {
    node: NodeKey,
    position: Vec3,
    velocity: Vec3,
}

impl Particle for Spark {
    fn tick(&mut self, delta: f32, scene: &mut SceneGraph) -> bool {
        self.velocity.y -= GRAVITY * delta;
        self.position += self.velocity * delta;
        scene.set_translation(self.node, self.position);
        self.position.y > FLOOR
    }

    fn node(&self) -> NodeKey {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparks_fall_and_die_on_the_floor() {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        let mut shower = SparkShower::new(&mut scene, root, 3);

        for _ in 0..5 {
            shower.tick(0.016, true, &mut scene);
        }
        assert!(shower.live_count() > 0);

        // Ballistics guarantee every spark eventually crosses the floor.
        for _ in 0..600 {
            shower.tick(0.016, false, &mut scene);
        }
        assert_eq!(shower.live_count(), 0);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn inactive_shower_stays_empty() {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        let mut shower = SparkShower::new(&mut scene, root, 3);
        for _ in 0..30 {
            shower.tick(0.016, false, &mut scene);
        }
        assert_eq!(shower.live_count(), 0);
    }
}
