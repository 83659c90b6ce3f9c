//! Steam puff effect for wind instruments.

use alloc::vec::Vec;
use glam::Vec3;
use ms_scene::{NodeKey, SceneGraph};
use rand::Rng;
use rand_pcg::Pcg32;

use crate::particle::{advance_particles, Particle, ParticleGenerator};

/// Puffs spawned per second while the effect is active.
const PUFFS_PER_SECOND: f32 = 40.0;

/// Seconds a single puff lives.
const PUFF_LIFETIME: f32 = 0.7;

/// How far a puff drifts over its lifetime.
const PUFF_TRAVEL: f32 = 6.0;

/// A cloud of steam puffs billowing out of an emitter node.
///
/// While active, puffs stream out at a fixed rate with a deterministic
/// pseudo-random scatter; puffs already in flight keep drifting and
/// expiring after the triggering note ends.
pub struct SteamPuffer {
    emitter: NodeKey,
    puffs: Vec<Puff>,
    rng: Pcg32,
    scale: f32,
    spawn_debt: f32,
}

impl SteamPuffer {
    /// Create a puffer whose emitter node hangs under `parent`.
    ///
    /// The seed fixes the scatter sequence, so a given performance
    /// replays identically.
    pub fn new(scene: &mut SceneGraph, parent: NodeKey, seed: u64, scale: f32) -> Self {
        use rand::SeedableRng;
        Self {
            emitter: scene.spawn_child(parent),
            puffs: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            scale,
            spawn_debt: 0.0,
        }
    }

    /// The emitter node, for positioning by the owner.
    pub fn emitter_node(&self) -> NodeKey {
        self.emitter
    }

    /// Puffs currently alive.
    pub fn live_count(&self) -> usize {
        self.puffs.len()
    }

    fn spawn_puff(&mut self, scene: &mut SceneGraph) {
        let node = scene.spawn_child(self.emitter);
        let direction = Vec3::new(
            self.rng.gen_range(-0.3..0.3),
            1.0,
            self.rng.gen_range(-0.3..0.3),
        )
        .normalize();
        scene.set_scale(node, Vec3::splat(0.75 * self.scale));
        self.puffs.push(Puff {
            node,
            direction,
            scale: self.scale,
            age: 0.0,
        });
    }
}

impl ParticleGenerator for SteamPuffer {
    fn tick(&mut self, delta: f32, active: bool, scene: &mut SceneGraph) {
        if active {
            self.spawn_debt += delta * PUFFS_PER_SECOND;
            while self.spawn_debt >= 1.0 {
                self.spawn_debt -= 1.0;
                self.spawn_puff(scene);
            }
        } else {
            // Spawning never banks across silence.
            self.spawn_debt = 0.0;
        }
        advance_particles(&mut self.puffs, delta, scene);
    }
}

struct Puff {
    node: NodeKey,
    direction: Vec3,
    scale: f32,
    age: f32,
}

impl Particle for Puff {
    fn tick(&mut self, delta: f32, scene: &mut SceneGraph) -> bool {
        self.age += delta;
        if self.age >= PUFF_LIFETIME {
            return false;
        }
        let progress = self.age / PUFF_LIFETIME;
        scene.set_translation(self.node, self.direction * (PUFF_TRAVEL * progress));
        // Puffs billow: they grow as they drift.
        scene.set_scale(
            self.node,
            Vec3::splat(self.scale * (0.75 + 1.25 * progress)),
        );
        true
    }

    fn node(&self) -> NodeKey {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puffer(scene: &mut SceneGraph) -> SteamPuffer {
        let root = scene.root();
        SteamPuffer::new(scene, root, 7, 1.0)
    }

    #[test]
    fn inactive_generator_spawns_nothing() {
        let mut scene = SceneGraph::new();
        let mut puffer = puffer(&mut scene);
        for _ in 0..60 {
            puffer.tick(0.016, false, &mut scene);
        }
        assert_eq!(puffer.live_count(), 0);
    }

    #[test]
    fn active_generator_spawns_at_rate() {
        let mut scene = SceneGraph::new();
        let mut puffer = puffer(&mut scene);
        // Half a lifetime of activity: everything spawned is still alive.
        for _ in 0..20 {
            puffer.tick(0.016, true, &mut scene);
        }
        let expected = (20.0 * 0.016 * PUFFS_PER_SECOND) as usize;
        assert!(puffer.live_count().abs_diff(expected) <= 1);
    }

    #[test]
    fn puffs_drain_after_deactivation() {
        let mut scene = SceneGraph::new();
        let mut puffer = puffer(&mut scene);
        for _ in 0..10 {
            puffer.tick(0.016, true, &mut scene);
        }
        assert!(puffer.live_count() > 0);

        let mut last = puffer.live_count();
        for _ in 0..60 {
            puffer.tick(0.016, false, &mut scene);
            assert!(puffer.live_count() <= last);
            last = puffer.live_count();
        }
        assert_eq!(puffer.live_count(), 0);
        // Only the root and the emitter node remain.
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn scatter_is_deterministic_per_seed() {
        let mut scene_a = SceneGraph::new();
        let root_a = scene_a.root();
        let mut a = SteamPuffer::new(&mut scene_a, root_a, 42, 1.0);
        let mut scene_b = SceneGraph::new();
        let root_b = scene_b.root();
        let mut b = SteamPuffer::new(&mut scene_b, root_b, 42, 1.0);

        for _ in 0..5 {
            a.tick(0.016, true, &mut scene_a);
            b.tick(0.016, true, &mut scene_b);
        }
        let ta: Vec<_> = a.puffs.iter().map(|p| p.direction).collect();
        let tb: Vec<_> = b.puffs.iter().map(|p| p.direction).collect();
        assert_eq!(ta, tb);
    }
}
