//! Per-frame particle lifecycle.
//!
//! A generator is asked every frame whether its effect is logically
//! active (note sounding, key pressed, ...). Spawning follows from
//! `active`; aging and retiring do not, so a generator keeps animating
//! its fade-out after the triggering note ends.

use alloc::vec::Vec;
use ms_scene::{NodeKey, SceneGraph};

/// One ephemeral visual unit (a puff, a spark).
pub trait Particle {
    /// Advance the particle by `delta` seconds. Returns whether it
    /// should continue to exist; once this returns `false` the particle
    /// is never ticked again.
    fn tick(&mut self, delta: f32, scene: &mut SceneGraph) -> bool;

    /// The particle's scene node, destroyed when it retires.
    fn node(&self) -> NodeKey;
}

/// A per-frame factory and owner of [`Particle`]s.
pub trait ParticleGenerator {
    /// Advance the effect by `delta` seconds. When `active`, the
    /// generator may spawn new particles; either way it advances every
    /// particle it owns and retires the ones that report done, within
    /// this same call.
    fn tick(&mut self, delta: f32, active: bool, scene: &mut SceneGraph);
}

/// Advance every particle once and retire the finished ones.
///
/// A particle returning `false` is removed from the working set and its
/// node destroyed before this function returns; nothing retired leaks
/// into the next frame.
pub fn advance_particles<P: Particle>(
    particles: &mut Vec<P>,
    delta: f32,
    scene: &mut SceneGraph,
) {
    let mut i = 0;
    while i < particles.len() {
        if particles[i].tick(delta, scene) {
            i += 1;
        } else {
            let retired = particles.remove(i);
            scene.remove_subtree(retired.node());
        }
    }
}
