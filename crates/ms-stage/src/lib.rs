//! Frame-driven stage core for the midistage visualizer.
//!
//! Every rendered frame, the host advances a clock and ticks every
//! instrument and particle generator once. Instruments recompute their
//! visibility from the current time, then ease toward their slot in the
//! stack of currently-visible instruments of the same kind. Particle
//! generators spawn, age, and retire their particles in the same pass.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod family;
mod instrument;
mod particle;
mod registry;
mod sparks;
mod steam;
mod stick;

pub use instrument::{Instrument, InstrumentCore, TickContext, TRANSITION_SPEED};
pub use particle::{advance_particles, Particle, ParticleGenerator};
pub use registry::{Registry, Siblings};
pub use sparks::SparkShower;
pub use steam::SteamPuffer;
pub use stick::{Hit, Stick, Strike, MAX_ANGLE};
