//! Core IR types for the midistage visualizer.
//!
//! This crate defines the intermediate representation the stage consumes:
//! timestamped channel events as produced by a MIDI reader, note periods
//! paired from them, and the assignment of event runs to visual
//! instrument kinds. The stage core and controller consume IR; whatever
//! reads MIDI files emits it.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod assign;
mod event;
mod kind;
mod period;
mod settings;

pub use assign::{assign_instruments, dedupe_programs, InstrumentSpec, ProgramEvent};
pub use event::{split_channels, ChannelEvent, EventPayload, NUM_CHANNELS, PERCUSSION_CHANNEL};
pub use kind::InstrumentKind;
pub use period::{note_periods, NotePeriod};
pub use settings::{Settings, Transition};
