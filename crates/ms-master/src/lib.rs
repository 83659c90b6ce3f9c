//! Headless stage controller for midistage.
//!
//! Provides a unified API for building the instrument lineup from an
//! event schedule and driving it frame by frame, so that a windowed
//! host and the CLI share the same code path.

mod clock;
mod props;
mod stage;

// Re-export common types so callers don't need ms-ir/ms-scene/ms-stage
// directly.
pub use ms_ir::{ChannelEvent, EventPayload, InstrumentKind, Settings, Transition};
pub use ms_scene::{CullHint, NodeKey, SceneGraph};
pub use ms_stage::{Instrument, Registry};

pub use clock::PlaybackClock;
pub use props::StageProp;
pub use stage::{InstrumentStatus, Stage};
