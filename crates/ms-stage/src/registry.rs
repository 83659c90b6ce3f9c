//! The session's ordered instrument collection.

use alloc::boxed::Box;
use alloc::vec::Vec;
use ms_ir::{InstrumentKind, Settings};
use ms_scene::SceneGraph;

use crate::instrument::{Instrument, TickContext};

/// Every instrument of the session, in assignment order.
///
/// Append-only: instruments are added between frames and live until
/// teardown, so ranks computed against this order are deterministic
/// frame to frame.
#[derive(Default)]
pub struct Registry {
    instruments: Vec<Box<dyn Instrument>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            instruments: Vec::new(),
        }
    }

    /// Append an instrument. Must only be called between frames.
    pub fn add(&mut self, instrument: Box<dyn Instrument>) {
        self.instruments.push(instrument);
    }

    /// Number of registered instruments.
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// The instrument at `index`, in registration order.
    pub fn get(&self, index: usize) -> Option<&dyn Instrument> {
        self.instruments.get(index).map(AsRef::as_ref)
    }

    /// Iterate the instruments in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Instrument> {
        self.instruments.iter().map(AsRef::as_ref)
    }

    /// How many instruments of `kind` are registered, visible or not.
    pub fn count_of(&self, kind: InstrumentKind) -> usize {
        self.iter().filter(|i| i.kind() == kind).count()
    }

    /// Whether any instrument of `kind` is currently visible.
    pub fn any_visible(&self, kind: InstrumentKind) -> bool {
        self.iter().any(|i| i.kind() == kind && i.core().visible())
    }

    /// Tick every instrument once, in registration order.
    ///
    /// Each instrument sees its siblings through a split borrow:
    /// instruments earlier in the order have already updated their
    /// visibility this frame, later ones still carry last frame's. That
    /// matches a plain in-order, in-place update pass.
    pub fn tick_all(
        &mut self,
        scene: &mut SceneGraph,
        settings: &Settings,
        time: f64,
        delta: f32,
    ) {
        for i in 0..self.instruments.len() {
            let (before, rest) = self.instruments.split_at_mut(i);
            let Some((instrument, after)) = rest.split_first_mut() else {
                break;
            };
            let mut ctx = TickContext {
                scene: &mut *scene,
                siblings: Siblings { before, after },
                settings,
            };
            instrument.tick(time, delta, &mut ctx);
        }
    }
}

/// Read-only view of every registry member except the one being ticked.
pub struct Siblings<'a> {
    pub(crate) before: &'a [Box<dyn Instrument>],
    pub(crate) after: &'a [Box<dyn Instrument>],
}

impl Siblings<'_> {
    /// The ticked instrument's rank among currently-visible instruments
    /// of `kind`, assuming it is itself visible: the number of visible
    /// same-kind instruments ahead of it in registration order.
    pub fn visible_rank(&self, kind: InstrumentKind) -> usize {
        count_visible(self.before, kind)
    }

    /// Visible instruments of `kind`, not counting the ticked one.
    pub fn visible_count(&self, kind: InstrumentKind) -> usize {
        count_visible(self.before, kind) + count_visible(self.after, kind)
    }

    /// All instruments of `kind` in the registry, the ticked one
    /// included.
    pub fn total_count(&self, kind: InstrumentKind) -> usize {
        count_kind(self.before, kind) + count_kind(self.after, kind) + 1
    }
}

fn count_visible(instruments: &[Box<dyn Instrument>], kind: InstrumentKind) -> usize {
    instruments
        .iter()
        .filter(|i| i.kind() == kind && i.core().visible())
        .count()
}

fn count_kind(instruments: &[Box<dyn Instrument>], kind: InstrumentKind) -> usize {
    instruments.iter().filter(|i| i.kind() == kind).count()
}
