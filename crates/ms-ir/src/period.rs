//! Note periods: paired note-on/note-off spans.
//!
//! Visibility rules reason about "is anything sounding near this time",
//! which is much easier against closed spans than against raw on/off
//! events. Pairing happens once, when an instrument is built.

use alloc::vec::Vec;

use crate::event::{ChannelEvent, EventPayload};

/// A single note's sounding span, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NotePeriod {
    /// MIDI note number.
    pub note: u8,
    /// Strike velocity of the opening note on.
    pub velocity: u8,
    /// When the note begins sounding.
    pub start: f64,
    /// When the note stops sounding.
    pub end: f64,
}

impl NotePeriod {
    /// Whether the note is sounding at `time`.
    pub fn playing(&self, time: f64) -> bool {
        self.start <= time && time < self.end
    }

    /// Whether the note will begin within `window` seconds after `time`.
    pub fn starts_within(&self, time: f64, window: f64) -> bool {
        time < self.start && self.start - time <= window
    }

    /// Whether the note ended within `window` seconds before `time`.
    pub fn ended_within(&self, time: f64, window: f64) -> bool {
        self.end <= time && time - self.end <= window
    }

    /// Length of the span in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Pair note-on and note-off events into periods.
///
/// Events must be sorted by time. Offs close the earliest still-open
/// period with the same note number; a note on with velocity zero counts
/// as an off. Periods still open when the events run out are closed at
/// `end_of_track`.
pub fn note_periods(events: &[ChannelEvent], end_of_track: f64) -> Vec<NotePeriod> {
    let mut open: Vec<NotePeriod> = Vec::new();
    let mut closed: Vec<NotePeriod> = Vec::new();

    for event in events {
        match event.payload {
            EventPayload::NoteOn { note, velocity } if velocity > 0 => {
                open.push(NotePeriod {
                    note,
                    velocity,
                    start: event.time,
                    end: end_of_track,
                });
            }
            EventPayload::NoteOn { note, .. } | EventPayload::NoteOff { note } => {
                if let Some(i) = open.iter().position(|p| p.note == note) {
                    let mut period = open.remove(i);
                    period.end = event.time;
                    closed.push(period);
                }
            }
            EventPayload::ProgramChange { .. } => {}
        }
    }

    closed.extend(open);
    closed.sort_by(|a, b| a.start.total_cmp(&b.start));
    closed
}
