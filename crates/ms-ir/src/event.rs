//! Channel event types for the stage's event schedule.

use alloc::vec::Vec;

/// Number of MIDI channels.
pub const NUM_CHANNELS: usize = 16;

/// The channel reserved for percussion under GM-1.
pub const PERCUSSION_CHANNEL: u8 = 9;

/// What a channel event does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventPayload {
    /// A note begins sounding. Velocity zero is treated as a note off.
    NoteOn { note: u8, velocity: u8 },
    /// A note stops sounding.
    NoteOff { note: u8 },
    /// The channel switches to a different patch.
    ProgramChange { program: u8 },
}

/// A timestamped event on a single channel.
///
/// Times are seconds since the start of the performance; whatever reads
/// the MIDI file resolves tempo before events reach this layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelEvent {
    /// Seconds since the start of the performance.
    pub time: f64,
    /// MIDI channel (0-15).
    pub channel: u8,
    /// What the event does.
    pub payload: EventPayload,
}

impl ChannelEvent {
    /// Create a new event.
    pub fn new(time: f64, channel: u8, payload: EventPayload) -> Self {
        Self {
            time,
            channel,
            payload,
        }
    }

    /// Whether this event starts a note sounding (note on, velocity > 0).
    pub fn is_note_start(&self) -> bool {
        matches!(self.payload, EventPayload::NoteOn { velocity, .. } if velocity > 0)
    }
}

/// Route a flat event stream into per-channel lists, each sorted by time.
///
/// Events that share a timestamp keep their relative order from the
/// input stream.
pub fn split_channels(events: &[ChannelEvent]) -> [Vec<ChannelEvent>; NUM_CHANNELS] {
    let mut channels: [Vec<ChannelEvent>; NUM_CHANNELS] = core::array::from_fn(|_| Vec::new());
    for event in events {
        if let Some(list) = channels.get_mut(event.channel as usize) {
            list.push(*event);
        }
    }
    for list in &mut channels {
        list.sort_by(|a, b| a.time.total_cmp(&b.time));
    }
    channels
}
