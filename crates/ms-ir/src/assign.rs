//! Assignment of channel event runs to visual instruments.
//!
//! A channel spawns one instrument per program it plays: its events are
//! segmented at program-change boundaries and each segment becomes an
//! [`InstrumentSpec`]. The percussion channel always maps to one drum
//! kit. Assignment order is the registry order for the whole session.

use alloc::vec::Vec;

use crate::event::{split_channels, ChannelEvent, EventPayload, PERCUSSION_CHANNEL};
use crate::kind::InstrumentKind;

/// A program change, stripped to what segmentation needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgramEvent {
    /// Seconds since the start of the performance.
    pub time: f64,
    /// GM-1 program number.
    pub program: u8,
}

/// Everything needed to build one visual instrument.
#[derive(Clone, Debug)]
pub struct InstrumentSpec {
    /// The visual family that renders this segment.
    pub kind: InstrumentKind,
    /// Source MIDI channel.
    pub channel: u8,
    /// Program active during the segment.
    pub program: u8,
    /// The channel's events during the segment, sorted by time.
    pub events: Vec<ChannelEvent>,
}

/// Collapse redundant program changes.
///
/// Changes at the same time keep only the last; consecutive changes to
/// the same program keep only the first. Input must be sorted by time.
pub fn dedupe_programs(mut events: Vec<ProgramEvent>) -> Vec<ProgramEvent> {
    let mut i = 0;
    while i + 1 < events.len() {
        if events[i].time == events[i + 1].time {
            events.remove(i);
        } else if events[i].program == events[i + 1].program {
            events.remove(i + 1);
        } else {
            i += 1;
        }
    }
    events
}

/// Build the session's instrument lineup from a flat event stream.
///
/// Channels without a single sounding note are skipped, as are program
/// segments whose program has no visual implementation. A channel with
/// notes but no program change defaults to program 0.
pub fn assign_instruments(events: &[ChannelEvent]) -> Vec<InstrumentSpec> {
    let channels = split_channels(events);
    let mut specs = Vec::new();

    for (index, channel_events) in channels.iter().enumerate() {
        let channel = index as u8;
        if !channel_events.iter().any(ChannelEvent::is_note_start) {
            continue;
        }

        if channel == PERCUSSION_CHANNEL {
            specs.push(InstrumentSpec {
                kind: InstrumentKind::DrumKit,
                channel,
                program: 0,
                events: channel_events.clone(),
            });
            continue;
        }

        let mut programs: Vec<ProgramEvent> = channel_events
            .iter()
            .filter_map(|e| match e.payload {
                EventPayload::ProgramChange { program } => Some(ProgramEvent {
                    time: e.time,
                    program,
                }),
                _ => None,
            })
            .collect();
        if programs.is_empty() {
            programs.push(ProgramEvent {
                time: 0.0,
                program: 0,
            });
        }
        let programs = dedupe_programs(programs);

        for (i, entry) in programs.iter().enumerate() {
            let Some(kind) = InstrumentKind::from_program(entry.program) else {
                continue;
            };
            let segment_end = programs.get(i + 1).map(|next| next.time);
            let segment: Vec<ChannelEvent> = channel_events
                .iter()
                .filter(|e| {
                    // The first segment also owns events before its
                    // program change.
                    (i == 0 || e.time >= entry.time)
                        && segment_end.map_or(true, |end| e.time < end)
                })
                .copied()
                .collect();
            specs.push(InstrumentSpec {
                kind,
                channel,
                program: entry.program,
                events: segment,
            });
        }
    }

    specs
}
