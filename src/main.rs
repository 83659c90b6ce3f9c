//! midistage CLI — runs a built-in demo performance headlessly and
//! prints a per-frame visibility trace.
//!
//! Usage:
//!   midistage [--seconds N] [--fps N] [--transition none|fast|normal|slow]

use ms_master::{ChannelEvent, EventPayload, Settings, Stage, Transition};
use std::env;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seconds: f64 = flag_value(&args, "--seconds").unwrap_or(12.0);
    let fps: f64 = flag_value(&args, "--fps").unwrap_or(60.0);
    let transition = match flag_str(&args, "--transition").as_deref() {
        None | Some("normal") => Transition::Normal,
        Some("none") => Transition::None,
        Some("fast") => Transition::Fast,
        Some("slow") => Transition::Slow,
        Some(other) => {
            eprintln!("Unknown transition mode: {}", other);
            eprintln!("Usage: midistage [--seconds N] [--fps N] [--transition none|fast|normal|slow]");
            std::process::exit(1);
        }
    };
    if fps <= 0.0 || seconds <= 0.0 {
        eprintln!("--seconds and --fps must be positive");
        std::process::exit(1);
    }

    let events = demo_schedule();
    let mut stage = Stage::from_events(&events, Settings::with_transition(transition));

    println!("Events:      {}", events.len());
    println!("Instruments: {}", stage.registry().len());
    for status in stage.statuses() {
        println!("  {}", status.label);
    }
    println!("Transition:  {:?}", transition);
    println!();

    let delta = (1.0 / fps) as f32;
    let trace_interval = 0.5;
    let mut next_trace = 0.0;

    while stage.time() < seconds && !stage.is_finished() {
        stage.advance(delta);
        if stage.time() >= next_trace {
            print_trace(&stage);
            next_trace += trace_interval;
        }
    }

    println!();
    println!("Done at {:.2}s.", stage.time());
}

fn print_trace(stage: &Stage) {
    let mut line = format!("{:6.2}s", stage.time());
    for status in stage.statuses() {
        let marker = if status.visible { '*' } else { ' ' };
        line.push_str(&format!(
            "  | {} [{}] {:5.2}",
            status.kind.label(),
            marker,
            status.stack_index
        ));
    }
    println!("{}", line);
}

fn flag_str(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn flag_value(args: &[String], name: &str) -> Option<f64> {
    let raw = flag_str(args, name)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            eprintln!("Invalid value for {}: {}", name, raw);
            std::process::exit(1);
        }
    }
}

/// A small four-channel arrangement: two keyboards trading phrases, a
/// saxophone entrance, and a drum groove.
fn demo_schedule() -> Vec<ChannelEvent> {
    let mut events = Vec::new();
    let mut push = |time: f64, channel: u8, payload: EventPayload| {
        events.push(ChannelEvent::new(time, channel, payload));
    };

    push(0.0, 2, EventPayload::ProgramChange { program: 65 });

    // Keyboard on channel 0: a phrase every other second.
    for bar in 0..4 {
        let start = bar as f64 * 2.0;
        for (i, note) in [60u8, 64, 67].iter().enumerate() {
            let t = start + i as f64 * 0.25;
            push(
                t,
                0,
                EventPayload::NoteOn {
                    note: *note,
                    velocity: 96,
                },
            );
            push(t + 0.8, 0, EventPayload::NoteOff { note: *note });
        }
    }

    // Second keyboard on channel 1 answers in bars 2-3, then drops out.
    for bar in 1..3 {
        let start = bar as f64 * 2.0 + 1.0;
        push(
            start,
            1,
            EventPayload::NoteOn {
                note: 72,
                velocity: 80,
            },
        );
        push(start + 0.9, 1, EventPayload::NoteOff { note: 72 });
    }

    // Saxophone joins at 6s.
    for (i, note) in [70u8, 69, 67].iter().enumerate() {
        let t = 6.0 + i as f64 * 0.8;
        push(
            t,
            2,
            EventPayload::NoteOn {
                note: *note,
                velocity: 110,
            },
        );
        push(t + 0.7, 2, EventPayload::NoteOff { note: *note });
    }

    // Drum groove: snare on the beat, crash to finish.
    for beat in 0..16 {
        let t = 1.0 + beat as f64 * 0.5;
        push(
            t,
            9,
            EventPayload::NoteOn {
                note: 38,
                velocity: 100,
            },
        );
    }
    push(
        9.0,
        9,
        EventPayload::NoteOn {
            note: 49,
            velocity: 127,
        },
    );

    events
}
