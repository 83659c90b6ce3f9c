//! End-to-end tests driving a whole stage frame by frame.

use ms_master::{
    ChannelEvent, CullHint, EventPayload, Instrument, InstrumentKind, Settings, Stage, Transition,
};

const FRAME: f32 = 1.0 / 60.0;

fn on(time: f64, channel: u8, note: u8) -> ChannelEvent {
    ChannelEvent::new(
        time,
        channel,
        EventPayload::NoteOn {
            note,
            velocity: 100,
        },
    )
}

fn off(time: f64, channel: u8, note: u8) -> ChannelEvent {
    ChannelEvent::new(time, channel, EventPayload::NoteOff { note })
}

fn program(time: f64, channel: u8, program: u8) -> ChannelEvent {
    ChannelEvent::new(time, channel, EventPayload::ProgramChange { program })
}

/// Two keyboards, a saxophone, and a drum kit.
fn demo_events() -> Vec<ChannelEvent> {
    vec![
        // Channel 0: keyboard sounding 0-2s.
        on(0.0, 0, 60),
        off(2.0, 0, 60),
        // Channel 1: keyboard sounding 0.5-3s.
        on(0.5, 1, 64),
        off(3.0, 1, 64),
        // Channel 2: saxophone sounding 5-6s.
        program(0.0, 2, 65),
        on(5.0, 2, 70),
        off(6.0, 2, 70),
        // Channel 9: three drum hits, the last a crash.
        on(1.0, 9, 38),
        on(1.5, 9, 38),
        on(2.0, 9, 49),
    ]
}

fn stage_at(mut stage: Stage, until: f64) -> Stage {
    while stage.time() < until {
        stage.advance(FRAME);
    }
    stage
}

#[test]
fn lineup_matches_the_schedule() {
    let stage = Stage::from_events(&demo_events(), Settings::default());
    let kinds: Vec<InstrumentKind> = stage.statuses().iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        [
            InstrumentKind::Keyboard,
            InstrumentKind::Keyboard,
            InstrumentKind::Saxophone,
            InstrumentKind::DrumKit,
        ]
    );
    assert!(stage.statuses()[0].label.contains("channel 0"));
    assert!(stage.statuses()[2].label.contains("saxophone"));
}

#[test]
fn cull_state_always_equals_visibility() {
    let mut stage = Stage::from_events(&demo_events(), Settings::default());
    while !stage.is_finished() {
        stage.advance(FRAME);
        for (i, status) in stage.statuses().iter().enumerate() {
            let geometry = stage.registry().get(i).unwrap().core().geometry_node();
            let shown = stage.scene().cull(geometry) == Some(CullHint::Shown);
            assert_eq!(shown, status.visible, "at t={}", stage.time());
        }
    }
}

#[test]
fn visible_keyboards_hold_distinct_consecutive_ranks() {
    let stage = stage_at(
        Stage::from_events(&demo_events(), Settings::default()),
        1.0,
    );
    let statuses = stage.statuses();
    assert!(statuses[0].visible && statuses[1].visible);
    assert_eq!(statuses[0].stack_index, 0.0);
    assert_eq!(statuses[1].stack_index, 1.0);
}

#[test]
fn survivor_takes_rank_zero_after_the_first_leaves() {
    // Channel 0's window (linger included) closes at 4s; channel 1
    // lingers until 5s.
    let stage = stage_at(
        Stage::from_events(&demo_events(), Settings::default()),
        4.5,
    );
    let statuses = stage.statuses();
    assert!(!statuses[0].visible);
    assert!(statuses[1].visible);
    assert_eq!(statuses[1].stack_index, 0.0);
}

#[test]
fn eased_transition_converges_between_ranks() {
    let mut stage = Stage::from_events(
        &demo_events(),
        Settings::with_transition(Transition::Fast),
    );
    stage = stage_at(stage, 1.0);
    let near_one = stage.statuses()[1].stack_index;
    assert!(near_one > 0.5 && near_one <= 1.0, "got {near_one}");

    // After the first keyboard leaves, the survivor eases down to 0.
    stage = stage_at(stage, 6.0);
    let settled = stage.statuses()[1].stack_index;
    assert!(settled < 0.1, "got {settled}");
}

#[test]
fn live_transition_change_takes_effect_immediately() {
    let mut stage = Stage::from_events(
        &demo_events(),
        Settings::with_transition(Transition::Slow),
    );
    stage = stage_at(stage, 1.0);
    let eased = stage.statuses()[1].stack_index;
    assert!(eased < 1.0);

    stage.set_transition(Transition::None);
    stage.advance(FRAME);
    assert_eq!(stage.statuses()[1].stack_index, 1.0);
}

#[test]
fn particles_spawn_during_hits_and_drain_afterwards() {
    let mut stage = Stage::from_events(&demo_events(), Settings::default());
    stage.advance(FRAME);
    let baseline = stage.scene().len();

    // Sparks fly while the drums are being hit.
    stage = stage_at(stage, 1.1);
    assert!(stage.scene().len() > baseline);

    // Well past the last hit and every particle lifetime, the scene is
    // back to its fixed population.
    stage = stage_at(stage, 20.0);
    assert_eq!(stage.scene().len(), baseline);
}

#[test]
fn steam_rises_while_the_saxophone_blows() {
    let mut stage = Stage::from_events(&demo_events(), Settings::default());
    stage = stage_at(stage, 4.9);
    let quiet = stage.scene().len();
    stage = stage_at(stage, 5.5);
    assert!(stage.scene().len() > quiet);
}

#[test]
fn performance_finishes_after_the_outro() {
    let mut stage = Stage::from_events(&demo_events(), Settings::default());
    stage = stage_at(stage, 8.0);
    assert!(!stage.is_finished());
    stage = stage_at(stage, 9.5);
    assert!(stage.is_finished());
}
