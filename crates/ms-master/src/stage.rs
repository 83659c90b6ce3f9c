//! The stage: every instrument, effect, and prop of one performance.

use glam::Vec3;
use log::{debug, info};
use ms_ir::{
    assign_instruments, note_periods, ChannelEvent, EventPayload, InstrumentKind, InstrumentSpec,
    NotePeriod, Settings, Transition,
};
use ms_scene::{CullHint, NodeKey, SceneGraph};
use ms_stage::family::{DrumKit, Guitar, Keyboard, Saxophone};
use ms_stage::{Instrument, ParticleGenerator, Registry, SparkShower, SteamPuffer};

use crate::clock::PlaybackClock;
use crate::props::StageProp;

/// Seconds the stage keeps running past the last event before reporting
/// the performance finished.
const OUTRO_SECONDS: f64 = 3.0;

/// Seconds a percussion hit keeps its spark shower spraying.
const SPARK_SUSTAIN: f64 = 0.15;

/// Snapshot of one instrument for traces and tests.
#[derive(Clone, Debug)]
pub struct InstrumentStatus {
    /// Short description, e.g. `keyboard (channel 0, program 0)`.
    pub label: String,
    /// The instrument's family.
    pub kind: InstrumentKind,
    /// Whether it is currently shown.
    pub visible: bool,
    /// Its current (possibly fractional) stack slot.
    pub stack_index: f32,
}

/// One particle effect bound to a channel's sounding state.
struct ChannelEffect {
    generator: Box<dyn ParticleGenerator>,
    periods: Vec<NotePeriod>,
}

/// Owns a whole performance: scene graph, instrument registry, particle
/// effects, props, settings, and the clock. The host calls
/// [`Stage::advance`] once per rendered frame.
pub struct Stage {
    scene: SceneGraph,
    registry: Registry,
    labels: Vec<String>,
    effects: Vec<ChannelEffect>,
    props: Vec<StageProp>,
    settings: Settings,
    clock: PlaybackClock,
    end_of_track: f64,
}

impl Stage {
    /// Build the session's lineup from a flat event schedule.
    ///
    /// Instruments are instantiated in assignment order and never added
    /// or removed afterwards; visibility does all the appearing and
    /// disappearing from here on.
    pub fn from_events(events: &[ChannelEvent], settings: Settings) -> Self {
        let end_of_track = events.iter().map(|e| e.time).fold(0.0, f64::max);
        let mut scene = SceneGraph::new();
        let mut registry = Registry::new();
        let mut labels = Vec::new();
        let mut effects = Vec::new();

        let specs = assign_instruments(events);
        info!(
            "stage lineup: {} instruments from {} events",
            specs.len(),
            events.len()
        );

        for spec in &specs {
            let label = format!(
                "{} (channel {}, program {})",
                spec.kind.label(),
                spec.channel,
                spec.program
            );
            debug!("  {label}");

            let seed = u64::from(spec.channel) + 1;
            let instrument: Box<dyn Instrument> = match spec.kind {
                InstrumentKind::Keyboard => {
                    Box::new(Keyboard::new(&mut scene, &spec.events, end_of_track))
                }
                InstrumentKind::Guitar => {
                    Box::new(Guitar::new(&mut scene, &spec.events, end_of_track))
                }
                InstrumentKind::Saxophone => {
                    let sax = Saxophone::new(&mut scene, &spec.events, end_of_track);
                    // Steam rises from the bell while the channel blows.
                    let puffer =
                        SteamPuffer::new(&mut scene, sax.core().geometry_node(), seed, 1.0);
                    effects.push(ChannelEffect {
                        generator: Box::new(puffer),
                        periods: note_periods(&spec.events, end_of_track),
                    });
                    Box::new(sax)
                }
                InstrumentKind::DrumKit => {
                    let kit = DrumKit::new(&mut scene, &spec.events);
                    let shower =
                        SparkShower::new(&mut scene, kit.core().geometry_node(), seed);
                    effects.push(ChannelEffect {
                        generator: Box::new(shower),
                        periods: hit_periods(&spec.events),
                    });
                    Box::new(kit)
                }
            };
            registry.add(instrument);
            labels.push(label);
        }

        let props = build_props(&mut scene, &specs);

        Self {
            scene,
            registry,
            labels,
            effects,
            props,
            settings,
            clock: PlaybackClock::new(),
            end_of_track,
        }
    }

    /// Advance the whole stage by one frame.
    pub fn advance(&mut self, delta: f32) {
        self.clock.advance(delta);
        let time = self.clock.time();

        self.registry
            .tick_all(&mut self.scene, &self.settings, time, delta);

        for effect in &mut self.effects {
            let active = effect.periods.iter().any(|p| p.playing(time));
            effect.generator.tick(delta, active, &mut self.scene);
        }

        for prop in &self.props {
            prop.update(&self.registry, &mut self.scene);
        }
    }

    /// Seconds since the start of the performance.
    pub fn time(&self) -> f64 {
        self.clock.time()
    }

    /// Whether the performance (plus a short outro) has run its course.
    pub fn is_finished(&self) -> bool {
        self.clock.time() > self.end_of_track + OUTRO_SECONDS
    }

    /// The scene graph, for the render collaborator.
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// The instrument registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Live settings.
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Switch the stack transition mode mid-session.
    pub fn set_transition(&mut self, transition: Transition) {
        self.settings.transition = transition;
    }

    /// Per-instrument snapshots, in registry order.
    pub fn statuses(&self) -> Vec<InstrumentStatus> {
        self.registry
            .iter()
            .zip(&self.labels)
            .map(|(instrument, label)| InstrumentStatus {
                label: label.clone(),
                kind: instrument.kind(),
                visible: instrument.core().visible(),
                stack_index: instrument.core().stack_index(),
            })
            .collect()
    }
}

/// Short sounding spans around percussion hits, to key effects off.
fn hit_periods(events: &[ChannelEvent]) -> Vec<NotePeriod> {
    events
        .iter()
        .filter_map(|e| match e.payload {
            EventPayload::NoteOn { note, velocity } if velocity > 0 => Some(NotePeriod {
                note,
                velocity,
                start: e.time,
                end: e.time + SPARK_SUSTAIN,
            }),
            _ => None,
        })
        .collect()
}

/// Fixed fixtures tied to kinds present in the lineup.
fn build_props(scene: &mut SceneGraph, specs: &[InstrumentSpec]) -> Vec<StageProp> {
    let mut props = Vec::new();
    let mut add_prop = |scene: &mut SceneGraph, kind: InstrumentKind, node: NodeKey| {
        scene.set_cull(node, CullHint::Hidden);
        props.push(StageProp::new(node, kind));
    };

    if specs.iter().any(|s| s.kind == InstrumentKind::Keyboard) {
        let stand = scene.spawn_child(scene.root());
        scene.set_translation(stand, Vec3::new(-50.0, 0.0, -6.0));
        add_prop(scene, InstrumentKind::Keyboard, stand);
    }
    if specs.iter().any(|s| s.kind == InstrumentKind::Guitar) {
        let shadow = scene.spawn_child(scene.root());
        scene.set_translation(shadow, Vec3::new(43.4, 0.1, 7.1));
        add_prop(scene, InstrumentKind::Guitar, shadow);
    }
    props
}
