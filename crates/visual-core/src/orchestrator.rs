//! The orchestrator context object.
//!
//! One [`VisualOrchestrator`] is built per page and handed by reference to
//! every signal source and renderer registration. Within a frame the order is
//! fixed: state decay, target synthesis, smoothing, broadcast. Signal methods
//! run between frames, never inside [`VisualOrchestrator::tick`].

use crate::broadcast::{
    BroadcastContext, Broadcaster, StyleSink, SubscriptionId, VisualFrame, VisualSubscriber,
};
use crate::constants::MAX_FRAME_DT_MS;
use crate::params::VisualParameterVector;
use crate::profile::ProfileTable;
use crate::sections::{SectionMachine, SectionTransition, Visibility};
use crate::smoother::{Smoother, SmoothingRates};
use crate::state::{Clock, InteractionState, StateEstimator};
use crate::synth::{synthesize_target, Multipliers};
use crate::timeline::{Choreographer, PhaseChange};

#[derive(Clone, Debug, Default)]
pub struct OrchestratorConfig {
    pub profiles: ProfileTable,
    pub rates: SmoothingRates,
}

pub struct VisualOrchestrator {
    profiles: ProfileTable,
    estimator: StateEstimator,
    sections: SectionMachine,
    choreographer: Choreographer,
    smoother: Smoother,
    broadcaster: Broadcaster,
    multipliers: Multipliers,
    target: VisualParameterVector,
    current: VisualParameterVector,
}

impl VisualOrchestrator {
    pub fn new(config: OrchestratorConfig, clock: Box<dyn Clock>) -> Self {
        let OrchestratorConfig { profiles, rates } = config;
        let sections = SectionMachine::new(&profiles);
        let estimator = StateEstimator::new(sections.current(), clock);
        let base = profiles.default_profile().base_vector();
        log::info!(
            "[orchestrator] {} sections, starting in `{}`",
            profiles.len(),
            sections.current()
        );
        Self {
            profiles,
            estimator,
            sections,
            choreographer: Choreographer::new(),
            smoother: Smoother::new(rates),
            broadcaster: Broadcaster::new(),
            multipliers: Multipliers::default(),
            target: base,
            current: base,
        }
    }

    // ---------------- Signal sources ----------------

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.estimator.on_pointer_move(x, y);
    }

    pub fn on_scroll(&mut self, offset: f32, max_range: f32) {
        self.estimator.on_scroll(offset, max_range);
    }

    pub fn on_hover_change(&mut self, element_id: &str, entering: bool) {
        self.estimator.on_hover_change(element_id, entering);
    }

    /// Switch the active section. Unknown ids fall back to the default section.
    ///
    /// The target jumps to the new profile's base values at once; the current
    /// vector is left to ease toward it over the following frames.
    pub fn on_section_change(&mut self, section_id: &str) {
        let transition = self.sections.transition(&self.profiles, section_id);
        self.apply_transition(transition);
    }

    /// Visibility report for a section (IntersectionObserver-style).
    pub fn on_section_visibility(&mut self, section_id: &str, visibility: Visibility) {
        let transition = self
            .sections
            .on_visibility(&self.profiles, section_id, visibility);
        self.apply_transition(transition);
    }

    /// Timeline engine progress for a pinned section.
    pub fn on_timeline_progress(&mut self, section_id: &str, progress: f32) {
        if let Some(change) = self
            .choreographer
            .on_progress(&self.profiles, section_id, progress)
        {
            self.publish_phase_change(change);
        }
    }

    pub fn on_timeline_leave(&mut self, section_id: &str) {
        if let Some(change) = self.choreographer.leave(section_id) {
            self.publish_phase_change(change);
        }
    }

    fn apply_transition(&mut self, transition: Option<SectionTransition>) {
        let Some(transition) = transition else {
            return;
        };
        self.estimator.set_section(&transition.to);
        self.target = self.profiles.resolve(&transition.to).base_vector();
        self.broadcaster.publish_transition(&transition);
    }

    fn publish_phase_change(&mut self, change: PhaseChange) {
        log::debug!(
            "[timeline] `{}` {:?} -> {:?}",
            change.section,
            change.from,
            change.to
        );
        self.broadcaster.publish_phase_change(&change);
    }

    // ---------------- Frame ----------------

    /// Run one animation frame of `dt_ms` milliseconds.
    pub fn tick(&mut self, dt_ms: f32) {
        if !(dt_ms.is_finite() && dt_ms > 0.0) {
            log::debug!("[orchestrator] skipped frame with dt {dt_ms}");
            return;
        }
        let dt_ms = dt_ms.min(MAX_FRAME_DT_MS);

        self.estimator.tick(dt_ms);

        let section = self.sections.current();
        let base = match self.choreographer.base_for(section) {
            Some(v) => *v,
            None => self.profiles.resolve(section).base_vector(),
        };
        self.multipliers = Multipliers::from_state(&self.estimator);
        self.target = synthesize_target(&base, &self.estimator, &self.multipliers);

        self.smoother.step(&mut self.current, &self.target, dt_ms);

        let frame = self.frame();
        self.broadcaster.publish(&frame);
    }

    /// Snapshot of what subscribers receive this frame.
    pub fn frame(&self) -> VisualFrame {
        let section = self.sections.current();
        VisualFrame {
            current: self.current,
            multipliers: self.multipliers,
            context: BroadcastContext {
                section: section.to_owned(),
                scroll_progress: self.estimator.scroll_progress(),
                user_energy: self.estimator.user_energy(),
                pointer_activity: self.estimator.pointer_activity(),
                session_time: self.estimator.session_time(),
                time_of_day: self.estimator.time_of_day(),
                choreography: self.choreographer.context_for(section),
            },
        }
    }

    // ---------------- Consumers ----------------

    pub fn subscribe(&mut self, subscriber: Box<dyn VisualSubscriber>) -> SubscriptionId {
        self.broadcaster.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.broadcaster.unsubscribe(id)
    }

    pub fn set_style_sink(&mut self, sink: Box<dyn StyleSink>) {
        self.broadcaster.set_style_sink(sink);
    }

    /// Cancel idle timers, drop consumers and hover state. Signals keep
    /// working afterwards; nothing is broadcast until consumers are re-added.
    pub fn teardown(&mut self) {
        self.estimator.teardown();
        self.choreographer.clear();
        self.broadcaster.clear();
        log::info!("[orchestrator] torn down");
    }

    // ---------------- Accessors ----------------

    pub fn state(&self) -> InteractionState {
        self.estimator.snapshot()
    }

    pub fn current(&self) -> VisualParameterVector {
        self.current
    }

    pub fn target(&self) -> VisualParameterVector {
        self.target
    }

    pub fn multipliers(&self) -> Multipliers {
        self.multipliers
    }

    pub fn current_section(&self) -> &str {
        self.sections.current()
    }

    pub fn profiles(&self) -> &ProfileTable {
        &self.profiles
    }

    pub fn subscriber_count(&self) -> usize {
        self.broadcaster.subscriber_count()
    }
}
