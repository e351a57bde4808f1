//! Fan-out of the smoothed vector to renderer consumers.
//!
//! Two channels fire every frame, in order: typed subscribers receive a
//! [`VisualFrame`] snapshot, then the style sink receives one formatted
//! property per vector field. Subscribers only ever see shared references to
//! a frame built from copies, never the orchestrator's own vectors.

use crate::params::{Param, VisualParameterVector};
use crate::sections::SectionTransition;
use crate::state::TimeOfDay;
use crate::synth::Multipliers;
use crate::timeline::{PhaseChange, ScrollPhase};
use fnv::FnvHashMap;
use serde::Serialize;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreographyContext {
    pub phase: ScrollPhase,
    pub progress: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastContext {
    pub section: String,
    pub scroll_progress: f32,
    pub user_energy: f32,
    pub pointer_activity: f32,
    pub session_time: f32,
    pub time_of_day: TimeOfDay,
    /// Present while a pinned section's timeline is driving the current section.
    pub choreography: Option<ChoreographyContext>,
}

/// Payload delivered to every subscriber once per frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualFrame {
    pub current: VisualParameterVector,
    pub multipliers: Multipliers,
    pub context: BroadcastContext,
}

/// A renderer-side consumer of orchestrator output.
pub trait VisualSubscriber {
    fn on_frame(&mut self, frame: &VisualFrame);

    /// Section lifecycle hook; activate or release section-specific resources.
    fn on_section_transition(&mut self, _transition: &SectionTransition) {}

    fn on_phase_change(&mut self, _change: &PhaseChange) {}
}

impl<F> VisualSubscriber for F
where
    F: FnMut(&VisualFrame),
{
    fn on_frame(&mut self, frame: &VisualFrame) {
        self(frame)
    }
}

/// Declarative key/value channel (CSS custom properties on the web).
pub trait StyleSink {
    fn set_property(&mut self, key: &str, value: &str);
}

/// In-memory property table.
#[derive(Clone, Debug, Default)]
pub struct MemoryStyleSink {
    pub properties: FnvHashMap<String, String>,
}

impl MemoryStyleSink {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

impl StyleSink for MemoryStyleSink {
    fn set_property(&mut self, key: &str, value: &str) {
        self.properties.insert(key.to_owned(), value.to_owned());
    }
}

impl<S: StyleSink> StyleSink for Rc<RefCell<S>> {
    fn set_property(&mut self, key: &str, value: &str) {
        self.borrow_mut().set_property(key, value);
    }
}

/// `(key, formatted value)` for every field: 2 decimals for hue, 4 otherwise.
pub fn style_properties(v: &VisualParameterVector) -> [(&'static str, String); 7] {
    Param::ALL.map(|p| (p.style_key(), format!("{:.*}", p.style_decimals(), v.get(p))))
}

/// Frame data packed for a shader uniform buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShaderUniforms {
    pub intensity: f32,
    pub chaos: f32,
    pub speed: f32,
    pub hue_radians: f32,
    pub rgb_offset: f32,
    pub moire_intensity: f32,
    pub rotation_pulse: f32,
    pub scroll_progress: f32,
    pub user_energy: f32,
    pub pointer_activity: f32,
    pub time_sec: f32,
    pub _pad: f32,
}

impl From<&VisualFrame> for ShaderUniforms {
    fn from(frame: &VisualFrame) -> Self {
        let c = &frame.current;
        Self {
            intensity: c.intensity,
            chaos: c.chaos,
            speed: c.speed,
            hue_radians: c.hue.to_radians(),
            rgb_offset: c.rgb_offset,
            moire_intensity: c.moire_intensity,
            rotation_pulse: c.rotation_pulse,
            scroll_progress: frame.context.scroll_progress,
            user_energy: frame.context.user_energy,
            pointer_activity: frame.context.pointer_activity,
            time_sec: frame.context.session_time,
            _pad: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct Broadcaster {
    subscribers: SmallVec<[(SubscriptionId, Box<dyn VisualSubscriber>); 4]>,
    style: Option<Box<dyn StyleSink>>,
    next_id: u64,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn VisualSubscriber>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, subscriber));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn set_style_sink(&mut self, sink: Box<dyn StyleSink>) {
        self.style = Some(sink);
    }

    pub fn take_style_sink(&mut self) -> Option<Box<dyn StyleSink>> {
        self.style.take()
    }

    pub fn publish(&mut self, frame: &VisualFrame) {
        for (_, sub) in self.subscribers.iter_mut() {
            sub.on_frame(frame);
        }
        if let Some(sink) = self.style.as_mut() {
            for (key, value) in style_properties(&frame.current) {
                sink.set_property(key, &value);
            }
        }
    }

    pub fn publish_transition(&mut self, transition: &SectionTransition) {
        for (_, sub) in self.subscribers.iter_mut() {
            sub.on_section_transition(transition);
        }
    }

    pub fn publish_phase_change(&mut self, change: &PhaseChange) {
        for (_, sub) in self.subscribers.iter_mut() {
            sub.on_phase_change(change);
        }
    }

    pub fn clear(&mut self) {
        self.subscribers.clear();
        self.style = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_values_use_fixed_precision() {
        let v = VisualParameterVector {
            intensity: 0.5,
            hue: 123.456,
            rgb_offset: 0.00512,
            ..Default::default()
        };
        let props = style_properties(&v);
        assert!(props.contains(&("visual-intensity", "0.5000".to_owned())));
        assert!(props.contains(&("visual-hue", "123.46".to_owned())));
        assert!(props.contains(&("visual-rgb-offset", "0.0051".to_owned())));
    }

    #[test]
    fn shader_uniforms_are_tightly_packed() {
        assert_eq!(std::mem::size_of::<ShaderUniforms>(), 48);
        let u = ShaderUniforms::default();
        assert_eq!(bytemuck::bytes_of(&u).len(), 48);
    }
}
