//! Section transition state machine.
//!
//! One state per profile id. Transitions come from outside (visibility or an
//! explicit change) and may revisit earlier sections; there is no terminal
//! state. Unknown ids resolve to the table's default section.

use crate::constants::{SECTION_VIEWPORT_COVERAGE, SECTION_VISIBLE_RATIO};
use crate::profile::ProfileTable;
use fnv::FnvHashSet;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionTransition {
    pub from: String,
    pub to: String,
    /// The id that was asked for; differs from `to` when it was unknown.
    pub requested: String,
}

impl SectionTransition {
    pub fn matched(&self) -> bool {
        self.requested == self.to
    }
}

/// One visibility report for a section element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Visibility {
    /// Fraction of the section inside the viewport.
    pub ratio: f32,
    /// Fraction of the viewport covered by the section.
    pub viewport_coverage: f32,
}

impl Visibility {
    /// Build from the visible slice height, the full section height and the
    /// viewport height. Degenerate heights yield zero for that fraction.
    pub fn from_heights(visible: f32, section: f32, viewport: f32) -> Self {
        let frac = |num: f32, den: f32| {
            if num.is_finite() && den.is_finite() && den > 0.0 {
                (num / den).clamp(0.0, 1.0)
            } else {
                0.0
            }
        };
        Self {
            ratio: frac(visible, section),
            viewport_coverage: frac(visible, viewport),
        }
    }

    /// More than half of the section is in view, or the section fills more
    /// than half of the viewport.
    pub fn is_dominant(&self) -> bool {
        let over = |v: f32, threshold: f32| v.is_finite() && v > threshold;
        over(self.ratio, SECTION_VISIBLE_RATIO)
            || over(self.viewport_coverage, SECTION_VIEWPORT_COVERAGE)
    }
}

#[derive(Clone, Debug)]
pub struct SectionMachine {
    current: String,
    warned: FnvHashSet<String>,
}

impl SectionMachine {
    pub fn new(table: &ProfileTable) -> Self {
        Self {
            current: table.default_profile().id.clone(),
            warned: FnvHashSet::default(),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Move to `requested`, or to the default section if it is unknown.
    /// Returns `None` when the resolved section is already active.
    pub fn transition(&mut self, table: &ProfileTable, requested: &str) -> Option<SectionTransition> {
        let to = if table.contains(requested) {
            requested.to_owned()
        } else {
            if self.warned.insert(requested.to_owned()) {
                log::warn!(
                    "[sections] unknown section `{}`; using `{}`",
                    requested,
                    table.default_profile().id
                );
            }
            table.default_profile().id.clone()
        };
        if to == self.current {
            return None;
        }
        let from = std::mem::replace(&mut self.current, to.clone());
        log::info!("[sections] {} -> {}", from, to);
        Some(SectionTransition {
            from,
            to,
            requested: requested.to_owned(),
        })
    }

    /// Visibility report for `id`; transitions once the section dominates
    /// the viewport (see [`Visibility::is_dominant`]).
    pub fn on_visibility(
        &mut self,
        table: &ProfileTable,
        id: &str,
        visibility: Visibility,
    ) -> Option<SectionTransition> {
        if !visibility.is_dominant() || id == self.current {
            return None;
        }
        self.transition(table, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revisits_are_allowed() {
        let table = ProfileTable::default();
        let mut m = SectionMachine::new(&table);
        assert_eq!(m.current(), "hero");
        assert!(m.transition(&table, "research").is_some());
        assert!(m.transition(&table, "hero").is_some());
        assert!(m.transition(&table, "research").is_some());
        assert!(m.transition(&table, "research").is_none());
    }

    #[test]
    fn visibility_needs_more_than_half() {
        let table = ProfileTable::default();
        let mut m = SectionMachine::new(&table);
        let ratio = |r: f32| Visibility {
            ratio: r,
            viewport_coverage: 0.0,
        };
        assert!(m.on_visibility(&table, "capabilities", ratio(0.5)).is_none());
        assert!(m.on_visibility(&table, "capabilities", ratio(f32::NAN)).is_none());
        let t = m.on_visibility(&table, "capabilities", ratio(0.51)).unwrap();
        assert_eq!(t.from, "hero");
        assert_eq!(t.to, "capabilities");
        assert!(t.matched());
    }

    #[test]
    fn tall_section_counts_by_viewport_coverage() {
        let table = ProfileTable::default();
        let mut m = SectionMachine::new(&table);
        // 2000px section fully spanning an 800px viewport: only 40% of it shows
        let v = Visibility::from_heights(800.0, 2000.0, 800.0);
        assert!((v.ratio - 0.4).abs() < 1e-6);
        assert_eq!(v.viewport_coverage, 1.0);
        let t = m.on_visibility(&table, "research", v).unwrap();
        assert_eq!(t.to, "research");

        // a sliver at the viewport edge is not enough
        let edge = Visibility::from_heights(300.0, 2000.0, 800.0);
        assert!(!edge.is_dominant());
        assert!(m.on_visibility(&table, "technology", edge).is_none());
    }

    #[test]
    fn degenerate_heights_are_not_visible() {
        assert_eq!(Visibility::from_heights(100.0, 0.0, 0.0), Visibility::default());
        assert!(!Visibility::from_heights(f32::NAN, 500.0, 800.0).is_dominant());
    }

    #[test]
    fn unknown_id_resolves_to_default() {
        let table = ProfileTable::default();
        let mut m = SectionMachine::new(&table);
        m.transition(&table, "research");
        let t = m.transition(&table, "nonexistent").unwrap();
        assert_eq!(t.to, "hero");
        assert_eq!(t.requested, "nonexistent");
        assert!(!t.matched());
        assert_eq!(m.current(), "hero");
    }
}
