// Host-side tests for the DOM contract constants and their relationship to
// the orchestrator's tuning constants.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use visual_core::constants as tuning;

#[test]
fn observer_thresholds_cross_the_visibility_ratio() {
    let ratio = tuning::SECTION_VISIBLE_RATIO as f64;
    assert!(OBSERVER_THRESHOLDS.iter().any(|t| *t > ratio));
    assert!(OBSERVER_THRESHOLDS.iter().any(|t| *t <= ratio));
    assert!(OBSERVER_THRESHOLDS.windows(2).all(|w| w[0] < w[1]));
    assert!(OBSERVER_THRESHOLDS
        .iter()
        .all(|t| (0.0..=1.0).contains(t)));
}

#[test]
fn section_selector_matches_id_attribute() {
    assert_eq!(SECTION_SELECTOR, format!("[{SECTION_ID_ATTR}]"));
    assert!(HOVER_SELECTOR.starts_with("[data-"));
}

#[test]
fn event_names_are_distinct() {
    assert_ne!(FRAME_EVENT, SECTION_EVENT);
    assert_ne!(FRAME_EVENT, PHASE_EVENT);
    assert_ne!(SECTION_EVENT, PHASE_EVENT);
}

#[test]
fn style_keys_become_custom_properties() {
    for p in visual_core::Param::ALL {
        let name = format!("{STYLE_PROPERTY_PREFIX}{}", p.style_key());
        assert!(name.starts_with("--visual-"), "{name}");
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn core_tuning_constants_are_coherent() {
    // decay factors shrink, idle decay is faster than active decay
    for (active, idle) in [
        (tuning::ACTIVITY_DECAY_PER_FRAME, tuning::ACTIVITY_IDLE_DECAY_PER_FRAME),
        (tuning::SCROLL_DECAY_PER_FRAME, tuning::SCROLL_IDLE_DECAY_PER_FRAME),
        (tuning::ENERGY_DECAY_PER_FRAME, tuning::ENERGY_IDLE_DECAY_PER_FRAME),
    ] {
        assert!(active > 0.0 && active < 1.0);
        assert!(idle > 0.0 && idle < active);
    }
    assert!(tuning::ENERGY_POINTER_STEP < tuning::ACTIVITY_STEP);
    assert!(tuning::CHOREO_ENTER_END < tuning::CHOREO_EXIT_START);
    assert!(tuning::RATE_HUE > tuning::RATE_INTENSITY);
}
