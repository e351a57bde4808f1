// DOM contract shared with the page markup and JS renderers.

// Sections carry their profile id in this attribute
pub const SECTION_ID_ATTR: &str = "data-visual-section";
pub const SECTION_SELECTOR: &str = "[data-visual-section]";
// Sections driven by an external timeline engine opt out of the built-in one
pub const EXTERNAL_TIMELINE_ATTR: &str = "data-visual-timeline";
pub const EXTERNAL_TIMELINE_VALUE: &str = "external";
// Hover targets (cards); id attribute is used as the hover key when present
pub const HOVER_SELECTOR: &str = "[data-visual-hover]";
// Optional inline JSON profile table
pub const CONFIG_ELEMENT_ID: &str = "visual-profiles";

// Class toggled on the active section element
pub const ACTIVE_SECTION_CLASS: &str = "visual-active";

// CustomEvent names dispatched on `window`
pub const FRAME_EVENT: &str = "visual-frame";
pub const SECTION_EVENT: &str = "visual-section";
pub const PHASE_EVENT: &str = "visual-phase";

// CSS custom properties are `--visual-*`
pub const STYLE_PROPERTY_PREFIX: &str = "--";

// IntersectionObserver thresholds; 0.5 must be crossed in both directions.
// Sections taller than the viewport only report while their ratio crosses a
// step, so the steps are fine enough to catch viewport coverage passing 0.5.
pub const OBSERVER_THRESHOLDS: [f64; 21] = [
    0.0, 0.05, 0.1, 0.15, 0.2, 0.25, 0.3, 0.35, 0.4, 0.45, 0.5, 0.55, 0.6, 0.65, 0.7, 0.75, 0.8,
    0.85, 0.9, 0.95, 1.0,
];
