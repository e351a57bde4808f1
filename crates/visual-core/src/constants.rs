//! Orchestrator tuning constants.
//!
//! Per-frame factors are expressed against a 60 Hz reference frame and are
//! rescaled by the actual frame delta, so behavior is frame-rate independent.

// Reference frame length used to rescale per-frame factors (ms)
pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;
// Frames longer than this (backgrounded tab, debugger pause) are clamped (ms)
pub const MAX_FRAME_DT_MS: f32 = 100.0;

// Pointer activity: rises per move, decays per frame, decays harder once idle
pub const ACTIVITY_STEP: f32 = 0.1;
pub const ACTIVITY_DECAY_PER_FRAME: f32 = 0.995;
pub const ACTIVITY_IDLE_DECAY_PER_FRAME: f32 = 0.95;
pub const ACTIVITY_IDLE_AFTER_MS: f32 = 100.0;

// Scroll velocity: pixels of offset delta -> velocity units
pub const SCROLL_VELOCITY_SCALE: f32 = 0.01;
pub const SCROLL_VELOCITY_MAX: f32 = 4.0;
pub const SCROLL_DECAY_PER_FRAME: f32 = 0.95;
pub const SCROLL_IDLE_DECAY_PER_FRAME: f32 = 0.85;
pub const SCROLL_IDLE_AFTER_MS: f32 = 150.0;

// User energy: composite accumulator fed by pointer and scroll events
pub const ENERGY_POINTER_STEP: f32 = 0.02;
pub const ENERGY_SCROLL_STEP: f32 = 0.05;
pub const ENERGY_DECAY_PER_FRAME: f32 = 0.998;
pub const ENERGY_IDLE_DECAY_PER_FRAME: f32 = 0.95;
pub const ENERGY_IDLE_AFTER_MS: f32 = 250.0;
pub const INITIAL_USER_ENERGY: f32 = 0.5;

// Time-of-day bucket is recomputed at most this often (ms of session time)
pub const TIME_OF_DAY_REFRESH_MS: f32 = 60_000.0;

// Multiplier coefficients
pub const POINTER_MULT_BASE: f32 = 0.8;
pub const POINTER_MULT_SPAN: f32 = 0.7;
pub const SCROLL_MULT_BASE: f32 = 0.9;
pub const SCROLL_MULT_SPAN: f32 = 0.4;
pub const HOVER_MULT_BASE: f32 = 1.0;
pub const HOVER_MULT_STEP: f32 = 0.4;
pub const HOVER_MULT_MAX_COUNT: usize = 3; // hovered cards beyond this add nothing
pub const ENERGY_MULT_BASE: f32 = 0.5;
pub const TIME_MULT_MORNING: f32 = 0.8;
pub const TIME_MULT_AFTERNOON: f32 = 1.0;
pub const TIME_MULT_EVENING: f32 = 1.2;
pub const TIME_MULT_NIGHT: f32 = 0.9;

// Target synthesis couplings
pub const RGB_OFFSET_POINTER_GAIN: f32 = 0.005;
pub const MOIRE_SCROLL_GAIN: f32 = 0.3;
pub const HUE_POINTER_SPAN_DEG: f32 = 40.0;

// Smoothing base rates (per ms); hue settles fastest, intensity slowest
pub const RATE_INTENSITY: f32 = 0.002;
pub const RATE_CHAOS: f32 = 0.0025;
pub const RATE_SPEED: f32 = 0.003;
pub const RATE_HUE: f32 = 0.006;
pub const RATE_RGB_OFFSET: f32 = 0.004;
pub const RATE_MOIRE: f32 = 0.003;
pub const RATE_ROTATION_PULSE: f32 = 0.004;

// Documented parameter ranges
pub const INTENSITY_MAX: f32 = 1.0;
pub const CHAOS_MAX: f32 = 1.0;
pub const SPEED_MAX: f32 = 2.0;
pub const RGB_OFFSET_MAX: f32 = 0.02;
pub const MOIRE_MAX: f32 = 1.0;
pub const ROTATION_PULSE_MAX: f32 = 1.0;
pub const HUE_PERIOD_DEG: f32 = 360.0;

// Section visibility thresholds: fraction of the section in the viewport, or
// fraction of the viewport the section covers (sections taller than 2x the
// viewport never reach the first)
pub const SECTION_VISIBLE_RATIO: f32 = 0.5;
pub const SECTION_VIEWPORT_COVERAGE: f32 = 0.5;

// Choreography sub-phase edges and mid-phase rotation pulse
pub const CHOREO_ENTER_END: f32 = 0.3;
pub const CHOREO_EXIT_START: f32 = 0.7;
pub const CHOREO_MID_PULSE: f32 = 0.3;

// Style channel decimal precision
pub const STYLE_UNIT_DECIMALS: usize = 4;
pub const STYLE_ANGLE_DECIMALS: usize = 2;
