//! Scroll- and pointer-driven visual orchestration.
//!
//! Interaction signals feed a decaying state estimate; every frame that state
//! modulates the active section's profile into a target vector, the current
//! vector eases toward it, and the result is broadcast to renderers.

pub mod broadcast;
pub mod constants;
pub mod error;
pub mod orchestrator;
pub mod params;
pub mod profile;
pub mod sections;
pub mod signal;
pub mod smoother;
pub mod state;
pub mod synth;
pub mod timeline;

pub use broadcast::*;
pub use error::{OrchestratorError, Result};
pub use orchestrator::*;
pub use params::*;
pub use profile::*;
pub use sections::*;
pub use signal::*;
pub use smoother::*;
pub use state::*;
pub use synth::*;
pub use timeline::*;
