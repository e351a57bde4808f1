use thiserror::Error;

/// Errors raised while building or loading orchestrator configuration.
///
/// Runtime signal and frame paths never fail; only configuration does.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("profile table has no sections")]
    EmptyProfileTable,
    #[error("section `{0}` is defined more than once")]
    DuplicateSection(String),
    #[error("default section `{0}` is not in the profile table")]
    UnknownDefault(String),
    #[error("section `{section}`: field `{field}` has out-of-range value {value}")]
    InvalidProfile {
        section: String,
        field: &'static str,
        value: f32,
    },
    #[error("failed to parse profile table: {0}")]
    ProfileParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;
