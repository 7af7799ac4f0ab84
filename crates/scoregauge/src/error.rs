use ringdraw::{ContainerId, SurfaceError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GaugeError {
    #[error("No vector surface provider is installed (required: {required})")]
    MissingDependency { required: &'static str },
    #[error("Container '{id}' not found")]
    MissingContainer { id: ContainerId },
    #[error("No score data supplied")]
    MissingScoreData,
    #[error("Invalid score data: {reason}")]
    InvalidScoreData { reason: String },
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

impl GaugeError {
    pub(crate) fn invalid_score(reason: impl Into<String>) -> Self {
        Self::InvalidScoreData {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
