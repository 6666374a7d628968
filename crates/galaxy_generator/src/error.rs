use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalaxyError {
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error("could not allocate buffers for {particles} particles")]
    AllocationFailure {
        particles: usize,
        #[source]
        source: TryReserveError,
    },
}

impl GalaxyError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        GalaxyError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, GalaxyError::InvalidParameter { .. })
    }
}
