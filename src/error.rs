//! Error types for generation and ticking

use thiserror::Error;

use crate::body::BodyState;
use crate::Num;

/// Result type for orrery operations
pub type Result<T> = std::result::Result<T, OrreryError>;

/// Errors raised while configuring, generating or ticking a solar system
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrreryError {
    #[error("no bodies configured")]
    NoBodies,

    #[error("body `{name}` has no prefab assigned")]
    MissingPrefab { name: String },

    #[error("inclination of {inclination_deg}° is too steep to place a body")]
    DegenerateInclination { inclination_deg: Num },

    #[error("light source coincides with its anchor, aim direction is undefined")]
    ZeroLengthDirection,

    #[error("body `{name}` has invalid {field}: {value}")]
    InvalidParameter {
        name: String,
        field: &'static str,
        value: Num,
    },

    #[error("invalid scale {field}: {value}")]
    InvalidScale { field: &'static str, value: Num },

    #[error("body is {state:?}, it has to be active to tick")]
    NotActive { state: BodyState },

    #[error("body was already set up")]
    AlreadySetUp,
}

impl OrreryError {
    /// Errors caused by bad author-time data, as opposed to API misuse
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::NotActive { .. } | Self::AlreadySetUp)
    }
}
