//! Errors raised while building the hierarchy or wiring it to a scene.

use crate::BodyPath;

/// Configuration and wiring errors.
///
/// All of these surface before the first frame. Per-frame operations are
/// infallible.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SimError {
    /// A body has no transform node in the scene.
    #[error("no scene node for body '{path}'")]
    MissingNode { path: BodyPath },

    /// A body's parameters are out of range.
    #[error("invalid body '{path}': {reason}")]
    InvalidBody { path: BodyPath, reason: String },

    /// Two siblings share a name, or a planet shares the star's name.
    #[error("duplicate body name '{path}'")]
    DuplicateName { path: BodyPath },

    /// A system-wide setting is out of range.
    #[error("invalid setting '{setting}': {reason}")]
    InvalidSetting {
        setting: &'static str,
        reason: String,
    },
}
