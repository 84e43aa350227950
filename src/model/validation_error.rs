use thiserror::Error;

use super::{Axis, ContainerSize};

/// Why a requested resolution was refused. None of these are fatal: the user
/// corrects the input and applies again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error(
        "canvas is {:.0}×{:.0}px but needs at least {:.0}×{:.0}px",
        .actual.width, .actual.height, .minimum.width, .minimum.height
    )]
    ContainerTooSmall {
        actual: ContainerSize,
        minimum: ContainerSize,
    },

    #[error("{axis} must be a whole number, got {value}")]
    NotInteger { axis: Axis, value: f64 },

    #[error("{axis} must be between {lower_bound} and {upper_bound}, got {value}")]
    OutOfRange {
        axis: Axis,
        value: f64,
        lower_bound: u32,
        upper_bound: u32,
    },
}

impl ValidationError {
    /// True when the resolution fields themselves are at fault, as opposed to the canvas.
    pub fn is_input_error(&self) -> bool {
        match self {
            ValidationError::ContainerTooSmall { .. } => false,
            ValidationError::NotInteger { .. } | ValidationError::OutOfRange { .. } => true,
        }
    }
}
