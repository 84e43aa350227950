use super::{CellGeometry, Resolution, ValidationError};

/// Outcomes the sketch engine reports back to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum SketchEvent {
    ResolutionApplied {
        resolution: Resolution,
        geometry: CellGeometry,
    },
    ResolutionRejected(ValidationError),
    Cleared,
}
