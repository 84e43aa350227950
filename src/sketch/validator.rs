use crate::model::{Axis, ContainerSize, RawResolution, Resolution, ValidationError};

use super::geometry::min_container_size;
use super::settings::{ResolutionSetting, ResolutionSettings};

/// Checks, in order: the container can host the maximum resolution, both axes
/// are whole numbers, both axes are within bounds. Out-of-range values are
/// rejected, never clamped.
pub fn validate(
    container: ContainerSize,
    requested: RawResolution,
    settings: &ResolutionSettings,
) -> Result<Resolution, ValidationError> {
    let minimum = min_container_size(settings);
    // written negated so a NaN measurement fails too
    if !(container.width >= minimum.width && container.height >= minimum.height) {
        return Err(ValidationError::ContainerTooSmall {
            actual: container,
            minimum,
        });
    }

    whole_number(Axis::Width, requested.columns)?;
    whole_number(Axis::Height, requested.rows)?;

    let columns = in_range(&settings.width, requested.columns)?;
    let rows = in_range(&settings.height, requested.rows)?;
    Ok(Resolution::new(columns, rows))
}

fn whole_number(axis: Axis, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value.fract() == 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotInteger { axis, value })
    }
}

fn in_range(setting: &ResolutionSetting, value: f64) -> Result<u32, ValidationError> {
    if setting.contains(value) {
        Ok(value as u32)
    } else {
        Err(ValidationError::OutOfRange {
            axis: setting.axis,
            value,
            lower_bound: setting.lower_bound,
            upper_bound: setting.upper_bound,
        })
    }
}
