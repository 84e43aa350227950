use crate::model::{CellGeometry, ContainerSize, Resolution};

use super::settings::ResolutionSettings;

/// Cell size for `resolution` cells spread over `container`. The division is
/// real-valued so the grid fills the container exactly, fractional pixels included.
pub fn cell_size(container: ContainerSize, resolution: Resolution) -> CellGeometry {
    CellGeometry {
        cell_width: container.width / resolution.columns as f64,
        cell_height: container.height / resolution.rows as f64,
        count: resolution.cell_count(),
        columns: resolution.columns,
        rows: resolution.rows,
    }
}

/// Smallest container that still fits the maximum resolution at the minimum cell size.
pub fn min_container_size(settings: &ResolutionSettings) -> ContainerSize {
    ContainerSize {
        width: settings.width.min_cell_size * settings.width.upper_bound as f64,
        height: settings.height.min_cell_size * settings.height.upper_bound as f64,
    }
}
