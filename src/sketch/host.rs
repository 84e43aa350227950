use crate::model::{CellGeometry, Color, ContainerSize, Resolution};

/// The UI surface the sketch engine drives. The GTK window implements it for
/// real; tests use a recording implementation.
pub trait SketchHost {
    /// Handle to one cell element owned by the host.
    type Cell: Clone;

    /// Interior size of the canvas, border excluded, measured now.
    fn measure_container(&self) -> ContainerSize;

    fn create_cell(&mut self, index: usize, geometry: &CellGeometry) -> Self::Cell;

    /// Swap the canvas children for `cells` in one step.
    fn replace_children(&mut self, cells: &[Self::Cell]);

    fn set_background_color(&mut self, cell: &Self::Cell, color: Color);

    /// Point the pointer-down / pointer-enter delegation at the current cells.
    fn bind_paint_handlers(&mut self, geometry: &CellGeometry);

    /// Text of the (columns, rows) resolution fields.
    fn read_resolution(&self) -> (String, String);

    fn write_resolution(&mut self, resolution: Resolution);

    fn mark_resolution_valid(&mut self, valid: bool);

    fn set_color_picker_enabled(&mut self, enabled: bool);

    fn set_darken_background_enabled(&mut self, enabled: bool);
}
