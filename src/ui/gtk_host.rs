use std::rc::Rc;

use gtk4::prelude::*;

use super::canvas_ui::{CanvasCell, CanvasUI};
use super::controls_ui::ControlsUI;
use crate::model::{CellGeometry, Color, ContainerSize, Resolution};
use crate::sketch::SketchHost;

/// Binds the sketch engine to the GTK canvas and control panel.
pub struct GtkSketchHost {
    canvas: Rc<CanvasUI>,
    controls: Rc<ControlsUI>,
}

impl GtkSketchHost {
    pub fn new(canvas: Rc<CanvasUI>, controls: Rc<ControlsUI>) -> Self {
        Self { canvas, controls }
    }
}

impl SketchHost for GtkSketchHost {
    type Cell = CanvasCell;

    fn measure_container(&self) -> ContainerSize {
        self.canvas.measure()
    }

    fn create_cell(&mut self, index: usize, geometry: &CellGeometry) -> CanvasCell {
        self.canvas.create_cell(index, geometry)
    }

    fn replace_children(&mut self, cells: &[CanvasCell]) {
        self.canvas.replace_cells(cells);
    }

    fn set_background_color(&mut self, cell: &CanvasCell, color: Color) {
        cell.set_color(color);
        self.canvas.queue_draw();
    }

    fn bind_paint_handlers(&mut self, geometry: &CellGeometry) {
        self.canvas.set_hit_geometry(geometry);
    }

    fn read_resolution(&self) -> (String, String) {
        self.controls.resolution_text()
    }

    fn write_resolution(&mut self, resolution: Resolution) {
        self.controls.write_resolution(resolution);
    }

    fn mark_resolution_valid(&mut self, valid: bool) {
        self.controls.mark_resolution_valid(valid);
    }

    fn set_color_picker_enabled(&mut self, enabled: bool) {
        self.controls.color_button.set_sensitive(enabled);
    }

    fn set_darken_background_enabled(&mut self, enabled: bool) {
        self.controls.darken_background_check.set_sensitive(enabled);
    }
}
