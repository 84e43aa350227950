use std::cell::Cell;
use std::rc::Rc;

use crate::model::{CellGeometry, Color, ContainerSize, Resolution};

use super::host::SketchHost;

#[derive(Debug, Clone)]
pub struct RecordedCell {
    pub index: usize,
    pub width: f64,
    pub height: f64,
    pub color: Rc<Cell<Color>>,
}

/// `SketchHost` that keeps everything in plain fields for assertions.
#[derive(Debug)]
pub struct RecordingHost {
    pub container: ContainerSize,
    pub columns_text: String,
    pub rows_text: String,
    pub children: Vec<RecordedCell>,
    pub created: usize,
    pub replace_calls: usize,
    pub bound_geometry: Option<CellGeometry>,
    pub bind_calls: usize,
    pub resolution_valid: Option<bool>,
    pub color_picker_enabled: Option<bool>,
    pub darken_background_enabled: Option<bool>,
}

impl RecordingHost {
    pub fn new(container: ContainerSize) -> Self {
        RecordingHost {
            container,
            columns_text: String::new(),
            rows_text: String::new(),
            children: Vec::new(),
            created: 0,
            replace_calls: 0,
            bound_geometry: None,
            bind_calls: 0,
            resolution_valid: None,
            color_picker_enabled: None,
            darken_background_enabled: None,
        }
    }

    pub fn type_resolution(&mut self, columns: &str, rows: &str) {
        self.columns_text = columns.to_string();
        self.rows_text = rows.to_string();
    }

    pub fn child_colors(&self) -> Vec<Color> {
        self.children.iter().map(|cell| cell.color.get()).collect()
    }
}

impl SketchHost for RecordingHost {
    type Cell = RecordedCell;

    fn measure_container(&self) -> ContainerSize {
        self.container
    }

    fn create_cell(&mut self, index: usize, geometry: &CellGeometry) -> RecordedCell {
        self.created += 1;
        RecordedCell {
            index,
            width: geometry.cell_width,
            height: geometry.cell_height,
            color: Rc::new(Cell::new(Color::default())),
        }
    }

    fn replace_children(&mut self, cells: &[RecordedCell]) {
        self.replace_calls += 1;
        self.children = cells.to_vec();
    }

    fn set_background_color(&mut self, cell: &RecordedCell, color: Color) {
        cell.color.set(color);
    }

    fn bind_paint_handlers(&mut self, geometry: &CellGeometry) {
        self.bind_calls += 1;
        self.bound_geometry = Some(*geometry);
    }

    fn read_resolution(&self) -> (String, String) {
        (self.columns_text.clone(), self.rows_text.clone())
    }

    fn write_resolution(&mut self, resolution: Resolution) {
        self.columns_text = resolution.columns.to_string();
        self.rows_text = resolution.rows.to_string();
    }

    fn mark_resolution_valid(&mut self, valid: bool) {
        self.resolution_valid = Some(valid);
    }

    fn set_color_picker_enabled(&mut self, enabled: bool) {
        self.color_picker_enabled = Some(enabled);
    }

    fn set_darken_background_enabled(&mut self, enabled: bool) {
        self.darken_background_enabled = Some(enabled);
    }
}
