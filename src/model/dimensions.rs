/// Interior size of the canvas in layout pixels, border excluded.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub fn new(width: f64, height: f64) -> ContainerSize {
        ContainerSize { width, height }
    }

    /// Interior of an element whose outer size includes a border of `border` on every side.
    pub fn inside_border(outer_width: f64, outer_height: f64, border: f64) -> ContainerSize {
        ContainerSize {
            width: outer_width - 2.0 * border,
            height: outer_height - 2.0 * border,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct CellGeometry {
    pub cell_width: f64,
    pub cell_height: f64,
    pub count: usize,
    pub columns: u32,
    pub rows: u32,
}

impl CellGeometry {
    pub fn total_width(&self) -> f64 {
        self.cell_width * self.columns as f64
    }

    pub fn total_height(&self) -> f64 {
        self.cell_height * self.rows as f64
    }

    /// Flat index of the cell under `(x, y)`, relative to the top-left of the cell area.
    pub fn cell_index_at(&self, x: f64, y: f64) -> Option<usize> {
        if self.count == 0 || !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        if x >= self.total_width() || y >= self.total_height() {
            return None;
        }
        let column = ((x / self.cell_width) as usize).min(self.columns as usize - 1);
        let row = ((y / self.cell_height) as usize).min(self.rows as usize - 1);
        Some(row * self.columns as usize + column)
    }

    pub fn cell_origin(&self, index: usize) -> (f64, f64) {
        let columns = (self.columns as usize).max(1);
        let column = index % columns;
        let row = index / columns;
        (
            column as f64 * self.cell_width,
            row as f64 * self.cell_height,
        )
    }
}
