use log::trace;

use crate::model::{CellGeometry, Color};

use super::host::SketchHost;

#[derive(Debug, Clone)]
pub struct Cell<C> {
    pub handle: C,
    pub color: Color,
}

/// Flat, row-major sequence of cells. Replaced wholesale on every rebuild.
#[derive(Debug)]
pub struct Grid<C> {
    geometry: CellGeometry,
    cells: Vec<Cell<C>>,
}

impl<C> Default for Grid<C> {
    fn default() -> Self {
        Grid {
            geometry: CellGeometry::default(),
            cells: Vec::new(),
        }
    }
}

impl<C> Grid<C> {
    pub fn geometry(&self) -> &CellGeometry {
        &self.geometry
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, index: usize) -> Option<&Cell<C>> {
        self.cells.get(index)
    }

    pub fn cell_mut(&mut self, index: usize) -> Option<&mut Cell<C>> {
        self.cells.get_mut(index)
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell<C>> {
        self.cells.iter_mut()
    }

    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.cells.iter().map(|cell| cell.color)
    }
}

/// Tear down `grid` and fill it with `geometry.count` fresh background-colored
/// cells. The host receives the new children in a single `replace_children`
/// call and has its paint handlers re-bound to the new geometry.
pub fn rebuild<H: SketchHost>(
    host: &mut H,
    grid: &mut Grid<H::Cell>,
    geometry: CellGeometry,
    background: Color,
) {
    grid.cells.clear();

    let cells: Vec<Cell<H::Cell>> = (0..geometry.count)
        .map(|index| {
            let handle = host.create_cell(index, &geometry);
            host.set_background_color(&handle, background);
            Cell {
                handle,
                color: background,
            }
        })
        .collect();

    let handles: Vec<H::Cell> = cells.iter().map(|cell| cell.handle.clone()).collect();
    host.replace_children(&handles);
    host.bind_paint_handlers(&geometry);

    trace!(
        target: "grid_builder",
        "Rebuilt grid: {} cells of {:.3}×{:.3}px",
        cells.len(),
        geometry.cell_width,
        geometry.cell_height
    );

    grid.geometry = geometry;
    grid.cells = cells;
}
