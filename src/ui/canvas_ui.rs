use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtk4::{cairo, prelude::*, DrawingArea, GestureDrag};
use log::{trace, warn};

use crate::events::EventEmitter;
use crate::model::{CellGeometry, Color, ContainerSize, PointerButton, SketchCommand};
use crate::sketch::SketchConfig;

/// One painted rectangle on the canvas. Clones share the same color slot.
#[derive(Debug, Clone)]
pub struct CanvasCell {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: Rc<Cell<Color>>,
}

impl CanvasCell {
    pub fn set_color(&self, color: Color) {
        self.color.set(color);
    }
}

#[derive(Debug, Default)]
struct CanvasModel {
    cells: Vec<CanvasCell>,
    hit_geometry: Option<CellGeometry>,
}

impl CanvasModel {
    fn cell_at(&self, x: f64, y: f64) -> Option<usize> {
        self.hit_geometry
            .as_ref()
            .and_then(|geometry| geometry.cell_index_at(x, y))
    }
}

/// Drawing area that renders the cells and turns drags into pointer commands.
pub struct CanvasUI {
    pub area: DrawingArea,
    model: Rc<RefCell<CanvasModel>>,
    border_width: i32,
    background: Color,
    _drag: GestureDrag,
}

impl CanvasUI {
    pub fn new(command_emitter: EventEmitter<SketchCommand>, config: &SketchConfig) -> Rc<Self> {
        let (outer_width, outer_height) = config.outer_canvas_size();
        let area = DrawingArea::builder()
            .name("sketch-canvas")
            .content_width(outer_width)
            .content_height(outer_height)
            .hexpand(false)
            .vexpand(false)
            .halign(gtk4::Align::Center)
            .valign(gtk4::Align::Center)
            .build();

        let model = Rc::new(RefCell::new(CanvasModel::default()));
        let border_width = config.border_width;

        Self::bind_draw_func(&area, model.clone(), border_width, config.background_color);
        let drag = Self::bind_drag_gesture(&area, model.clone(), command_emitter, border_width);

        Rc::new(Self {
            area,
            model,
            border_width,
            background: config.background_color,
            _drag: drag,
        })
    }

    fn bind_draw_func(
        area: &DrawingArea,
        model: Rc<RefCell<CanvasModel>>,
        border_width: i32,
        background: Color,
    ) {
        let border = border_width as f64;
        area.set_draw_func(move |_area, cr, width, height| {
            cr.set_antialias(cairo::Antialias::None);

            // border, then the empty canvas
            cr.set_source_rgb(0.0, 0.0, 0.0);
            cr.paint().ok();
            let (r, g, b) = background.to_unit_rgb();
            cr.set_source_rgb(r, g, b);
            cr.rectangle(
                border,
                border,
                width as f64 - 2.0 * border,
                height as f64 - 2.0 * border,
            );
            cr.fill().ok();

            for cell in model.borrow().cells.iter() {
                let (r, g, b) = cell.color.get().to_unit_rgb();
                cr.set_source_rgb(r, g, b);
                cr.rectangle(border + cell.x, border + cell.y, cell.width, cell.height);
                if let Err(err) = cr.fill() {
                    warn!(target: "canvas", "Failed to fill cell: {}", err);
                    return;
                }
            }
        });
    }

    fn bind_drag_gesture(
        area: &DrawingArea,
        model: Rc<RefCell<CanvasModel>>,
        command_emitter: EventEmitter<SketchCommand>,
        border_width: i32,
    ) -> GestureDrag {
        let drag = GestureDrag::new();
        // all buttons: primary paints, secondary erases
        drag.set_button(0);

        let border = border_width as f64;
        let last_cell = Rc::new(Cell::new(None::<usize>));

        {
            let model = model.clone();
            let last_cell = last_cell.clone();
            let command_emitter = command_emitter.clone();
            drag.connect_drag_begin(move |gesture, x, y| {
                let button = PointerButton::from(gesture.current_button());
                let cell = model.borrow().cell_at(x - border, y - border);
                last_cell.set(cell);
                trace!(target: "canvas", "Drag begin {:?} at {:?}", button, cell);
                command_emitter.emit(SketchCommand::PointerDown { cell, button });
            });
        }

        {
            let model = model.clone();
            let last_cell = last_cell.clone();
            let command_emitter = command_emitter.clone();
            drag.connect_drag_update(move |gesture, offset_x, offset_y| {
                let Some((start_x, start_y)) = gesture.start_point() else {
                    return;
                };
                let cell = model
                    .borrow()
                    .cell_at(start_x + offset_x - border, start_y + offset_y - border);
                if cell == last_cell.get() {
                    return;
                }
                last_cell.set(cell);
                if let Some(cell) = cell {
                    command_emitter.emit(SketchCommand::PointerEnter(cell));
                }
            });
        }

        drag.connect_drag_end(move |gesture, _offset_x, _offset_y| {
            last_cell.set(None);
            let button = PointerButton::from(gesture.current_button());
            command_emitter.emit(SketchCommand::PointerUp(button));
        });

        area.add_controller(drag.clone());
        drag
    }

    pub fn measure(&self) -> ContainerSize {
        let (width, height) = if self.area.width() > 0 && self.area.height() > 0 {
            (self.area.width(), self.area.height())
        } else {
            // not allocated yet; fall back to the requested size
            (self.area.content_width(), self.area.content_height())
        };
        ContainerSize::inside_border(width as f64, height as f64, self.border_width as f64)
    }

    pub fn create_cell(&self, index: usize, geometry: &CellGeometry) -> CanvasCell {
        let (x, y) = geometry.cell_origin(index);
        CanvasCell {
            x,
            y,
            width: geometry.cell_width,
            height: geometry.cell_height,
            color: Rc::new(Cell::new(self.background)),
        }
    }

    pub fn replace_cells(&self, cells: &[CanvasCell]) {
        self.model.borrow_mut().cells = cells.to_vec();
        self.area.queue_draw();
    }

    pub fn set_hit_geometry(&self, geometry: &CellGeometry) {
        self.model.borrow_mut().hit_geometry = Some(*geometry);
    }

    pub fn queue_draw(&self) {
        self.area.queue_draw();
    }
}
