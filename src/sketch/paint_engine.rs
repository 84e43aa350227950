use log::trace;

use crate::model::{Brush, Color, PaintMode, PointerButton};

pub const RAINBOW_SEQUENCE: [Color; 6] = [
    Color::RED,
    Color::ORANGE,
    Color::YELLOW,
    Color::LIGHT_BLUE,
    Color::INDIGO,
    Color::VIOLET,
];

pub const DARKEN_PERCENT: f64 = 10.0;

/// Brush state for the widget: which color the next painted cell gets, and
/// which mouse gestures are in progress.
#[derive(Debug, Clone)]
pub struct PaintState {
    pub mode: PaintMode,
    pub active_color: Color,
    pub rainbow_index: usize,
    pub darken_enabled: bool,
    pub darken_background_too: bool,
    pub is_painting_down: bool,
    pub is_erasing_down: bool,
    background: Color,
    reset_rainbow_on_mode_change: bool,
}

impl PaintState {
    pub fn new(active_color: Color, background: Color, reset_rainbow_on_mode_change: bool) -> Self {
        PaintState {
            mode: PaintMode::Normal,
            active_color,
            rainbow_index: 0,
            darken_enabled: false,
            darken_background_too: false,
            is_painting_down: false,
            is_erasing_down: false,
            background,
            reset_rainbow_on_mode_change,
        }
    }

    /// Color for a cell being painted that currently shows `current`.
    /// Advances the rainbow once per call in rainbow mode.
    pub fn resolve_color(&mut self, current: Color) -> Color {
        let candidate = match self.mode {
            PaintMode::Normal => self.active_color,
            PaintMode::Rainbow => self.next_rainbow_color(),
        };
        if self.darken_enabled && (self.darken_background_too || current != self.background) {
            current.darken(DARKEN_PERCENT)
        } else {
            candidate
        }
    }

    fn next_rainbow_color(&mut self) -> Color {
        let color = RAINBOW_SEQUENCE[self.rainbow_index];
        self.rainbow_index = (self.rainbow_index + 1) % RAINBOW_SEQUENCE.len();
        color
    }

    pub fn set_mode(&mut self, mode: PaintMode) {
        if mode != self.mode && self.reset_rainbow_on_mode_change {
            self.rainbow_index = 0;
        }
        self.mode = mode;
    }

    /// The brush applied to cells the pointer reaches in the current gesture.
    /// Painting wins when both buttons are held.
    pub fn brush(&self) -> Option<Brush> {
        if self.is_painting_down {
            Some(Brush::Paint)
        } else if self.is_erasing_down {
            Some(Brush::Erase)
        } else {
            None
        }
    }

    /// Starts the gesture for `button` and returns the brush for the pressed cell.
    pub fn pointer_down(&mut self, button: PointerButton) -> Option<Brush> {
        match button {
            PointerButton::Primary => self.is_painting_down = true,
            PointerButton::Secondary => self.is_erasing_down = true,
            PointerButton::Other(other) => {
                trace!(target: "paint_engine", "Button {} does not start a gesture", other);
            }
        }
        self.brush()
    }

    pub fn pointer_up(&mut self, button: PointerButton) {
        match button {
            PointerButton::Primary => self.is_painting_down = false,
            PointerButton::Secondary => self.is_erasing_down = false,
            PointerButton::Other(_) => (),
        }
    }

    /// Final color for a cell showing `current` under `brush`.
    pub fn apply(&mut self, brush: Brush, current: Color) -> Color {
        match brush {
            Brush::Paint => self.resolve_color(current),
            Brush::Erase => self.background,
        }
    }
}
