use super::{Color, PaintMode, PointerButton};

/// Requests from the UI to the sketch engine.
#[derive(Debug, Clone)]
pub enum SketchCommand {
    Initialize,
    ApplyResolution,
    Clear,
    // cell is None when the press lands on the border
    PointerDown {
        cell: Option<usize>,
        button: PointerButton,
    },
    PointerEnter(usize),
    PointerUp(PointerButton),
    SetPaintColor(Color),
    SetPaintMode(PaintMode),
    SetDarken(bool),
    SetDarkenBackground(bool),
}
