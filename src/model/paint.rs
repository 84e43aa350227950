use gtk4::gdk;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintMode {
    #[default]
    Normal,
    Rainbow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other(u32),
}

impl From<u32> for PointerButton {
    fn from(button: u32) -> Self {
        match button {
            gdk::BUTTON_PRIMARY => PointerButton::Primary,
            gdk::BUTTON_SECONDARY => PointerButton::Secondary,
            other => PointerButton::Other(other),
        }
    }
}

/// What a cell becomes when the pointer reaches it during a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brush {
    Paint,
    Erase,
}
