// Base unit sizes
pub const SPACING_SMALL: i32 = 4;
pub const SPACING_MEDIUM: i32 = 6;
pub const SPACING_LARGE: i32 = 12;

pub const ENTRY_WIDTH_CHARS: i32 = 4;

// Window size around a canvas of the given content size
pub fn calc_window_size(canvas_width: i32, canvas_height: i32) -> (i32, i32) {
    const CONTROL_PANEL_WIDTH: i32 = 260;
    const STATUS_HEIGHT: i32 = 40;
    (
        canvas_width + CONTROL_PANEL_WIDTH + SPACING_LARGE * 4,
        canvas_height + STATUS_HEIGHT + SPACING_LARGE * 4,
    )
}
