mod color;
mod dimensions;
mod paint;
mod resolution;
mod sketch_command;
mod sketch_event;
mod validation_error;

pub use color::{Color, ColorParseError};
pub use dimensions::{CellGeometry, ContainerSize};
pub use paint::{Brush, PaintMode, PointerButton};
pub use resolution::{Axis, RawResolution, Resolution};
pub use sketch_command::SketchCommand;
pub use sketch_event::SketchEvent;
pub use validation_error::ValidationError;
