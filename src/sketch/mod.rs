pub mod geometry;
pub mod grid_builder;
pub mod host;
pub mod paint_engine;
pub mod settings;
pub mod sketch_engine;
#[cfg(test)]
mod test_host;
pub mod validator;

pub use grid_builder::{Cell, Grid};
pub use host::SketchHost;
pub use paint_engine::{PaintState, RAINBOW_SEQUENCE};
pub use settings::{ConfigError, ResolutionSetting, ResolutionSettings, SketchConfig};
pub use sketch_engine::SketchEngine;
