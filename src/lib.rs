mod destroyable;
pub mod events;
pub mod model;
pub mod sketch;
pub mod ui;
