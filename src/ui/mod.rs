pub mod canvas_ui;
pub mod controls_ui;
pub mod gtk_host;
pub mod layout;
pub mod status_ui;
pub mod window;

pub use gtk_host::GtkSketchHost;
