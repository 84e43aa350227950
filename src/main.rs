use gtk4::prelude::*;
use gtk4::Application;

const APP_ID: &str = "org.sketchpad.Sketchpad";

fn init_logging() {
    env_logger::init();
}

fn main() -> glib::ExitCode {
    init_logging();

    // Register resources before creating the application
    gio::resources_register_include!("compiled.gresource")
        .expect("Failed to register compiled resources");

    let app = Application::builder().application_id(APP_ID).build();

    app.connect_activate(sketchpad::ui::window::build_ui);

    app.run()
}
