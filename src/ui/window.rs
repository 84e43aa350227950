use std::cell::RefCell;
use std::rc::Rc;

use gio::SimpleAction;
use gtk4::gdk::Display;
use gtk4::{
    prelude::*, AboutDialog, Application, ApplicationWindow, CssProvider, Frame, HeaderBar,
    License, Orientation, STYLE_PROVIDER_PRIORITY_APPLICATION,
};

use super::canvas_ui::CanvasUI;
use super::controls_ui::ControlsUI;
use super::gtk_host::GtkSketchHost;
use super::layout::{calc_window_size, SPACING_LARGE};
use super::status_ui::StatusUI;
use crate::destroyable::Destroyable;
use crate::events::{Channel, EventEmitter};
use crate::model::{SketchCommand, SketchEvent};
use crate::sketch::{SketchConfig, SketchEngine};

const APP_VERSION: &str = env!("APP_VERSION");

fn add_command_action(
    window: &ApplicationWindow,
    name: &str,
    command_emitter: &EventEmitter<SketchCommand>,
    command: SketchCommand,
) {
    let action = SimpleAction::new(name, None);
    let command_emitter = command_emitter.clone();
    action.connect_activate(move |_, _| {
        command_emitter.emit(command.clone());
    });
    window.add_action(&action);
}

fn load_css() {
    let provider = CssProvider::new();
    provider.load_from_resource("/org/sketchpad/style.css");

    match Display::default() {
        Some(display) => gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            STYLE_PROVIDER_PRIORITY_APPLICATION,
        ),
        None => log::warn!(target: "window", "No display; skipping stylesheet"),
    }
}

pub fn build_ui(app: &Application) {
    let (command_emitter, command_observer) = Channel::<SketchCommand>::new();
    let (sketch_event_emitter, sketch_event_observer) = Channel::<SketchEvent>::new();

    let config = SketchConfig::load();
    log::info!(
        target: "window",
        "Canvas {}×{}px, resolution bounds {}..={} × {}..={}",
        config.canvas_width,
        config.canvas_height,
        config.resolution.width.lower_bound,
        config.resolution.width.upper_bound,
        config.resolution.height.lower_bound,
        config.resolution.height.upper_bound
    );

    let (outer_width, outer_height) = config.outer_canvas_size();
    let (default_width, default_height) = calc_window_size(outer_width, outer_height);
    let window = ApplicationWindow::builder()
        .application(app)
        .title("Sketchpad")
        .resizable(true)
        .default_width(default_width)
        .default_height(default_height)
        .build();

    load_css();

    let controls = ControlsUI::new(command_emitter.clone(), &config);
    let canvas = CanvasUI::new(command_emitter.clone(), &config);
    let status_ui = StatusUI::new(sketch_event_observer.clone());

    let host = GtkSketchHost::new(canvas.clone(), controls.clone());
    let engine = SketchEngine::new(
        host,
        config,
        command_observer.clone(),
        sketch_event_emitter.clone(),
    );

    let canvas_frame = Frame::builder()
        .name("canvas-frame")
        .css_classes(["canvas-frame"])
        .child(&canvas.area)
        .halign(gtk4::Align::Center)
        .valign(gtk4::Align::Start)
        .build();

    let canvas_box = gtk4::Box::builder()
        .name("canvas-box")
        .orientation(Orientation::Vertical)
        .hexpand(true)
        .build();
    canvas_box.append(&canvas_frame);
    canvas_box.append(&status_ui.borrow().label);

    let top_level_box = gtk4::Box::builder()
        .name("top-level-box")
        .orientation(Orientation::Horizontal)
        .spacing(SPACING_LARGE)
        .css_classes(["app-background"])
        .build();
    top_level_box.append(&controls.container);
    top_level_box.append(&canvas_box);

    let header_bar = HeaderBar::new();
    window.set_titlebar(Some(&header_bar));
    window.set_child(Some(&top_level_box));

    // Set up keyboard shortcuts
    app.set_accels_for_action("win.apply-resolution", &["<Control>Return"]);
    app.set_accels_for_action("win.clear", &["<Control>l"]);

    add_command_action(
        &window,
        "apply-resolution",
        &command_emitter,
        SketchCommand::ApplyResolution,
    );
    add_command_action(&window, "clear", &command_emitter, SketchCommand::Clear);

    let action_about = SimpleAction::new("about", None);
    action_about.connect_activate(move |_, _| {
        let dialog = AboutDialog::builder()
            .program_name("Sketchpad")
            .version(APP_VERSION)
            .comments("Paint a pixel grid with the mouse")
            .license_type(License::MitX11)
            .build();
        dialog.present();
    });
    window.add_action(&action_about);

    let about_button = gtk4::Button::builder()
        .icon_name("help-about-symbolic")
        .action_name("win.about")
        .tooltip_text("About")
        .build();
    header_bar.pack_end(&about_button);

    // break the engine <-> channel cycles when the window goes away
    {
        let engine = Rc::clone(&engine);
        let status_ui: Rc<RefCell<StatusUI>> = Rc::clone(&status_ui);
        window.connect_destroy(move |_| {
            engine.borrow_mut().destroy();
            status_ui.borrow_mut().destroy();
        });
    }

    window.present();

    command_emitter.emit(SketchCommand::Initialize);
}
