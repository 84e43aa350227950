use std::rc::Rc;

use gtk4::{
    gdk, prelude::*, Button, CheckButton, ColorDialog, ColorDialogButton, Entry, InputPurpose,
    Label, Orientation,
};

use super::layout::{ENTRY_WIDTH_CHARS, SPACING_MEDIUM, SPACING_SMALL};
use crate::events::EventEmitter;
use crate::model::{Color, PaintMode, Resolution, SketchCommand};
use crate::sketch::SketchConfig;

const INVALID_INPUT_CLASS: &str = "invalid-input";

/// Side panel with the resolution fields, brush options and action buttons.
pub struct ControlsUI {
    pub container: gtk4::Box,
    pub columns_entry: Entry,
    pub rows_entry: Entry,
    pub color_button: ColorDialogButton,
    pub normal_mode: CheckButton,
    pub rainbow_mode: CheckButton,
    pub darken_check: CheckButton,
    pub darken_background_check: CheckButton,
    pub apply_button: Button,
    pub clear_button: Button,
}

impl ControlsUI {
    pub fn new(command_emitter: EventEmitter<SketchCommand>, config: &SketchConfig) -> Rc<Self> {
        let container = gtk4::Box::builder()
            .name("control-panel")
            .orientation(Orientation::Vertical)
            .spacing(SPACING_MEDIUM)
            .css_classes(["control-panel"])
            .build();

        let columns_entry = Self::resolution_entry("Columns");
        let rows_entry = Self::resolution_entry("Rows");
        let apply_button = Button::builder()
            .label("Apply")
            .tooltip_text("Rebuild the grid (Ctrl+Enter)")
            .build();

        let resolution_row = gtk4::Box::builder()
            .orientation(Orientation::Horizontal)
            .spacing(SPACING_SMALL)
            .build();
        resolution_row.append(&columns_entry);
        resolution_row.append(&Label::new(Some("×")));
        resolution_row.append(&rows_entry);
        resolution_row.append(&apply_button);

        let color_button = ColorDialogButton::new(Some(ColorDialog::new()));
        let (r, g, b) = config.paint_color.to_unit_rgb();
        color_button.set_rgba(&gdk::RGBA::new(r as f32, g as f32, b as f32, 1.0));
        color_button.set_tooltip_text(Some("Paint color"));

        let normal_mode = CheckButton::with_label("Normal");
        let rainbow_mode = CheckButton::with_label("Rainbow");
        rainbow_mode.set_group(Some(&normal_mode));
        normal_mode.set_active(true);

        let darken_check = CheckButton::with_label("Darken painted cells");
        let darken_background_check = CheckButton::with_label("Darken background too");
        darken_background_check.set_sensitive(false);

        let clear_button = Button::builder()
            .label("Clear")
            .tooltip_text("Clear the canvas (Ctrl+L)")
            .build();

        container.append(&Self::section_title("Resolution"));
        container.append(&resolution_row);
        container.append(&Self::section_title("Brush"));
        container.append(&color_button);
        container.append(&normal_mode);
        container.append(&rainbow_mode);
        container.append(&darken_check);
        container.append(&darken_background_check);
        container.append(&clear_button);

        let controls = Rc::new(Self {
            container,
            columns_entry,
            rows_entry,
            color_button,
            normal_mode,
            rainbow_mode,
            darken_check,
            darken_background_check,
            apply_button,
            clear_button,
        });
        controls.bind_handlers(command_emitter);
        controls
    }

    fn resolution_entry(placeholder: &str) -> Entry {
        Entry::builder()
            .placeholder_text(placeholder)
            .tooltip_text(placeholder)
            .width_chars(ENTRY_WIDTH_CHARS)
            .max_width_chars(ENTRY_WIDTH_CHARS)
            .input_purpose(InputPurpose::Digits)
            .css_classes(["resolution-entry"])
            .build()
    }

    fn section_title(text: &str) -> Label {
        Label::builder()
            .label(text)
            .halign(gtk4::Align::Start)
            .css_classes(["control-section-title"])
            .build()
    }

    fn bind_handlers(&self, command_emitter: EventEmitter<SketchCommand>) {
        for entry in [&self.columns_entry, &self.rows_entry] {
            let command_emitter = command_emitter.clone();
            entry.connect_activate(move |_| {
                command_emitter.emit(SketchCommand::ApplyResolution);
            });
        }

        {
            let command_emitter = command_emitter.clone();
            self.apply_button.connect_clicked(move |_| {
                command_emitter.emit(SketchCommand::ApplyResolution);
            });
        }

        {
            let command_emitter = command_emitter.clone();
            self.clear_button.connect_clicked(move |_| {
                command_emitter.emit(SketchCommand::Clear);
            });
        }

        {
            let command_emitter = command_emitter.clone();
            self.color_button.connect_rgba_notify(move |button| {
                let rgba = button.rgba();
                let color = Color::from_unit_rgb(
                    rgba.red() as f64,
                    rgba.green() as f64,
                    rgba.blue() as f64,
                );
                command_emitter.emit(SketchCommand::SetPaintColor(color));
            });
        }

        for (radio, mode) in [
            (&self.normal_mode, PaintMode::Normal),
            (&self.rainbow_mode, PaintMode::Rainbow),
        ] {
            let command_emitter = command_emitter.clone();
            radio.connect_toggled(move |radio| {
                if radio.is_active() {
                    command_emitter.emit(SketchCommand::SetPaintMode(mode));
                }
            });
        }

        {
            let command_emitter = command_emitter.clone();
            self.darken_check.connect_toggled(move |check| {
                command_emitter.emit(SketchCommand::SetDarken(check.is_active()));
            });
        }

        self.darken_background_check.connect_toggled(move |check| {
            command_emitter.emit(SketchCommand::SetDarkenBackground(check.is_active()));
        });
    }

    pub fn resolution_text(&self) -> (String, String) {
        (
            self.columns_entry.text().to_string(),
            self.rows_entry.text().to_string(),
        )
    }

    pub fn write_resolution(&self, resolution: Resolution) {
        self.columns_entry.set_text(&resolution.columns.to_string());
        self.rows_entry.set_text(&resolution.rows.to_string());
    }

    pub fn mark_resolution_valid(&self, valid: bool) {
        for entry in [&self.columns_entry, &self.rows_entry] {
            if valid {
                entry.remove_css_class(INVALID_INPUT_CLASS);
            } else {
                entry.add_css_class(INVALID_INPUT_CLASS);
            }
        }
    }
}
