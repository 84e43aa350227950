use std::cell::RefCell;
use std::rc::Rc;

use gtk4::{prelude::*, Label};

use crate::destroyable::Destroyable;
use crate::events::{EventObserver, Unsubscriber};
use crate::model::SketchEvent;

const ERROR_CLASS: &str = "status-error";

/// One-line status under the canvas: current grid size or why a resize was refused.
pub struct StatusUI {
    pub label: Label,
    subscription: Option<Unsubscriber<SketchEvent>>,
}

impl Destroyable for StatusUI {
    fn destroy(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl StatusUI {
    pub fn new(sketch_event_observer: EventObserver<SketchEvent>) -> Rc<RefCell<Self>> {
        let label = Label::builder()
            .name("status-label")
            .halign(gtk4::Align::Start)
            .css_classes(["status-label"])
            .build();

        let status_ui = Rc::new(RefCell::new(Self {
            label,
            subscription: None,
        }));

        StatusUI::connect_observer(status_ui.clone(), sketch_event_observer);
        status_ui
    }

    fn connect_observer(
        status_ui: Rc<RefCell<Self>>,
        sketch_event_observer: EventObserver<SketchEvent>,
    ) {
        let status_ui_moved = status_ui.clone();
        let subscription = sketch_event_observer.subscribe(move |event| {
            status_ui_moved.borrow().handle_sketch_event(event);
        });
        status_ui.borrow_mut().subscription = Some(subscription);
    }

    fn handle_sketch_event(&self, event: &SketchEvent) {
        let Some(status) = status_for(event) else {
            return;
        };
        if status.is_error {
            self.label.add_css_class(ERROR_CLASS);
        } else {
            self.label.remove_css_class(ERROR_CLASS);
        }
        self.label.set_text(&status.text);
    }
}

#[derive(Debug, PartialEq)]
struct StatusLine {
    text: String,
    is_error: bool,
}

/// `None` leaves the label as it is: clearing the canvas says nothing about the grid.
fn status_for(event: &SketchEvent) -> Option<StatusLine> {
    match event {
        SketchEvent::ResolutionApplied {
            resolution,
            geometry,
        } => Some(StatusLine {
            text: format!(
                "{} cells, {:.2} × {:.2} px each",
                resolution, geometry.cell_width, geometry.cell_height
            ),
            is_error: false,
        }),
        SketchEvent::ResolutionRejected(error) => Some(StatusLine {
            text: format!("Resolution not applied: {}", error),
            is_error: true,
        }),
        SketchEvent::Cleared => None,
    }
}
