use std::cell::RefCell;
use std::rc::Rc;

use log::{info, trace, warn};

use super::geometry::cell_size;
use super::grid_builder::{self, Grid};
use super::host::SketchHost;
use super::paint_engine::PaintState;
use super::settings::SketchConfig;
use super::validator::validate;
use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventHandler, EventObserver, Unsubscriber};
use crate::model::{
    Color, PaintMode, PointerButton, RawResolution, Resolution, SketchCommand, SketchEvent,
    ValidationError,
};

/// Owns the grid and the brush, and runs the validate → rebuild pipeline.
pub struct SketchEngine<H: SketchHost> {
    config: SketchConfig,
    host: H,
    paint: PaintState,
    grid: Grid<H::Cell>,
    resolution: Option<Resolution>,
    command_subscription: Option<Unsubscriber<SketchCommand>>,
    sketch_event_emitter: EventEmitter<SketchEvent>,
}

impl<H: SketchHost> Destroyable for SketchEngine<H> {
    fn destroy(&mut self) {
        if let Some(subscription) = self.command_subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl<H: SketchHost + 'static> SketchEngine<H> {
    pub fn new(
        host: H,
        config: SketchConfig,
        command_observer: EventObserver<SketchCommand>,
        sketch_event_emitter: EventEmitter<SketchEvent>,
    ) -> Rc<RefCell<Self>> {
        let paint = PaintState::new(
            config.paint_color,
            config.background_color,
            config.reset_rainbow_on_mode_change,
        );
        let engine = Rc::new(RefCell::new(Self {
            config,
            host,
            paint,
            grid: Grid::default(),
            resolution: None,
            command_subscription: None,
            sketch_event_emitter,
        }));
        SketchEngine::wire_subscription(engine.clone(), command_observer);
        engine
    }

    fn wire_subscription(
        engine: Rc<RefCell<Self>>,
        command_observer: EventObserver<SketchCommand>,
    ) {
        let engine_handler = engine.clone();
        let subscription = command_observer.subscribe(move |command| {
            engine_handler.borrow_mut().handle_event(command);
        });
        engine.borrow_mut().command_subscription = Some(subscription);
    }
}

impl<H: SketchHost> SketchEngine<H> {
    /// Puts the controls in their starting state, writes the default
    /// resolution into the fields and builds the first grid.
    pub fn initialize(&mut self) -> Result<Resolution, ValidationError> {
        self.host
            .set_color_picker_enabled(self.paint.mode == PaintMode::Normal);
        self.host
            .set_darken_background_enabled(self.paint.darken_enabled);
        self.host
            .write_resolution(self.config.resolution.default_resolution());
        self.apply_resolution()
    }

    /// Validates the resolution fields against the freshly measured canvas and
    /// rebuilds the grid on success. On failure nothing but the field styling changes.
    pub fn apply_resolution(&mut self) -> Result<Resolution, ValidationError> {
        let container = self.host.measure_container();
        let (columns, rows) = self.host.read_resolution();
        let requested = RawResolution::parse(&columns, &rows);

        match validate(container, requested, &self.config.resolution) {
            Ok(resolution) => {
                self.host.mark_resolution_valid(true);
                let geometry = cell_size(container, resolution);
                grid_builder::rebuild(
                    &mut self.host,
                    &mut self.grid,
                    geometry,
                    self.config.background_color,
                );
                self.resolution = Some(resolution);
                info!(
                    target: "sketch_engine",
                    "Applied resolution {} on a {}×{}px canvas",
                    resolution,
                    container.width,
                    container.height
                );
                self.sketch_event_emitter
                    .emit(SketchEvent::ResolutionApplied { resolution, geometry });
                Ok(resolution)
            }
            Err(error) => {
                if error.is_input_error() {
                    self.host.mark_resolution_valid(false);
                }
                warn!(
                    target: "sketch_engine",
                    "Rejected resolution ({:?}, {:?}): {}",
                    columns,
                    rows,
                    error
                );
                self.sketch_event_emitter
                    .emit(SketchEvent::ResolutionRejected(error.clone()));
                Err(error)
            }
        }
    }

    pub fn clear(&mut self) {
        let background = self.config.background_color;
        for cell in self.grid.cells_mut() {
            cell.color = background;
            self.host.set_background_color(&cell.handle, background);
        }
        trace!(target: "sketch_engine", "Cleared {} cells", self.grid.len());
        self.sketch_event_emitter.emit(SketchEvent::Cleared);
    }

    pub fn pointer_down(&mut self, cell: Option<usize>, button: PointerButton) {
        self.paint.pointer_down(button);
        if let Some(index) = cell {
            self.apply_brush(index);
        }
    }

    pub fn pointer_enter(&mut self, cell: usize) {
        self.apply_brush(cell);
    }

    pub fn pointer_up(&mut self, button: PointerButton) {
        self.paint.pointer_up(button);
    }

    fn apply_brush(&mut self, index: usize) {
        let Some(brush) = self.paint.brush() else {
            return;
        };
        let len = self.grid.len();
        let Some(cell) = self.grid.cell_mut(index) else {
            debug_assert!(false, "paint on cell {index} of a {len}-cell grid");
            warn!(target: "sketch_engine", "Ignoring paint on cell {} of a {}-cell grid", index, len);
            return;
        };
        let color = self.paint.apply(brush, cell.color);
        cell.color = color;
        self.host.set_background_color(&cell.handle, color);
    }

    pub fn set_paint_color(&mut self, color: Color) {
        self.paint.active_color = color;
    }

    pub fn set_paint_mode(&mut self, mode: PaintMode) {
        self.paint.set_mode(mode);
        self.host.set_color_picker_enabled(mode == PaintMode::Normal);
    }

    pub fn set_darken(&mut self, enabled: bool) {
        self.paint.darken_enabled = enabled;
        self.host.set_darken_background_enabled(enabled);
    }

    pub fn set_darken_background(&mut self, enabled: bool) {
        self.paint.darken_background_too = enabled;
    }

    pub fn grid(&self) -> &Grid<H::Cell> {
        &self.grid
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: SketchHost> EventHandler<SketchCommand> for SketchEngine<H> {
    fn handle_event(&mut self, command: &SketchCommand) {
        trace!(target: "sketch_engine", "Handling command {:?}", command);
        match command {
            SketchCommand::Initialize => {
                // outcome already reported through SketchEvent
                let _ = self.initialize();
            }
            SketchCommand::ApplyResolution => {
                let _ = self.apply_resolution();
            }
            SketchCommand::Clear => self.clear(),
            SketchCommand::PointerDown { cell, button } => self.pointer_down(*cell, *button),
            SketchCommand::PointerEnter(cell) => self.pointer_enter(*cell),
            SketchCommand::PointerUp(button) => self.pointer_up(*button),
            SketchCommand::SetPaintColor(color) => self.set_paint_color(*color),
            SketchCommand::SetPaintMode(mode) => self.set_paint_mode(*mode),
            SketchCommand::SetDarken(enabled) => self.set_darken(*enabled),
            SketchCommand::SetDarkenBackground(enabled) => self.set_darken_background(*enabled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Channel;
    use crate::model::{Axis, ContainerSize};
    use crate::sketch::settings::{ResolutionSetting, ResolutionSettings};
    use crate::sketch::test_host::RecordingHost;
    use crate::tests::UsingLogger;
    use test_context::test_context;

    struct Fixture {
        engine: Rc<RefCell<SketchEngine<RecordingHost>>>,
        commands: EventEmitter<SketchCommand>,
        events: Rc<RefCell<Vec<SketchEvent>>>,
        _events_subscription: Unsubscriber<SketchEvent>,
    }

    impl Fixture {
        fn new(container: ContainerSize, config: SketchConfig) -> Self {
            let (commands, command_observer) = Channel::<SketchCommand>::new();
            let (event_emitter, event_observer) = Channel::<SketchEvent>::new();
            let events = Rc::new(RefCell::new(Vec::new()));
            let events_clone = Rc::clone(&events);
            let subscription = event_observer.subscribe(move |event: &SketchEvent| {
                events_clone.borrow_mut().push(event.clone());
            });
            let engine = SketchEngine::new(
                RecordingHost::new(container),
                config,
                command_observer,
                event_emitter,
            );
            Fixture {
                engine,
                commands,
                events,
                _events_subscription: subscription,
            }
        }

        fn square() -> Self {
            let fixture = Fixture::new(ContainerSize::new(600.0, 600.0), SketchConfig::default());
            fixture.commands.emit(SketchCommand::Initialize);
            fixture
        }

        fn apply(&self, columns: &str, rows: &str) {
            self.engine
                .borrow_mut()
                .host_mut()
                .type_resolution(columns, rows);
            self.commands.emit(SketchCommand::ApplyResolution);
        }

        fn paint(&self, cell: usize) {
            self.commands.emit(SketchCommand::PointerDown {
                cell: Some(cell),
                button: PointerButton::Primary,
            });
            self.commands
                .emit(SketchCommand::PointerUp(PointerButton::Primary));
        }

        fn color_of(&self, cell: usize) -> Color {
            self.engine.borrow().grid().cell(cell).unwrap().color
        }

        fn last_event(&self) -> Option<SketchEvent> {
            self.events.borrow().last().cloned()
        }
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_initialize_writes_defaults_and_builds(_ctx: &mut UsingLogger) {
        let fixture = Fixture::square();
        let engine = fixture.engine.borrow();

        assert_eq!(engine.host().columns_text, "16");
        assert_eq!(engine.host().rows_text, "16");
        assert_eq!(engine.resolution(), Some(Resolution::new(16, 16)));
        assert_eq!(engine.grid().len(), 256);
        assert_eq!(engine.host().color_picker_enabled, Some(true));
        assert_eq!(engine.host().darken_background_enabled, Some(false));
        assert_eq!(engine.host().resolution_valid, Some(true));
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_sixty_by_sixty_on_square_canvas(_ctx: &mut UsingLogger) {
        let fixture = Fixture::square();
        fixture.apply("60", "60");

        let engine = fixture.engine.borrow();
        assert_eq!(engine.grid().len(), 3600);
        assert_eq!(engine.grid().geometry().cell_width, 10.0);
        assert_eq!(engine.grid().geometry().cell_height, 10.0);
        assert_eq!(engine.host().children.len(), 3600);
        assert!(matches!(
            fixture.last_event(),
            Some(SketchEvent::ResolutionApplied { resolution, .. }) if resolution == Resolution::new(60, 60)
        ));
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_out_of_range_keeps_previous_grid(_ctx: &mut UsingLogger) {
        let fixture = Fixture::square();
        fixture.apply("60", "60");
        fixture.paint(42);
        let replace_calls = fixture.engine.borrow().host().replace_calls;

        fixture.apply("0", "60");

        let engine = fixture.engine.borrow();
        assert_eq!(engine.grid().len(), 3600);
        assert_eq!(engine.host().children.len(), 3600);
        assert_eq!(engine.host().replace_calls, replace_calls);
        assert_eq!(engine.resolution(), Some(Resolution::new(60, 60)));
        assert_eq!(engine.grid().cell(42).unwrap().color, Color::BLACK);
        assert_eq!(engine.host().resolution_valid, Some(false));
        assert_eq!(
            fixture.last_event(),
            Some(SketchEvent::ResolutionRejected(ValidationError::OutOfRange {
                axis: Axis::Width,
                value: 0.0,
                lower_bound: 1,
                upper_bound: 100,
            }))
        );
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_fractional_and_garbage_input_rejected(_ctx: &mut UsingLogger) {
        let fixture = Fixture::square();
        fixture.paint(7);
        let replace_calls = fixture.engine.borrow().host().replace_calls;
        let geometry = *fixture.engine.borrow().grid().geometry();

        fixture.apply("60.5", "60");
        assert!(matches!(
            fixture.last_event(),
            Some(SketchEvent::ResolutionRejected(ValidationError::NotInteger {
                axis: Axis::Width,
                ..
            }))
        ));

        fixture.apply("60", "lots");
        assert!(matches!(
            fixture.last_event(),
            Some(SketchEvent::ResolutionRejected(ValidationError::NotInteger {
                axis: Axis::Height,
                ..
            }))
        ));

        fixture.apply("", "60");
        assert!(matches!(
            fixture.last_event(),
            Some(SketchEvent::ResolutionRejected(ValidationError::OutOfRange { .. }))
        ));

        let engine = fixture.engine.borrow();
        assert_eq!(engine.grid().len(), 256);
        assert_eq!(engine.host().children.len(), 256);
        assert_eq!(engine.host().replace_calls, replace_calls);
        assert_eq!(*engine.grid().geometry(), geometry);
        assert_eq!(engine.resolution(), Some(Resolution::new(16, 16)));
        assert_eq!(engine.grid().cell(7).unwrap().color, Color::BLACK);
        assert_eq!(engine.host().child_colors()[7], Color::BLACK);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_valid_input_after_rejection_clears_invalid_mark(_ctx: &mut UsingLogger) {
        let fixture = Fixture::square();
        fixture.apply("101", "10");
        assert_eq!(fixture.engine.borrow().host().resolution_valid, Some(false));

        fixture.apply("100", "10");
        let engine = fixture.engine.borrow();
        assert_eq!(engine.host().resolution_valid, Some(true));
        assert_eq!(engine.grid().len(), 1000);
        assert_eq!(engine.grid().geometry().cell_width, 6.0);
        assert_eq!(engine.grid().geometry().cell_height, 60.0);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_small_container_rejected_without_flagging_inputs(_ctx: &mut UsingLogger) {
        let fixture = Fixture::new(ContainerSize::new(80.0, 600.0), SketchConfig::default());
        fixture.commands.emit(SketchCommand::Initialize);

        let engine = fixture.engine.borrow();
        assert!(engine.grid().is_empty());
        assert_eq!(engine.resolution(), None);
        assert_eq!(engine.host().resolution_valid, None);
        assert!(matches!(
            fixture.last_event(),
            Some(SketchEvent::ResolutionRejected(ValidationError::ContainerTooSmall { .. }))
        ));
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_container_is_remeasured_on_every_apply(_ctx: &mut UsingLogger) {
        let fixture = Fixture::square();
        fixture.engine.borrow_mut().host_mut().container = ContainerSize::new(300.0, 150.0);

        fixture.apply("30", "15");
        let engine = fixture.engine.borrow();
        assert_eq!(engine.grid().geometry().cell_width, 10.0);
        assert_eq!(engine.grid().geometry().cell_height, 10.0);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_custom_bounds(_ctx: &mut UsingLogger) {
        let resolution = ResolutionSettings::new(
            ResolutionSetting::new(Axis::Width, 4, 20, 5.0, 8).unwrap(),
            ResolutionSetting::new(Axis::Height, 4, 20, 5.0, 4).unwrap(),
        )
        .unwrap();
        let fixture = Fixture::new(
            ContainerSize::new(100.0, 100.0),
            SketchConfig::default().with_resolution(resolution),
        );
        fixture.commands.emit(SketchCommand::Initialize);
        assert_eq!(fixture.engine.borrow().grid().len(), 32);

        fixture.apply("3", "4");
        assert!(matches!(
            fixture.last_event(),
            Some(SketchEvent::ResolutionRejected(ValidationError::OutOfRange {
                lower_bound: 4,
                upper_bound: 20,
                ..
            }))
        ));
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_clear_is_idempotent(_ctx: &mut UsingLogger) {
        let fixture = Fixture::square();
        fixture.paint(0);
        fixture.paint(17);

        fixture.commands.emit(SketchCommand::Clear);
        let once: Vec<Color> = fixture.engine.borrow().grid().colors().collect();
        fixture.commands.emit(SketchCommand::Clear);
        let twice: Vec<Color> = fixture.engine.borrow().grid().colors().collect();

        assert_eq!(once, twice);
        assert!(twice.iter().all(|color| *color == Color::WHITE));
        assert!(fixture
            .engine
            .borrow()
            .host()
            .child_colors()
            .iter()
            .all(|color| *color == Color::WHITE));
        assert_eq!(fixture.last_event(), Some(SketchEvent::Cleared));
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_drag_paints_until_release(_ctx: &mut UsingLogger) {
        let fixture = Fixture::square();
        fixture.commands.emit(SketchCommand::PointerEnter(1));
        assert_eq!(fixture.color_of(1), Color::WHITE);

        fixture.commands.emit(SketchCommand::PointerDown {
            cell: Some(2),
            button: PointerButton::Primary,
        });
        fixture.commands.emit(SketchCommand::PointerEnter(3));
        fixture.commands.emit(SketchCommand::PointerEnter(4));
        fixture
            .commands
            .emit(SketchCommand::PointerUp(PointerButton::Primary));
        fixture.commands.emit(SketchCommand::PointerEnter(5));

        for cell in [2, 3, 4] {
            assert_eq!(fixture.color_of(cell), Color::BLACK);
        }
        assert_eq!(fixture.color_of(5), Color::WHITE);

        let engine = fixture.engine.borrow();
        let host_cell = &engine.host().children[3];
        assert_eq!(host_cell.index, 3);
        assert_eq!(host_cell.color.get(), Color::BLACK);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_press_on_border_then_drag_into_cells(_ctx: &mut UsingLogger) {
        let fixture = Fixture::square();
        fixture.commands.emit(SketchCommand::PointerDown {
            cell: None,
            button: PointerButton::Primary,
        });
        fixture.commands.emit(SketchCommand::PointerEnter(0));
        assert_eq!(fixture.color_of(0), Color::BLACK);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_right_button_erases(_ctx: &mut UsingLogger) {
        let fixture = Fixture::square();
        for cell in 0..3 {
            fixture.paint(cell);
        }

        fixture.commands.emit(SketchCommand::PointerDown {
            cell: Some(0),
            button: PointerButton::Secondary,
        });
        fixture.commands.emit(SketchCommand::PointerEnter(1));
        fixture
            .commands
            .emit(SketchCommand::PointerUp(PointerButton::Secondary));
        fixture.commands.emit(SketchCommand::PointerEnter(2));

        assert_eq!(fixture.color_of(0), Color::WHITE);
        assert_eq!(fixture.color_of(1), Color::WHITE);
        assert_eq!(fixture.color_of(2), Color::BLACK);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_rainbow_mode_through_commands(_ctx: &mut UsingLogger) {
        let fixture = Fixture::square();
        fixture
            .commands
            .emit(SketchCommand::SetPaintMode(PaintMode::Rainbow));
        assert_eq!(
            fixture.engine.borrow().host().color_picker_enabled,
            Some(false)
        );

        for cell in 0..7 {
            fixture.paint(cell);
        }
        let colors: Vec<Color> = (0..7).map(|cell| fixture.color_of(cell)).collect();
        assert_eq!(
            colors,
            vec![
                Color::RED,
                Color::ORANGE,
                Color::YELLOW,
                Color::LIGHT_BLUE,
                Color::INDIGO,
                Color::VIOLET,
                Color::RED,
            ]
        );

        fixture
            .commands
            .emit(SketchCommand::SetPaintMode(PaintMode::Normal));
        assert_eq!(
            fixture.engine.borrow().host().color_picker_enabled,
            Some(true)
        );
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_rainbow_reset_option(_ctx: &mut UsingLogger) {
        let fixture = Fixture::new(
            ContainerSize::new(600.0, 600.0),
            SketchConfig::default().with_rainbow_reset(true),
        );
        fixture.commands.emit(SketchCommand::Initialize);
        fixture
            .commands
            .emit(SketchCommand::SetPaintMode(PaintMode::Rainbow));
        fixture.paint(0);
        fixture
            .commands
            .emit(SketchCommand::SetPaintMode(PaintMode::Normal));
        fixture
            .commands
            .emit(SketchCommand::SetPaintMode(PaintMode::Rainbow));
        fixture.paint(1);

        assert_eq!(fixture.color_of(1), Color::RED);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_darken_repaints_relative_to_current_color(_ctx: &mut UsingLogger) {
        let fixture = Fixture::square();
        fixture
            .commands
            .emit(SketchCommand::SetPaintColor(Color::rgb(200.0, 100.0, 50.0)));
        fixture.paint(9);

        fixture.commands.emit(SketchCommand::SetDarken(true));
        assert_eq!(
            fixture.engine.borrow().host().darken_background_enabled,
            Some(true)
        );
        fixture.paint(9);
        assert_eq!(fixture.color_of(9), Color::rgb(174.5, 74.5, 24.5));

        // untouched cells take the picker color even with darkening on
        fixture.paint(10);
        assert_eq!(fixture.color_of(10), Color::rgb(200.0, 100.0, 50.0));

        fixture
            .commands
            .emit(SketchCommand::SetDarkenBackground(true));
        fixture.paint(11);
        assert_eq!(fixture.color_of(11), Color::rgb(229.5, 229.5, 229.5));

        fixture.commands.emit(SketchCommand::SetDarken(false));
        assert_eq!(
            fixture.engine.borrow().host().darken_background_enabled,
            Some(false)
        );
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_destroy_unsubscribes(_ctx: &mut UsingLogger) {
        let fixture = Fixture::square();
        fixture.engine.borrow_mut().destroy();

        fixture.commands.emit(SketchCommand::Clear);
        let cleared = fixture
            .events
            .borrow()
            .iter()
            .any(|event| *event == SketchEvent::Cleared);
        assert!(!cleared);
    }
}
