use std::thread;

use crossbeam_channel::{bounded, select, Receiver, Sender};
use kod_base::math::{Bounds2u, Vec2u};
use kod_window::{Event, EventSource, KeyEvent, Screen};

use crate::{
    buffer::Buffer,
    command::{CommandSender, EditorCommand},
    config::EditorConfig,
    error::EditorError,
    mode::{InsertMode, Mode, ModeContext},
    view::View,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// The open views. The first one is the current view, and there is
/// always one.
struct Views {
    current: View,
    rest: Vec<View>,
}

impl Views {
    fn iter(&self) -> impl Iterator<Item = &View> {
        std::iter::once(&self.current).chain(self.rest.iter())
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut View> {
        std::iter::once(&mut self.current).chain(self.rest.iter_mut())
    }

    fn len(&self) -> usize {
        self.rest.len().saturating_add(1)
    }
}

/// What woke the loop up.
enum Wakeup {
    Event(Event),
    Command(EditorCommand),
    Quit,
}

/// Owns every view, buffer and the active mode, and is the only thing
/// that ever mutates them. Input and commands from other threads reach
/// it through bounded queues.
pub struct Editor {
    screen: Box<dyn Screen>,
    views: Views,
    mode: Box<dyn Mode>,
    config: EditorConfig,

    // terminal input, fed by the polling thread
    events_tx: Sender<Event>,
    events_rx: Receiver<Event>,

    // deferred mutations from any producer
    commands_tx: Sender<EditorCommand>,
    commands_rx: Receiver<EditorCommand>,

    /// Dropping the sender is what signals quit, so it can only happen once.
    quit_tx: Option<Sender<()>>,
    quit_rx: Receiver<()>,
}

impl Editor {
    pub fn new(screen: Box<dyn Screen>, buffer: Buffer, config: EditorConfig) -> Self {
        let (events_tx, events_rx) = bounded(config.queue_capacity);
        let (commands_tx, commands_rx) = bounded(config.queue_capacity);
        let (quit_tx, quit_rx) = bounded(0);

        let mut editor = Self {
            screen,
            views: Views {
                current: View::new(buffer),
                rest: vec![],
            },
            mode: Box::new(InsertMode::new()),
            config,
            events_tx,
            events_rx,
            commands_tx,
            commands_rx,
            quit_tx: Some(quit_tx),
            quit_rx,
        };
        editor.layout();
        editor
    }

    pub fn cur_view(&self) -> &View {
        &self.views.current
    }

    pub fn cur_view_mut(&mut self) -> &mut View {
        &mut self.views.current
    }

    /// All views in order, the current one first.
    pub fn views(&self) -> impl Iterator<Item = &View> {
        self.views.iter()
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    pub fn append_view(&mut self, mut view: View) {
        view.set_region(self.full_region());
        self.views.rest.push(view);
    }

    pub fn mode_name(&self) -> &'static str {
        self.mode.name()
    }

    /// Install `mode`. It handles every key dispatched from now on.
    pub fn set_mode(&mut self, mode: Box<dyn Mode>) {
        log::debug!("mode {} -> {}", self.mode.name(), mode.name());
        self.mode = mode;
    }

    /// A handle for pushing input into the loop as if it came from the
    /// terminal.
    pub fn event_sender(&self) -> Sender<Event> {
        self.events_tx.clone()
    }

    pub fn command_sender(&self) -> CommandSender {
        CommandSender::new(self.commands_tx.clone())
    }

    /// Close the quit signal. There is no way back.
    pub fn quit(&mut self) {
        if self.quit_tx.take().is_some() {
            log::debug!("quit requested");
        }
    }

    pub fn is_quitting(&self) -> bool {
        self.quit_tx.is_none()
    }

    /// Take over the terminal and start feeding `source` into the event
    /// queue from a background thread.
    pub fn start<S: EventSource>(&mut self, source: S) -> Result<(), EditorError> {
        self.screen.init()?;
        self.screen.set_style(self.config.default_style);
        self.screen.clear();
        self.layout();
        self.spawn_input_poller(source)
    }

    /// Run until quit, then hand the terminal back.
    pub fn run<S: EventSource>(&mut self, source: S) -> Result<(), EditorError> {
        self.start(source)?;

        let result = self.run_loop();
        let fini_result = self.screen.fini();
        log::info!("bye");

        result?;
        fini_result?;
        Ok(())
    }

    fn run_loop(&mut self) -> Result<(), EditorError> {
        self.draw()?;
        while self.step()? == LoopControl::Continue {}
        Ok(())
    }

    fn spawn_input_poller<S: EventSource>(&self, mut source: S) -> Result<(), EditorError> {
        let events = self.events_tx.clone();

        thread::Builder::new()
            .name("kod-input-poll".to_string())
            .spawn(move || loop {
                match source.poll_event() {
                    Ok(event) => {
                        if events.send(event).is_err() {
                            log::debug!("event queue closed, input polling stops");
                            break;
                        }
                    }
                    Err(err) => {
                        log::error!("unable to poll terminal input: {err:?}");
                        break;
                    }
                }
            })
            .map_err(EditorError::Spawn)?;

        Ok(())
    }

    /// One turn of the loop: wait for the first of input, a command or
    /// quit, handle it, then redraw once.
    ///
    /// Input is drained: every event already queued when the first one
    /// arrives is handled before the single redraw.
    pub fn step(&mut self) -> Result<LoopControl, EditorError> {
        if self.is_quitting() {
            return Ok(LoopControl::Quit);
        }

        let wakeup = select! {
            recv(self.events_rx) -> event => event.map_or(Wakeup::Quit, Wakeup::Event),
            recv(self.commands_rx) -> command => command.map_or(Wakeup::Quit, Wakeup::Command),
            recv(self.quit_rx) -> _ => Wakeup::Quit,
        };

        match wakeup {
            Wakeup::Event(event) => self.drain_events(event)?,
            Wakeup::Command(command) => self.apply_command(command),
            Wakeup::Quit => self.quit(),
        }

        if self.is_quitting() {
            return Ok(LoopControl::Quit);
        }

        self.draw()?;
        Ok(LoopControl::Continue)
    }

    fn drain_events(&mut self, first: Event) -> Result<(), EditorError> {
        let mut next = Some(first);
        let mut handled = 0_usize;

        while let Some(event) = next {
            self.handle_event(event)?;
            handled = handled.saturating_add(1);

            if self.is_quitting() {
                break;
            }
            next = self.events_rx.try_recv().ok();
        }

        log::debug!("drained {handled} events");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<(), EditorError> {
        match event {
            Event::Key(key) if key.key == self.config.quit_key => self.quit(),
            Event::Key(key) => self.dispatch_key(&key),
            Event::Resize { width, height } => {
                log::debug!("resized to {width}x{height}");
                self.screen.sync()?;
                self.layout();
            }
        }
        Ok(())
    }

    fn dispatch_key(&mut self, key: &KeyEvent) {
        let mut ctx = ModeContext::new(&mut self.views.current);
        self.mode.on_key(key, &mut ctx);

        for command in ctx.into_emitted() {
            self.apply_command(command);
        }
    }

    fn apply_command(&mut self, command: EditorCommand) {
        log::debug!("applying {command:?}");
        command.apply(self);
    }

    fn full_region(&self) -> Bounds2u {
        let size = self.screen.size();
        Bounds2u {
            pos: Vec2u::ZERO,
            size: Vec2u::new(usize::from(size.x), usize::from(size.y)),
        }
    }

    fn layout(&mut self) {
        let region = self.full_region();
        self.views
            .iter_mut()
            .for_each(|view| view.set_region(region));
    }

    fn draw(&mut self) -> Result<(), EditorError> {
        self.screen.clear();

        let view = &mut self.views.current;
        view.scroll_to_cursor();
        view.render(self.screen.as_mut(), self.config.default_style);

        self.screen.show()?;
        Ok(())
    }
}
