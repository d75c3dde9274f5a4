//! Hub - the single-owner host loop over a set of named views.
//!
//! One hub owns the console, the input catcher, and every view. At most one
//! hub is live per process at a time; [`Hub::register`] enforces that with a
//! runtime check and the handle un-registers itself on drop.
//!
//! # Loop shape
//!
//! [`Hub::run`] is a single-threaded cooperative loop: sleep for the main
//! loop interval, drain pending key presses through the active view, then
//! perform at most one buffer flush every `update_reduction` ticks to bound
//! console-write frequency. No operation suspends; the loop exits when the
//! stop flag is set (Ctrl+C by default, or any [`HubStopper`]).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::debug;

use crate::error::UiError;
use crate::input::{InputCatcher, InputEvent, InputKind, KeyCode, KeyCombo, KeyModifiers};
use crate::renderer::{Console, CrosstermConsole};
use crate::types::{Color, Symbol};
use crate::view::View;

static HUB_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Cloneable handle that stops a running hub loop from host code.
#[derive(Debug, Clone)]
pub struct HubStopper(Arc<AtomicBool>);

impl HubStopper {
    /// Request the loop to stop after the current tick.
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Manages a collection of views and drives input and output.
pub struct Hub {
    width: i32,
    height: i32,
    top: i32,
    console: Box<dyn Console>,
    catcher: InputCatcher,
    views: Vec<View>,
    active: Option<usize>,
    clearance: Symbol,
    interval: Duration,
    update_reduction: u32,
    reduction_counter: u32,
    running: bool,
    stop: Arc<AtomicBool>,
    unhandled_key: Option<Box<dyn FnMut(&InputEvent)>>,
    stop_handler: Option<Box<dyn FnMut() -> bool>>,
}

impl Hub {
    /// Register the process hub on the real terminal.
    ///
    /// The viewport starts at the current cursor row. Fails with
    /// [`UiError::HubActive`] while a previous hub is still live.
    pub fn register(width: i32, height: i32) -> Result<Self, UiError> {
        let console = CrosstermConsole::new()?;
        Self::register_with(width, height, Box::new(console))
    }

    /// Register the process hub on an explicit console (e.g. a
    /// [`CaptureConsole`](crate::renderer::CaptureConsole) in tests).
    pub fn register_with(
        width: i32,
        height: i32,
        mut console: Box<dyn Console>,
    ) -> Result<Self, UiError> {
        if width < 0 {
            return Err(UiError::range("width"));
        }
        if height < 0 {
            return Err(UiError::range("height"));
        }

        let top = console.base_row()?;

        if HUB_ACTIVE.swap(true, Ordering::SeqCst) {
            return Err(UiError::HubActive);
        }

        let mut catcher = InputCatcher::new();
        catcher.set_input(
            InputKind::SELECTION_DOWN,
            vec![KeyCombo::new(KeyCode::Tab), KeyCombo::new(KeyCode::Down)],
        );
        catcher.set_input(
            InputKind::SELECTION_UP,
            vec![
                KeyCombo::with_modifiers(KeyCode::Tab, KeyModifiers::SHIFT),
                KeyCombo::with_modifiers(KeyCode::BackTab, KeyModifiers::SHIFT),
                KeyCombo::new(KeyCode::Up),
            ],
        );
        catcher.set_input(
            InputKind::ENTER,
            vec![
                KeyCombo::new(KeyCode::Enter),
                KeyCombo::new(KeyCode::Char(' ')),
            ],
        );
        catcher.set_input(InputKind::LEFT, vec![KeyCombo::new(KeyCode::Left)]);
        catcher.set_input(InputKind::RIGHT, vec![KeyCombo::new(KeyCode::Right)]);

        debug!("hub registered: {}x{} at row {}", width, height, top);

        Ok(Self {
            width,
            height,
            top,
            console,
            catcher,
            views: Vec::new(),
            active: None,
            clearance: Symbol::new(' ', Color::Black, Color::White),
            interval: Duration::from_millis(30),
            update_reduction: 2,
            reduction_counter: 0,
            running: false,
            stop: Arc::new(AtomicBool::new(false)),
            unhandled_key: None,
            stop_handler: None,
        })
    }

    /// Create a new view.
    ///
    /// The first view added becomes the active one. Names are unique per
    /// hub.
    pub fn add_view(&mut self, name: &str) -> Result<&mut View, UiError> {
        if self.views.iter().any(|view| view.name() == name) {
            return Err(UiError::DuplicateView {
                name: name.to_string(),
            });
        }

        let view = View::new(name, self.top, self.width, self.height, self.clearance)?;
        self.views.push(view);

        if self.active.is_none() {
            self.switch_view(name)?;
        }

        let index = self.views.len() - 1;
        Ok(&mut self.views[index])
    }

    /// Switch to a different view and request a full repaint of it.
    pub fn switch_view(&mut self, name: &str) -> Result<(), UiError> {
        let Some(index) = self.views.iter().position(|view| view.name() == name) else {
            return Err(UiError::UnknownView {
                name: name.to_string(),
            });
        };

        debug!("hub: switching to view `{}`", name);
        self.active = Some(index);
        self.views[index].refresh(true);
        Ok(())
    }

    /// Look up a view by name.
    pub fn view_mut(&mut self, name: &str) -> Option<&mut View> {
        self.views.iter_mut().find(|view| view.name() == name)
    }

    /// The currently active view.
    pub fn active_view_mut(&mut self) -> Option<&mut View> {
        self.active.map(|index| &mut self.views[index])
    }

    /// Set the console title (no-op on consoles without one).
    pub fn set_title(&mut self, title: &str) -> Result<(), UiError> {
        self.console.set_title(title)?;
        Ok(())
    }

    /// Milliseconds the main loop waits between ticks; minimum 10.
    pub fn set_main_loop_interval(&mut self, millis: u64) {
        self.interval = Duration::from_millis(millis.max(10));
    }

    /// Loop ticks per buffer flush; minimum 1.
    pub fn set_update_reduction(&mut self, ticks: u32) {
        self.update_reduction = ticks.max(1);
    }

    /// Hook fired for key presses no widget consumed (and that did not stop
    /// the hub).
    pub fn on_unhandled_key(&mut self, hook: impl FnMut(&InputEvent) + 'static) {
        self.unhandled_key = Some(Box::new(hook));
    }

    /// Hook consulted before a Ctrl+C stop; returning `false` vetoes it.
    pub fn on_stop_requested(&mut self, hook: impl FnMut() -> bool + 'static) {
        self.stop_handler = Some(Box::new(hook));
    }

    /// A stop handle usable from host callbacks.
    pub fn stopper(&self) -> HubStopper {
        HubStopper(self.stop.clone())
    }

    /// Request a running loop to stop; idempotent.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Continuously read input and draw changes until stopped.
    pub fn run(&mut self) -> Result<(), UiError> {
        if self.running {
            return Ok(());
        }
        self.running = true;
        debug!("hub loop started");

        while !self.stop.load(Ordering::SeqCst) {
            thread::sleep(self.interval);
            self.tick()?;
        }

        self.stop.store(false, Ordering::SeqCst);
        self.running = false;
        debug!("hub loop stopped");
        Ok(())
    }

    /// One loop iteration: drain input, then flush if the reduction counter
    /// allows it. Public for hosts that drive their own loop.
    pub fn tick(&mut self) -> Result<(), UiError> {
        while let Some(mut event) = self.catcher.poll()? {
            if let Some(index) = self.active {
                let view = &mut self.views[index];
                view.on_new_input(&mut event);
                view.pump();
            }

            if event.is_consumed() {
                continue;
            }

            if event.key.code == KeyCode::Char('c')
                && event.key.modifiers == KeyModifiers::CONTROL
            {
                let allowed = match self.stop_handler.as_mut() {
                    Some(handler) => handler(),
                    None => true,
                };
                if allowed {
                    self.stop.store(true, Ordering::SeqCst);
                }
            } else if let Some(hook) = self.unhandled_key.as_mut() {
                hook(&event);
            }
        }

        self.reduction_counter += 1;
        if self.reduction_counter < self.update_reduction {
            return Ok(());
        }
        self.reduction_counter = 0;

        if let Some(index) = self.active {
            let view = &mut self.views[index];
            view.pump();
            view.draw_buffer(self.console.as_mut())?;
        }
        Ok(())
    }
}

impl Drop for Hub {
    fn drop(&mut self) {
        HUB_ACTIVE.store(false, Ordering::SeqCst);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::CaptureConsole;
    use std::sync::Mutex;

    // The hub registration flag is process-wide; serialize the tests that
    // exercise it.
    static REGISTRY_GATE: Mutex<()> = Mutex::new(());

    fn capture() -> Box<dyn Console> {
        Box::new(CaptureConsole::new())
    }

    #[test]
    fn test_single_registration() {
        let _gate = REGISTRY_GATE.lock().unwrap();

        let hub = Hub::register_with(10, 5, capture()).unwrap();
        assert!(matches!(
            Hub::register_with(10, 5, capture()),
            Err(UiError::HubActive)
        ));

        drop(hub);
        let _hub = Hub::register_with(10, 5, capture()).unwrap();
    }

    #[test]
    fn test_rejects_negative_dimensions() {
        let _gate = REGISTRY_GATE.lock().unwrap();

        assert!(matches!(
            Hub::register_with(-1, 5, capture()),
            Err(UiError::Range { .. })
        ));
        // A failed registration must not leave the flag set.
        let _hub = Hub::register_with(10, 5, capture()).unwrap();
    }

    #[test]
    fn test_view_registry() {
        let _gate = REGISTRY_GATE.lock().unwrap();
        let mut hub = Hub::register_with(10, 5, capture()).unwrap();

        hub.add_view("main").unwrap();
        hub.add_view("settings").unwrap();

        assert!(matches!(
            hub.add_view("main"),
            Err(UiError::DuplicateView { .. })
        ));
        assert!(matches!(
            hub.switch_view("missing"),
            Err(UiError::UnknownView { .. })
        ));

        // First view became active.
        assert_eq!(hub.active_view_mut().unwrap().name(), "main");

        hub.switch_view("settings").unwrap();
        assert_eq!(hub.active_view_mut().unwrap().name(), "settings");

        assert!(hub.view_mut("settings").is_some());
        assert!(hub.view_mut("missing").is_none());
    }

    #[test]
    fn test_pacing_clamps() {
        let _gate = REGISTRY_GATE.lock().unwrap();
        let mut hub = Hub::register_with(10, 5, capture()).unwrap();

        hub.set_main_loop_interval(0);
        assert_eq!(hub.interval, Duration::from_millis(10));

        hub.set_update_reduction(0);
        assert_eq!(hub.update_reduction, 1);
    }

    #[test]
    fn test_stopper_flags_loop() {
        let _gate = REGISTRY_GATE.lock().unwrap();
        let mut hub = Hub::register_with(10, 5, capture()).unwrap();

        let stopper = hub.stopper();
        stopper.stop();
        assert!(hub.stop.load(Ordering::SeqCst));

        hub.stop.store(false, Ordering::SeqCst);
        hub.stop();
        assert!(hub.stop.load(Ordering::SeqCst));
    }
}
