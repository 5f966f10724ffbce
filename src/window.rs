//! Window and event loop.
//!
//! [`App`] owns the [`SimulationState`], a [`TickClock`] and, once the
//! window exists, the [`Renderer`]. Input events are applied as they arrive;
//! ticks run from `about_to_wait` whenever the clock says they are due, and
//! the loop sleeps until the next deadline in between.

use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::SimConfig;
use crate::error::SimulationError;
use crate::gpu::Renderer;
use crate::hud::INSTRUCTIONS;
use crate::input::InputEvent;
use crate::simulation::SimulationState;
use crate::time::TickClock;

/// Open the window and run until the user quits.
pub fn run(config: SimConfig) -> Result<(), SimulationError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(SimulationState::new(config));
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

pub struct App {
    state: SimulationState,
    clock: TickClock,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    title: String,
    error: Option<SimulationError>,
}

impl App {
    pub fn new(state: SimulationState) -> Self {
        let config = state.config();
        let clock = TickClock::new(config.tick_period()).with_max_catch_up(config.max_catch_up_ticks);
        let title = config.window.title.clone();
        Self {
            state,
            clock,
            window: None,
            renderer: None,
            title,
            error: None,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Fatal error that stopped the event loop, if any.
    pub fn take_error(&mut self) -> Option<SimulationError> {
        self.error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: SimulationError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SimulationError> {
        let settings = &self.state.config().window;
        let attrs = Window::default_attributes()
            .with_title(settings.title.clone())
            .with_inner_size(LogicalSize::new(settings.width.max(1), settings.height.max(1)));

        let window = Arc::new(event_loop.create_window(attrs)?);
        window.set_cursor_visible(false);

        let renderer = pollster::block_on(Renderer::new(window.clone(), &self.state))?;

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.recenter_cursor();
        Ok(())
    }

    /// Window center in physical pixels.
    fn center(&self) -> Option<Vec2> {
        let size = self.window.as_ref()?.inner_size();
        Some(Vec2::new(size.width as f32 / 2.0, size.height as f32 / 2.0))
    }

    fn recenter_cursor(&self) {
        let (Some(window), Some(center)) = (&self.window, self.center()) else {
            return;
        };
        let target = PhysicalPosition::new(center.x as f64, center.y as f64);
        if let Err(e) = window.set_cursor_position(target) {
            log::debug!("cursor warp failed: {}", e);
        }
    }

    fn handle_input(&mut self, event_loop: &ActiveEventLoop, event: InputEvent) {
        self.state.handle_event(event);
        if self.state.quit_requested() {
            log::info!("quit requested");
            event_loop.exit();
        }
    }

    fn run_due_ticks(&mut self, now: Instant) {
        let due = self.clock.due(now);
        for _ in 0..due {
            self.state.tick();
        }
        if due == 0 {
            return;
        }
        if due > 1 {
            log::trace!("caught up {} ticks", due);
        }

        self.refresh_title();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn refresh_title(&mut self) {
        let title = window_title(&self.state.config().window.title, &self.state);
        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }
    }

    fn render(&mut self, event_loop: &ActiveEventLoop) {
        let Some(renderer) = &mut self.renderer else {
            return;
        };
        match renderer.render(&self.state) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            self.fail(event_loop, e);
            return;
        }

        log::info!("\n{}", INSTRUCTIONS);
        self.refresh_title();
        self.clock.reset(Instant::now());
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_tick()));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
                self.recenter_cursor();
            }
            WindowEvent::Focused(true) => self.recenter_cursor(),
            WindowEvent::CursorMoved { position, .. } => {
                let Some(center) = self.center() else {
                    return;
                };
                let position = Vec2::new(position.x as f32, position.y as f32);
                // The warp back to center reports a zero-offset move.
                if position.distance_squared(center) < 0.25 {
                    return;
                }
                self.handle_input(event_loop, InputEvent::pointer(position, center));
                self.recenter_cursor();
            }
            WindowEvent::RedrawRequested => self.render(event_loop),
            other => {
                if let Some(input) = InputEvent::from_window_event(&other) {
                    self.handle_input(event_loop, input);
                }
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.run_due_ticks(Instant::now());
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_tick()));
    }
}

/// Window title for the current state: the base title plus the
/// instructions prompt, or the HUD message flattened onto one line.
pub fn window_title(base: &str, state: &SimulationState) -> String {
    if state.show_instructions() {
        return format!("{base} - click to begin");
    }
    match state.hud_text() {
        Some(text) => format!("{base} - {}", flatten(&text)),
        None if state.is_paused() => format!("{base} - Animation Paused"),
        None => base.to_string(),
    }
}

fn flatten(text: &str) -> String {
    text.lines()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}
