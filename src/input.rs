//! Input events and held-input state.
//!
//! The window layer turns raw winit events into [`InputEvent`]s; the
//! simulation feeds them to [`Input`] to track what is held down and maps
//! key presses to [`Command`]s.
//!
//! ```
//! use particle_box::input::{Input, InputEvent, KeyCode, MouseButton};
//! use particle_box::motion::Force;
//!
//! let mut input = Input::new();
//! input.handle_event(&InputEvent::KeyDown(KeyCode::W));
//! input.handle_event(&InputEvent::ButtonDown(MouseButton::Right));
//!
//! assert!(input.movement().forward);
//! assert_eq!(input.force(), Some(Force::Repel));
//! ```

use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::camera::Movement;
use crate::motion::Force;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

impl From<WinitMouseButton> for MouseButton {
    fn from(btn: WinitMouseButton) -> Self {
        match btn {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

/// The two mouse buttons that push particles around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForceButton {
    Attract,
    Repel,
}

impl ForceButton {
    /// Primary button attracts, secondary repels, others do nothing.
    pub fn from_mouse(button: MouseButton) -> Option<Self> {
        match button {
            MouseButton::Left => Some(ForceButton::Attract),
            MouseButton::Right => Some(ForceButton::Repel),
            _ => None,
        }
    }
}

/// Keys the simulation reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    W,
    A,
    S,
    D,
    G,
    M,
    N,
    Q,
    R,
    Up,
    Down,
    Space,
    Escape,
    /// `=` / `+` on the main row.
    Equal,
    Minus,
    NumpadAdd,
    NumpadSubtract,
    Other(u32),
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::KeyW => KeyCode::W,
            WinitKeyCode::KeyA => KeyCode::A,
            WinitKeyCode::KeyS => KeyCode::S,
            WinitKeyCode::KeyD => KeyCode::D,
            WinitKeyCode::KeyG => KeyCode::G,
            WinitKeyCode::KeyM => KeyCode::M,
            WinitKeyCode::KeyN => KeyCode::N,
            WinitKeyCode::KeyQ => KeyCode::Q,
            WinitKeyCode::KeyR => KeyCode::R,
            WinitKeyCode::ArrowUp => KeyCode::Up,
            WinitKeyCode::ArrowDown => KeyCode::Down,
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Escape => KeyCode::Escape,
            WinitKeyCode::Equal => KeyCode::Equal,
            WinitKeyCode::Minus => KeyCode::Minus,
            WinitKeyCode::NumpadAdd => KeyCode::NumpadAdd,
            WinitKeyCode::NumpadSubtract => KeyCode::NumpadSubtract,
            _ => KeyCode::Other(key as u32),
        }
    }
}

/// One-shot actions triggered by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    TogglePause,
    Quit,
    /// Clear the collection and launch a full-size burst.
    Regenerate,
    /// Launch a small additive burst.
    SpawnBatch,
    /// Add one particle at the look-at point.
    SpawnOne,
    /// Remove the particle nearest the look-at point.
    DespawnNearest,
    RangeUp,
    RangeDown,
    SpeedUp,
    SpeedDown,
}

impl Command {
    /// Command bound to `key`, if any. Movement keys are held state, not
    /// commands.
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Space => Some(Command::TogglePause),
            KeyCode::Q | KeyCode::Escape => Some(Command::Quit),
            KeyCode::R => Some(Command::Regenerate),
            KeyCode::G => Some(Command::SpawnBatch),
            KeyCode::N => Some(Command::SpawnOne),
            KeyCode::M => Some(Command::DespawnNearest),
            KeyCode::Equal | KeyCode::NumpadAdd => Some(Command::RangeUp),
            KeyCode::Minus | KeyCode::NumpadSubtract => Some(Command::RangeDown),
            KeyCode::Up => Some(Command::SpeedUp),
            KeyCode::Down => Some(Command::SpeedDown),
            _ => None,
        }
    }

    /// Commands that still work while the animation is paused.
    pub fn allowed_while_paused(self) -> bool {
        matches!(self, Command::TogglePause | Command::Quit)
    }
}

/// A discrete input event, already stripped of windowing details.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    /// Pointer offset from the recentering point, in pixels.
    PointerMoved { dx: f32, dy: f32 },
}

impl InputEvent {
    /// Translate keyboard and mouse-button window events.
    ///
    /// Key auto-repeat is dropped so holding a key fires its command once.
    /// Pointer motion is handled by the window, which knows the recentering
    /// point.
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return None;
                };
                let key = KeyCode::from(code);
                match event.state {
                    ElementState::Pressed if event.repeat => None,
                    ElementState::Pressed => Some(InputEvent::KeyDown(key)),
                    ElementState::Released => Some(InputEvent::KeyUp(key)),
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = MouseButton::from(*button);
                Some(match state {
                    ElementState::Pressed => InputEvent::ButtonDown(button),
                    ElementState::Released => InputEvent::ButtonUp(button),
                })
            }
            _ => None,
        }
    }

    /// Pointer event for a cursor at `position` relative to `center`.
    pub fn pointer(position: Vec2, center: Vec2) -> Self {
        let delta = position - center;
        InputEvent::PointerMoved {
            dx: delta.x,
            dy: delta.y,
        }
    }
}

/// Held keys and force buttons.
#[derive(Debug, Default, Clone)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    forces_held: HashSet<ForceButton>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update held state. Returns the command bound to a newly pressed key.
    pub fn handle_event(&mut self, event: &InputEvent) -> Option<Command> {
        match *event {
            InputEvent::KeyDown(key) => {
                self.keys_held.insert(key);
                Command::from_key(key)
            }
            InputEvent::KeyUp(key) => {
                self.keys_held.remove(&key);
                None
            }
            InputEvent::ButtonDown(button) => {
                if let Some(force) = ForceButton::from_mouse(button) {
                    self.forces_held.insert(force);
                }
                None
            }
            InputEvent::ButtonUp(button) => {
                if let Some(force) = ForceButton::from_mouse(button) {
                    self.forces_held.remove(&force);
                }
                None
            }
            InputEvent::PointerMoved { .. } => None,
        }
    }

    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn force_held(&self, button: ForceButton) -> bool {
        self.forces_held.contains(&button)
    }

    /// Movement flags from the held W/S/A/D keys.
    pub fn movement(&self) -> Movement {
        Movement {
            forward: self.key_held(KeyCode::W),
            backward: self.key_held(KeyCode::S),
            left: self.key_held(KeyCode::A),
            right: self.key_held(KeyCode::D),
        }
    }

    /// Active force. Attract wins when both buttons are held.
    pub fn force(&self) -> Option<Force> {
        if self.force_held(ForceButton::Attract) {
            Some(Force::Attract)
        } else if self.force_held(ForceButton::Repel) {
            Some(Force::Repel)
        } else {
            None
        }
    }
}
