// Game events and their translation from winit window events

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Events the game loop understands
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The user asked to close the game
    Quit,
    /// A key went down (auto-repeats included)
    KeyDown { key: Option<KeyCode>, repeat: bool },
    /// A key was released
    KeyUp { key: Option<KeyCode> },
    /// Mouse movement, buttons or wheel
    Pointer,
    /// Window housekeeping: resize, move, focus, redraw...
    Window,
    /// Touch screen input
    Touch,
    /// Anything else, by variant name
    Other(String),
}

impl GameEvent {
    /// Translate a winit window event
    pub fn from_window_event(event: &WindowEvent) -> Self {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => GameEvent::Quit,
            WindowEvent::KeyboardInput { event, .. } => {
                Self::key(event.state, event.physical_key, event.repeat)
            }
            WindowEvent::CursorMoved { .. }
            | WindowEvent::CursorEntered { .. }
            | WindowEvent::CursorLeft { .. }
            | WindowEvent::MouseInput { .. }
            | WindowEvent::MouseWheel { .. } => GameEvent::Pointer,
            WindowEvent::Touch(_) => GameEvent::Touch,
            WindowEvent::Resized(_)
            | WindowEvent::Moved(_)
            | WindowEvent::Focused(_)
            | WindowEvent::Occluded(_)
            | WindowEvent::ScaleFactorChanged { .. }
            | WindowEvent::ThemeChanged(_)
            | WindowEvent::RedrawRequested => GameEvent::Window,
            other => GameEvent::Other(variant_name(other)),
        }
    }

    /// Translate a keyboard state change
    pub fn key(state: ElementState, key: PhysicalKey, repeat: bool) -> Self {
        let key = match key {
            PhysicalKey::Code(code) => Some(code),
            PhysicalKey::Unidentified(_) => None,
        };
        match state {
            ElementState::Pressed => GameEvent::KeyDown { key, repeat },
            ElementState::Released => GameEvent::KeyUp { key },
        }
    }
}

/// Name of an enum variant taken from its `Debug` output
fn variant_name<T: std::fmt::Debug>(value: &T) -> String {
    let debug = format!("{:?}", value);
    debug
        .split(|c: char| c == '(' || c == '{' || c.is_whitespace())
        .next()
        .unwrap_or_default()
        .to_string()
}
