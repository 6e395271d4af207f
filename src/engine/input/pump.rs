// Event pump: window thread -> game loop channel

use super::GameEvent;
use crossbeam_channel::Sender;
use log::debug;
use winit::event::WindowEvent;

/// Forwards platform events into the game loop's event channel
pub struct EventPump {
    sender: Sender<GameEvent>,
    forwarded: u64,
}

impl EventPump {
    /// Create a pump feeding `sender`
    pub fn new(sender: Sender<GameEvent>) -> Self {
        Self {
            sender,
            forwarded: 0,
        }
    }

    /// Translate and forward one window event.
    /// Returns false once the game loop has stopped listening.
    pub fn forward(&mut self, event: &WindowEvent) -> bool {
        self.send(GameEvent::from_window_event(event))
    }

    /// Forward an already translated event
    pub fn send(&mut self, event: GameEvent) -> bool {
        match self.sender.send(event) {
            Ok(()) => {
                self.forwarded += 1;
                true
            }
            Err(err) => {
                debug!("Game loop gone, dropping {:?}", err.into_inner());
                false
            }
        }
    }

    /// Number of events delivered so far
    pub fn forwarded(&self) -> u64 {
        self.forwarded
    }
}
