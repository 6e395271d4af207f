// Input handling system
//
// Platform events arrive on the windowing thread. They are translated into
// `GameEvent`s and pushed through a channel to the game loop thread, which
// is the only place game state changes.
//
// ## Architecture
//
// - `event`: Platform-independent event type and translation from winit
// - `pump`: Forwards translated events from the window thread into the loop

pub mod event;
pub mod pump;

// Re-export commonly used types
pub use event::GameEvent;
pub use pump::EventPump;
