// Game layer: the flappy bird scene and everything in it
//
// - `config`: Tuning constants
// - `animation`: Tick-driven frame selection
// - `bird`: The player
// - `pipe`: The obstacle
// - `title`: Full-screen text cards
// - `scene`: Ties it together and plugs into the game loop

pub mod animation;
pub mod bird;
pub mod config;
pub mod pipe;
pub mod scene;
pub mod title;

pub use config::GameConfig;
pub use scene::Scene;
pub use title::TitleCard;
