// Engine modules: assets, input, physics, renderer, text, game loop

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
pub mod text;
