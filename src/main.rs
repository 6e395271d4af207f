use std::sync::Arc;

use anyhow::{Context, Result};
use log::{error, info, warn};
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder, EventLoopWindowTarget},
    window::{Window, WindowBuilder},
};

mod core;
mod engine;
mod game;

use engine::assets::{AssetLoader, AssetType};
use engine::game_loop::LoopHandle;
use engine::input::EventPump;
use engine::renderer::Renderer;
use engine::text::TitleFont;
use game::{GameConfig, Scene, TitleCard};

/// Sent by the game loop thread once it has fully stopped
#[derive(Debug, Clone, Copy)]
struct LoopExited;

fn main() {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(err) = run() {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = GameConfig::default();
    config.validate().context("invalid game configuration")?;

    info!("Starting {}...", config.window_title);

    let event_loop = EventLoopBuilder::<LoopExited>::with_user_event()
        .build()
        .context("could not initialize event loop")?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(&config.window_title)
            .with_inner_size(LogicalSize::new(config.screen_width, config.screen_height))
            .with_resizable(false)
            .build(&event_loop)
            .context("could not create window")?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(
        window.clone(),
        config.screen_width,
        config.screen_height,
    ))
    .context("could not initialize the renderer")?;

    let assets = AssetLoader::new(&config.asset_root);
    let font_bytes = assets
        .load_bytes(AssetType::Font, &config.title_font)
        .with_context(|| format!("could not open font {}", config.title_font))?;
    let font = TitleFont::from_bytes(font_bytes, config.title_font_size, &config.title_font)
        .context("could not parse title font")?;
    let mut titles = TitleCard::new(Box::new(font), config.title_color);

    titles
        .draw(&mut renderer, &config.title_text)
        .context("could not draw title")?;

    let scene =
        Scene::new(&mut renderer, &assets, titles, &config).context("could not create scene")?;

    let (events_tx, events_rx) = crossbeam_channel::unbounded();
    let proxy = event_loop.create_proxy();
    let handle = scene.run(events_rx, renderer, move || {
        // The event loop may already be gone if the window closed first
        let _ = proxy.send_event(LoopExited);
    })?;

    let mut app = App {
        _window: window,
        pump: EventPump::new(events_tx),
        handle: Some(handle),
        outcome: Ok(()),
    };

    event_loop
        .run(|event, elwt| app.handle(event, elwt))
        .context("event loop error")?;

    app.outcome
}

/// Window-thread side of the game: pumps platform events into the loop
/// and waits for it to stop
struct App {
    _window: Arc<Window>,
    pump: EventPump,
    handle: Option<LoopHandle>,
    outcome: Result<()>,
}

impl App {
    fn handle(&mut self, event: Event<LoopExited>, elwt: &EventLoopWindowTarget<LoopExited>) {
        elwt.set_control_flow(ControlFlow::Wait);

        match event {
            Event::WindowEvent { event, .. } => {
                if matches!(event, WindowEvent::CloseRequested) {
                    info!("Close requested, shutting down...");
                }
                if !self.pump.forward(&event) {
                    warn!("Game loop no longer accepts events");
                }
            }
            Event::UserEvent(LoopExited) => {
                if let Some(handle) = self.handle.take() {
                    self.outcome = handle.wait();
                }
                info!("Forwarded {} events", self.pump.forwarded());
                elwt.exit();
            }
            _ => {}
        }
    }
}
