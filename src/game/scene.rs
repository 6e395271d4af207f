// The game scene: background, bird and pipe, driven by the game loop

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use log::{debug, info, trace};

use super::bird::Bird;
use super::config::GameConfig;
use super::pipe::Pipe;
use super::title::TitleCard;
use crate::engine::assets::{AssetLoader, AssetType};
use crate::engine::game_loop::{Flow, GameLoop, LoopContext, LoopHandle, LoopScene};
use crate::engine::input::GameEvent;
use crate::engine::renderer::{Canvas, Flip, TextureHandle};

/// Everything on screen during play.
///
/// The scene is owned by the game loop thread while it runs; input reaches
/// it only as [`GameEvent`]s through the loop's channel.
pub struct Scene {
    config: GameConfig,
    background: TextureHandle,
    bird: Bird,
    pipe: Pipe,
    titles: TitleCard,
}

impl Scene {
    /// Load every texture the scene needs
    pub fn new<C: Canvas>(
        canvas: &mut C,
        assets: &AssetLoader,
        titles: TitleCard,
        config: &GameConfig,
    ) -> Result<Self> {
        let background_path = assets.resolve_path(AssetType::Image, &config.background_image);
        let background = canvas
            .load_texture(&background_path)
            .with_context(|| format!("could not load background {}", background_path.display()))?;

        let bird = Bird::new(canvas, assets, &config.bird, config.screen_height)
            .context("could not initialize bird")?;

        let pipe = Pipe::new(
            canvas,
            assets,
            &config.pipe_image,
            &config.pipe,
            config.screen_width,
            config.screen_height,
        )
        .context("could not initialize pipe")?;

        info!("Scene ready");

        Ok(Self {
            config: config.clone(),
            background,
            bird,
            pipe,
            titles,
        })
    }

    /// Hand the scene to a game loop thread.
    ///
    /// The loop first keeps the title screen up for the configured time,
    /// then ticks until a quit event or a render failure.
    pub fn run<C, F>(
        self,
        events: Receiver<GameEvent>,
        canvas: C,
        on_exit: F,
    ) -> Result<LoopHandle>
    where
        C: Canvas + Send + 'static,
        F: FnOnce() + Send + 'static,
    {
        GameLoop::new(self.config.tick_period)
            .with_startup_hold(self.config.title_duration)
            .spawn(self, canvas, events, on_exit)
    }

    /// Put the bird and the pipe back where they started
    pub fn restart(&mut self) {
        self.bird.restart();
        self.pipe.restart();
    }

    /// Compose and present one frame
    pub fn paint<C: Canvas>(&self, canvas: &mut C) -> Result<()> {
        canvas.clear();

        canvas
            .copy(self.background, None, Flip::None)
            .context("could not copy background")?;
        self.bird.paint(canvas).context("could not paint bird")?;
        self.pipe.paint(canvas).context("could not paint pipe")?;

        canvas.present().context("could not present frame")?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn bird(&self) -> &Bird {
        &self.bird
    }

    #[cfg(test)]
    pub(crate) fn pipe(&self) -> &Pipe {
        &self.pipe
    }

    #[cfg(test)]
    pub(crate) fn bird_mut(&mut self) -> &mut Bird {
        &mut self.bird
    }
}

impl<C: Canvas> LoopScene<C> for Scene {
    fn handle_event(&mut self, event: GameEvent) -> Flow {
        match event {
            GameEvent::Quit => {
                info!("Quit requested");
                return Flow::Quit;
            }
            GameEvent::KeyDown { key, repeat } => {
                debug!("Key down: {:?} (repeat: {})", key, repeat);
                self.bird.jump();
            }
            GameEvent::KeyUp { key } => debug!("Key up: {:?}", key),
            GameEvent::Pointer | GameEvent::Window | GameEvent::Touch => {
                trace!("Ignoring {:?}", event);
            }
            GameEvent::Other(name) => info!("Unknown event: {}", name),
        }
        Flow::Continue
    }

    fn update(&mut self, canvas: &mut C, ctx: &mut LoopContext) -> Result<Flow> {
        self.bird.update();
        self.pipe.update();
        self.bird.touch(&self.pipe);

        if self.bird.is_dead() {
            info!(
                "Game over after {} ticks (bird at y={:.1}, pipe at x={})",
                ctx.ticks(),
                self.bird.y(),
                self.pipe.x()
            );
            self.titles
                .draw(canvas, &self.config.game_over_text)
                .context("could not draw game over title")?;
            if ctx.hold(self.config.game_over_pause) == Flow::Quit {
                return Ok(Flow::Quit);
            }
            self.restart();
        }

        self.paint(canvas)?;
        Ok(Flow::Continue)
    }

    fn destroy(self, canvas: &mut C) {
        canvas.destroy_texture(self.background);
        self.bird.destroy(canvas);
        self.pipe.destroy(canvas);
        self.titles.destroy(canvas);
        debug!("Scene destroyed");
    }
}
