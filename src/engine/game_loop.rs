/// Game loop timing and control system
///
/// Runs a scene on a dedicated thread. The loop waits on two sources at
/// once: the event channel fed by the window thread, and a fixed-period
/// tick timer. Whichever is ready first is handled; when both are ready
/// the pick is arbitrary. All scene mutation happens on this one thread.
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossbeam_channel::{select, Receiver};
use log::{debug, info};

use crate::engine::input::GameEvent;
use crate::engine::renderer::Canvas;

/// Whether the loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A scene driven by [`GameLoop`]
pub trait LoopScene<C: Canvas> {
    /// React to one input event
    fn handle_event(&mut self, event: GameEvent) -> Flow;

    /// Advance one tick and draw the result
    fn update(&mut self, canvas: &mut C, ctx: &mut LoopContext) -> Result<Flow>;

    /// Release every resource the scene holds
    fn destroy(self, canvas: &mut C);
}

/// Per-loop state handed to the scene on each tick
pub struct LoopContext {
    events: Receiver<GameEvent>,
    ticks: u64,
    events_handled: u64,
}

impl LoopContext {
    /// Create a context reading from `events`
    pub fn new(events: Receiver<GameEvent>) -> Self {
        Self {
            events,
            ticks: 0,
            events_handled: 0,
        }
    }

    /// Block for `duration` while draining input.
    ///
    /// Input that arrives meanwhile is discarded. A quit event, or the
    /// event source going away, cuts the hold short with [`Flow::Quit`].
    pub fn hold(&mut self, duration: Duration) -> Flow {
        let deadline = crossbeam_channel::after(duration);
        loop {
            select! {
                recv(self.events) -> msg => match msg {
                    Ok(GameEvent::Quit) | Err(_) => return Flow::Quit,
                    Ok(event) => debug!("Discarding {:?} during hold", event),
                },
                recv(deadline) -> _ => return Flow::Continue,
            }
        }
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Events handled so far (not counting those discarded by holds)
    pub fn events_handled(&self) -> u64 {
        self.events_handled
    }
}

/// Handle to a running loop thread
pub struct LoopHandle {
    errors: Receiver<anyhow::Error>,
    thread: JoinHandle<()>,
}

impl LoopHandle {
    /// Carries at most one error, then closes when the loop has stopped
    pub fn errors(&self) -> &Receiver<anyhow::Error> {
        &self.errors
    }

    /// Wait for the loop thread to finish and return the error it stopped
    /// with, if any
    pub fn wait(self) -> Result<()> {
        self.thread
            .join()
            .map_err(|_| anyhow!("game loop thread panicked"))?;
        match self.errors.try_recv() {
            Ok(err) => Err(err),
            Err(_) => Ok(()),
        }
    }
}

/// Runs the wrapped callback when dropped, so it also fires while a
/// panicking loop thread unwinds
struct ExitGuard<F: FnOnce()>(Option<F>);

impl<F: FnOnce()> Drop for ExitGuard<F> {
    fn drop(&mut self) {
        if let Some(on_exit) = self.0.take() {
            on_exit();
        }
    }
}

/// Fixed-tick loop configuration
#[derive(Debug, Clone, Copy)]
pub struct GameLoop {
    /// Time between two updates
    tick_period: Duration,
    /// Input-draining pause before the first tick (title screen)
    startup_hold: Duration,
}

impl GameLoop {
    /// Create a loop ticking every `tick_period`
    pub fn new(tick_period: Duration) -> Self {
        Self {
            tick_period,
            startup_hold: Duration::ZERO,
        }
    }

    /// Hold for `duration` before the first tick
    pub fn with_startup_hold(mut self, duration: Duration) -> Self {
        self.startup_hold = duration;
        self
    }

    /// Run `scene` on a new thread.
    ///
    /// When the loop stops the scene is destroyed on the loop thread, any
    /// error is sent on the error channel, the channel closes, and only
    /// then is `on_exit` called. `on_exit` runs even if the thread panics;
    /// [`LoopHandle::wait`] then reports the panic.
    pub fn spawn<S, C, F>(
        self,
        mut scene: S,
        mut canvas: C,
        events: Receiver<GameEvent>,
        on_exit: F,
    ) -> Result<LoopHandle>
    where
        S: LoopScene<C> + Send + 'static,
        C: Canvas + Send + 'static,
        F: FnOnce() + Send + 'static,
    {
        let (error_tx, errors) = crossbeam_channel::bounded(1);

        let thread = thread::Builder::new()
            .name("game-loop".to_string())
            .spawn(move || {
                let exit_guard = ExitGuard(Some(on_exit));
                let mut ctx = LoopContext::new(events);
                let result = self.run(&mut scene, &mut canvas, &mut ctx);
                info!(
                    "Game loop stopped after {} ticks and {} events",
                    ctx.ticks(),
                    ctx.events_handled()
                );

                scene.destroy(&mut canvas);
                drop(canvas);

                if let Err(err) = result {
                    let _ = error_tx.send(err);
                }
                drop(error_tx);
                drop(exit_guard);
            })?;

        Ok(LoopHandle { errors, thread })
    }

    fn run<S, C>(&self, scene: &mut S, canvas: &mut C, ctx: &mut LoopContext) -> Result<()>
    where
        S: LoopScene<C>,
        C: Canvas,
    {
        if ctx.hold(self.startup_hold) == Flow::Quit {
            return Ok(());
        }

        info!("Game loop started ({:?} per tick)", self.tick_period);
        let events = ctx.events.clone();
        let ticker = crossbeam_channel::tick(self.tick_period);

        loop {
            select! {
                recv(events) -> msg => {
                    let Ok(event) = msg else {
                        info!("Event source closed");
                        return Ok(());
                    };
                    ctx.events_handled += 1;
                    if scene.handle_event(event) == Flow::Quit {
                        return Ok(());
                    }
                }
                recv(ticker) -> _ => {
                    ctx.ticks += 1;
                    if scene.update(canvas, ctx)? == Flow::Quit {
                        return Ok(());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::testing::RecordingCanvas;
    use crossbeam_channel::RecvTimeoutError;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::Arc;

    const WAIT: Duration = Duration::from_secs(5);

    /// Scene that counts calls and can be told to fail
    #[derive(Default)]
    struct CountingScene {
        updates: Arc<AtomicU64>,
        jumps: Arc<AtomicU64>,
        destroyed: Arc<AtomicBool>,
        fail_after: Option<u64>,
    }

    impl LoopScene<RecordingCanvas> for CountingScene {
        fn handle_event(&mut self, event: GameEvent) -> Flow {
            match event {
                GameEvent::Quit => Flow::Quit,
                GameEvent::KeyDown { .. } => {
                    self.jumps.fetch_add(1, Ordering::SeqCst);
                    Flow::Continue
                }
                _ => Flow::Continue,
            }
        }

        fn update(&mut self, _canvas: &mut RecordingCanvas, ctx: &mut LoopContext) -> Result<Flow> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            match self.fail_after {
                Some(n) if ctx.ticks() >= n => Err(anyhow!("render failed")),
                _ => Ok(Flow::Continue),
            }
        }

        fn destroy(self, _canvas: &mut RecordingCanvas) {
            self.destroyed.store(true, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_quit_closes_error_channel_without_error() {
        let scene = CountingScene::default();
        let destroyed = scene.destroyed.clone();
        let (tx, rx) = crossbeam_channel::unbounded();

        let handle = GameLoop::new(Duration::from_millis(10))
            .spawn(scene, RecordingCanvas::new(), rx, || {})
            .unwrap();
        tx.send(GameEvent::Quit).unwrap();

        assert!(matches!(
            handle.errors().recv_timeout(WAIT),
            Err(RecvTimeoutError::Disconnected)
        ));
        assert!(handle.wait().is_ok());
        assert!(destroyed.load(Ordering::SeqCst));
    }

    #[test]
    fn test_update_error_is_forwarded_once() {
        let scene = CountingScene {
            fail_after: Some(3),
            ..Default::default()
        };
        let updates = scene.updates.clone();
        let (_tx, rx) = crossbeam_channel::unbounded();

        let handle = GameLoop::new(Duration::from_millis(1))
            .spawn(scene, RecordingCanvas::new(), rx, || {})
            .unwrap();

        let err = handle.errors().recv_timeout(WAIT).unwrap();
        assert_eq!(err.to_string(), "render failed");
        assert!(matches!(
            handle.errors().recv_timeout(WAIT),
            Err(RecvTimeoutError::Disconnected)
        ));
        assert_eq!(updates.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_wait_returns_forwarded_error() {
        let scene = CountingScene {
            fail_after: Some(1),
            ..Default::default()
        };
        let (_tx, rx) = crossbeam_channel::unbounded();

        let handle = GameLoop::new(Duration::from_millis(1))
            .spawn(scene, RecordingCanvas::new(), rx, || {})
            .unwrap();

        let err = handle.wait().unwrap_err();
        assert_eq!(err.to_string(), "render failed");
    }

    #[test]
    fn test_closed_event_source_stops_loop() {
        let scene = CountingScene::default();
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(tx);

        let handle = GameLoop::new(Duration::from_millis(10))
            .spawn(scene, RecordingCanvas::new(), rx, || {})
            .unwrap();
        assert!(handle.wait().is_ok());
    }

    #[test]
    fn test_on_exit_runs_after_channel_closes() {
        let scene = CountingScene::default();
        let (tx, rx) = crossbeam_channel::unbounded();
        let (exit_tx, exit_rx) = crossbeam_channel::bounded(1);

        let handle = GameLoop::new(Duration::from_millis(10))
            .spawn(scene, RecordingCanvas::new(), rx, move || {
                let _ = exit_tx.send(());
            })
            .unwrap();
        tx.send(GameEvent::Quit).unwrap();

        exit_rx.recv_timeout(WAIT).unwrap();
        assert!(handle.errors().try_recv().is_err());
        assert!(handle.wait().is_ok());
    }

    /// Scene whose first tick panics
    struct PanickingScene;

    impl LoopScene<RecordingCanvas> for PanickingScene {
        fn handle_event(&mut self, _event: GameEvent) -> Flow {
            Flow::Continue
        }

        fn update(&mut self, _canvas: &mut RecordingCanvas, _ctx: &mut LoopContext) -> Result<Flow> {
            panic!("scene exploded");
        }

        fn destroy(self, _canvas: &mut RecordingCanvas) {}
    }

    #[test]
    fn test_on_exit_runs_when_scene_panics() {
        let (_tx, rx) = crossbeam_channel::unbounded();
        let (exit_tx, exit_rx) = crossbeam_channel::bounded(1);

        let handle = GameLoop::new(Duration::from_millis(1))
            .spawn(PanickingScene, RecordingCanvas::new(), rx, move || {
                let _ = exit_tx.send(());
            })
            .unwrap();

        exit_rx.recv_timeout(WAIT).unwrap();
        let err = handle.wait().unwrap_err();
        assert_eq!(err.to_string(), "game loop thread panicked");
    }

    #[test]
    fn test_key_events_reach_scene() {
        let scene = CountingScene::default();
        let jumps = scene.jumps.clone();
        let (tx, rx) = crossbeam_channel::unbounded();

        let handle = GameLoop::new(Duration::from_millis(10))
            .spawn(scene, RecordingCanvas::new(), rx, || {})
            .unwrap();
        tx.send(GameEvent::KeyDown {
            key: None,
            repeat: false,
        })
        .unwrap();
        tx.send(GameEvent::Pointer).unwrap();
        tx.send(GameEvent::Quit).unwrap();

        assert!(handle.wait().is_ok());
        assert_eq!(jumps.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_hold_discards_input_until_deadline() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut ctx = LoopContext::new(rx.clone());
        tx.send(GameEvent::KeyDown {
            key: None,
            repeat: false,
        })
        .unwrap();
        tx.send(GameEvent::Pointer).unwrap();

        assert_eq!(ctx.hold(Duration::from_millis(20)), Flow::Continue);
        assert!(rx.is_empty());
    }

    #[test]
    fn test_hold_ends_early_on_quit() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut ctx = LoopContext::new(rx);
        tx.send(GameEvent::Quit).unwrap();

        assert_eq!(ctx.hold(WAIT), Flow::Quit);
    }

    #[test]
    fn test_quit_during_startup_hold_skips_loop() {
        let scene = CountingScene::default();
        let updates = scene.updates.clone();
        let (tx, rx) = crossbeam_channel::unbounded();
        tx.send(GameEvent::Quit).unwrap();

        let handle = GameLoop::new(Duration::from_millis(1))
            .with_startup_hold(WAIT)
            .spawn(scene, RecordingCanvas::new(), rx, || {})
            .unwrap();

        assert!(handle.wait().is_ok());
        assert_eq!(updates.load(Ordering::SeqCst), 0);
    }
}
