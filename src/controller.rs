use crate::{
    config::AppConfig,
    fps::FrameRateSampler,
    game::{
        Chamber,
        FireOutcome,
        GameState,
        Phase,
    },
    spin::{
        SpinAnimator,
        SpinConfig,
        SpinStep,
    },
    timer::{
        SpinTimer,
        TimerEvent,
    },
};
use itertools::Itertools;
use rand::{
    Rng,
    SeedableRng,
    rngs::StdRng,
};
use std::time::Instant;
use tracing::{
    debug,
    info,
};

/// Everything the UI needs to paint one frame.
#[derive(Clone, Debug)]
pub struct AppSnapshot {
    pub game: GameState,
    pub phase: Phase,
    pub fps: Option<f64>,
    pub status: String,
}

/// Owns the game record, the spin animator and the timer driving it. Every
/// mutating call is followed by a redraw from the caller.
pub struct AppController<R = StdRng> {
    game: GameState,
    animator: SpinAnimator,
    timer: SpinTimer,
    rng: R,
    fps: Option<FrameRateSampler>,
    status: String,
}

impl AppController<StdRng> {
    pub fn new(config: &AppConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut controller = Self::with_rng(config.spin, rng);
        if config.show_fps {
            controller.fps = Some(FrameRateSampler::new(Instant::now()));
        }
        controller
    }
}

impl<R: Rng> AppController<R> {
    pub fn with_rng(spin: SpinConfig, rng: R) -> Self {
        AppController {
            game: GameState::default(),
            animator: SpinAnimator::new(spin),
            timer: SpinTimer::new(spin.tick),
            rng,
            fps: None,
            status: status_for(&GameState::default()),
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn timer_active(&self) -> bool {
        self.timer.is_active()
    }

    pub fn start_game(&mut self) -> bool {
        if !self.game.start_game() {
            debug!(phase = %self.game.phase(), "start ignored");
            return false;
        }
        info!("game started, loading bullet");
        self.timer.schedule_load(self.animator.config().load_delay);
        self.refresh_status();
        true
    }

    pub fn fire_gun(&mut self) -> FireOutcome {
        let outcome = self.game.fire_gun();
        match outcome {
            FireOutcome::Ignored => debug!(phase = %self.game.phase(), "fire ignored"),
            FireOutcome::Safe(chamber) => info!(%chamber, "chamber was empty"),
            FireOutcome::Fatal(chamber) => info!(%chamber, "bullet fired, game over"),
        }
        self.refresh_status();
        outcome
    }

    pub fn reset_game(&mut self) {
        self.timer.cancel();
        self.game.reset_game();
        self.animator.reset();
        info!("game reset");
        self.refresh_status();
    }

    pub async fn next_timer_event(&mut self) -> TimerEvent {
        self.timer.next().await
    }

    pub fn handle_timer_event(&mut self, event: TimerEvent) -> SpinStep {
        let step = match event {
            TimerEvent::LoadElapsed => {
                if self.animator.begin(&mut self.game) {
                    self.timer.start_ticking();
                    SpinStep::Started
                } else {
                    SpinStep::Idle
                }
            }
            TimerEvent::Tick(dt) => {
                self.animator.advance(&mut self.game, dt, &mut self.rng)
            }
        };
        if matches!(step, SpinStep::Finished { .. } | SpinStep::Idle) {
            self.timer.cancel();
        }
        self.refresh_status();
        step
    }

    /// Returns `true` when the frame-rate readout changed.
    pub fn record_frame(&mut self, now: Instant) -> bool {
        self.fps
            .as_mut()
            .and_then(|sampler| sampler.record_frame(now))
            .is_some()
    }

    pub fn shutdown(&mut self) {
        self.timer.cancel();
        debug!("controller torn down");
    }

    pub fn snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            game: self.game.clone(),
            phase: self.game.phase(),
            fps: self.fps.as_ref().map(FrameRateSampler::rate),
            status: self.status.clone(),
        }
    }

    fn refresh_status(&mut self) {
        self.status = status_for(&self.game);
    }
}

fn status_for(game: &GameState) -> String {
    match game.phase() {
        Phase::Idle => String::from("Press Start to load the cylinder"),
        Phase::Loading => String::from("Loading the bullet..."),
        Phase::Spinning => String::from("Spinning..."),
        Phase::Ready if game.tried_safe_chambers().is_empty() => {
            format!("Ready. Next chamber: {}", game.current_chamber())
        }
        Phase::Ready => format!(
            "Safe: {} | Next chamber: {}",
            game.tried_safe_chambers().iter().join(", "),
            game.current_chamber()
        ),
        Phase::GameOver => format!(
            "Bang! The bullet was in chamber {}",
            game.bullet_chamber().map(Chamber::label).unwrap_or_default()
        ),
    }
}
