//! Time-driven spin of the cylinder.
//!
//! The spin speed follows a single half-sine: zero at the start, peak at the
//! midpoint, zero again at the end. The angle is integrated tick by tick. The
//! bullet chamber is drawn uniformly once the spin ends and has nothing to do
//! with where the cylinder stopped.

use crate::game::{
    Chamber,
    GameState,
};
use rand::Rng;
use std::{
    f64::consts::PI,
    time::Duration,
};
use tracing::{
    debug,
    info,
};

pub const LOAD_DELAY: Duration = Duration::from_millis(1000);
pub const SPIN_DURATION: Duration = Duration::from_millis(2500);
pub const SPIN_TICK: Duration = Duration::from_millis(16);
/// Radians per nominal tick at the peak of the spin.
pub const MAX_SPIN_SPEED: f64 = 0.3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpinConfig {
    pub load_delay: Duration,
    pub duration: Duration,
    pub tick: Duration,
    pub max_speed: f64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        SpinConfig {
            load_delay: LOAD_DELAY,
            duration: SPIN_DURATION,
            tick: SPIN_TICK,
            max_speed: MAX_SPIN_SPEED,
        }
    }
}

impl SpinConfig {
    /// Angular speed in radians per tick after `elapsed` of spinning.
    pub fn speed_at(&self, elapsed: Duration) -> f64 {
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.max_speed * (PI * progress).sin()
    }

    /// Ticks needed to cover the spin when every tick arrives on time.
    pub fn nominal_ticks(&self) -> u32 {
        let duration = self.duration.as_nanos();
        let tick = self.tick.as_nanos().max(1);
        duration.div_ceil(tick) as u32
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SpinStep {
    /// No spin in progress.
    Idle,
    /// Loading delay over, ticking begins.
    Started,
    Rotated(f64),
    Finished { bullet: Chamber },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpinAnimator {
    config: SpinConfig,
    elapsed: Duration,
}

impl SpinAnimator {
    pub fn new(config: SpinConfig) -> Self {
        SpinAnimator {
            config,
            elapsed: Duration::ZERO,
        }
    }

    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Starts the spin phase once the loading delay is over.
    pub fn begin(&mut self, state: &mut GameState) -> bool {
        if !state.begin_spin() {
            return false;
        }
        self.elapsed = Duration::ZERO;
        info!(duration_ms = self.config.duration.as_millis() as u64, "spin started");
        true
    }

    /// Advances by one nominal tick.
    pub fn tick<R: Rng + ?Sized>(&mut self, state: &mut GameState, rng: &mut R) -> SpinStep {
        let tick = self.config.tick;
        self.advance(state, tick, rng)
    }

    /// Advances by `dt` of measured time. A late tick covers more angle and
    /// more of the spin, so the spin always ends on the first tick at or past
    /// the configured duration.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        state: &mut GameState,
        dt: Duration,
        rng: &mut R,
    ) -> SpinStep {
        if !state.is_spinning() {
            return SpinStep::Idle;
        }
        let scale = dt.as_secs_f64() / self.config.tick.as_secs_f64();
        let delta = self.config.speed_at(self.elapsed) * scale;
        state.rotate(delta);
        self.elapsed += dt;

        if self.elapsed < self.config.duration {
            return SpinStep::Rotated(delta);
        }

        let bullet = Chamber::random(rng);
        state.resolve_spin(bullet);
        debug!(
            elapsed_ms = self.elapsed.as_millis() as u64,
            angle = state.rotation_angle(),
            "spin finished"
        );
        info!("bullet chamber resolved");
        SpinStep::Finished { bullet }
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use super::*;
    use crate::game::Phase;
    use rand::{
        SeedableRng,
        rngs::StdRng,
    };

    fn spinning_state() -> GameState {
        let mut state = GameState::default();
        state.start_game();
        state
    }

    #[test]
    fn speed_at__is_half_sine_over_the_duration() {
        let config = SpinConfig::default();

        assert_eq!(config.speed_at(Duration::ZERO), 0.0);
        let peak = config.speed_at(config.duration / 2);
        assert!((peak - MAX_SPIN_SPEED).abs() < 1e-12);
        assert!(config.speed_at(config.duration).abs() < 1e-12);
        assert!(config.speed_at(Duration::from_millis(500)) < peak);
        assert!(config.speed_at(Duration::from_millis(2000)) < peak);
    }

    #[test]
    fn nominal_ticks__rounds_up_partial_tick() {
        assert_eq!(SpinConfig::default().nominal_ticks(), 157);
    }

    #[test]
    fn sut__when_ticking_full_spin_then_stops_within_one_tick_of_duration() {
        // given
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = spinning_state();
        let mut sut = SpinAnimator::new(SpinConfig::default());
        assert!(sut.begin(&mut state));

        // when
        let mut ticks = 0;
        let mut net = 0.0;
        let bullet = loop {
            ticks += 1;
            match sut.tick(&mut state, &mut rng) {
                SpinStep::Rotated(delta) => net += delta,
                SpinStep::Finished { bullet } => break bullet,
                SpinStep::Idle | SpinStep::Started => panic!("spin stopped early"),
            }
            assert!(ticks < 1_000, "spin never finished");
        };

        // then
        let config = sut.config();
        assert_eq!(ticks, config.nominal_ticks());
        assert!(sut.elapsed() >= config.duration);
        assert!(sut.elapsed() < config.duration + config.tick);
        assert!(net > 0.0);
        assert!(state.rotation_angle() >= net);
        assert_eq!(state.bullet_chamber(), Some(bullet));
        assert!(state.bullet_concealed());
        assert!(!state.is_spinning());
        assert_eq!(state.phase(), Phase::Ready);
        assert_eq!(sut.tick(&mut state, &mut rng), SpinStep::Idle);
    }

    #[test]
    fn sut__when_host_is_slow_then_spin_still_terminates() {
        // given
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = spinning_state();
        let mut sut = SpinAnimator::new(SpinConfig::default());
        sut.begin(&mut state);

        // when
        let late_tick = Duration::from_millis(700);
        let mut steps = Vec::new();
        loop {
            let step = sut.advance(&mut state, late_tick, &mut rng);
            steps.push(step);
            if !matches!(step, SpinStep::Rotated(_)) {
                break;
            }
        }

        // then
        assert_eq!(steps.len(), 4);
        assert!(matches!(steps.last(), Some(SpinStep::Finished { .. })));
        assert!(sut.elapsed() < SPIN_DURATION + late_tick);
        assert_eq!(state.phase(), Phase::Ready);
    }

    #[test]
    fn sut__when_integrating_nominal_ticks_then_net_rotation_matches_sum_of_speeds() {
        let config = SpinConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = spinning_state();
        let mut sut = SpinAnimator::new(config);
        sut.begin(&mut state);

        while !matches!(sut.tick(&mut state, &mut rng), SpinStep::Finished { .. }) {}

        let expected: f64 = (0..config.nominal_ticks())
            .map(|i| config.speed_at(config.tick * i))
            .sum();
        assert!((state.rotation_angle() - expected).abs() < 1e-9);
        // half-sine area over ~156 ticks: 0.3 * 156.25 * 2 / pi
        assert!((state.rotation_angle() - 29.84).abs() < 0.1);
    }

    #[test]
    fn begin__refuses_outside_loading() {
        let mut state = GameState::default();
        let mut sut = SpinAnimator::default();

        assert!(!sut.begin(&mut state));
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(sut.tick(&mut state, &mut rng), SpinStep::Idle);
        assert_eq!(state, GameState::default());
    }
}
