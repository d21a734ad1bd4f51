use std::{
    future,
    pin::Pin,
    time::Duration,
};
use tokio::time::{
    self,
    Instant,
    Interval,
    MissedTickBehavior,
    Sleep,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TimerEvent {
    LoadElapsed,
    /// Measured time since the previous tick.
    Tick(Duration),
}

#[derive(Debug, Default)]
enum Schedule {
    #[default]
    Idle,
    Loading(Pin<Box<Sleep>>),
    Ticking {
        interval: Interval,
        last: Instant,
    },
}

/// Drives the spin: a one-shot loading delay followed by a repeating tick.
/// Only one schedule exists at a time, so re-arming replaces the previous one.
#[derive(Debug)]
pub struct SpinTimer {
    period: Duration,
    schedule: Schedule,
}

impl SpinTimer {
    pub fn new(period: Duration) -> Self {
        SpinTimer {
            period,
            schedule: Schedule::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.schedule, Schedule::Idle)
    }

    pub fn is_ticking(&self) -> bool {
        matches!(self.schedule, Schedule::Ticking { .. })
    }

    pub fn schedule_load(&mut self, delay: Duration) {
        self.schedule = Schedule::Loading(Box::pin(time::sleep(delay)));
    }

    pub fn start_ticking(&mut self) {
        let now = Instant::now();
        let mut interval = time::interval_at(now + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.schedule = Schedule::Ticking {
            interval,
            last: now,
        };
    }

    pub fn cancel(&mut self) {
        self.schedule = Schedule::Idle;
    }

    /// Waits for the next event. Pends forever while idle, which keeps it
    /// usable as a `tokio::select!` branch. Cancel safe.
    pub async fn next(&mut self) -> TimerEvent {
        match &mut self.schedule {
            Schedule::Idle => future::pending::<TimerEvent>().await,
            Schedule::Loading(sleep) => {
                sleep.as_mut().await;
                self.schedule = Schedule::Idle;
                TimerEvent::LoadElapsed
            }
            Schedule::Ticking { interval, last } => {
                let now = interval.tick().await;
                let dt = now.saturating_duration_since(*last);
                *last = now;
                TimerEvent::Tick(dt)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use super::*;

    const PERIOD: Duration = Duration::from_millis(16);

    #[tokio::test(start_paused = true)]
    async fn sut__when_load_scheduled_then_fires_once_after_delay() {
        // given
        let mut sut = SpinTimer::new(PERIOD);
        let start = Instant::now();

        // when
        sut.schedule_load(Duration::from_millis(1000));
        let event = sut.next().await;

        // then
        assert_eq!(event, TimerEvent::LoadElapsed);
        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert!(!sut.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn sut__when_ticking_then_reports_period_deltas() {
        let mut sut = SpinTimer::new(PERIOD);
        sut.start_ticking();

        for _ in 0..3 {
            assert_eq!(sut.next().await, TimerEvent::Tick(PERIOD));
        }
        assert!(sut.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn sut__when_cancelled_then_never_fires() {
        // given
        let mut sut = SpinTimer::new(PERIOD);
        sut.start_ticking();

        // when
        sut.cancel();

        // then
        let waited = time::timeout(Duration::from_secs(10), sut.next()).await;
        assert!(waited.is_err());
        assert!(!sut.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn sut__when_rearmed_then_previous_schedule_is_dropped() {
        let mut sut = SpinTimer::new(PERIOD);
        sut.schedule_load(Duration::from_millis(1000));
        sut.start_ticking();

        assert_eq!(sut.next().await, TimerEvent::Tick(PERIOD));
    }
}
