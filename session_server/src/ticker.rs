use game_core::Config;
use tokio::time::{Duration, Instant};

/// Shortest gap between two ticks, even after an overrun
pub const MIN_TICK_DELAY: Duration = Duration::from_millis(1);

/// Self-rescheduling tick clock.
///
/// The next deadline is set after a tick finishes, `interval - spent` ahead
/// (at least `MIN_TICK_DELAY`). An overrun delays the next tick instead of
/// dropping it, so simulated time may trail wall-clock time but no tick is
/// lost.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    overload: Duration,
    next: Instant,
    last: Instant,
}

impl Ticker {
    /// First tick fires once `grace` has passed
    pub fn new(interval: Duration, overload: Duration, grace: Duration) -> Self {
        let first = Instant::now() + grace;
        Self {
            interval,
            overload,
            next: first,
            last: first,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Duration::from_millis(config.tick_interval_ms),
            Duration::from_millis(config.overload_warn_ms),
            Duration::from_millis(config.start_grace_ms),
        )
    }

    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Mark the start of a tick. Returns the start instant and the elapsed
    /// milliseconds since the previous tick started.
    pub fn begin(&mut self) -> (Instant, f32) {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last);
        self.last = now;
        (now, dt.as_micros() as f32 / 1000.0)
    }

    /// Schedule the next tick and return how long this one took
    pub fn finish(&mut self, started: Instant) -> Duration {
        let spent = started.elapsed();
        let delay = self.interval.saturating_sub(spent).max(MIN_TICK_DELAY);
        self.next = Instant::now() + delay;
        spent
    }

    pub fn is_overloaded(&self, spent: Duration) -> bool {
        spent > self.overload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_waits_for_grace() {
        let start = Instant::now();
        let mut ticker = Ticker::new(
            Duration::from_millis(15),
            Duration::from_millis(30),
            Duration::from_millis(3000),
        );
        assert_eq!(ticker.deadline() - start, Duration::from_millis(3000));

        tokio::time::sleep_until(ticker.deadline()).await;
        let (_, dt) = ticker.begin();
        assert_eq!(dt, 0.0, "dt is measured from the end of the grace period");
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_deadline_subtracts_time_spent() {
        let mut ticker = Ticker::new(Duration::from_millis(15), Duration::from_millis(30), Duration::ZERO);
        let (started, _) = ticker.begin();
        tokio::time::advance(Duration::from_millis(5)).await;

        let spent = ticker.finish(started);

        assert_eq!(spent, Duration::from_millis(5));
        assert_eq!(ticker.deadline() - started, Duration::from_millis(15));
        assert!(!ticker.is_overloaded(spent));

        tokio::time::sleep_until(ticker.deadline()).await;
        let (_, dt) = ticker.begin();
        assert_eq!(dt, 15.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overrun_schedules_minimum_delay() {
        let mut ticker = Ticker::new(Duration::from_millis(15), Duration::from_millis(30), Duration::ZERO);
        let (started, _) = ticker.begin();
        tokio::time::advance(Duration::from_millis(40)).await;

        let spent = ticker.finish(started);

        assert!(ticker.is_overloaded(spent));
        assert_eq!(ticker.deadline() - Instant::now(), MIN_TICK_DELAY);
    }
}
