//! Debounce and cycle state machine for watch mode.

use std::{
    panic::{self, AssertUnwindSafe},
    time::{Duration, Instant},
};

use crate::orchestrator::panic_message;

/// Shortest accepted debounce window.
pub const MIN_DEBOUNCE: Duration = Duration::from_secs(1);

/// `Idle → Building → Cooldown → Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Idle,
    Building,
    Cooldown { since: Instant },
}

/// How one watch-triggered cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Succeeded,
    /// The cycle returned an error or panicked. The watch loop keeps going.
    Failed(String),
}

impl CycleOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, CycleOutcome::Failed(_))
    }
}

/// Decides when a filesystem event may start a rebuild, and runs rebuilds so
/// that at most one is in flight.
#[derive(Debug)]
pub struct WatchScheduler {
    debounce: Duration,
    state: WatchState,
    last_trigger: Option<Instant>,
    cycles: usize,
    failures: usize,
}

impl WatchScheduler {
    /// A scheduler in the `Idle` state. Windows shorter than
    /// [`MIN_DEBOUNCE`] are raised to it.
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce: debounce.max(MIN_DEBOUNCE),
            state: WatchState::Idle,
            last_trigger: None,
            cycles: 0,
            failures: 0,
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Cycles run so far.
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Offer a qualifying event seen at `at`.
    ///
    /// Accepted only while idle and when at least one debounce window has
    /// passed since the previous accepted trigger. Rejected events are
    /// dropped, not queued.
    pub fn offer(&mut self, at: Instant) -> bool {
        if self.state != WatchState::Idle {
            return false;
        }
        if let Some(last) = self.last_trigger
            && at.saturating_duration_since(last) < self.debounce
        {
            tracing::trace!(since_last = ?at.saturating_duration_since(last), "event inside debounce window, discarded");
            return false;
        }
        self.last_trigger = Some(at);
        true
    }

    /// Run one cycle: `Building` while `build` runs, then `Cooldown`.
    ///
    /// Errors and panics from `build` are caught here and become
    /// [`CycleOutcome::Failed`].
    pub fn run_cycle<B>(&mut self, build: B) -> CycleOutcome
    where
        B: FnOnce() -> eyre::Result<()>,
    {
        self.state = WatchState::Building;
        let outcome = match panic::catch_unwind(AssertUnwindSafe(build)) {
            Ok(Ok(())) => CycleOutcome::Succeeded,
            Ok(Err(err)) => CycleOutcome::Failed(format!("{:#}", err)),
            Err(payload) => CycleOutcome::Failed(format!("panicked: {}", panic_message(&*payload))),
        };

        self.cycles += 1;
        if let CycleOutcome::Failed(reason) = &outcome {
            self.failures += 1;
            tracing::warn!(%reason, "watch cycle failed; still watching");
        }
        self.state = WatchState::Cooldown {
            since: Instant::now(),
        };
        outcome
    }

    /// Leave `Cooldown` for `Idle`.
    pub fn settle(&mut self) {
        if let WatchState::Cooldown { since } = self.state {
            tracing::trace!(cooldown = ?since.elapsed(), "scheduler idle");
            self.state = WatchState::Idle;
        }
    }

    /// Offer an event and, if accepted, run a full cycle and return to
    /// `Idle`.
    pub fn trigger<B>(&mut self, at: Instant, build: B) -> Option<CycleOutcome>
    where
        B: FnOnce() -> eyre::Result<()>,
    {
        if !self.offer(at) {
            return None;
        }
        let outcome = self.run_cycle(build);
        self.settle();
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_inside_window_builds_once() {
        let mut scheduler = WatchScheduler::new(Duration::from_secs(1));
        let t0 = Instant::now();
        let mut builds = 0;

        for offset in [0, 200] {
            scheduler.trigger(t0 + Duration::from_millis(offset), || {
                builds += 1;
                Ok(())
            });
        }

        assert_eq!(builds, 1);
        assert_eq!(scheduler.cycles(), 1);
    }

    #[test]
    fn test_window_measured_from_last_accepted_trigger() {
        let mut scheduler = WatchScheduler::new(Duration::from_secs(1));
        let t0 = Instant::now();
        assert!(scheduler.offer(t0));
        assert!(!scheduler.offer(t0 + Duration::from_millis(900)));
        assert!(scheduler.offer(t0 + Duration::from_millis(1000)));
        assert!(!scheduler.offer(t0 + Duration::from_millis(1500)));
    }

    #[test]
    fn test_debounce_floor() {
        let scheduler = WatchScheduler::new(Duration::from_millis(10));
        assert_eq!(scheduler.debounce(), MIN_DEBOUNCE);
    }

    #[test]
    fn test_state_transitions() {
        let mut scheduler = WatchScheduler::new(Duration::from_secs(2));
        assert_eq!(scheduler.state(), WatchState::Idle);

        let mut seen = None;
        let outcome = scheduler.run_cycle(|| {
            seen = Some(true);
            Ok(())
        });
        assert_eq!(outcome, CycleOutcome::Succeeded);
        assert_eq!(seen, Some(true));
        assert!(matches!(scheduler.state(), WatchState::Cooldown { .. }));

        // Not idle yet: events are dropped.
        assert!(!scheduler.offer(Instant::now()));

        scheduler.settle();
        assert_eq!(scheduler.state(), WatchState::Idle);
    }

    #[test]
    fn test_failed_cycle_returns_to_idle() {
        let mut scheduler = WatchScheduler::new(Duration::from_secs(1));
        let t0 = Instant::now();

        let outcome = scheduler.trigger(t0, || Err(eyre::eyre!("parse failed")));
        assert_eq!(outcome, Some(CycleOutcome::Failed("parse failed".into())));
        assert_eq!(scheduler.state(), WatchState::Idle);

        let outcome = scheduler.trigger(t0 + Duration::from_secs(1), || Ok(()));
        assert_eq!(outcome, Some(CycleOutcome::Succeeded));
        assert_eq!(scheduler.failures(), 1);
    }

    #[test]
    fn test_panic_is_contained() {
        let mut scheduler = WatchScheduler::new(Duration::from_secs(1));
        let outcome = scheduler.trigger(Instant::now(), || panic!("generator bug"));
        assert_eq!(
            outcome,
            Some(CycleOutcome::Failed("panicked: generator bug".into()))
        );
        assert_eq!(scheduler.state(), WatchState::Idle);
    }
}
