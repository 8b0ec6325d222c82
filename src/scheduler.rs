//! Fixed-timestep driver for the simulation.
//!
//! One cooperative loop owns a [`FrameScheduler`]. Each invocation folds the
//! wall-clock time since the previous frame into an accumulator, drains it in
//! whole simulation ticks, renders once, and computes the deadline of the next
//! frame. Steps and renders therefore never overlap, and a late invocation
//! simply runs several catch-up ticks before drawing.

use std::time::{Duration, Instant};

use log::{debug, trace};

/// Smallest tick interval honoured by the drain loop, so a zero interval can
/// never spin forever.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock used by the terminal front end.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Something the scheduler can advance in fixed logical steps.
pub trait Simulation {
    /// Current logical step length; may change between two steps.
    fn tick_interval(&self) -> Duration;

    /// Applies exactly one logical step.
    fn tick(&mut self);
}

/// Lifecycle of the self-rescheduling loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SchedulerPhase {
    /// No frame pending; invocations are ignored.
    Idle,
    /// A frame is pending at `next_deadline`.
    Armed,
    /// Inside [`FrameScheduler::run_frame`].
    Running,
}

/// Timing bookkeeping owned by one scheduler instance.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SchedulerState {
    pub phase: SchedulerPhase,
    pub last_frame: Option<Instant>,
    pub accumulated: Duration,
    pub next_deadline: Option<Instant>,
}

impl SchedulerState {
    fn idle() -> Self {
        Self {
            phase: SchedulerPhase::Idle,
            last_frame: None,
            accumulated: Duration::ZERO,
            next_deadline: None,
        }
    }
}

/// Running totals, shown on the debug HUD row.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct FrameStats {
    pub frames: u64,
    pub ticks: u64,
    pub last_catch_up: u32,
}

/// What one frame did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FrameReport {
    /// Simulation ticks drained before rendering.
    pub ticks: u32,
    /// Time spent stepping and rendering.
    pub work: Duration,
    /// Wait before the next frame is due.
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct FrameScheduler {
    frame_interval: Duration,
    state: SchedulerState,
    stats: FrameStats,
}

impl FrameScheduler {
    /// Creates an idle scheduler pacing frames `frame_interval` apart.
    #[must_use]
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            frame_interval,
            state: SchedulerState::idle(),
            stats: FrameStats::default(),
        }
    }

    /// Schedules the first frame for `now`, starting from an empty
    /// accumulator. Has no effect unless idle.
    pub fn arm(&mut self, now: Instant) {
        if self.state.phase != SchedulerPhase::Idle {
            return;
        }

        debug!("scheduler armed");
        self.state = SchedulerState {
            phase: SchedulerPhase::Armed,
            last_frame: Some(now),
            accumulated: Duration::ZERO,
            next_deadline: Some(now),
        };
    }

    /// Drops any pending frame. Safe to call repeatedly and from teardown.
    pub fn cancel(&mut self) {
        if self.state.phase == SchedulerPhase::Idle {
            return;
        }

        debug!("scheduler cancelled");
        self.state = SchedulerState::idle();
    }

    #[must_use]
    pub fn phase(&self) -> SchedulerPhase {
        self.state.phase
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state.phase == SchedulerPhase::Idle
    }

    #[must_use]
    pub fn state(&self) -> &SchedulerState {
        &self.state
    }

    #[must_use]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Time left until the pending frame, or `None` when idle.
    #[must_use]
    pub fn time_until_next_frame(&self, now: Instant) -> Option<Duration> {
        self.state
            .next_deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Returns true when a frame is pending and its deadline has passed.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.state.phase == SchedulerPhase::Armed
            && self.state.next_deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Runs one frame: drain whole ticks, render once, re-arm.
    ///
    /// Returns `Ok(None)` without touching `simulation` or calling `render`
    /// when the scheduler is not armed. A render error cancels the scheduler
    /// and is handed back to the caller.
    pub fn run_frame<C, S, F, E>(
        &mut self,
        clock: &C,
        simulation: &mut S,
        render: F,
    ) -> Result<Option<FrameReport>, E>
    where
        C: Clock + ?Sized,
        S: Simulation + ?Sized,
        F: FnOnce(&S) -> Result<(), E>,
    {
        if self.state.phase != SchedulerPhase::Armed {
            return Ok(None);
        }

        let started = clock.now();
        self.state.phase = SchedulerPhase::Running;
        let last_frame = self.state.last_frame.unwrap_or(started);
        self.state.accumulated += started.saturating_duration_since(last_frame);
        self.state.last_frame = Some(started);

        let mut ticks = 0_u32;
        loop {
            let interval = simulation.tick_interval().max(MIN_TICK_INTERVAL);
            if self.state.accumulated < interval {
                break;
            }
            simulation.tick();
            self.state.accumulated -= interval;
            ticks += 1;
        }

        if ticks > 1 {
            trace!("caught up {ticks} ticks in one frame");
        }

        if let Err(error) = render(&*simulation) {
            self.cancel();
            return Err(error);
        }

        let finished = clock.now();
        let work = finished.saturating_duration_since(started);
        let delay = self.frame_interval.saturating_sub(work);
        self.state.next_deadline = Some(finished + delay);
        self.state.phase = SchedulerPhase::Armed;

        self.stats.frames += 1;
        self.stats.ticks += u64::from(ticks);
        self.stats.last_catch_up = ticks;

        Ok(Some(FrameReport { ticks, work, delay }))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::convert::Infallible;
    use std::time::{Duration, Instant};

    use super::{Clock, FrameScheduler, SchedulerPhase, Simulation};

    struct ManualClock {
        now: Cell<Instant>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Cell::new(Instant::now()),
            }
        }

        fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.now.get()
        }
    }

    struct CountingSim {
        interval: Duration,
        after_first_tick: Option<Duration>,
        ticks: u32,
    }

    impl CountingSim {
        fn every(ms: u64) -> Self {
            Self {
                interval: Duration::from_millis(ms),
                after_first_tick: None,
                ticks: 0,
            }
        }
    }

    impl Simulation for CountingSim {
        fn tick_interval(&self) -> Duration {
            self.interval
        }

        fn tick(&mut self) {
            self.ticks += 1;
            if let Some(next) = self.after_first_tick.take() {
                self.interval = next;
            }
        }
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn no_render(_: &CountingSim) -> Result<(), Infallible> {
        Ok(())
    }

    #[test]
    fn idle_scheduler_neither_steps_nor_renders() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(ms(7));
        let mut sim = CountingSim::every(10);
        let renders = Cell::new(0);

        clock.advance(ms(100));
        let report = scheduler
            .run_frame(&clock, &mut sim, |_| {
                renders.set(renders.get() + 1);
                Ok::<(), Infallible>(())
            })
            .expect("infallible");

        assert_eq!(report, None);
        assert_eq!(sim.ticks, 0);
        assert_eq!(renders.get(), 0);
    }

    #[test]
    fn late_frame_runs_catch_up_ticks_then_renders_once() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(ms(7));
        let mut sim = CountingSim::every(16);
        let renders = Cell::new(0);
        scheduler.arm(clock.now());

        clock.advance(ms(50));
        let report = scheduler
            .run_frame(&clock, &mut sim, |sim| {
                assert_eq!(sim.ticks, 3);
                renders.set(renders.get() + 1);
                Ok::<(), Infallible>(())
            })
            .expect("infallible")
            .expect("armed scheduler runs");

        assert_eq!(report.ticks, 3);
        assert_eq!(renders.get(), 1);
        assert_eq!(scheduler.state().accumulated, ms(2));
        assert_eq!(scheduler.stats().ticks, 3);
        assert_eq!(scheduler.stats().frames, 1);
    }

    #[test]
    fn leftover_time_carries_into_the_next_frame() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(ms(7));
        let mut sim = CountingSim::every(16);
        scheduler.arm(clock.now());

        clock.advance(ms(10));
        scheduler.run_frame(&clock, &mut sim, no_render).expect("infallible");
        assert_eq!(sim.ticks, 0);

        clock.advance(ms(10));
        scheduler.run_frame(&clock, &mut sim, no_render).expect("infallible");
        assert_eq!(sim.ticks, 1);
        assert_eq!(scheduler.state().accumulated, ms(4));
    }

    #[test]
    fn interval_change_mid_drain_is_respected() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(ms(7));
        let mut sim = CountingSim {
            interval: ms(20),
            after_first_tick: Some(ms(10)),
            ticks: 0,
        };
        scheduler.arm(clock.now());

        clock.advance(ms(45));
        scheduler.run_frame(&clock, &mut sim, no_render).expect("infallible");

        // 45 - 20 - 10 - 10 = 5
        assert_eq!(sim.ticks, 3);
        assert_eq!(scheduler.state().accumulated, ms(5));
    }

    #[test]
    fn next_frame_is_paced_by_render_cost() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(ms(7));
        let mut sim = CountingSim::every(100);
        scheduler.arm(clock.now());
        assert!(scheduler.is_due(clock.now()));

        let started = clock.now();
        let report = scheduler
            .run_frame(&clock, &mut sim, |_| {
                clock.advance(ms(2));
                Ok::<(), Infallible>(())
            })
            .expect("infallible")
            .expect("armed scheduler runs");

        assert_eq!(report.work, ms(2));
        assert_eq!(report.delay, ms(5));
        assert_eq!(scheduler.state().next_deadline, Some(started + ms(7)));
        assert_eq!(scheduler.time_until_next_frame(clock.now()), Some(ms(5)));
        assert!(!scheduler.is_due(clock.now()));
        assert_eq!(scheduler.phase(), SchedulerPhase::Armed);
    }

    #[test]
    fn slow_frame_schedules_the_next_one_immediately() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(ms(7));
        let mut sim = CountingSim::every(100);
        scheduler.arm(clock.now());

        let report = scheduler
            .run_frame(&clock, &mut sim, |_| {
                clock.advance(ms(12));
                Ok::<(), Infallible>(())
            })
            .expect("infallible")
            .expect("armed scheduler runs");

        assert_eq!(report.delay, Duration::ZERO);
        assert!(scheduler.is_due(clock.now()));
    }

    #[test]
    fn cancel_is_idempotent_and_rearm_discards_paused_time() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(ms(7));
        let mut sim = CountingSim::every(10);
        scheduler.arm(clock.now());

        scheduler.cancel();
        scheduler.cancel();
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.time_until_next_frame(clock.now()), None);

        clock.advance(ms(500));
        let report = scheduler.run_frame(&clock, &mut sim, no_render).expect("infallible");
        assert_eq!(report, None);

        scheduler.arm(clock.now());
        clock.advance(ms(15));
        scheduler.run_frame(&clock, &mut sim, no_render).expect("infallible");
        assert_eq!(sim.ticks, 1);
    }

    #[test]
    fn arming_twice_keeps_the_accumulator() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(ms(7));
        let mut sim = CountingSim::every(10);
        scheduler.arm(clock.now());

        clock.advance(ms(8));
        scheduler.arm(clock.now());
        clock.advance(ms(4));
        scheduler.run_frame(&clock, &mut sim, no_render).expect("infallible");

        assert_eq!(sim.ticks, 1);
    }

    #[test]
    fn render_error_cancels_the_scheduler() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(ms(7));
        let mut sim = CountingSim::every(10);
        scheduler.arm(clock.now());

        let result = scheduler.run_frame(&clock, &mut sim, |_| Err("terminal gone"));

        assert_eq!(result, Err("terminal gone"));
        assert!(scheduler.is_idle());
    }

    #[test]
    fn zero_interval_is_clamped() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(ms(7));
        let mut sim = CountingSim::every(0);
        scheduler.arm(clock.now());

        clock.advance(ms(3));
        scheduler.run_frame(&clock, &mut sim, no_render).expect("infallible");

        assert_eq!(sim.ticks, 3);
    }
}
