//! Tick scheduling - a cancellable "call me on the next frame" abstraction
//!
//! The engine asks its scheduler for one tick at a time and re-subscribes each
//! time a tick is delivered, so exactly one handle is ever pending. The host
//! polls the scheduler and forwards due ticks to
//! [`Engine::on_tick`](crate::engine::Engine::on_tick) together with a
//! monotonically increasing millisecond timestamp.

use std::time::{Duration, Instant};

/// Identifies one pending tick subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub u64);

/// Source of periodic ticks
pub trait TickScheduler {
    /// Request the next tick; the returned handle identifies it
    fn schedule(&mut self) -> TickHandle;

    /// Drop a pending tick. Canceling an unknown or already delivered handle is a no-op.
    fn cancel(&mut self, handle: TickHandle);
}

impl<T: TickScheduler + ?Sized> TickScheduler for Box<T> {
    fn schedule(&mut self) -> TickHandle {
        (**self).schedule()
    }

    fn cancel(&mut self, handle: TickHandle) {
        (**self).cancel(handle)
    }
}

/// Scheduler driven by hand, for tests and headless runs.
///
/// Records every schedule/cancel so callers can assert on the subscription lifecycle.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Option<TickHandle>,
    scheduled: u64,
    canceled: Vec<TickHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The handle waiting to be delivered, if any
    pub fn pending(&self) -> Option<TickHandle> {
        self.pending
    }

    /// Take the pending handle, as a frame loop does when it fires a tick
    pub fn take_pending(&mut self) -> Option<TickHandle> {
        self.pending.take()
    }

    /// Total number of `schedule` calls
    pub fn scheduled(&self) -> u64 {
        self.scheduled
    }

    /// Handles passed to `cancel`, in call order
    pub fn canceled(&self) -> &[TickHandle] {
        &self.canceled
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self) -> TickHandle {
        self.next_id = self.next_id.wrapping_add(1);
        self.scheduled += 1;
        let handle = TickHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.canceled.push(handle);
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

/// Wall-clock frame scheduler for interactive hosts.
///
/// A scheduled tick becomes due once `period` has passed since the previous
/// delivery. Timestamps are milliseconds since the clock was created.
#[derive(Debug, Clone)]
pub struct FrameClock {
    period: Duration,
    origin: Instant,
    last_fire: Instant,
    next_id: u64,
    pending: Option<TickHandle>,
}

impl FrameClock {
    pub fn new(period: Duration) -> Self {
        let now = Instant::now();
        Self {
            period,
            origin: now,
            last_fire: now,
            next_id: 0,
            pending: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending tick is due (zero when already due, or
    /// a full period when nothing is scheduled)
    pub fn time_until_due(&self, now: Instant) -> Duration {
        if self.pending.is_none() {
            return self.period;
        }
        self.period
            .saturating_sub(now.saturating_duration_since(self.last_fire))
    }

    /// Deliver the pending tick if it is due, consuming the handle
    pub fn due(&mut self, now: Instant) -> Option<(TickHandle, u64)> {
        if self.pending.is_none() || now.saturating_duration_since(self.last_fire) < self.period {
            return None;
        }
        let handle = self.pending.take()?;
        self.last_fire = now;
        let ts = now.saturating_duration_since(self.origin).as_millis() as u64;
        Some((handle, ts))
    }
}

impl TickScheduler for FrameClock {
    fn schedule(&mut self) -> TickHandle {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = TickHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}
