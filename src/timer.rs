use std::time::{Duration, Instant};

use tracing::{debug, info};

/// Visibility and teardown signals raised by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    BecameVisible,
    BecameHidden,
    Suspend,
    Resume,
}

pub trait LifecycleObserver {
    fn on_lifecycle(&mut self, event: LifecycleEvent, now: Instant);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Running,
}

/// One-shot tick timer. The owner re-arms it after every fire.
#[derive(Debug)]
pub struct TickTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl TickTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn state(&self) -> TimerState {
        if self.deadline.is_some() {
            TimerState::Running
        } else {
            TimerState::Stopped
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn start(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.interval);
            info!(interval_ms = self.interval.as_millis() as u64, "timer started");
        }
    }

    /// Cancels the pending tick, if any.
    pub fn stop(&mut self) {
        if self.deadline.take().is_some() {
            info!("timer stopped");
        }
    }

    /// Reports a fire when the deadline has passed. The timer is left disarmed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Schedules the next tick one interval after `now`.
    pub fn rearm(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
        debug!("timer re-armed");
    }

    pub fn time_until_fire(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

impl LifecycleObserver for TickTimer {
    fn on_lifecycle(&mut self, event: LifecycleEvent, now: Instant) {
        match event {
            LifecycleEvent::BecameVisible => self.start(now),
            LifecycleEvent::BecameHidden => self.stop(),
            LifecycleEvent::Suspend | LifecycleEvent::Resume => {}
        }
    }
}
