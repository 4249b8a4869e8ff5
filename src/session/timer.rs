use std::time::Duration;

/// One-shot deferred task driven by explicit elapsed time rather than a
/// platform timer, so callers (and tests) decide when time passes.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    pending: Option<(Duration, T)>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> Scheduler<T> {
    /// Arm `task` to fire after `delay`. Replaces anything already pending.
    pub fn schedule(&mut self, delay: Duration, task: T) {
        self.pending = Some((delay, task));
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, task)| task)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.pending.as_ref().map(|(left, _)| *left)
    }

    /// Let `elapsed` pass. Returns the task once its delay has run out.
    pub fn advance(&mut self, elapsed: Duration) -> Option<T> {
        let (left, _) = self.pending.as_mut()?;
        *left = left.saturating_sub(elapsed);
        if left.is_zero() {
            self.cancel()
        } else {
            None
        }
    }
}
