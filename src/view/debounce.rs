use std::time::{Duration, Instant};

/// Search debounce window of the list screens.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);
/// Debounce window of the tag lookup in the news editor.
pub const TAG_DEBOUNCE: Duration = Duration::from_millis(300);

/// Cancellable delayed task driven by an explicit clock.
///
/// The owner calls [`Debouncer::schedule`] on every keystroke and
/// [`Debouncer::poll`] from its tick; `poll` reports `true` exactly once,
/// when `window` has elapsed since the last schedule.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Restarts the quiet period from `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fires the task when due. The timer disarms itself once fired.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keystrokes_restart_the_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();

        debouncer.schedule(start);
        debouncer.schedule(start + Duration::from_millis(300));

        assert!(!debouncer.poll(start + Duration::from_millis(600)));
        assert!(debouncer.poll(start + Duration::from_millis(800)));
        assert!(!debouncer.poll(start + Duration::from_millis(900)));
    }

    #[test]
    fn cancelled_task_never_fires() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(TAG_DEBOUNCE);

        debouncer.schedule(start);
        debouncer.cancel();

        assert!(!debouncer.is_pending());
        assert!(!debouncer.poll(start + Duration::from_secs(1)));
    }
}
