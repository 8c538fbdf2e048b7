use std::time::Duration;

/// Single-shot delayed action used to debounce empty brush releases.
///
/// At most one deadline is pending; arming again replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleTimer {
    delay: Duration,
    deadline: Option<Duration>,
}

impl IdleTimer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    #[must_use]
    pub fn delay(self) -> Duration {
        self.delay
    }

    #[must_use]
    pub fn deadline(self) -> Option<Duration> {
        self.deadline
    }

    pub fn arm(&mut self, now: Duration) {
        self.deadline = Some(now.saturating_add(self.delay));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Armed and not yet expired at `now`.
    #[must_use]
    pub fn is_pending(self, now: Duration) -> bool {
        self.deadline.is_some_and(|deadline| now < deadline)
    }

    /// Clears an expired deadline. Returns `true` when the timer fired.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IdleTimer;
    use std::time::Duration;

    #[test]
    fn timer_fires_once_after_delay() {
        let mut timer = IdleTimer::new(Duration::from_millis(350));
        timer.arm(Duration::from_millis(1_000));

        assert!(timer.is_pending(Duration::from_millis(1_349)));
        assert!(!timer.poll(Duration::from_millis(1_349)));
        assert!(timer.poll(Duration::from_millis(1_350)));
        assert!(!timer.poll(Duration::from_millis(2_000)));
        assert!(!timer.is_pending(Duration::from_millis(1_351)));
    }

    #[test]
    fn rearming_replaces_deadline() {
        let mut timer = IdleTimer::new(Duration::from_millis(100));
        timer.arm(Duration::from_millis(0));
        timer.arm(Duration::from_millis(80));
        assert_eq!(timer.deadline(), Some(Duration::from_millis(180)));
        timer.cancel();
        assert_eq!(timer.deadline(), None);
    }
}
