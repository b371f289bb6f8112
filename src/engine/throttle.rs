use std::time::Duration;

/// Courtesy pause after every `every` symbols, to stay well inside exchange rate limits.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    every: usize,
    pause: Duration,
}

impl Throttle {
    pub fn new(every: usize, pause: Duration) -> Self {
        Self { every, pause }
    }

    /// Never pauses.
    pub fn disabled() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// True when `processed` (1-based count) closes a batch.
    pub fn should_pause(&self, processed: usize) -> bool {
        self.every > 0 && !self.pause.is_zero() && processed > 0 && processed % self.every == 0
    }

    pub async fn tick(&self, processed: usize) {
        if self.should_pause(processed) {
            log::debug!("Processed {} symbols, pausing {:?}", processed, self.pause);
            tokio::time::sleep(self.pause).await;
        }
    }
}
