use rand::Rng;
use std::time::Duration;

/// Randomized artificial latency applied by every API handler before it
/// touches the document store. Models network behavior so loading states
/// are observable; tests use [`Latency::zero`].
#[derive(Debug, Clone, Copy)]
pub struct Latency {
    min_ms: u64,
    max_ms: u64,
}

impl Latency {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    pub fn zero() -> Self {
        Self {
            min_ms: 0,
            max_ms: 0,
        }
    }

    /// Sleeps for a duration sampled uniformly from [min, max) ms.
    pub async fn sleep(&self) {
        if self.max_ms <= self.min_ms {
            if self.min_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.min_ms)).await;
            }
            return;
        }
        let ms = rand::thread_rng().gen_range(self.min_ms..self.max_ms);
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::new(200, 1200)
    }
}
