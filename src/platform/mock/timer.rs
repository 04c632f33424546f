//! Mock delay implementation for testing

use embedded_hal::delay::DelayNs;

/// Mock delay provider
///
/// Uses simulated time: every delay advances an internal clock instead of
/// sleeping, so tests can assert how long a driver asked to wait.
#[derive(Debug, Default)]
pub struct MockDelay {
    elapsed_ns: u64,
    calls: usize,
}

impl MockDelay {
    /// Create a new mock delay with the clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Total simulated time in microseconds
    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_ns / 1_000
    }

    /// Number of delay requests received
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns = self.elapsed_ns.wrapping_add(ns as u64);
        self.calls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_delay_us() {
        let mut delay = MockDelay::new();
        assert_eq!(delay.elapsed_us(), 0);

        delay.delay_us(1000);
        assert_eq!(delay.elapsed_us(), 1000);

        delay.delay_us(500);
        assert_eq!(delay.elapsed_us(), 1500);
    }

    #[test]
    fn test_mock_delay_ms() {
        let mut delay = MockDelay::new();

        delay.delay_ms(5);
        assert_eq!(delay.elapsed_us(), 5000);
        assert!(delay.calls() >= 1);
    }
}
