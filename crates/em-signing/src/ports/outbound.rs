//! Outbound (Driven) ports for the signing crate.
//!
//! The only external dependency of a signer is the wall clock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Unix time in seconds.
pub type UnixSeconds = u64;

/// Time source for timestamped signing.
///
/// Abstracted so tests and tooling can pin the clock.
pub trait TimeSource: Send + Sync {
    /// Returns the current Unix time in seconds.
    fn now(&self) -> UnixSeconds;
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now(&self) -> UnixSeconds {
        (**self).now()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> UnixSeconds {
        (**self).now()
    }
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> UnixSeconds {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Manually driven time source.
///
/// Shares its reading through interior mutability so a test can hold a
/// reference, hand the signer an `Arc`, and advance time between calls.
#[derive(Debug, Default)]
pub struct FixedTimeSource {
    time: AtomicU64,
}

impl FixedTimeSource {
    /// Create a clock pinned at `initial`.
    pub fn new(initial: UnixSeconds) -> Self {
        Self {
            time: AtomicU64::new(initial),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, secs: u64) {
        self.time.fetch_add(secs, Ordering::SeqCst);
    }

    /// Jump to an absolute time.
    pub fn set(&self, time: UnixSeconds) {
        self.time.store(time, Ordering::SeqCst);
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> UnixSeconds {
        self.time.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_time_source() {
        let source = SystemTimeSource;
        // After Jan 1, 2020
        assert!(source.now() > 1_577_836_800);
    }

    #[test]
    fn test_fixed_time_source() {
        let source = FixedTimeSource::new(1000);
        assert_eq!(source.now(), 1000);

        source.advance(500);
        assert_eq!(source.now(), 1500);

        source.set(3000);
        assert_eq!(source.now(), 3000);
    }

    #[test]
    fn test_shared_handle_sees_updates() {
        let source = Arc::new(FixedTimeSource::new(10));
        let handle = Arc::clone(&source);
        source.advance(5);
        assert_eq!(handle.now(), 15);
    }
}
