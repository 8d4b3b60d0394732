//! Frame pacing between detection cycles.

use std::time::{Duration, Instant};

/// Blocks until the next frame boundary.
pub trait FrameSync {
    fn wait_frame(&mut self);
}

/// Fixed-period pacer. The first call returns immediately.
#[derive(Debug)]
pub struct IntervalSync {
    interval: Duration,
    last: Option<Instant>,
}

impl IntervalSync {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }
}

impl FrameSync for IntervalSync {
    fn wait_frame(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                std::thread::sleep(self.interval - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

/// Runs cycles back to back.
#[derive(Debug, Default)]
pub struct NoopSync;

impl FrameSync for NoopSync {
    fn wait_frame(&mut self) {}
}

/// Pacer for a frame period in milliseconds; 0 means no pacing.
pub fn pacer(interval_ms: u64) -> Box<dyn FrameSync> {
    if interval_ms == 0 {
        Box::new(NoopSync)
    } else {
        Box::new(IntervalSync::new(Duration::from_millis(interval_ms)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_sync_spaces_frames() {
        let mut sync = IntervalSync::new(Duration::from_millis(20));
        let start = Instant::now();
        sync.wait_frame();
        sync.wait_frame();
        sync.wait_frame();
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn test_first_frame_does_not_wait() {
        let mut sync = IntervalSync::new(Duration::from_secs(60));
        let start = Instant::now();
        sync.wait_frame();
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_zero_interval_is_noop() {
        let mut sync = pacer(0);
        let start = Instant::now();
        for _ in 0..1000 {
            sync.wait_frame();
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
