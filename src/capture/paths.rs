//! Output path allocation for captured screenshots.

use std::path::PathBuf;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::capture::dependencies::Clock;

/// Allocates `screenshot_<unix seconds>.png` paths under a fixed root.
///
/// Stamps are strictly increasing within a process: a call in the same epoch
/// second as the previous one is bumped to the next unissued second, so rapid
/// repeated captures never collide with each other. If another process left a
/// file at an allocated path, the screenshot command overwrites it.
pub struct PathAllocator {
    root: PathBuf,
    last_issued: AtomicI64,
}

impl PathAllocator {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            last_issued: AtomicI64::new(0),
        }
    }

    /// Allocates the next output path using `clock` for the current time.
    pub fn allocate(&self, clock: &dyn Clock) -> PathBuf {
        let now = clock.unix_seconds();
        let mut last = self.last_issued.load(Ordering::Relaxed);
        loop {
            let stamp = now.max(last + 1);
            match self.last_issued.compare_exchange_weak(
                last,
                stamp,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return self.root.join(format!("screenshot_{stamp}.png")),
                Err(current) => last = current,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;

    struct FixedClock(i64);

    impl Clock for FixedClock {
        fn unix_seconds(&self) -> i64 {
            self.0
        }
    }

    #[test]
    fn allocates_timestamped_png_under_root() {
        let allocator = PathAllocator::new(PathBuf::from("/tmp"));
        let path = allocator.allocate(&FixedClock(1_700_000_000));
        assert_eq!(path, Path::new("/tmp/screenshot_1700000000.png"));
    }

    #[test]
    fn same_second_allocations_bump_to_next_stamp() {
        let allocator = PathAllocator::new(PathBuf::from("/tmp"));
        let clock = FixedClock(1_700_000_000);
        let first = allocator.allocate(&clock);
        let second = allocator.allocate(&clock);
        let third = allocator.allocate(&clock);
        assert_eq!(first, Path::new("/tmp/screenshot_1700000000.png"));
        assert_eq!(second, Path::new("/tmp/screenshot_1700000001.png"));
        assert_eq!(third, Path::new("/tmp/screenshot_1700000002.png"));
    }

    #[test]
    fn later_clock_reading_wins_over_bump() {
        let allocator = PathAllocator::new(PathBuf::from("/tmp"));
        allocator.allocate(&FixedClock(100));
        let path = allocator.allocate(&FixedClock(500));
        assert_eq!(path, Path::new("/tmp/screenshot_500.png"));
    }

    #[test]
    fn concurrent_allocations_stay_distinct() {
        let allocator = Arc::new(PathAllocator::new(PathBuf::from("/tmp")));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let allocator = Arc::clone(&allocator);
            handles.push(std::thread::spawn(move || {
                allocator.allocate(&FixedClock(42))
            }));
        }
        let mut paths: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 8);
    }
}
