use log::debug;
use std::time::{Duration, Instant};

/// Logs how long a named phase took once it goes out of scope.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl std::ops::Drop for ScopedTimer {
    fn drop(&mut self) {
        debug!("\t[{}] : {:?} msec", self.name, self.elapsed().as_millis());
    }
}
