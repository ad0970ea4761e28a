// Path: crates/telemetry/src/time.rs
use crate::sinks::ExtrinsicMetricsSink;
use std::time::Instant;

/// Reports the elapsed time to the sink when dropped, unless discarded.
pub struct Timer<'a> {
    sink: &'a dyn ExtrinsicMetricsSink,
    start: Instant,
    armed: bool,
}

impl<'a> Timer<'a> {
    pub fn new(sink: &'a dyn ExtrinsicMetricsSink) -> Self {
        Self {
            sink,
            start: Instant::now(),
            armed: true,
        }
    }

    /// Drops the timer without reporting.
    pub fn discard(mut self) {
        self.armed = false;
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.sink
                .observe_lifecycle_duration(self.start.elapsed().as_secs_f64());
        }
    }
}
