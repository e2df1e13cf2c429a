use pulse_core::{Metric, Sample, Timeframe};
use std::collections::{vec_deque, VecDeque};

/// Default number of samples retained.
pub const DEFAULT_CAPACITY: usize = 1_000;

/// Read-only, chronologically ordered view over the newest samples.
pub type Window<'a> = vec_deque::Iter<'a, Sample>;

/// Rolling history of samples, oldest first.
///
/// Appending past `capacity` evicts the single oldest sample, so the buffer
/// always holds the most recent `min(appended, capacity)` samples in
/// insertion order.
#[derive(Debug, Clone)]
pub struct StreamBuffer {
    samples:  VecDeque<Sample>,
    capacity: usize,
}

impl StreamBuffer {
    /// `capacity` is raised to 1 if zero; config validation rejects zero
    /// before we get here.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new sample, evicting the oldest if at capacity.
    pub fn append(&mut self, sample: Sample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// The last `min(count, len)` samples in chronological order.
    pub fn window(&self, count: usize) -> Window<'_> {
        let start = self.samples.len().saturating_sub(count);
        self.samples.range(start..)
    }

    /// Window for one of the timeframe presets.
    pub fn timeframe(&self, timeframe: Timeframe) -> Window<'_> {
        self.window(timeframe.sample_count())
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn oldest(&self) -> Option<&Sample> {
        self.samples.front()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for StreamBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Project one field out of each sample, preserving order.
pub fn metric_series<'a>(window: impl IntoIterator<Item = &'a Sample>, metric: Metric) -> Vec<f64> {
    window.into_iter().map(|s| s.value(metric)).collect()
}
