//! Fixed-capacity FIFO of the most recent raw samples.

use super::{scale_min_max, ScaledWindow};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct WindowBuffer {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl WindowBuffer {
    /// `capacity` must be non-zero; the predictor validates this before construction.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest one once at capacity.
    pub fn push(&mut self, sample: f64) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &f64> + '_ {
        self.samples.iter()
    }

    /// Rescale the current contents into [0, 1] using this window's own bounds.
    /// Returns `None` until the buffer is full.
    pub fn snapshot_scaled(&self) -> Option<ScaledWindow> {
        if !self.is_full() {
            return None;
        }
        let (head, tail) = self.samples.as_slices();
        if tail.is_empty() {
            return Some(scale_min_max(head));
        }
        let contiguous: Vec<f64> = self.samples.iter().copied().collect();
        Some(scale_min_max(&contiguous))
    }
}
