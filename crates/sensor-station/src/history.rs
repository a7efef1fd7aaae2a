//! Ordered, owned history of readings for a single sensor.

use std::fmt::Debug;

use serde::Serialize;

/// Element types a [`ReadingHistory`] can hold: copyable, ordered, and
/// convertible to `f64` for averaging.
pub trait Measurement: Copy + PartialOrd + Into<f64> + Debug {}

impl<T> Measurement for T where T: Copy + PartialOrd + Into<f64> + Debug {}

/// Insertion-ordered sequence of readings.
///
/// Cloning produces an independent deep copy; `clone_from` drops the
/// destination's readings and copies the source's in order.
#[derive(Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReadingHistory<T> {
    readings: Vec<T>,
}

impl<T: Measurement> ReadingHistory<T> {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            readings: Vec::new(),
        }
    }

    /// Append a reading at the tail.
    pub fn push(&mut self, value: T) {
        self.readings.push(value);
    }

    /// Whether any stored reading compares equal to `value`.
    pub fn contains(&self, value: T) -> bool {
        self.readings.iter().any(|r| *r == value)
    }

    /// Arithmetic mean of all readings, or `0.0` for an empty history.
    pub fn mean(&self) -> f64 {
        if self.readings.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.readings.iter().map(|r| (*r).into()).sum();
        sum / self.readings.len() as f64
    }

    /// Remove and return the smallest reading.
    ///
    /// Ties resolve to the earliest reading. The remaining readings keep
    /// their relative order. Returns `None` when the history is empty.
    pub fn remove_minimum(&mut self) -> Option<T> {
        let mut iter = self.readings.iter().copied().enumerate();
        let (mut min_idx, mut min) = iter.next()?;
        for (idx, value) in iter {
            if value < min {
                min_idx = idx;
                min = value;
            }
        }
        Some(self.readings.remove(min_idx))
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.readings.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.readings
    }
}

impl<T: Measurement> Default for ReadingHistory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ReadingHistory<T> {
    fn clone(&self) -> Self {
        Self {
            readings: self.readings.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.readings.clone_from(&source.readings);
    }
}

impl<T: Measurement> FromIterator<T> for ReadingHistory<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            readings: iter.into_iter().collect(),
        }
    }
}

impl<'a, T: Measurement> IntoIterator for &'a ReadingHistory<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.iter()
    }
}
