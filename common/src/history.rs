//! Bounded history of recent readings.
//!
//! Readings are appended at the tail and evicted from the head once
//! [`HISTORY_CAPACITY`] is reached. Values are stored in Celsius; conversion
//! happens on the copy returned by [`HistoryBuffer::snapshot`].

use heapless::{Deque, Vec};

use crate::config::HISTORY_CAPACITY;
use crate::units::TemperatureUnit;

/// Owned copy of the history, oldest first.
pub type Snapshot = Vec<f32, HISTORY_CAPACITY>;

/// FIFO of the last [`HISTORY_CAPACITY`] readings.
#[derive(Clone, Debug, Default)]
pub struct HistoryBuffer {
    readings: Deque<f32, HISTORY_CAPACITY>,
}

impl HistoryBuffer {
    /// Empty buffer.
    pub const fn new() -> Self {
        Self {
            readings: Deque::new(),
        }
    }

    /// Append a Celsius reading, evicting the oldest when full.
    pub fn append(
        &mut self,
        celsius: f32,
    ) {
        if self.readings.is_full() {
            self.readings.pop_front();
        }
        // Cannot fail: a slot was freed above
        self.readings.push_back(celsius).ok();
    }

    /// Copy of the readings in `unit`, oldest first.
    pub fn snapshot(
        &self,
        unit: TemperatureUnit,
    ) -> Snapshot {
        self.readings.iter().map(|c| unit.from_celsius(*c)).collect()
    }

    /// Readings in Celsius, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ { self.readings.iter().copied() }

    /// Most recent reading in Celsius.
    pub fn latest(&self) -> Option<f32> { self.readings.back().copied() }

    pub fn clear(&mut self) { self.readings.clear(); }

    #[inline]
    pub fn len(&self) -> usize { self.readings.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.readings.is_empty() }
}
