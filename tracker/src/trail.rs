use crate::scenario::ConfigurationError;
use std::collections::VecDeque;
use track_types::prelude::GeoPoint;

/// Bounded FIFO of the most recently observed sub-points.
///
/// An append log in observation order, not keyed by time: a rewound cursor
/// just appends older positions after newer ones.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailBuffer {
    points: VecDeque<GeoPoint>,
    capacity: usize,
}

impl TrailBuffer {
    pub fn new(capacity: usize) -> Result<Self, ConfigurationError> {
        if capacity == 0 {
            return Err(ConfigurationError::NonPositive("trail capacity"));
        }
        Ok(Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Append, evicting the oldest points past capacity
    pub fn push(&mut self, point: GeoPoint) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Oldest first
    pub fn snapshot(&self) -> Vec<GeoPoint> {
        self.points.iter().copied().collect()
    }

    pub fn latest(&self) -> Option<&GeoPoint> {
        self.points.back()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
