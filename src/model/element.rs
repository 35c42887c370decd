//! A single visualised array slot

use super::ElementState;
use crate::error::{Result, SortError};

/// Bar height per unit of value, in pixels
pub const DEFAULT_BAR_UNIT: f32 = 20.0;

/// One slot of a sequence
///
/// `capacity` is the largest value in the owning sequence. It only scales the
/// display and never takes part in ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    value: u32,
    capacity: u32,
    state: ElementState,
}

impl Element {
    /// Create an inactive element
    ///
    /// Fails with a configuration error when the capacity has not been
    /// established (zero) or the value does not fit in `1..=capacity`.
    pub fn new(value: u32, capacity: u32) -> Result<Self> {
        if capacity == 0 {
            return Err(SortError::Configuration(
                "element capacity must be established before construction".to_string(),
            ));
        }
        if value == 0 || value > capacity {
            return Err(SortError::Configuration(format!(
                "element value {} outside 1..={}",
                value, capacity
            )));
        }

        Ok(Self {
            value,
            capacity,
            state: ElementState::Inactive,
        })
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn state(&self) -> ElementState {
        self.state
    }

    /// Display magnitude in `(0, 1]`
    pub fn magnitude(&self) -> f32 {
        self.value as f32 / self.capacity as f32
    }

    /// Bar height for a renderer drawing `unit` pixels per value step
    pub fn height(&self, unit: f32) -> f32 {
        unit * self.value as f32
    }

    pub(crate) fn set_value(&mut self, value: u32) {
        self.value = value;
    }

    pub(crate) fn set_state(&mut self, state: ElementState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_capacity_is_fatal() {
        let err = Element::new(1, 0).unwrap_err();
        assert!(matches!(err, SortError::Configuration(_)));
    }

    #[test]
    fn test_value_must_fit_capacity() {
        assert!(Element::new(0, 4).is_err());
        assert!(Element::new(5, 4).is_err());
        assert!(Element::new(4, 4).is_ok());
    }

    #[test]
    fn test_display_scaling() {
        let elem = Element::new(3, 12).unwrap();
        assert_eq!(elem.state(), ElementState::Inactive);
        assert!((elem.magnitude() - 0.25).abs() < f32::EPSILON);
        assert_eq!(elem.height(DEFAULT_BAR_UNIT), 60.0);
    }
}
