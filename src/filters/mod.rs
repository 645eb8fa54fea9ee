//! Signal filtering for servo delta measurements.
//!
//! Raw landmark geometry jitters frame to frame; a filter smooths each
//! servo's measured delta before it is mapped to an angle. Every table entry
//! gets its own filter instance so the channels stay independent.

/// Moving average filter for simple smoothing
pub mod moving_average;

/// Median filter for outlier rejection
pub mod median;

/// Exponential filter for responsive smoothing
pub mod exponential;

use crate::Result;

/// Trait for all delta filters
pub trait DeltaFilter: Send {
    /// Apply filter to the measured delta
    fn apply(&mut self, value: f64) -> f64;

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes values through unchanged
pub struct NoFilter;

impl DeltaFilter for NoFilter {
    fn apply(&mut self, value: f64) -> f64 {
        value
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create a delta filter by type name
pub fn create_filter(filter_type: &str) -> Result<Box<dyn DeltaFilter>> {
    use crate::constants::{DEFAULT_EXPONENTIAL_ALPHA, DEFAULT_MEDIAN_WINDOW, DEFAULT_MOVING_AVERAGE_WINDOW};

    match filter_type.to_lowercase().as_str() {
        "none" | "nofilter" => Ok(Box::new(NoFilter)),
        "moving_average" | "movingaverage" => Ok(Box::new(moving_average::MovingAverageFilter::new(
            DEFAULT_MOVING_AVERAGE_WINDOW,
        ))),
        "median" => Ok(Box::new(median::MedianFilter::new(DEFAULT_MEDIAN_WINDOW))),
        "exponential" => Ok(Box::new(exponential::ExponentialFilter::new(DEFAULT_EXPONENTIAL_ALPHA))),
        _ => Err(crate::Error::FilterError(format!("Unknown filter type: {filter_type}"))),
    }
}
