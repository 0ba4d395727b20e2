//! Configuration types for the scheduling engine.

use pyo3::prelude::*;

/// Configuration shared by cycle detection, forward scheduling and impact analysis.
#[pyclass]
#[derive(Clone, Debug)]
pub struct SchedulingConfig {
    /// Duration substituted for tasks whose duration is zero or negative.
    /// Values below 1 are treated as 1.
    #[pyo3(get, set)]
    pub fallback_duration_days: i64,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            fallback_duration_days: 1,
            verbosity: 0,
        }
    }
}

impl SchedulingConfig {
    /// Duration in days that a task actually occupies on the calendar.
    pub fn effective_duration(&self, duration_days: i64) -> i64 {
        if duration_days >= 1 {
            duration_days
        } else {
            self.fallback_duration_days.max(1)
        }
    }
}

#[pymethods]
impl SchedulingConfig {
    #[new]
    #[pyo3(signature = (fallback_duration_days=None, verbosity=None))]
    fn new(fallback_duration_days: Option<i64>, verbosity: Option<u8>) -> Self {
        let defaults = Self::default();
        Self {
            fallback_duration_days: fallback_duration_days
                .unwrap_or(defaults.fallback_duration_days),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SchedulingConfig(fallback_duration_days={}, verbosity={})",
            self.fallback_duration_days, self.verbosity
        )
    }
}
