use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::config::SweepConfig;
use crate::error::ConfigError;
use crate::model::ThroughputModel;

/// A single point of a sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub hit_ratio: f64,
    pub throughput_mpps: f64,
}

impl Display for SweepPoint {
    /// Formats as a CSV row, both values to four decimal places
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4},{:.4}", self.hit_ratio, self.throughput_mpps)
    }
}

/// Largest resolution whose steps are all exactly representable as `f64`
pub const MAX_RESOLUTION: u64 = 1 << 53;

impl SweepConfig {
    /// Checks the range is within 0 to 100 percent, in order, and the resolution is between 1 and
    /// [`MAX_RESOLUTION`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution == 0 || self.resolution > MAX_RESOLUTION {
            return Err(ConfigError::Resolution(self.resolution));
        }
        let (start, stop) = (self.range_start_percent, self.range_stop_percent);
        if !(0.0 <= start && start <= stop && stop <= 100.0) {
            return Err(ConfigError::SweepRange { start, stop });
        }
        Ok(())
    }

    /// The inclusive bounds of the sweep in steps of `1 / resolution`
    ///
    /// Assumes the configuration is valid
    pub fn bounds(&self) -> (u64, u64) {
        let resolution = self.resolution as f64;
        let start = (self.range_start_percent / 100.0 * resolution).floor() as u64;
        let stop = (self.range_stop_percent / 100.0 * resolution).floor() as u64;
        (start, stop)
    }

    /// The number of points a sweep with this configuration produces
    ///
    /// Assumes the configuration is valid
    pub fn point_count(&self) -> u64 {
        let (start, stop) = self.bounds();
        stop - start + 1
    }
}

/// A lazy sweep over a range of L1 hit ratios
///
/// Points are produced in increasing order of hit ratio. Cloning a sweep gives an independent
/// copy from the same position, so a fresh clone taken before iterating restarts it
#[derive(Debug, Clone)]
pub struct Sweep<'a> {
    model: &'a ThroughputModel,
    steps: RangeInclusive<u64>,
    resolution: u64,
}

impl<'a> Sweep<'a> {
    /// Creates a sweep for a model, validating the range first
    ///
    /// # Arguments
    ///
    /// * `model`: The model to evaluate at each point
    /// * `config`: The range and resolution
    ///
    /// returns: Result<Sweep, ConfigError>
    pub fn new(model: &'a ThroughputModel, config: &SweepConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (start, stop) = config.bounds();
        debug!(start, stop, resolution = config.resolution, "Sweep bounds");
        Ok(Self {
            model,
            steps: start..=stop,
            resolution: config.resolution,
        })
    }
}

impl Iterator for Sweep<'_> {
    type Item = SweepPoint;

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.steps.next()?;
        let hit_ratio = step as f64 / self.resolution as f64;
        Some(SweepPoint {
            hit_ratio,
            throughput_mpps: self.model.throughput(hit_ratio),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.steps.size_hint()
    }
}
