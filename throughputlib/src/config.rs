use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::LoadError;

/// A full model configuration: the hardware parameters and the hit ratio range to sweep
///
/// Both halves fall back to the reference configuration when omitted from the JSON input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    #[serde(default)]
    pub parameters: ParameterConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
}

impl ModelConfig {
    /// Reads a configuration from a JSON file
    ///
    /// # Arguments
    ///
    /// * `path`: Path to the JSON file
    ///
    /// returns: Result<ModelConfig, LoadError>
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// The raw parameters of the server and of the baseline measurement
///
/// Defaults are the figures measured on the reference platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParameterConfig {
    /// CPU clock rate [GHz]
    pub clock_ghz: f64,
    /// L1 access latency [cycles]
    pub l1_cycles: u32,
    /// L2 access latency [cycles]
    pub l2_cycles: u32,
    /// L3 access latency [cycles]
    pub l3_cycles: u32,
    /// Fixed part of the memory access latency [cycles]
    pub mem_cycles_fixed: u32,
    /// Part of the memory access latency which doesn't scale with the clock [ns]
    pub mem_latency_ns_fixed: f64,
    /// Maximum throughput measured at the baseline [Mpps]
    pub baseline_throughput_mpps: f64,
    /// L1 accesses (hits and misses) per packet at the baseline
    pub baseline_access_count: u32,
    pub l2_hit_ratio: f64,
    pub l3_hit_ratio: f64,
    /// Share of the per-packet time spent outside memory accesses, 0 to 1
    pub processing_fraction: f64,
}

impl Default for ParameterConfig {
    fn default() -> Self {
        Self {
            clock_ghz: 3.5,
            l1_cycles: 4,
            l2_cycles: 14,
            l3_cycles: 68,
            mem_cycles_fixed: 79,
            mem_latency_ns_fixed: 50.0,
            baseline_throughput_mpps: 172.0,
            baseline_access_count: 163,
            l2_hit_ratio: 0.70,
            l3_hit_ratio: 0.79,
            processing_fraction: 0.5,
        }
    }
}

impl ParameterConfig {
    /// The memory access cost in cycles, combining the fixed delay in nanoseconds converted to
    /// cycles with the fixed cycle overhead
    pub fn mem_cycles(&self) -> f64 {
        self.clock_ghz * self.mem_latency_ns_fixed + self.mem_cycles_fixed as f64
    }
}

/// The range of L1 hit ratios to evaluate, in percent, and the number of steps per unit ratio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    pub range_start_percent: f64,
    pub range_stop_percent: f64,
    pub resolution: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            range_start_percent: 99.0,
            range_stop_percent: 100.0,
            resolution: 10000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_reference_values() {
        let config: ModelConfig = serde_json::from_str(r#"{"parameters": {"clock_ghz": 2.0}}"#).unwrap();
        assert_eq!(config.parameters.clock_ghz, 2.0);
        assert_eq!(config.parameters.l3_cycles, 68);
        assert_eq!(config.sweep, SweepConfig::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<ModelConfig, _> = serde_json::from_str(r#"{"sweep": {"step": 1}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn memory_cycles_combine_both_parts() {
        assert_eq!(ParameterConfig::default().mem_cycles(), 254.0);
    }
}
