use serde::Serialize;
use tracing::debug;
use crate::config::ParameterConfig;
use crate::error::ConfigError;

/// The values derived once from a parameter set, read by every evaluation of the model
///
/// All latencies are in nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedLatencies {
    /// Memory access cost [cycles]
    pub mem_cycles: f64,
    pub l1_ns: f64,
    pub l2_ns: f64,
    pub l3_ns: f64,
    pub mem_ns: f64,
    /// Per-packet latency outside memory accesses
    pub processing_ns: f64,
    /// L1 accesses per packet implied by the baseline throughput and the processing fraction
    pub apparent_access_count: f64,
    /// Baseline access count over the apparent access count, expected to be at least 1
    pub acceleration_exponent: f64,
}

impl DerivedLatencies {
    /// Derives the latencies and baseline access figures for a parameter set
    ///
    /// Every denominator is checked first. A zero or negative clock rate, baseline throughput, L1
    /// cost or apparent access count is a configuration error, as is any derived value which
    /// overflows, so the result never contains infinities or NaNs. Invariants which don't guard
    /// a division are left to the validator
    ///
    /// # Arguments
    ///
    /// * `params`: The raw parameters
    ///
    /// returns: Result<DerivedLatencies, ConfigError>
    pub fn derive(params: &ParameterConfig) -> Result<Self, ConfigError> {
        if !(params.clock_ghz > 0.0) {
            return Err(ConfigError::ClockRate(params.clock_ghz));
        }
        if !(params.baseline_throughput_mpps > 0.0) {
            return Err(ConfigError::MaximumThroughput(params.baseline_throughput_mpps));
        }

        let mem_cycles = params.mem_cycles();
        let ns_per_clock = 1.0 / params.clock_ghz;
        let l1_ns = params.l1_cycles as f64 * ns_per_clock;
        let l2_ns = params.l2_cycles as f64 * ns_per_clock;
        let l3_ns = params.l3_cycles as f64 * ns_per_clock;
        let mem_ns = mem_cycles * ns_per_clock;

        if params.l1_cycles < 1 {
            return Err(ConfigError::L1AccessCost { cycles: params.l1_cycles, latency_ns: l1_ns });
        }
        check_finite(&[
            ("memory access cycles", mem_cycles),
            ("L1 latency", l1_ns),
            ("L2 latency", l2_ns),
            ("L3 latency", l3_ns),
            ("memory latency", mem_ns),
        ])?;

        let ns_per_packet = 1000.0 / params.baseline_throughput_mpps;
        let processing_ns = ns_per_packet * params.processing_fraction;
        let access_ns = ns_per_packet - processing_ns;
        let apparent_access_count = access_ns / l1_ns;
        if !(apparent_access_count > 0.0) {
            // A processing fraction above 1 leaves negative time for memory accesses
            if params.processing_fraction > 1.0 {
                return Err(ConfigError::ProcessingRate(params.processing_fraction));
            }
            return Err(ConfigError::DegenerateDenominator {
                quantity: "apparent L1 access times",
                value: apparent_access_count,
            });
        }
        let acceleration_exponent = params.baseline_access_count as f64 / apparent_access_count;

        check_finite(&[
            ("processing latency", processing_ns),
            ("apparent L1 access times", apparent_access_count),
            ("acceleration factor", acceleration_exponent),
        ])?;

        let derived = Self {
            mem_cycles,
            l1_ns,
            l2_ns,
            l3_ns,
            mem_ns,
            processing_ns,
            apparent_access_count,
            acceleration_exponent,
        };
        debug!(?derived, "Derived latencies");
        Ok(derived)
    }
}

/// Fails on the first value which is infinite or NaN
fn check_finite(values: &[(&'static str, f64)]) -> Result<(), ConfigError> {
    match values.iter().find(|(_, value)| !value.is_finite()) {
        Some(&(quantity, value)) => Err(ConfigError::NonFinite { quantity, value }),
        None => Ok(()),
    }
}
