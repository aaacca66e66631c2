use crate::config::ParameterConfig;
use crate::error::ConfigError;
use crate::latency::DerivedLatencies;

/// Checks a parameter set and the values derived from it, returning the first violated invariant
///
/// This is a gate run once before any throughput is evaluated, a failure means the model must not
/// be used at all
///
/// # Arguments
///
/// * `params`: The raw parameters
/// * `derived`: The values derived from `params`
///
/// returns: Result<(), ConfigError>
pub fn validate(params: &ParameterConfig, derived: &DerivedLatencies) -> Result<(), ConfigError> {
    match violations(params, derived).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Runs every check and collects all the violated invariants, in the order the checks are declared
///
/// Cache levels are checked from L1 down to memory, both in cycles and in nanoseconds; a level
/// may never be cheaper than the one above it
pub fn violations(params: &ParameterConfig, derived: &DerivedLatencies) -> Vec<ConfigError> {
    let mut out = Vec::new();
    if params.l1_cycles < 1 || derived.l1_ns < 0.0 {
        out.push(ConfigError::L1AccessCost { cycles: params.l1_cycles, latency_ns: derived.l1_ns });
    }
    if params.l2_cycles < params.l1_cycles || derived.l2_ns < derived.l1_ns {
        out.push(ConfigError::L2AccessCost { cycles: params.l2_cycles, latency_ns: derived.l2_ns });
    }
    if params.l3_cycles < params.l2_cycles || derived.l3_ns < derived.l2_ns {
        out.push(ConfigError::L3AccessCost { cycles: params.l3_cycles, latency_ns: derived.l3_ns });
    }
    if derived.mem_cycles < params.l3_cycles as f64 || derived.mem_ns < derived.l3_ns {
        out.push(ConfigError::MemoryAccessCost { cycles: derived.mem_cycles, latency_ns: derived.mem_ns });
    }
    if !(params.baseline_throughput_mpps > 0.0) {
        out.push(ConfigError::MaximumThroughput(params.baseline_throughput_mpps));
    }
    if params.baseline_access_count == 0 {
        out.push(ConfigError::AccessCount(params.baseline_access_count));
    }
    if !(params.clock_ghz > 0.0) {
        out.push(ConfigError::ClockRate(params.clock_ghz));
    }
    if !is_ratio(params.processing_fraction) {
        out.push(ConfigError::ProcessingRate(params.processing_fraction));
    }
    for (which, ratio) in [("L2", params.l2_hit_ratio), ("L3", params.l3_hit_ratio)] {
        if !is_ratio(ratio) {
            out.push(ConfigError::HitRatio { which, ratio });
        }
    }
    if !(derived.acceleration_exponent >= 1.0) {
        out.push(ConfigError::AccelerationFactor(derived.acceleration_exponent));
    }
    out
}

fn is_ratio(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}
