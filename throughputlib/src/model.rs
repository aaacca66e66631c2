use serde::Serialize;
use crate::config::{ParameterConfig, SweepConfig};
use crate::error::ConfigError;
use crate::latency::DerivedLatencies;
use crate::sweep::Sweep;
use crate::validator::validate;

/// The throughput model for one validated parameter set
///
/// Construction derives and validates everything up front, so evaluating the model can't fail.
/// The model is immutable afterwards and can be shared by any number of sweeps
#[derive(Debug, Clone)]
pub struct ThroughputModel {
    parameters: ParameterConfig,
    derived: DerivedLatencies,
}

/// Every intermediate value of a single evaluation of the model
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThroughputBreakdown {
    pub l1_hit_ratio: f64,
    /// Expected latency of an access reaching L3 [ns]
    pub l3_latency_ns: f64,
    /// Expected latency of an access reaching L2 [ns]
    pub l2_latency_ns: f64,
    /// Expected latency of any access [ns]
    pub l1_latency_ns: f64,
    /// Access count per packet, blended between the apparent and baseline counts
    pub effective_access_count: f64,
    /// Total memory access time per packet [ns]
    pub access_ns: f64,
    pub throughput_mpps: f64,
}

impl ThroughputModel {
    /// Creates a model, failing if the parameters break any invariant
    ///
    /// # Arguments
    ///
    /// * `parameters`: The raw parameters, usually resulting from parsing JSON
    ///
    /// returns: Result<ThroughputModel, ConfigError>
    pub fn new(parameters: &ParameterConfig) -> Result<Self, ConfigError> {
        let derived = DerivedLatencies::derive(parameters)?;
        Self::from_derived(parameters, derived)
    }

    /// Creates a model from values already derived from `parameters`, validating them first
    ///
    /// # Arguments
    ///
    /// * `parameters`: The raw parameters
    /// * `derived`: The result of [`DerivedLatencies::derive`] for `parameters`
    ///
    /// returns: Result<ThroughputModel, ConfigError>
    pub fn from_derived(parameters: &ParameterConfig, derived: DerivedLatencies) -> Result<Self, ConfigError> {
        validate(parameters, &derived)?;
        Ok(Self {
            parameters: parameters.clone(),
            derived,
        })
    }

    pub fn parameters(&self) -> &ParameterConfig {
        &self.parameters
    }

    pub fn derived(&self) -> &DerivedLatencies {
        &self.derived
    }

    /// Calculates the throughput in Mpps when the L1 hit ratio is `l1_hit_ratio`
    pub fn throughput(&self, l1_hit_ratio: f64) -> f64 {
        self.breakdown(l1_hit_ratio).throughput_mpps
    }

    /// Evaluates the model at `l1_hit_ratio`, keeping every intermediate value
    ///
    /// Each level's expected latency is its own latency weighted by its hit ratio, plus the
    /// expected latency of the level below weighted by the miss ratio. The access count moves
    /// from the baseline count towards the apparent count as the hit ratio approaches 1, weighted
    /// by the hit ratio raised to the acceleration exponent
    ///
    /// # Arguments
    ///
    /// * `l1_hit_ratio`: L1 hit ratio, between 0 and 1
    ///
    /// returns: ThroughputBreakdown
    pub fn breakdown(&self, l1_hit_ratio: f64) -> ThroughputBreakdown {
        let p = &self.parameters;
        let d = &self.derived;

        let l3_latency_ns = p.l3_hit_ratio * d.l3_ns + (1.0 - p.l3_hit_ratio) * d.mem_ns;
        let l2_latency_ns = p.l2_hit_ratio * d.l2_ns + (1.0 - p.l2_hit_ratio) * l3_latency_ns;
        let l1_latency_ns = l1_hit_ratio * d.l1_ns + (1.0 - l1_hit_ratio) * l2_latency_ns;

        let weight = l1_hit_ratio.powf(d.acceleration_exponent);
        let effective_access_count = weight * d.apparent_access_count
            + (1.0 - weight) * p.baseline_access_count as f64;
        let access_ns = effective_access_count * l1_latency_ns;

        ThroughputBreakdown {
            l1_hit_ratio,
            l3_latency_ns,
            l2_latency_ns,
            l1_latency_ns,
            effective_access_count,
            access_ns,
            throughput_mpps: 1000.0 / (d.processing_ns + access_ns),
        }
    }

    /// Creates a sweep over the L1 hit ratio range in `config`
    ///
    /// The sweep is lazy, nothing is evaluated until it is iterated
    pub fn sweep(&self, config: &SweepConfig) -> Result<Sweep<'_>, ConfigError> {
        Sweep::new(self, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ThroughputModel {
        ThroughputModel::new(&ParameterConfig::default()).unwrap()
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let mut params = ParameterConfig::default();
        params.l2_cycles = 1;
        assert!(matches!(ThroughputModel::new(&params), Err(ConfigError::L2AccessCost { .. })));
        params = ParameterConfig::default();
        params.baseline_throughput_mpps = 0.0;
        assert_eq!(ThroughputModel::new(&params).unwrap_err(), ConfigError::MaximumThroughput(0.0));
    }

    #[test]
    fn overflowing_parameters_are_rejected() {
        let mut params = ParameterConfig::default();
        params.mem_latency_ns_fixed = 1e308;
        params.l3_hit_ratio = 1.0;
        assert!(matches!(ThroughputModel::new(&params), Err(ConfigError::NonFinite { .. })));
    }

    #[test]
    fn from_derived_matches_new() {
        let params = ParameterConfig::default();
        let derived = DerivedLatencies::derive(&params).unwrap();
        let model = ThroughputModel::from_derived(&params, derived).unwrap();
        assert_eq!(model.derived(), reference().derived());
        assert_eq!(model.throughput(0.995), reference().throughput(0.995));

        let mut invalid = ParameterConfig::default();
        invalid.baseline_access_count = 2;
        let derived = DerivedLatencies::derive(&invalid).unwrap();
        assert!(matches!(ThroughputModel::from_derived(&invalid, derived), Err(ConfigError::AccelerationFactor(_))));
    }

    #[test]
    fn all_hits_uses_apparent_access_count() {
        let model = reference();
        let d = model.derived();
        let expected = 1000.0 / (d.processing_ns + d.apparent_access_count * d.l1_ns);
        assert_eq!(model.throughput(1.0), expected);
        // With every access hitting L1 the model reproduces the baseline
        assert!((model.throughput(1.0) - 172.0).abs() < 1e-9);
    }

    #[test]
    fn all_misses_uses_baseline_access_count() {
        let model = reference();
        let d = model.derived();
        let miss = model.breakdown(0.0);
        assert_eq!(miss.effective_access_count, 163.0);
        assert_eq!(miss.l1_latency_ns, miss.l2_latency_ns);
        let expected = 1000.0 / (d.processing_ns + 163.0 * miss.l2_latency_ns);
        assert_eq!(model.throughput(0.0), expected);
    }

    #[test]
    fn level_latencies_fall_back_to_the_next_level() {
        let model = reference();
        let d = *model.derived();
        let b = model.breakdown(0.5);
        assert!((b.l3_latency_ns - (0.79 * d.l3_ns + 0.21 * d.mem_ns)).abs() < 1e-9);
        assert!((b.l2_latency_ns - (0.7 * d.l2_ns + 0.3 * b.l3_latency_ns)).abs() < 1e-9);
        assert!((b.l1_latency_ns - (0.5 * d.l1_ns + 0.5 * b.l2_latency_ns)).abs() < 1e-9);
        assert!(d.l1_ns <= b.l1_latency_ns && b.l1_latency_ns <= b.l2_latency_ns);
        assert!(b.l2_latency_ns <= b.l3_latency_ns && b.l3_latency_ns <= d.mem_ns);
    }

    #[test]
    fn higher_hit_ratio_never_reduces_throughput() {
        let model = reference();
        let mut last = model.throughput(0.0);
        for i in 1..=1000 {
            let current = model.throughput(i as f64 / 1000.0);
            assert!(current >= last, "Throughput dropped at {}: {current} < {last}", i as f64 / 1000.0);
            last = current;
        }
    }

    #[test]
    fn reference_values() {
        let model = reference();
        assert_eq!(format!("{:.4}", model.throughput(0.99)), "9.8601");
        assert_eq!(format!("{:.4}", model.throughput(0.9999)), "143.0768");
    }
}
