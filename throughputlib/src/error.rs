use thiserror::Error;

/// An invalid model configuration
///
/// Every variant is fatal: there is no partial result for a configuration which breaks one of the
/// model's invariants. Where a check involves both a raw constant and a latency derived from it,
/// both values are carried so the message identifies exactly what broke
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Invalid L1 access cost: {cycles} ({latency_ns:.2})")]
    L1AccessCost { cycles: u32, latency_ns: f64 },

    #[error("Invalid L2 access cost: {cycles} ({latency_ns:.2})")]
    L2AccessCost { cycles: u32, latency_ns: f64 },

    #[error("Invalid L3 access cost: {cycles} ({latency_ns:.2})")]
    L3AccessCost { cycles: u32, latency_ns: f64 },

    #[error("Invalid memory access cost: {cycles} ({latency_ns:.2})")]
    MemoryAccessCost { cycles: f64, latency_ns: f64 },

    #[error("Invalid maximum throughput: {0}")]
    MaximumThroughput(f64),

    #[error("Invalid L1 access times: {0}")]
    AccessCount(u32),

    #[error("Invalid CPU clock rate: {0:.2}")]
    ClockRate(f64),

    #[error("Invalid processing rate: {0:.2}")]
    ProcessingRate(f64),

    #[error("Invalid acceleration factor: {0:.2}")]
    AccelerationFactor(f64),

    #[error("Invalid {which} hit ratio: {ratio:.2}")]
    HitRatio { which: &'static str, ratio: f64 },

    /// A division in the derivation would have a zero or negative denominator
    #[error("Degenerate {quantity}: {value}")]
    DegenerateDenominator { quantity: &'static str, value: f64 },

    /// A derived value overflowed or is otherwise not a finite number
    #[error("Non-finite {quantity}: {value}")]
    NonFinite { quantity: &'static str, value: f64 },

    #[error("Invalid sweep resolution: {0}")]
    Resolution(u64),

    #[error("Invalid sweep range: {start:.2}% to {stop:.2}%")]
    SweepRange { start: f64, stop: f64 },
}

/// A failure to read a configuration file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Couldn't read the config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Couldn't parse the config file: {0}")]
    Parse(#[from] serde_json::Error),
}
