//! # ThroughputLib
//!
//! ThroughputLib is a library for estimating the packet processing throughput of a server as a
//! function of its L1 cache hit ratio
//!
//! It is an analytical model rather than a simulator of memory traffic: per-level latencies are
//! derived from the clock rate and the access cost of each level in cycles, checked for
//! consistency, and then plugged into a closed-form throughput formula which can be swept over a
//! range of hypothetical L1 hit ratios
//!
//! ```
//! use throughputlib::config::ModelConfig;
//! use throughputlib::model::ThroughputModel;
//!
//! let config = ModelConfig::default();
//! let model = ThroughputModel::new(&config.parameters).unwrap();
//! let points: Vec<_> = model.sweep(&config.sweep).unwrap().collect();
//! assert_eq!(points.len(), 101);
//! ```

/// Contains the model parameters and sweep range, which can be read from JSON
pub mod config;

/// Contains the error types for invalid configurations and for loading configuration files
pub mod error;

/// Contains the output formats for sweep results
pub mod io;

/// Derives per-level latencies and the baseline access figures from the raw parameters
pub mod latency;

/// Contains the throughput model itself
pub mod model;

/// Contains the sweep over a range of L1 hit ratios
pub mod sweep;

/// Contains the consistency checks run before any throughput is evaluated
pub mod validator;

#[cfg(test)]
mod test;

/// Contains utilities for running tests and benchmarks.
pub mod util;
