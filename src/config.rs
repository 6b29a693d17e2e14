//! Runtime-configurable tuning parameters for pipesort.
//!
//! All values have sensible defaults. Override via environment variables
//! (prefixed `PIPESORT_`) or by constructing a custom `PipesortConfig`.

use std::time::Duration;

use crate::types::Value;

/// Tuning parameters for the chain transport and collectives.
#[derive(Debug, Clone)]
pub struct PipesortConfig {
    /// Timeout for individual send/recv operations within collectives
    /// (gather, barrier). The pipeline itself blocks without a deadline;
    /// its liveness is guaranteed by the END cascade.
    pub collective_timeout: Duration,

    /// Bounded capacity of each point-to-point link, in frames.
    pub link_capacity: usize,

    /// Generated input values are drawn uniformly from `[0, value_bound)`.
    pub value_bound: Value,

    /// Fixed RNG seed for reproducible inputs. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for PipesortConfig {
    fn default() -> Self {
        Self {
            collective_timeout: Duration::from_secs(30),
            link_capacity: 256,
            value_bound: 100,
            seed: None,
        }
    }
}

impl PipesortConfig {
    /// Load config from environment variables, falling back to defaults.
    ///
    /// Recognized variables:
    /// - `PIPESORT_COLLECTIVE_TIMEOUT_SECS`
    /// - `PIPESORT_LINK_CAPACITY`
    /// - `PIPESORT_VALUE_BOUND`
    /// - `PIPESORT_SEED`
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("PIPESORT_COLLECTIVE_TIMEOUT_SECS") {
            if let Ok(s) = v.parse::<u64>() {
                cfg.collective_timeout = Duration::from_secs(s);
            }
        }
        if let Ok(v) = std::env::var("PIPESORT_LINK_CAPACITY") {
            if let Ok(n) = v.parse::<usize>() {
                if n > 0 {
                    cfg.link_capacity = n;
                }
            }
        }
        if let Ok(v) = std::env::var("PIPESORT_VALUE_BOUND") {
            if let Ok(b) = v.parse::<Value>() {
                if b > 0 {
                    cfg.value_bound = b;
                }
            }
        }
        if let Ok(v) = std::env::var("PIPESORT_SEED") {
            if let Ok(s) = v.parse::<u64>() {
                cfg.seed = Some(s);
            }
        }

        cfg
    }
}
