//! Signal configuration.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::SignalError;
use crate::queue::PopOrder;

/// Settings for a [`SignalController`](crate::controller::SignalController).
///
/// Every field has a default, so a partial JSON document such as `{"seed": 7}` is valid.
///
/// ```
/// use signal_lib::config::SignalConfig;
/// use signal_lib::queue::PopOrder;
///
/// let config = SignalConfig::from_json(r#"{"min_cycle_ms": 100, "max_cycle_ms": 200, "pop_order": "lifo"}"#).unwrap();
/// assert_eq!(config.cycle_range(), 100..200);
/// assert_eq!(config.pop_order, PopOrder::Lifo);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Shortest cycle in milliseconds (inclusive).
    pub min_cycle_ms: u64,
    /// Longest cycle in milliseconds (exclusive).
    pub max_cycle_ms: u64,
    /// Order in which queued phase events are handed to waiters.
    pub pop_order: PopOrder,
    /// Seed for the cycle length generator. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl SignalConfig {
    /// Default shortest cycle.
    pub const DEFAULT_MIN_CYCLE_MS: u64 = 4000;
    /// Default longest cycle.
    pub const DEFAULT_MAX_CYCLE_MS: u64 = 6000;

    /// Parses and validates a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self, SignalError> {
        let config: SignalConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the cycle range is non-empty and starts above zero.
    pub fn validate(&self) -> Result<(), SignalError> {
        if self.min_cycle_ms == 0 || self.min_cycle_ms >= self.max_cycle_ms {
            return Err(SignalError::InvalidCycleRange {
                min_ms: self.min_cycle_ms,
                max_ms: self.max_cycle_ms,
            });
        }
        Ok(())
    }

    /// The cycle range in milliseconds.
    pub fn cycle_range(&self) -> Range<u64> {
        self.min_cycle_ms..self.max_cycle_ms
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        SignalConfig {
            min_cycle_ms: Self::DEFAULT_MIN_CYCLE_MS,
            max_cycle_ms: Self::DEFAULT_MAX_CYCLE_MS,
            pop_order: PopOrder::Fifo,
            seed: None,
        }
    }
}
