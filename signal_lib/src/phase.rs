//! Signal phases.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// The state of a signal. A signal is either red or green, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Traffic must stop.
    #[default]
    Red,
    /// Traffic may go.
    Green,
}

impl Phase {
    /// Returns the phase that follows this one.
    pub fn toggled(self) -> Self {
        match self {
            Phase::Red => Phase::Green,
            Phase::Green => Phase::Red,
        }
    }

    /// Returns `true` for [`Phase::Green`].
    pub fn is_green(self) -> bool {
        self == Phase::Green
    }

    const fn to_bits(self) -> u8 {
        match self {
            Phase::Red => 0,
            Phase::Green => 1,
        }
    }

    const fn from_bits(bits: u8) -> Self {
        match bits {
            0 => Phase::Red,
            _ => Phase::Green,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Red => f.write_str("red"),
            Phase::Green => f.write_str("green"),
        }
    }
}

// A `Phase` stored in an `AtomicU8`, so it can be read from any thread while the cycle thread writes it.
pub(crate) struct AtomicPhase(AtomicU8);

impl AtomicPhase {
    #[inline]
    pub(crate) const fn new(phase: Phase) -> Self {
        Self(AtomicU8::new(phase.to_bits()))
    }

    #[inline]
    pub(crate) fn set(&self, phase: Phase) {
        self.0.store(phase.to_bits(), Ordering::Release);
    }

    #[inline]
    pub(crate) fn get(&self) -> Phase {
        Phase::from_bits(self.0.load(Ordering::Acquire))
    }
}

impl fmt::Debug for AtomicPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicPhase").field(&self.get()).finish()
    }
}
