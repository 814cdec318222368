//! The interface that traffic participants use to synchronize with a signal.

use crate::phase::Phase;

/// Something a vehicle can stop at.
///
/// Code that drives vehicles depends on this trait rather than on a concrete controller, so a test can hand it
/// a signal that is already green.
pub trait Signal {
    /// Returns the current phase without blocking.
    fn current_phase(&self) -> Phase;

    /// Blocks the calling thread until the signal turns green.
    fn wait_for_green(&self);
}

impl<S: Signal + ?Sized> Signal for &S {
    fn current_phase(&self) -> Phase {
        (**self).current_phase()
    }

    fn wait_for_green(&self) {
        (**self).wait_for_green()
    }
}

impl<S: Signal + ?Sized> Signal for std::sync::Arc<S> {
    fn current_phase(&self) -> Phase {
        (**self).current_phase()
    }

    fn wait_for_green(&self) {
        (**self).wait_for_green()
    }
}
