//! A traffic signal that toggles between red and green on a randomized timer.
//!
//! The crate has two moving parts: a [`BlockingQueue`](queue::BlockingQueue) that hands values from one thread
//! to another, and a [`SignalController`](controller::SignalController) whose background thread flips the phase
//! and announces every change on that queue. Vehicles call
//! [`wait_for_green`](controller::SignalController::wait_for_green) to stall until the light turns green.

#![deny(missing_docs)]

pub mod config;
pub mod controller;
pub mod cycle;
pub mod error;
pub mod phase;
pub mod queue;
pub mod signal;

pub use controller::SignalController;
pub use error::SignalError;
pub use phase::Phase;
pub use signal::Signal;
