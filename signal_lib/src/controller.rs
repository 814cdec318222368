//! The signal controller.
//!
//! A [`SignalController`] owns the current [`Phase`] and, once [`simulate`](SignalController::simulate) is
//! called, a background thread that flips the phase after every cycle and announces the new phase on a
//! [`BlockingQueue`]. Waiters block on that queue until they see [`Phase::Green`].

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};

use crate::config::SignalConfig;
use crate::cycle::{CycleSource, RandomCycle};
use crate::error::SignalError;
use crate::phase::{AtomicPhase, Phase};
use crate::queue::{BlockingQueue, PopOrder};
use crate::signal::Signal;

const CYCLE_THREAD_NAME: &str = "signal-cycle";

/// State shared between the controller and its cycle thread.
struct Shared {
    phase: AtomicPhase,
    queue: Arc<BlockingQueue<Phase>>,
    stopped: Mutex<bool>,
    stop_signal: Condvar,
}

impl Shared {
    /// Sleeps for `cycle`, returning `false` if the controller was shut down in the meantime.
    fn sleep(&self, cycle: Duration) -> bool {
        let start = Instant::now();
        let mut stopped = self.stopped.lock().unwrap();
        loop {
            if *stopped {
                return false;
            }
            let elapsed = start.elapsed();
            if elapsed >= cycle {
                return true;
            }
            stopped = self.stop_signal.wait_timeout(stopped, cycle - elapsed).unwrap().0;
        }
    }

    fn cycle_through_phases(&self, mut source: Box<dyn CycleSource>) {
        info!("signal cycle started at {}", self.phase.get());
        loop {
            let cycle = source.next_cycle();
            if !self.sleep(cycle) {
                break;
            }
            let phase = self.phase.get().toggled();
            self.phase.set(phase);
            self.queue.send(phase);
            debug!("signal turned {} after {:?}", phase, cycle);
        }
        info!("signal cycle stopped at {}", self.phase.get());
    }
}

/// A traffic signal that alternates between red and green.
///
/// The controller starts out red. Nothing happens until [`simulate`](Self::simulate) starts the cycle thread,
/// which then toggles the phase forever, one cycle at a time, until [`shutdown`](Self::shutdown) is called or
/// the controller is dropped.
///
/// ```no_run
/// use signal_lib::controller::SignalController;
/// use signal_lib::phase::Phase;
///
/// let signal = SignalController::new();
/// signal.simulate().unwrap();
/// signal.wait_for_green();
/// assert_eq!(signal.current_phase(), Phase::Green);
/// ```
pub struct SignalController {
    shared: Arc<Shared>,
    started: AtomicBool,
    source: Mutex<Option<Box<dyn CycleSource>>>,
    threads: Mutex<Vec<JoinHandle<()>>>,
}

impl SignalController {
    /// Creates a red signal with the default configuration: cycles of 4 to 6 seconds, FIFO event delivery.
    pub fn new() -> Self {
        let config = SignalConfig::default();
        Self::with_cycle_source(RandomCycle::new(config.cycle_range()), config.pop_order)
    }

    /// Creates a red signal from a configuration.
    pub fn with_config(config: SignalConfig) -> Result<Self, SignalError> {
        config.validate()?;
        let source = match config.seed {
            Some(seed) => RandomCycle::seeded(config.cycle_range(), seed),
            None => RandomCycle::new(config.cycle_range()),
        };
        Ok(Self::with_cycle_source(source, config.pop_order))
    }

    /// Creates a red signal whose cycle lengths come from `source`.
    pub fn with_cycle_source(source: impl CycleSource, order: PopOrder) -> Self {
        SignalController {
            shared: Arc::new(Shared {
                phase: AtomicPhase::new(Phase::Red),
                queue: Arc::new(BlockingQueue::with_order(order)),
                stopped: Mutex::new(false),
                stop_signal: Condvar::new(),
            }),
            started: AtomicBool::new(false),
            source: Mutex::new(Some(Box::new(source))),
            threads: Mutex::new(Vec::new()),
        }
    }

    /// Returns the phase most recently committed by the cycle thread.
    pub fn current_phase(&self) -> Phase {
        self.shared.phase.get()
    }

    /// The queue on which phase changes are announced.
    pub fn queue(&self) -> &Arc<BlockingQueue<Phase>> {
        &self.shared.queue
    }

    /// Starts the cycle thread and returns immediately.
    ///
    /// A controller can only be started once; later calls return [`SignalError::AlreadyStarted`].
    pub fn simulate(&self) -> Result<(), SignalError> {
        if self.started.swap(true, Ordering::AcqRel) {
            warn!("ignoring a second start of the signal cycle");
            return Err(SignalError::AlreadyStarted);
        }
        let Some(source) = self.source.lock().unwrap().take() else {
            return Err(SignalError::AlreadyStarted);
        };
        let shared = Arc::clone(&self.shared);
        let handle = thread::Builder::new()
            .name(CYCLE_THREAD_NAME.into())
            .spawn(move || shared.cycle_through_phases(source))
            .map_err(SignalError::ThreadSpawn)?;
        self.threads.lock().unwrap().push(handle);
        Ok(())
    }

    /// Blocks until a green phase is received from the queue.
    ///
    /// Red events received along the way are discarded. If the signal is never started this never returns.
    pub fn wait_for_green(&self) {
        loop {
            let phase = self.shared.queue.receive();
            trace!("waiter received {}", phase);
            if phase.is_green() {
                return;
            }
        }
    }

    /// Like [`wait_for_green`](Self::wait_for_green), but gives up after `timeout`.
    ///
    /// Returns `true` if a green phase was received in time. A timeout too large to represent as a deadline
    /// waits forever.
    pub fn wait_for_green_timeout(&self, timeout: Duration) -> bool {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            self.wait_for_green();
            return true;
        };
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.shared.queue.receive_timeout(remaining) {
                Some(phase) if phase.is_green() => return true,
                Some(phase) => trace!("waiter received {}", phase),
                None => return false,
            }
        }
    }

    /// Stops the cycle thread and waits for it to exit.
    ///
    /// Calling this more than once is harmless. Threads blocked in [`wait_for_green`](Self::wait_for_green) are
    /// not woken.
    pub fn shutdown(&self) {
        *self.shared.stopped.lock().unwrap() = true;
        self.shared.stop_signal.notify_all();
        let threads: Vec<_> = self.threads.lock().unwrap().drain(..).collect();
        for handle in threads {
            if handle.join().is_err() {
                warn!("signal cycle thread panicked");
            }
        }
    }
}

impl Default for SignalController {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SignalController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for SignalController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalController")
            .field("phase", &self.shared.phase)
            .field("pending_events", &self.shared.queue.len())
            .field("started", &self.started.load(Ordering::Relaxed))
            .finish()
    }
}

impl Signal for SignalController {
    fn current_phase(&self) -> Phase {
        SignalController::current_phase(self)
    }

    fn wait_for_green(&self) {
        SignalController::wait_for_green(self)
    }
}
