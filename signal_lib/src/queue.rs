//! A blocking handoff queue.
//!
//! [`BlockingQueue`] lets one thread `send` a value and wake a waiter, and lets another thread block in
//! `receive` until a value is available.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The end of the queue that `receive` takes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopOrder {
    /// Oldest element first.
    #[default]
    Fifo,
    /// Most recently sent element first.
    Lifo,
}

/// A mutex-and-condvar protected queue for passing values between threads.
///
/// Each value sent is delivered to exactly one receiver. The queue is unbounded and `send` never waits for a
/// receiver.
pub struct BlockingQueue<T> {
    data: Mutex<VecDeque<T>>,
    not_empty: Condvar,
    order: PopOrder,
}

impl<T> BlockingQueue<T> {
    /// Creates an empty FIFO queue.
    pub fn new() -> Self {
        Self::with_order(PopOrder::Fifo)
    }

    /// Creates an empty queue that hands out elements in the given order.
    pub fn with_order(order: PopOrder) -> Self {
        BlockingQueue {
            data: Mutex::new(VecDeque::new()),
            not_empty: Condvar::new(),
            order,
        }
    }

    /// Returns the pop order of the queue.
    pub fn order(&self) -> PopOrder {
        self.order
    }

    /// Adds `item` to the queue and wakes one blocked receiver, if any.
    pub fn send(&self, item: T) {
        let mut queue = self.data.lock().unwrap();
        queue.push_back(item);
        self.not_empty.notify_one();
    }

    /// Blocks until an element is available and returns it.
    pub fn receive(&self) -> T {
        let mut queue = self.data.lock().unwrap();
        while queue.is_empty() {
            queue = self.not_empty.wait(queue).unwrap();
        }
        self.take(&mut queue).unwrap()
    }

    /// Like [`receive`](Self::receive), but returns `None` if nothing arrives within `timeout`.
    pub fn receive_timeout(&self, timeout: Duration) -> Option<T> {
        let queue = self.data.lock().unwrap();
        let (mut queue, _) = self
            .not_empty
            .wait_timeout_while(queue, timeout, |queue| queue.is_empty())
            .unwrap();
        self.take(&mut queue)
    }

    /// Takes an element if one is available, without blocking.
    pub fn try_receive(&self) -> Option<T> {
        let mut queue = self.data.lock().unwrap();
        self.take(&mut queue)
    }

    /// Returns the number of pending elements.
    pub fn len(&self) -> usize {
        self.data.lock().unwrap().len()
    }

    /// Returns `true` if there are no pending elements.
    pub fn is_empty(&self) -> bool {
        self.data.lock().unwrap().is_empty()
    }

    fn take(&self, queue: &mut VecDeque<T>) -> Option<T> {
        match self.order {
            PopOrder::Fifo => queue.pop_front(),
            PopOrder::Lifo => queue.pop_back(),
        }
    }
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_blocking_queue_send_receive() {
        let queue = BlockingQueue::<i32>::new();
        queue.send(1);
        queue.send(2);
        queue.send(3);
        assert_eq!(queue.receive(), 1);
        assert_eq!(queue.receive(), 2);
        assert_eq!(queue.receive(), 3);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_blocking_queue_lifo() {
        let queue = BlockingQueue::<i32>::with_order(PopOrder::Lifo);
        queue.send(1);
        queue.send(2);
        queue.send(3);
        assert_eq!(queue.receive(), 3);
        assert_eq!(queue.receive(), 2);
        queue.send(4);
        assert_eq!(queue.receive(), 4);
        assert_eq!(queue.receive(), 1);
    }

    #[test]
    fn test_lifo_handoff_between_threads() {
        let queue = Arc::new(BlockingQueue::<i32>::with_order(PopOrder::Lifo));
        let done = Arc::new(BlockingQueue::<()>::new());
        let handle = {
            let queue = queue.clone();
            let done = done.clone();
            thread::spawn(move || {
                queue.send(1);
                queue.send(2);
                queue.send(3);
                done.send(());
            })
        };
        done.receive();
        assert_eq!(queue.receive(), 3);
        assert_eq!(queue.receive(), 2);
        assert_eq!(queue.receive(), 1);
        handle.join().unwrap();
    }

    #[test]
    fn test_receive_waits_for_send() {
        let queue = Arc::new(BlockingQueue::<&str>::new());
        let start = Instant::now();
        let handle = {
            let queue = queue.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(50));
                queue.send("late");
            })
        };
        assert_eq!(queue.receive(), "late");
        assert!(start.elapsed() >= Duration::from_millis(50));
        handle.join().unwrap();
    }

    #[test]
    fn test_receive_timeout() {
        let queue = BlockingQueue::<i32>::new();
        let start = Instant::now();
        assert_eq!(queue.receive_timeout(Duration::from_millis(30)), None);
        assert!(start.elapsed() >= Duration::from_millis(30));

        queue.send(7);
        assert_eq!(queue.receive_timeout(Duration::from_millis(30)), Some(7));
    }

    #[test]
    fn test_try_receive() {
        let queue = BlockingQueue::<i32>::new();
        assert_eq!(queue.try_receive(), None);
        queue.send(5);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.try_receive(), Some(5));
        assert_eq!(queue.try_receive(), None);
    }

    #[test]
    fn test_concurrent_sends_keep_count() {
        let queue = Arc::new(BlockingQueue::<usize>::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let queue = queue.clone();
                thread::spawn(move || {
                    for i in 0..250 {
                        queue.send(t * 1000 + i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(queue.len(), 2000);
    }

    #[test]
    fn test_each_value_delivered_once() {
        let queue = Arc::new(BlockingQueue::<usize>::new());
        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let queue = queue.clone();
                thread::spawn(move || (0..250).map(|_| queue.receive()).collect::<Vec<_>>())
            })
            .collect();
        for i in 0..1000 {
            queue.send(i);
        }
        let mut received: Vec<usize> = consumers
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();
        received.sort_unstable();
        assert_eq!(received, (0..1000).collect::<Vec<_>>());
        assert!(queue.is_empty());
    }
}
