//! Bounded SPSC queue between a streaming feed's background reader and the
//! engine driver, with a drop-oldest-on-overflow policy.
//!
//! `crossbeam_channel::bounded` blocks the sender on a full channel by
//! default; that's the wrong policy for a live feed, where a slow consumer
//! should see the newest data, not backpressure the producer. `TickQueue`
//! wraps a bounded channel and, on `try_send` failure, pops one item before
//! retrying so the newest tick always gets in.

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};
use std::time::Duration;

use crate::core::types::Tick;

/// Default bounded capacity — large enough to absorb a brief consumer
/// stall without unbounded memory growth.
pub const DEFAULT_CAPACITY: usize = 1000;

pub struct TickQueueSender {
    tx: Sender<Tick>,
    rx_for_drop: Receiver<Tick>,
}

pub struct TickQueueReceiver {
    rx: Receiver<Tick>,
}

pub fn tick_queue(capacity: usize) -> (TickQueueSender, TickQueueReceiver) {
    let (tx, rx) = crossbeam_channel::bounded(capacity);
    (
        TickQueueSender {
            tx,
            rx_for_drop: rx.clone(),
        },
        TickQueueReceiver { rx },
    )
}

impl TickQueueSender {
    /// Pushes a tick, dropping the single oldest queued tick if the queue
    /// is full rather than blocking the reader thread.
    pub fn push(&self, tick: Tick) {
        let mut pending = tick;
        loop {
            match self.tx.try_send(pending) {
                Ok(()) => return,
                Err(TrySendError::Full(returned)) => {
                    let _ = self.rx_for_drop.try_recv();
                    pending = returned;
                }
                Err(TrySendError::Disconnected(_)) => return,
            }
        }
    }
}

impl TickQueueReceiver {
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Tick, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn try_recv(&self) -> Option<Tick> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_drops_oldest_not_newest() {
        let (tx, rx) = tick_queue(2);
        tx.push(Tick::new("BTC-USD", 1.0, 1.0));
        tx.push(Tick::new("BTC-USD", 2.0, 2.0));
        tx.push(Tick::new("BTC-USD", 3.0, 3.0));

        let first = rx.try_recv().unwrap();
        let second = rx.try_recv().unwrap();
        assert_eq!(first.last, Some(2.0));
        assert_eq!(second.last, Some(3.0));
        assert!(rx.try_recv().is_none());
    }

    #[test]
    fn within_capacity_preserves_order() {
        let (tx, rx) = tick_queue(10);
        for i in 0..5 {
            tx.push(Tick::new("BTC-USD", i as f64, i as f64));
        }
        for i in 0..5 {
            assert_eq!(rx.try_recv().unwrap().last, Some(i as f64));
        }
    }
}
