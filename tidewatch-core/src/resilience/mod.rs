pub mod backoff;
pub mod queue;
pub mod reconnect;

pub use backoff::{BackoffConfig, ExponentialBackoff};
pub use queue::{tick_queue, TickQueueReceiver, TickQueueSender, DEFAULT_CAPACITY};
pub use reconnect::{ConnectionState, ReconnectionStats, Resilient};
