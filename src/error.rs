use std::collections::TryReserveError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueueError>;

/// Reportable failures of the queue.
///
/// Only allocation can fail: absent handles and empty queues are no-ops, and
/// precondition violations (such as deleting duplicates from an unsorted
/// queue) are not detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("out of memory: cannot allocate the queue sentinel")]
    SentinelAlloc,

    #[error("out of memory: cannot allocate a queue element")]
    ElementAlloc,

    #[error("out of memory: cannot allocate a {len}-byte string buffer")]
    BufferAlloc {
        len: usize,
        #[source]
        source: TryReserveError,
    },
}
