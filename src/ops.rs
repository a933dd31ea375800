//! The handle-level operation set, for drivers that may pass an absent queue
//! or an absent output buffer.
//!
//! Every operation here is a thin adapter over [`Queue`]: an absent handle is
//! a no-op that reports failure (`false`, `None` or `0`), an empty queue is a
//! no-op that reports success, and allocation failures are logged and turned
//! into `false`/`None`. Nothing here panics.
//!
//! # Examples
//!
//! ```
//! use cyclic_queue::ops;
//!
//! let mut queue = ops::create();
//! assert!(ops::insert_tail(queue.as_mut(), "b"));
//! assert!(ops::insert_tail(queue.as_mut(), "a"));
//! ops::sort(queue.as_mut());
//!
//! let mut buf = [0_u8; 4];
//! let element = ops::remove_head(queue.as_mut(), Some(&mut buf[..])).unwrap();
//! assert_eq!(&buf, b"a\0\0\0");
//! ops::release_element(element);
//!
//! assert_eq!(ops::size(queue.as_ref()), 1);
//! ops::destroy(queue);
//!
//! // absent handles are harmless
//! assert!(!ops::insert_head(None, "x"));
//! assert_eq!(ops::size(None), 0);
//! ```

use tracing::warn;

use crate::queue::{Element, Queue};

/// Create an empty queue, or return `None` if it cannot be allocated.
pub fn create() -> Option<Queue> {
    match Queue::new() {
        Ok(queue) => Some(queue),
        Err(err) => {
            warn!(%err, "cannot create a queue");
            None
        }
    }
}

/// Release every element of the queue and then the queue itself.
pub fn destroy(queue: Option<Queue>) {
    if let Some(queue) = queue {
        queue.destroy();
    }
}

/// Insert a copy of `s` at the head. Returns `false` if the queue is absent
/// or the copy cannot be allocated, in which case the queue is unchanged.
pub fn insert_head(queue: Option<&mut Queue>, s: &str) -> bool {
    let queue = match queue {
        Some(queue) => queue,
        None => return false,
    };
    match queue.insert_head(s) {
        Ok(()) => true,
        Err(err) => {
            warn!(%err, "cannot insert at the head");
            false
        }
    }
}

/// Insert a copy of `s` at the tail; see [`insert_head`].
pub fn insert_tail(queue: Option<&mut Queue>, s: &str) -> bool {
    let queue = match queue {
        Some(queue) => queue,
        None => return false,
    };
    match queue.insert_tail(s) {
        Ok(()) => true,
        Err(err) => {
            warn!(%err, "cannot insert at the tail");
            false
        }
    }
}

/// Remove the head element and copy its string into `buf`, see
/// [`Queue::remove_head`]. Returns `None`, removing nothing, if the queue or
/// the buffer is absent, or if the queue is empty.
pub fn remove_head(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> Option<Element> {
    let (queue, buf) = (queue?, buf?);
    queue.remove_head(buf)
}

/// Remove the tail element; see [`remove_head`].
pub fn remove_tail(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> Option<Element> {
    let (queue, buf) = (queue?, buf?);
    queue.remove_tail(buf)
}

/// Release an element removed from a queue.
pub fn release_element(element: Element) {
    element.release();
}

/// Returns the number of elements, or `0` for an absent queue.
pub fn size(queue: Option<&Queue>) -> usize {
    queue.map_or(0, Queue::size)
}

/// Delete the middle element, see [`Queue::delete_middle`].
///
/// Returns `false` only for an absent queue: an empty queue reports success
/// although nothing was deleted.
pub fn delete_middle(queue: Option<&mut Queue>) -> bool {
    match queue {
        Some(queue) => {
            queue.delete_middle();
            true
        }
        None => false,
    }
}

/// Delete every string that occurs more than once in a sorted queue, see
/// [`Queue::delete_duplicates`]. Returns `false` only for an absent queue.
pub fn delete_duplicates(queue: Option<&mut Queue>) -> bool {
    match queue {
        Some(queue) => {
            queue.delete_duplicates();
            true
        }
        None => false,
    }
}

/// Swap the strings of every two adjacent elements; see [`Queue::swap_pairs`].
pub fn swap_pairs(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.swap_pairs();
    }
}

/// Reverse the order of the strings; see [`Queue::reverse`].
pub fn reverse(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.reverse();
    }
}

/// Sort the strings in ascending order; see [`Queue::sort`].
pub fn sort(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.sort();
    }
}
