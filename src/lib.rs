//! This crate provides a queue of owned strings, built on an intrusive,
//! sentinel-based cyclic doubly-linked list, together with positional and
//! ordering algorithms that rearrange the list in place.
//!
//! The [`Queue`] allows inserting and removing strings at both ends in
//! constant time. In compromise, its size and every reordering algorithm
//! take *O*(*n*) time (*O*(*n* * log(*n*)) for sorting).
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use cyclic_queue::Queue;
//!
//! let mut queue = Queue::from_values(["d", "b", "a", "c", "b"]).unwrap();
//!
//! queue.sort();
//! assert_eq!(queue.iter().collect::<Vec<_>>(), ["a", "b", "b", "c", "d"]);
//!
//! queue.delete_duplicates(); // every duplicated string goes away
//! assert_eq!(queue.iter().collect::<Vec<_>>(), ["a", "c", "d"]);
//!
//! queue.reverse();
//! assert_eq!(queue.iter().collect::<Vec<_>>(), ["d", "c", "a"]);
//!
//! let mut buf = [0_u8; 8];
//! let element = queue.remove_head(&mut buf).unwrap(); // the caller owns it now
//! assert_eq!(element.value(), "d");
//! element.release();
//! assert_eq!(queue.size(), 2);
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the queue is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                    (Sentinel) Ghost │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢   Element 2, 3, ...    ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║  String   ║           ║  String   ║                        ┊No payload ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │   Element 0               Element 1                               ↑   ↑
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║   ghost   ║ ──────────────────────────────────────────────────────────┘
//! ╚═══════════╝
//!     Queue
//! ```
//!
//! Each element is a single heap record holding its `next` and `prev` links
//! and the owned `String`; the links are embedded in the element, so the list
//! is intrusive and a link is turned into its element without any offset
//! arithmetic. The ghost node is the sentinel of the ring and has *NO*
//! payload. The length is not stored anywhere.
//!
//! Initially, the ghost node of an empty queue points to itself. As strings
//! are inserted, `ghost.next` points to the head element and `ghost.prev` to
//! the tail element.
//!
//! # Ownership
//!
//! Linked elements are owned by the queue. [`Queue::remove_head`] and
//! [`Queue::remove_tail`] unlink an element and hand it to the caller as an
//! [`Element`], which is released exactly once: by [`Element::release`] or
//! when it is dropped. Dropping the queue (or calling [`Queue::destroy`])
//! releases every element still linked, then the ghost node.
//!
//! # Algorithms
//!
//! - [`delete_middle`]: delete the element at index ⌊*n* / 2⌋;
//! - [`delete_duplicates`]: in a sorted queue, delete every string that
//!   occurs more than once;
//! - [`swap_pairs`]: swap the strings of every two adjacent elements;
//! - [`reverse`]: reverse the order of the strings;
//! - [`sort`]: merge sort by byte-lexicographic order.
//!
//! `swap_pairs` and `reverse` move the strings between elements and never
//! relink a node; `sort` relinks nodes and never moves a string.
//!
//! # Handles
//!
//! The [`ops`] module exposes the same operations for drivers that work with
//! possibly absent queues and output buffers.
//!
//! # Features
//!
//! - `ring-check`: validate the whole ring after every operation that links
//!   or unlinks an element.
//!   Debug builds always check the neighbours of every linked node.
//!
//! [`delete_middle`]: crate::Queue::delete_middle
//! [`delete_duplicates`]: crate::Queue::delete_duplicates
//! [`swap_pairs`]: crate::Queue::swap_pairs
//! [`reverse`]: crate::Queue::reverse
//! [`sort`]: crate::Queue::sort

#[doc(inline)]
pub use error::{QueueError, Result};
#[doc(inline)]
pub use queue::{Element, Iter, Queue};

pub mod ops;

mod error;
mod list;
mod queue;
