use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::ptr::NonNull;

use tracing::trace;

use crate::error::{QueueError, Result};
use crate::list::{self, List, Node};

mod algorithms;

/// A queue of owned strings on a sentinel-based cyclic list.
///
/// Every string inserted into the queue is copied into a freshly allocated
/// element, which the queue owns for as long as the element is linked into
/// its ring. Removing an element hands it over to the caller as an
/// [`Element`].
///
/// The size is not cached: [`Queue::size`] counts the elements.
///
/// # Examples
///
/// ```
/// use cyclic_queue::Queue;
///
/// let mut queue = Queue::new().unwrap();
/// queue.insert_tail("b").unwrap();
/// queue.insert_head("a").unwrap();
/// queue.insert_tail("c").unwrap();
/// assert_eq!(queue.size(), 3);
///
/// let mut buf = [0_u8; 8];
/// let element = queue.remove_head(&mut buf).unwrap();
/// assert_eq!(element.value(), "a");
/// assert_eq!(&buf[..2], b"a\0");
/// element.release();
///
/// assert_eq!(queue.iter().collect::<Vec<_>>(), ["b", "c"]);
/// ```
pub struct Queue {
    list: List<String>,
}

/// An element removed from a [`Queue`].
///
/// The element owns its string. It is released either explicitly with
/// [`Element::release`] or when it is dropped; both happen exactly once.
pub struct Element {
    node: Box<Node<String>>,
}

impl Queue {
    /// Create an empty queue.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::SentinelAlloc`] if the sentinel node cannot be
    /// allocated.
    pub fn new() -> Result<Self> {
        let list = List::try_new().ok_or(QueueError::SentinelAlloc)?;
        trace!("created an empty queue");
        Ok(Self { list })
    }

    /// Create a queue holding copies of `values`, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let queue = Queue::from_values(["x", "y", "z"]).unwrap();
    /// assert_eq!(queue.size(), 3);
    /// assert_eq!(queue.front(), Some("x"));
    /// assert_eq!(queue.back(), Some("z"));
    /// ```
    pub fn from_values<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut queue = Self::new()?;
        for value in values {
            queue.insert_tail(value.as_ref())?;
        }
        Ok(queue)
    }

    /// Release every element, front first, and then the sentinel.
    ///
    /// Dropping the queue does the same.
    pub fn destroy(mut self) {
        trace!(size = self.size(), "destroying queue");
        self.list.clear();
    }

    /// Insert a copy of `s` at the head of the queue.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time, excluding the *O*(*len*)
    /// copy of `s`.
    ///
    /// # Errors
    ///
    /// Returns an out-of-memory error if either the element or its string
    /// buffer cannot be allocated. The queue is left untouched in that case.
    pub fn insert_head(&mut self, s: &str) -> Result<()> {
        let node = new_element(s)?;
        let ghost = self.list.ghost_node();
        // SAFETY: the ghost belongs to the list and `node` is freshly detached.
        unsafe { self.list.link_after(ghost, node) };
        #[cfg(feature = "ring-check")]
        self.list.check_ring();
        Ok(())
    }

    /// Insert a copy of `s` at the tail of the queue.
    ///
    /// See [`Queue::insert_head`] for the failure modes.
    pub fn insert_tail(&mut self, s: &str) -> Result<()> {
        let node = new_element(s)?;
        let ghost = self.list.ghost_node();
        // SAFETY: the ghost belongs to the list and `node` is freshly detached.
        unsafe { self.list.link_before(ghost, node) };
        #[cfg(feature = "ring-check")]
        self.list.check_ring();
        Ok(())
    }

    /// Remove the head element, copy its string into `buf` and hand the
    /// element over to the caller. Returns `None` if the queue is empty.
    ///
    /// `buf` is zero-filled first, then receives at most `buf.len() - 1`
    /// bytes of the string; longer strings are silently truncated. The
    /// element itself keeps the full string.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_values(["truncated"]).unwrap();
    /// let mut buf = [0xff_u8; 6];
    /// let element = queue.remove_head(&mut buf).unwrap();
    /// assert_eq!(&buf, b"trunc\0");
    /// assert_eq!(element.value(), "truncated");
    /// assert!(queue.remove_head(&mut buf).is_none());
    /// ```
    pub fn remove_head(&mut self, buf: &mut [u8]) -> Option<Element> {
        let element = self.pop_head()?;
        element.copy_into(buf);
        Some(element)
    }

    /// Remove the tail element; see [`Queue::remove_head`].
    pub fn remove_tail(&mut self, buf: &mut [u8]) -> Option<Element> {
        let element = self.pop_tail()?;
        element.copy_into(buf);
        Some(element)
    }

    /// Remove the head element without copying its string anywhere.
    pub fn pop_head(&mut self) -> Option<Element> {
        let node = self.list.unlink_front()?;
        #[cfg(feature = "ring-check")]
        self.list.check_ring();
        Some(Element { node })
    }

    /// Remove the tail element without copying its string anywhere.
    pub fn pop_tail(&mut self) -> Option<Element> {
        let node = self.list.unlink_back()?;
        #[cfg(feature = "ring-check")]
        self.list.check_ring();
        Some(Element { node })
    }

    /// Returns the number of elements by walking the whole queue.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn size(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the queue holds no element.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Provides the head string, or `None` if the queue is empty.
    pub fn front(&self) -> Option<&str> {
        self.iter().next()
    }

    /// Provides the tail string, or `None` if the queue is empty.
    pub fn back(&self) -> Option<&str> {
        self.iter().next_back()
    }

    /// Provides a double-ended iterator over the strings, head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Returns `true` if every string is less than or equal to its successor
    /// in byte-lexicographic order.
    pub fn is_sorted(&self) -> bool {
        self.iter().zip(self.iter().skip(1)).all(|(a, b)| a <= b)
    }
}

/// Allocate the element record, then its string buffer, and copy `s` into
/// the buffer. The record is given back if the buffer cannot be allocated.
fn new_element(s: &str) -> Result<NonNull<Node<String>>> {
    let node = Node::try_alloc().ok_or(QueueError::ElementAlloc)?;
    let mut value = String::new();
    if let Err(source) = value.try_reserve_exact(s.len()) {
        // SAFETY: `node` was allocated above and never initialized.
        unsafe { Node::dealloc(node) };
        return Err(QueueError::BufferAlloc {
            len: s.len(),
            source,
        });
    }
    value.push_str(s);
    // SAFETY: `node` is uninitialized storage from `Node::try_alloc`.
    Ok(unsafe { Node::init(node, value) })
}

impl Debug for Queue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Queues are equal if they hold the same strings in the same order.
impl PartialEq for Queue {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for Queue {}

impl Element {
    /// The string owned by the element.
    pub fn value(&self) -> &str {
        &self.node.element
    }

    /// Release the element record and keep its string.
    pub fn into_value(self) -> String {
        self.node.into_element()
    }

    /// Release the string and then the element record.
    pub fn release(self) {
        drop(self.node);
    }

    fn copy_into(&self, buf: &mut [u8]) {
        buf.fill(0);
        let bytes = self.value().as_bytes();
        let len = bytes.len().min(buf.len().saturating_sub(1));
        buf[..len].copy_from_slice(&bytes[..len]);
    }
}

impl Debug for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element").field(&self.value()).finish()
    }
}

// A detached element is exclusively owned; its dangling links are never read.
unsafe impl Send for Element {}

unsafe impl Sync for Element {}

/// An iterator over the strings of a [`Queue`], created by [`Queue::iter`].
#[derive(Clone)]
pub struct Iter<'a> {
    inner: list::Iter<'a, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(String::as_str)
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(String::as_str)
    }
}

impl FusedIterator for Iter<'_> {}

impl Debug for Iter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter")
            .field(&self.clone().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
