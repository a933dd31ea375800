use std::alloc::{self, Layout};
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;

pub(crate) use self::iterator::{Iter, Nodes};

pub(crate) mod iterator;

/// A circular doubly-linked list keyed by a payload-less "ghost" node.
///
/// The ghost node is the sentinel of the ring: `ghost.next` is the first node,
/// `ghost.prev` is the last one, and in an empty list both point back to the
/// ghost itself. The length is not cached; [`List::len`] walks the ring.
///
/// Nodes are intrusive: a [`Node`] record holds its own links and its payload,
/// so a pointer to the link is a pointer to the element and no offset
/// arithmetic is needed to get from one to the other.
///
/// # Naming Conventions
///
/// - `anchor`: a node of the list (possibly the ghost) next to which a detached
///   node is linked;
/// - `start..end`: a half-open range of list nodes, left inclusive and right
///   exclusive (probably the ghost node).
pub(crate) struct List<T> {
    ghost: NonNull<Node<Erased>>,
    _marker: PhantomData<Box<Node<T>>>,
}

#[repr(C)]
pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) prev: NonNull<Node<T>>,
    pub(crate) element: T,
}

/// The payload of the ghost node. It is never read: the ghost is only ever
/// accessed through its links, which share the layout of every `Node<T>`.
///
/// The ghost is smaller than a `Node<T>`, so no reference to a whole
/// `Node<T>` may cover it. Links of a node that may be the ghost are read and
/// written through raw places (`(*node.as_ptr()).next`).
struct Erased;

// private methods
impl<T> List<T> {
    pub(crate) fn ghost_node(&self) -> NonNull<Node<T>> {
        self.ghost.cast()
    }
    pub(crate) fn front_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.next` is always valid (either `ghost` itself, or the first element
        // in the list).
        unsafe { self.ghost.as_ref().next.cast() }
    }
    pub(crate) fn back_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.prev` is always valid (either `ghost` itself, or the last element
        // in the list).
        unsafe { self.ghost.as_ref().prev.cast() }
    }

    /// Attach a single detached node `node` to the list, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next` belongs
    /// to the list, or whether the `prev` and `next` is adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    ///
    /// If the `prev` and `next` does not belong to the list, or they are not
    /// adjacent nodes, this function call will make the list ill-formed.
    unsafe fn attach_node(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        node: NonNull<Node<T>>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, node);
        connect(node, next);
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, node);
            assert_adjacent(node, next);
        }
    }
}

impl<T> List<T> {
    /// Create an empty list: a single ghost node whose links point to itself.
    ///
    /// Returns `None` if the ghost node cannot be allocated.
    pub(crate) fn try_new() -> Option<Self> {
        let ghost = Node::<Erased>::try_alloc()?;
        // SAFETY: `ghost` is a fresh allocation for a `Node<Erased>`, and its
        // links are initialized to the ghost itself.
        unsafe {
            ghost.as_ptr().write(Node {
                next: ghost,
                prev: ghost,
                element: Erased,
            });
        }
        let _marker = PhantomData;
        Some(Self { ghost, _marker })
    }

    /// Returns `true` if the ghost node is its own successor.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.front_node() == self.ghost_node()
    }

    /// Count the nodes by a full forward traversal.
    ///
    /// This operation should compute in *O*(*n*) time.
    pub(crate) fn len(&self) -> usize {
        self.iter().count()
    }

    /// Link a detached `node` right after `anchor`.
    ///
    /// It is unsafe because `anchor` must be a node of this list (the ghost
    /// included), and `node` must be a detached node that is not part of any
    /// list.
    pub(crate) unsafe fn link_after(&mut self, anchor: NonNull<Node<T>>, node: NonNull<Node<T>>) {
        self.attach_node(anchor, (*anchor.as_ptr()).next, node);
    }

    /// Link a detached `node` right before `anchor`.
    ///
    /// It is unsafe for the same reasons as [`List::link_after`].
    pub(crate) unsafe fn link_before(&mut self, anchor: NonNull<Node<T>>, node: NonNull<Node<T>>) {
        self.attach_node((*anchor.as_ptr()).prev, anchor, node);
    }

    /// Detach a single node `node` from the list, and return it as a box.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the list,
    /// or whether it is the ghost node.
    ///
    /// If the `node` does not belong to the list, this function call will make
    /// the list ill-formed.
    pub(crate) unsafe fn unlink(&mut self, node: NonNull<Node<T>>) -> Box<Node<T>> {
        let node = Box::from_raw(node.as_ptr());
        connect(node.prev, node.next);
        node
    }

    /// Detach the first node, or return `None` if the list is empty.
    pub(crate) fn unlink_front(&mut self) -> Option<Box<Node<T>>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the front node is a valid non-ghost node.
        Some(unsafe { self.unlink(self.front_node()) })
    }

    /// Detach the last node, or return `None` if the list is empty.
    pub(crate) fn unlink_back(&mut self) -> Option<Box<Node<T>>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the back node is a valid non-ghost node.
        Some(unsafe { self.unlink(self.back_node()) })
    }

    /// Unlink and drop every node, front first. The ghost node survives.
    pub(crate) fn clear(&mut self) {
        while self.unlink_front().is_some() {}
    }

    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a raw forward walk over the nodes, `front..ghost`.
    pub(crate) fn nodes(&self) -> Nodes<T> {
        Nodes::new(self.front_node(), self.ghost_node())
    }

    /// Walk the ring in both directions and panic on the first link whose
    /// partner does not point back.
    #[cfg(any(test, feature = "ring-check"))]
    pub(crate) fn check_ring(&self) {
        let ghost = self.ghost_node();
        let (mut forward, mut backward) = (0_usize, 0_usize);
        let mut node = ghost;
        // SAFETY: every link of a well-formed ring is valid; a broken one
        // fails the assertion before it is followed.
        unsafe {
            loop {
                let next = (*node.as_ptr()).next;
                assert_eq!(
                    (*next.as_ptr()).prev,
                    node,
                    "broken ring after node #{}",
                    forward
                );
                node = next;
                if node == ghost {
                    break;
                }
                forward += 1;
            }
            loop {
                node = (*node.as_ptr()).prev;
                if node == ghost {
                    break;
                }
                backward += 1;
            }
        }
        assert_eq!(forward, backward, "forward and backward walks disagree");
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Node<T> {
    /// Allocate uninitialized storage for a node, or return `None` if the
    /// global allocator fails.
    pub(crate) fn try_alloc() -> Option<NonNull<Node<T>>> {
        // SAFETY: a node always holds two pointers, so the layout is never zero-sized.
        NonNull::new(unsafe { alloc::alloc(Layout::new::<Node<T>>()) }.cast())
    }

    /// Give back storage obtained from [`Node::try_alloc`] that was never
    /// initialized.
    pub(crate) unsafe fn dealloc(node: NonNull<Node<T>>) {
        alloc::dealloc(node.as_ptr().cast(), Layout::new::<Node<T>>());
    }

    /// Write a detached node holding `element` into storage obtained from
    /// [`Node::try_alloc`].
    ///
    /// The links of a detached node dangle; they are only read after the
    /// node is attached to a list.
    pub(crate) unsafe fn init(node: NonNull<Node<T>>, element: T) -> NonNull<Node<T>> {
        node.as_ptr().write(Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            element,
        });
        node
    }

    #[allow(clippy::boxed_local)]
    pub(crate) fn into_element(self: Box<Self>) -> T {
        self.element
    }
}

/// Make `prev` and `next` adjacent: `prev.next = next` and `next.prev = prev`.
pub(crate) unsafe fn connect<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    (*prev.as_ptr()).next = next;
    (*next.as_ptr()).prev = prev;
}

#[cfg(debug_assertions)]
fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    unsafe {
        assert_eq!((*prev.as_ptr()).next, next);
        assert_eq!((*next.as_ptr()).prev, prev);
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the ghost was allocated with the layout of `Node<Erased>`
        // in `try_new`, and is released exactly once here.
        unsafe { drop(Box::from_raw(self.ghost.as_ptr())) };
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}
