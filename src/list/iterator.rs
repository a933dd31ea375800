use crate::list::{List, Node};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// An iterator over the elements of a `List`.
///
/// It uses a pair of nodes `start..end` to represent a half-open subrange
/// of the list, where `start` is inclusive and `end` is not.
///
/// Though the `Iter` does not hold a reference from the list,
/// it actually *borrows* (immutably) from the list, so a phantom
/// marker of `&'a List<T>` is added to protect the list from being
/// written.
pub(crate) struct Iter<'a, T: 'a> {
    start: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    _marker: PhantomData<&'a List<T>>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        let start = list.front_node();
        let end = list.ghost_node();
        let _marker = PhantomData;
        Self {
            start,
            end,
            _marker,
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter")
            .field(&self.clone().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    /// Return `*start` and reset the iterating range to `(start.next)..end`,
    /// or return `None` if `start..end` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start..end` is always a valid range of a list,
        // and it is not empty here, so it is safe.
        let current = unsafe { self.start.as_ref() };
        self.start = current.next;
        Some(&current.element)
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    /// Reset the iterating range to `start..(end.prev)` and return `*end`,
    /// or return `None` if `start..end` is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start..end` is always a valid range of a list,
        // and it is not empty here, so it is safe.
        self.end = unsafe { (*self.end.as_ptr()).prev };
        let current = unsafe { self.end.as_ref() };
        Some(&current.element)
    }
}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

/// A raw forward walk over the nodes `start..end`.
///
/// `next` is read before a node is yielded, so the yielded node may be
/// unlinked (and dropped) by the caller before the walk resumes. Any other
/// change to the linking structure during the walk is undefined.
///
/// The walk does not borrow the list; dereferencing the yielded pointers is
/// up to the caller.
pub(crate) struct Nodes<T> {
    start: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
}

impl<T> Nodes<T> {
    pub(crate) fn new(start: NonNull<Node<T>>, end: NonNull<Node<T>>) -> Self {
        Self { start, end }
    }
}

impl<T> Iterator for Nodes<T> {
    type Item = NonNull<Node<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        let current = self.start;
        // SAFETY: `current` is a linked non-ghost node of the walked list.
        self.start = unsafe { current.as_ref().next };
        Some(current)
    }
}

impl<T> FusedIterator for Nodes<T> {}

#[cfg(test)]
mod tests {
    use crate::list::tests::list_from;
    use std::fmt::Debug;

    #[test]
    fn test_iter() {
        fn test_iter<T, I>(input: I, mid: usize)
        where
            T: Eq + Debug + Clone,
            I: IntoIterator<Item = T>,
        {
            let vec: Vec<T> = input.into_iter().collect();
            let list = list_from(vec.clone());

            let mut iter = list.iter();
            for item in vec.iter() {
                assert_eq!(iter.next(), Some(item));
            }
            assert_eq!(iter.next(), None);
            assert_eq!(iter.next(), None);
            assert_eq!(iter.next_back(), None);

            let mut iter = list.iter();
            for item in vec.iter().take(mid) {
                assert_eq!(iter.next(), Some(item));
            }
            let mut iter = iter.rev();
            for item in vec.iter().skip(mid).rev() {
                assert_eq!(iter.next(), Some(item));
            }
            assert_eq!(iter.next(), None);
            assert_eq!(iter.next(), None);
            assert_eq!(iter.next_back(), None);

            assert_eq!(list.iter().last(), vec.last());
            assert_eq!(list.nodes().count(), vec.len());
        }
        test_iter(0..10, 10);
        test_iter(0..10, 8);
        test_iter(0..10, 5);
        test_iter(0..10, 0);
        test_iter(0..2, 1);
        test_iter(0..1, 1);
        test_iter(0..1, 0);
        test_iter(0..0, 0);
    }

    #[test]
    fn test_iter_debug() {
        let list = list_from([1, 2, 3]);
        assert_eq!(format!("{:?}", list.iter()), "Iter([1, 2, 3])");
    }
}
