use std::mem;

use tracing::trace;

use crate::queue::Queue;

mod sort;

impl Queue {
    /// Delete the element at index ⌊*n* / 2⌋, where *n* is the size of the
    /// queue, counting from zero at the head. With six elements, the one at
    /// index 3 is deleted.
    ///
    /// Returns `true` if an element was deleted, which is the case unless the
    /// queue is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time: one walk to count the
    /// elements, and another one to find the middle.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_values(["a", "b", "c", "d"]).unwrap();
    /// assert!(queue.delete_middle());
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), ["a", "b", "d"]);
    /// ```
    pub fn delete_middle(&mut self) -> bool {
        let mut countdown = self.size() / 2;
        for node in self.list.nodes() {
            if countdown == 0 {
                // SAFETY: `node` is a linked element of the queue, and the walk
                // stops right after it is unlinked.
                drop(unsafe { self.list.unlink(node) });
                #[cfg(feature = "ring-check")]
                self.list.check_ring();
                return true;
            }
            countdown -= 1;
        }
        false
    }

    /// Delete every element whose string equals the string of a neighbour,
    /// leaving only the strings that were unique in the queue.
    ///
    /// The queue must already be sorted (see [`Queue::sort`]), so that equal
    /// strings are adjacent. Each run of two or more equal strings is deleted
    /// as a whole, first occurrence included. On an unsorted queue only runs
    /// of adjacent equal strings are deleted.
    ///
    /// Returns the number of deleted elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_values(["a", "a", "b", "c", "c", "c", "d"]).unwrap();
    /// assert_eq!(queue.delete_duplicates(), 5);
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), ["b", "d"]);
    /// ```
    pub fn delete_duplicates(&mut self) -> usize {
        let end = self.list.ghost_node();
        let mut deleted = 0;
        let mut node = self.list.front_node();
        // SAFETY: `node` and `run` are always linked nodes of the queue or the
        // ghost, and the element of the ghost is never read.
        unsafe {
            while node != end {
                let mut run = node.as_ref().next;
                let mut duplicated = false;
                while run != end && run.as_ref().element == node.as_ref().element {
                    let next = run.as_ref().next;
                    drop(self.list.unlink(run));
                    deleted += 1;
                    duplicated = true;
                    run = next;
                }
                if duplicated {
                    drop(self.list.unlink(node));
                    deleted += 1;
                }
                node = run;
            }
        }
        #[cfg(feature = "ring-check")]
        self.list.check_ring();
        trace!(deleted, "deleted duplicate strings");
        deleted
    }

    /// Swap the strings of every two adjacent elements: the ones at 0 and 1,
    /// at 2 and 3, and so on. With an odd number of elements, the last one
    /// stays put.
    ///
    /// Only the strings move; the elements keep their places in the ring.
    /// Swapping twice restores the original order.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_values(["1", "2", "3", "4", "5"]).unwrap();
    /// queue.swap_pairs();
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), ["2", "1", "4", "3", "5"]);
    /// ```
    pub fn swap_pairs(&mut self) {
        let end = self.list.ghost_node();
        let mut first = self.list.front_node();
        // SAFETY: `first` and `second` are distinct linked non-ghost nodes
        // whenever their strings are swapped.
        unsafe {
            while first != end {
                let mut second = first.as_ref().next;
                if second == end {
                    break;
                }
                mem::swap(&mut first.as_mut().element, &mut second.as_mut().element);
                first = second.as_ref().next;
            }
        }
    }

    /// Reverse the queue by swapping strings between a head-side and a
    /// tail-side element, moving both inward until they meet or cross.
    ///
    /// Only the strings move; no element is relinked, allocated or released.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_values(["a", "b", "c", "d"]).unwrap();
    /// queue.reverse();
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), ["d", "c", "b", "a"]);
    /// ```
    pub fn reverse(&mut self) {
        let mut front = self.list.front_node();
        let mut back = self.list.back_node();
        // SAFETY: in a non-empty queue `front` and `back` are distinct linked
        // non-ghost nodes inside the loop; in an empty one both are the ghost
        // and the loop is skipped.
        unsafe {
            while front != back {
                mem::swap(&mut front.as_mut().element, &mut back.as_mut().element);
                if front.as_ref().next == back {
                    break;
                }
                front = front.as_ref().next;
                back = back.as_ref().prev;
            }
        }
    }

    /// Sort the queue in ascending byte-lexicographic order.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time, with a
    /// recursion of *O*(log(*n*)) depth.
    ///
    /// # Current Implementation
    ///
    /// A top-down merge sort over the nodes themselves: no element is
    /// allocated, copied or released.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_values(["b", "a", "c", "B"]).unwrap();
    /// queue.sort();
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), ["B", "a", "b", "c"]);
    /// ```
    pub fn sort(&mut self) {
        sort::merge_sort(&mut self.list, |a, b| a.as_bytes() < b.as_bytes());
        #[cfg(feature = "ring-check")]
        self.list.check_ring();
    }
}

#[cfg(test)]
mod tests {
    use crate::Queue;

    fn queue_eq(queue: &Queue, expected: &[&str]) {
        queue.list.check_ring();
        assert_eq!(queue.iter().collect::<Vec<_>>(), expected);
    }

    fn letters(n: usize) -> Vec<String> {
        (b'a'..)
            .take(n)
            .map(|c| char::from(c).to_string())
            .collect()
    }

    #[test]
    fn queue_delete_middle() {
        fn test_delete_middle(n: usize) {
            let values = letters(n);
            let mut queue = Queue::from_values(&values).unwrap();
            assert_eq!(queue.delete_middle(), n > 0);

            let mut expected: Vec<&str> = values.iter().map(String::as_str).collect();
            if n > 0 {
                expected.remove(n / 2);
            }
            queue_eq(&queue, &expected);
        }
        (0..=7).for_each(test_delete_middle);

        let mut queue = Queue::from_values(["a", "b", "c", "d", "e", "f"]).unwrap();
        assert!(queue.delete_middle());
        queue_eq(&queue, &["a", "b", "c", "e", "f"]);
        assert!(queue.delete_middle());
        queue_eq(&queue, &["a", "b", "e", "f"]);
    }

    #[test]
    fn queue_delete_duplicates() {
        fn test_delete_duplicates(input: &[&str], expected: &[&str]) {
            let mut queue = Queue::from_values(input).unwrap();
            assert_eq!(queue.delete_duplicates(), input.len() - expected.len());
            queue_eq(&queue, expected);
            // idempotent once the duplicates are gone
            assert_eq!(queue.delete_duplicates(), 0);
            queue_eq(&queue, expected);
        }
        test_delete_duplicates(&[], &[]);
        test_delete_duplicates(&["a"], &["a"]);
        test_delete_duplicates(&["a", "a"], &[]);
        test_delete_duplicates(&["a", "b", "c"], &["a", "b", "c"]);
        test_delete_duplicates(&["a", "a", "b", "b", "b", "c"], &["c"]);
        test_delete_duplicates(&["a", "b", "b", "c"], &["a", "c"]);
        test_delete_duplicates(&["a", "b", "c", "c"], &["a", "b"]);
        test_delete_duplicates(&["x", "x", "x", "x"], &[]);
        test_delete_duplicates(&["", "", "a", "aa", "aa", "ab"], &["a", "ab"]);
    }

    #[test]
    fn queue_delete_duplicates_unsorted() {
        let mut queue = Queue::from_values(["b", "b", "a", "b"]).unwrap();
        assert_eq!(queue.delete_duplicates(), 2);
        queue_eq(&queue, &["a", "b"]);
    }

    #[test]
    fn queue_swap_pairs() {
        fn test_swap_pairs(input: &[&str], expected: &[&str]) {
            let mut queue = Queue::from_values(input).unwrap();
            queue.swap_pairs();
            queue_eq(&queue, expected);
            queue.swap_pairs();
            queue_eq(&queue, input);
        }
        test_swap_pairs(&[], &[]);
        test_swap_pairs(&["a"], &["a"]);
        test_swap_pairs(&["a", "b"], &["b", "a"]);
        test_swap_pairs(&["a", "b", "c"], &["b", "a", "c"]);
        test_swap_pairs(&["a", "b", "c", "d"], &["b", "a", "d", "c"]);
    }

    #[test]
    fn queue_reverse() {
        for n in 0..=6 {
            let values = letters(n);
            let mut queue = Queue::from_values(&values).unwrap();
            queue.reverse();
            let expected: Vec<&str> = values.iter().rev().map(String::as_str).collect();
            queue_eq(&queue, &expected);
            queue.reverse();
            assert!(queue.iter().eq(values.iter().map(String::as_str)));
        }
    }

    #[test]
    fn queue_sort() {
        fn test_sort(input: &[&str]) {
            let mut queue = Queue::from_values(input).unwrap();
            queue.sort();
            let mut expected = input.to_vec();
            expected.sort_unstable();
            queue_eq(&queue, &expected);
            assert!(queue.is_sorted());
        }
        test_sort(&[]);
        test_sort(&["a"]);
        test_sort(&["b", "a"]);
        test_sort(&["b", "a", "c"]);
        test_sort(&["d", "c", "b", "a"]);
        test_sort(&["a", "b", "c", "d", "e"]);
        test_sort(&[
            "gerbil", "bear", "dolphin", "bear", "", "zebra", "alpaca", "bee",
        ]);
        test_sort(&["aa", "a", "ab", "b", "ba", "A", "Z", "z"]);
    }

    #[test]
    fn queue_sort_then_delete_duplicates() {
        let mut queue = Queue::from_values(["c", "a", "b", "a", "c", "d"]).unwrap();
        queue.sort();
        queue_eq(&queue, &["a", "a", "b", "c", "c", "d"]);
        assert_eq!(queue.delete_duplicates(), 4);
        queue_eq(&queue, &["b", "d"]);
    }

    #[test]
    fn queue_empty_noops() {
        let mut queue = Queue::new().unwrap();
        let mut buf = [0_u8; 4];
        assert!(queue.remove_head(&mut buf).is_none());
        assert!(!queue.delete_middle());
        assert_eq!(queue.delete_duplicates(), 0);
        queue.sort();
        queue.reverse();
        queue.swap_pairs();
        queue_eq(&queue, &[]);
    }
}
