use crate::list::{connect, List, Node};
use std::ptr::NonNull;

/// Sort `list` with a top-down merge sort over its nodes.
///
/// The ring is opened into a forward chain `front -> ... -> back -> ghost`
/// where the ghost only acts as the terminator: while the chain is sorted
/// only `next` links are maintained, and the `prev` links (the ghost's
/// included) are stale. A final forward pass restores them and closes the
/// ring again.
///
/// # Panics
///
/// `less` must not panic. A panic while the chain is open leaves the ring
/// broken, and dropping the list afterwards is undefined behavior.
pub(crate) fn merge_sort<T, F>(list: &mut List<T>, mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    if list.is_empty() {
        return;
    }
    let end = list.ghost_node();
    // SAFETY: the chain only ever holds nodes of `list`, each exactly once,
    // and it is closed into a well-formed ring before returning.
    unsafe {
        let head = sort_chain(list.front_node(), end, &mut less);
        let mut prev = end;
        let mut node = head;
        while node != end {
            connect(prev, node);
            prev = node;
            node = node.as_ref().next;
        }
        connect(prev, end);
    }
}

/// Sort the chain starting at `head` and terminated by `end`, and return its
/// new head.
unsafe fn sort_chain<T, F>(
    head: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    if head == end || head.as_ref().next == end {
        return head;
    }
    // `slow` advances one node per two of `fast`, and stops at the last
    // node of the left half.
    let (mut slow, mut fast) = (head, head.as_ref().next);
    while fast != end && fast.as_ref().next != end {
        slow = slow.as_ref().next;
        fast = fast.as_ref().next.as_ref().next;
    }
    let right = slow.as_ref().next;
    slow.as_mut().next = end;

    let left = sort_chain(head, end, less);
    let right = sort_chain(right, end, less);
    merge_chains(left, right, end, less)
}

/// Merge two sorted chains terminated by `end`, and return the head of the
/// merged chain. On ties the left node goes first.
unsafe fn merge_chains<T, F>(
    mut left: NonNull<Node<T>>,
    mut right: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    let mut head = end;
    let mut tail: Option<NonNull<Node<T>>> = None;
    while left != end && right != end {
        let side = if less(&right.as_ref().element, &left.as_ref().element) {
            &mut right
        } else {
            &mut left
        };
        let taken = *side;
        *side = taken.as_ref().next;
        append(&mut head, &mut tail, taken);
    }
    // At most one side is left, and it is already sorted.
    if left != end {
        append(&mut head, &mut tail, left);
    } else if right != end {
        append(&mut head, &mut tail, right);
    }
    head
}

/// Link `node` after `tail`, or make it the head of an empty chain.
unsafe fn append<T>(
    head: &mut NonNull<Node<T>>,
    tail: &mut Option<NonNull<Node<T>>>,
    node: NonNull<Node<T>>,
) {
    match tail {
        Some(tail) => tail.as_mut().next = node,
        None => *head = node,
    }
    *tail = Some(node);
}

#[cfg(test)]
mod tests {
    use super::merge_sort;
    use crate::list::tests::list_from;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn sorted<T: Ord + Clone + std::fmt::Debug>(input: Vec<T>) -> Vec<T> {
        let mut list = list_from(input);
        merge_sort(&mut list, |a, b| a < b);
        list.check_ring();
        let forward: Vec<T> = list.iter().cloned().collect();
        let mut backward: Vec<T> = list.iter().rev().cloned().collect();
        backward.reverse();
        assert_eq!(forward, backward);
        forward
    }

    #[test]
    fn sort_small() {
        assert_eq!(sorted(Vec::<i32>::new()), vec![]);
        assert_eq!(sorted(vec![1]), vec![1]);
        assert_eq!(sorted(vec![2, 1]), vec![1, 2]);
        assert_eq!(sorted(vec![1, 2]), vec![1, 2]);
        assert_eq!(sorted(vec![3, 1, 2]), vec![1, 2, 3]);
    }

    #[test]
    fn sort_against_vec() {
        // a fixed pseudo-random sequence with plenty of ties
        let mut rng = SmallRng::seed_from_u64(12345);
        for len in [7, 8, 9, 31, 32, 33, 100, 257].iter().copied() {
            let input: Vec<u32> = (0..len).map(|_| rng.random_range(0..50)).collect();
            let mut expected = input.clone();
            expected.sort();
            assert_eq!(sorted(input), expected);
        }
        assert_eq!(
            sorted((0..100).rev().collect::<Vec<i32>>()),
            (0..100).collect::<Vec<_>>()
        );
    }

    #[test]
    fn sort_is_stable() {
        let mut list = list_from(vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd'), (1, 'e')]);
        merge_sort(&mut list, |a, b| a.0 < b.0);
        assert_eq!(list.iter().map(|&(_, c)| c).collect::<String>(), "bdace");
    }
}
