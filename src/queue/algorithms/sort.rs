//! A generic merge sort over the ring, driven by an opaque `less`
//! comparator and no recursion.
//!
//! This is the engine behind [`Queue::sort_by`] and [`Queue::sort_by_key`],
//! and the benchmark rival of the recursive [`Queue::sort`]. It works
//! bottom-up: sorted runs of width 1, 2, 4, … are merged pairwise in place
//! until one run spans the whole queue. Merging relinks nodes and never
//! reallocates.
//!
//! [`Queue::sort`]: crate::Queue::sort
//! [`Queue::sort_by`]: crate::Queue::sort_by
//! [`Queue::sort_by_key`]: crate::Queue::sort_by_key

use crate::queue::{connect, Node, Queue};
use std::ptr::NonNull;

pub(crate) fn merge_sort<T, F>(queue: &mut Queue<T>, mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = queue.count();
    if len < 2 {
        return;
    }
    let end = queue.sentinel_node();
    let mut width = 1;
    while width < len {
        let mut start = queue.front_node();
        while start != end {
            start = unsafe { merge_adjacent_runs(start, end, width, &mut less) };
        }
        width *= 2;
    }
}

/// Walk at most `steps` nodes forward, stopping early at `end`.
unsafe fn advance<T>(
    mut node: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    mut steps: usize,
) -> NonNull<Node<T>> {
    while steps > 0 && node != end {
        node = node.as_ref().next;
        steps -= 1;
    }
    node
}

/// Merge the two adjacent sorted runs of at most `width` nodes starting at
/// `start`, and return the node following the merged region.
///
/// It is unsafe because `start` must be a node of the ring ended by `end`,
/// and both runs must already be sorted by `less`.
unsafe fn merge_adjacent_runs<T, F>(
    start: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    width: usize,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    let mid = advance(start, end, width);
    if mid == end {
        // a single (possibly short) run remains; nothing to merge
        return end;
    }
    let last = advance(mid, end, width);
    merge_runs(start, mid, last, less);
    // `last` lies outside the merged region, so it still delimits it.
    last
}

/// Merge the sorted run `mid..last` into the sorted run `start..mid`,
/// in place.
///
/// Nodes of the right run are moved, one maximal sub-run at a time, in
/// front of the first left-run node that is strictly greater. Equal
/// elements keep the left run's element first, so the merge is stable.
unsafe fn merge_runs<T, F>(
    start: NonNull<Node<T>>,
    mid: NonNull<Node<T>>,
    last: NonNull<Node<T>>,
    less: &mut F,
) where
    F: FnMut(&T, &T) -> bool,
{
    let (mut merged, merged_back, mut to_merge) = (start, mid.as_ref().prev, mid);
    // When the left run's back <= the right run's front, the whole region
    // is already sorted.
    while to_merge != last && less(&to_merge.as_ref().element, &merged_back.as_ref().element) {
        // Find the first merged node the current right-run front must
        // precede.
        while merged != to_merge && !less(&to_merge.as_ref().element, &merged.as_ref().element) {
            merged = merged.as_ref().next;
        }
        if merged == to_merge {
            break;
        }

        // Extend to the maximal right-run prefix that precedes `*merged`.
        let mut next_to_merge = to_merge.as_ref().next;
        while next_to_merge != last && less(&next_to_merge.as_ref().element, &merged.as_ref().element)
        {
            next_to_merge = next_to_merge.as_ref().next;
        }
        // Move the sub-run `to_merge..next_to_merge` in front of `merged`.
        move_nodes(to_merge, next_to_merge.as_ref().prev, merged);
        to_merge = next_to_merge;
    }
}

/// Relink the run `from_front..=from_back` to the position right before
/// `to`, without ever detaching it. All three nodes must belong to the
/// same ring.
unsafe fn move_nodes<T>(
    from_front: NonNull<Node<T>>,
    from_back: NonNull<Node<T>>,
    to: NonNull<Node<T>>,
) {
    connect(from_front.as_ref().prev, from_back.as_ref().next);
    connect(to.as_ref().prev, from_front);
    connect(from_back, to);
}

#[cfg(test)]
mod tests {
    use crate::Queue;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::iter::FromIterator;

    #[test]
    fn sort_by_matches_std_sort() {
        let mut rng = StdRng::seed_from_u64(13);
        for len in [0usize, 1, 2, 3, 7, 8, 9, 64, 127] {
            let values: Vec<u32> = (0..len).map(|_| rng.gen_range(0..32)).collect();

            let mut queue = Queue::from_iter(values.iter().copied());
            queue.sort_by(|a, b| a.cmp(b));

            let mut expected = values;
            expected.sort();
            assert_eq!(Vec::from_iter(queue), expected, "len = {}", len);
        }
    }

    #[test]
    fn sort_by_reversed_comparator() {
        let mut queue = Queue::from_iter([3, 1, 4, 1, 5, 9, 2, 6]);
        queue.sort_by(|a, b| b.cmp(a));
        assert_eq!(Vec::from_iter(queue), vec![9, 6, 5, 4, 3, 2, 1, 1]);
    }

    #[test]
    fn sort_by_key_is_stable() {
        // Sort pairs by their first component only; the second component
        // records the original order.
        let mut queue = Queue::from_iter([(2, 0), (1, 1), (2, 2), (1, 3), (2, 4)]);
        queue.sort_by_key(|&(key, _)| key);
        assert_eq!(
            Vec::from_iter(queue),
            vec![(1, 1), (1, 3), (2, 0), (2, 2), (2, 4)],
        );
    }

    #[test]
    fn both_engines_agree() {
        let mut rng = StdRng::seed_from_u64(99);
        let values: Vec<u8> = (0..200).map(|_| rng.gen()).collect();

        let mut recursive = Queue::from_iter(values.iter().copied());
        recursive.sort(crate::Order::Ascending);

        let mut adapted = Queue::from_iter(values);
        adapted.sort_by(|a, b| a.cmp(b));

        assert_eq!(recursive, adapted);
    }
}
