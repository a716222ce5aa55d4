use crate::queue::Queue;
use rand::Rng;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

mod sort;

impl<T: PartialEq> PartialEq for Queue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for Queue<T> {}

impl<T: PartialOrd> PartialOrd for Queue<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for Queue<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone> Clone for Queue<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: Hash> Hash for Queue<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

/// The direction shared by every ordering-dependent queue operation.
///
/// Passed by value wherever a comparison happens; there is no ambient
/// comparison state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    /// Returns `true` when `a` may stay in front of `b` under this order.
    /// Equal elements always may, which is what keeps the merges stable.
    fn admits<T: Ord>(self, a: &T, b: &T) -> bool {
        match self {
            Order::Ascending => a <= b,
            Order::Descending => a >= b,
        }
    }
}

/// One record of the auxiliary chain driving [`Queue::merge_many`].
///
/// A record borrows one participating queue exclusively for the duration of
/// the merge and remembers the element count it was created with, plus a
/// caller-chosen identifier. A record whose identifier equals the first
/// record's designates the accumulator and is skipped during the walk.
pub struct QueueContext<'a, T> {
    queue: &'a mut Queue<T>,
    size: usize,
    id: usize,
}

impl<'a, T> QueueContext<'a, T> {
    /// Wrap one participating queue, capturing its current element count.
    pub fn new(id: usize, queue: &'a mut Queue<T>) -> Self {
        let size = queue.count();
        Self { queue, size, id }
    }

    /// The identifier this record was created with.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The element count captured when this record was created.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl<T> Queue<T> {
    /// Permutes the payloads of the queue uniformly at random, using
    /// Fisher–Yates over the fixed node positions.
    ///
    /// Payloads are swapped in place; no node is ever relinked, so the
    /// operation is pure pointer-free data movement. Does nothing on an
    /// empty or singular queue.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*²) time (each round walks to
    /// a random position) and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c", "d"]);
    /// queue.shuffle(&mut rand::thread_rng());
    ///
    /// let mut contents: Vec<_> = queue.into_iter().collect();
    /// contents.sort();
    /// assert_eq!(contents, vec!["a", "b", "c", "d"]);
    /// ```
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.is_empty() || self.is_singular() {
            return;
        }
        let mut remaining = self.count();
        let sentinel = self.sentinel_node();
        // `slot` walks from the tail inward; each round the payload of a
        // random node among the first `remaining` moves into it.
        let mut slot = unsafe { sentinel.as_ref().prev };
        while remaining != 1 {
            let idx = rng.gen_range(0..remaining);
            let mut pick = unsafe { sentinel.as_ref().next };
            for _ in 0..idx {
                pick = unsafe { pick.as_ref().next };
            }
            if pick != slot {
                // SAFETY: `pick` and `slot` are distinct data nodes of this
                // queue, so the swap touches two disjoint payloads.
                unsafe {
                    std::ptr::swap(&mut (*pick.as_ptr()).element, &mut (*slot.as_ptr()).element)
                };
            }
            remaining -= 1;
            slot = unsafe { slot.as_ref().prev };
        }
    }

    /// Removes the middle element and returns its payload, or `None` if the
    /// queue is empty.
    ///
    /// The middle is located by walking two cursors from both ends toward
    /// each other; on even lengths the element right after the meeting gap
    /// is taken, i.e. the one at index `len / 2`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c"]);
    /// assert_eq!(queue.remove_middle(), Some("b"));
    /// assert_eq!(Vec::from_iter(queue), vec!["a", "c"]);
    ///
    /// let mut empty = Queue::<&str>::new();
    /// assert_eq!(empty.remove_middle(), None);
    /// ```
    pub fn remove_middle(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let mut left = self.front_node();
        let mut right = self.back_node();
        while left != right && unsafe { left.as_ref().next } != right {
            left = unsafe { left.as_ref().next };
            right = unsafe { right.as_ref().prev };
        }
        // SAFETY: `right` is a data node belonging to this queue.
        let node = unsafe { self.detach_node(right) };
        Some(node.element)
    }

    /// Removes every member of every run of equal adjacent elements.
    ///
    /// A run of two or more equal neighbours disappears entirely, the
    /// first member included, so this is **not** the keep-one deduplication
    /// of [`Vec::dedup`]. Elements without an equal neighbour survive.
    /// Applying the operation twice gives the same result as applying it
    /// once.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["1", "1", "2"]);
    /// queue.remove_duplicate_runs();
    /// assert_eq!(Vec::from_iter(queue), vec!["2"]);
    /// ```
    pub fn remove_duplicate_runs(&mut self)
    where
        T: PartialEq,
    {
        let sentinel = self.sentinel_node();
        let mut current = self.front_node();
        let mut in_run = false;
        while current != sentinel {
            // take the successor before any unlinking below
            let next = unsafe { current.as_ref().next };
            if next == sentinel {
                // a trailing run touches the sentinel; flush its last member
                if in_run {
                    drop(unsafe { self.detach_node(current) });
                }
                return;
            }
            let equal_ahead = unsafe { current.as_ref().element == next.as_ref().element };
            if equal_ahead {
                drop(unsafe { self.detach_node(current) });
                in_run = true;
            } else if in_run {
                drop(unsafe { self.detach_node(current) });
                in_run = false;
            }
            current = next;
        }
    }

    /// Swaps every two adjacent elements by relinking their nodes.
    ///
    /// On an odd-length queue the final unpaired element stays where it is.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter([1, 2, 3, 4, 5]);
    /// queue.swap_pairs();
    /// assert_eq!(Vec::from_iter(queue), vec![2, 1, 4, 3, 5]);
    /// ```
    pub fn swap_pairs(&mut self) {
        let sentinel = self.sentinel_node();
        let mut current = self.front_node();
        while current != sentinel {
            let partner = unsafe { current.as_ref().next };
            if partner == sentinel {
                return;
            }
            // Reinsert `current` right after `partner`, which swaps the
            // pair and leaves `current.next` pointing at the next pair.
            let node = unsafe { self.detach_node(current) };
            let node = crate::queue::leak_node(node);
            let after = unsafe { partner.as_ref().next };
            unsafe { self.attach_node(partner, after, node) };
            current = unsafe { node.as_ref().next };
        }
    }

    /// Reverses the order of the elements in place.
    ///
    /// Each node is relinked directly after the sentinel (taking its
    /// successor first), which inverts the whole ring in one pass without
    /// reallocating anything.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c"]);
    /// queue.reverse();
    /// assert_eq!(Vec::from_iter(queue), vec!["c", "b", "a"]);
    /// ```
    pub fn reverse(&mut self) {
        let sentinel = self.sentinel_node();
        let mut current = self.front_node();
        while current != sentinel {
            let next = unsafe { current.as_ref().next };
            // SAFETY: `current` is a data node of this queue, and the
            // sentinel is adjacent to whatever the front is right now.
            let node = unsafe { self.detach_node(current) };
            let node = crate::queue::leak_node(node);
            unsafe { self.attach_node(sentinel, self.front_node(), node) };
            current = next;
        }
    }

    /// Reverses the elements in groups of exactly `k`.
    ///
    /// Every full group of `k` consecutive elements is cut out, reversed
    /// and spliced back in place. A trailing group shorter than `k` keeps
    /// its original order, so `k` beyond the queue length changes nothing
    /// and `k` equal to it reverses the whole queue once. `k < 2` leaves
    /// the queue untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter([1, 2, 3, 4, 5]);
    /// queue.reverse_in_groups(2);
    /// assert_eq!(Vec::from_iter(queue), vec![2, 1, 4, 3, 5]);
    /// ```
    pub fn reverse_in_groups(&mut self, k: usize) {
        if k < 2 {
            return;
        }
        let sentinel = self.sentinel_node();
        // `cut` is the node right before the group currently being counted.
        let mut cut = sentinel;
        let mut current = self.front_node();
        let mut count = 0;
        while current != sentinel {
            let next = unsafe { current.as_ref().next };
            count += 1;
            if count == k {
                let group_front = unsafe { cut.as_ref().next };
                // SAFETY: `group_front..=current` are the `k` nodes counted
                // since `cut`, all belonging to this queue.
                let detached = unsafe {
                    self.detach_nodes(
                        group_front,
                        current,
                        #[cfg(feature = "length")]
                        k,
                    )
                };
                let mut group = Queue::from_detached(detached);
                group.reverse();
                let after = unsafe { cut.as_ref().next };
                if let Some(detached) = group.detach_all_nodes() {
                    unsafe { self.attach_nodes(cut, after, detached) };
                }
                count = 0;
                // the reversed group's back is now the node before `next`
                cut = unsafe { next.as_ref().prev };
            }
            current = next;
        }
    }

    /// Merges the already-sorted `other` into the already-sorted `self`.
    ///
    /// Both queues must be sorted in the given `order`. Afterwards `self`
    /// holds every element of both queues in sorted order and `other` is
    /// empty. On equal fronts the element of `other` wins, which keeps the
    /// merge stable when `other` carries the earlier half of a split.
    ///
    /// Elements move exclusively by relinking; no node is reallocated.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* + *m*) time and *O*(1)
    /// memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::{Order, Queue};
    /// use std::iter::FromIterator;
    ///
    /// let mut first = Queue::from_iter(["a", "c"]);
    /// let mut second = Queue::from_iter(["b", "d"]);
    /// second.merge_sorted_from(&mut first, Order::Ascending);
    ///
    /// assert!(first.is_empty());
    /// assert_eq!(Vec::from_iter(second), vec!["a", "b", "c", "d"]);
    /// ```
    pub fn merge_sorted_from(&mut self, other: &mut Self, order: Order)
    where
        T: Ord,
    {
        let mut merged = Queue::new();
        while !self.is_empty() && !other.is_empty() {
            // SAFETY: both queues are non-empty, so both fronts are data
            // nodes.
            let take_other = unsafe {
                order.admits(
                    &other.front_node().as_ref().element,
                    &self.front_node().as_ref().element,
                )
            };
            // SAFETY: the source queue was just checked non-empty.
            if take_other {
                unsafe { other.relink_front_to_back_of(&mut merged) };
            } else {
                unsafe { self.relink_front_to_back_of(&mut merged) };
            }
        }
        if self.is_empty() {
            merged.append(other);
        }
        // The unconsumed remainder of `self`, if any, is ordered after
        // everything merged so far.
        self.prepend(&mut merged);
    }

    /// Sorts the queue in the given `order`.
    ///
    /// This is a recursive merge sort working directly on the ring: the
    /// midpoint is located with a slow/fast two-cursor walk in one pass,
    /// the left half is cut out as its own queue, both halves are sorted
    /// and merged back with [`merge_sorted_from`]. The sort is stable.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* log *n*) time and
    /// *O*(log *n*) stack space; no node is ever reallocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::{Order, Queue};
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["banana", "apple", "cherry"]);
    /// queue.sort(Order::Ascending);
    /// assert_eq!(
    ///     Vec::from_iter(queue),
    ///     vec!["apple", "banana", "cherry"],
    /// );
    /// ```
    ///
    /// [`merge_sorted_from`]: Queue::merge_sorted_from
    pub fn sort(&mut self, order: Order)
    where
        T: Ord,
    {
        if self.is_empty() || self.is_singular() {
            return;
        }
        let mut left = self.front_node();
        let mut right = self.back_node();
        #[cfg(feature = "length")]
        let mut left_len = 1;
        while left != right && unsafe { left.as_ref().next } != right {
            left = unsafe { left.as_ref().next };
            right = unsafe { right.as_ref().prev };
            #[cfg(feature = "length")]
            {
                left_len += 1;
            }
        }
        // `front..=left` is the left half, one node longer on odd lengths.
        let detached = unsafe {
            self.detach_nodes(
                self.front_node(),
                left,
                #[cfg(feature = "length")]
                left_len,
            )
        };
        let mut first = Queue::from_detached(detached);
        first.sort(order);
        self.sort(order);
        self.merge_sorted_from(&mut first, order);
    }

    /// Sorts the queue with a comparator function, using a non-recursive
    /// generic merge sort.
    ///
    /// This is the adapter counterpart of [`sort`]: same result, different
    /// engine. A bottom-up merge driven by an opaque `compare` callback
    /// replaces the recursive split. Useful for key-based orders and for
    /// benchmarking one engine against the other.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter([5, 2, 4, 1, 3]);
    /// queue.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(Vec::from_iter(queue), vec![5, 4, 3, 2, 1]);
    /// ```
    ///
    /// [`sort`]: Queue::sort
    /// [`sort_by`]: Queue::sort_by
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        sort::merge_sort(self, |a, b| compare(a, b) == Ordering::Less)
    }

    /// Sorts the queue with a key extraction function.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter([-5i32, 4, 1, -3, 2]);
    /// queue.sort_by_key(|k| k.abs());
    /// assert_eq!(Vec::from_iter(queue), vec![1, 2, -3, 4, -5]);
    /// ```
    pub fn sort_by_key<K, F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        sort::merge_sort(self, |a, b| f(a).lt(&f(b)))
    }

    /// Merges every queue of the context chain into the first one.
    ///
    /// The first record's queue is the accumulator. Walking the remaining
    /// records in order, every record whose identifier differs from the
    /// accumulator's has its size folded into the running total and its
    /// queue merged into the accumulator with [`merge_sorted_from`]; a
    /// record carrying the accumulator's identifier designates the
    /// accumulator itself and is skipped.
    ///
    /// Returns the total element count across all participating queues, or
    /// 0 when the chain is empty or holds a single record. Afterwards the
    /// accumulator holds every element in sorted order and every other
    /// participating queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::{Order, Queue, QueueContext};
    /// use std::iter::FromIterator;
    ///
    /// let mut a = Queue::from_iter(["a", "d"]);
    /// let mut b = Queue::from_iter(["b", "e"]);
    /// let mut c = Queue::from_iter(["c", "f"]);
    ///
    /// let mut chain = vec![
    ///     QueueContext::new(0, &mut a),
    ///     QueueContext::new(1, &mut b),
    ///     QueueContext::new(2, &mut c),
    /// ];
    /// let total = Queue::merge_many(&mut chain, Order::Ascending);
    /// drop(chain);
    ///
    /// assert_eq!(total, 6);
    /// assert_eq!(
    ///     Vec::from_iter(a),
    ///     vec!["a", "b", "c", "d", "e", "f"],
    /// );
    /// assert!(b.is_empty() && c.is_empty());
    /// ```
    ///
    /// [`merge_sorted_from`]: Queue::merge_sorted_from
    pub fn merge_many(contexts: &mut [QueueContext<'_, T>], order: Order) -> usize
    where
        T: Ord,
    {
        let (accumulator, rest) = match contexts.split_first_mut() {
            Some((first, rest)) if !rest.is_empty() => (first, rest),
            _ => return 0,
        };
        let mut total = accumulator.size;
        for context in rest {
            if context.id == accumulator.id {
                continue;
            }
            total += context.size;
            accumulator.queue.merge_sorted_from(context.queue, order);
        }
        total
    }

    /// Removes every element that has a strictly smaller element somewhere
    /// to its right, and returns the number of survivors.
    ///
    /// The surviving sequence is non-decreasing from front to back.
    /// Returns 0 on an empty queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["e", "b", "d", "c", "c"]);
    /// assert_eq!(queue.retain_ascending(), 3);
    /// assert_eq!(Vec::from_iter(queue), vec!["b", "c", "c"]);
    /// ```
    pub fn retain_ascending(&mut self) -> usize
    where
        T: Ord,
    {
        self.retain_monotonic(Order::Ascending)
    }

    /// Removes every element that has a strictly greater element somewhere
    /// to its right, and returns the number of survivors.
    ///
    /// The surviving sequence is non-increasing from front to back.
    /// Returns 0 on an empty queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["b", "e", "c", "d", "a"]);
    /// assert_eq!(queue.retain_descending(), 3);
    /// assert_eq!(Vec::from_iter(queue), vec!["e", "d", "a"]);
    /// ```
    pub fn retain_descending(&mut self) -> usize
    where
        T: Ord,
    {
        self.retain_monotonic(Order::Descending)
    }

    /// Right-to-left scan shared by the two monotonic filters: keep the
    /// predecessor while the order admits it in front of the current
    /// survivor, otherwise unlink and drop it and retry against the same
    /// survivor.
    fn retain_monotonic(&mut self, order: Order) -> usize
    where
        T: Ord,
    {
        if self.is_empty() {
            return 0;
        }
        let sentinel = self.sentinel_node();
        let mut survivor = self.back_node();
        let mut count = 1;
        while unsafe { survivor.as_ref().prev } != sentinel {
            let prev = unsafe { survivor.as_ref().prev };
            let keep = unsafe { order.admits(&prev.as_ref().element, &survivor.as_ref().element) };
            if keep {
                count += 1;
                survivor = prev;
            } else {
                // SAFETY: `prev` is a data node belonging to this queue.
                drop(unsafe { self.detach_node(prev) });
            }
        }
        count
    }
}
