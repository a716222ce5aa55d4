//! This crate provides a double-ended queue with owned nodes, implemented
//! as a cyclic doubly-linked list, together with a family of structural
//! algorithms that reshape the queue purely by relinking nodes.
//!
//! The [`Queue`] supports insertion and removal at both ends in constant
//! time. On top of the ring it offers randomized shuffling, middle-element
//! removal, elimination of runs of equal neighbours, pairwise swapping,
//! full and grouped reversal, two-way and k-way merging of sorted queues,
//! an in-place merge sort, and monotonic filtering, all without ever
//! copying or reallocating an element.
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use ring_queue::{Order, Queue};
//! use std::iter::FromIterator;
//!
//! let mut queue = Queue::from_iter(["c", "a", "d", "b"]);
//!
//! queue.push_front("e"); // ["e", "c", "a", "d", "b"]
//! assert_eq!(queue.pop_back(), Some("b"));
//!
//! queue.sort(Order::Ascending);
//! assert_eq!(Vec::from_iter(&queue), vec![&"a", &"c", &"d", &"e"]);
//!
//! queue.reverse();
//! assert_eq!(Vec::from_iter(queue), vec!["e", "d", "c", "a"]);
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the queue is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                    Sentinel node N  │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║ payload T ║           ║ payload T ║                        ┊No payload ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │      Node 0                  Node 1                               ↑   ↑
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║ sentinel  ║ ──────────────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║   (len)   ║
//! ╚═══════════╝
//!     Queue
//! ```
//! The `Queue` contains:
//! - a pointer `sentinel` that points to the sentinel node;
//! - a length field `len` indicating the number of elements. It can be
//!   disabled by disabling the `length` feature in your `Cargo.toml`:
//! ```text
//! [dependencies]
//! ring_queue = { default-features = false }
//! ```
//!
//! Each node of the queue `Queue<T>` is allocated on the heap, and
//! contains:
//! - the `next` pointer that points to the next element (or the sentinel
//!   node if it is the last element in the queue);
//! - the `prev` pointer that points to the previous element (or the
//!   sentinel node if it is the first element in the queue);
//! - the actual payload `T` that depends on the element type of the queue,
//!   except the sentinel node.
//!
//! Note that the sentinel node has *NO* payload to save memory.
//!
//! Initially, the sentinel is alone in an empty queue, with its `next` and
//! `prev` pointers pointing to itself.
//!
//! As elements are inserted, `sentinel.next` points to the first element,
//! and `sentinel.prev` points to the last element of the queue.
//!
//! # Iteration
//!
//! Iterating over a queue is by the [`Iter`] and [`IterMut`] iterators.
//! These are double-ended iterators and iterate the queue like an array
//! (fused and non-cyclic). [`IterMut`] provides mutability of the elements
//! (but not of the linked structure of the queue).
//!
//! ## Examples
//!
//! ```
//! use ring_queue::Queue;
//! use std::iter::FromIterator;
//!
//! let mut queue = Queue::from_iter([1, 2, 3]);
//! let mut iter = queue.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), Some(&3));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused and non-cyclic
//!
//! queue.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(queue), vec![2, 4, 6]);
//! ```
//!
//! # Structural Algorithms
//!
//! Every reshaping operation moves whole nodes, so a payload is never
//! cloned, and every ordering-dependent operation takes its direction as
//! an explicit [`Order`] value:
//!
//! - [`Queue::shuffle`] permutes payloads uniformly with a caller-supplied
//!   random number generator;
//! - [`Queue::remove_middle`], [`Queue::remove_duplicate_runs`],
//!   [`Queue::retain_ascending`] and [`Queue::retain_descending`] unlink
//!   and release elements;
//! - [`Queue::swap_pairs`], [`Queue::reverse`] and
//!   [`Queue::reverse_in_groups`] rearrange the ring;
//! - [`Queue::sort`], [`Queue::merge_sorted_from`] and
//!   [`Queue::merge_many`] sort one queue or fold many sorted queues into
//!   one, with [`QueueContext`] describing the participants of a k-way
//!   merge.
//!
//! ## Examples
//!
//! ```
//! use ring_queue::{Order, Queue};
//! use std::iter::FromIterator;
//!
//! let mut first = Queue::from_iter(["a", "c"]);
//! let mut second = Queue::from_iter(["b", "d"]);
//!
//! second.merge_sorted_from(&mut first, Order::Ascending);
//!
//! assert!(first.is_empty());
//! assert_eq!(Vec::from_iter(second), vec!["a", "b", "c", "d"]);
//! ```

#[doc(inline)]
pub use queue::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use queue::{Order, Queue, QueueContext};

pub mod queue;

mod experiments;
