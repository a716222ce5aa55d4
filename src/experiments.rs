//! A sentinel-free rendition of the queue in safe Rust, built on branded
//! [`GhostCell`] interior mutability and [`StaticRc`] half-ownership links.
//!
//! Every node is owned by exactly two halves of a `StaticRc`: one stored in
//! the inbound forward link (the predecessor's `next`, or the queue's front
//! end), one in the inbound backward link (the successor's `prev`, or the
//! queue's back end). Popping an end joins the two halves back into full
//! ownership, so no `unsafe` is needed anywhere.
//!
//! The production ring keeps the sentinel + raw-pointer representation;
//! this module records the alternative design and its costs (a `GhostToken`
//! must be threaded through every call).

use ghost_cell::{GhostCell, GhostToken};
use static_rc::StaticRc;
use std::ops::Deref;

pub struct SafeQueue<'brand, T> {
    ends: [Option<Link<'brand, T>>; 2],
    len: usize,
}

struct Node<'brand, T> {
    links: [Option<Link<'brand, T>>; 2],
    element: T,
}

type Link<'brand, T> = Half<GhostCell<'brand, Node<'brand, T>>>;

type Half<T> = StaticRc<T, 1, 2>;
type Full<T> = StaticRc<T, 2, 2>;

const FRONT: usize = 0;
const BACK: usize = 1;

impl<'brand, T> Node<'brand, T> {
    fn new(element: T) -> Self {
        let links = [None, None];
        Self { element, links }
    }
}

impl<'brand, T> Default for SafeQueue<'brand, T> {
    fn default() -> Self {
        let ends = [None, None];
        Self { ends, len: 0 }
    }
}

impl<'brand, T> SafeQueue<'brand, T> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ends[FRONT].is_none()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn push_front(&mut self, element: T, token: &mut GhostToken<'brand>) {
        self.push_at(FRONT, element, token);
    }

    pub fn push_back(&mut self, element: T, token: &mut GhostToken<'brand>) {
        self.push_at(BACK, element, token);
    }

    pub fn pop_front(&mut self, token: &mut GhostToken<'brand>) -> Option<T> {
        self.pop_at(FRONT, token)
    }

    pub fn pop_back(&mut self, token: &mut GhostToken<'brand>) -> Option<T> {
        self.pop_at(BACK, token)
    }

    /// Insert at one end: split full ownership of the fresh node into its
    /// two halves, hand one to the old end node (or the opposite end slot
    /// of an empty queue) and keep the other in this end's slot.
    fn push_at(&mut self, end: usize, element: T, token: &mut GhostToken<'brand>) {
        let inward = 1 - end;
        let (inner_half, outer_half) = Full::split(Full::new(GhostCell::new(Node::new(element))));
        match self.ends[end].take() {
            Some(old_end) => {
                old_end.deref().borrow_mut(token).links[inward] = Some(inner_half);
                outer_half.deref().borrow_mut(token).links[end] = Some(old_end);
            }
            None => self.ends[inward] = Some(inner_half),
        }
        self.ends[end] = Some(outer_half);
        self.len += 1;
    }

    /// Remove at one end: collect the end node's two halves, one from this
    /// end's slot and one from its neighbour (or the opposite end slot when
    /// it was the only node), then join them and unwrap the element.
    fn pop_at(&mut self, end: usize, token: &mut GhostToken<'brand>) -> Option<T> {
        debug_assert!(end < 2);
        let inward = 1 - end;
        let outer_half = self.ends[end].take()?;
        let inner_half = match outer_half.deref().borrow_mut(token).links[end].take() {
            Some(neighbour) => {
                let inner_half = neighbour.deref().borrow_mut(token).links[inward]
                    .take()
                    .expect("neighbour of an end node always links back to it");
                self.ends[end] = Some(neighbour);
                inner_half
            }
            None => self.ends[inward]
                .take()
                .expect("a singular queue holds the node's other half in its far end"),
        };
        self.len -= 1;
        Some(
            Full::into_box(Full::join(inner_half, outer_half))
                .into_inner()
                .element,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::experiments::SafeQueue;
    use ghost_cell::GhostToken;

    #[test]
    fn safe_queue_push_pop_both_ends() {
        GhostToken::new(|mut token| {
            let mut queue = SafeQueue::new();
            assert!(queue.is_empty());
            assert_eq!(queue.len(), 0);

            queue.push_back("b", &mut token);
            queue.push_front("a", &mut token);
            queue.push_back("c", &mut token);
            assert!(!queue.is_empty());
            assert_eq!(queue.len(), 3);

            assert_eq!(queue.pop_back(&mut token), Some("c"));
            assert_eq!(queue.pop_front(&mut token), Some("a"));
            assert_eq!(queue.pop_front(&mut token), Some("b"));
            assert_eq!(queue.pop_front(&mut token), None);
            assert!(queue.is_empty());
            assert_eq!(queue.len(), 0);
        })
    }

    #[test]
    fn safe_queue_is_fifo_front_to_back() {
        GhostToken::new(|mut token| {
            let mut queue = SafeQueue::new();
            for value in 0..10 {
                queue.push_back(value, &mut token);
            }
            let mut drained = Vec::new();
            while let Some(value) = queue.pop_front(&mut token) {
                drained.push(value);
            }
            assert_eq!(drained, (0..10).collect::<Vec<_>>());
        })
    }
}
