#![cfg(all(test, feature = "linked"))]

use super::*;
use crate::collections::circular::CircularDeque;
use crate::collections::linked::LinkedDeque;
use crate::collections::traits::Deque;
use crate::error::EmptyContainer;

fn stack_order<D: Deque<u32> + Default>() {
    let mut stack: Stack<u32, D> = (0..5).collect();
    assert_eq!(stack.len(), 5);
    assert_eq!(stack.peek(), Ok(&4));

    let popped: Vec<_> = std::iter::from_fn(|| stack.pop().ok()).collect();
    assert_eq!(popped, [4, 3, 2, 1, 0], "A Stack should pop in reverse push order.");
    assert!(stack.is_empty());
    assert_eq!(stack.pop(), Err(EmptyContainer));
    assert_eq!(stack.peek(), Err(EmptyContainer));
}

fn queue_order<D: Deque<u32> + Default>() {
    let mut queue: Queue<u32, D> = Queue::new();
    queue.extend(0..5);
    assert_eq!(queue.peek(), Ok(&0));

    let dequeued: Vec<_> = std::iter::from_fn(|| queue.dequeue().ok()).collect();
    assert_eq!(dequeued, [0, 1, 2, 3, 4], "A Queue should dequeue in enqueue order.");
    assert!(queue.is_empty());
    assert_eq!(queue.dequeue(), Err(EmptyContainer));
}

#[test]
fn test_stack_over_both_deques() {
    stack_order::<CircularDeque<u32>>();
    stack_order::<LinkedDeque<u32>>();
}

#[test]
fn test_queue_over_both_deques() {
    queue_order::<CircularDeque<u32>>();
    queue_order::<LinkedDeque<u32>>();
}

#[test]
fn test_interleaved_queue() {
    let mut queue: Queue<u32> = Queue::new();
    // Enough to make the ring buffer wrap and then grow while wrapped.
    for i in 0..6 {
        queue.enqueue(i);
    }
    for i in 0..4 {
        assert_eq!(queue.dequeue(), Ok(i));
    }
    for i in 6..20 {
        queue.enqueue(i);
    }

    let deque = queue.into_inner();
    assert!(deque.iter().copied().eq(4..20));
}

#[test]
fn test_wrapping_existing_deque() {
    let deque: CircularDeque<i32> = (1..=3).collect();
    let mut stack: Stack<i32> = Stack::from_deque(deque.clone());
    let mut queue: Queue<i32> = Queue::from_deque(deque);

    assert_eq!(stack.pop(), Ok(3), "The back of the deque should be the top of the stack.");
    assert_eq!(queue.dequeue(), Ok(1), "The front of the deque should be dequeued first.");
    assert_eq!(stack.clone().into_inner(), (1..=2).collect::<CircularDeque<_>>());
}
