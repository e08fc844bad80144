#![cfg(test)]

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::error::{EmptyContainer, IndexOutOfRange, NoCurrentElement};
use crate::util::testing::{DropCounter, ZeroSizedType, assert_panics};

fn contents<T: Clone>(deque: &CircularDeque<T>) -> Vec<T> {
    deque.iter().cloned().collect()
}

#[test]
fn test_resize_relinearizes() {
    let mut deque = CircularDeque::with_cap(4);
    for i in 1..=4 {
        deque.push_back(i);
    }
    assert_eq!(deque.capacity(), 4);

    deque.push_back(5);
    assert_eq!(deque.capacity(), 8, "A full deque should double its capacity.");
    assert_eq!(contents(&deque), [1, 2, 3, 4, 5]);

    assert_eq!(deque.pop_front(), Ok(1));
    assert_eq!(deque.pop_front(), Ok(2));
    assert_eq!(contents(&deque), [3, 4, 5]);
}

#[test]
fn test_resize_while_wrapped() {
    let mut deque = CircularDeque::with_cap(4);
    deque.push_back(2);
    deque.push_back(3);
    deque.push_front(1);
    deque.push_front(0);
    assert_ne!(deque.head, 0, "Pushing to the front should wrap head around.");
    assert_eq!(deque.as_slices(), (&[0, 1][..], &[2, 3][..]));

    deque.push_back(4);
    assert_eq!(deque.head, 0, "Growing should move head to the start of the buffer.");
    assert_eq!(deque.as_slices(), (&[0, 1, 2, 3, 4][..], &[][..]));
}

#[test]
fn test_minimum_growth() {
    let mut deque = CircularDeque::new();
    assert_eq!(deque.capacity(), 0);
    deque.push_front('a');
    assert_eq!(deque.capacity(), 8, "An empty deque should grow to at least 8.");
}

#[test]
fn test_empty_and_bounds() {
    let mut deque: CircularDeque<u8> = CircularDeque::new();
    assert_eq!(deque.pop_front(), Err(EmptyContainer));
    assert_eq!(deque.pop_back(), Err(EmptyContainer));
    assert_eq!(deque.peek_front(), Err(EmptyContainer));
    assert_eq!(deque.peek_back(), Err(EmptyContainer));

    deque.extend([7, 8, 9]);
    assert_eq!(deque.peek_front(), Ok(&7));
    assert_eq!(deque.peek_back(), Ok(&9));
    assert_eq!(deque.get(2), Ok(&9));
    assert_eq!(deque.get(3), Err(IndexOutOfRange { index: 3, len: 3 }));
    assert_eq!(deque.remove_at(3), Err(IndexOutOfRange { index: 3, len: 3 }));

    *deque.peek_back_mut().unwrap() = 10;
    deque[0] = 6;
    assert_eq!(contents(&deque), [6, 8, 10]);

    assert_panics!({
        let _ = deque[3];
    }, IndexOutOfRange { index: 3, len: 3 });
}

#[test]
fn test_stack_and_queue_order() {
    let mut deque = CircularDeque::new();
    for i in 0..20 {
        deque.push_back(i);
    }
    let lifo: Vec<_> = std::iter::from_fn(|| deque.pop_back().ok()).collect();
    assert_eq!(lifo, (0..20).rev().collect::<Vec<_>>(), "Same end should behave as a stack.");

    for i in 0..20 {
        deque.push_front(i);
    }
    let fifo: Vec<_> = std::iter::from_fn(|| deque.pop_back().ok()).collect();
    assert_eq!(fifo, (0..20).collect::<Vec<_>>(), "Opposite ends should behave as a queue.");
}

#[test]
fn test_random_operations_match_model() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut deque = CircularDeque::new();
    let mut model = VecDeque::new();
    let mut resized = false;

    for step in 0..5_000 {
        let value: i64 = rng.random();
        let cap = deque.capacity();
        // Bias towards pushing so that the deque grows past its initial capacity.
        match rng.random_range(0..7) {
            0 | 1 => {
                deque.push_back(value);
                model.push_back(value);
            },
            2 | 3 => {
                deque.push_front(value);
                model.push_front(value);
            },
            4 => assert_eq!(deque.pop_front().ok(), model.pop_front()),
            5 => assert_eq!(deque.pop_back().ok(), model.pop_back()),
            _ if !model.is_empty() => {
                let index = rng.random_range(0..model.len());
                assert_eq!(deque.remove_at(index).ok(), model.remove(index));
            },
            _ => {},
        }
        resized |= cap != 0 && deque.capacity() != cap;

        assert_eq!(deque.len(), model.len());
        assert!(deque.len() <= deque.capacity());
        assert!(deque.iter().eq(model.iter()), "Contents should match the model (step {step}).");
        assert!(
            deque.iter().rev().eq(model.iter().rev()),
            "Reverse iteration should match the model (step {step})."
        );
    }

    assert!(resized, "The sequence should have forced at least one resize.");
}

#[test]
fn test_cursor_removal() {
    let mut deque: CircularDeque<_> = (0..10).collect();
    let mut cursor = deque.cursor();

    assert_eq!(
        cursor.remove_current(&mut deque),
        Err(NoCurrentElement.into()),
        "Nothing has been yielded yet."
    );

    while let Some(value) = cursor.next(&deque).unwrap() {
        if value % 3 == 0 {
            cursor.remove_current(&mut deque).unwrap();
            assert!(
                cursor.remove_current(&mut deque).unwrap_err().is_no_current_element(),
                "The same element can't be removed twice."
            );
        }
    }
    assert_eq!(contents(&deque), [1, 2, 4, 5, 7, 8]);
}

#[test]
fn test_cursor_detects_modification() {
    let mut deque: CircularDeque<_> = (0..4).collect();
    let mut cursor = deque.cursor();
    assert_eq!(cursor.next(&deque), Ok(Some(&0)));

    deque.pop_back().unwrap();
    let err = cursor.next(&deque).unwrap_err();
    assert_ne!(err.expected, err.found);
    assert!(cursor.remove_current(&mut deque).unwrap_err().is_concurrent_modification());

    cursor.reset(&deque);
    let restarted: Vec<_> = std::iter::from_fn(|| cursor.next(&deque).unwrap().copied()).collect();
    assert_eq!(restarted, [0, 1, 2], "A reset cursor should restart from the front.");
    assert_eq!(cursor.next(&deque), Ok(None), "An exhausted cursor should stay exhausted.");
}

#[test]
fn test_cursor_rejects_other_deque() {
    let a: CircularDeque<_> = (0..3).collect();
    let mut b: CircularDeque<_> = (10..13).collect();
    assert_eq!(a.generation, b.generation, "Both deques went through the same modifications.");

    let mut cursor = a.cursor();
    assert!(cursor.next(&b).is_err(), "A cursor should only read from its own deque.");
    assert_eq!(cursor.next(&a), Ok(Some(&0)));
    assert!(cursor.remove_current(&mut b).unwrap_err().is_concurrent_modification());
    assert_eq!(contents(&b), [10, 11, 12]);

    let clone = a.clone();
    assert!(cursor.next(&clone).is_err(), "A clone is a different deque.");
    assert_eq!(cursor.next(&a), Ok(Some(&1)));

    cursor.reset(&b);
    assert_eq!(cursor.next(&b), Ok(Some(&10)));
    assert!(cursor.next(&a).is_err());
}

#[test]
fn test_iter_mut_and_reverse() {
    let mut deque = CircularDeque::with_cap(5);
    deque.extend([3, 4]);
    deque.push_front(2);
    deque.push_front(1);

    for value in deque.iter_mut() {
        *value *= 10;
    }
    assert_eq!(contents(&deque), [10, 20, 30, 40]);
    assert_eq!(deque.iter().rev().copied().collect::<Vec<_>>(), [40, 30, 20, 10]);
    assert_eq!(deque.iter().len(), 4);

    let mut iter = deque.into_iter();
    assert_eq!(iter.next(), Some(10));
    assert_eq!(iter.next_back(), Some(40));
    assert_eq!(iter.len(), 2);
}

#[test]
fn test_equality_and_clone() {
    let mut wrapped = CircularDeque::with_cap(4);
    wrapped.extend([2, 3]);
    wrapped.push_front(1);

    let linear: CircularDeque<_> = (1..=3).collect();
    assert_eq!(wrapped, linear, "Equality should only depend on the logical order.");
    assert_eq!(wrapped.clone(), linear);
    assert_eq!(format!("{wrapped}"), "[1, 2, 3]");
}

#[test]
fn test_drop() {
    let counter = DropCounter::new();
    let mut deque = CircularDeque::with_cap(4);
    for i in 0..6 {
        deque.push_front(counter.track(i));
    }
    drop(deque.pop_back());
    drop(deque.remove_at(2));
    assert_eq!(counter.drops(), 2);

    deque.clear();
    assert_eq!(counter.drops(), 6, "Clearing should drop every element.");

    for i in 0..5 {
        deque.push_back(counter.track(i));
    }
    let mut iter = deque.into_iter();
    drop(iter.next());
    drop(iter);
    assert_eq!(counter.drops(), 11, "Every element should be dropped exactly once.");
}

#[test]
fn test_zst_support() {
    let mut deque = CircularDeque::new();
    for _ in 0..20 {
        deque.push_front(ZeroSizedType);
    }
    assert_eq!(deque.len(), 20);
    assert_eq!(deque.iter().count(), 20);
    assert_eq!(deque.pop_back(), Ok(ZeroSizedType));
}
