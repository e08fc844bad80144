#![cfg(test)]

use std::collections::VecDeque;
use std::hash::{BuildHasher, RandomState};
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::error::{EmptyContainer, InvalidHandle, NoCurrentElement};
use crate::util::testing::{DropCounter, ZeroSizedType};

fn contents<T: Clone>(deque: &LinkedDeque<T>) -> Vec<T> {
    deque.iter().cloned().collect()
}

#[test]
fn test_remove_middle_and_ends() {
    let mut deque = LinkedDeque::new();
    let a = deque.push_back('A');
    let b = deque.push_back('B');
    let c = deque.push_back('C');

    assert_eq!(deque.remove(b), Ok('B'));
    deque.verify_links();
    assert_eq!(contents(&deque), ['A', 'C']);
    assert_eq!(deque.remove(b), Err(InvalidHandle), "A node can only be removed once.");

    assert_eq!(deque.remove(a), Ok('A'));
    assert_eq!(deque.remove(c), Ok('C'));
    deque.verify_links();
    assert!(deque.is_empty());
    assert_eq!(deque.peek_front(), Err(EmptyContainer));
    assert_eq!(deque.peek_back(), Err(EmptyContainer));
}

#[test]
fn test_stale_handle_after_slot_reuse() {
    let mut deque = LinkedDeque::new();
    let old = deque.push_back(1);
    deque.pop_back().unwrap();

    let new = deque.push_back(2);
    assert_eq!(old.slot, new.slot, "The vacated slot should be recycled.");
    assert_eq!(deque.get(old), Err(InvalidHandle));
    assert_eq!(deque.remove(old), Err(InvalidHandle));
    assert_eq!(deque.get(new), Ok(&2));
    assert_eq!(contents(&deque), [2], "A rejected handle shouldn't change the deque.");
}

#[test]
fn test_foreign_and_cleared_handles() {
    let mut first = LinkedDeque::new();
    let mut second = LinkedDeque::new();
    let handle = first.push_back(10);
    second.push_back(20);

    assert!(!second.contains_handle(handle));
    assert_eq!(second.remove(handle), Err(InvalidHandle));
    assert_eq!(contents(&second), [20]);

    first.clear();
    first.push_back(30);
    assert!(!first.contains_handle(handle), "Clearing should invalidate every handle.");
    assert_eq!(first.insert_after(handle, 40), Err(InvalidHandle));

    let cloned = second.clone();
    let second_handle = second.front_handle().unwrap();
    assert!(!cloned.contains_handle(second_handle), "Handles don't carry over to clones.");
}

#[test]
fn test_insert_relative_to_handle() {
    let mut deque = LinkedDeque::new();
    let middle = deque.push_back(3);
    let first = deque.insert_before(middle, 1).unwrap();
    deque.insert_after(first, 2).unwrap();
    let last = deque.insert_after(middle, 5).unwrap();
    deque.insert_before(last, 4).unwrap();

    deque.verify_links();
    assert_eq!(contents(&deque), [1, 2, 3, 4, 5]);
    assert_eq!(deque.front_handle(), Ok(first));
    assert_eq!(deque.back_handle(), Ok(last));

    *deque.get_mut(middle).unwrap() = 30;
    assert_eq!(deque.get(middle), Ok(&30));
}

#[test]
fn test_stack_and_queue_order() {
    let mut deque = LinkedDeque::new();
    for i in 0..10 {
        deque.push_front(i);
    }
    let lifo: Vec<_> = std::iter::from_fn(|| deque.pop_front().ok()).collect();
    assert_eq!(lifo, (0..10).rev().collect::<Vec<_>>());

    for i in 0..10 {
        deque.push_back(i);
    }
    let fifo: Vec<_> = std::iter::from_fn(|| deque.pop_front().ok()).collect();
    assert_eq!(fifo, (0..10).collect::<Vec<_>>());
}

#[test]
fn test_random_operations_match_model() {
    let mut rng = StdRng::seed_from_u64(214);
    let mut deque = LinkedDeque::new();
    let mut model: VecDeque<(u32, Handle)> = VecDeque::new();

    for step in 0..3_000 {
        let value: u32 = rng.random();
        match rng.random_range(0..8) {
            0 | 1 => {
                let handle = deque.push_back(value);
                model.push_back((value, handle));
            },
            2 | 3 => {
                let handle = deque.push_front(value);
                model.push_front((value, handle));
            },
            4 => assert_eq!(deque.pop_front().ok(), model.pop_front().map(|(v, _)| v)),
            5 => assert_eq!(deque.pop_back().ok(), model.pop_back().map(|(v, _)| v)),
            6 if !model.is_empty() => {
                let index = rng.random_range(0..model.len());
                let (expected, handle) = model.remove(index).unwrap();
                assert_eq!(deque.remove(handle), Ok(expected));
                assert_eq!(deque.remove(handle), Err(InvalidHandle));
            },
            _ if !model.is_empty() => {
                let index = rng.random_range(0..model.len());
                let (_, anchor) = model[index];
                let handle = deque.insert_after(anchor, value).unwrap();
                model.insert(index + 1, (value, handle));
            },
            _ => {},
        }

        deque.verify_links();
        assert_eq!(deque.len(), model.len());
        assert!(
            deque.iter().eq(model.iter().map(|(v, _)| v)),
            "Contents should match the model (step {step})."
        );
        assert!(
            deque.iter().rev().eq(model.iter().rev().map(|(v, _)| v)),
            "Walking backward should give the reverse (step {step})."
        );
        assert!(
            deque.handles().map(|(h, _)| h).eq(model.iter().map(|(_, h)| *h)),
            "Handles should stay attached to their nodes (step {step})."
        );
    }
}

#[test]
fn test_removal_through_handles() {
    let mut deque: LinkedDeque<_> = (1..=10).collect();
    let even: Vec<_> = deque
        .handles()
        .filter(|(_, v)| *v % 2 == 0)
        .map(|(h, _)| h)
        .collect();

    for handle in &even {
        deque.remove(*handle).unwrap();
    }
    deque.verify_links();
    assert_eq!(contents(&deque), [1, 3, 5, 7, 9]);
    assert!(even.iter().all(|h| !deque.contains_handle(*h)));
}

#[test]
fn test_cursor_removal() {
    let mut deque: LinkedDeque<_> = (0..10).collect();
    let mut cursor = deque.cursor();
    assert_eq!(cursor.remove_current(&mut deque), Err(NoCurrentElement.into()));

    while let Some(value) = cursor.next(&deque).unwrap() {
        if value % 3 != 1 {
            cursor.remove_current(&mut deque).unwrap();
        }
    }
    deque.verify_links();
    assert_eq!(contents(&deque), [1, 4, 7]);
}

#[test]
fn test_cursor_detects_modification() {
    let mut deque: LinkedDeque<_> = (0..4).collect();
    let mut cursor = deque.cursor();
    assert_eq!(cursor.next(&deque), Ok(Some(&0)));

    deque.push_front(-1);
    assert!(cursor.next(&deque).is_err());
    assert!(cursor.remove_current(&mut deque).unwrap_err().is_concurrent_modification());

    cursor.reset(&deque);
    assert_eq!(cursor.next(&deque), Ok(Some(&-1)));

    deque.clear();
    assert!(cursor.next(&deque).is_err(), "Clearing should invalidate every cursor.");
}

#[test]
fn test_iter_mut_both_ends() {
    let mut deque: LinkedDeque<_> = (1..=5).collect();
    let mut iter = deque.iter_mut();
    *iter.next().unwrap() *= 10;
    *iter.next_back().unwrap() *= 10;
    assert_eq!(iter.len(), 3);
    for value in iter {
        *value += 1;
    }
    assert_eq!(contents(&deque), [10, 3, 4, 5, 50]);
}

#[test]
fn test_equality_and_display() {
    let mut built = LinkedDeque::new();
    built.push_back(2);
    built.push_front(1);
    built.push_back(3);

    let collected: LinkedDeque<_> = (1..=3).collect();
    assert_eq!(built, collected);
    assert_eq!(format!("{built}"), "(1) <-> (2) <-> (3)");
    assert_ne!(built, (1..=4).collect::<LinkedDeque<_>>());
}

#[test]
fn test_hash_ignores_history() {
    let mut edited: LinkedDeque<_> = (0..6).collect();
    let middle = edited.handles().nth(2).map(|(handle, _)| handle).unwrap();
    edited.remove(middle).unwrap();
    edited.pop_front().unwrap();
    edited.push_front(9);

    let fresh: LinkedDeque<_> = [9, 1, 3, 4, 5].into_iter().collect();
    let state = RandomState::new();
    assert_eq!(edited, fresh);
    assert_eq!(state.hash_one(&edited), state.hash_one(&fresh));
}

#[test]
fn test_iter_mut_across_threads() {
    let mut deque: LinkedDeque<_> = (0..4).collect();
    let iter = deque.iter_mut();
    thread::scope(|scope| {
        scope.spawn(move || iter.for_each(|value| *value *= 2));
    });
    assert_eq!(contents(&deque), [0, 2, 4, 6]);
}

#[test]
fn test_arena_keeps_capacity() {
    let mut deque: LinkedDeque<_> = (0..8).collect();
    deque.pop_back().unwrap();
    deque.pop_front().unwrap();
    deque.push_back(8);
    deque.push_back(9);
    assert_eq!(deque.slots.len(), 8, "Vacated slots should be reused before the arena grows.");

    let cap = deque.slots.capacity();
    deque.clear();
    assert_eq!(deque.slots.capacity(), cap, "Clearing shouldn't release the arena.");
    deque.extend(0..8);
    assert_eq!(deque.slots.capacity(), cap);
}

#[test]
fn test_drop() {
    let counter = DropCounter::new();
    let mut deque = LinkedDeque::new();
    let handles: Vec<_> = (0..6).map(|i| deque.push_back(counter.track(i))).collect();

    drop(deque.remove(handles[2]));
    drop(deque.pop_front());
    assert_eq!(counter.drops(), 2);

    deque.clear();
    assert_eq!(counter.drops(), 6, "Clearing should drop every element.");

    deque.extend((0..4).map(|i| counter.track(i)));
    let mut iter = deque.into_iter();
    drop(iter.next_back());
    drop(iter);
    assert_eq!(counter.drops(), 10, "Every element should be dropped exactly once.");
}

#[test]
fn test_zst_support() {
    let mut deque = LinkedDeque::new();
    let handles: Vec<_> = (0..5).map(|_| deque.push_back(ZeroSizedType)).collect();
    assert_eq!(deque.remove(handles[3]), Ok(ZeroSizedType));
    deque.verify_links();
    assert_eq!(deque.iter().count(), 4);
}
