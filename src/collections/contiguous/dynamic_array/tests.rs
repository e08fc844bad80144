#![cfg(test)]

use std::hash::{BuildHasher, RandomState};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::error::IndexOutOfRange;
use crate::util::testing::{DropCounter, ZeroSizedType, assert_panics};

#[test]
fn test_growth_sequence() {
    let mut arr = DynamicArray::new();
    let mut caps = [0; 8];
    for (i, cap) in caps.iter_mut().enumerate() {
        arr.push_back(i);
        *cap = arr.capacity();
    }
    assert_eq!(
        caps,
        [1, 2, 3, 5, 5, 8, 8, 8],
        "Capacity should grow by a factor of 1.5, rounded up."
    );
    assert_eq!(&*arr, &[0, 1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_bounds() {
    let mut arr: DynamicArray<_> = (0..4).collect();

    assert_eq!(arr.get(4), Err(IndexOutOfRange { index: 4, len: 4 }));
    assert_eq!(arr.set(4, 10), Err(IndexOutOfRange { index: 4, len: 4 }));
    assert_eq!(arr.remove_at(4), Err(IndexOutOfRange { index: 4, len: 4 }));
    assert_eq!(arr.insert_at(5, 10), Err(IndexOutOfRange { index: 5, len: 4 }));
    assert_eq!(arr.swap(0, 9), Err(IndexOutOfRange { index: 9, len: 4 }));
    assert_eq!(&*arr, &[0, 1, 2, 3], "Failed operations shouldn't modify the DynamicArray.");

    assert_eq!(arr.insert_at(4, 4), Ok(()), "Inserting at len should append.");
    assert_eq!(arr.set(0, 100), Ok(0));
    assert_eq!(arr[0], 100);

    assert_panics!({
        let _ = arr[5];
    }, IndexOutOfRange { index: 5, len: 5 });
}

#[test]
fn test_failed_insert_doesnt_grow() {
    let mut arr: DynamicArray<u8> = DynamicArray::with_cap(2);
    arr.push_back(1);
    arr.push_back(2);

    assert!(arr.insert_at(3, 3).is_err());
    assert_eq!(arr.capacity(), 2, "A rejected insertion shouldn't reallocate.");
}

#[test]
fn test_random_operations_match_model() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut arr = DynamicArray::new();
    let mut model: Vec<u32> = Vec::new();

    for step in 0..2_000 {
        let value: u32 = rng.random();
        match rng.random_range(0..5) {
            0 | 1 => {
                arr.push_back(value);
                model.push(value);
            },
            2 => {
                let index = rng.random_range(0..=model.len());
                arr.insert_at(index, value).unwrap();
                model.insert(index, value);
            },
            3 if !model.is_empty() => {
                let index = rng.random_range(0..model.len());
                assert_eq!(arr.remove_at(index), Ok(model.remove(index)));
            },
            4 if !model.is_empty() => {
                let index = rng.random_range(0..model.len());
                assert_eq!(arr.set(index, value), Ok(model[index]));
                model[index] = value;
            },
            _ => assert_eq!(arr.pop_back(), model.pop()),
        }

        assert!(arr.len() <= arr.capacity(), "len should never exceed capacity (step {step}).");
        assert_eq!(&*arr, model.as_slice(), "Contents should match the model (step {step}).");
    }
}

#[test]
fn test_reserve_and_shrink() {
    let mut arr: DynamicArray<u16> = (0..3).collect();
    arr.reserve(10);
    assert!(arr.capacity() >= 13);

    arr.shrink_to_fit();
    assert_eq!(arr.capacity(), 3);
    assert_eq!(&*arr, &[0, 1, 2], "Shrinking shouldn't lose elements.");

    arr.clear();
    assert_eq!(arr.capacity(), 3, "Clearing shouldn't shrink.");
    assert!(arr.is_empty());
}

#[test]
fn test_drop() {
    let counter = DropCounter::new();
    let mut arr: DynamicArray<_> = (0..10).map(|i| counter.track(i)).collect();

    drop(arr.remove_at(3));
    assert_eq!(counter.drops(), 1);

    arr.truncate(5);
    assert_eq!(counter.drops(), 5, "Truncating should drop the removed elements.");

    drop(arr);
    assert_eq!(counter.drops(), 10, "Every element should be dropped exactly once.");
}

#[test]
fn test_into_iter() {
    let arr: DynamicArray<_> = (0_usize..5).collect();
    assert_eq!(arr, DynamicArray::from([0, 1, 2, 3, 4]));

    let mut iter = arr.into_iter();
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.next(), Some(0));
    assert_eq!(iter.next_back(), Some(4));
    assert_eq!(iter.next_back(), Some(3));
    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next_back(), Some(2));
    assert_eq!(iter.next(), None);

    let counter = DropCounter::new();
    let arr: DynamicArray<_> = (0..10).map(|i| counter.track(i)).collect();
    let mut iter = arr.into_iter();
    drop(iter.next());
    drop(iter);
    assert_eq!(counter.drops(), 10, "Dropping an owned iterator should drop all elements.");
}

#[test]
fn test_equality_and_hash() {
    let arr: DynamicArray<_> = (0_usize..5).collect();
    let state = RandomState::new();

    assert_eq!(arr, arr.clone(), "A clone should be equal.");
    assert_eq!(
        state.hash_one(&arr),
        state.hash_one([0_usize, 1, 2, 3, 4]),
        "The hash should match the hash of the equivalent slice."
    );
}

#[test]
fn test_zst_support() {
    let mut arr = DynamicArray::new();
    for _ in 0..100 {
        arr.push_back(ZeroSizedType);
    }
    assert_eq!(arr.len(), 100);
    assert_eq!(arr.remove_at(50), Ok(ZeroSizedType));
    assert_eq!(arr.into_iter().count(), 99);
}
