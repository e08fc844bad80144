//! A small collections core: a growable array, a ring-buffer deque, a doubly-linked deque and a
//! binary heap, plus stack and queue adapters over either deque.
//!
//! # Purpose
//! Each type keeps a precise contract for its invariants (amortized growth, circular index
//! arithmetic, heap ordering and node lifecycle), and reports misuse through typed errors rather
//! than clamping or ignoring bad input.
//!
//! # Error Handling
//! Every fallible operation returns a [`Result`] with a small, strongly typed error from
//! [`error`]. The errors are structs (often ZSTs) that implement [`Error`](std::error::Error),
//! and [`CollectionError`](error::CollectionError) unifies them for operations that can fail in
//! more than one way. Where a panicking shorthand is convenient, such as the [`Index`] operator,
//! it panics with the message of the same error.
//!
//! Capacity overflow is the exception. Having to handle the possibility of a capacity overflow
//! on every push would be miserable, so growth panics instead, and allocator failure goes
//! through [`handle_alloc_error`](std::alloc::handle_alloc_error). Neither leaves a container
//! half-grown.
//!
//! # Dependencies
//! This crate doesn't use [`Vec`] for any of its storage; [`DynamicArray`] and [`CircularDeque`]
//! allocate through [`std::alloc`] directly and the other collections are built on top of
//! [`DynamicArray`].
//!
//! `derive_more` supplies the error derives and `tracing` emits `trace` level events when a
//! collection changes the shape of its allocation.
//!
//! # Thread Safety
//! None of these collections synchronize anything. They are [`Send`] and [`Sync`] when their
//! elements are, so wrapping one in a [`Mutex`](std::sync::Mutex) is the way to share it.
//!
//! [`Index`]: std::ops::Index
//! [`DynamicArray`]: collections::contiguous::DynamicArray
//! [`CircularDeque`]: collections::circular::CircularDeque
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "collections")]
pub mod collections;
pub mod error;

pub(crate) mod util;
