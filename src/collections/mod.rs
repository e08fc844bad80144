//! Various general-purpose collection types.
//!
//! # Method
//! [`DynamicArray`](contiguous::DynamicArray) implements [`Deref<Target = [T]>`](std::ops::Deref)
//! (and DerefMut), which saves writing a lot of the read-only functionality twice. The other
//! collections either store their elements in a [`DynamicArray`](contiguous::DynamicArray) or in
//! the same raw buffer type.
//!
//! # Features
//! Each family of collections sits behind a Cargo feature of the same name, all of which are
//! enabled by `collections-all` (the default).

#[cfg(feature = "adapters")]
pub mod adapters;
#[cfg(feature = "circular")]
pub mod circular;
#[cfg(feature = "contiguous")]
pub mod contiguous;
#[cfg(feature = "heap")]
pub mod heap;
#[cfg(feature = "linked")]
pub mod linked;
#[cfg(feature = "traits")]
pub mod traits;
