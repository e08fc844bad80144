//! Contiguous collection types. Namely [`DynamicArray`], a growable array with `O(1)` indexed
//! access.
#![warn(missing_docs)]

pub(crate) mod buffer;
pub mod dynamic_array;

#[doc(inline)]
pub use dynamic_array::DynamicArray;
