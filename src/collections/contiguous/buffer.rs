use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use crate::error::CapacityOverflow;
use crate::util::result::ResultExtension;

/// An owned allocation with room for `cap` values of `T`, none of which are assumed to be
/// initialized. RawBuffer never drops its contents, it only deallocates; tracking which slots are
/// initialized is the job of the collection that owns it.
///
/// Zero-sized types are never allocated. Their capacity is tracked so that the owning collection
/// behaves the same way regardless of `T`, but the pointer is always dangling.
pub(crate) struct RawBuffer<T> {
    ptr: NonNull<T>,
    cap: usize,
    _phantom: PhantomData<T>,
}

impl<T> RawBuffer<T> {
    /// Creates a RawBuffer with capacity 0, without allocating.
    pub const fn new() -> RawBuffer<T> {
        RawBuffer {
            ptr: NonNull::dangling(),
            cap: 0,
            _phantom: PhantomData,
        }
    }

    /// Creates a RawBuffer with capacity exactly `cap`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn with_cap(cap: usize) -> RawBuffer<T> {
        let layout = Self::make_layout(cap);
        RawBuffer {
            ptr: Self::make_ptr(layout),
            cap,
            _phantom: PhantomData,
        }
    }

    pub const fn cap(&self) -> usize {
        self.cap
    }

    /// Reallocates to `new_cap`, keeping the contents of the first `min(cap, new_cap)` slots.
    ///
    /// The caller is responsible for having moved or dropped any values at or after `new_cap`
    /// when shrinking. If the allocator fails, [`alloc::handle_alloc_error`] is called and the
    /// existing allocation is left in place.
    ///
    /// # Panics
    /// Panics if the new memory layout size would exceed [`isize::MAX`]. The buffer is unchanged
    /// in that case.
    pub fn realloc(&mut self, new_cap: usize) {
        if new_cap == self.cap {
            return;
        }

        let new_layout = Self::make_layout(new_cap);
        let old_layout = Self::make_layout(self.cap);

        let new_ptr = match (old_layout.size(), new_layout.size()) {
            // Nothing was allocated before (or T is zero-sized), so this is a fresh allocation.
            (0, _) => Self::make_ptr(new_layout),
            (_, 0) => {
                // SAFETY: ptr was allocated in the global allocator with old_layout, which has a
                // non-zero size.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), old_layout); }
                NonNull::dangling()
            },
            (_, new_size) => {
                // SAFETY: ptr was allocated in the global allocator with old_layout. new_size is
                // non-zero and came from a valid Layout, so it doesn't exceed isize::MAX when
                // rounded to the alignment.
                let raw_ptr = unsafe {
                    alloc::realloc(self.ptr.as_ptr().cast(), old_layout, new_size)
                };
                NonNull::new(raw_ptr.cast()).unwrap_or_else(|| alloc::handle_alloc_error(new_layout))
            },
        };

        self.ptr = new_ptr;
        self.cap = new_cap;
    }

    /// Returns a raw pointer to the slot at `index`.
    ///
    /// # Safety
    /// `index` must be less than or equal to the capacity of the buffer.
    pub unsafe fn slot(&self, index: usize) -> *mut T {
        // SAFETY: The caller guarantees that index is within (or one past the end of) the
        // allocation, and the allocation size never exceeds isize::MAX.
        unsafe { self.ptr.as_ptr().add(index) }
    }

    /// Moves the value out of the slot at `index`, leaving the slot logically uninitialized.
    ///
    /// # Safety
    /// `index` must be in bounds and the slot must be initialized. The slot must be treated as
    /// uninitialized afterwards.
    pub unsafe fn read(&self, index: usize) -> T {
        // SAFETY: Upheld by the caller.
        unsafe { self.slot(index).read() }
    }

    /// Writes `value` into the slot at `index` without dropping the previous contents.
    ///
    /// # Safety
    /// `index` must be in bounds. Any value previously in the slot is leaked.
    pub unsafe fn write(&mut self, index: usize, value: T) {
        // SAFETY: Upheld by the caller.
        unsafe { self.slot(index).write(value); }
    }

    /// # Safety
    /// `index` must be in bounds and the slot must be initialized.
    pub unsafe fn get(&self, index: usize) -> &T {
        // SAFETY: Upheld by the caller. The returned borrow is tied to self.
        unsafe { &*self.slot(index) }
    }

    /// # Safety
    /// `index` must be in bounds and the slot must be initialized.
    pub unsafe fn get_mut(&mut self, index: usize) -> &mut T {
        // SAFETY: Upheld by the caller. The returned borrow is tied to a unique borrow of self.
        unsafe { &mut *self.slot(index) }
    }

    /// Copies `count` slots starting at `src` so that they start at `dst`. The ranges may
    /// overlap.
    ///
    /// # Safety
    /// Both `src + count` and `dst + count` must be less than or equal to the capacity. The values
    /// are bitwise copied, so the caller decides which of the slots remain initialized.
    pub unsafe fn shift(&mut self, src: usize, dst: usize, count: usize) {
        // SAFETY: Both ranges are in bounds according to the caller and ptr::copy allows overlap.
        unsafe { ptr::copy(self.slot(src), self.slot(dst), count); }
    }

    /// Copies `count` slots starting at `src` in self into `other`, starting at `dst`.
    ///
    /// # Safety
    /// Both ranges must be in bounds of their respective buffers. The values are bitwise copied,
    /// so the slots in self must be treated as uninitialized afterwards.
    #[cfg(feature = "circular")]
    pub unsafe fn copy_to(&self, src: usize, other: &mut RawBuffer<T>, dst: usize, count: usize) {
        // SAFETY: Two RawBuffers never share an allocation, so the ranges can't overlap. Bounds
        // are upheld by the caller.
        unsafe { ptr::copy_nonoverlapping(self.slot(src), other.slot(dst), count); }
    }

    /// A helper function to create a [`Layout`] for use during allocation, containing `cap`
    /// elements of type `T`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub(crate) fn make_layout(cap: usize) -> Layout {
        Layout::array::<T>(cap).map_err(|_| CapacityOverflow).throw()
    }

    /// A helper function to create a [`NonNull`] for the provided [`Layout`]. Returns a dangling
    /// pointer for a zero-sized layout.
    ///
    /// # Errors
    /// In the event of an allocation error, this method calls [`alloc::handle_alloc_error`] as
    /// recommended, to avoid new allocations rather than panicking.
    pub(crate) fn make_ptr(layout: Layout) -> NonNull<T> {
        if layout.size() == 0 {
            NonNull::dangling()
        } else {
            NonNull::new(
                // SAFETY: Zero-sized layouts have been guarded against.
                unsafe { alloc::alloc(layout).cast() }
            ).unwrap_or_else(|| alloc::handle_alloc_error(layout))
        }
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        let layout = Self::make_layout(self.cap);

        if layout.size() != 0 {
            // SAFETY: ptr is always allocated in the global allocator and layout is the same as
            // when allocated. Zero-sized layouts aren't allocated and are guarded against
            // deallocation.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout); }
        }
    }
}

// SAFETY: RawBuffer uniquely owns its allocation, so it can be sent whenever T can.
unsafe impl<T: Send> Send for RawBuffer<T> {}
// SAFETY: RawBuffer provides no interior mutability; shared access only ever reads.
unsafe impl<T: Sync> Sync for RawBuffer<T> {}
