//! Allocation that terminates the test on failure.

use std::os::raw::c_void;
use std::ptr::NonNull;

use crate::error::{or_exit, Result, TestFailure};

extern "C" {
    fn malloc(size: usize) -> *mut c_void;
    fn free(ptr: *mut c_void);
}

/// Allocate `size` bytes from the C allocator.
///
/// The block belongs to the caller and must be released with C `free`
/// (or [`free_c`]). A zero-size request allocates one byte, so a null
/// return from `malloc` always means failure.
pub fn try_malloc(size: usize) -> Result<NonNull<c_void>> {
    // SAFETY: malloc accepts any size and returns null on failure.
    let ptr = unsafe { malloc(size.max(1)) };
    NonNull::new(ptr).ok_or(TestFailure::AllocationFailed { size })
}

/// [`try_malloc`], printing the warning and exiting with `EXIT_FAILURE`
/// when the allocator gives up.
pub fn unsafe_malloc(size: usize) -> NonNull<c_void> {
    or_exit(try_malloc(size))
}

/// Release a block obtained from [`try_malloc`] or [`unsafe_malloc`].
///
/// # Safety
/// `ptr` must come from the C allocator and not have been freed already.
pub unsafe fn free_c(ptr: NonNull<c_void>) {
    free(ptr.as_ptr())
}

/// Zero-filled buffer for Rust drivers, with fallible reservation.
pub fn alloc_buffer(size: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(size)
        .map_err(|_| TestFailure::AllocationFailed { size })?;
    buf.resize(size, 0);
    Ok(buf)
}
