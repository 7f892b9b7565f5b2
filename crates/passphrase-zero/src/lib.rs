// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Guaranteed-observable wiping of secret bytes.
//!
//! A plain `memset` on memory that is about to be freed is a dead store and the
//! optimizer is allowed to delete it. Every function here pairs the bulk write
//! with a volatile read and a `SeqCst` compiler fence, which forces the write to
//! happen before any later access or deallocation.
//!
//! This is a hard requirement of the passphrase crates, not an optimization
//! hint: every buffer that ever held passphrase bytes goes through [`wipe`] or
//! [`wipe_vec`] before it is shrunk, reused or released.
//!
//! # Example
//!
//! ```
//! use passphrase_zero::{is_wiped, wipe};
//!
//! let mut secret = *b"hunter2";
//! wipe(&mut secret);
//!
//! assert!(is_wiped(&secret));
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

use alloc::vec::Vec;
use core::sync::atomic::{Ordering, compiler_fence};

#[cfg(test)]
mod tests;

/// Forcibly zeroes every byte of `slice`.
///
/// Uses `write_bytes` (memset) followed by a volatile read of the first byte and
/// a compiler fence, so the zeroing cannot be removed even when `slice` is
/// never read again.
///
/// # Example
///
/// ```
/// use passphrase_zero::wipe;
///
/// let mut data = vec![0xAAu8; 16];
/// wipe(&mut data);
/// assert!(data.iter().all(|&b| b == 0));
/// ```
#[inline(never)]
pub fn wipe(slice: &mut [u8]) {
    if slice.is_empty() {
        return;
    }

    unsafe {
        // SAFETY (PRECONDITIONS ARE MET): slice is valid for slice.len() writes
        core::ptr::write_bytes(slice.as_mut_ptr(), 0, slice.len());
        // Volatile read prevents the optimizer from removing the write_bytes
        core::ptr::read_volatile(slice.as_ptr());
    }

    compiler_fence(Ordering::SeqCst);
}

/// Wipes the **entire allocation** of a `Vec<u8>`, from index 0 to capacity.
///
/// The active elements and the spare capacity are both cleared, so bytes left
/// behind by `truncate()` or by shifting operations are covered too. The
/// length of the vector is left unchanged.
///
/// # Example
///
/// ```
/// use passphrase_zero::{is_vec_fully_wiped, wipe_vec};
///
/// let mut vec = vec![0xFFu8; 64];
/// vec.truncate(8);
///
/// wipe_vec(&mut vec);
/// assert!(is_vec_fully_wiped(&vec));
/// ```
#[inline(never)]
pub fn wipe_vec(vec: &mut Vec<u8>) {
    let capacity = vec.capacity();
    if capacity == 0 {
        return;
    }

    unsafe {
        // SAFETY (PRECONDITIONS ARE MET): Vec guarantees the allocation is valid for capacity bytes
        core::ptr::write_bytes(vec.as_mut_ptr(), 0, capacity);
        core::ptr::read_volatile(vec.as_ptr());
    }

    compiler_fence(Ordering::SeqCst);
}

/// Wipes only the spare capacity of a `Vec<u8>` (the region between `len` and
/// `capacity`), leaving the active bytes untouched.
///
/// # Example
///
/// ```
/// use passphrase_zero::{is_spare_capacity_wiped, wipe_spare_capacity};
///
/// let mut vec = vec![0xFFu8; 32];
/// vec.truncate(4);
///
/// wipe_spare_capacity(&mut vec);
///
/// assert!(vec.iter().all(|&b| b == 0xFF));
/// assert!(is_spare_capacity_wiped(&vec));
/// ```
#[inline(never)]
pub fn wipe_spare_capacity(vec: &mut Vec<u8>) {
    let spare = vec.capacity() - vec.len();
    if spare == 0 {
        return;
    }

    unsafe {
        // SAFETY (PRECONDITIONS ARE MET): [len, capacity) lies inside the allocation
        let spare_ptr = vec.as_mut_ptr().add(vec.len());
        core::ptr::write_bytes(spare_ptr, 0, spare);
        core::ptr::read_volatile(spare_ptr);
    }

    compiler_fence(Ordering::SeqCst);
}

/// Returns `true` if every byte of `slice` is zero.
#[inline(always)]
pub fn is_wiped(slice: &[u8]) -> bool {
    slice.iter().all(|&b| b == 0)
}

/// Returns `true` if the whole allocation of `vec` (0 to capacity) is zero.
///
/// Reads spare capacity, which is sound for `u8`: the allocation is valid for
/// `capacity` bytes and no values are constructed from it beyond plain bytes.
#[inline(never)]
pub fn is_vec_fully_wiped(vec: &Vec<u8>) -> bool {
    let base = vec.as_ptr();

    (0..vec.capacity()).all(|i| unsafe { core::ptr::read_volatile(base.add(i)) } == 0)
}

/// Returns `true` if the spare capacity of `vec` is zero (or there is none).
#[inline(never)]
pub fn is_spare_capacity_wiped(vec: &Vec<u8>) -> bool {
    let base = vec.as_ptr();

    (vec.len()..vec.capacity()).all(|i| unsafe { core::ptr::read_volatile(base.add(i)) } == 0)
}
