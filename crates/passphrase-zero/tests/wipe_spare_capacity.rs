// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use passphrase_zero::{is_spare_capacity_wiped, is_wiped, wipe_spare_capacity};

/// Helper to read spare capacity bytes (unsafe but sound for testing).
fn read_spare_capacity(vec: &Vec<u8>) -> Vec<u8> {
    let base = vec.as_ptr();
    (vec.len()..vec.capacity())
        .map(|i| unsafe { *base.add(i) })
        .collect()
}

#[test]
fn test_wipe_spare_capacity_basic() {
    let mut vec = vec![0xFFu8; 100];
    vec.truncate(10);

    assert!(read_spare_capacity(&vec).iter().all(|&b| b == 0xFF));
    assert!(!is_spare_capacity_wiped(&vec));

    wipe_spare_capacity(&mut vec);

    // Active bytes unchanged
    assert!(vec.iter().all(|&b| b == 0xFF));
    assert!(is_wiped(&read_spare_capacity(&vec)));
    assert!(is_spare_capacity_wiped(&vec));
}

#[test]
fn test_wipe_spare_capacity_without_spare() {
    let mut vec = vec![0xFFu8; 10];
    vec.shrink_to_fit();

    wipe_spare_capacity(&mut vec);

    assert!(vec.iter().all(|&b| b == 0xFF));
    assert!(is_spare_capacity_wiped(&vec));
}
