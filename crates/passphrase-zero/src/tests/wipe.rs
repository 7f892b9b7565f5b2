// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use proptest::prelude::*;

use crate::{is_spare_capacity_wiped, is_vec_fully_wiped, is_wiped, wipe, wipe_vec};

proptest! {
    #[test]
    fn wipe_clears_any_content(mut data in proptest::collection::vec(any::<u8>(), 0..512)) {
        wipe(&mut data);

        prop_assert!(is_wiped(&data));
    }

    #[test]
    fn wipe_vec_clears_truncated_tail(
        data in proptest::collection::vec(1u8..=255, 1..256),
        keep in 0usize..256,
    ) {
        let mut vec = data;
        let keep = keep.min(vec.len());
        vec.truncate(keep);

        wipe_vec(&mut vec);

        prop_assert_eq!(vec.len(), keep);
        prop_assert!(is_vec_fully_wiped(&vec));
        prop_assert!(is_spare_capacity_wiped(&vec));
    }
}

#[test]
fn test_wipe_of_subrange_leaves_rest_untouched() {
    let mut data = *b"passphrase";

    wipe(&mut data[4..]);

    assert_eq!(&data[..4], b"pass");
    assert!(is_wiped(&data[4..]));
}
