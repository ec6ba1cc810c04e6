// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::paginate;
use std::num::NonZeroUsize;

fn size(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

#[test]
fn test_total_pages_is_ceiling_of_count_over_size() {
    let records: Vec<u32> = (0..25).collect();
    assert_eq!(paginate(&records, 1, size(10)).total_pages, 3);
    assert_eq!(paginate(&records, 1, size(25)).total_pages, 1);
    assert_eq!(paginate(&records, 1, size(26)).total_pages, 1);
    assert_eq!(paginate(&records, 1, size(1)).total_pages, 25);
}

#[test]
fn test_empty_collection_serves_one_empty_page() {
    let records: Vec<u32> = Vec::new();
    let page = paginate(&records, 1, size(10));
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.page, 1);
    assert!(page.items.is_empty());
    assert_eq!(page.total_records, 0);
}

#[test]
fn test_requested_page_clamps_low_and_high() {
    let records: Vec<u32> = (0..25).collect();

    let low = paginate(&records, 0, size(10));
    assert_eq!(low.page, 1);
    assert_eq!(low.items, (0..10).collect::<Vec<u32>>());

    let high = paginate(&records, 99, size(10));
    assert_eq!(high.page, 3);
    assert_eq!(high.items, (20..25).collect::<Vec<u32>>());
}

#[test]
fn test_slicing_uses_half_open_ranges() {
    let records: Vec<u32> = (0..25).collect();
    let second = paginate(&records, 2, size(10));
    assert_eq!(second.items, (10..20).collect::<Vec<u32>>());
    assert_eq!(second.page, 2);
}

#[test]
fn test_final_page_holds_the_remainder() {
    let records: Vec<u32> = (0..7).collect();
    let last = paginate(&records, 3, size(3));
    assert_eq!(last.page, 3);
    assert_eq!(last.items, vec![6]);
}
