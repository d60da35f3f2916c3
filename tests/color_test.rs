//! Tests for distinct color generation

use std::collections::HashSet;

use rstag::store::TagStore;

#[test]
fn given_fresh_store_when_generating_first_color_then_a_color_is_returned() {
    let mut store = TagStore::new();

    // The first draw must happen unconditionally
    let color = store.generate_color();
    assert_eq!(color.to_string().len(), 13, "#rrrrggggbbbb form");
    assert!(color.to_string().starts_with('#'));
}

#[test]
fn given_repeated_draws_when_generating_colors_then_all_pairwise_distinct() {
    let mut store = TagStore::new();
    let mut seen = HashSet::new();

    for _ in 0..100 {
        let color = store.generate_color();
        assert!(seen.insert(color), "generate_color returned a used color");
    }
}

#[test]
fn given_earlier_sequence_when_generating_more_then_no_overlap_with_it() {
    let mut store = TagStore::new();

    let earlier: HashSet<_> = (0..10).map(|_| store.generate_color()).collect();
    for _ in 0..10 {
        let color = store.generate_color();
        assert!(!earlier.contains(&color));
    }
}
