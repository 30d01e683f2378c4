#![allow(unused_crate_dependencies, reason = "These are tests, not the main crate.")]

use std::collections::BTreeSet;

use oorandom::Rand32;

use tethered::{
    DEFAULT_MAX_LEVEL, GeometricLevels, LevelSequence, LevelSource, SkipList, SkipNodeId,
};


// ================================
//  Helpers
// ================================

fn list_with_levels(levels: &[usize]) -> SkipList<i32, LevelSequence> {
    SkipList::new(LevelSequence::new(levels.iter().copied()))
}

/// The payloads that the forward links of `id` point to, one entry per level of the node.
fn forward_data<L>(list: &SkipList<i32, L>, id: SkipNodeId) -> Vec<Option<i32>> {
    list.node(id)
        .unwrap()
        .forward_links()
        .iter()
        .map(|link| link.map(|next| *list.data(next).unwrap()))
        .collect()
}

/// Check that every level is strictly increasing, is a subsequence of the level below, and only
/// contains nodes which participate in that level.
fn check_levels<T: Ord + Clone, L>(list: &SkipList<T, L>) {
    let mut below: Option<Vec<T>> = None;

    for level in 0..list.height() {
        let mut payloads = Vec::new();
        let mut cursor = list.head();
        while let Some(id) = cursor {
            let node = list.node(id).unwrap();
            assert!(level < node.level_count(), "node linked above its level count");
            payloads.push(node.data().clone());
            cursor = node.forward(level);
        }

        assert!(payloads.is_sorted_by(|lhs, rhs| lhs < rhs), "level {level} is out of order");
        assert!(payloads.iter().eq(list.level_iter(level)));

        if let Some(below) = &below {
            let below_set: BTreeSet<&T> = below.iter().collect();
            assert!(payloads.iter().all(|payload| below_set.contains(payload)));
        }
        below = Some(payloads);
    }

    if let Some(head) = list.head() {
        assert_eq!(list.node(head).unwrap().level_count(), list.height());
    }
}


// ================================
//  Empty list
// ================================

#[test]
fn empty_list() {
    let list: SkipList<i32, LevelSequence> = list_with_levels(&[2, 1, 4, 2]);

    assert!(list.is_empty());
    assert_eq!(list.head(), None);
    assert_eq!(list.height(), 0);
    assert!(list.find(&5).is_empty());
    assert!(!list.contains(&5));
    assert_eq!(list.iter().next(), None);

    let _check_that_debug_works = format!("{list:?}");
}

#[test]
fn first_insert_does_not_draw_a_level() {
    let mut list = list_with_levels(&[2, 1, 4, 2]);
    let five = list.insert(5);

    assert_eq!(list.head(), Some(five));
    assert_eq!(forward_data(&list, five), [None]);
    assert_eq!(list.level_source().consumed(), 0);
}


// ================================
//  Exact link layouts
// ================================

#[test]
fn insert_after_head_grows_the_head() {
    let mut list = list_with_levels(&[2, 1, 4, 2]);
    let five = list.insert(5);
    let seven = list.insert(7);

    assert_eq!(list.head(), Some(five));
    assert_eq!(forward_data(&list, five), [Some(7), Some(7)]);
    assert_eq!(forward_data(&list, seven), [None, None]);
    check_levels(&list);
}

#[test]
fn insert_at_the_tail() {
    let mut list = list_with_levels(&[2, 1, 4, 2]);
    let five = list.insert(5);
    let seven = list.insert(7);
    let nine = list.insert(9);

    assert_eq!(forward_data(&list, five), [Some(7), Some(7)]);
    assert_eq!(forward_data(&list, seven), [Some(9), None]);
    assert_eq!(forward_data(&list, nine), [None]);
    check_levels(&list);
}

#[test]
fn insert_in_the_middle() {
    let mut list = list_with_levels(&[2, 1, 4, 2]);
    let five = list.insert(5);
    let nine = list.insert(9);
    let seven = list.insert(7);

    assert_eq!(forward_data(&list, five), [Some(7), Some(9)]);
    assert_eq!(forward_data(&list, seven), [Some(9)]);
    assert_eq!(forward_data(&list, nine), [None, None]);
    assert_eq!(list.find(&8), [seven, five]);
    check_levels(&list);
}

#[test]
fn duplicate_insert_is_idempotent() {
    let mut list = list_with_levels(&[2, 1, 4, 2]);
    list.insert(5);
    let nine = list.insert(9);
    list.insert(7);

    let consumed = list.level_source().consumed();
    assert_eq!(list.insert(9), nine);
    assert_eq!(list.level_source().consumed(), consumed);
    assert_eq!(list.len(), 3);
    assert_eq!(list.iter().count(), 3);
    assert_eq!(forward_data(&list, nine), [None, None]);
}

#[test]
fn smaller_insert_replaces_the_head() {
    let mut list = list_with_levels(&[2, 1, 4, 2]);
    let five = list.insert(5);
    let seven = list.insert(7);
    let three = list.insert(3);

    assert_eq!(list.head(), Some(three));
    assert_eq!(list.height(), 2);
    assert_eq!(forward_data(&list, three), [Some(5), Some(7)]);
    assert_eq!(forward_data(&list, five), [Some(7)]);
    assert_eq!(forward_data(&list, seven), [None, None]);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [3, 5, 7]);
    check_levels(&list);
}

#[test]
fn smaller_insert_can_raise_the_height() {
    let mut list = list_with_levels(&[2, 1, 4, 2]);
    let five = list.insert(5);
    let three = list.insert(3);

    assert_eq!(list.head(), Some(three));
    assert_eq!(forward_data(&list, three), [Some(5), Some(5)]);
    assert_eq!(forward_data(&list, five), [None, None]);
    check_levels(&list);
}


// ================================
//  Level caps
// ================================

#[test]
fn huge_level_counts_are_capped() {
    let mut list = SkipList::new(|| usize::MAX);
    assert_eq!(list.max_level(), DEFAULT_MAX_LEVEL);

    let one = list.insert(1);
    let two = list.insert(2);
    let zero = list.insert(0);

    assert_eq!(list.head(), Some(zero));
    assert_eq!(list.height(), DEFAULT_MAX_LEVEL);
    assert_eq!(list.node(one).unwrap().level_count(), DEFAULT_MAX_LEVEL);
    assert_eq!(list.node(two).unwrap().level_count(), DEFAULT_MAX_LEVEL);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 1, 2]);
    check_levels(&list);
}

#[test]
fn custom_max_level() {
    let mut list = SkipList::new(|| usize::MAX).with_max_level(3);
    for payload in [4, 8, 2, 6] {
        list.insert(payload);
    }

    assert_eq!(list.max_level(), 3);
    assert_eq!(list.height(), 3);
    assert!(list.level_iter(2).copied().eq([2, 4, 6, 8]));
    assert_eq!(list.level_iter(3).next(), None);
    check_levels(&list);
}


// ================================
//  Lookup
// ================================

#[test]
fn get_and_contains() {
    let mut list = SkipList::new_seeded(7);
    let ids: Vec<_> = [10, 20, 30].into_iter().map(|payload| list.insert(payload)).collect();

    assert_eq!(list.get(&20), Some(ids[1]));
    assert_eq!(list.get(&25), None);
    assert_eq!(list.get(&5), None);
    assert!(list.contains(&30));
    assert!(!list.contains(&31));
    assert_eq!(list.find(&30).len(), list.height());
}

#[test]
fn clear_keeps_nothing() {
    let mut list = SkipList::<i32>::default();
    let one = list.insert(1);
    list.insert(2);
    list.clear();

    assert!(list.is_empty());
    assert_eq!(list.len(), 0);
    assert!(list.node(one).is_err());

    let again = list.insert(1);
    assert_ne!(again, one);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1]);
}


// ================================
//  Randomized
// ================================

#[test]
fn random_inserts_match_btree_set() {
    let mut prng = Rand32::new(0x_12345678);
    let mut list = SkipList::new(GeometricLevels::new_seeded(0x_8765_4321).with_max_level(8));
    let mut model: BTreeSet<u32> = BTreeSet::new();

    for round in 0..2_000 {
        let payload = prng.rand_range(0..500);
        let expected_new = model.insert(payload);
        let len_before = list.len();

        let id = list.insert(payload);
        assert_eq!(list.data(id), Ok(&payload));
        assert_eq!(list.len() > len_before, expected_new);

        if round % 250 == 0 {
            check_levels(&list);
        }
    }

    check_levels(&list);
    assert!(list.height() <= 8);
    assert_eq!(list.len(), model.len());
    assert!(list.iter().eq(model.iter()));

    for payload in 0..500 {
        assert_eq!(list.contains(&payload), model.contains(&payload));
    }
}

#[test]
fn borrowed_level_source() {
    let mut levels = GeometricLevels::new_seeded(3);
    let mut list = SkipList::new(|| levels.next_level_count());

    for payload in (0..64).rev() {
        list.insert(payload);
    }

    check_levels(&list);
    assert!(list.iter().copied().eq(0..64));
    drop(list);

    // The source is usable again once the list is gone.
    assert!(levels.next_level_count() >= 1);
}
