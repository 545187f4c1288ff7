//! Property tests for `compute_delta`

use std::collections::BTreeSet;

use groupsync_core::compute_delta;
use proptest::prelude::*;

fn path_set() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z]{1,6}\\.swift", 0..12)
        .prop_map(|paths| paths.into_iter().collect())
}

proptest! {
    #[test]
    fn identical_sets_have_no_changes(paths in path_set(), seed in any::<u64>()) {
        let mut shuffled = paths.clone();
        let len = shuffled.len();
        if len > 1 {
            shuffled.rotate_left((seed as usize) % len);
        }

        let delta = compute_delta(&shuffled, &paths);
        prop_assert!(delta.files_to_add().is_empty());
        prop_assert!(delta.files_to_remove().is_empty());
        prop_assert!(!delta.has_changes());
    }

    #[test]
    fn swapping_arguments_inverts_the_delta(new in path_set(), old in path_set()) {
        let forward = compute_delta(&new, &old);
        let backward = compute_delta(&old, &new);

        prop_assert_eq!(forward.files_to_add(), backward.files_to_remove());
        prop_assert_eq!(forward.files_to_remove(), backward.files_to_add());
    }

    #[test]
    fn delta_matches_set_difference(new in path_set(), old in path_set()) {
        let delta = compute_delta(&new, &old);
        let new_set: BTreeSet<&String> = new.iter().collect();
        let old_set: BTreeSet<&String> = old.iter().collect();

        let added: BTreeSet<&String> = delta.files_to_add().iter().collect();
        let removed: BTreeSet<&String> = delta.files_to_remove().iter().collect();
        prop_assert_eq!(added, new_set.difference(&old_set).copied().collect::<BTreeSet<_>>());
        prop_assert_eq!(removed, old_set.difference(&new_set).copied().collect::<BTreeSet<_>>());
        prop_assert_eq!(delta.has_changes(), new_set != old_set);
    }
}
