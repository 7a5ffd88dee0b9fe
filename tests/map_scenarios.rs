// ==============================================
// FORGETTING MAP SCENARIO TESTS (integration)
// ==============================================
//
// End-to-end eviction and ordering scenarios driven purely through the
// public surface: add, find, len, keys, access_count.

use forgetmap::ForgettingMap;

#[test]
fn association_can_be_added() {
    let map = ForgettingMap::new(10);
    assert!(map.add("key", "content"));
    assert_eq!(map.len(), 1);
}

#[test]
fn existing_association_can_be_found() {
    let map = ForgettingMap::new(10);
    map.add("key", "content".to_string());

    let found = map.find(&"key").expect("freshly added key must be found");
    assert_eq!(*found, "content");
}

#[test]
fn integer_keys_are_supported() {
    let map = ForgettingMap::new(10);
    assert!(map.add(10, "content"));
    assert_eq!(map.find(&10).as_deref(), Some(&"content"));
}

#[test]
fn holds_no_more_associations_than_capacity() {
    let map = ForgettingMap::new(3);
    map.add(10, "content_10");
    map.add(15, "content_15");
    map.add(20, "content_20");
    map.add(50, "content_50");

    assert_eq!(map.len(), 3);
}

#[test]
fn least_recent_of_untouched_keys_is_forgotten_first() {
    let map = ForgettingMap::new(3);
    map.add(10, "content_10");
    map.add(15, "content_15");
    map.add(20, "content_20");
    map.add(50, "content_50");

    assert!(map.find(&15).is_some());
    assert!(map.find(&20).is_some());
    assert!(map.find(&50).is_some());
    assert_eq!(map.find(&10), None, "oldest untouched key must be gone");
    assert_eq!(map.len(), 3);
}

#[test]
fn keys_follow_access_order() {
    let map = ForgettingMap::new(3);
    map.add(0, "content_0");
    map.add(15, "content_15");
    map.add(30, "content_30");
    assert_eq!(map.keys(), vec![0, 15, 30]);

    map.find(&15);
    assert_eq!(map.keys(), vec![0, 30, 15]);

    map.find(&0);
    assert_eq!(map.keys(), vec![30, 15, 0]);
}

#[test]
fn least_found_key_is_forgotten() {
    let map = ForgettingMap::new(3);
    map.add(0, "content_0");
    map.add(15, "content_15");
    map.add(30, "content_30");

    map.find(&15);
    map.find(&15);
    map.find(&15);
    map.find(&0);
    map.find(&30);
    map.find(&30);

    map.add(40, "content_40");

    assert_eq!(map.len(), 3);
    let keys = map.keys();
    assert!(keys.contains(&15));
    assert!(keys.contains(&30));
    assert!(keys.contains(&40));
    assert!(!keys.contains(&0), "lowest-count key must be gone");
}

#[test]
fn never_found_key_loses_to_found_keys() {
    let map = ForgettingMap::new(3);
    map.add(30, "content_30");
    map.add(15, "content_15");
    map.add(0, "content_0");

    map.find(&15);
    map.find(&0);

    map.add(40, "content_40");

    let keys = map.keys();
    assert!(keys.contains(&15));
    assert!(keys.contains(&0));
    assert!(keys.contains(&40));
    assert!(!keys.contains(&30));
}

#[test]
fn recency_decides_among_tied_least_found_keys() {
    let map = ForgettingMap::new(3);
    map.add(0, "content_0");
    map.add(15, "content_15");
    map.add(30, "content_30");

    map.find(&15);
    map.find(&15);
    map.find(&15);
    map.find(&0);
    map.find(&30);

    // 0 and 30 tie at one lookup each; 0 was touched longer ago.
    map.add(40, "content_40");

    assert_eq!(map.len(), 3);
    let keys = map.keys();
    assert!(keys.contains(&15));
    assert!(keys.contains(&30));
    assert!(keys.contains(&40));
    assert!(!keys.contains(&0));
}

#[test]
fn bulk_insertion_never_exceeds_capacity() {
    let map = ForgettingMap::new(3);
    for i in 0..500 {
        map.add(i, format!("content_{i}"));
        assert!(map.len() <= 3);
    }

    assert_eq!(map.len(), 3);
    let keys = map.keys();
    assert!(!keys.contains(&0));
    assert_eq!(keys, vec![497, 498, 499]);
    map.check_invariants().unwrap();
}

#[test]
fn miss_counts_survive_until_purged_by_eviction() {
    let map: ForgettingMap<i32, &str> = ForgettingMap::new(3);

    assert_eq!(map.find(&99), None);
    assert_eq!(map.access_count(&99), 1);
    assert_eq!(map.len(), 0, "a miss must not create an association");

    assert_eq!(map.find(&99), None);
    assert_eq!(map.access_count(&99), 2);
}

#[test]
fn fallback_purges_phantom_minimum_then_converges() {
    let map = ForgettingMap::new(3);
    map.add(1, "a");
    map.add(2, "b");
    map.add(3, "c");
    for key in [1, 2, 3] {
        map.find(&key);
        map.find(&key);
    }

    // The minimum count is now held only by a key that was never added.
    map.find(&77);
    map.add(4, "d");

    assert_eq!(map.len(), 3);
    assert_eq!(map.access_count(&77), 0, "phantom count must be purged");
    let keys = map.keys();
    assert!(!keys.contains(&1), "least-found stored key must be gone");
    assert!(keys.contains(&4));
    assert!(map.metrics().fallback_evictions >= 1);
    map.check_invariants().unwrap();
}

#[test]
fn lookup_count_is_observable() {
    let map = ForgettingMap::new(3);
    map.add(7, "content");
    assert_eq!(map.access_count(&7), 0);

    map.find(&7);
    map.find(&7);
    assert_eq!(map.access_count(&7), 2);

    // Replacing the value preserves the count.
    map.add(7, "replacement");
    assert_eq!(map.access_count(&7), 2);
}
