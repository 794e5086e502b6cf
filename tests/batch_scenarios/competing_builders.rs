//! Independent builders coordinating only through the engine

use crate::common::*;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn second_submit_reports_stale_version() {
    let store = new_store();
    let a = new_ids(1)[0];
    let v0 = store.get_document(a).unwrap().version;

    let mut first = BatchBuilder::new(store.clone());
    let mut second = BatchBuilder::new(store.clone());
    first.modify([doc(a, "first", v0)]).unwrap();
    second.modify([doc(a, "second", v0)]).unwrap();

    let v1 = first.submit().unwrap().into_result().unwrap();
    let outcome = second.submit().unwrap();

    assert_eq!(
        outcome.conflict(),
        Some(&UpdateConflict {
            id: a,
            expected: v0,
            actual: v1,
        })
    );
    assert_eq!(store.get_document(a).unwrap().body, doc(a, "first", v0).body);
}

#[test]
fn writers_with_same_seed_create_the_same_document() {
    let store = new_store();
    let ours = seeded_ids(42, 3);
    let theirs = seeded_ids(42, 3);
    assert_eq!(ours, theirs);
    assert_ne!(seeded_ids(43, 3), ours);

    let mut first = BatchBuilder::new(store.clone());
    first
        .modify(ours.iter().map(|id| doc(*id, "first", Version::EMPTY)))
        .unwrap();
    let v1 = first.submit().unwrap().into_result().unwrap();

    // Both writers believe the documents are new; only one creation lands
    let mut second = BatchBuilder::new(store.clone());
    second
        .modify(theirs.iter().map(|id| doc(*id, "second", Version::EMPTY)))
        .unwrap();
    let conflict = *second.submit().unwrap().conflict().unwrap();
    assert!(theirs.contains(&conflict.id));
    assert_eq!(conflict.expected, Version::EMPTY);
    assert_eq!(conflict.actual, v1);

    let stored = store.get_documents(&ours).unwrap();
    assert!(stored.iter().all(|d| d.body == doc(d.id, "first", v1).body));
}

#[test]
fn checker_loses_to_concurrent_writer() {
    let store = new_store();
    let ids = new_ids(2);
    let (guard, target) = (ids[0], ids[1]);
    let v1 = seed(&store, &[doc(guard, "guard", Version::EMPTY)]);

    let mut reader = BatchBuilder::new(store.clone());
    reader.check([store.get_document(guard).unwrap()]).unwrap();
    reader.modify([doc(target, "derived", Version::EMPTY)]).unwrap();

    let mut writer = BatchBuilder::new(store.clone());
    writer.modify([doc(guard, "changed", v1)]).unwrap();
    writer.submit().unwrap().into_result().unwrap();

    assert!(!reader.submit().unwrap().is_committed());
    assert!(!store.get_document(target).unwrap().exists());
}

#[test]
fn racing_threads_produce_one_winner() {
    const WRITERS: usize = 8;

    let store = new_store();
    let a = new_ids(1)[0];
    let barrier = Arc::new(Barrier::new(WRITERS));

    let handles: Vec<_> = (0..WRITERS)
        .map(|i| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut batch = BatchBuilder::new(store);
                batch.modify([doc(a, &format!("writer-{}", i), Version::EMPTY)]).unwrap();
                barrier.wait();
                batch.submit().unwrap().is_committed()
            })
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|committed| *committed)
        .count();

    assert_eq!(winners, 1);
    assert_eq!(store.current_version(), Version::new(1));
}
