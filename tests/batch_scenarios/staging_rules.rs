//! Staging rules exercised through the public builder API

use crate::common::*;
use proptest::prelude::*;

#[test]
fn modify_twice_in_one_batch_conflicts_before_submit() {
    let store = new_store();
    let a = new_ids(1)[0];
    let mut batch = BatchBuilder::new(store.clone());

    batch.modify([doc(a, "first", Version::EMPTY)]).unwrap();
    let err = batch.modify([doc(a, "second", Version::EMPTY)]).unwrap_err();
    assert_eq!(err.to_string(), format!("Document {} is already being modified.", a));

    match err {
        Error::StagingConflict { id, kind } => {
            assert_eq!(id, a);
            assert_eq!(kind, StagingConflictKind::AlreadyModified);
        }
        other => panic!("Wrong error variant: {:?}", other),
    }
    // Nothing reached the engine
    assert_eq!(store.current_version(), Version::EMPTY);
}

#[test]
fn check_with_different_version_conflicts() {
    let store = new_store();
    let a = new_ids(1)[0];
    let mut batch = BatchBuilder::new(store);

    batch.check([doc(a, "x", Version::new(1))]).unwrap();
    let err = batch.check([doc(a, "x", Version::new(2))]).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("A different version of document {} is already being checked.", a)
    );

    let err = batch.modify([doc(a, "x", Version::new(2))]).unwrap_err();
    assert!(err.is_staging_conflict());
    assert!(batch.is_checked(&a));
    assert!(!batch.is_modified(&a));
}

#[test]
fn check_after_modify_with_same_version_is_absorbed() {
    let store = new_store();
    let a = new_ids(1)[0];
    let mut batch = BatchBuilder::new(store);

    batch.modify([doc(a, "x", Version::EMPTY)]).unwrap();
    batch.check([doc(a, "other", Version::EMPTY)]).unwrap();

    assert!(batch.is_modified(&a));
    assert!(!batch.is_checked(&a));
    assert_eq!(batch.len(), 1);
}

#[test]
fn duplicate_ids_within_one_call_are_validated_together() {
    let store = new_store();
    let a = new_ids(1)[0];
    let mut batch = BatchBuilder::new(store);

    let err = batch
        .modify(vec![doc(a, "x", Version::EMPTY), doc(a, "y", Version::EMPTY)])
        .unwrap_err();
    assert!(err.is_staging_conflict());
    assert!(batch.is_empty());

    // Same id and version twice in one check call is harmless
    batch
        .check(vec![doc(a, "x", Version::EMPTY), doc(a, "x", Version::EMPTY)])
        .unwrap();
    assert_eq!(batch.len(), 1);
}

proptest! {
    #[test]
    fn repeated_checks_are_idempotent(repeats in 1usize..20, version in 0u64..1000) {
        let store = new_store();
        let a = new_ids(1)[0];

        let mut once = BatchBuilder::new(store.clone());
        once.check([doc(a, "x", Version::new(version))]).unwrap();

        let mut many = BatchBuilder::new(store);
        for _ in 0..repeats {
            many.check([doc(a, "x", Version::new(version))]).unwrap();
        }

        prop_assert_eq!(once.checked().collect::<Vec<_>>(), many.checked().collect::<Vec<_>>());
        prop_assert_eq!(many.pending().checked, 1);
    }

    #[test]
    fn check_then_modify_promotes(version in 0u64..1000) {
        let store = new_store();
        let a = new_ids(1)[0];
        let mut batch = BatchBuilder::new(store);

        batch.check([doc(a, "x", Version::new(version))]).unwrap();
        batch.modify([doc(a, "y", Version::new(version))]).unwrap();

        prop_assert!(batch.is_modified(&a));
        prop_assert!(!batch.is_checked(&a));
    }

    #[test]
    fn one_conflicting_document_stages_none(k in 2usize..10, bad in 0usize..10) {
        let bad = bad % k;
        let store = new_store();
        let ids = new_ids(k);
        let mut batch = BatchBuilder::new(store);

        batch.modify([doc(ids[bad], "staged", Version::EMPTY)]).unwrap();

        let call: Vec<Document> = ids.iter().map(|id| doc(*id, "again", Version::EMPTY)).collect();
        prop_assert!(batch.modify(call.clone()).is_err());
        prop_assert!(batch.check(
            call.iter().map(|d| Document::new(d.id, None, Version::new(7))).collect::<Vec<_>>()
        ).is_err());

        prop_assert_eq!(batch.len(), 1);
        for (i, id) in ids.iter().enumerate() {
            prop_assert_eq!(batch.is_modified(id), i == bad);
            prop_assert!(!batch.is_checked(id));
        }
    }

    #[test]
    fn generated_ids_keep_their_type(tag in any::<i32>()) {
        let id = EntityId::new(EntityType::new(tag));
        prop_assert_eq!(id.entity_type(), EntityType::new(tag));

        let parsed: EntityId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed.entity_type(), EntityType::new(tag));
    }
}
