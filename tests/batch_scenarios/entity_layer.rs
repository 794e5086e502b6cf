//! Typed entities through the facade

use crate::common::*;
use chrono::{DateTime, TimeZone, Utc};
use docbatch::{serde_helpers, DocStoreConfig, EntityStore, EntityTypeRegistry, JsonEntity, CONFIG_FILE_NAME};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Account {
    owner: String,
    balance: i64,
    #[serde(with = "serde_helpers::unix_time")]
    opened: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Transfer {
    amount: i64,
    #[serde(with = "serde_helpers::base64_bytes")]
    memo: Vec<u8>,
}

fn account(owner: &str, balance: i64) -> Account {
    Account {
        owner: owner.to_string(),
        balance,
        opened: Utc.timestamp_opt(1_600_000_000, 0).unwrap(),
    }
}

#[test]
fn transfer_between_accounts_commits_atomically() {
    let registry = EntityTypeRegistry::new();
    registry.register::<Account>(EntityType::new(1)).unwrap();
    registry.register::<Transfer>(EntityType::new(2)).unwrap();

    let store = EntityStore::with_default_serializer(new_store());
    store.initialize().unwrap();

    let alice = JsonEntity::create_registered(account("alice", 100), &registry).unwrap();
    let bob = JsonEntity::create_registered(account("bob", 0), &registry).unwrap();
    store
        .update_entities(&[alice.clone(), bob.clone()], &[])
        .unwrap()
        .into_result()
        .unwrap();

    let alice: JsonEntity<Account> = store.get_entity(alice.id()).unwrap();
    let bob: JsonEntity<Account> = store.get_entity(bob.id()).unwrap();
    let transfer = JsonEntity::create_registered(
        Transfer {
            amount: 30,
            memo: b"rent".to_vec(),
        },
        &registry,
    )
    .unwrap();

    let mut batch = store.create_batch_builder();
    let mut alice_after = alice.entity().cloned().unwrap();
    alice_after.balance -= 30;
    let mut bob_after = bob.entity().cloned().unwrap();
    bob_after.balance += 30;
    batch
        .modify_entity(&[alice.modify(alice_after), bob.modify(bob_after)])
        .unwrap();
    batch.modify_entity(&[transfer.clone()]).unwrap();
    let version = batch.submit().unwrap().into_result().unwrap();

    let accounts: Vec<JsonEntity<Account>> = store.get_entities(&[alice.id(), bob.id()]).unwrap();
    assert_eq!(accounts[0].entity().map(|a| a.balance), Some(70));
    assert_eq!(accounts[1].entity().map(|a| a.balance), Some(30));
    assert!(accounts.iter().all(|a| a.version() == version));

    let stored: JsonEntity<Transfer> = store.get_entity(transfer.id()).unwrap();
    assert_eq!(stored.entity().map(|t| t.memo.as_slice()), Some(&b"rent"[..]));
    assert_eq!(transfer.id().entity_type(), EntityType::new(2));

    // A transfer built from the old reads now conflicts
    let mut stale = store.create_batch_builder();
    stale.modify_entity(&[alice.modify(account("alice", 0))]).unwrap();
    assert!(!stale.submit().unwrap().is_committed());
}

#[test]
fn store_built_from_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[json]\npretty = true\n").unwrap();

    let config = DocStoreConfig::from_file(&path).unwrap();
    let backend = new_store();
    let store = EntityStore::from_config(backend.clone(), &config);

    let entity = JsonEntity::create(account("carol", 5), EntityType::new(1));
    store
        .update_entities(&[entity.clone()], &[])
        .unwrap()
        .into_result()
        .unwrap();

    let raw = backend.get_document(entity.id()).unwrap();
    assert!(raw.body.unwrap().contains('\n'));
    let read: JsonEntity<Account> = store.get_entity(entity.id()).unwrap();
    assert_eq!(read.entity(), Some(&account("carol", 5)));
}
