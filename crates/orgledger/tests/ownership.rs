//! Integration tests for the ownership guard and the history auditor,
//! driven through the public `EntityService` surface.

use orgledger::acl::AclError;
use orgledger::store::{MemoryStore, SqliteStore, VersionedStore};
use orgledger::{CallerIdentity, EntityKind, EntityService, HolderFields, ServiceError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct AssetFields {
    color: String,
    size: u32,
    holder: String,
    appraised_value: u32,
}

impl HolderFields for AssetFields {
    fn holder(&self) -> &str {
        &self.holder
    }

    fn set_holder(&mut self, new_holder: String) {
        self.holder = new_holder;
    }
}

struct AssetEntity;

impl EntityKind for AssetEntity {
    type Fields = AssetFields;
    const NAMESPACE: &'static str = "asset";
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn blue(holder: &str) -> AssetFields {
    AssetFields {
        color: "blue".into(),
        size: 5,
        holder: holder.into(),
        appraised_value: 300,
    }
}

fn service() -> EntityService<MemoryStore, AssetEntity> {
    EntityService::new(MemoryStore::new())
}

#[tokio::test]
async fn create_then_read_roundtrips_and_stamps_orgs() {
    init_tracing();
    let assets = service();
    let org_a = CallerIdentity::member("OrgA");

    assets.create(&org_a, "k1", blue("alice")).await.unwrap();
    let record = assets.read(&org_a, "k1").await.unwrap();

    assert_eq!(record.id, "k1");
    assert_eq!(record.fields, blue("alice"));
    assert_eq!(record.owner_org.as_str(), "OrgA");
    assert_eq!(record.updated_by.as_str(), "OrgA");
}

#[tokio::test]
async fn create_existing_key_fails() {
    let assets = service();
    let org_a = CallerIdentity::member("OrgA");

    assets.create(&org_a, "k1", blue("alice")).await.unwrap();
    let err = assets.create(&org_a, "k1", blue("bob")).await.unwrap_err();
    assert!(matches!(err, ServiceError::AlreadyExists(_)));
}

#[tokio::test]
async fn update_preserves_owner_and_restamps_updater() {
    let assets = service();
    let org_a = CallerIdentity::member("OrgA");
    let admin = CallerIdentity::admin("OrgOps");

    assets.create(&org_a, "k1", blue("alice")).await.unwrap();
    assets.update(&admin, "k1", blue("carol")).await.unwrap();

    let record = assets.read(&org_a, "k1").await.unwrap();
    assert_eq!(record.owner_org.as_str(), "OrgA");
    assert_eq!(record.updated_by.as_str(), "OrgOps");
}

#[tokio::test]
async fn foreign_org_is_denied_everywhere_but_create() {
    let assets = service();
    let org_a = CallerIdentity::member("OrgA");
    let org_b = CallerIdentity::member("OrgB");

    assets.create(&org_a, "k1", blue("alice")).await.unwrap();

    assert!(assets
        .update(&org_b, "k1", blue("mallory"))
        .await
        .unwrap_err()
        .is_access_denied());
    assert!(assets
        .delete(&org_b, "k1")
        .await
        .unwrap_err()
        .is_access_denied());
    assert!(assets
        .read(&org_b, "k1")
        .await
        .unwrap_err()
        .is_access_denied());
    assert!(assets
        .history(&org_b, "k1")
        .await
        .unwrap_err()
        .is_access_denied());
    assert!(assets
        .transfer_holder(&org_b, "k1", "mallory")
        .await
        .unwrap_err()
        .is_access_denied());

    // The same caller owns what it creates.
    assets.create(&org_b, "k2", blue("bob")).await.unwrap();
    let record = assets.read(&org_b, "k2").await.unwrap();
    assert_eq!(record.owner_org.as_str(), "OrgB");
}

#[tokio::test]
async fn denied_mutation_leaves_no_trace_in_history() {
    let assets = service();
    let org_a = CallerIdentity::member("OrgA");
    let org_b = CallerIdentity::member("OrgB");

    assets.create(&org_a, "k1", blue("alice")).await.unwrap();
    let _ = assets.update(&org_b, "k1", blue("mallory")).await;
    let _ = assets.delete(&org_b, "k1").await;

    let history = assets.history(&org_a, "k1").await.unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn mutations_on_absent_key_are_not_found() {
    let assets = service();
    let org_a = CallerIdentity::member("OrgA");

    let err = assets.update(&org_a, "ghost", blue("x")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Acl(AclError::NotFound(_))));

    let err = assets.delete(&org_a, "ghost").await.unwrap_err();
    assert!(matches!(err, ServiceError::Acl(AclError::NotFound(_))));
}

#[tokio::test]
async fn transfer_holder_rewrites_value_field_only() {
    let assets = service();
    let org_a = CallerIdentity::member("OrgA");

    assets.create(&org_a, "k1", blue("alice")).await.unwrap();
    assets.transfer_holder(&org_a, "k1", "bob").await.unwrap();

    let record = assets.read(&org_a, "k1").await.unwrap();
    assert_eq!(record.fields.holder(), "bob");
    assert_eq!(record.fields.color, "blue");
    assert_eq!(record.owner_org.as_str(), "OrgA");
}

#[tokio::test]
async fn list_all_is_unscoped_and_key_ordered() {
    let assets = service();
    let org_a = CallerIdentity::member("OrgA");
    let org_b = CallerIdentity::member("OrgB");

    assets.create(&org_b, "k2", blue("bob")).await.unwrap();
    assets.create(&org_a, "k1", blue("alice")).await.unwrap();

    // No caller identity at all: the scan applies no per-record ACL.
    let records = assets.list_all().await.unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["k1", "k2"]);
}

#[tokio::test]
async fn history_tracks_every_commit_in_order() {
    let assets = service();
    let org_a = CallerIdentity::member("OrgA");

    assets.create(&org_a, "k1", blue("alice")).await.unwrap();
    assets.update(&org_a, "k1", blue("bob")).await.unwrap();
    assets.delete(&org_a, "k1").await.unwrap();

    let history = assets.history(&org_a, "k1").await.unwrap();
    assert_eq!(history.len(), 3);

    assert_eq!(history[0].snapshot().unwrap().fields.holder(), "alice");
    assert_eq!(history[1].snapshot().unwrap().fields.holder(), "bob");
    assert!(history[2].is_delete());

    // Final entry is a delete iff the key is currently absent.
    assert!(!assets.exists("k1").await.unwrap());

    for pair in history.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
        assert_ne!(pair[0].tx_id, pair[1].tx_id);
    }
}

#[tokio::test]
async fn owner_org_is_constant_across_all_revisions() {
    let assets = service();
    let org_a = CallerIdentity::member("OrgA");
    let admin = CallerIdentity::admin("OrgOps");

    assets.create(&org_a, "k1", blue("alice")).await.unwrap();
    assets.update(&admin, "k1", blue("bob")).await.unwrap();
    assets.transfer_holder(&org_a, "k1", "carol").await.unwrap();

    let history = assets.history(&org_a, "k1").await.unwrap();
    for revision in &history {
        let record = revision.snapshot().unwrap();
        assert_eq!(record.owner_org.as_str(), "OrgA");
    }
}

#[tokio::test]
async fn corrupt_revision_degrades_without_failing_the_scan() {
    use orgledger::core::{encode_record, OrgId, Record};
    use orgledger::RevisionValue;

    let assets = service();
    let org_a = CallerIdentity::member("OrgA");

    assets.create(&org_a, "k1", blue("alice")).await.unwrap();
    // Garbage written straight through the store, bypassing the service.
    assets
        .store()
        .put("asset/k1", b"\xff\xffnot a record")
        .await
        .unwrap();
    // Restore a valid current record the same way, so the read gate can
    // still decode an owner.
    let restored = Record::new("k1", OrgId::from("OrgA"), blue("bob"));
    assets
        .store()
        .put("asset/k1", &encode_record(&restored).unwrap())
        .await
        .unwrap();

    let history = assets.history(&org_a, "k1").await.unwrap();
    assert_eq!(history.len(), 3);
    assert!(history[0].snapshot().is_some());
    assert!(matches!(history[1].value, RevisionValue::Unreadable(_)));
    assert!(!history[1].is_delete());
    assert!(history[2].snapshot().is_some());
}

#[tokio::test]
async fn corrupt_current_record_is_fatal_for_single_read() {
    let assets = service();
    let org_a = CallerIdentity::member("OrgA");

    assets.create(&org_a, "k1", blue("alice")).await.unwrap();
    assets
        .store()
        .put("asset/k1", b"\xff\xffnot a record")
        .await
        .unwrap();

    let err = assets.read(&org_a, "k1").await.unwrap_err();
    assert!(matches!(err, ServiceError::Acl(AclError::Codec(_))));
}

#[tokio::test]
async fn deleted_key_history_stays_with_last_owner() {
    let assets = service();
    let org_a = CallerIdentity::member("OrgA");
    let org_b = CallerIdentity::member("OrgB");

    assets.create(&org_a, "k1", blue("alice")).await.unwrap();
    assets.delete(&org_a, "k1").await.unwrap();

    let history = assets.history(&org_a, "k1").await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[1].is_delete());

    assert!(assets
        .history(&org_b, "k1")
        .await
        .unwrap_err()
        .is_access_denied());
}

#[tokio::test]
async fn sqlite_backend_passes_the_core_flow() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(dir.path().join("ledger.db")).unwrap();
    let assets: EntityService<_, AssetEntity> = EntityService::new(store);

    let org_a = CallerIdentity::member("OrgA");
    let org_b = CallerIdentity::member("OrgB");

    assets.create(&org_a, "k1", blue("alice")).await.unwrap();
    assert!(assets
        .update(&org_b, "k1", blue("mallory"))
        .await
        .unwrap_err()
        .is_access_denied());
    assets.update(&org_a, "k1", blue("bob")).await.unwrap();

    let history = assets.history(&org_a, "k1").await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].snapshot().unwrap().updated_by.as_str(), "OrgA");
}
