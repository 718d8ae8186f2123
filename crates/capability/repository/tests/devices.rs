use chrono::{Duration, TimeZone, Utc};
use domain::{DeviceStatus, DeviceUpdate, ManualClock, NewDevice};
use fleet_repository::{DeviceRepository, RepositoryError};
use fleet_storage::{InMemoryKvStore, KvStore};
use std::sync::Arc;

fn setup() -> (Arc<InMemoryKvStore>, Arc<ManualClock>, DeviceRepository) {
    let store = Arc::new(InMemoryKvStore::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    ));
    let repo = DeviceRepository::new(store.clone(), clock.clone());
    (store, clock, repo)
}

fn sensor(name: &str) -> NewDevice {
    NewDevice {
        name: name.to_string(),
        device_type: "Sensor".to_string(),
        location: "Lab".to_string(),
        status: DeviceStatus::Online,
    }
}

#[tokio::test]
async fn create_assigns_increasing_ids_and_registration_time() {
    let (_, clock, repo) = setup();
    let first = repo.create(sensor("S1")).await.expect("create");
    clock.advance(Duration::minutes(5));
    let second = repo.create(sensor("S2")).await.expect("create");

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(
        first.registered_at,
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    );
    assert_eq!(second.registered_at - first.registered_at, Duration::minutes(5));

    let fetched = repo.get_by_id(1).await.expect("get");
    assert_eq!(fetched, first);
    assert_eq!(repo.count().await.expect("count"), 2);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let (_, _, repo) = setup();
    repo.create(sensor("S1")).await.expect("create");
    let second = repo.create(sensor("S2")).await.expect("create");
    repo.delete(second.id).await.expect("delete");

    let third = repo.create(sensor("S3")).await.expect("create");
    assert_eq!(third.id, 3);
}

#[tokio::test]
async fn create_rejects_blank_fields() {
    let (store, _, repo) = setup();
    let mut input = sensor("S1");
    input.location = "  ".to_string();

    let err = repo.create(input).await.expect_err("blank location");
    assert!(matches!(err, RepositoryError::Validation(ref msg) if msg == "location required"));
    assert!(!store.exists("devices:next_id").await.expect("exists"));
}

#[tokio::test]
async fn list_all_is_ordered_by_id() {
    let (_, _, repo) = setup();
    for name in ["A", "B", "C", "D"] {
        repo.create(sensor(name)).await.expect("create");
    }
    repo.delete(2).await.expect("delete");

    let names: Vec<String> = repo
        .list_all()
        .await
        .expect("list")
        .into_iter()
        .map(|device| device.name)
        .collect();
    assert_eq!(names, vec!["A", "C", "D"]);
}

#[tokio::test]
async fn update_applies_present_fields_only() {
    let (_, clock, repo) = setup();
    let created = repo.create(sensor("S1")).await.expect("create");
    clock.advance(Duration::hours(1));

    let updated = repo
        .update(
            created.id,
            DeviceUpdate {
                location: Some("Roof".to_string()),
                status: Some(DeviceStatus::Warning),
                ..DeviceUpdate::default()
            },
        )
        .await
        .expect("update");

    assert_eq!(updated.name, "S1");
    assert_eq!(updated.device_type, "Sensor");
    assert_eq!(updated.location, "Roof");
    assert_eq!(updated.status, DeviceStatus::Warning);
    assert_eq!(updated.registered_at, created.registered_at);
    assert_eq!(repo.get_by_id(created.id).await.expect("get"), updated);
}

#[tokio::test]
async fn update_status_and_missing_device() {
    let (_, _, repo) = setup();
    let created = repo.create(sensor("S1")).await.expect("create");
    let updated = repo
        .update_status(created.id, DeviceStatus::Critical)
        .await
        .expect("status");
    assert_eq!(updated.status, DeviceStatus::Critical);

    let err = repo
        .update_status(42, DeviceStatus::Offline)
        .await
        .expect_err("missing");
    assert!(matches!(err, RepositoryError::NotFound(_)));
}

#[tokio::test]
async fn update_rejects_blank_name() {
    let (_, _, repo) = setup();
    let created = repo.create(sensor("S1")).await.expect("create");
    let err = repo
        .update(
            created.id,
            DeviceUpdate {
                name: Some(String::new()),
                ..DeviceUpdate::default()
            },
        )
        .await
        .expect_err("blank name");
    assert!(matches!(err, RepositoryError::Validation(_)));
    assert_eq!(repo.get_by_id(created.id).await.expect("get").name, "S1");
}

#[tokio::test]
async fn delete_is_idempotent() {
    let (store, _, repo) = setup();
    let created = repo.create(sensor("S1")).await.expect("create");
    repo.delete(created.id).await.expect("delete");
    repo.delete(created.id).await.expect("delete again");
    repo.delete(999).await.expect("delete missing");

    assert!(matches!(
        repo.get_by_id(created.id).await,
        Err(RepositoryError::NotFound(_))
    ));
    assert!(!store.exists("devices:1").await.expect("exists"));
    assert_eq!(repo.count().await.expect("count"), 0);
}

#[tokio::test]
async fn corrupt_records_are_skipped_and_reported_missing() {
    let (store, _, repo) = setup();
    repo.create(sensor("S1")).await.expect("create");
    repo.create(sensor("S2")).await.expect("create");
    store
        .set("devices:2", "data", "{not json")
        .await
        .expect("corrupt");
    store.add_to_set("devices:all", "7").await.expect("dangling");

    let devices = repo.list_all().await.expect("list");
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].name, "S1");
    assert!(matches!(
        repo.get_by_id(2).await,
        Err(RepositoryError::NotFound(_))
    ));
}
