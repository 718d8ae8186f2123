use chrono::{Duration, TimeZone, Utc};
use domain::{AlertSeverity, Clock, DeviceStatus, ManualClock, NewDevice};
use fleet_repository::Repositories;
use fleet_seed::{SeedReport, Seeder};
use fleet_storage::{InMemoryKvStore, KvStore};
use std::sync::Arc;

struct Fixture {
    store: Arc<InMemoryKvStore>,
    clock: Arc<ManualClock>,
    repositories: Repositories,
    seeder: Seeder,
}

fn fixture() -> Fixture {
    let store = Arc::new(InMemoryKvStore::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    ));
    let repositories = Repositories::new(store.clone(), clock.clone());
    let seeder = Seeder::new(store.clone(), repositories.clone(), clock.clone(), 42);
    Fixture {
        store,
        clock,
        repositories,
        seeder,
    }
}

#[tokio::test]
async fn seeds_catalog_on_empty_store() {
    let fx = fixture();
    let report = fx.seeder.run().await.expect("seed");
    assert_eq!(
        report,
        SeedReport {
            seeded: true,
            resumed: false,
            devices: 6,
            telemetry: 6 * 72,
            alerts: 2,
        }
    );

    let devices = fx.repositories.devices.list_all().await.expect("devices");
    let ids: Vec<i64> = devices.iter().map(|device| device.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(devices[0].name, "Temperature Sensor 01");
    assert_eq!(devices[2].status, DeviceStatus::Warning);
    assert_eq!(
        devices[0].registered_at,
        fx.clock.now() - Duration::hours(72)
    );

    let alerts = fx.repositories.alerts.list_all(50).await.expect("alerts");
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].device_id, 6);
    assert_eq!(alerts[0].severity, AlertSeverity::Critical);
    assert_eq!(alerts[1].device_id, 3);
    assert!(alerts.iter().all(|alert| !alert.acknowledged));
    assert!(fx.store.exists("fleet:seeded").await.expect("marker"));
}

#[tokio::test]
async fn device_history_ends_newest_first_with_bounded_values() {
    let fx = fixture();
    fx.seeder.run().await.expect("seed");

    let history = fx
        .repositories
        .telemetry
        .list_by_device(1, 100)
        .await
        .expect("history");
    assert_eq!(history.len(), 72);
    assert_eq!(history[0].timestamp, fx.clock.now());
    assert_eq!(
        history[71].timestamp,
        fx.clock.now() - Duration::minutes(5 * 71)
    );
    assert!(
        history
            .windows(2)
            .all(|pair| pair[0].timestamp > pair[1].timestamp)
    );

    for item in &history {
        assert!((20.0..=90.0).contains(&item.battery_level));
        assert!((15.0..=40.0).contains(&item.temperature));
        assert!((10.0..=90.0).contains(&item.cpu_usage));
        assert!((1024.0..=7168.0).contains(&item.memory_usage));
        assert_eq!(item.memory_total, 8192.0);
    }

    let latest = fx.repositories.telemetry.latest(1).await.expect("latest");
    assert_eq!(latest.as_ref(), history.first());
}

#[tokio::test]
async fn second_run_is_a_no_op() {
    let fx = fixture();
    fx.seeder.run().await.expect("seed");
    let report = fx.seeder.run().await.expect("seed again");
    assert!(!report.seeded);
    assert_eq!(fx.repositories.devices.count().await.expect("count"), 6);
}

#[tokio::test]
async fn store_with_existing_data_is_left_alone() {
    let fx = fixture();
    fx.repositories
        .devices
        .create(NewDevice {
            name: "Existing".to_string(),
            device_type: "sensor".to_string(),
            location: "Lab".to_string(),
            status: DeviceStatus::Online,
        })
        .await
        .expect("device");

    let report = fx.seeder.run().await.expect("seed");
    assert!(!report.seeded);
    assert_eq!(fx.repositories.devices.count().await.expect("count"), 1);
    assert!(fx.store.exists("fleet:seeded").await.expect("marker"));
}

#[tokio::test]
async fn same_rng_seed_gives_same_readings() {
    let first = fixture();
    let second = fixture();
    first.seeder.run().await.expect("seed");
    second.seeder.run().await.expect("seed");

    let a = first.repositories.telemetry.list_all(10).await.expect("a");
    let b = second.repositories.telemetry.list_all(10).await.expect("b");
    assert_eq!(a, b);
}
