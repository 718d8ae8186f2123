use chrono::{DateTime, Duration, TimeZone, Utc};
use domain::{ManualClock, Telemetry};
use fleet_repository::{RepositoryError, Repositories};
use fleet_seed::Seeder;
use fleet_storage::{InMemoryKvStore, KvStore, StorageError};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// 允许前 `budget` 次字段写入成功，之后写入失败，直到 `heal`。
struct FlakyStore {
    inner: InMemoryKvStore,
    failing: AtomicBool,
    writes_left: AtomicUsize,
}

impl FlakyStore {
    fn failing_after(budget: usize) -> Self {
        Self {
            inner: InMemoryKvStore::new(),
            failing: AtomicBool::new(true),
            writes_left: AtomicUsize::new(budget),
        }
    }

    fn heal(&self) {
        self.failing.store(false, Ordering::SeqCst);
    }

    fn check_write(&self) -> Result<(), StorageError> {
        if !self.failing.load(Ordering::SeqCst) {
            return Ok(());
        }
        match self.writes_left.load(Ordering::SeqCst) {
            0 => Err(StorageError::new("connection reset by peer")),
            left => {
                self.writes_left.store(left - 1, Ordering::SeqCst);
                Ok(())
            }
        }
    }
}

#[async_trait::async_trait]
impl KvStore for FlakyStore {
    async fn ping(&self) -> Result<(), StorageError> {
        self.inner.ping().await
    }

    async fn get(&self, key: &str, field: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key, field).await
    }

    async fn set(&self, key: &str, field: &str, value: &str) -> Result<(), StorageError> {
        self.check_write()?;
        self.inner.set(key, field, value).await
    }

    async fn increment(&self, counter: &str) -> Result<i64, StorageError> {
        self.inner.increment(counter).await
    }

    async fn add_to_set(&self, set: &str, member: &str) -> Result<(), StorageError> {
        self.inner.add_to_set(set, member).await
    }

    async fn remove_from_set(&self, set: &str, member: &str) -> Result<(), StorageError> {
        self.inner.remove_from_set(set, member).await
    }

    async fn set_members(&self, set: &str) -> Result<Vec<String>, StorageError> {
        self.inner.set_members(set).await
    }

    async fn set_cardinality(&self, set: &str) -> Result<u64, StorageError> {
        self.inner.set_cardinality(set).await
    }

    async fn list_push_front(&self, list: &str, value: &str) -> Result<(), StorageError> {
        self.inner.list_push_front(list, value).await
    }

    async fn list_range(
        &self,
        list: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<String>, StorageError> {
        self.inner.list_range(list, start, stop).await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        self.inner.exists(key).await
    }
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn seeder_over(store: Arc<dyn KvStore>, clock: Arc<ManualClock>) -> (Repositories, Seeder) {
    let repositories = Repositories::new(store.clone(), clock.clone());
    let seeder = Seeder::new(store, repositories.clone(), clock, 42);
    (repositories, seeder)
}

/// 读数去掉 ID 后的内容，用于比较两次装载。
fn readings(history: &[Telemetry]) -> Vec<(DateTime<Utc>, f64, f64, f64, f64)> {
    history
        .iter()
        .map(|item| {
            (
                item.timestamp,
                item.battery_level,
                item.temperature,
                item.cpu_usage,
                item.memory_usage,
            )
        })
        .collect()
}

#[tokio::test]
async fn failed_seed_is_finished_on_next_run() {
    let store = Arc::new(FlakyStore::failing_after(3));
    let clock = Arc::new(ManualClock::new(start()));
    let (repositories, seeder) = seeder_over(store.clone(), clock.clone());

    // started_at、第一台设备记录与其进度写入成功，第二台设备记录写入失败
    let err = seeder.run().await.expect_err("seed should fail");
    assert!(matches!(err, RepositoryError::Store(_)));
    assert!(!store.exists("fleet:seeded").await.expect("marker"));
    assert!(store.exists("fleet:seeding").await.expect("progress"));
    assert_eq!(repositories.devices.count().await.expect("count"), 1);

    store.heal();
    clock.advance(Duration::hours(3));
    let report = seeder.run().await.expect("resume");
    assert!(report.seeded);
    assert!(report.resumed);
    assert_eq!(report.devices, 5);
    assert_eq!(report.telemetry, 6 * 72);
    assert_eq!(report.alerts, 2);

    let devices = repositories.devices.list_all().await.expect("devices");
    let names: Vec<&str> = devices.iter().map(|device| device.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Temperature Sensor 01",
            "Pressure Monitor 02",
            "Flow Meter 03",
            "Vibration Sensor 04",
            "Level Indicator 05",
            "Smart Gateway 06",
        ]
    );
    // 失败的那次自增留下空号
    assert_eq!(devices[1].id, 3);
    assert_eq!(devices[0].registered_at, start() - Duration::hours(72));

    let alerts = repositories.alerts.list_all(50).await.expect("alerts");
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[1].device_id, devices[2].id);
    assert_eq!(alerts[0].device_id, devices[5].id);

    assert!(store.exists("fleet:seeded").await.expect("marker"));
    assert!(!store.exists("fleet:seeding").await.expect("progress"));
    assert!(!seeder.run().await.expect("third run").seeded);
}

#[tokio::test]
async fn interrupted_backfill_continues_without_duplicates() {
    // started_at + 6 台设备（记录 + 进度）+ 第一台设备的 30 条读数
    let store = Arc::new(FlakyStore::failing_after(1 + 6 * 2 + 30));
    let clock = Arc::new(ManualClock::new(start()));
    let (repositories, seeder) = seeder_over(store.clone(), clock.clone());

    seeder.run().await.expect_err("seed should fail");
    let partial = repositories
        .telemetry
        .list_by_device(1, 100)
        .await
        .expect("partial");
    assert_eq!(partial.len(), 30);

    store.heal();
    clock.advance(Duration::minutes(45));
    let report = seeder.run().await.expect("resume");
    assert_eq!(report.devices, 0);
    assert_eq!(report.telemetry, 6 * 72 - 30);

    let history = repositories
        .telemetry
        .list_by_device(1, 100)
        .await
        .expect("history");
    assert_eq!(history.len(), 72);
    assert_eq!(history[0].timestamp, start());
    assert!(
        history
            .windows(2)
            .all(|pair| pair[0].timestamp > pair[1].timestamp)
    );

    let clean_store = Arc::new(InMemoryKvStore::new());
    let (clean, clean_seeder) =
        seeder_over(clean_store, Arc::new(ManualClock::new(start())));
    clean_seeder.run().await.expect("clean seed");
    let expected = clean
        .telemetry
        .list_by_device(1, 100)
        .await
        .expect("clean history");
    assert_eq!(readings(&history), readings(&expected));
}

#[tokio::test]
async fn store_error_is_returned_not_swallowed() {
    let store = Arc::new(FlakyStore::failing_after(0));
    let clock = Arc::new(ManualClock::new(start()));
    let (repositories, seeder) = seeder_over(store.clone(), clock);

    let err = seeder.run().await.expect_err("seed should fail");
    assert!(matches!(err, RepositoryError::Store(_)));
    assert_eq!(repositories.devices.count().await.expect("count"), 0);
    assert!(!store.exists("fleet:seeded").await.expect("marker"));
}
