//! Record store
//!
//! Records live in ordered in-memory collections seeded from fixtures.
//! Services only see the [`Repository`] trait, so a durable backend can
//! replace [`InMemoryRepository`] without touching them.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    CalculationInputs, Cost, Farm, FieldOperation, Harvest, Improvement, Machinery, Safra,
};

mod fixtures;

pub use fixtures::Fixtures;

/// A record addressable by a string id
pub trait Record: Clone + Send + Sync + 'static {
    /// Prefix of generated ids, e.g. `safra` in `safra-<uuid>`
    const PREFIX: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

macro_rules! impl_record {
    ($ty:ty, $prefix:literal) => {
        impl Record for $ty {
            const PREFIX: &'static str = $prefix;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        }
    };
}

impl_record!(Farm, "farm");
impl_record!(Safra, "safra");
impl_record!(FieldOperation, "operation");
impl_record!(Cost, "cost");
impl_record!(Harvest, "harvest");
impl_record!(Machinery, "machinery");
impl_record!(Improvement, "improvement");

/// Generate a fresh id for a record type
pub fn generate_id<T: Record>() -> String {
    format!("{}-{}", T::PREFIX, Uuid::new_v4())
}

/// Storage contract for one record collection.
///
/// Collections are ordered: `list` returns records in insertion order and
/// `upsert` of an existing id keeps the record's position.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    async fn get(&self, id: &str) -> Option<T>;

    async fn list(&self) -> Vec<T>;

    /// Replace the record with the same id, or append it
    async fn upsert(&self, record: T) -> T;

    /// Replace the record with the same id; `None` when no such record exists
    async fn update(&self, record: T) -> Option<T>;

    /// Remove the record with `id`; false when nothing matched
    async fn delete(&self, id: &str) -> bool;

    /// Assign a generated id and append
    async fn insert(&self, mut record: T) -> T {
        record.set_id(generate_id::<T>());
        self.upsert(record).await
    }

    async fn count(&self) -> usize {
        self.list().await.len()
    }
}

/// Vec-backed repository guarded by an async RwLock
pub struct InMemoryRepository<T> {
    records: RwLock<Vec<T>>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Repository<T> for InMemoryRepository<T> {
    async fn get(&self, id: &str) -> Option<T> {
        let records = self.records.read().await;
        records.iter().find(|r| r.id() == id).cloned()
    }

    async fn list(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    async fn upsert(&self, record: T) -> T {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        record
    }

    async fn update(&self, record: T) -> Option<T> {
        let mut records = self.records.write().await;
        let existing = records.iter_mut().find(|r| r.id() == record.id())?;
        *existing = record.clone();
        Some(record)
    }

    async fn delete(&self, id: &str) -> bool {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id() != id);
        records.len() != before
    }

    async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

/// Record counts per collection
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecordCounts {
    pub farms: usize,
    pub safras: usize,
    pub operations: usize,
    pub costs: usize,
    pub harvests: usize,
    pub machinery: usize,
    pub improvements: usize,
}

/// All record collections of the application
pub struct Store {
    pub farms: Arc<dyn Repository<Farm>>,
    pub safras: Arc<dyn Repository<Safra>>,
    pub operations: Arc<dyn Repository<FieldOperation>>,
    pub costs: Arc<dyn Repository<Cost>>,
    pub harvests: Arc<dyn Repository<Harvest>>,
    pub machinery: Arc<dyn Repository<Machinery>>,
    pub improvements: Arc<dyn Repository<Improvement>>,
}

impl Store {
    /// Empty in-memory store
    pub fn new() -> Self {
        Self::from_fixtures(Fixtures::default())
    }

    /// In-memory store seeded with the given records
    pub fn from_fixtures(fixtures: Fixtures) -> Self {
        Self {
            farms: Arc::new(InMemoryRepository::with_records(fixtures.farms)),
            safras: Arc::new(InMemoryRepository::with_records(fixtures.safras)),
            operations: Arc::new(InMemoryRepository::with_records(fixtures.operations)),
            costs: Arc::new(InMemoryRepository::with_records(fixtures.costs)),
            harvests: Arc::new(InMemoryRepository::with_records(fixtures.harvests)),
            machinery: Arc::new(InMemoryRepository::with_records(fixtures.machinery)),
            improvements: Arc::new(InMemoryRepository::with_records(fixtures.improvements)),
        }
    }

    /// Copy of every collection the indicator calculator reads
    pub async fn snapshot(&self) -> CalculationInputs {
        let (safras, operations, costs, harvests) = tokio::join!(
            self.safras.list(),
            self.operations.list(),
            self.costs.list(),
            self.harvests.list(),
        );
        CalculationInputs {
            safras,
            operations,
            costs,
            harvests,
        }
    }

    pub async fn counts(&self) -> RecordCounts {
        RecordCounts {
            farms: self.farms.count().await,
            safras: self.safras.count().await,
            operations: self.operations.count().await,
            costs: self.costs.count().await,
            harvests: self.harvests.count().await,
            machinery: self.machinery.count().await,
            improvements: self.improvements.count().await,
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn farm(id: &str, name: &str) -> Farm {
        Farm {
            id: id.to_string(),
            name: name.to_string(),
            location: "Anitápolis, SC".to_string(),
            producer_name: None,
            coordinates: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_appends_unknown_id() {
        let repo: InMemoryRepository<Farm> = InMemoryRepository::new();
        repo.upsert(farm("a", "A")).await;
        repo.upsert(farm("b", "B")).await;

        let ids: Vec<String> = repo.list().await.into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_upsert_replaces_in_place() {
        let repo = InMemoryRepository::with_records(vec![
            farm("a", "A"),
            farm("b", "B"),
            farm("c", "C"),
        ]);
        repo.upsert(farm("b", "Renamed")).await;

        let farms = repo.list().await;
        assert_eq!(farms.len(), 3);
        assert_eq!(farms[1].id, "b");
        assert_eq!(farms[1].name, "Renamed");
    }

    #[tokio::test]
    async fn test_update_never_resurrects_deleted_record() {
        let repo = InMemoryRepository::with_records(vec![farm("a", "A"), farm("b", "B")]);
        assert_eq!(
            repo.update(farm("b", "Renamed")).await.map(|f| f.name),
            Some("Renamed".to_string())
        );

        assert!(repo.delete("a").await);
        assert!(repo.update(farm("a", "Stale")).await.is_none());
        assert!(repo.get("a").await.is_none());
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_delete_removes_only_matching_id() {
        let repo = InMemoryRepository::with_records(vec![farm("a", "A"), farm("b", "B")]);
        assert!(repo.delete("a").await);
        assert!(!repo.delete("a").await);
        assert!(repo.get("a").await.is_none());
        assert!(repo.get("b").await.is_some());
    }

    #[tokio::test]
    async fn test_insert_generates_prefixed_id() {
        let repo: InMemoryRepository<Farm> = InMemoryRepository::new();
        let stored = repo.insert(farm("", "Nova")).await;
        assert!(stored.id.starts_with("farm-"));
        assert_eq!(repo.get(&stored.id).await, Some(stored));
    }

    #[test]
    fn test_empty_store_counts() {
        let counts = tokio_test::block_on(Store::new().counts());
        assert_eq!(counts.safras, 0);
        assert_eq!(counts.improvements, 0);
    }

    #[tokio::test]
    async fn test_snapshot_and_counts_from_demo_fixtures() {
        let store = Store::from_fixtures(Fixtures::demo());
        let counts = store.counts().await;
        assert_eq!(counts.farms, 2);
        assert_eq!(counts.safras, 3);
        assert_eq!(counts.costs, 4);

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.safras.len(), 3);
        assert_eq!(snapshot.operations.len(), 3);
        assert_eq!(snapshot.harvests[0].quantity, Decimal::from(4500));
    }
}
