//! fjall-backed disk persistence.
//!
//! A single keyspace holds one partition per collection. Cost records are
//! keyed by their big-endian id so the partition iterates in insertion
//! order and the id counter can be recovered from the last key on open.

use crate::core::cost::{CostDraft, CostRecord};
use crate::store::CostStore;
use crate::store::settings::{SETTINGS_KEY, Settings, SettingsStore, decode_settings};
use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

const COSTS_PARTITION: &str = "costs";
const SETTINGS_PARTITION: &str = "settings";

/// Owns the keyspace. Opened once at startup; the per-collection stores it
/// hands out share the underlying database.
pub struct DiskStore {
    keyspace: Keyspace,
}

impl DiskStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = fjall::Config::new(path)
            .open()
            .with_context(|| format!("Failed to open data store at {}", path.display()))?;
        debug!("Opened data store at {}", path.display());

        Ok(DiskStore { keyspace })
    }

    pub fn costs(&self) -> Result<DiskCostStore> {
        let partition = self
            .keyspace
            .open_partition(COSTS_PARTITION, PartitionCreateOptions::default())?;
        DiskCostStore::new(partition)
    }

    pub fn settings(&self) -> Result<DiskSettingsStore> {
        let partition = self
            .keyspace
            .open_partition(SETTINGS_PARTITION, PartitionCreateOptions::default())?;
        Ok(DiskSettingsStore { partition })
    }
}

pub struct DiskCostStore {
    partition: PartitionHandle,
    next_id: AtomicU64,
}

impl DiskCostStore {
    fn new(partition: PartitionHandle) -> Result<Self> {
        let last_id = match partition.iter().next_back() {
            Some(item) => {
                let (key, _) = item?;
                decode_id(&key)?
            }
            None => 0,
        };

        Ok(DiskCostStore {
            partition,
            next_id: AtomicU64::new(last_id),
        })
    }
}

fn encode_id(id: u64) -> [u8; 8] {
    id.to_be_bytes()
}

fn decode_id(bytes: &[u8]) -> Result<u64> {
    let raw: [u8; 8] = bytes.try_into().context("Malformed cost record key")?;
    Ok(u64::from_be_bytes(raw))
}

#[async_trait]
impl CostStore for DiskCostStore {
    async fn insert(&self, draft: CostDraft) -> Result<CostRecord> {
        draft.validate()?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = CostRecord {
            id,
            amount: draft.amount,
            currency: draft.currency,
            category: draft.category,
            description: draft.description,
            recorded_date: chrono::Local::now().date_naive().into(),
        };

        self.partition
            .insert(encode_id(id), serde_json::to_vec(&record)?)?;
        debug!("Stored cost record #{id}");

        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<CostRecord>> {
        let mut records = Vec::new();
        for item in self.partition.iter() {
            let (_key, value) = item?;
            records.push(serde_json::from_slice(&value)?);
        }
        Ok(records)
    }
}

pub struct DiskSettingsStore {
    partition: PartitionHandle,
}

#[async_trait]
impl SettingsStore for DiskSettingsStore {
    async fn load(&self) -> Settings {
        match self.partition.get(SETTINGS_KEY) {
            Ok(bytes) => decode_settings(bytes.as_deref()),
            Err(e) => {
                debug!("Settings read failed, using defaults: {}", e);
                Settings::default()
            }
        }
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        self.partition
            .insert(SETTINGS_KEY, serde_json::to_vec(settings)?)?;
        debug!("Saved settings");
        Ok(())
    }

    async fn reset(&self) -> Result<Settings> {
        let defaults = Settings::default();
        self.save(&defaults).await?;
        Ok(defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::Currency;
    use tempfile::tempdir;

    fn draft(amount: f64, category: &str) -> CostDraft {
        CostDraft {
            amount,
            currency: Currency::Usd,
            category: category.to_string(),
            description: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_incrementing_ids_and_todays_date() {
        let dir = tempdir().unwrap();
        let store = DiskStore::open(dir.path()).unwrap();
        let costs = store.costs().unwrap();

        let first = costs.insert(draft(10.0, "Food")).await.unwrap();
        let second = costs.insert(draft(20.0, "Rent")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let today = chrono::Local::now().date_naive();
        assert_eq!(first.recorded_date, today.into());
    }

    #[tokio::test]
    async fn test_list_all_returns_every_stored_record() {
        let dir = tempdir().unwrap();
        let store = DiskStore::open(dir.path()).unwrap();
        let costs = store.costs().unwrap();

        costs.insert(draft(10.0, "Food")).await.unwrap();
        costs.insert(draft(20.0, "Rent")).await.unwrap();

        let records = costs.list_all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].category, "Food");
        assert_eq!(records[1].category, "Rent");
    }

    #[tokio::test]
    async fn test_id_counter_recovers_after_reopen() {
        let dir = tempdir().unwrap();

        {
            let store = DiskStore::open(dir.path()).unwrap();
            let costs = store.costs().unwrap();
            costs.insert(draft(1.0, "Food")).await.unwrap();
            costs.insert(draft(2.0, "Food")).await.unwrap();
        }

        let store = DiskStore::open(dir.path()).unwrap();
        let costs = store.costs().unwrap();
        let third = costs.insert(draft(3.0, "Food")).await.unwrap();

        assert_eq!(third.id, 3);
        assert_eq!(costs.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_draft_is_rejected_and_not_stored() {
        let dir = tempdir().unwrap();
        let store = DiskStore::open(dir.path()).unwrap();
        let costs = store.costs().unwrap();

        assert!(costs.insert(draft(-5.0, "Food")).await.is_err());
        assert!(costs.insert(draft(5.0, "")).await.is_err());
        assert!(costs.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_settings_default_save_load_reset() {
        let dir = tempdir().unwrap();
        let store = DiskStore::open(dir.path()).unwrap();
        let settings_store = store.settings().unwrap();

        assert_eq!(settings_store.load().await, Settings::default());

        let custom = Settings {
            base_currency: Currency::Ils,
            rate_source_url: "http://example.com/rates.json".to_string(),
        };
        settings_store.save(&custom).await.unwrap();
        assert_eq!(settings_store.load().await, custom);

        let after_reset = settings_store.reset().await.unwrap();
        assert_eq!(after_reset, Settings::default());
        assert_eq!(settings_store.load().await, Settings::default());
    }
}
