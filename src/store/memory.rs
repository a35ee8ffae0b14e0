//! In-memory store backends, used by tests and anywhere persistence is not
//! wanted.

use crate::core::cost::{CostDraft, CostRecord};
use crate::store::CostStore;
use crate::store::settings::{Settings, SettingsStore};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct MemoryCostStore {
    records: Mutex<Vec<CostRecord>>,
    next_id: AtomicU64,
}

impl MemoryCostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a store with prebuilt records, keeping the id counter ahead of
    /// the highest seeded id.
    pub fn with_records(records: Vec<CostRecord>) -> Self {
        let max_id = records.iter().map(|r| r.id).max().unwrap_or(0);
        MemoryCostStore {
            records: Mutex::new(records),
            next_id: AtomicU64::new(max_id),
        }
    }
}

#[async_trait]
impl CostStore for MemoryCostStore {
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

        let mut records = self.records.lock().await;
        records.push(record.clone());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<CostRecord>> {
        Ok(self.records.lock().await.clone())
    }
}

#[derive(Default)]
pub struct MemorySettingsStore {
    current: Mutex<Option<Settings>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Settings {
        self.current.lock().await.clone().unwrap_or_default()
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        *self.current.lock().await = Some(settings.clone());
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
    use crate::core::cost::{RecordedDate, ValidationError};
    use crate::core::currency::Currency;

    fn draft(amount: f64, category: &str) -> CostDraft {
        CostDraft {
            amount,
            currency: Currency::Usd,
            category: category.to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_then_list_round_trip() {
        let store = MemoryCostStore::new();

        let record = store
            .insert(CostDraft {
                amount: 100.0,
                currency: Currency::Usd,
                category: "Food".to_string(),
                description: "lunch".to_string(),
            })
            .await
            .unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], record);
        assert_eq!(all[0].category, "Food");
        assert_eq!(
            all[0].recorded_date,
            chrono::Local::now().date_naive().into()
        );
    }

    #[tokio::test]
    async fn test_validation_error_surfaces_typed() {
        let store = MemoryCostStore::new();
        let err = store.insert(draft(0.0, "Food")).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::NonPositiveAmount)
        );
    }

    #[tokio::test]
    async fn test_seeded_store_keeps_ids_unique() {
        let seeded = CostRecord {
            id: 7,
            amount: 1.0,
            currency: Currency::Usd,
            category: "Food".to_string(),
            description: String::new(),
            recorded_date: RecordedDate {
                year: 2026,
                month: 1,
                day: 1,
            },
        };

        let store = MemoryCostStore::with_records(vec![seeded]);
        let fresh = store.insert(draft(2.0, "Rent")).await.unwrap();
        assert_eq!(fresh.id, 8);
    }

    #[tokio::test]
    async fn test_settings_store_defaults_and_reset() {
        let store = MemorySettingsStore::new();
        assert_eq!(store.load().await, Settings::default());

        let custom = Settings {
            base_currency: Currency::Gbp,
            rate_source_url: "http://example.com".to_string(),
        };
        store.save(&custom).await.unwrap();
        assert_eq!(store.load().await, custom);

        store.reset().await.unwrap();
        assert_eq!(store.load().await, Settings::default());
    }
}
