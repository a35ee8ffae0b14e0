//! Persistence for cost records and settings.

pub mod disk;
pub mod memory;
pub mod settings;

use crate::core::cost::{CostDraft, CostRecord};
use anyhow::Result;
use async_trait::async_trait;

pub use settings::{Settings, SettingsStore};

/// Append-only collection of cost records.
///
/// `insert` validates the draft, stamps today's date and assigns the next
/// id; records are never updated or deleted afterwards. `list_all` makes no
/// ordering guarantee, callers re-sort as needed.
#[async_trait]
pub trait CostStore: Send + Sync {
    async fn insert(&self, draft: CostDraft) -> Result<CostRecord>;
    async fn list_all(&self) -> Result<Vec<CostRecord>>;
}
