//! Cost records and insert-time validation.

use crate::core::currency::Currency;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Calendar date a cost was recorded on, stamped by the store at insert
/// time. Never supplied or edited by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl From<NaiveDate> for RecordedDate {
    fn from(date: NaiveDate) -> Self {
        RecordedDate {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

/// A cost as entered by the user, before the store assigns identity and a
/// recorded date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostDraft {
    pub amount: f64,
    pub currency: Currency,
    pub category: String,
    pub description: String,
}

impl CostDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount);
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        Ok(())
    }
}

/// A stored cost. Records are created exactly once and never mutated or
/// deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    pub id: u64,
    pub amount: f64,
    pub currency: Currency,
    pub category: String,
    pub description: String,
    pub recorded_date: RecordedDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("amount must be a positive number")]
    NonPositiveAmount,
    #[error("category must not be empty")]
    EmptyCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(amount: f64, category: &str) -> CostDraft {
        CostDraft {
            amount,
            currency: Currency::Usd,
            category: category.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(draft(12.5, "Food").validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_amounts() {
        assert_eq!(
            draft(0.0, "Food").validate(),
            Err(ValidationError::NonPositiveAmount)
        );
        assert_eq!(
            draft(-3.0, "Food").validate(),
            Err(ValidationError::NonPositiveAmount)
        );
        assert_eq!(
            draft(f64::NAN, "Food").validate(),
            Err(ValidationError::NonPositiveAmount)
        );
        assert_eq!(
            draft(f64::INFINITY, "Food").validate(),
            Err(ValidationError::NonPositiveAmount)
        );
    }

    #[test]
    fn test_rejects_blank_category() {
        assert_eq!(
            draft(1.0, "").validate(),
            Err(ValidationError::EmptyCategory)
        );
        assert_eq!(
            draft(1.0, "   ").validate(),
            Err(ValidationError::EmptyCategory)
        );
    }

    #[test]
    fn test_recorded_date_from_naive_date() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        assert_eq!(
            RecordedDate::from(date),
            RecordedDate {
                year: 2026,
                month: 8,
                day: 5
            }
        );
    }
}
