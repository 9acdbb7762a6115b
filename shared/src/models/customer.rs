//! Derived per-customer visit summary

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregate over a customer's completed appointments
///
/// Owned by the scheduling core; reporting reads it, never writes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisitSummary {
    pub customer_id: String,
    pub total_visits: u64,
    pub total_spent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_visit: Option<NaiveDate>,
    pub updated_at: i64,
}

impl VisitSummary {
    /// Empty summary for a customer with no completed visits
    pub fn empty(customer_id: impl Into<String>, now: i64) -> Self {
        Self {
            customer_id: customer_id.into(),
            total_visits: 0,
            total_spent: 0.0,
            last_visit: None,
            updated_at: now,
        }
    }
}
