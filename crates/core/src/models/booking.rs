//! Booking model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reservation embedded in its hotel's booking list.
///
/// Has no identity of its own; it is reached only through the parent hotel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub adult_count: u32,
    pub child_count: u32,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub total_cost: f64,
    /// Correlates with the payment processor's transaction
    pub payment_intent_id: String,
    pub last_updated: DateTime<Utc>,
}
