//! Donation listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: i64,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub currency_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor_display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donation_date: Option<DateTime<Utc>>,
    /// Caller-supplied reference used for `donations/ref/{reference}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donation_ref: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page_number: u32,
    #[serde(default)]
    pub page_size_requested: u32,
    #[serde(default)]
    pub page_size_returned: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FundraisingPageDonations {
    #[serde(default)]
    pub page_short_name: String,
    #[serde(default)]
    pub donations: Vec<Donation>,
    #[serde(default)]
    pub pagination: Pagination,
}
