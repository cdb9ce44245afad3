use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OrderStatus;

/// A donation record; shares the payment status vocabulary with orders but
/// only ever shows up as paid or cancelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "orderCode")]
    pub order_code: i64,
    pub status: OrderStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "transactionDateTime", default)]
    pub transaction_date_time: Option<DateTime<Utc>>,
}
