use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponStatus {
    Active,
    Expired,
    Used,
}

/// Whether `discount_value` is a percentage or a flat amount in đồng.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percent,
    Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    #[serde(rename = "_id")]
    pub id: String,
    pub code: String,
    pub status: CouponStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_value: Decimal,
    pub discount_type: DiscountType,
    pub expiry_date: DateTime<Utc>,
    #[serde(default)]
    pub usage_count: u32,
    #[serde(default)]
    pub max_usage_count: Option<u32>,
    /// Restricts the coupon to one customer when set.
    #[serde(default)]
    pub assigned_to_email: Option<String>,
}
