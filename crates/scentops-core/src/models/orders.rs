use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment lifecycle of an order, owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Refunded,
    Cancelled,
}

impl OrderStatus {
    /// The three-way label used in exports and tables: anything that is not
    /// paid or pending renders as "Cancelled".
    #[must_use]
    pub fn payment_label(self) -> &'static str {
        match self {
            OrderStatus::Paid => "Paid",
            OrderStatus::Pending => "Pending",
            OrderStatus::Refunded | OrderStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub variant_id: String,
    pub quantity: u32,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

/// The account that placed the order, when it was not a guest checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderUser {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Contact details captured for guest checkouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "orderCode")]
    pub order_code: i64,
    pub status: OrderStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub user: Option<OrderUser>,
    /// Present instead of `user` for guest checkouts.
    #[serde(default)]
    pub not_user_info: Option<GuestInfo>,
    #[serde(default)]
    pub coupon_code: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub coupon_value: Option<Decimal>,
    #[serde(rename = "transactionDateTime", default)]
    pub transaction_date_time: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Customer display name: account name, falling back to guest info.
    #[must_use]
    pub fn customer_name(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.name.as_deref())
            .or_else(|| self.not_user_info.as_ref().map(|g| g.name.as_str()))
            .unwrap_or("")
    }

    /// Customer email: account email, falling back to guest info.
    #[must_use]
    pub fn customer_email(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.email.as_deref())
            .or_else(|| self.not_user_info.as_ref().map(|g| g.email.as_str()))
            .unwrap_or("")
    }
}

/// A registered storefront account, as listed on the customers page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub receive_offers: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub orders: Option<u32>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_spent: Option<Decimal>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
