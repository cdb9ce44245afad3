use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Text carried in both storefront languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub vi: String,
    pub en: String,
}

impl LocalizedText {
    #[must_use]
    pub fn new(vi: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            vi: vi.into(),
            en: en.into(),
        }
    }
}

/// A purchasable configuration of a product: one fragrance with its own
/// stock, price, and optional time-boxed discount.
///
/// Invariant enforced before any create/update call: if `discounted_price` is
/// set, both `discounted_from` and `discounted_to` must be set too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub fragrance: String,
    pub stock: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub discounted_price: Option<Decimal>,
    #[serde(default)]
    pub discounted_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub discounted_to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Variant {
    /// Whether the discount fields form a complete window.
    ///
    /// A variant with no discounted price at all is trivially complete; only
    /// a discounted price missing either bound is invalid.
    #[must_use]
    pub fn discount_window_complete(&self) -> bool {
        self.discounted_price.is_none()
            || (self.discounted_from.is_some() && self.discounted_to.is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: LocalizedText,
    pub slug: LocalizedText,
    pub description: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub status: String,
    /// Ids of the products assigned to this category.
    #[serde(default)]
    pub products: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: LocalizedText,
    pub slug: LocalizedText,
    pub description: LocalizedText,
    #[serde(default)]
    pub images: Vec<String>,
    pub status: String,
    pub category: Category,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<String>>,
}
