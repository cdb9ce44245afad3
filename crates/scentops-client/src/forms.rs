//! Typed working copies submitted by the admin forms.
//!
//! These are the client-side counterparts of the backend entities: drafts
//! for creation flows and patch-shaped structs whose serialized form feeds
//! the changed-fields differ for edit flows.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use scentops_core::models::LocalizedText;
use scentops_core::CoreError;

use crate::client::FileUpload;

/// A variant as entered in the product form, before it exists backend-side.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantDraft {
    pub fragrance: String,
    pub stock: i64,
    pub price: Decimal,
    pub discounted_price: Option<Decimal>,
    pub discounted_from: Option<DateTime<Utc>>,
    pub discounted_to: Option<DateTime<Utc>>,
    pub images: Vec<FileUpload>,
}

impl VariantDraft {
    /// Rejects a discounted price without a complete window, before any
    /// network call is made.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IncompleteDiscountWindow`] naming the fragrance.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.discounted_price.is_some()
            && (self.discounted_from.is_none() || self.discounted_to.is_none())
        {
            return Err(CoreError::IncompleteDiscountWindow {
                fragrance: self.fragrance.clone(),
            });
        }
        Ok(())
    }
}

/// Partial update for an existing variant; only the present fields travel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantPatch {
    pub id: String,
    pub fragrance: Option<String>,
    pub stock: Option<i64>,
    pub price: Option<Decimal>,
    pub discounted_price: Option<Decimal>,
    pub discounted_from: Option<DateTime<Utc>>,
    pub discounted_to: Option<DateTime<Utc>>,
    pub images: Vec<FileUpload>,
}

/// A variant row of the edit form: the full working copy, with the image
/// files currently attached to the row.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantEdit {
    /// Backend id; edit rows always carry one.
    pub id: String,
    pub fragrance: String,
    pub stock: i64,
    pub price: Decimal,
    pub discounted_price: Option<Decimal>,
    pub discounted_from: Option<DateTime<Utc>>,
    pub discounted_to: Option<DateTime<Utc>>,
    pub images: Vec<FileUpload>,
}

impl VariantEdit {
    /// The serializable shape the differ compares: scalar fields plus image
    /// file names.
    #[must_use]
    pub fn snapshot(&self) -> VariantSnapshot {
        VariantSnapshot {
            id: Some(self.id.clone()),
            fragrance: self.fragrance.clone(),
            stock: self.stock,
            price: self.price,
            discounted_price: self.discounted_price,
            discounted_from: self.discounted_from,
            discounted_to: self.discounted_to,
            images: self.images.iter().map(|f| f.file_name.clone()).collect(),
        }
    }

    /// The full-copy patch the update endpoint sends.
    #[must_use]
    pub fn to_patch(&self) -> VariantPatch {
        VariantPatch {
            id: self.id.clone(),
            fragrance: Some(self.fragrance.clone()),
            stock: Some(self.stock),
            price: Some(self.price),
            discounted_price: self.discounted_price,
            discounted_from: self.discounted_from,
            discounted_to: self.discounted_to,
            images: self.images.clone(),
        }
    }
}

/// Serializable snapshot of a variant working copy, used on both sides of
/// the changed-fields diff.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSnapshot {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub fragrance: String,
    pub stock: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discounted_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_to: Option<DateTime<Utc>>,
    pub images: Vec<String>,
}

impl From<&scentops_core::models::Variant> for VariantSnapshot {
    fn from(variant: &scentops_core::models::Variant) -> Self {
        Self {
            id: variant.id.clone(),
            fragrance: variant.fragrance.clone(),
            stock: variant.stock,
            price: variant.price,
            discounted_price: variant.discounted_price,
            discounted_from: variant.discounted_from,
            discounted_to: variant.discounted_to,
            images: variant.images.iter().map(|url| file_name_from_url(url)).collect(),
        }
    }
}

/// The last path segment of a stored asset URL, which is how uploaded file
/// names round-trip through the backend.
#[must_use]
pub fn file_name_from_url(url: &str) -> String {
    url.rsplit('/').next().unwrap_or(url).to_string()
}

/// Product-level fields of the add/edit form, shaped to match what the
/// backend stores so the differ compares like against like.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductFields {
    pub name: LocalizedText,
    pub description: LocalizedText,
    /// Category id, not the populated category object.
    pub category: String,
    pub status: String,
    /// File names only; the files themselves travel in the video sub-flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<String>>,
}

impl ProductFields {
    /// The loaded product's fields in the same shape the form submits, so
    /// the differ compares like against like. Video URLs reduce to their
    /// file names.
    #[must_use]
    pub fn from_product(product: &scentops_core::models::Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.id.clone(),
            status: product.status.clone(),
            videos: product
                .videos
                .as_ref()
                .map(|urls| urls.iter().map(|url| file_name_from_url(url)).collect()),
        }
    }
}

/// Everything the edit form submits for an existing product.
#[derive(Debug, Clone)]
pub struct ProductEditForm {
    pub fields: ProductFields,
    pub variants: Vec<VariantEdit>,
    /// Current video file list; an empty list means "remove all videos".
    pub videos: Vec<FileUpload>,
}

/// Everything the add form submits for a brand-new product.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub category: String,
    pub status: String,
    pub images: Vec<FileUpload>,
    pub variants: Vec<VariantDraft>,
    pub videos: Vec<FileUpload>,
}

/// Create/update payload for a category drawer.
#[derive(Debug, Clone)]
pub struct CategoryUpload {
    /// Present for updates, absent for creates.
    pub id: Option<String>,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub status: String,
    pub image: Option<FileUpload>,
}

/// Create/update payload for a banner drawer.
#[derive(Debug, Clone)]
pub struct BannerUpload {
    pub id: Option<String>,
    pub name: String,
    pub status: String,
    pub order: Option<i32>,
    pub image: Option<FileUpload>,
}

/// Create/update payload for a slogan drawer.
#[derive(Debug, Clone, Serialize)]
pub struct SloganUpload {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: LocalizedText,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

/// Create payload for a coupon drawer.
#[derive(Debug, Clone, Serialize)]
pub struct CouponUpload {
    pub code: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_value: Decimal,
    pub discount_type: scentops_core::models::DiscountType,
    pub expiry_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_usage_count: Option<u32>,
}
