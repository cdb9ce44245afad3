//! Flat content records managed from the dashboard: banners, slogans,
//! reviews, and the customer-facing inboxes (subscribers, contacts,
//! questions). No derived invariants beyond what the backend enforces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LocalizedText;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub order: Option<i32>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slogan {
    #[serde(rename = "_id")]
    pub id: String,
    pub content: LocalizedText,
    pub status: String,
    #[serde(default)]
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Published,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: ReviewStatus,
    pub rating: u8,
    pub comment: String,
    /// Name of the reviewed product, for display only.
    #[serde(default)]
    pub product: Option<ReviewProduct>,
    #[serde(default)]
    pub variant: Option<ReviewVariant>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewProduct {
    pub name: LocalizedText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewVariant {
    pub fragrance: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
