//! Transient, request-scoped representations of backend-owned entities.
//!
//! The backend is the authoritative owner of all persisted state; these types
//! exist so responses deserialize into something richer than `serde_json::Value`
//! and so edit flows have a typed working copy to diff against.

pub mod catalog;
pub mod content;
pub mod coupon;
pub mod donation;
pub mod orders;

pub use catalog::{Category, LocalizedText, Product, Variant};
pub use content::{Banner, Contact, Question, Review, ReviewStatus, Slogan, Subscriber};
pub use coupon::{Coupon, CouponStatus, DiscountType};
pub use donation::Donation;
pub use orders::{Customer, GuestInfo, Order, OrderItem, OrderStatus, OrderUser};
