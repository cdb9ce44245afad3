//! Discount window evaluation for variants.
//!
//! The reference instant is always an explicit parameter. Callers pass
//! `Utc::now()` at the point of use so a long-running process keeps observing
//! discount windows opening and closing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::Variant;

/// Whether the variant's discount is active at `now`.
///
/// Requires all three discount fields to be present; a variant with a
/// discounted price but a missing window bound is never discounted. The
/// window is inclusive at both ends, compared at millisecond precision.
#[must_use]
pub fn is_discounted(variant: &Variant, now: DateTime<Utc>) -> bool {
    let (Some(_), Some(from), Some(to)) = (
        variant.discounted_price,
        variant.discounted_from,
        variant.discounted_to,
    ) else {
        return false;
    };

    let now_ms = now.timestamp_millis();
    from.timestamp_millis() <= now_ms && now_ms <= to.timestamp_millis()
}

/// The price to charge for the variant at `now`: the discounted price while
/// the window is active, the base price otherwise.
#[must_use]
pub fn effective_price(variant: &Variant, now: DateTime<Utc>) -> Decimal {
    if is_discounted(variant, now) {
        // is_discounted only returns true when discounted_price is present.
        variant.discounted_price.unwrap_or(variant.price)
    } else {
        variant.price
    }
}
