//! Pure row builders for the order and donation exports.
//!
//! Each builder flattens a domain record into the exact column strings the
//! workbook writes, so formatting decisions live here and the writer stays a
//! dumb serializer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use scentops_core::currency::format_vnd;
use scentops_core::models::{Donation, Order, OrderStatus};

/// One spreadsheet row of the orders export, columns in sheet order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub order: String,
    pub date: String,
    pub customer: String,
    pub email: String,
    pub payment: String,
    pub coupon: String,
    pub coupon_value: String,
    pub total_price: String,
}

/// One spreadsheet row of the donations export, columns in sheet order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationRow {
    pub code: String,
    pub status: String,
    pub donor: String,
    pub email: String,
    pub phone: String,
    pub amount: String,
    pub comment: String,
    pub date: String,
    pub transaction_time: String,
}

/// "Wed Jan 15 2025 - 14:30:00", the timestamp shape both exports use.
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%a %b %d %Y - %H:%M:%S").to_string()
}

fn format_amount(amount: Decimal) -> String {
    format_vnd(amount)
}

#[must_use]
pub fn order_rows(orders: &[Order]) -> Vec<OrderRow> {
    orders
        .iter()
        .map(|order| OrderRow {
            order: format!("#{}", order.order_code),
            date: format_timestamp(order.created_at),
            customer: order.customer_name().to_string(),
            email: order.customer_email().to_string(),
            payment: order.status.payment_label().to_string(),
            coupon: order.coupon_code.clone().unwrap_or_default(),
            coupon_value: format_amount(order.coupon_value.unwrap_or_default()),
            total_price: format_amount(order.amount),
        })
        .collect()
}

#[must_use]
pub fn donation_rows(donations: &[Donation]) -> Vec<DonationRow> {
    donations
        .iter()
        .map(|donation| DonationRow {
            code: format!("#{}", donation.order_code),
            status: donation_status_label(donation.status).to_string(),
            donor: donation.name.clone(),
            email: donation.email.clone(),
            phone: donation.phone.clone().unwrap_or_default(),
            amount: format_amount(donation.amount),
            comment: donation
                .comment
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "No comment".to_string()),
            date: format_timestamp(donation.created_at),
            transaction_time: donation
                .transaction_date_time
                .map(format_timestamp)
                .unwrap_or_default(),
        })
        .collect()
}

/// Donations only distinguish paid from everything else.
fn donation_status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Paid => "Paid",
        _ => "Cancelled",
    }
}
