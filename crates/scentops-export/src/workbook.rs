//! xlsx serialization of the export rows.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::info;

use crate::error::ExportError;
use crate::rows::{donation_rows, order_rows};
use scentops_core::models::{Donation, Order};

/// MIME type served alongside a generated workbook download.
pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Default file name for the orders export.
pub const ORDERS_FILE_NAME: &str = "orders.xlsx";

/// Default file name for the donations export.
pub const DONATIONS_FILE_NAME: &str = "donations.xlsx";

const ORDER_COLUMNS: &[(&str, f64)] = &[
    ("Order", 20.0),
    ("Date", 30.0),
    ("Customer", 30.0),
    ("Email", 30.0),
    ("Payment", 15.0),
    ("Coupon", 15.0),
    ("Coupon Value", 15.0),
    ("Total Price", 15.0),
];

const DONATION_COLUMNS: &[(&str, f64)] = &[
    ("Code", 20.0),
    ("Status", 15.0),
    ("Donor", 30.0),
    ("Email", 30.0),
    ("Phone", 20.0),
    ("Amount", 15.0),
    ("Comment", 50.0),
    ("Date", 30.0),
    ("Transaction Time", 30.0),
];

fn write_header(
    sheet: &mut Worksheet,
    columns: &[(&str, f64)],
) -> Result<(), XlsxError> {
    let bold = Format::new().set_bold();
    for (col, (title, width)) in columns.iter().enumerate() {
        let col = u16::try_from(col).unwrap_or(u16::MAX);
        sheet.set_column_width(col, *width)?;
        sheet.write_string_with_format(0, col, *title, &bold)?;
    }
    Ok(())
}

fn write_row(sheet: &mut Worksheet, row: u32, cells: &[&str]) -> Result<(), XlsxError> {
    for (col, cell) in cells.iter().enumerate() {
        sheet.write_string(row, u16::try_from(col).unwrap_or(u16::MAX), *cell)?;
    }
    Ok(())
}

/// Builds the orders workbook in memory.
pub fn orders_workbook(orders: &[Order]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Order Data")?;
    write_header(sheet, ORDER_COLUMNS)?;

    for (index, row) in order_rows(orders).iter().enumerate() {
        let cells = [
            row.order.as_str(),
            row.date.as_str(),
            row.customer.as_str(),
            row.email.as_str(),
            row.payment.as_str(),
            row.coupon.as_str(),
            row.coupon_value.as_str(),
            row.total_price.as_str(),
        ];
        write_row(sheet, index as u32 + 1, &cells)?;
    }

    let bytes = workbook.save_to_buffer()?;
    info!(rows = orders.len(), bytes = bytes.len(), "built orders workbook");
    Ok(bytes)
}

/// Builds the donations workbook in memory.
pub fn donations_workbook(donations: &[Donation]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Donation Data")?;
    write_header(sheet, DONATION_COLUMNS)?;

    for (index, row) in donation_rows(donations).iter().enumerate() {
        let cells = [
            row.code.as_str(),
            row.status.as_str(),
            row.donor.as_str(),
            row.email.as_str(),
            row.phone.as_str(),
            row.amount.as_str(),
            row.comment.as_str(),
            row.date.as_str(),
            row.transaction_time.as_str(),
        ];
        write_row(sheet, index as u32 + 1, &cells)?;
    }

    let bytes = workbook.save_to_buffer()?;
    info!(
        rows = donations.len(),
        bytes = bytes.len(),
        "built donations workbook"
    );
    Ok(bytes)
}

/// Writes the orders workbook to `path`.
pub fn save_orders(orders: &[Order], path: &Path) -> Result<(), ExportError> {
    std::fs::write(path, orders_workbook(orders)?)?;
    Ok(())
}

/// Writes the donations workbook to `path`.
pub fn save_donations(donations: &[Donation], path: &Path) -> Result<(), ExportError> {
    std::fs::write(path, donations_workbook(donations)?)?;
    Ok(())
}
