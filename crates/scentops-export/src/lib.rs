//! Spreadsheet export for the orders and donations tables.
//!
//! Pure row builders shape domain records into fixed-column rows; the
//! workbook writer serializes them to an xlsx binary. Serialization failures
//! surface as [`ExportError`] instead of being dropped.

pub mod error;
pub mod rows;
pub mod workbook;

pub use error::ExportError;
pub use rows::{donation_rows, order_rows, DonationRow, OrderRow};
pub use workbook::{
    donations_workbook, orders_workbook, save_donations, save_orders, DONATIONS_FILE_NAME,
    ORDERS_FILE_NAME, XLSX_MIME,
};
