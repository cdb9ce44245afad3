use thiserror::Error;

/// Errors from workbook serialization or the file write.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("workbook serialization error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}
