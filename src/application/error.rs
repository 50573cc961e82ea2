use thiserror::Error;

use crate::domain::RejectedInput;
use crate::io::ExportError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Input ignored: {0}")]
    Rejected(#[from] RejectedInput),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Invalid entry id: {0}")]
    InvalidId(String),

    #[error("Invalid report format: {0}")]
    InvalidFormat(String),

    #[error("Missing argument for '{0}'")]
    MissingArgument(String),
}
