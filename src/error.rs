use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, InvoiceError>;

#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("template not found at {} (run 'metalbill config' to initialize the default)", .0.display())]
    TemplateMissing(PathBuf),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("company directory fetch failed: {0}")]
    SheetFetch(#[from] reqwest::Error),

    #[error("company directory has no '{0}' column")]
    SheetColumnMissing(&'static str),

    #[error("company directory is empty")]
    SheetEmpty,

    #[error("LME percentage {0} is outside the 40.00 - 100.00 range")]
    LmePercentage(Decimal),

    #[error("'weasyprint' is not installed. Please install it (pip install weasyprint).")]
    ConverterMissing,

    #[error("weasyprint failed: {0}")]
    ConverterFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
