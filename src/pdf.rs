//! HTML to PDF conversion via the external `weasyprint` binary.

use std::path::Path;
use std::process::Command;

use crate::error::{InvoiceError, Result};

/// Probe for the converter without running a conversion.
pub fn converter_available() -> bool {
    Command::new("weasyprint").arg("--version").output().is_ok()
}

/// Convert the written HTML artifact into a PDF. A missing converter or a
/// non-zero exit is reported through the error, not a panic.
pub fn convert(html_path: &Path, pdf_path: &Path) -> Result<()> {
    if !converter_available() {
        return Err(InvoiceError::ConverterMissing);
    }

    let output = Command::new("weasyprint").arg(html_path).arg(pdf_path).output()?;
    if !output.status.success() {
        return Err(InvoiceError::ConverterFailed(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }
    Ok(())
}
