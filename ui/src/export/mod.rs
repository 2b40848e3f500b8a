//! Report export: snapshot the insight panel, rasterize it and page it into
//! an A4 PDF.

pub mod download;
pub mod panel;
pub mod pdf;
pub mod raster;
pub mod snapshot;

use thiserror::Error;

pub use download::Delivery;
pub use panel::ReportExportButton;
pub use snapshot::{report_svg, ReportModel};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExportError {
    #[error("could not build the report snapshot: {0}")]
    Snapshot(String),
    #[error("could not rasterize the report: {0}")]
    Raster(String),
    #[error("could not assemble the PDF: {0}")]
    Pdf(String),
    #[error("could not deliver the file: {0}")]
    Delivery(String),
    #[error("export is not supported in this environment")]
    Unsupported,
}

/// Render, page and deliver one report.
pub async fn export_report(model: ReportModel, filename: &str) -> Result<Delivery, ExportError> {
    let doc = report_svg(&model);
    tracing::debug!(
        sections = model.sections.len(),
        height = doc.height,
        "report snapshot ready"
    );
    let raster = raster::rasterize(doc, raster::RASTER_SCALE).await?;
    let bytes = pdf::build_pdf(&raster)?;
    download::deliver_bytes(filename, "application/pdf", bytes).await
}
