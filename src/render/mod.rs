mod errors;
mod layout;
mod pdf;
pub mod template;

pub use errors::RenderError;
pub use template::{PageSize, Template};

use tracing::debug;

use crate::models::DocumentPlan;

/// Renders document plans with one fixed template.
pub struct PdfRenderer {
    template: Template,
    source_name: String
}

impl PdfRenderer {
    /// `source_name` is printed in the footer so a receipt can be traced
    /// back to the export it came from.
    pub fn new(template: Template, source_name: impl Into<String>) -> Self {
        Self {
            template,
            source_name: source_name.into()
        }
    }

    pub fn render(&self, plan: &DocumentPlan) -> Result<Vec<u8>, RenderError> {
        let pages = layout::layout(plan, &self.template, &self.source_name)?;
        let title = plan.file_name();
        let bytes = pdf::write_pdf(&pages, self.template.width(), self.template.height(), &title)?;

        debug!("Rendered {title}: {} record(s), {} page(s), {} bytes", plan.records().len(), pages.len(), bytes.len());

        Ok(bytes)
    }
}
