use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::Config;
use crate::engine::errors::ConvertError;
use crate::models::{plan_documents, Grouping};
use crate::output::{DirectoryOutput, DocumentSink};
use crate::reader::CsvReader;
use crate::render::{PdfRenderer, Template};

/// A rendered document waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub name: String,
    pub bytes: Vec<u8>
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub records: usize,
    pub documents: Vec<String>,
    pub written: usize
}

/// Batch converter from a Swish CSV export to PDF files.
///
/// A run is all-or-nothing: every row is validated and every document rendered
/// in memory before the output directory is touched.
pub struct Converter {
    input: PathBuf,
    output_dir: PathBuf,
    reader: CsvReader,
    template: Template,
    grouping: Grouping,
    dry_run: bool
}

impl Converter {
    pub fn new(config: &Config) -> Self {
        Self {
            input: config.input.clone(),
            output_dir: config.output_dir.clone(),
            reader: CsvReader::new(config.delimiter),
            template: config.template.clone(),
            grouping: config.grouping,
            dry_run: config.dry_run
        }
    }

    /// Reads, validates and renders the input without writing anything.
    pub fn prepare(&self) -> Result<(usize, Vec<RenderedDocument>), ConvertError> {
        let input = self.input.as_path();
        let records = self.reader.read_path(input)?;
        let record_count = records.len();
        let plans = plan_documents(records, self.grouping)?;

        let source_name = input.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());

        let renderer = PdfRenderer::new(self.template.clone(), source_name);
        let mut documents = Vec::with_capacity(plans.len());

        for plan in &plans {
            let name = plan.file_name();
            let bytes = renderer.render(plan).map_err(|error| ConvertError::render(&name, error))?;

            documents.push(RenderedDocument { name, bytes });
        }

        debug!("Prepared {} documents from {record_count} records", documents.len());

        Ok((record_count, documents))
    }

    /// Stages every document in `sink` and commits them together.
    pub fn write<S: DocumentSink + ?Sized>(documents: &[RenderedDocument], sink: &mut S) -> Result<usize, ConvertError> {
        for document in documents {
            sink.stage(&document.name, &document.bytes)?;
        }

        Ok(sink.commit()?)
    }

    /// Converts the input into PDF files under the output directory.
    pub fn run(&self) -> Result<Summary, ConvertError> {
        let (records, documents) = self.prepare()?;

        let written = if self.dry_run {
            info!("Dry run: {} documents not written", documents.len());
            0
        } else {
            let mut output = DirectoryOutput::create(&self.output_dir)?;
            Self::write(&documents, &mut output)?
        };

        Ok(Summary {
            records,
            documents: documents.into_iter().map(|document| document.name).collect(),
            written
        })
    }
}
