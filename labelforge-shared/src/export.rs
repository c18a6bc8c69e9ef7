/// Export of labeled items as CSV or JSON Lines
///
/// An export is one record per (item, label) pair of a project: unlabeled
/// items are absent, an item labeled several times appears once per label.
/// The record text is the `text` key of the item payload.
///
/// # Formats
///
/// - CSV: UTF-8 byte-order mark, `text,label` header, fields quoted only when
///   they contain a comma, quote or line break, CRLF row endings. The BOM
///   makes spreadsheet tools pick UTF-8.
/// - JSONL: one `{"text": ..., "label": ...}` object per line, LF endings,
///   non-ASCII written as is.
///
/// # Example
///
/// ```no_run
/// use labelforge_shared::export::{export_project, ExportFormat};
/// # use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// let csv = export_project(&pool, 1, ExportFormat::Csv).await?;
/// std::fs::write("labels.csv", csv)?;
/// # Ok(())
/// # }
/// ```

use crate::models::label::{Label, LabeledItemRow};
use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use sqlx::SqlitePool;
use std::io;
use tracing::{debug, info};

/// UTF-8 byte-order mark written at the start of every CSV export
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Header row of the CSV export
pub const CSV_HEADER: [&str; 2] = ["text", "label"];

/// Export errors
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Reading the joined rows failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An item payload is not valid JSON
    #[error("Item {item_id} has a malformed payload: {source}")]
    MalformedPayload {
        item_id: i64,
        #[source]
        source: serde_json::Error,
    },

    /// An item payload has no string `text` key
    #[error("Item {item_id} payload has no text field")]
    MissingText { item_id: i64 },

    /// A record could not be serialized
    #[error("Failed to serialize record: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The CSV writer failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Jsonl,
}

impl ExportFormat {
    /// MIME type to serve the export with
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Jsonl => "application/json",
        }
    }

    /// Suggested download filename
    pub fn filename(self) -> &'static str {
        match self {
            ExportFormat::Csv => "labels.csv",
            ExportFormat::Jsonl => "labels.jsonl",
        }
    }
}

/// One exported (text, label) pair
///
/// Field order is the JSONL key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub text: String,
    pub label: String,
}

impl TryFrom<LabeledItemRow> for ExportRecord {
    type Error = ExportError;

    fn try_from(row: LabeledItemRow) -> Result<Self, Self::Error> {
        let payload: serde_json::Value = serde_json::from_str(&row.payload_json).map_err(
            |source| ExportError::MalformedPayload {
                item_id: row.item_id,
                source,
            },
        )?;

        let text = payload
            .get("text")
            .and_then(serde_json::Value::as_str)
            .ok_or(ExportError::MissingText {
                item_id: row.item_id,
            })?;

        Ok(Self {
            text: text.to_string(),
            label: row.label,
        })
    }
}

/// Reads the export records of a project
pub async fn collect_records(
    pool: &SqlitePool,
    project_id: i64,
) -> Result<Vec<ExportRecord>, ExportError> {
    let rows = Label::labeled_items(pool, project_id).await?;
    debug!(project_id, rows = rows.len(), "Read labeled items for export");

    rows.into_iter().map(ExportRecord::try_from).collect()
}

/// Reads and renders the export of a project in one step
pub async fn export_project(
    pool: &SqlitePool,
    project_id: i64,
    format: ExportFormat,
) -> Result<Vec<u8>, ExportError> {
    let records = collect_records(pool, project_id).await?;

    let body = match format {
        ExportFormat::Csv => to_csv(&records)?,
        ExportFormat::Jsonl => to_jsonl(&records)?,
    };

    info!(
        project_id,
        format = ?format,
        records = records.len(),
        bytes = body.len(),
        "Project exported"
    );

    Ok(body)
}

/// Renders records as CSV with BOM and header
pub fn to_csv(records: &[ExportRecord]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::CRLF)
        .from_writer(UTF8_BOM.to_vec());

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record([&record.text, &record.label])?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))
}

/// Renders records as JSON Lines
///
/// Separators are `", "` and `": "`, so each line reads
/// `{"text": "...", "label": "..."}`.
pub fn to_jsonl(records: &[ExportRecord]) -> Result<Vec<u8>, ExportError> {
    let mut out = Vec::new();
    for record in records {
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
        record
            .serialize(&mut serializer)
            .map_err(ExportError::Serialize)?;
        out.push(b'\n');
    }
    Ok(out)
}

/// Compact JSON with a space after every `,` and `:`
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
