use serde::{Serialize, Serializer};
use tracing::debug;

use crate::domain::{Entry, EntryId, Ledger, RejectedInput, SnapshotRow, format_fixed2};
use crate::io::ReportFormat;

use super::AppError;

/// One interactive sheet: the ledger plus the text currently typed into the
/// input field. This is the primary interface for any front end.
pub struct Session {
    ledger: Ledger,
    input: String,
}

/// A rendered report ready to be handed to a file-save collaborator.
pub struct RenderedReport {
    pub format: ReportFormat,
    pub bytes: Vec<u8>,
    pub entry_count: usize,
}

/// Listing row: display position, entry id and value.
#[derive(Debug, Clone, Serialize)]
pub struct ListingRow {
    pub display_index: usize,
    pub id: EntryId,
    pub value: f64,
}

/// Everything a front end needs to draw the sheet.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub entries: Vec<ListingRow>,
    #[serde(serialize_with = "serialize_total")]
    pub total: f64,
}

/// JSON has no infinity, so an overflowed total is written the way the text
/// listing prints it.
fn serialize_total<S: Serializer>(total: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if total.is_finite() {
        serializer.serialize_f64(*total)
    } else {
        serializer.serialize_str(&format_fixed2(*total))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Ledger::seeded())
    }
}

impl Session {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger,
            input: String::new(),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Text currently held by the input field.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Add the input field's contents as an entry.
    /// On success the field is cleared; on rejection it keeps its text.
    pub fn submit(&mut self) -> Result<EntryId, AppError> {
        match self.ledger.add(&self.input) {
            Ok(id) => {
                self.input.clear();
                Ok(id)
            }
            Err(RejectedInput::Empty) => {
                debug!("empty input ignored");
                Err(RejectedInput::Empty.into())
            }
            Err(err) => {
                debug!(input = %self.input, "input rejected: {}", err);
                Err(err.into())
            }
        }
    }

    /// Type `text` into the input field and submit it.
    pub fn add(&mut self, text: impl Into<String>) -> Result<EntryId, AppError> {
        self.set_input(text);
        self.submit()
    }

    /// Delete an entry. Unknown ids are not an error.
    pub fn delete(&mut self, id: EntryId) -> Option<Entry> {
        let removed = self.ledger.remove(id);
        if removed.is_none() {
            debug!(id, "delete ignored, no such entry");
        }
        removed
    }

    pub fn total(&self) -> f64 {
        self.ledger.total()
    }

    pub fn snapshot(&self) -> Vec<SnapshotRow> {
        self.ledger.snapshot()
    }

    pub fn listing(&self) -> Listing {
        let entries = self
            .ledger
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| ListingRow {
                display_index: index + 1,
                id: entry.id,
                value: entry.value,
            })
            .collect();

        Listing {
            entries,
            total: self.ledger.total(),
        }
    }

    /// Render the current sheet in the given format.
    pub fn export(&self, format: ReportFormat) -> Result<RenderedReport, AppError> {
        let rows = self.ledger.snapshot();
        let bytes = format.render(&rows, self.ledger.total())?;
        debug!(format = %format, bytes = bytes.len(), "report rendered");

        Ok(RenderedReport {
            format,
            bytes,
            entry_count: rows.len(),
        })
    }
}
