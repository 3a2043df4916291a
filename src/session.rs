//! Dataset session: owns the currently loaded dataset and the filter spec,
//! and derives filtered rows and statistics on demand.
//!
//! Derived values are pull-based: recomputed from the current dataset and
//! spec at call time, never cached or maintained incrementally. All state is
//! owned here and mutated only through these entry points.

use calamine::{Data, Range};
use color_eyre::Result;
use std::path::Path;

use crate::filter::{filter_rows, FilterSpec, FilterUpdate};
use crate::normalize::normalize_sheet;
use crate::sheet::{Dataset, Row};
use crate::source;
use crate::statistics::{summarize, SummaryStats};

/// Orchestrator for one viewing session: at most one dataset at a time plus
/// the current filter specification.
#[derive(Debug, Default)]
pub struct Session {
    dataset: Option<Dataset>,
    filter: FilterSpec,
}

impl Session {
    /// A session with no dataset and the identity filter.
    pub fn new() -> Self {
        Session::default()
    }

    /// Installs an already-decoded sheet as the current dataset, replacing
    /// any previous one wholesale (no merge). The filter spec is deliberately
    /// left untouched; [`Session::clear_filter`] is the only reset path.
    pub fn load_sheet(&mut self, sheet: &Range<Data>) -> &Dataset {
        self.dataset.insert(normalize_sheet(sheet))
    }

    /// Loads the first worksheet of the file at `path`. On any error the
    /// previously loaded dataset is left in place.
    pub fn load_path(&mut self, path: &Path) -> Result<&Dataset> {
        let sheet = source::read_sheet(path)?;
        Ok(self.load_sheet(&sheet))
    }

    /// Loads from an in-memory byte buffer plus its originating filename
    /// (as handed over by a file-acquisition UI). Atomic like [`load_path`].
    ///
    /// [`load_path`]: Session::load_path
    pub fn load_bytes(&mut self, bytes: &[u8], filename: &str) -> Result<&Dataset> {
        let sheet = source::read_sheet_from_bytes(bytes, filename)?;
        Ok(self.load_sheet(&sheet))
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    /// Merges a partial filter change into the current spec.
    pub fn update_filter(&mut self, update: FilterUpdate) {
        self.filter.apply(update);
    }

    /// Resets the filter spec to its defaults (the identity filter).
    pub fn clear_filter(&mut self) {
        self.filter = FilterSpec::default();
    }

    /// Rows passing the current filter, recomputed from the current dataset
    /// and spec on every call. Empty when no dataset is loaded.
    pub fn filtered_rows(&self) -> Vec<&Row> {
        match &self.dataset {
            Some(dataset) => filter_rows(&dataset.rows, &self.filter),
            None => Vec::new(),
        }
    }

    /// Summary statistics over the currently filtered rows.
    pub fn stats(&self) -> SummaryStats {
        summarize(self.filtered_rows())
    }
}
