//! sheetview: a UI-agnostic pipeline for viewing order-ledger spreadsheets.
//!
//! The flow is: decode the first worksheet ([`source`]), normalize it into a
//! typed row model ([`normalize`], [`sheet`]), derive filter facets
//! ([`facets`]), apply a composable multi-predicate filter ([`filter`]), and
//! compute summary statistics ([`statistics`]). A [`Session`] orchestrates
//! the pieces: it owns the current dataset and filter spec and recomputes the
//! derived rows and stats whenever asked.
//!
//! Rendering, sorting, and file-picker chrome are collaborator concerns: they
//! feed the session a file (or filter changes) and read back rows, facets,
//! and stats.

pub mod cli;
pub mod config;
pub mod facets;
pub mod filter;
pub mod normalize;
pub mod session;
pub mod sheet;
pub mod source;
pub mod statistics;

pub use cli::Args;
pub use config::{AppConfig, ConfigManager, DisplayConfig, FilterConfig};
pub use facets::{extract_facets, Facets, DEFAULT_INTAKE_MAX, DEFAULT_INTAKE_MIN};
pub use filter::{filter_rows, FilterSpec, FilterUpdate};
pub use normalize::{normalize_sheet, parse_lenient_date, parse_lenient_number};
pub use session::Session;
pub use sheet::{columns, Cell, Dataset, Row, DEFAULT_DATE_FORMAT};
pub use source::{is_supported, read_sheet, read_sheet_from_bytes, SUPPORTED_EXTENSIONS};
pub use statistics::{summarize, SummaryStats};

/// Application name used for the config directory and other app-specific paths
pub const APP_NAME: &str = "sheetview";
