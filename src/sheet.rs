//! Row and dataset model: typed cells for the well-known ledger columns plus
//! an open mapping for whatever else the source file carries.

use chrono::NaiveDateTime;

use crate::facets::Facets;
use crate::normalize::parse_lenient_number;

/// Header names of the columns the pipeline gives special typed handling.
/// Any other column passes through untouched.
pub mod columns {
    pub const ROW_STATUS: &str = "Row Status";
    pub const ORDER_STATUS: &str = "Order Status";
    pub const INTAKE_SEQUENCE: &str = "Intake Sequence";
    pub const CONCLUSION_DATE: &str = "Conclusion Date";
    pub const ORDER_COST: &str = "Order Cost";
    pub const RELEASE_QUANTITY: &str = "Release Quantity";
}

/// Format used to render date cells when no display override is configured.
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// A single cell value. Blank and missing source cells normalize to
/// `Text("")`, so every row carries every column.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
}

impl Default for Cell {
    fn default() -> Self {
        Cell::empty()
    }
}

impl Cell {
    /// The blank cell.
    pub fn empty() -> Self {
        Cell::Text(String::new())
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Cell::Text(s) if s.is_empty())
    }

    /// Lenient numeric view: numbers as-is, text through
    /// [`parse_lenient_number`]. Date cells do not coerce; a date never
    /// participates in sums or range comparisons.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => parse_lenient_number(s),
            Cell::Date(_) => None,
        }
    }

    /// Render with the default date format.
    pub fn display(&self) -> String {
        self.display_with(DEFAULT_DATE_FORMAT)
    }

    /// Render for display or text search. Numbers use `f64` formatting
    /// (whole values print without a trailing `.0`), dates use `date_format`.
    pub fn display_with(&self, date_format: &str) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Date(dt) => dt.format(date_format).to_string(),
        }
    }
}

/// One normalized spreadsheet row: the well-known columns as typed fields,
/// everything else in `extra` in source column order. Fields for columns the
/// file does not carry stay at their blank defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    pub row_status: String,
    pub order_status: String,
    pub intake_sequence: Cell,
    pub conclusion_date: Cell,
    pub order_cost: Cell,
    pub release_quantity: Cell,
    pub extra: Vec<(String, Cell)>,
}

impl Row {
    /// Cell for a column by header name. Well-known names resolve to the
    /// typed fields; anything else is looked up in `extra`.
    pub fn get(&self, column: &str) -> Option<Cell> {
        match column {
            columns::ROW_STATUS => Some(Cell::Text(self.row_status.clone())),
            columns::ORDER_STATUS => Some(Cell::Text(self.order_status.clone())),
            columns::INTAKE_SEQUENCE => Some(self.intake_sequence.clone()),
            columns::CONCLUSION_DATE => Some(self.conclusion_date.clone()),
            columns::ORDER_COST => Some(self.order_cost.clone()),
            columns::RELEASE_QUANTITY => Some(self.release_quantity.clone()),
            _ => self
                .extra
                .iter()
                .find(|(name, _)| name == column)
                .map(|(_, cell)| cell.clone()),
        }
    }
}

/// A loaded spreadsheet: rows in source order (the pipeline never reorders;
/// sorting belongs to the presenting UI), the column list in header order,
/// and the facet metadata computed once at load.
///
/// Facets always describe the unfiltered row set, so filter controls can
/// broaden back out no matter what is currently selected.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub facets: Facets,
}

impl Dataset {
    /// True when the file contained no data rows (a valid state; consumers
    /// render an empty-state message rather than failing).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn blank_cell_roundtrip() {
        assert!(Cell::empty().is_blank());
        assert!(!Cell::Text("x".into()).is_blank());
        assert!(!Cell::Number(0.0).is_blank());
        assert_eq!(Cell::default(), Cell::empty());
    }

    #[test]
    fn number_display_drops_trailing_zero() {
        assert_eq!(Cell::Number(5.0).display(), "5");
        assert_eq!(Cell::Number(1234.5).display(), "1234.5");
    }

    #[test]
    fn date_display_uses_format() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 31)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(Cell::Date(dt).display(), "31/01/2024");
        assert_eq!(Cell::Date(dt).display_with("%Y-%m-%d"), "2024-01-31");
    }

    #[test]
    fn as_number_coercion() {
        assert_eq!(Cell::Number(7.5).as_number(), Some(7.5));
        assert_eq!(Cell::Text("1,234.50".into()).as_number(), Some(1234.5));
        assert_eq!(Cell::Text("n/a".into()).as_number(), None);
        let dt = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(Cell::Date(dt).as_number(), None);
    }

    #[test]
    fn row_get_resolves_well_known_and_extra() {
        let row = Row {
            row_status: "Open".into(),
            extra: vec![("Importer".into(), Cell::Text("Acme".into()))],
            ..Row::default()
        };
        assert_eq!(
            row.get(columns::ROW_STATUS),
            Some(Cell::Text("Open".into()))
        );
        assert_eq!(row.get("Importer"), Some(Cell::Text("Acme".into())));
        assert_eq!(row.get("Missing"), None);
        // a well-known column the file never carried reads back blank
        assert_eq!(row.get(columns::ORDER_COST), Some(Cell::empty()));
    }
}
