//! Filter engine: a composable multi-predicate filter over normalized rows.
//!
//! A row is kept only when it satisfies every active predicate (strict AND
//! across categories); within a categorical predicate, membership is OR. The
//! default spec is the identity and passes every row.

use crate::sheet::Row;

/// The full filter state: free-text query, accepted status sets (empty set =
/// no constraint), and an inclusive numeric range on the intake sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSpec {
    pub query: String,
    pub row_statuses: Vec<String>,
    pub order_statuses: Vec<String>,
    pub intake_from: Option<f64>,
    pub intake_to: Option<f64>,
}

/// A partial change to a [`FilterSpec`]; unset fields leave the current value
/// alone. The bound fields are doubly optional so an update can also clear a
/// bound (`Some(None)`).
#[derive(Clone, Debug, Default)]
pub struct FilterUpdate {
    pub query: Option<String>,
    pub row_statuses: Option<Vec<String>>,
    pub order_statuses: Option<Vec<String>>,
    pub intake_from: Option<Option<f64>>,
    pub intake_to: Option<Option<f64>>,
}

impl FilterSpec {
    /// True for the identity filter that passes every row.
    pub fn is_default(&self) -> bool {
        *self == FilterSpec::default()
    }

    /// Merges a partial update field by field.
    pub fn apply(&mut self, update: FilterUpdate) {
        if let Some(query) = update.query {
            self.query = query;
        }
        if let Some(row_statuses) = update.row_statuses {
            self.row_statuses = row_statuses;
        }
        if let Some(order_statuses) = update.order_statuses {
            self.order_statuses = order_statuses;
        }
        if let Some(intake_from) = update.intake_from {
            self.intake_from = intake_from;
        }
        if let Some(intake_to) = update.intake_to {
            self.intake_to = intake_to;
        }
    }

    /// Whether the row satisfies all active predicates. Predicate categories
    /// combine by strict AND in every path; the free-text and range checks
    /// never short-circuit each other.
    pub fn matches(&self, row: &Row) -> bool {
        if !self.row_statuses.is_empty()
            && (row.row_status.is_empty() || !self.row_statuses.contains(&row.row_status))
        {
            return false;
        }

        if !self.order_statuses.is_empty()
            && (row.order_status.is_empty() || !self.order_statuses.contains(&row.order_status))
        {
            return false;
        }

        if self.intake_from.is_some() || self.intake_to.is_some() {
            let Some(value) = row.intake_sequence.as_number() else {
                return false;
            };
            if self.intake_from.is_some_and(|from| value < from) {
                return false;
            }
            if self.intake_to.is_some_and(|to| value > to) {
                return false;
            }
        }

        if !self.query.is_empty() && !matches_query(row, &self.query.to_lowercase()) {
            return false;
        }

        true
    }
}

/// Case-insensitive substring search across every field's display string
/// (dates render in the default display format). `needle` must already be
/// lowercased.
fn matches_query(row: &Row, needle: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(needle);
    if contains(&row.row_status) || contains(&row.order_status) {
        return true;
    }
    let typed = [
        &row.intake_sequence,
        &row.conclusion_date,
        &row.order_cost,
        &row.release_quantity,
    ];
    if typed.iter().any(|cell| contains(&cell.display())) {
        return true;
    }
    row.extra.iter().any(|(_, cell)| contains(&cell.display()))
}

/// Rows passing the spec, in their original order. Pure; recomputed wholesale
/// on every call (O(rows x columns), fine at spreadsheet scale).
pub fn filter_rows<'a>(rows: &'a [Row], spec: &FilterSpec) -> Vec<&'a Row> {
    rows.iter().filter(|row| spec.matches(row)).collect()
}
