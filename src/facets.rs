//! Facet extraction: the distinct categorical values and numeric bounds the
//! filter controls are built from. Computed once per loaded dataset and
//! frozen; filtering never narrows the facets.

use std::collections::HashSet;

use crate::sheet::Row;

/// Range shown by the intake controls when no row has a numeric intake value.
pub const DEFAULT_INTAKE_MIN: f64 = 0.0;
pub const DEFAULT_INTAKE_MAX: f64 = 100_000.0;

/// Derived filter metadata for a dataset. Status lists are distinct non-empty
/// values in first-occurrence order; the intake bounds cover only rows whose
/// intake value is numeric.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Facets {
    pub row_statuses: Vec<String>,
    pub order_statuses: Vec<String>,
    pub intake_min: Option<f64>,
    pub intake_max: Option<f64>,
}

impl Facets {
    /// Numeric bounds for the range control, falling back to the documented
    /// default when the dataset has no numeric intake values.
    pub fn intake_range_or_default(&self) -> (f64, f64) {
        match (self.intake_min, self.intake_max) {
            (Some(lo), Some(hi)) => (lo, hi),
            _ => (DEFAULT_INTAKE_MIN, DEFAULT_INTAKE_MAX),
        }
    }
}

/// Scans the (unfiltered) row set once and derives its facets. Non-numeric
/// intake values are excluded from the bounds, never treated as zero.
pub fn extract_facets(rows: &[Row]) -> Facets {
    let mut facets = Facets::default();
    let mut seen_row_status = HashSet::new();
    let mut seen_order_status = HashSet::new();

    for row in rows {
        if !row.row_status.is_empty() && seen_row_status.insert(row.row_status.clone()) {
            facets.row_statuses.push(row.row_status.clone());
        }
        if !row.order_status.is_empty() && seen_order_status.insert(row.order_status.clone()) {
            facets.order_statuses.push(row.order_status.clone());
        }
        if let Some(value) = row.intake_sequence.as_number() {
            facets.intake_min = Some(facets.intake_min.map_or(value, |m| m.min(value)));
            facets.intake_max = Some(facets.intake_max.map_or(value, |m| m.max(value)));
        }
    }

    facets
}
