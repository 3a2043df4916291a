//! Row normalizer: turns a decoded worksheet into the typed row model.
//!
//! Coercion is lenient by design: a malformed cell keeps its original text
//! (dates) or is simply not coerced (numbers). A single bad cell must never
//! abort loading the remaining rows.

use calamine::{Data, DataType, Range};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

use crate::facets::extract_facets;
use crate::sheet::{columns, Cell, Dataset, Row};

/// Shape pre-checks for textual conclusion dates. The shapes are mutually
/// exclusive; only the matching pattern is ever attempted, `d/m/Y` first.
static DMY_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("valid regex"));
static YMD_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").expect("valid regex"));

/// Parses a number from text, tolerating thousands separators
/// (`"1,234.50"` -> `1234.5`). Returns `None` for blank or non-numeric text.
pub fn parse_lenient_number(s: &str) -> Option<f64> {
    let cleaned = s.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a textual date in one of exactly two accepted shapes, tried in
/// priority order: `d/m/Y`, then `Y-m-d`. A shape match with an invalid
/// calendar date (e.g. `31/02/2024`) returns `None`, as does any other text.
pub fn parse_lenient_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if DMY_SHAPE.is_match(s) {
        NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
    } else if YMD_SHAPE.is_match(s) {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    } else {
        None
    }
}

/// ISO date/datetime formats accepted for DateTimeIso cells; tried in order.
const ISO_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for fmt in ISO_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_hms_opt(0, 0, 0).expect("midnight"))
}

/// Maps a raw worksheet cell to the pipeline's cell model. Blank cells become
/// empty text so every row has every column.
fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::empty(),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => match data.as_datetime() {
            Some(naive) => Cell::Date(naive),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => match data.as_datetime().or_else(|| parse_iso_datetime(s)) {
            Some(naive) => Cell::Date(naive),
            None => Cell::Text(s.clone()),
        },
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}

/// Intake values feed a numeric range filter: text is parsed leniently and
/// date cells collapse to their epoch-millisecond timestamp so both kinds
/// compare on the same axis. Text that fails to parse is kept unchanged.
fn normalize_intake(cell: Cell) -> Cell {
    match cell {
        Cell::Text(s) => match parse_lenient_number(&s) {
            Some(n) => Cell::Number(n),
            None => Cell::Text(s),
        },
        Cell::Date(dt) => Cell::Number(dt.and_utc().timestamp_millis() as f64),
        other => other,
    }
}

/// Conclusion dates are display-only: textual values go through the two-shape
/// parse, anything unparseable keeps the original text silently.
fn normalize_conclusion_date(cell: Cell) -> Cell {
    match cell {
        Cell::Text(s) => match parse_lenient_date(&s) {
            Some(d) => Cell::Date(d.and_hms_opt(0, 0, 0).expect("midnight")),
            None => Cell::Text(s),
        },
        other => other,
    }
}

fn normalize_row(headers: &[String], raw: &[Data]) -> Row {
    let mut row = Row::default();
    for (idx, name) in headers.iter().enumerate() {
        let cell = raw.get(idx).map(cell_from_data).unwrap_or_default();
        match name.as_str() {
            columns::ROW_STATUS => row.row_status = cell.display(),
            columns::ORDER_STATUS => row.order_status = cell.display(),
            columns::INTAKE_SEQUENCE => row.intake_sequence = normalize_intake(cell),
            columns::CONCLUSION_DATE => row.conclusion_date = normalize_conclusion_date(cell),
            columns::ORDER_COST => row.order_cost = cell,
            columns::RELEASE_QUANTITY => row.release_quantity = cell,
            _ => row.extra.push((name.clone(), cell)),
        }
    }
    row
}

/// Normalizes a decoded worksheet into a [`Dataset`]: the first row supplies
/// the column names (blank headers get a `column_{i}` placeholder), the rest
/// become data rows. A sheet with no data rows yields an empty column list
/// and no rows, which is a valid dataset, not an error.
///
/// No I/O happens here; the sheet is already in memory.
pub fn normalize_sheet(sheet: &Range<Data>) -> Dataset {
    let mut raw_rows = sheet.rows();
    let headers: Vec<String> = match raw_rows.next() {
        Some(header_row) => header_row
            .iter()
            .enumerate()
            .map(|(idx, c)| {
                let name = calamine::DataType::as_string(c).unwrap_or_else(|| c.to_string());
                if name.trim().is_empty() {
                    format!("column_{}", idx + 1)
                } else {
                    name
                }
            })
            .collect(),
        None => Vec::new(),
    };

    let rows: Vec<Row> = raw_rows.map(|raw| normalize_row(&headers, raw)).collect();

    // The column list mirrors the keys of the first data record, so a
    // header-only sheet has no columns.
    let columns = if rows.is_empty() { Vec::new() } else { headers };
    let facets = extract_facets(&rows);
    Dataset {
        columns,
        rows,
        facets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn sheet(cells: &[&[Data]]) -> Range<Data> {
        let height = cells.len().max(1) as u32;
        let width = cells.iter().map(|r| r.len()).max().unwrap_or(1).max(1) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn lenient_number_strips_thousands_separators() {
        assert_eq!(parse_lenient_number("1,234.50"), Some(1234.5));
        assert_eq!(parse_lenient_number("  42 "), Some(42.0));
        assert_eq!(parse_lenient_number("12,345,678"), Some(12_345_678.0));
        assert_eq!(parse_lenient_number(""), None);
        assert_eq!(parse_lenient_number("abc"), None);
        assert_eq!(parse_lenient_number("12abc"), None);
    }

    #[test]
    fn lenient_date_accepts_both_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(parse_lenient_date("31/01/2024"), Some(expected));
        assert_eq!(parse_lenient_date("2024-01-31"), Some(expected));
        // single-digit day and month
        assert_eq!(
            parse_lenient_date("1/2/2024"),
            NaiveDate::from_ymd_opt(2024, 2, 1)
        );
        assert_eq!(
            parse_lenient_date("2024-2-1"),
            NaiveDate::from_ymd_opt(2024, 2, 1)
        );
    }

    #[test]
    fn lenient_date_rejects_bad_input() {
        assert_eq!(parse_lenient_date("not-a-date"), None);
        // shape matches but the calendar date is invalid
        assert_eq!(parse_lenient_date("31/02/2024"), None);
        // wrong shapes never reach the parser
        assert_eq!(parse_lenient_date("2024/01/31"), None);
        assert_eq!(parse_lenient_date("31-01-2024"), None);
    }

    #[test]
    fn header_only_sheet_is_a_valid_empty_dataset() {
        let dataset = normalize_sheet(&sheet(&[&[text("Row Status"), text("Order Cost")]]));
        assert!(dataset.columns.is_empty());
        assert!(dataset.rows.is_empty());
        assert!(dataset.is_empty());
        assert!(dataset.facets.row_statuses.is_empty());
    }

    #[test]
    fn columns_follow_header_order_with_placeholders() {
        let dataset = normalize_sheet(&sheet(&[
            &[text("Importer"), Data::Empty, text("Order Cost")],
            &[text("Acme"), text("x"), Data::Float(10.0)],
        ]));
        assert_eq!(dataset.columns, ["Importer", "column_2", "Order Cost"]);
    }

    #[test]
    fn intake_text_parses_to_number_or_stays_text() {
        let dataset = normalize_sheet(&sheet(&[
            &[text("Intake Sequence")],
            &[text("1,234.50")],
            &[text("pending")],
            &[Data::Float(77.0)],
        ]));
        assert_eq!(dataset.rows[0].intake_sequence, Cell::Number(1234.5));
        assert_eq!(dataset.rows[1].intake_sequence, Cell::Text("pending".into()));
        assert_eq!(dataset.rows[2].intake_sequence, Cell::Number(77.0));
    }

    #[test]
    fn intake_date_cells_become_epoch_millis() {
        let dataset = normalize_sheet(&sheet(&[
            &[text("Intake Sequence")],
            &[Data::DateTimeIso("2024-01-31T00:00:00".into())],
        ]));
        let expected = NaiveDate::from_ymd_opt(2024, 1, 31)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis() as f64;
        assert_eq!(dataset.rows[0].intake_sequence, Cell::Number(expected));
    }

    #[test]
    fn conclusion_date_parses_or_keeps_original_text() {
        let dataset = normalize_sheet(&sheet(&[
            &[text("Conclusion Date")],
            &[text("31/01/2024")],
            &[text("2024-01-31")],
            &[text("not-a-date")],
            &[text("31/02/2024")],
        ]));
        for row in &dataset.rows[..2] {
            match &row.conclusion_date {
                Cell::Date(dt) => {
                    assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 1, 31));
                }
                other => panic!("expected date, got {:?}", other),
            }
        }
        assert_eq!(
            dataset.rows[2].conclusion_date,
            Cell::Text("not-a-date".into())
        );
        assert_eq!(
            dataset.rows[3].conclusion_date,
            Cell::Text("31/02/2024".into())
        );
    }

    #[test]
    fn blank_cells_default_to_empty_text_in_every_column() {
        let dataset = normalize_sheet(&sheet(&[
            &[text("Row Status"), text("Importer")],
            &[text("Open")], // second cell missing entirely
        ]));
        let row = &dataset.rows[0];
        assert_eq!(row.row_status, "Open");
        assert_eq!(row.get("Importer"), Some(Cell::empty()));
    }

    #[test]
    fn unknown_columns_pass_through_in_order() {
        let dataset = normalize_sheet(&sheet(&[
            &[text("Importer"), text("Lab"), text("Row Status")],
            &[text("Acme"), text("North"), text("Open")],
        ]));
        let row = &dataset.rows[0];
        assert_eq!(
            row.extra,
            vec![
                ("Importer".to_string(), Cell::Text("Acme".into())),
                ("Lab".to_string(), Cell::Text("North".into())),
            ]
        );
        assert_eq!(row.row_status, "Open");
    }
}
