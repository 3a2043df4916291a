//! Command-line definitions for sheetview.

use clap::Parser;
use std::path::PathBuf;

use crate::filter::FilterUpdate;

/// Command-line arguments for sheetview
#[derive(Clone, Parser, Debug)]
#[command(
    name = "sheetview",
    version,
    about = "Load a spreadsheet, filter its rows, and print summary statistics"
)]
pub struct Args {
    /// Path to the spreadsheet file to open (not required with --generate-config)
    #[arg(required_unless_present = "generate_config", value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Keep only rows containing this text (case-insensitive substring,
    /// matched against every column)
    #[arg(long)]
    pub query: Option<String>,

    /// Keep only rows with this row status (repeatable)
    #[arg(long = "row-status", value_name = "STATUS")]
    pub row_status: Vec<String>,

    /// Keep only rows with this order status (repeatable)
    #[arg(long = "order-status", value_name = "STATUS")]
    pub order_status: Vec<String>,

    /// Inclusive lower bound on the intake sequence
    #[arg(long = "intake-from", value_name = "N")]
    pub intake_from: Option<f64>,

    /// Inclusive upper bound on the intake sequence
    #[arg(long = "intake-to", value_name = "N")]
    pub intake_to: Option<f64>,

    /// Print summary statistics only, no rows
    #[arg(long = "stats-only", action)]
    pub stats_only: bool,

    /// Print the dataset's facet values and intake bounds, then exit
    #[arg(long = "facets", action)]
    pub facets: bool,

    /// Print at most this many rows
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Write a default config file and exit
    #[arg(long = "generate-config", action)]
    pub generate_config: bool,
}

impl Args {
    /// The filter changes implied by the flags, ready for
    /// `Session::update_filter`. Flags left unset leave the (default) spec
    /// alone.
    pub fn filter_update(&self) -> FilterUpdate {
        let mut update = FilterUpdate::default();
        if let Some(query) = &self.query {
            update.query = Some(query.clone());
        }
        if !self.row_status.is_empty() {
            update.row_statuses = Some(self.row_status.clone());
        }
        if !self.order_status.is_empty() {
            update.order_statuses = Some(self.order_status.clone());
        }
        if self.intake_from.is_some() {
            update.intake_from = Some(self.intake_from);
        }
        if self.intake_to.is_some() {
            update.intake_to = Some(self.intake_to);
        }
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_filter_flags() {
        let args = Args::try_parse_from([
            "sheetview",
            "ledger.xlsx",
            "--query",
            "acme",
            "--row-status",
            "Open",
            "--row-status",
            "Closed",
            "--intake-from",
            "10",
            "--intake-to",
            "20.5",
        ])
        .unwrap();
        assert_eq!(args.path.as_deref().unwrap().to_str(), Some("ledger.xlsx"));
        let update = args.filter_update();
        assert_eq!(update.query.as_deref(), Some("acme"));
        assert_eq!(update.row_statuses.unwrap(), ["Open", "Closed"]);
        assert_eq!(update.order_statuses, None);
        assert_eq!(update.intake_from, Some(Some(10.0)));
        assert_eq!(update.intake_to, Some(Some(20.5)));
    }

    #[test]
    fn no_flags_means_no_filter_changes() {
        let args = Args::try_parse_from(["sheetview", "ledger.xlsx"]).unwrap();
        let update = args.filter_update();
        assert!(update.query.is_none());
        assert!(update.row_statuses.is_none());
        assert!(update.order_statuses.is_none());
        assert!(update.intake_from.is_none());
        assert!(update.intake_to.is_none());
    }

    #[test]
    fn path_required_unless_generating_config() {
        assert!(Args::try_parse_from(["sheetview"]).is_err());
        let args = Args::try_parse_from(["sheetview", "--generate-config"]).unwrap();
        assert!(args.generate_config);
        assert!(args.path.is_none());
    }
}
