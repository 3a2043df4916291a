use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use sheetview::{AppConfig, Args, ConfigManager, Dataset, Row, Session, SummaryStats, APP_NAME};

fn print_facets(dataset: &Dataset, config: &AppConfig) {
    println!("Row statuses: {}", dataset.facets.row_statuses.join(", "));
    println!(
        "Order statuses: {}",
        dataset.facets.order_statuses.join(", ")
    );
    let (lo, hi) = match (dataset.facets.intake_min, dataset.facets.intake_max) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => (
            config.filter.default_intake_min,
            config.filter.default_intake_max,
        ),
    };
    println!("Intake range: {} .. {}", lo, hi);
}

fn print_rows(columns: &[String], rows: &[&Row], date_format: &str, limit: Option<usize>) {
    println!("{}", columns.join("\t"));
    for row in rows.iter().take(limit.unwrap_or(usize::MAX)) {
        let line: Vec<String> = columns
            .iter()
            .map(|column| {
                row.get(column)
                    .map(|cell| cell.display_with(date_format))
                    .unwrap_or_default()
            })
            .collect();
        println!("{}", line.join("\t"));
    }
}

fn print_stats(stats: &SummaryStats) {
    println!("Rows: {}", stats.total_rows);
    println!("Total order cost: {}", stats.total_order_cost);
    println!("Total release quantity: {}", stats.total_release_quantity);
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if args.generate_config {
        let manager = ConfigManager::new(APP_NAME)?;
        let path = manager.write_default_config()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = AppConfig::load(APP_NAME)?;
    let path = args
        .path
        .as_deref()
        .ok_or_else(|| eyre!("No file path given"))?;

    let mut session = Session::new();
    session.load_path(path)?;
    session.update_filter(args.filter_update());

    let dataset = session
        .dataset()
        .ok_or_else(|| eyre!("No dataset loaded"))?;

    if args.facets {
        print_facets(dataset, &config);
        return Ok(());
    }

    if dataset.is_empty() {
        println!("{} contains no data rows", path.display());
        return Ok(());
    }

    if !args.stats_only {
        print_rows(
            &dataset.columns,
            &session.filtered_rows(),
            &config.display.date_format,
            args.limit,
        );
        println!();
    }
    print_stats(&session.stats());

    Ok(())
}
