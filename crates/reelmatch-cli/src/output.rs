//! Table and JSON rendering of command results.

use std::time::Duration;

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use reelmatch_core::{BackendComparison, BackendKind, Recommendation};
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Table,
    /// One JSON document on stdout.
    Json,
}

/// Catalog and engine summary printed by `info`.
#[derive(Debug, Serialize)]
pub struct CatalogInfo {
    pub path: String,
    pub items: usize,
    pub distinct_titles: usize,
    pub vocabulary: usize,
    pub nonzero_weights: usize,
    pub empty_rows: usize,
    pub neighbor_strategy: String,
    pub fingerprint: String,
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(|h| Cell::new(h)));
    table
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn fmt_duration(d: Duration) -> String {
    format!("{:.3} ms", d.as_secs_f64() * 1_000.0)
}

pub fn print_recommendation(recs: &Recommendation, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return print_json(recs);
    }
    println!(
        "{} {} ({})",
        "Recommendations for".bold(),
        recs.query.green(),
        recs.backend.to_string().cyan()
    );
    if recs.is_empty() {
        println!("No other items in catalog.");
        return Ok(());
    }
    let mut table = new_table(&["#", "Title", "Score"]);
    for (rank, item) in recs.items.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&item.title),
            Cell::new(format!("{:.4}", item.score)),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn print_comparison(cmp: &BackendComparison, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "title": cmp.title,
            "k": cmp.k,
            "runs": cmp.cosine.runs,
            "cosine_mean_secs": cmp.cosine.mean_secs(),
            "nearest_neighbor_mean_secs": cmp.nearest_neighbor.mean_secs(),
            "speedup": cmp.speedup(),
            "cosine": cmp.cosine.stats,
            "nearest_neighbor": cmp.nearest_neighbor.stats,
        }));
    }
    println!(
        "{} {} (k = {}, {} runs)",
        "Latency for".bold(),
        cmp.title.green(),
        cmp.k,
        cmp.cosine.runs
    );
    let mut table = new_table(&["Backend", "Mean", "p50", "p95", "p99", "Min", "Max"]);
    for kind in BackendKind::ALL {
        let report = cmp.report(kind);
        table.add_row(vec![
            Cell::new(kind),
            Cell::new(fmt_duration(report.mean)),
            Cell::new(fmt_duration(report.stats.p50)),
            Cell::new(fmt_duration(report.stats.p95)),
            Cell::new(fmt_duration(report.stats.p99)),
            Cell::new(fmt_duration(report.stats.min)),
            Cell::new(fmt_duration(report.stats.max)),
        ]);
    }
    println!("{table}");
    if let Some(ratio) = cmp.speedup() {
        println!("nearest_neighbor / cosine mean: {}", format!("{ratio:.2}x").yellow());
    }
    Ok(())
}

pub fn print_info(info: &CatalogInfo, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return print_json(info);
    }
    println!("\n{}", "Catalog".bold().underline());
    let rows = [
        ("Path:", info.path.clone()),
        ("Items:", info.items.to_string()),
        ("Distinct titles:", info.distinct_titles.to_string()),
        ("Vocabulary:", info.vocabulary.to_string()),
        ("Non-zero weights:", info.nonzero_weights.to_string()),
        ("Rows without terms:", info.empty_rows.to_string()),
        ("NN strategy:", info.neighbor_strategy.clone()),
        ("Fingerprint:", info.fingerprint.clone()),
    ];
    for (label, value) in rows {
        println!("  {} {}", label.cyan(), value.green());
    }
    println!();
    Ok(())
}
