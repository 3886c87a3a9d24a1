//! Fixed-width table rendering for the terminal.

use common::models::InventoryEntity;
use common::utils::format_currency;

use crate::inventory::InventoryStats;

/// Prints a table with columns padded to their widest cell.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() && cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let line = |cells: Vec<String>| {
        let mut out = String::new();
        for (i, cell) in cells.iter().enumerate() {
            out.push_str(&format!("{:<width$}  ", cell, width = widths[i]));
        }
        println!("{}", out.trim_end());
    };

    line(headers.iter().map(|h| h.to_string()).collect());
    line(widths.iter().map(|w| "-".repeat(*w)).collect());
    for row in rows {
        line(row.clone());
    }
}

/// Prints the derived-statistics footer under an inventory table.
pub fn print_stats<E: InventoryEntity>(stats: &InventoryStats) {
    let metric_total = if E::METRIC_LABEL.contains("USD") {
        format_currency(stats.metric_total)
    } else {
        format!("{:.0}", stats.metric_total)
    };
    let metric_average = if E::METRIC_LABEL.contains("USD") {
        format_currency(stats.metric_average)
    } else {
        format!("{:.1}", stats.metric_average)
    };
    println!(
        "\n{count} {entity}(s) | {metric_label}: {metric_total} (avg {metric_average}) | {flag_label}: {flagged}",
        count = stats.count,
        entity = E::ENTITY,
        metric_label = E::METRIC_LABEL,
        flag_label = E::FLAG_LABEL,
        flagged = stats.flagged_count,
    );
}

/// Prints a section heading.
pub fn print_heading(title: &str) {
    println!("\n== {title} ==");
}

/// Prints the sample-data banner; shown whenever rendered data did not
/// come from the backend.
pub fn print_sample_banner() {
    println!("*** SAMPLE DATA — backend was not consulted ***");
}
