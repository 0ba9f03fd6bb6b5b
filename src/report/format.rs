//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the scoring/table code stays free of presentation details
//! - the CLI and the TUI render rows identically

use crate::domain::{Prediction, ScoredRecord, Verdict, gender_label, policy_label};
use crate::io::ingest::IngestedRecords;

/// Column titles of the record table.
pub const TABLE_HEADERS: [&str; 8] = [
    "#",
    "Age",
    "Gender",
    "Policy",
    "Vehicle Age",
    "Prev Claims",
    "Premium",
    "Prob",
];

/// Probability as a percentage with one decimal, e.g. `71.1%`.
///
/// Exact halfway values round up (`6.25` -> `6.3`), not to even.
pub fn format_percent(probability: f64) -> String {
    let pct = probability * 100.0;
    // A one-decimal tie is exactly `n + 0.25` or `n + 0.75`, i.e. an odd number of quarters.
    let quarters = pct * 4.0;
    if pct >= 0.0 && quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        let tenths = (pct * 10.0).floor() as u64 + 1;
        return format!("{}.{}%", tenths / 10, tenths % 10);
    }
    format!("{pct:.1}%")
}

/// One-line verdict, e.g. `Likely to Claim: 71.1%`.
pub fn format_verdict(probability: f64) -> String {
    format!(
        "{}: {}",
        Verdict::from_probability(probability).display_name(),
        format_percent(probability)
    )
}

/// Verdict plus the numbers behind it.
pub fn format_prediction(pred: &Prediction) -> String {
    let mut out = String::new();
    out.push_str(&format_verdict(pred.probability));
    out.push('\n');
    out.push_str(&format!("score (log-odds): {:.6}\n", pred.score));
    out.push_str(&format!("probability: {}", pred.probability));
    out
}

/// Display cells for one table row. `index` is the 0-based position; the
/// rendered row number is 1-based.
pub fn table_cells(index: usize, record: &ScoredRecord) -> [String; 8] {
    let f = &record.features;
    [
        (index + 1).to_string(),
        f.age.to_string(),
        gender_label(f.gender).to_string(),
        policy_label(f.policy).to_string(),
        f.vehicle_age.to_string(),
        f.previous_claims.to_string(),
        f.annual_premium.to_string(),
        format_percent(record.probability),
    ]
}

/// Render the whole table as aligned plain text.
pub fn format_table(records: &[ScoredRecord]) -> String {
    let rows: Vec<[String; 8]> = records
        .iter()
        .enumerate()
        .map(|(i, r)| table_cells(i, r))
        .collect();

    let mut widths = TABLE_HEADERS.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &TABLE_HEADERS, &widths);
    let rule = widths.map(|w| "-".repeat(w));
    push_row(&mut out, &rule, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize; 8]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:>w$}", cell.as_ref(), w = *w))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Summary of a CSV ingest: rows read/used and any skipped rows.
pub fn format_ingest_summary(ingested: &IngestedRecords) -> String {
    let mut out = format!(
        "Rows: read={} | used={} | skipped={}\n",
        ingested.rows_read,
        ingested.records.len(),
        ingested.row_errors.len()
    );
    for err in ingested.row_errors.iter().take(10) {
        out.push_str(&format!("  line {}: {}\n", err.line, err.message));
    }
    if ingested.row_errors.len() > 10 {
        out.push_str(&format!("  ... and {} more\n", ingested.row_errors.len() - 10));
    }
    out
}
