//! Plain-text rendering for terminal output

use std::fmt::Write;

use seriesfill::types::{Granularity, Series, SeriesStats};

/// Whole numbers print bare, everything else with two decimals
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Date column text: months show as `YYYY-MM`
fn date_label(key: &str, granularity: Granularity) -> &str {
    match granularity {
        Granularity::Day | Granularity::Week => key,
        Granularity::Month => key.get(..7).unwrap_or(key),
    }
}

/// Right-aligned table, one row per bucket
pub fn series_table(series: &Series, granularity: Granularity) -> String {
    let mut out = String::new();
    let Some(first) = series.buckets().first() else {
        out.push_str("No data\n");
        return out;
    };

    let headers: Vec<&str> = first.metrics.keys().map(String::as_str).collect();
    let rows: Vec<(String, Vec<String>)> = series
        .iter()
        .map(|b| {
            let values = headers
                .iter()
                .map(|h| format_value(b.metric(h)))
                .collect();
            (date_label(b.key.as_str(), granularity).to_string(), values)
        })
        .collect();

    let date_width = rows
        .iter()
        .map(|(d, _)| d.len())
        .chain(std::iter::once(granularity.column_label().len()))
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|(_, v)| v[i].len())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let _ = write!(out, "{:<w$}", granularity.column_label(), w = date_width);
    for (h, w) in headers.iter().zip(&widths) {
        let _ = write!(out, "  {:>w$}", h, w = *w);
    }
    out.push('\n');

    for (date, values) in &rows {
        let _ = write!(out, "{:<w$}", date, w = date_width);
        for (v, w) in values.iter().zip(&widths) {
            let _ = write!(out, "  {:>w$}", v, w = *w);
        }
        out.push('\n');
    }

    out
}

pub fn stats_text(stats: &SeriesStats) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Buckets: {} ({} active)",
        stats.bucket_count, stats.active_buckets
    );

    for (name, total) in &stats.totals {
        let _ = write!(out, "{}: total {}", name, format_value(*total));
        if let Some((key, peak)) = stats.peaks.get(name) {
            let _ = write!(out, ", peak {} on {}", format_value(*peak), key);
        }
        out.push('\n');
    }

    out
}
