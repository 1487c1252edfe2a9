//! Formatted terminal output.
//!
//! We keep formatting code in one place so the ingest and training code stay
//! free of presentation details.

use crate::domain::Table;
use crate::report::FitReport;

/// One line per column: name, inferred kind, length and the first `rows` values.
pub fn format_table_preview(table: &Table, rows: usize) -> String {
    let mut out = String::new();
    for name in table.names() {
        let Some(column) = table.get(name) else { continue };
        let values: Vec<String> = (0..rows.min(column.len()))
            .filter_map(|i| column.display_value(i))
            .collect();
        let more = if column.len() > rows { ", ..." } else { "" };
        out.push_str(&format!(
            "{name} ({}, n={}): [{}{more}]\n",
            column.kind(),
            column.len(),
            values.join(", ")
        ));
    }
    out
}

/// Human-readable summary of a training run.
pub fn format_fit_summary(report: &FitReport) -> String {
    let mut out = String::new();

    out.push_str("=== linfit - gradient descent linear regression ===\n");
    out.push_str(&format!(
        "Target: {} | samples={} | lr={} | epochs={}\n",
        report.target, report.samples, report.train.learning_rate, report.train.epochs
    ));
    out.push_str(&format!(
        "Result: {} after {} epoch(s) | SSE={:.6e} | RMSE={:.6} | {:.3}s\n",
        if report.converged { "converged" } else { "not converged" },
        report.epochs_run,
        report.squared_error,
        report.rmse,
        report.elapsed_seconds
    ));

    out.push_str("\nWeights:\n");
    let name_width = report.features.iter().map(String::len).max().unwrap_or(0).max(7);
    out.push_str(&format!("  {:<name_width$}  {:>14}", "feature", "gd"));
    if report.closed_form.is_some() {
        out.push_str(&format!("  {:>14}", "closed-form"));
    }
    out.push('\n');

    for (j, (name, w)) in report.features.iter().zip(&report.weights).enumerate() {
        out.push_str(&format!("  {name:<name_width$}  {w:>14.6}"));
        if let Some(exact) = report.closed_form.as_ref().and_then(|cf| cf.get(j)) {
            out.push_str(&format!("  {exact:>14.6}"));
        }
        out.push('\n');
    }

    if let Some(pred) = &report.prediction {
        let input: Vec<String> = pred.input.iter().map(|v| v.to_string()).collect();
        out.push_str(&format!("\nPrediction for [{}]: {:.6}\n", input.join(", "), pred.value));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Column, TrainConfig};
    use crate::fit::GdOutcome;
    use crate::report::Prediction;

    #[test]
    fn preview_truncates_and_sorts() {
        let mut table = Table::new();
        table.insert("b", Column::Int(vec![1, 2, 3]));
        table.insert("a", Column::Text(vec!["x".into()]));

        let text = format_table_preview(&table, 2);
        assert_eq!(text, "a (text, n=1): [x]\nb (int, n=3): [1, 2, ...]\n");
    }

    #[test]
    fn summary_lists_weights_and_prediction() {
        let outcome = GdOutcome {
            weights: vec![2.0, -1.0],
            epochs_run: 10,
            converged: false,
            final_error: 0.5,
            elapsed_seconds: 0.0,
        };
        let mut report = FitReport::new(
            "price",
            &["area".to_string(), "age".to_string()],
            5,
            TrainConfig::default(),
            &outcome,
        );
        report.closed_form = Some(vec![2.1, -0.9]);
        report.prediction = Some(Prediction {
            input: vec![1.0, 1.0],
            value: 1.0,
        });

        let text = format_fit_summary(&report);
        assert!(text.contains("not converged after 10 epoch(s)"));
        assert!(text.contains("closed-form"));
        assert!(text.contains("area"));
        assert!(text.contains("2.100000"));
        assert!(text.contains("Prediction for [1, 1]: 1.000000"));
    }
}
