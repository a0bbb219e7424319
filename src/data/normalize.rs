//! Pre-fit rescaling of selected columns.
//!
//! Every topology column (and the output column when a log transform was
//! requested) is rescaled in place to `(v - mean) / (max - min)`: zero-centered
//! and range-scaled. Statistics are computed over finite values only, so a
//! stray NaN in a column does not poison the rescale; the non-finite entries
//! themselves are left as-is and dropped later at matrix-build time.

use crate::data::frame::Frame;
use crate::domain::OutLog;
use crate::error::AppError;
use crate::formula::vars::GRAPH_VARS;

/// Columns the normalization pass targets for a given run.
pub fn normalize_targets(out_var: &str, out_log: OutLog) -> Vec<String> {
    let mut targets: Vec<String> = GRAPH_VARS.iter().map(|v| v.to_string()).collect();
    if out_log.is_log() {
        targets.push(out_var.to_string());
    }
    targets
}

/// Rescale the run's target columns in place.
///
/// Target columns missing from the frame are skipped; a present column with
/// zero range is a dataset error (the rescale would divide by zero).
pub fn normalize_frame(frame: &mut Frame, out_var: &str, out_log: OutLog) -> Result<(), AppError> {
    for name in normalize_targets(out_var, out_log) {
        let Some(values) = frame.numeric_mut(&name) else {
            continue;
        };
        rescale(values, &name)?;
    }
    Ok(())
}

fn rescale(values: &mut [f64], name: &str) -> Result<(), AppError> {
    let mut sum = 0.0;
    let mut count = 0usize;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values.iter() {
        if !v.is_finite() {
            continue;
        }
        sum += v;
        count += 1;
        min = min.min(v);
        max = max.max(v);
    }

    if count == 0 {
        return Err(AppError::new(
            3,
            format!("Column '{name}' has no finite values to normalize."),
        ));
    }

    let range = max - min;
    if range <= 0.0 {
        return Err(AppError::new(
            3,
            format!("Column '{name}' has zero range; cannot normalize."),
        ));
    }

    let mean = sum / count as f64;
    for v in values.iter_mut() {
        *v = (*v - mean) / range;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::frame::Column;

    fn catalog_frame(clustering: Vec<f64>) -> Frame {
        let n = clustering.len();
        let mut pairs = vec![(
            "team_graph_clustering".to_string(),
            Column::Numeric(clustering),
        )];
        pairs.push((
            "team_productivity".to_string(),
            Column::Numeric((0..n).map(|i| 1.0 + i as f64).collect()),
        ));
        Frame::new(pairs).unwrap()
    }

    #[test]
    fn normalized_column_has_zero_mean() {
        let mut frame = catalog_frame(vec![0.1, 0.5, 0.9, 0.3]);
        normalize_frame(&mut frame, "team_productivity", OutLog::Linear).unwrap();

        let values = frame.numeric("team_graph_clustering").unwrap();
        let mean: f64 = values.iter().sum::<f64>() / values.len() as f64;
        assert!(mean.abs() < 1e-12, "mean after rescale was {mean}");

        // Range-scaled: spread is exactly 1.
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!((max - min - 1.0).abs() < 1e-12);
    }

    #[test]
    fn output_column_is_rescaled_only_for_log_transforms() {
        let mut frame = catalog_frame(vec![0.1, 0.5, 0.9, 0.3]);
        normalize_frame(&mut frame, "team_productivity", OutLog::Log10).unwrap();

        let out = frame.numeric("team_productivity").unwrap();
        let mean: f64 = out.iter().sum::<f64>() / out.len() as f64;
        assert!(mean.abs() < 1e-12);

        let mut frame = catalog_frame(vec![0.1, 0.5, 0.9, 0.3]);
        normalize_frame(&mut frame, "team_productivity", OutLog::Linear).unwrap();
        assert_eq!(frame.numeric("team_productivity").unwrap(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn zero_range_column_is_an_error() {
        let mut frame = catalog_frame(vec![0.4, 0.4, 0.4]);
        let err = normalize_frame(&mut frame, "team_productivity", OutLog::Linear).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn missing_catalog_columns_are_skipped() {
        let mut frame = Frame::new(vec![(
            "run_step".to_string(),
            Column::Numeric(vec![1.0, 2.0]),
        )])
        .unwrap();
        normalize_frame(&mut frame, "team_performance", OutLog::Linear).unwrap();
        assert_eq!(frame.numeric("run_step").unwrap(), &[1.0, 2.0]);
    }

    #[test]
    fn non_finite_entries_do_not_poison_the_stats() {
        let mut frame = catalog_frame(vec![0.0, f64::NAN, 1.0]);
        normalize_frame(&mut frame, "team_performance", OutLog::Linear).unwrap();

        let values = frame.numeric("team_graph_clustering").unwrap();
        assert!((values[0] + 0.5).abs() < 1e-12);
        assert!(values[1].is_nan());
        assert!((values[2] - 0.5).abs() < 1e-12);
    }
}
