//! Scoring functions for evaluating clustering or classification output.
//!
//! The binary classification metrics ([`precision`], [`recall`], [`f1`])
//! expect labels encoded as `{0, 1}` and use sum-based confusion counts.

use crate::error::KMeansError;
use ndarray::ArrayView1;

fn check_lengths(n_true: usize, n_pred: usize) -> Result<(), KMeansError> {
    if n_true != n_pred {
        return Err(KMeansError::InvalidDimensions(format!(
            "y_true has {} elements, y_pred has {}",
            n_true, n_pred
        )));
    }
    if n_true == 0 {
        return Err(KMeansError::InvalidDimensions(
            "input arrays are empty".to_string(),
        ));
    }
    Ok(())
}

/// True positives, predicted positives, and actual positives for binary
/// `{0,1}` labels
fn confusion_counts(y_true: &ArrayView1<usize>, y_pred: &ArrayView1<usize>) -> (f64, f64, f64) {
    let tp = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(&t, &p)| t == 1 && p == 1)
        .count() as f64;
    let predicted_pos = y_pred.iter().filter(|&&p| p == 1).count() as f64;
    let actual_pos = y_true.iter().filter(|&&t| t == 1).count() as f64;

    (tp, predicted_pos, actual_pos)
}

/// Fraction of predictions equal to the true labels:
/// `(TP + TN) / (TP + TN + FP + FN)`
pub fn accuracy(
    y_true: &ArrayView1<usize>,
    y_pred: &ArrayView1<usize>,
) -> Result<f64, KMeansError> {
    check_lengths(y_true.len(), y_pred.len())?;

    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// `precision = TP / (TP + FP)`, or 0.0 when nothing was predicted positive
pub fn precision(
    y_true: &ArrayView1<usize>,
    y_pred: &ArrayView1<usize>,
) -> Result<f64, KMeansError> {
    check_lengths(y_true.len(), y_pred.len())?;

    let (tp, predicted_pos, _) = confusion_counts(y_true, y_pred);
    if predicted_pos == 0.0 {
        return Ok(0.0);
    }
    Ok(tp / predicted_pos)
}

/// `recall = TP / (TP + FN)`, or 0.0 when there are no actual positives
pub fn recall(
    y_true: &ArrayView1<usize>,
    y_pred: &ArrayView1<usize>,
) -> Result<f64, KMeansError> {
    check_lengths(y_true.len(), y_pred.len())?;

    let (tp, _, actual_pos) = confusion_counts(y_true, y_pred);
    if actual_pos == 0.0 {
        return Ok(0.0);
    }
    Ok(tp / actual_pos)
}

/// `f1 = 2 * precision * recall / (precision + recall)`, or 0.0 when both
/// are zero
pub fn f1(y_true: &ArrayView1<usize>, y_pred: &ArrayView1<usize>) -> Result<f64, KMeansError> {
    let p = precision(y_true, y_pred)?;
    let r = recall(y_true, y_pred)?;

    if p + r == 0.0 {
        return Ok(0.0);
    }
    Ok(2.0 * p * r / (p + r))
}

/// Mean squared error: `mean((y_true_i - y_pred_i)^2)`
pub fn mse(y_true: &ArrayView1<f64>, y_pred: &ArrayView1<f64>) -> Result<f64, KMeansError> {
    check_lengths(y_true.len(), y_pred.len())?;

    let total: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p) * (t - p))
        .sum();
    Ok(total / y_true.len() as f64)
}
