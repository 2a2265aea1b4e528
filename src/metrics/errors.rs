use nalgebra::DVector;

use crate::error::TreeError;

fn check_lengths(y_true: &DVector<f64>, y_pred: &DVector<f64>) -> Result<f64, TreeError> {
    if y_true.len() != y_pred.len() {
        return Err(TreeError::LengthMismatch(y_true.len(), y_pred.len()));
    }
    if y_true.is_empty() {
        return Err(TreeError::EmptyDataset);
    }
    Ok(y_true.len() as f64)
}

/// Error measures for regression predictions.
pub trait RegressionMetrics {
    /// Mean squared error.
    fn mse(&self, y_true: &DVector<f64>, y_pred: &DVector<f64>) -> Result<f64, TreeError> {
        let n = check_lengths(y_true, y_pred)?;
        let errors = y_pred - y_true;
        Ok(errors.component_mul(&errors).sum() / n)
    }

    /// Mean absolute error.
    fn mae(&self, y_true: &DVector<f64>, y_pred: &DVector<f64>) -> Result<f64, TreeError> {
        let n = check_lengths(y_true, y_pred)?;
        Ok((y_pred - y_true).abs().sum() / n)
    }

    /// Coefficient of determination, `1 - SS_res / SS_tot`.
    fn r2(&self, y_true: &DVector<f64>, y_pred: &DVector<f64>) -> Result<f64, TreeError> {
        let n = check_lengths(y_true, y_pred)?;
        let y_true_mean = y_true.sum() / n;
        let residual = (y_true - y_pred).norm_squared();
        let total = y_true.map(|y| y - y_true_mean).norm_squared();

        Ok(1.0 - residual / total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct Metrics;
    impl RegressionMetrics for Metrics {}

    #[test]
    fn test_mse_and_mae() {
        let y_true = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        let y_pred = DVector::from_vec(vec![1.0, 4.0, 2.0]);
        assert_relative_eq!(Metrics.mse(&y_true, &y_pred).unwrap(), 5.0 / 3.0);
        assert_relative_eq!(Metrics.mae(&y_true, &y_pred).unwrap(), 1.0);
    }

    #[test]
    fn test_r2() {
        let y_true = DVector::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
        assert_relative_eq!(Metrics.r2(&y_true, &y_true).unwrap(), 1.0);

        let mean = DVector::from_element(4, 2.5);
        assert_relative_eq!(Metrics.r2(&y_true, &mean).unwrap(), 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        let y_true = DVector::from_vec(vec![1.0, 2.0]);
        let y_pred = DVector::from_vec(vec![1.0]);
        assert!(matches!(
            Metrics.mse(&y_true, &y_pred),
            Err(TreeError::LengthMismatch(2, 1))
        ));
    }
}
