use nalgebra::{DMatrix, DVector};

use crate::error::TreeError;

type ConfusionMatrix = DMatrix<usize>;

/// Scores for class predictions given as class indices stored in `f64`.
pub trait ClassificationMetrics {
    /// Computes the confusion matrix based on the true labels and predicted labels.
    ///
    /// Rows are true classes and columns predicted classes, both in ascending
    /// order of the labels seen in either vector.
    fn confusion_matrix(
        &self,
        y_true: &DVector<f64>,
        y_pred: &DVector<f64>,
    ) -> Result<ConfusionMatrix, TreeError> {
        if y_true.len() != y_pred.len() {
            return Err(TreeError::LengthMismatch(y_true.len(), y_pred.len()));
        }

        let mut classes = y_true.iter().chain(y_pred.iter()).cloned().collect::<Vec<_>>();
        classes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        classes.dedup();

        let position = |label: f64| {
            classes
                .iter()
                .position(|&class| class == label)
                .ok_or(TreeError::InvalidLabel {
                    label,
                    n_classes: classes.len(),
                })
        };

        let mut matrix = DMatrix::zeros(classes.len(), classes.len());
        for (&y_t, &y_p) in y_true.iter().zip(y_pred.iter()) {
            matrix[(position(y_t)?, position(y_p)?)] += 1;
        }

        Ok(matrix)
    }

    /// Fraction of predictions equal to the true label.
    fn accuracy(&self, y_true: &DVector<f64>, y_pred: &DVector<f64>) -> Result<f64, TreeError> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;
        if y_true.is_empty() {
            return Err(TreeError::EmptyDataset);
        }
        Ok(matrix.diagonal().sum() as f64 / y_true.len() as f64)
    }
}
