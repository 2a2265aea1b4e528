//! Conversion between integer class labels and one-hot indicator rows.
use nalgebra::{DMatrix, DVector};

use crate::error::TreeError;

/// Number of distinct labels in `y`.
pub fn count_classes(y: &DVector<f64>) -> usize {
    let mut labels = y.iter().cloned().collect::<Vec<_>>();
    labels.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    labels.dedup();
    labels.len()
}

fn class_index(label: f64, n_classes: usize) -> Result<usize, TreeError> {
    if label.fract() != 0.0 || label < 0.0 || label >= n_classes as f64 {
        return Err(TreeError::InvalidLabel { label, n_classes });
    }
    Ok(label as usize)
}

/// Expands class labels into an `(n_rows, n_classes)` indicator matrix with a
/// single `1.0` per row, in the column of that row's label.
pub fn one_hot_encode(n_classes: usize, y: &DVector<f64>) -> Result<DMatrix<f64>, TreeError> {
    let mut encoded = DMatrix::zeros(y.len(), n_classes);
    for (row, &label) in y.iter().enumerate() {
        encoded[(row, class_index(label, n_classes)?)] = 1.0;
    }
    Ok(encoded)
}

/// Row-wise argmax of an indicator (or probability) matrix. Ties go to the
/// lowest column.
pub fn one_hot_decode(y_one_hot: &DMatrix<f64>) -> DVector<usize> {
    DVector::from_iterator(
        y_one_hot.nrows(),
        y_one_hot.row_iter().map(|row| argmax(row.iter().cloned())),
    )
}

/// Index of the first maximum of `values`, `0` when empty.
pub fn argmax(values: impl Iterator<Item = f64>) -> usize {
    let mut best_index = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (index, value) in values.enumerate() {
        if value > best_value {
            best_index = index;
            best_value = value;
        }
    }
    best_index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_classes() {
        let y = DVector::from_vec(vec![2.0, 0.0, 2.0, 1.0, 0.0]);
        assert_eq!(count_classes(&y), 3);
    }

    #[test]
    fn test_one_hot_encode() {
        let y = DVector::from_vec(vec![1.0, 0.0, 2.0]);
        let encoded = one_hot_encode(3, &y).unwrap();
        let expected =
            DMatrix::from_row_slice(3, 3, &[0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_round_trip() {
        let labels = vec![0usize, 3, 1, 1, 2, 0, 3];
        let y = DVector::from_iterator(labels.len(), labels.iter().map(|&l| l as f64));
        let decoded = one_hot_decode(&one_hot_encode(4, &y).unwrap());
        assert_eq!(decoded, DVector::from_vec(labels));
    }

    #[test]
    fn test_encode_rejects_out_of_range_label() {
        let y = DVector::from_vec(vec![0.0, 2.0]);
        assert!(matches!(
            one_hot_encode(2, &y),
            Err(TreeError::InvalidLabel { n_classes: 2, .. })
        ));
    }

    #[test]
    fn test_encode_rejects_fractional_label() {
        let y = DVector::from_vec(vec![0.5]);
        assert!(one_hot_encode(2, &y).is_err());
    }

    #[test]
    fn test_argmax_prefers_first_maximum() {
        assert_eq!(argmax(vec![0.25, 0.5, 0.5].into_iter()), 1);
        assert_eq!(argmax(std::iter::empty()), 0);
    }
}
