//! Exhaustive search for the best axis-aligned split.
use nalgebra::DMatrix;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::data::dataset::Number;
use crate::trees::criterion::{Criterion, ImpurityFn};

/// A candidate split and its weighted cost.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitData<XT: Number> {
    pub feature_index: usize,
    pub threshold: XT,
    pub cost: f64,
}

/// Splits `rows` on `x[feature_index] < threshold` (left) versus `>= threshold` (right).
pub fn partition_rows<XT: Number>(
    x: &DMatrix<XT>,
    rows: &[usize],
    feature_index: usize,
    threshold: XT,
) -> (Vec<usize>, Vec<usize>) {
    rows.iter()
        .copied()
        .partition(|&row| x[(row, feature_index)] < threshold)
}

/// Returns the split of `rows` with the lowest weighted criterion, or `None`
/// when there are fewer than two rows or no feature separates them.
///
/// Candidates are every distinct value of every feature. Ties keep the first
/// candidate found, scanning features in order and thresholds ascending.
pub fn choose_best_split<XT: Number>(
    x: &DMatrix<XT>,
    y: &DMatrix<f64>,
    rows: &[usize],
    criterion: Criterion,
) -> Option<SplitData<XT>> {
    if rows.len() <= 1 {
        return None;
    }
    let impurity = criterion.impurity_fn();

    // Collecting keeps the feature order, so the reduction below sees the
    // same candidate order as a sequential scan.
    let per_feature = (0..x.ncols())
        .into_par_iter()
        .map(|feature_index| best_split_for_feature(x, y, rows, feature_index, impurity))
        .collect::<Vec<_>>();

    per_feature
        .into_iter()
        .flatten()
        .fold(None, |best: Option<SplitData<XT>>, candidate| match best {
            Some(best) if candidate.cost >= best.cost => Some(best),
            _ => Some(candidate),
        })
}

fn best_split_for_feature<XT: Number>(
    x: &DMatrix<XT>,
    y: &DMatrix<f64>,
    rows: &[usize],
    feature_index: usize,
    impurity: ImpurityFn,
) -> Option<SplitData<XT>> {
    let mut unique_values = rows
        .iter()
        .map(|&row| x[(row, feature_index)])
        .collect::<Vec<_>>();
    unique_values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    unique_values.dedup();

    let n_total = rows.len() as f64;
    let mut left = Vec::with_capacity(rows.len());
    let mut right = Vec::with_capacity(rows.len());
    let mut best_split: Option<SplitData<XT>> = None;
    let mut best_cost = f64::INFINITY;

    for &threshold in &unique_values {
        left.clear();
        right.clear();
        for &row in rows {
            if x[(row, feature_index)] < threshold {
                left.push(row);
            } else {
                right.push(row);
            }
        }
        if left.is_empty() || right.is_empty() {
            continue;
        }

        let cost = (left.len() as f64 / n_total) * impurity(y, &left)
            + (right.len() as f64 / n_total) * impurity(y, &right);

        if cost < best_cost {
            best_cost = cost;
            best_split = Some(SplitData {
                feature_index,
                threshold,
                cost,
            });
        }
    }
    best_split
}
