//! Impurity and dispersion criteria.
//!
//! Every criterion scores the labels of a subset of rows; lower is better.
//! Classification criteria read one-hot rows, regression criteria read the
//! first (and only) label column.
use nalgebra::DMatrix;
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::TreeError;

/// Added to every probability before taking its logarithm in [`entropy`].
pub const ENTROPY_EPS: f64 = 0.0005;

/// Signature shared by all criteria: labels plus the rows to score.
pub type ImpurityFn = fn(&DMatrix<f64>, &[usize]) -> f64;

/// The measure minimized when choosing a split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Criterion {
    /// `1 - sum(p_c^2)` over class frequencies.
    #[default]
    Gini,
    /// `-sum(p_c * ln(p_c + eps))` over class frequencies.
    Entropy,
    /// Mean squared deviation from the mean.
    Variance,
    /// Mean absolute deviation from the median.
    MadMedian,
}

impl Criterion {
    pub fn name(&self) -> &'static str {
        match self {
            Criterion::Gini => "gini",
            Criterion::Entropy => "entropy",
            Criterion::Variance => "variance",
            Criterion::MadMedian => "mad_median",
        }
    }

    /// Whether the criterion scores class labels rather than real targets.
    pub fn is_classification(&self) -> bool {
        matches!(self, Criterion::Gini | Criterion::Entropy)
    }

    pub fn impurity_fn(&self) -> ImpurityFn {
        match self {
            Criterion::Gini => gini,
            Criterion::Entropy => entropy,
            Criterion::Variance => variance,
            Criterion::MadMedian => mad_median,
        }
    }
}

impl FromStr for Criterion {
    type Err = TreeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "gini" => Ok(Criterion::Gini),
            "entropy" => Ok(Criterion::Entropy),
            "variance" => Ok(Criterion::Variance),
            "mad_median" => Ok(Criterion::MadMedian),
            _ => Err(TreeError::UnknownCriterion(name.to_string())),
        }
    }
}

impl Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fraction of `rows` belonging to class `class`.
fn class_frequency(y: &DMatrix<f64>, rows: &[usize], class: usize) -> f64 {
    rows.iter().map(|&row| y[(row, class)]).sum::<f64>() / rows.len() as f64
}

pub fn gini(y: &DMatrix<f64>, rows: &[usize]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    1.0 - (0..y.ncols())
        .map(|class| class_frequency(y, rows, class).powi(2))
        .sum::<f64>()
}

pub fn entropy(y: &DMatrix<f64>, rows: &[usize]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    -(0..y.ncols())
        .map(|class| {
            let p = class_frequency(y, rows, class);
            p * (p + ENTROPY_EPS).ln()
        })
        .sum::<f64>()
}

/// Positive infinity for an empty subset.
pub fn variance(y: &DMatrix<f64>, rows: &[usize]) -> f64 {
    if rows.is_empty() {
        return f64::INFINITY;
    }
    let n = rows.len() as f64;
    let mean = rows.iter().map(|&row| y[(row, 0)]).sum::<f64>() / n;
    rows.iter()
        .map(|&row| (y[(row, 0)] - mean).powi(2))
        .sum::<f64>()
        / n
}

/// Positive infinity for an empty subset.
pub fn mad_median(y: &DMatrix<f64>, rows: &[usize]) -> f64 {
    if rows.is_empty() {
        return f64::INFINITY;
    }
    let mut values = rows.iter().map(|&row| y[(row, 0)]).collect::<Vec<_>>();
    let median = median_in_place(&mut values);
    values.iter().map(|value| (value - median).abs()).sum::<f64>() / values.len() as f64
}

/// Median of `values`, averaging the two middle elements for even lengths.
/// Sorts `values`. Must not be empty.
pub(crate) fn median_in_place(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
