//! Errors
//!
//! Error type shared by every fallible operation in `rusty-tree`.
use thiserror::Error;

/// Errors that can occur while configuring, fitting or querying a tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The criterion name is not one of the supported criteria.
    #[error("Unknown criterion '{0}', expected one of gini, entropy, variance, mad_median.")]
    UnknownCriterion(String),
    /// A parameter value is outside its valid range.
    #[error("Invalid parameter value passed for {name}, expected {expected} but {found} provided.")]
    InvalidParameter {
        name: String,
        expected: String,
        found: String,
    },
    /// Features and labels disagree on the number of rows.
    #[error("Features have {features} rows but labels have {labels}.")]
    ShapeMismatch { features: usize, labels: usize },
    /// Predictions and true values differ in length.
    #[error("Predictions and labels are of different sizes ({0} and {1}).")]
    LengthMismatch(usize, usize),
    /// Labels must be a single column.
    #[error("Labels must be a single column, got {0} columns.")]
    LabelRank(usize),
    /// Prediction input has a different number of features than the training data.
    #[error("The tree was fitted on {expected} features but {found} were provided.")]
    FeatureCountMismatch { expected: usize, found: usize },
    /// A class label is not an integer in `[0, n_classes)`.
    #[error("Label {label} is not a class index in [0, {n_classes}).")]
    InvalidLabel { label: f64, n_classes: usize },
    /// Cannot fit on a dataset without rows.
    #[error("Cannot fit a tree on an empty dataset.")]
    EmptyDataset,
    /// The tree has not been fitted yet.
    #[error("Tree wasn't built yet.")]
    NotFitted,
    /// The operation does not apply to this kind of tree.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    /// Error raised by the CSV reader.
    #[error("Unable to read CSV data: {0}")]
    Csv(#[from] csv::Error),
    /// A CSV field could not be parsed as a number.
    #[error("Unable to parse value '{0}'.")]
    Parse(String),
}
