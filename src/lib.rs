//! # Rusty-tree
//!
//! `rusty-tree` grows binary decision trees that partition a feature matrix into
//! axis-aligned regions and predict either a class (with probabilities) or a
//! continuous value.
//!
//! ## Getting Started
//!
//! To use `rusty-tree`, add the following to your `Cargo.toml` file:
//!
//! ```toml
//! [dependencies]
//! rusty-tree = "*"
//! ```
//!
//! ## Example Usage
//!
//! Fitting a regression tree limited to a single split:
//!
//! ```rust
//! use nalgebra::{DMatrix, DVector};
//! use rusty_tree::data::dataset::Dataset;
//! use rusty_tree::trees::decision_tree::DecisionTree;
//!
//! let x = DMatrix::from_column_slice(4, 1, &[0.0, 1.0, 2.0, 3.0]);
//! let y = DVector::from_vec(vec![1.0, 2.0, 3.0, 10.0]);
//!
//! let mut tree = DecisionTree::with_params(Some("variance"), None, Some(1), None).unwrap();
//! tree.fit(&Dataset::new(x, y)).unwrap();
//!
//! let test_x = DMatrix::from_column_slice(2, 1, &[0.5, 4.0]);
//! let predictions = tree.predict(&test_x).unwrap();
//! assert_eq!(predictions, DVector::from_vec(vec![2.0, 10.0]));
//! ```

/// Dataset and label encoding utilities
pub mod data;
/// Crate error type
pub mod error;
/// Functions for evaluating model performance
pub mod metrics;
/// Decision trees
pub mod trees;
