//! Recursive construction of the node graph.
use log::debug;
use nalgebra::DMatrix;

use crate::data::dataset::Number;
use crate::trees::criterion::Criterion;
use crate::trees::node::{LeafValue, TreeNode};
use crate::trees::params::TreeParams;
use crate::trees::splitter::{choose_best_split, partition_rows};

/// Grows a tree over a fixed feature matrix and label matrix.
///
/// `y` holds one-hot rows for classification criteria and a single target
/// column for regression criteria.
pub struct TreeBuilder<'a, XT: Number> {
    x: &'a DMatrix<XT>,
    y: &'a DMatrix<f64>,
    criterion: Criterion,
    max_depth: Option<usize>,
    min_samples_split: usize,
}

impl<'a, XT: Number> TreeBuilder<'a, XT> {
    pub fn new(x: &'a DMatrix<XT>, y: &'a DMatrix<f64>, params: &TreeParams) -> Self {
        Self {
            x,
            y,
            criterion: params.criterion(),
            max_depth: params.max_depth(),
            min_samples_split: params.min_samples_split(),
        }
    }

    /// Builds the tree over all rows. There must be at least one row.
    pub fn build(&self) -> TreeNode<XT> {
        let rows = (0..self.x.nrows()).collect::<Vec<_>>();
        self.build_node(&rows, 0)
    }

    fn leaf(&self, rows: &[usize]) -> LeafValue {
        LeafValue::from_rows(self.criterion, self.y, rows)
    }

    // `rows` is never empty.
    fn build_node(&self, rows: &[usize], depth: usize) -> TreeNode<XT> {
        if self.max_depth.is_some_and(|max_depth| depth >= max_depth) {
            debug!("Leaf at depth {}: maximum depth reached ({} rows).", depth, rows.len());
            return TreeNode::Leaf(self.leaf(rows));
        }
        if rows.len() < self.min_samples_split {
            debug!("Leaf at depth {}: {} rows are too few to split.", depth, rows.len());
            return TreeNode::Leaf(self.leaf(rows));
        }
        let split = match choose_best_split(self.x, self.y, rows, self.criterion) {
            Some(split) => split,
            None => {
                debug!("Leaf at depth {}: no valid split ({} rows).", depth, rows.len());
                return TreeNode::Leaf(self.leaf(rows));
            }
        };
        debug!(
            "Split at depth {} on feature {} < {} with cost {:.6} ({} rows).",
            depth,
            split.feature_index,
            split.threshold,
            split.cost,
            rows.len()
        );

        let (left_rows, right_rows) =
            partition_rows(self.x, rows, split.feature_index, split.threshold);
        let left = self.build_child(&left_rows, rows, depth + 1);
        let right = self.build_child(&right_rows, rows, depth + 1);
        TreeNode::split(split.feature_index, split.threshold, left, right)
    }

    /// An empty side becomes a leaf carrying the parent's payload.
    fn build_child(&self, rows: &[usize], parent_rows: &[usize], depth: usize) -> TreeNode<XT> {
        if rows.is_empty() {
            debug!("Leaf at depth {}: empty side inherits its parent's value.", depth);
            return TreeNode::Leaf(self.leaf(parent_rows));
        }
        self.build_node(rows, depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(criterion: &str, max_depth: Option<usize>) -> TreeParams {
        let mut params = TreeParams::new();
        params.set_criterion(criterion).unwrap();
        params.set_max_depth(max_depth);
        params
    }

    fn one_hot(labels: &[usize], n_classes: usize) -> DMatrix<f64> {
        DMatrix::from_fn(labels.len(), n_classes, |row, col| {
            if labels[row] == col {
                1.0
            } else {
                0.0
            }
        })
    }

    #[test]
    fn test_separable_data_splits_at_class_boundary() {
        let x = DMatrix::from_column_slice(4, 1, &[0.0, 1.0, 2.0, 3.0]);
        let y = one_hot(&[0, 0, 1, 1], 2);
        let tree = TreeBuilder::new(&x, &y, &params("gini", None)).build();

        match &tree {
            TreeNode::Split {
                feature_index,
                threshold,
                left,
                right,
            } => {
                assert_eq!(*feature_index, 0);
                assert_eq!(*threshold, 2.0);
                // Both sides are pure but still hold distinct values, so they split again.
                assert!(!left.is_leaf());
                assert!(!right.is_leaf());
            }
            TreeNode::Leaf(_) => panic!("expected a split at the root"),
        }
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.n_leaves(), 4);
    }

    #[test]
    fn test_pure_node_with_distinct_values_still_splits() {
        let x = DMatrix::from_column_slice(2, 1, &[0.0, 1.0]);
        let y = one_hot(&[0, 0], 2);
        let tree = TreeBuilder::new(&x, &y, &params("gini", None)).build();

        match tree {
            TreeNode::Split {
                threshold,
                left,
                right,
                ..
            } => {
                assert_eq!(threshold, 1.0);
                for child in [*left, *right] {
                    match child {
                        TreeNode::Leaf(LeafValue::Class { label, .. }) => assert_eq!(label, 0),
                        other => panic!("expected a class leaf, got {:?}", other),
                    }
                }
            }
            TreeNode::Leaf(_) => panic!("a pure node with distinct values should split"),
        }
    }

    #[test]
    fn test_zero_depth_is_single_leaf() {
        let x = DMatrix::from_column_slice(4, 1, &[0.0, 1.0, 2.0, 3.0]);
        let y = DMatrix::from_column_slice(4, 1, &[1.0, 2.0, 3.0, 10.0]);
        let tree = TreeBuilder::new(&x, &y, &params("variance", Some(0))).build();
        assert_eq!(tree, TreeNode::Leaf(LeafValue::Value(4.0)));
    }

    #[test]
    fn test_max_depth_bounds_every_leaf() {
        let x = DMatrix::from_column_slice(8, 1, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let y = DMatrix::from_column_slice(8, 1, &[0.0, 9.0, 1.0, 8.0, 2.0, 7.0, 3.0, 6.0]);
        for max_depth in 0..4 {
            let tree = TreeBuilder::new(&x, &y, &params("variance", Some(max_depth))).build();
            assert!(tree.depth() <= max_depth);
        }
        let unbounded = TreeBuilder::new(&x, &y, &params("variance", None)).build();
        assert_eq!(unbounded.n_leaves(), 8);
    }

    #[test]
    fn test_min_samples_split_stops_growth() {
        let x = DMatrix::from_column_slice(4, 1, &[0.0, 1.0, 2.0, 3.0]);
        let y = one_hot(&[0, 1, 0, 1], 2);
        let mut params = params("gini", None);
        params.set_min_samples_split(5).unwrap();
        let tree = TreeBuilder::new(&x, &y, &params).build();
        assert!(tree.is_leaf());
    }

    #[test]
    fn test_identical_rows_become_leaf() {
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
        let y = one_hot(&[0, 1, 1], 2);
        let tree = TreeBuilder::new(&x, &y, &params("entropy", None)).build();
        match tree {
            TreeNode::Leaf(LeafValue::Class { label, .. }) => assert_eq!(label, 1),
            other => panic!("expected a class leaf, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_side_inherits_parent_value() {
        let x = DMatrix::from_column_slice(2, 1, &[0.0, 1.0]);
        let y = DMatrix::from_column_slice(2, 1, &[2.0, 4.0]);
        let builder = TreeBuilder::new(&x, &y, &params("variance", None));
        let child = builder.build_child(&[], &[0, 1], 1);
        assert_eq!(child, TreeNode::Leaf(LeafValue::Value(3.0)));
    }
}
