use nalgebra::{DMatrix, DVector, RowDVector};

use crate::data::dataset::Number;
use crate::data::encoding::argmax;
use crate::trees::criterion::{median_in_place, Criterion};

/// Prediction stored in a leaf.
#[derive(Clone, Debug, PartialEq)]
pub enum LeafValue {
    /// Majority class and the class frequencies of the rows that reached the leaf.
    Class {
        label: usize,
        probabilities: DVector<f64>,
    },
    /// Mean or median target of the rows that reached the leaf.
    Value(f64),
}

impl LeafValue {
    /// Builds the payload of a leaf holding `rows` of `y`.
    ///
    /// For classification criteria `y` holds one-hot rows, otherwise a single
    /// target column. `rows` must not be empty.
    pub fn from_rows(criterion: Criterion, y: &DMatrix<f64>, rows: &[usize]) -> Self {
        match criterion {
            Criterion::Gini | Criterion::Entropy => {
                let counts = DVector::from_fn(y.ncols(), |class, _| {
                    rows.iter().map(|&row| y[(row, class)]).sum::<f64>()
                });
                LeafValue::Class {
                    label: argmax(counts.iter().cloned()),
                    probabilities: counts / rows.len() as f64,
                }
            }
            Criterion::Variance => LeafValue::Value(
                rows.iter().map(|&row| y[(row, 0)]).sum::<f64>() / rows.len() as f64,
            ),
            Criterion::MadMedian => {
                let mut values = rows.iter().map(|&row| y[(row, 0)]).collect::<Vec<_>>();
                LeafValue::Value(median_in_place(&mut values))
            }
        }
    }

    /// The scalar returned by `predict`: the class index or the target value.
    pub fn prediction(&self) -> f64 {
        match self {
            LeafValue::Class { label, .. } => *label as f64,
            LeafValue::Value(value) => *value,
        }
    }

    pub fn probabilities(&self) -> Option<&DVector<f64>> {
        match self {
            LeafValue::Class { probabilities, .. } => Some(probabilities),
            LeafValue::Value(_) => None,
        }
    }
}

/// Decision tree node
#[derive(Clone, Debug, PartialEq)]
pub enum TreeNode<XT: Number> {
    /// Rows with `x[feature_index] < threshold` go left, the rest go right.
    Split {
        feature_index: usize,
        threshold: XT,
        left: Box<TreeNode<XT>>,
        right: Box<TreeNode<XT>>,
    },
    Leaf(LeafValue),
}

impl<XT: Number> TreeNode<XT> {
    pub fn split(feature_index: usize, threshold: XT, left: Self, right: Self) -> Self {
        TreeNode::Split {
            feature_index,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf(_))
    }

    /// Follows the split predicates from this node down to a leaf.
    pub fn leaf_for(&self, features: &RowDVector<XT>) -> &LeafValue {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf(value) => return value,
                TreeNode::Split {
                    feature_index,
                    threshold,
                    left,
                    right,
                } => {
                    node = if features[*feature_index] < *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    pub fn predict_row(&self, features: &RowDVector<XT>) -> f64 {
        self.leaf_for(features).prediction()
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 1,
            TreeNode::Split { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }

    /// Depth of the deepest leaf below this node, counting this node as depth 0.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}
