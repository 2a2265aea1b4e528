//! Decision Tree
use log::info;
use nalgebra::{DMatrix, DVector};

use crate::{
    data::{
        dataset::{Dataset, Number},
        encoding::{count_classes, one_hot_encode},
    },
    error::TreeError,
    metrics::{confusion::ClassificationMetrics, errors::RegressionMetrics},
    trees::{builder::TreeBuilder, node::TreeNode, params::TreeParams},
};

/// Binary decision tree for classification (`gini`, `entropy`) or
/// regression (`variance`, `mad_median`).
///
/// Classification labels are class indices `0..n_classes` stored as `f64`.
///
/// ```rust
/// use nalgebra::{DMatrix, DVector};
/// use rusty_tree::data::dataset::Dataset;
/// use rusty_tree::trees::decision_tree::DecisionTree;
///
/// let x = DMatrix::from_column_slice(4, 1, &[0.0, 1.0, 2.0, 3.0]);
/// let y = DVector::from_vec(vec![0.0, 0.0, 1.0, 1.0]);
///
/// let mut tree = DecisionTree::with_params(Some("gini"), None, None, None).unwrap();
/// tree.fit(&Dataset::new(x.clone(), y.clone())).unwrap();
///
/// assert_eq!(tree.predict(&x).unwrap(), y);
/// ```
#[derive(Clone, Debug)]
pub struct DecisionTree<XT: Number> {
    root: Option<TreeNode<XT>>,
    tree_params: TreeParams,
    n_classes: Option<usize>,
    n_features: usize,
    depth: usize,
}

impl<XT: Number> Default for DecisionTree<XT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<XT: Number> RegressionMetrics for DecisionTree<XT> {}
impl<XT: Number> ClassificationMetrics for DecisionTree<XT> {}

impl<XT: Number> DecisionTree<XT> {
    /// Creates an unfitted gini tree with unbounded depth.
    pub fn new() -> Self {
        Self::from_params(TreeParams::new())
    }

    pub fn from_params(tree_params: TreeParams) -> Self {
        Self {
            root: None,
            tree_params,
            n_classes: None,
            n_features: 0,
            depth: 0,
        }
    }

    /// Creates a tree with custom parameters.
    ///
    /// # Arguments
    ///
    /// * `criterion_name` - One of `gini` (default), `entropy`, `variance`, `mad_median`.
    /// * `n_classes` - Number of classes; inferred from the labels when `None`.
    /// * `max_depth` - The maximum depth of the tree; unbounded when `None`.
    /// * `min_samples_split` - The minimum number of rows required to split a node, 2 by default.
    ///
    /// # Errors
    ///
    /// Fails on an unknown criterion, `n_classes == 0` or `min_samples_split < 2`.
    pub fn with_params(
        criterion_name: Option<&str>,
        n_classes: Option<usize>,
        max_depth: Option<usize>,
        min_samples_split: Option<usize>,
    ) -> Result<Self, TreeError> {
        let mut tree_params = TreeParams::new();
        tree_params.set_criterion(criterion_name.unwrap_or("gini"))?;
        tree_params.set_n_classes(n_classes)?;
        tree_params.set_max_depth(max_depth);
        tree_params.set_min_samples_split(min_samples_split.unwrap_or(2))?;
        Ok(Self::from_params(tree_params))
    }

    pub fn params(&self) -> &TreeParams {
        &self.tree_params
    }

    pub fn is_classification(&self) -> bool {
        self.tree_params.criterion().is_classification()
    }

    /// Number of classes, fixed once the tree has been fitted. `None` for regression.
    pub fn n_classes(&self) -> Option<usize> {
        self.n_classes
    }

    /// Number of feature columns seen during `fit`.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Depth of the deepest leaf; the root sits at depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn n_leaves(&self) -> usize {
        self.root.as_ref().map_or(0, TreeNode::n_leaves)
    }

    pub fn root(&self) -> Option<&TreeNode<XT>> {
        self.root.as_ref()
    }

    /// Builds the tree from a dataset, replacing any previous fit.
    ///
    /// # Errors
    ///
    /// Fails when rows of features and labels differ, when the dataset is
    /// empty, or when a classification label is not a class index.
    pub fn fit(&mut self, dataset: &Dataset<XT, f64>) -> Result<String, TreeError> {
        dataset.check_shape()?;
        if dataset.nrows() == 0 {
            return Err(TreeError::EmptyDataset);
        }
        let criterion = self.tree_params.criterion();
        info!(
            "Fitting a {} tree on {} rows and {} features.",
            criterion,
            dataset.nrows(),
            dataset.ncols()
        );

        let (labels, n_classes) = if criterion.is_classification() {
            let n_classes = self
                .tree_params
                .n_classes()
                .or(self.n_classes)
                .unwrap_or_else(|| count_classes(&dataset.y));
            (one_hot_encode(n_classes, &dataset.y)?, Some(n_classes))
        } else {
            (
                DMatrix::from_column_slice(dataset.nrows(), 1, dataset.y.as_slice()),
                None,
            )
        };

        let root = TreeBuilder::new(&dataset.x, &labels, &self.tree_params).build();
        self.depth = root.depth();
        self.n_classes = n_classes;
        self.n_features = dataset.ncols();
        self.root = Some(root);

        info!(
            "Finished building the tree: depth {}, {} leaves.",
            self.depth,
            self.n_leaves()
        );
        Ok("Finished building the tree.".into())
    }

    /// Fits on a feature matrix and a single-column label matrix.
    pub fn fit_columns(&mut self, x: &DMatrix<XT>, y: &DMatrix<f64>) -> Result<String, TreeError> {
        let dataset = Dataset::from_label_column(x.clone(), y.clone())?;
        self.fit(&dataset)
    }

    fn fitted_root(&self, features: &DMatrix<XT>) -> Result<&TreeNode<XT>, TreeError> {
        let root = self.root.as_ref().ok_or(TreeError::NotFitted)?;
        if features.ncols() != self.n_features {
            return Err(TreeError::FeatureCountMismatch {
                expected: self.n_features,
                found: features.ncols(),
            });
        }
        Ok(root)
    }

    /// Predicts one value per row: the class index for classification trees,
    /// the leaf's mean or median for regression trees.
    ///
    /// # Errors
    ///
    /// Fails when the tree wasn't built yet or the column count differs from training.
    pub fn predict(&self, prediction_features: &DMatrix<XT>) -> Result<DVector<f64>, TreeError> {
        let root = self.fitted_root(prediction_features)?;
        let predictions = prediction_features
            .row_iter()
            .map(|row| root.predict_row(&row.into_owned()));

        Ok(DVector::from_iterator(
            prediction_features.nrows(),
            predictions,
        ))
    }

    /// Predicts class probabilities, one row of `n_classes` values per input row.
    ///
    /// # Errors
    ///
    /// Fails with [`TreeError::InvalidOperation`] on regression trees, and
    /// like [`predict`](Self::predict) otherwise.
    pub fn predict_proba(
        &self,
        prediction_features: &DMatrix<XT>,
    ) -> Result<DMatrix<f64>, TreeError> {
        if !self.is_classification() {
            return Err(TreeError::InvalidOperation(format!(
                "predict_proba is only available for classification, criterion is {}.",
                self.tree_params.criterion()
            )));
        }
        let root = self.fitted_root(prediction_features)?;
        let n_classes = self.n_classes.ok_or(TreeError::NotFitted)?;

        let mut probabilities = DMatrix::zeros(prediction_features.nrows(), n_classes);
        for (index, row) in prediction_features.row_iter().enumerate() {
            let leaf = root.leaf_for(&row.into_owned());
            let leaf_probabilities = leaf.probabilities().ok_or_else(|| {
                TreeError::InvalidOperation("reached a leaf without probabilities.".into())
            })?;
            probabilities
                .row_mut(index)
                .copy_from(&leaf_probabilities.transpose());
        }
        Ok(probabilities)
    }
}
