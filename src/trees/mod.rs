/// Recursive tree construction
pub mod builder;
/// Impurity and dispersion criteria
pub mod criterion;
/// Decision tree model
pub mod decision_tree;
/// Split and leaf nodes
pub mod node;
/// Tree hyperparameters
pub mod params;
/// Best split search
pub mod splitter;
