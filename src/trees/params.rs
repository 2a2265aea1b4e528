use crate::error::TreeError;
use crate::trees::criterion::Criterion;

/// Hyperparameters of a [`DecisionTree`](crate::trees::decision_tree::DecisionTree).
#[derive(Clone, Debug)]
pub struct TreeParams {
    criterion: Criterion,
    n_classes: Option<usize>,
    max_depth: Option<usize>,
    min_samples_split: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeParams {
    /// Gini criterion, inferred class count, unbounded depth, `min_samples_split = 2`.
    pub fn new() -> Self {
        Self {
            criterion: Criterion::Gini,
            n_classes: None,
            max_depth: None,
            min_samples_split: 2,
        }
    }

    /// Sets the criterion from its name; fails on anything but
    /// `gini`, `entropy`, `variance` or `mad_median`.
    pub fn set_criterion(&mut self, criterion_name: &str) -> Result<(), TreeError> {
        self.criterion = criterion_name.parse()?;
        Ok(())
    }

    pub fn set_n_classes(&mut self, n_classes: Option<usize>) -> Result<(), TreeError> {
        if n_classes == Some(0) {
            return Err(TreeError::InvalidParameter {
                name: "n_classes".to_string(),
                expected: "at least 1".to_string(),
                found: "0".to_string(),
            });
        }
        self.n_classes = n_classes;
        Ok(())
    }

    /// `None` grows the tree until no split is possible. `Some(0)` yields a single leaf.
    pub fn set_max_depth(&mut self, max_depth: Option<usize>) {
        self.max_depth = max_depth;
    }

    pub fn set_min_samples_split(&mut self, min_samples_split: usize) -> Result<(), TreeError> {
        if min_samples_split < 2 {
            return Err(TreeError::InvalidParameter {
                name: "min_samples_split".to_string(),
                expected: "at least 2".to_string(),
                found: min_samples_split.to_string(),
            });
        }
        self.min_samples_split = min_samples_split;
        Ok(())
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    pub fn n_classes(&self) -> Option<usize> {
        self.n_classes
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn min_samples_split(&self) -> usize {
        self.min_samples_split
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = TreeParams::default();
        assert_eq!(params.criterion(), Criterion::Gini);
        assert_eq!(params.n_classes(), None);
        assert_eq!(params.max_depth(), None);
        assert_eq!(params.min_samples_split(), 2);
    }

    #[test]
    fn test_set_criterion() {
        let mut params = TreeParams::new();
        params.set_criterion("mad_median").unwrap();
        assert_eq!(params.criterion(), Criterion::MadMedian);

        let error = params.set_criterion("gain").unwrap_err();
        assert!(matches!(error, TreeError::UnknownCriterion(name) if name == "gain"));
        assert_eq!(params.criterion(), Criterion::MadMedian);
    }

    #[test]
    fn test_invalid_values() {
        let mut params = TreeParams::new();
        assert!(params.set_min_samples_split(1).is_err());
        assert!(params.set_n_classes(Some(0)).is_err());
        assert!(params.set_min_samples_split(5).is_ok());
        assert_eq!(params.min_samples_split(), 5);
    }

    #[test]
    fn test_invalid_value_names_the_parameter() {
        let error = TreeParams::new().set_min_samples_split(1).unwrap_err();
        match &error {
            TreeError::InvalidParameter {
                name,
                expected,
                found,
            } => {
                assert_eq!(name, "min_samples_split");
                assert_eq!(expected, "at least 2");
                assert_eq!(found, "1");
            }
            other => panic!("expected an invalid parameter error, got {:?}", other),
        }
        assert_eq!(
            error.to_string(),
            "Invalid parameter value passed for min_samples_split, expected at least 2 but 1 provided."
        );
    }

    #[test]
    fn test_zero_max_depth_is_allowed() {
        let mut params = TreeParams::new();
        params.set_max_depth(Some(0));
        assert_eq!(params.max_depth(), Some(0));
    }
}
