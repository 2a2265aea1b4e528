use nalgebra::{DMatrix, DVector};
use num_traits::{FromPrimitive, Num, ToPrimitive};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use std::cmp::PartialOrd;
use std::fmt::{Debug, Display};
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use crate::error::TreeError;

pub trait DataValue:
    Debug
    + Clone
    + Copy
    + Num
    + FromPrimitive
    + ToPrimitive
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Send
    + Sync
    + Display
    + 'static
{
}

impl<T> DataValue for T where
    T: Debug
        + Clone
        + Copy
        + Num
        + FromPrimitive
        + ToPrimitive
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
        + Send
        + Sync
        + Display
        + 'static
{
}

/// Feature values: anything numeric that can be ordered against a threshold.
pub trait Number: DataValue + PartialOrd {}
impl<T> Number for T where T: DataValue + PartialOrd {}

pub trait TargetValue: DataValue {}
impl<T> TargetValue for T where T: DataValue {}

/// Feature matrix paired with one label per row.
pub struct Dataset<XT: Number, YT: TargetValue> {
    pub x: DMatrix<XT>,
    pub y: DVector<YT>,
}

impl<XT: Number, YT: TargetValue> Dataset<XT, YT> {
    pub fn new(x: DMatrix<XT>, y: DVector<YT>) -> Self {
        Self { x, y }
    }

    /// Builds a dataset from a label column, i.e. a matrix with exactly one
    /// column and as many rows as `x`.
    pub fn from_label_column(x: DMatrix<XT>, y: DMatrix<YT>) -> Result<Self, TreeError> {
        if y.ncols() != 1 {
            return Err(TreeError::LabelRank(y.ncols()));
        }
        let dataset = Self::new(x, y.column(0).into_owned());
        dataset.check_shape()?;
        Ok(dataset)
    }

    /// Fails when features and labels disagree on the number of rows.
    pub fn check_shape(&self) -> Result<(), TreeError> {
        if self.x.nrows() != self.y.len() {
            return Err(TreeError::ShapeMismatch {
                features: self.x.nrows(),
                labels: self.y.len(),
            });
        }
        Ok(())
    }

    pub fn nrows(&self) -> usize {
        self.x.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.x.ncols()
    }

    /// Copies the given rows, in order, into a new dataset.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self::new(self.x.select_rows(indices), self.y.select_rows(indices))
    }

    /// Shuffles the rows and splits them into a train and a test dataset.
    ///
    /// `train_size` is the fraction of rows that end up in the train set.
    pub fn train_test_split(
        &self,
        train_size: f64,
        seed: Option<u64>,
    ) -> Result<(Self, Self), TreeError> {
        if !(0.0..=1.0).contains(&train_size) {
            return Err(TreeError::InvalidParameter {
                name: "train_size".to_string(),
                expected: "a value between 0.0 and 1.0".to_string(),
                found: train_size.to_string(),
            });
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut indices = (0..self.x.nrows()).collect::<Vec<_>>();
        indices.shuffle(&mut rng);
        let train_size = (self.x.nrows() as f64 * train_size).floor() as usize;
        let (train_indices, test_indices) = indices.split_at(train_size);

        Ok((
            self.select_rows(train_indices),
            self.select_rows(test_indices),
        ))
    }

    /// Splits the rows on `x[feature_index] < threshold` (left) versus
    /// `x[feature_index] >= threshold` (right).
    pub fn split_on_threshold(&self, feature_index: usize, threshold: XT) -> (Self, Self) {
        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = (0..self.x.nrows())
            .partition(|&index| self.x[(index, feature_index)] < threshold);

        (
            self.select_rows(&left_indices),
            self.select_rows(&right_indices),
        )
    }
}
