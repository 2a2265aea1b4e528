use csv::ReaderBuilder;
use nalgebra::{DMatrix, DVector};
use rusty_tree::data::dataset::Dataset;
use rusty_tree::error::TreeError;
use rusty_tree::metrics::confusion::ClassificationMetrics;
use rusty_tree::metrics::errors::RegressionMetrics;
use rusty_tree::trees::decision_tree::DecisionTree;
use std::collections::HashMap;
use std::error::Error;
use std::{env, process};

const USAGE: &str = "Usage: fit-tree <file.csv> <gini|entropy|variance|mad_median> [max_depth]";

fn parse_value(field: &str) -> Result<f64, TreeError> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|_| TreeError::Parse(field.to_string()))
}

/// Reads a CSV with a header row whose last column is the target.
///
/// Class names are mapped to indices in order of first appearance.
fn read_file(file_path: &str, classification: bool) -> Result<Dataset<f64, f64>, TreeError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(file_path)?;
    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut label_map = HashMap::new();
    let mut dimension = None;

    for result in reader.records() {
        let record = result?;
        let n_features = record.len().saturating_sub(1);
        let width = *dimension.get_or_insert(n_features);
        if n_features != width || width == 0 {
            return Err(TreeError::InvalidParameter {
                name: "row width".to_string(),
                expected: format!("{} features and a label", width),
                found: record.len().to_string(),
            });
        }

        for feature in record.iter().take(width) {
            features.push(parse_value(feature)?);
        }

        let label = &record[width];
        if classification {
            let next_id = label_map.len();
            labels.push(*label_map.entry(label.to_string()).or_insert(next_id) as f64);
        } else {
            labels.push(parse_value(label)?);
        }
    }

    let nrows = labels.len();
    let feature_matrix = DMatrix::from_row_slice(nrows, dimension.unwrap_or(0), &features);
    Ok(Dataset::new(feature_matrix, DVector::from_vec(labels)))
}

fn run(args: &[String]) -> Result<String, Box<dyn Error>> {
    let (file_path, criterion) = match args {
        [_, file_path, criterion, ..] => (file_path, criterion),
        _ => return Err(USAGE.into()),
    };
    let max_depth = args.get(3).map(|depth| depth.parse::<usize>()).transpose()?;

    let mut tree = DecisionTree::with_params(Some(criterion.as_str()), None, max_depth, None)?;
    let dataset = read_file(file_path, tree.is_classification())?;
    println!("Loaded {} rows with {} features.", dataset.nrows(), dataset.ncols());

    let (train_dataset, test_dataset) = dataset.train_test_split(0.75, Some(42))?;
    println!("{}", tree.fit(&train_dataset)?);
    println!("Depth: {}, leaves: {}", tree.depth(), tree.n_leaves());

    let predictions = tree.predict(&test_dataset.x)?;
    if tree.is_classification() {
        let accuracy = tree.accuracy(&test_dataset.y, &predictions)?;
        Ok(format!("Accuracy: {}%", accuracy * 100.0))
    } else {
        let mse = tree.mse(&test_dataset.y, &predictions)?;
        Ok(format!("Predictions MSE: {}", mse))
    }
}

fn main() {
    let args = env::args().collect::<Vec<_>>();
    match run(&args) {
        Ok(report) => println!("{}", report),
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}
