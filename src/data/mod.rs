/// Feature/label containers and row selection
pub mod dataset;
/// One-hot label encoding
pub mod encoding;
