/// Classification scores
pub mod confusion;
/// Regression errors
pub mod errors;
