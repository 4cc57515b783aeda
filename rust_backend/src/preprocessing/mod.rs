pub mod config;
pub mod pipeline;
pub mod validator;

pub use config::PreprocessConfig;
pub use pipeline::{preprocess_tables, PreprocessPipeline, PreprocessResult};
pub use validator::{TableValidator, ValidationResult, ValidationStats};
