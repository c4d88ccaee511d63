pub mod config;
pub mod dataset;
pub mod validate;

pub use config::Config;
pub use dataset::{parse_dataset, Dataset, FormatError};
pub use validate::{ValidationClient, ValidationServiceError};
