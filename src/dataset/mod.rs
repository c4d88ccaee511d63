//! Inline tabular text blocks: a header of `name[R,Type]` column tokens
//! followed by comma-separated rows, parsed into a [`Dataset`].

pub mod error;
pub mod header;
pub mod parse;
pub mod types;

pub use error::FormatError;
pub use header::{parse_column, parse_header, render_header};
pub use parse::{append_dataset, parse_dataset};
pub use types::{Column, Dataset, Role, Value, ValueType, DATASET_JSON_MEDIA_TYPE};
