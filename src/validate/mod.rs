//! Client side of the remote validation service: post source text, get back
//! `{line, column, message}` diagnostics, map them to editor markers.

pub mod client;
pub mod error;
pub mod types;

pub use client::ValidationClient;
pub use error::ValidationServiceError;
pub use types::{to_markers, Diagnostic, Marker, Position, Severity};
