// src/validate/types.rs

use serde::{Deserialize, Serialize};
use tracing::warn;

/// One finding reported by the validation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based.
    pub line: u32,
    /// 0-based.
    pub column: u32,
    pub message: String,
}

/// 0-based editor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub ch: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

/// Editor marker spanning the range a diagnostic points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub from: Position,
    pub to: Position,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    /// One column wide marker at `(line - 1, column)`.
    /// `None` when `line` is 0, which no editor line maps to.
    pub fn to_marker(&self) -> Option<Marker> {
        let line = self.line.checked_sub(1)?;
        Some(Marker {
            from: Position {
                line,
                ch: self.column,
            },
            to: Position {
                line,
                ch: self.column.saturating_add(1),
            },
            message: self.message.clone(),
            severity: Severity::Error,
        })
    }
}

/// Map diagnostics to markers in order, dropping those with no valid line.
pub fn to_markers(diagnostics: &[Diagnostic]) -> Vec<Marker> {
    diagnostics
        .iter()
        .filter_map(|d| {
            let marker = d.to_marker();
            if marker.is_none() {
                warn!(column = d.column, message = %d.message, "dropping diagnostic with line 0");
            }
            marker
        })
        .collect()
}
