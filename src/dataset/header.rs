// src/dataset/header.rs

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::error::FormatError;
use super::types::{Column, Role, ValueType};

/// Separator between column tokens. It swallows the closing bracket of
/// every token except the last one.
const COLUMN_SEPARATOR: &str = "],";

/// `name[R,Type]` with an optional closing bracket.
static COLUMN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([0-9A-Za-z_]+)\[([IMA]),(String|Number)\]?\s*$")
        .expect("column pattern should compile")
});

/// Parse one header token such as `region[I,String` or `count[M,Number]`.
pub fn parse_column(token: &str) -> Result<Column, FormatError> {
    let malformed = || FormatError::MalformedHeader {
        token: token.to_string(),
    };
    let caps = COLUMN_RE.captures(token).ok_or_else(malformed)?;

    let role = Role::from_code(&caps[2]).ok_or_else(malformed)?;
    let ty = ValueType::from_name(&caps[3]).ok_or_else(malformed)?;
    trace!(name = &caps[1], %role, %ty, "Parsed column");

    Ok(Column::new(&caps[1], role, ty))
}

/// Parse a whole header line into its columns, in declaration order.
pub fn parse_header(line: &str) -> Result<Vec<Column>, FormatError> {
    let tokens: Vec<&str> = line.split(COLUMN_SEPARATOR).collect();
    if tokens.is_empty() || line.trim().is_empty() {
        return Err(FormatError::MalformedHeader {
            token: line.to_string(),
        });
    }
    tokens.into_iter().map(parse_column).collect()
}

/// Render columns back into the header syntax accepted by [`parse_header`].
pub fn render_header(columns: &[Column]) -> String {
    columns
        .iter()
        .map(|c| format!("{}[{},{}]", c.name, c.role.code(), c.ty))
        .collect::<Vec<_>>()
        .join(",")
}
