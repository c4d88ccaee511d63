// src/dataset/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::FormatError;

/// Media type of the JSON form of a [`Dataset`].
pub const DATASET_JSON_MEDIA_TYPE: &str = "application/ssb.dataset+json";

/// What a column means to the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Identifier,
    Measure,
    Attribute,
}

impl Role {
    /// Map a one-letter header code (`I`, `M`, `A`) to a role.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "I" => Some(Role::Identifier),
            "M" => Some(Role::Measure),
            "A" => Some(Role::Attribute),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            Role::Identifier => 'I',
            Role::Measure => 'M',
            Role::Attribute => 'A',
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Identifier => "IDENTIFIER",
            Role::Measure => "MEASURE",
            Role::Attribute => "ATTRIBUTE",
        })
    }
}

/// Declared primitive type of a column's values.
///
/// The header syntax uses the bare name (`String`, `Number`); the JSON form
/// carries the qualified primitive identifier and also accepts the bare one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    #[serde(rename = "java.lang.String", alias = "String")]
    String,
    #[serde(rename = "java.lang.Number", alias = "Number")]
    Number,
}

impl ValueType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "String" => Some(ValueType::String),
            "Number" => Some(ValueType::Number),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueType::String => "String",
            ValueType::Number => "Number",
        }
    }

    /// Qualified identifier used in the JSON form.
    pub fn qualified_name(self) -> &'static str {
        match self {
            ValueType::String => "java.lang.String",
            ValueType::Number => "java.lang.Number",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single column definition as declared in the header line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub role: Role,
    #[serde(rename = "type")]
    pub ty: ValueType,
}

impl Column {
    pub fn new(name: impl Into<String>, role: Role, ty: ValueType) -> Self {
        Self {
            name: name.into(),
            role,
            ty,
        }
    }
}

/// A converted cell, see [`Dataset::typed_rows`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Number(f64),
    Null,
}

/// One parsed tabular text block: ordered columns plus rows of raw cells.
///
/// Every row holds exactly `columns().len()` cells and there is at least one
/// column; both are checked on construction and on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    name: Option<String>,
    #[serde(rename = "structure")]
    columns: Vec<Column>,
    #[serde(rename = "data")]
    rows: Vec<Vec<String>>,
}

#[derive(Deserialize)]
struct RawDataset {
    #[serde(default)]
    name: Option<String>,
    structure: Vec<Column>,
    #[serde(default)]
    data: Vec<Vec<String>>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = FormatError;

    fn try_from(raw: RawDataset) -> Result<Self, Self::Error> {
        Dataset::new(raw.name, raw.structure, raw.data)
    }
}

impl Dataset {
    pub fn new(
        name: Option<String>,
        columns: Vec<Column>,
        rows: Vec<Vec<String>>,
    ) -> Result<Self, FormatError> {
        if columns.is_empty() {
            return Err(FormatError::MalformedHeader {
                token: String::new(),
            });
        }
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != columns.len())
        {
            return Err(FormatError::RowArityMismatch {
                row: i + 1,
                expected: columns.len(),
                found: row.len(),
            });
        }
        Ok(Self {
            name,
            columns,
            rows,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn columns_with_role(&self, role: Role) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter().filter(move |c| c.role == role)
    }

    /// Convert every cell according to its column's declared type.
    ///
    /// `String` cells are kept verbatim. `Number` cells are trimmed and parsed
    /// as `f64`; an empty one becomes [`Value::Null`].
    pub fn typed_rows(&self) -> Result<Vec<Vec<Value>>, FormatError> {
        self.rows
            .iter()
            .enumerate()
            .map(|(r, row)| {
                row.iter()
                    .zip(&self.columns)
                    .map(|(cell, col)| convert_cell(cell, col, r + 1))
                    .collect()
            })
            .collect()
    }
}

fn convert_cell(cell: &str, col: &Column, row: usize) -> Result<Value, FormatError> {
    match col.ty {
        ValueType::String => Ok(Value::String(cell.to_string())),
        ValueType::Number => {
            let v = cell.trim();
            if v.is_empty() {
                return Ok(Value::Null);
            }
            // NaN and infinities parse as f64 but are not dataset numbers
            match v.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Value::Number(n)),
                _ => Err(FormatError::InvalidNumber {
                    row,
                    column: col.name.clone(),
                    value: cell.to_string(),
                }),
            }
        }
    }
}
