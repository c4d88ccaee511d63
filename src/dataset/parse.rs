// src/dataset/parse.rs

use tracing::{debug, instrument, trace};

use super::error::FormatError;
use super::header::parse_header;
use super::types::Dataset;

/// Strip surrounding line breaks and whitespace plus any trailing periods.
fn normalize(raw: &str) -> &str {
    raw.trim().trim_end_matches('.').trim()
}

/// Split on LF or CRLF.
fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l))
}

/// Parse a tabular text block: a header line of `name[R,Type]` tokens
/// followed by comma-separated data rows.
///
/// Cells are kept as raw text; see [`Dataset::typed_rows`] for conversion.
#[instrument(level = "debug", skip(raw), fields(raw_len = raw.len()))]
pub fn parse_dataset(raw: &str, name: Option<&str>) -> Result<Dataset, FormatError> {
    let text = normalize(raw);
    if text.is_empty() {
        return Err(FormatError::EmptyInput);
    }

    let mut lines = lines(text);
    let header = lines.next().ok_or(FormatError::EmptyInput)?;
    let columns = parse_header(header)?;
    debug!(columns = columns.len(), "Parsed header");

    let mut rows = Vec::new();
    for (i, line) in lines.enumerate() {
        let cells: Vec<String> = line.split(',').map(str::to_string).collect();
        if cells.len() != columns.len() {
            return Err(FormatError::RowArityMismatch {
                row: i + 1,
                expected: columns.len(),
                found: cells.len(),
            });
        }
        trace!(row = i + 1, "Parsed row");
        rows.push(cells);
    }

    debug!(rows = rows.len(), "Finished dataset parsing");
    Dataset::new(name.map(str::to_string), columns, rows)
}

/// Parse `raw` and push the result onto `collection`, which is left
/// untouched when parsing fails.
pub fn append_dataset<'a>(
    collection: &'a mut Vec<Dataset>,
    raw: &str,
    name: Option<&str>,
) -> Result<&'a Dataset, FormatError> {
    let dataset = parse_dataset(raw, name)?;
    collection.push(dataset);
    Ok(&collection[collection.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::types::{Role, ValueType};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_two_columns_two_rows() {
        let ds = parse_dataset("a[I,String],b[M,Number]\nx,1\ny,2", None).unwrap();
        let roles: Vec<_> = ds.columns().iter().map(|c| c.role).collect();
        let types: Vec<_> = ds.columns().iter().map(|c| c.ty).collect();
        assert_eq!(roles, vec![Role::Identifier, Role::Measure]);
        assert_eq!(types, vec![ValueType::String, ValueType::Number]);
        assert_eq!(ds.rows(), &[vec!["x", "1"], vec!["y", "2"]]);
        assert_eq!(ds.name(), None);
    }

    #[test]
    fn test_normalization() {
        let raw = "\r\n\n  id[I,String],v[M,Number]\r\nx,1\r\ny,2.\n\n";
        let ds = parse_dataset(raw, Some("ds1")).unwrap();
        assert_eq!(ds.name(), Some("ds1"));
        assert_eq!(ds.rows(), &[vec!["x", "1"], vec!["y", "2"]]);
    }

    #[test]
    fn test_cells_kept_verbatim() {
        let ds = parse_dataset("a[I,String],b[M,Number]\n x , 1.50 \n,", None).unwrap();
        assert_eq!(ds.rows(), &[vec![" x ", " 1.50 "], vec!["", ""]]);
    }

    #[test]
    fn test_trailing_periods_stripped() {
        let ds = parse_dataset("a[I,String],b[M,Number]\nx,1.5\ny,2...\n", None).unwrap();
        assert_eq!(ds.rows(), &[vec!["x", "1.5"], vec!["y", "2"]]);
    }

    #[test]
    fn test_parallel_parses_agree() {
        let raw = "region[I,String],year[I,String],count[M,Number],flag[A,String]\n0101,2016,30342,\n0104,2016,27230,p";
        let expected = parse_dataset(raw, Some("population")).unwrap();
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(move || parse_dataset(raw, Some("population"))))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), expected);
        }
    }

    #[test]
    fn test_header_only() {
        let ds = parse_dataset("a[I,String]", None).unwrap();
        assert_eq!(ds.columns().len(), 1);
        assert!(ds.rows().is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_dataset("", None).unwrap_err(), FormatError::EmptyInput);
        assert_eq!(
            parse_dataset("\r\n \n.", None).unwrap_err(),
            FormatError::EmptyInput
        );
    }

    #[test]
    fn test_malformed_header() {
        let err = parse_dataset("foo[X,String]\na", None).unwrap_err();
        assert!(matches!(err, FormatError::MalformedHeader { .. }));
        assert!(err.to_string().starts_with("invalid header format"));
    }

    #[test]
    fn test_row_arity_mismatch() {
        let err = parse_dataset("a[I,String],b[M,Number]\nx,1\nonly,one,extra", None).unwrap_err();
        assert_eq!(
            err,
            FormatError::RowArityMismatch {
                row: 2,
                expected: 2,
                found: 3
            }
        );
        assert!(err
            .to_string()
            .starts_with("row size inconsistent with header"));
    }

    #[test]
    fn test_idempotent() {
        let raw = "a[I,String],b[M,Number],c[A,String]\nx,1,p\ny,2,q";
        assert_eq!(
            parse_dataset(raw, Some("d")).unwrap(),
            parse_dataset(raw, Some("d")).unwrap()
        );
    }

    #[test]
    fn test_append_dataset() {
        let mut collection = Vec::new();
        let added = append_dataset(&mut collection, "a[I,String]\nx", Some("first")).unwrap();
        assert_eq!(added.name(), Some("first"));

        assert!(append_dataset(&mut collection, "a[I,String]\nx,y", None).is_err());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_parse_from_file() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(
            file,
            "region[I,String],year[I,String],count[M,Number]\r\n0101,2016,30342\r\n0104,2016,27230\r\n"
        )?;
        let text = std::fs::read_to_string(file.path())?;
        let ds = parse_dataset(&text, Some("population"))?;
        assert_eq!(ds.columns_with_role(Role::Identifier).count(), 2);
        assert_eq!(ds.rows().len(), 2);
        Ok(())
    }
}
