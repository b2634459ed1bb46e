#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use mcc_model::{DictionaryEntry, MccType};

use crate::error::DictionaryError;
use crate::source::DictionarySource;

/// Reads the dictionary from a CSV export.
///
/// Expected headers (case-insensitive): `code`, `name`, `type`, and
/// optionally `id` and `exclusion`. The file is re-read on every fetch so
/// a reload picks up edits.
#[derive(Debug, Clone)]
pub struct CsvDictionarySource {
    path: PathBuf,
}

impl CsvDictionarySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DictionarySource for CsvDictionarySource {
    fn fetch_all_dictionary_entries(&self) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        parse_dictionary_csv(&self.path)
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}

fn header_index(headers: &::csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
}

fn require_index(
    path: &Path,
    headers: &::csv::StringRecord,
    names: &[&str],
) -> Result<usize, DictionaryError> {
    header_index(headers, names).ok_or_else(|| DictionaryError::MissingColumn {
        path: path.to_path_buf(),
        column: names[0].to_string(),
    })
}

fn get_string(row: &::csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| row.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parses a dictionary CSV file into entries, in file order.
pub fn parse_dictionary_csv(path: &Path) -> Result<Vec<DictionaryEntry>, DictionaryError> {
    let bytes = std::fs::read(path).map_err(|e| DictionaryError::io(path, e))?;
    parse_dictionary_csv_bytes(path, bytes.as_slice())
}

/// Parses dictionary CSV content; `path` is used for error messages only.
pub fn parse_dictionary_csv_bytes(
    path: &Path,
    bytes: &[u8],
) -> Result<Vec<DictionaryEntry>, DictionaryError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| DictionaryError::csv(path, e.to_string()))?
        .clone();

    let idx_id = header_index(&headers, &["id"]);
    let idx_code = require_index(path, &headers, &["code", "mcc_code"])?;
    let idx_name = require_index(path, &headers, &["name", "mcc_name"])?;
    let idx_type = require_index(path, &headers, &["type", "mcc_type"])?;
    let idx_exclusion = header_index(&headers, &["exclusion", "exclusion_raw", "exclusions"]);

    let mut entries = Vec::new();
    for (row_idx, row) in reader.records().enumerate() {
        let row = row.map_err(|e| DictionaryError::csv(path, e.to_string()))?;
        // Header is line 1.
        let line = row_idx + 2;

        let raw_type = get_string(&row, Some(idx_type)).unwrap_or_default();
        let mcc_type: MccType = raw_type
            .parse()
            .map_err(|e| DictionaryError::csv(path, format!("line {line}: {e}")))?;

        let id = match get_string(&row, idx_id) {
            Some(raw) => raw.parse::<i64>().map_err(|e| {
                DictionaryError::csv(path, format!("line {line}: invalid id '{raw}': {e}"))
            })?,
            None => (row_idx + 1) as i64,
        };

        entries.push(DictionaryEntry {
            id,
            code: get_string(&row, Some(idx_code)),
            name: get_string(&row, Some(idx_name)),
            exclusion_raw: get_string(&row, idx_exclusion),
            mcc_type,
        });
    }

    tracing::debug!(path = %path.display(), entries = entries.len(), "parsed dictionary CSV");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        parse_dictionary_csv_bytes(Path::new("test.csv"), content.as_bytes())
    }

    #[test]
    fn parses_rows_in_order() {
        let entries = parse(
            "ID,Code,Name,Exclusion,Type\n\
             1,I50.000,心力衰竭,\"I48.000, I49.900\",MCC\n\
             2,J18.900,肺炎,,cc\n",
        )
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].exclusion_raw(), Some("I48.000, I49.900"));
        assert_eq!(entries[1].exclusion_raw, None);
        assert_eq!(entries[1].mcc_type, MccType::Cc);
    }

    #[test]
    fn id_defaults_to_row_number() {
        let entries = parse("code,name,type\nI50.000,心力衰竭,MCC\nJ18.900,肺炎,CC\n").unwrap();
        assert_eq!(entries[0].id, 1);
        assert_eq!(entries[1].id, 2);
    }

    #[test]
    fn unknown_type_names_the_line() {
        let err = parse("code,name,type\nI50.000,心力衰竭,MAJOR\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn missing_type_column_is_rejected() {
        let err = parse("code,name\nI50.000,心力衰竭\n").unwrap_err();
        assert!(matches!(err, DictionaryError::MissingColumn { ref column, .. } if column == "type"));
    }
}
