//! CSV ingest into typed columns.
//!
//! This module turns a delimited text file into a [`Table`] holding only the
//! columns the caller asked for, each with an element type inferred from data.
//!
//! Rules:
//! - **Header match** is exact (after stripping a UTF-8 BOM): a requested name
//!   that is not in the header never appears in the output
//! - **Type inference** happens once, on the first data row: integer grammar
//!   wins, then float grammar, then text. A selected column the first row
//!   leaves out is an integer column
//! - **No re-inference**: later rows are converted to the fixed type. Integer
//!   and float columns read the leading numeric part of a field (`4.2` in an
//!   integer column becomes `4`); a field with no numeric part is an error
//! - **Single pass**: the file is streamed line by line and closed on every
//!   exit path

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{Column, ColumnKind, Table};
use crate::io::row::split_row;

/// Ingest failures.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open CSV '{}': {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid CSV at line {line}: {reason}")]
    InvalidCsv { line: usize, reason: String },
    #[error("missing requested column(s): {}", .0.join(", "))]
    MissingTarget(Vec<String>),
    #[error("non-numeric value '{value}' in {kind} column `{column}` at line {line}")]
    NonNumericValue {
        column: String,
        kind: ColumnKind,
        line: usize,
        value: String,
    },
    #[error("dataset has a header row but no data rows")]
    EmptyDataset,
}

/// Configurable table loader.
///
/// ```no_run
/// use linfit::io::TableLoader;
///
/// let table = TableLoader::new()
///     .delimiter(';')
///     .require_all(true)
///     .load("data/houses.csv", &["area", "price"])?;
/// # Ok::<(), linfit::io::LoadError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TableLoader {
    delimiter: char,
    require_all: bool,
}

impl Default for TableLoader {
    fn default() -> Self {
        Self {
            delimiter: ',',
            require_all: false,
        }
    }
}

/// Load the selected columns of a comma-delimited file.
pub fn load_table<S: AsRef<str>>(path: impl AsRef<Path>, selected: &[S]) -> Result<Table, LoadError> {
    TableLoader::new().load(path, selected)
}

impl TableLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Fail with [`LoadError::MissingTarget`] when a requested name is not in the header.
    ///
    /// Off by default: missing names are simply left out of the table.
    pub fn require_all(mut self, require_all: bool) -> Self {
        self.require_all = require_all;
        self
    }

    pub fn load<S: AsRef<str>>(&self, path: impl AsRef<Path>, selected: &[S]) -> Result<Table, LoadError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading CSV");

        let file = File::open(path).map_err(|source| LoadError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        self.read(BufReader::new(file), selected)
    }

    /// Parse from any buffered reader (the file-less half of [`TableLoader::load`]).
    ///
    /// Bytes that are not valid UTF-8 are replaced with `U+FFFD`, so a stray
    /// Latin-1 field never blocks the columns around it.
    pub fn read<R: BufRead, S: AsRef<str>>(&self, mut reader: R, selected: &[S]) -> Result<Table, LoadError> {
        let mut slots: Vec<Slot> = Vec::new();
        // Field position -> index into `slots`.
        let mut positions: HashMap<usize, usize> = HashMap::new();
        let mut header_seen = false;
        let mut header_width = 0usize;
        let mut data_rows = 0usize;
        let mut short_rows = 0usize;
        let mut lossy_lines = 0usize;
        let mut buf = Vec::new();
        let mut line_no = 0usize;

        loop {
            buf.clear();
            let read = reader.read_until(b'\n', &mut buf).map_err(|e| LoadError::InvalidCsv {
                line: line_no + 1,
                reason: e.to_string(),
            })?;
            if read == 0 {
                break;
            }
            line_no += 1;
            if buf.last() == Some(&b'\n') {
                buf.pop();
            }

            let line = String::from_utf8_lossy(&buf);
            if matches!(line, Cow::Owned(_)) {
                lossy_lines += 1;
            }
            if line.trim().is_empty() {
                continue;
            }

            let fields = split_row(&line, self.delimiter);

            if !header_seen {
                header_seen = true;
                map_header(&fields, selected, &mut slots, &mut positions);
                header_width = positions.keys().max().map_or(0, |max| max + 1);
                if self.require_all {
                    let missing: Vec<String> = selected
                        .iter()
                        .map(|s| s.as_ref())
                        .filter(|name| !slots.iter().any(|slot| slot.name == *name))
                        .map(str::to_string)
                        .collect();
                    if !missing.is_empty() {
                        return Err(LoadError::MissingTarget(missing));
                    }
                }
                continue;
            }

            data_rows += 1;
            if fields.len() < header_width {
                short_rows += 1;
            }

            for (pos, raw) in fields.iter().enumerate() {
                let Some(&slot_idx) = positions.get(&pos) else {
                    continue;
                };
                slots[slot_idx].push(raw, line_no)?;
            }

            // Types are fixed by the first data row; columns it left out stay Int.
            if data_rows == 1 {
                for slot in slots.iter_mut().filter(|slot| slot.column.is_none()) {
                    debug!(column = %slot.name, "no value on the first data row; column stays int");
                    slot.column = Some(Column::empty(ColumnKind::Int));
                }
            }
        }

        if !header_seen {
            return Err(LoadError::InvalidCsv {
                line: 1,
                reason: "missing header row".to_string(),
            });
        }
        if data_rows == 0 {
            return Err(LoadError::EmptyDataset);
        }
        if short_rows > 0 {
            warn!(short_rows, "rows without a value for every selected column; column lengths may differ");
        }
        if lossy_lines > 0 {
            warn!(lossy_lines, "lines with invalid UTF-8 were decoded lossily");
        }

        let mut table = Table::new();
        for slot in slots {
            let column = slot.column.unwrap_or_else(|| Column::empty(ColumnKind::Int));
            if column.is_empty() {
                warn!(column = %slot.name, "selected column never received a value");
            }
            table.insert(slot.name, column);
        }

        info!(rows = data_rows, columns = table.len(), "CSV loaded");
        Ok(table)
    }
}

/// A reserved output column: untyped until the first data row.
#[derive(Debug)]
struct Slot {
    name: String,
    column: Option<Column>,
}

impl Slot {
    fn push(&mut self, raw: &str, line: usize) -> Result<(), LoadError> {
        let column = self.column.get_or_insert_with(|| {
            let kind = classify(raw);
            debug!(column = %self.name, %kind, "inferred column type");
            Column::empty(kind)
        });

        match column {
            Column::Int(values) => {
                let v = parse_int_prefix(raw).ok_or_else(|| non_numeric(&self.name, ColumnKind::Int, line, raw))?;
                values.push(v);
            }
            Column::Float(values) => {
                let v = parse_float_prefix(raw)
                    .ok_or_else(|| non_numeric(&self.name, ColumnKind::Float, line, raw))?;
                values.push(v);
            }
            Column::Text(values) => values.push(raw.to_string()),
        }
        Ok(())
    }
}

fn non_numeric(column: &str, kind: ColumnKind, line: usize, value: &str) -> LoadError {
    warn!(column, %kind, line, value, "value is not a valid integer or float");
    LoadError::NonNumericValue {
        column: column.to_string(),
        kind,
        line,
        value: value.to_string(),
    }
}

fn map_header<S: AsRef<str>>(
    fields: &[String],
    selected: &[S],
    slots: &mut Vec<Slot>,
    positions: &mut HashMap<usize, usize>,
) {
    for (pos, field) in fields.iter().enumerate() {
        let name = normalize_header_name(field, pos);
        if !selected.iter().any(|s| s.as_ref() == name) {
            continue;
        }
        if slots.iter().any(|slot| slot.name == name) {
            warn!(column = name, position = pos, "duplicate header; keeping the first occurrence");
            continue;
        }
        positions.insert(pos, slots.len());
        slots.push(Slot {
            name: name.to_string(),
            column: None,
        });
    }
}

fn normalize_header_name(name: &str, pos: usize) -> &str {
    // Spreadsheet exports often prefix the first header with a BOM.
    if pos == 0 {
        name.trim_start_matches('\u{feff}')
    } else {
        name
    }
}

/// Pick a column type from its first data value.
pub fn classify(raw: &str) -> ColumnKind {
    if is_integer(raw) {
        ColumnKind::Int
    } else if is_float(raw) {
        ColumnKind::Float
    } else {
        ColumnKind::Text
    }
}

/// Optional sign followed by one or more ASCII digits, nothing else.
pub fn is_integer(s: &str) -> bool {
    let digits = strip_sign(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Optional sign, digits with exactly one `.`, at least one digit.
pub fn is_float(s: &str) -> bool {
    let body = strip_sign(s);
    let mut saw_digit = false;
    let mut saw_dot = false;
    for b in body.bytes() {
        match b {
            b'0'..=b'9' => saw_digit = true,
            b'.' if !saw_dot => saw_dot = true,
            _ => return false,
        }
    }
    saw_digit && saw_dot
}

fn strip_sign(s: &str) -> &str {
    s.strip_prefix(['+', '-']).unwrap_or(s)
}

/// Read the leading integer of `s` (leading whitespace and sign allowed).
///
/// Returns `None` when there is no digit or the value overflows `i64`.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digit_len = s[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    if digit_len == 0 {
        return None;
    }
    s[..sign_len + digit_len].parse::<i64>().ok()
}

/// Read the leading floating-point number of `s`.
///
/// Accepts `[sign] digits [. digits] [e [sign] digits]` as well as `inf`,
/// `infinity` and `nan` (any case). Returns `None` when no number starts `s`.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(s.starts_with(['+', '-']));

    let rest = s[end..].to_ascii_lowercase();
    for word in ["infinity", "inf", "nan"] {
        if rest.starts_with(word) {
            return s[..end + word.len()].parse::<f64>().ok();
        }
    }

    let int_digits = bytes[end..].iter().take_while(|b| b.is_ascii_digit()).count();
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = bytes[end + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = bytes[exp_end..].iter().take_while(|b| b.is_ascii_digit()).count();
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use super::*;

    fn read(csv: &str, selected: &[&str]) -> Result<Table, LoadError> {
        TableLoader::new().read(Cursor::new(csv), selected)
    }

    #[test]
    fn grammar_classification() {
        assert_eq!(classify("42"), ColumnKind::Int);
        assert_eq!(classify("-7"), ColumnKind::Int);
        assert_eq!(classify("+3.25"), ColumnKind::Float);
        assert_eq!(classify(".5"), ColumnKind::Float);
        assert_eq!(classify("1e5"), ColumnKind::Text);
        assert_eq!(classify("1.2.3"), ColumnKind::Text);
        assert_eq!(classify("-"), ColumnKind::Text);
        assert_eq!(classify(""), ColumnKind::Text);
        assert_eq!(classify("."), ColumnKind::Text);
    }

    #[test]
    fn numeric_prefixes() {
        assert_eq!(parse_int_prefix("4.2"), Some(4));
        assert_eq!(parse_int_prefix(" -12abc"), Some(-12));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("99999999999999999999"), None);
        assert_eq!(parse_float_prefix("2.5kg"), Some(2.5));
        assert_eq!(parse_float_prefix("7"), Some(7.0));
        assert_eq!(parse_float_prefix("1e3x"), Some(1000.0));
        assert_eq!(parse_float_prefix("3e"), Some(3.0));
        assert!(parse_float_prefix("NaN").is_some_and(f64::is_nan));
        assert_eq!(parse_float_prefix("-inf"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix(""), None);
    }

    #[test]
    fn infers_types_from_first_data_row() {
        let csv = "id,name,score,area\n1,\"Smith, J\",3.5,10\n2,Doe,4,20\n";
        let table = read(csv, &["id", "name", "score", "area"]).unwrap();

        assert_eq!(table.get("id"), Some(&Column::Int(vec![1, 2])));
        assert_eq!(
            table.get("name"),
            Some(&Column::Text(vec!["Smith, J".to_string(), "Doe".to_string()]))
        );
        assert_eq!(table.get("score"), Some(&Column::Float(vec![3.5, 4.0])));
        assert_eq!(table.get("area"), Some(&Column::Int(vec![10, 20])));
    }

    #[test]
    fn integer_column_stays_integer() {
        let csv = "n\n42\n4.2\n-3\n";
        let table = read(csv, &["n"]).unwrap();
        assert_eq!(table.get("n"), Some(&Column::Int(vec![42, 4, -3])));
    }

    #[test]
    fn only_header_matches_are_returned() {
        let csv = "a,b\n1,2\n";
        let table = read(csv, &["b", "zzz"]).unwrap();
        assert_eq!(table.names(), vec!["b"]);
        assert!(!table.contains("zzz"));
        assert!(!table.contains("a"));
    }

    #[test]
    fn require_all_reports_missing_names() {
        let err = TableLoader::new()
            .require_all(true)
            .read(Cursor::new("a,b\n1,2\n"), &["a", "x", "y"])
            .unwrap_err();
        match err {
            LoadError::MissingTarget(names) => assert_eq!(names, vec!["x", "y"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_value_in_numeric_column() {
        let err = read("x\n1\n\"n/a\"\n", &["x"]).unwrap_err();
        match err {
            LoadError::NonNumericValue { column, kind, line, value } => {
                assert_eq!(column, "x");
                assert_eq!(kind, ColumnKind::Int);
                assert_eq!(line, 3);
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn integer_overflow_is_logged_as_invalid_value() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("ingest.log");
        let config = crate::logging::LogConfig {
            file: Some(log.clone()),
            ..Default::default()
        };

        let err = {
            let _guard = crate::logging::scoped(&config).unwrap();
            read("n\n1\n99999999999999999999\n", &["n"]).unwrap_err()
        };
        assert!(matches!(err, LoadError::NonNumericValue { line: 3, .. }));

        let text = std::fs::read_to_string(&log).unwrap();
        assert!(text.contains("value is not a valid integer or float"));
        assert!(!text.contains("no numeric part"));
    }

    #[test]
    fn header_only_is_empty_dataset() {
        assert!(matches!(read("a,b\n", &["a"]), Err(LoadError::EmptyDataset)));
        assert!(matches!(read("", &["a"]), Err(LoadError::InvalidCsv { line: 1, .. })));
    }

    #[test]
    fn short_rows_and_blank_lines_are_tolerated() {
        let csv = "a,b\r\n1,2\r\n\r\n3\r\n";
        let table = read(csv, &["a", "b"]).unwrap();
        assert_eq!(table.get("a"), Some(&Column::Int(vec![1, 3])));
        assert_eq!(table.get("b"), Some(&Column::Int(vec![2])));
    }

    #[test]
    fn bom_and_custom_delimiter() {
        let csv = "\u{feff}x;y\n1,5;\"a;b\"\n";
        let table = TableLoader::new().delimiter(';').read(Cursor::new(csv), &["x", "y"]).unwrap();
        assert_eq!(table.get("x"), Some(&Column::Text(vec!["1,5".to_string()])));
        assert_eq!(table.get("y"), Some(&Column::Text(vec!["a;b".to_string()])));
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let bytes: &[u8] = b"x,name\n1,Jos\xe9\n2,Ana\n";
        let table = TableLoader::new().read(Cursor::new(bytes), &["x", "name"]).unwrap();
        assert_eq!(table.get("x"), Some(&Column::Int(vec![1, 2])));
        assert_eq!(
            table.get("name"),
            Some(&Column::Text(vec!["Jos\u{fffd}".to_string(), "Ana".to_string()]))
        );
    }

    #[test]
    fn column_missing_from_first_row_stays_integer() {
        let table = read("a,b\n1\n2,3.5\n", &["a", "b"]).unwrap();
        assert_eq!(table.get("a"), Some(&Column::Int(vec![1, 2])));
        assert_eq!(table.get("b"), Some(&Column::Int(vec![3])));

        let err = read("a,b\n1\n2,abc\n", &["a", "b"]).unwrap_err();
        assert!(matches!(err, LoadError::NonNumericValue { kind: ColumnKind::Int, line: 3, .. }));
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let err = load_table("/definitely/not/here.csv", &["a"]).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "x,y\n1.5,3\n2.5,5\n").unwrap();

        let table = load_table(file.path(), &["x", "y"]).unwrap();
        assert_eq!(table.get("x"), Some(&Column::Float(vec![1.5, 2.5])));
        assert_eq!(table.get("y"), Some(&Column::Int(vec![3, 5])));
    }
}
