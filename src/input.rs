//! Input adapters: normalize free text and CSV files into candidate
//! identifier lists. Filtering is permissive per line/row and never aborts
//! the whole submission; rejected entries are logged and skipped.

use std::io::Read;

use csv::ReaderBuilder;
use tracing::warn;

/// A line/cell qualifies as a candidate when it is 12 or 13 ASCII decimal
/// digits after trimming. Both bare and check-digit-included forms are
/// accepted; the encoder settles the difference later.
pub fn is_candidate(value: &str) -> bool {
    let len = value.len();
    (len == 12 || len == 13) && value.bytes().all(|b| b.is_ascii_digit())
}

/// Split free text on newlines and keep candidate-shaped lines, in order.
pub fn candidates_from_text(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| {
            if line.is_empty() {
                return false;
            }
            if is_candidate(line) {
                true
            } else {
                warn!(line = *line, "dropping line: not 12 or 13 decimal digits");
                false
            }
        })
        .map(str::to_string)
        .collect()
}

/// Extract candidates from one column of a CSV stream (`column` is
/// 0-based). Rows that are short, empty, or malformed are skipped with a
/// warning; a row-level parse error never stops the remaining rows.
pub fn candidates_from_csv<R: Read>(reader: R, column: usize) -> Vec<String> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut candidates = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let row = index + 1;
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                warn!(row, error = %err, "skipping unparsable row");
                continue;
            }
        };
        let Some(cell) = record.get(column) else {
            warn!(row, "skipping row: missing column {}", column + 1);
            continue;
        };
        let value = cell.trim();
        if value.is_empty() {
            warn!(row, "skipping row: empty value in column {}", column + 1);
            continue;
        }
        if is_candidate(value) {
            candidates.push(value.to_string());
        } else {
            warn!(row, value, "skipping row: not 12 or 13 decimal digits");
        }
    }
    candidates
}
