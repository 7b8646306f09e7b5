//! Tabular (CSV) decoding.
//!
//! The header row supplies field names (trimmed); every following row becomes
//! one [`Record`] with its cells kept as text. The delimiter is sniffed from a
//! sample of the decoded text.

use csv::ReaderBuilder;
use serde_json::Value;

use super::record::Record;
use crate::constants::{CSV_DELIMITER_CANDIDATES, CSV_SNIFF_SAMPLE_CHARS};

/// Guess the field delimiter of `text`.
///
/// Looks at the whole lines within the first [`CSV_SNIFF_SAMPLE_CHARS`]
/// characters and counts each candidate outside double quotes. A candidate
/// that appears the same non-zero number of times on every sampled line is
/// preferred (highest count first, then list order). Failing that, the
/// candidate most frequent on the header line wins, and `,` is the last
/// resort.
#[must_use]
pub fn sniff_delimiter(text: &str, candidates: &[u8]) -> u8 {
    let lines = sample_lines(text);
    let Some(header) = lines.first() else {
        return b',';
    };

    let mut best_consistent: Option<(u8, usize)> = None;
    for &candidate in candidates {
        let counts: Vec<usize> =
            lines.iter().map(|line| count_unquoted(line, candidate)).collect();
        let first = counts[0];
        if first > 0
            && counts.iter().all(|&c| c == first)
            && best_consistent.is_none_or(|(_, best)| first > best)
        {
            best_consistent = Some((candidate, first));
        }
    }
    if let Some((delimiter, _)) = best_consistent {
        return delimiter;
    }

    candidates
        .iter()
        .map(|&candidate| (candidate, count_unquoted(header, candidate)))
        .filter(|&(_, count)| count > 0)
        // max_by_key keeps the last maximum; reverse so list order breaks ties
        .rev()
        .max_by_key(|&(_, count)| count)
        .map_or(b',', |(candidate, _)| candidate)
}

fn sample_lines(text: &str) -> Vec<&str> {
    let cut = text.char_indices().nth(CSV_SNIFF_SAMPLE_CHARS).map_or(text.len(), |(i, _)| i);
    let sample = &text[..cut];
    let truncated = cut < text.len();

    let mut lines: Vec<&str> = sample.lines().filter(|l| !l.trim().is_empty()).collect();
    // Drop a partial trailing line unless it is all we have
    if truncated && lines.len() > 1 && !sample.ends_with('\n') {
        lines.pop();
    }
    lines
}

fn count_unquoted(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for byte in line.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
        } else if byte == delimiter && !in_quotes {
            count += 1;
        }
    }
    count
}

/// Parse decoded CSV text into records.
///
/// Every cell is kept. Short rows fill the missing columns with `null`; cells
/// beyond the header become `column_<n>` (1-based position). A blank header
/// also becomes `column_<n>`, and a repeated header name gets a `_<k>`
/// suffix (`amount`, `amount_2`, ...). A file without a header row, or with
/// only a header row, yields no records.
///
/// # Errors
///
/// Returns a human-readable reason when the CSV is malformed, including a
/// quoted field that is never closed.
pub fn parse_records(text: &str, delimiter: u8) -> Result<Vec<Record>, String> {
    if let Some(line) = unterminated_quote_line(text, delimiter) {
        return Err(format!("malformed CSV at line {line}: quoted field is never closed"));
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let raw_headers: Vec<String> = reader
        .headers()
        .map_err(describe_csv_error)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if raw_headers.iter().all(String::is_empty) {
        return Ok(Vec::new());
    }
    let headers = field_keys(&raw_headers);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(describe_csv_error)?;
        if row.iter().all(|cell| cell.trim().is_empty()) && row.len() <= 1 {
            continue;
        }

        let mut record = Record::new();
        for (i, header) in headers.iter().enumerate() {
            let value = row.get(i).map_or(Value::Null, |cell| Value::String(cell.to_string()));
            record.insert(header.clone(), value);
        }
        for (i, cell) in row.iter().enumerate().skip(headers.len()) {
            let key = unique_key(format!("column_{}", i + 1), |k| record.contains(k));
            record.insert(key, cell.to_string());
        }
        records.push(record);
    }

    Ok(records)
}

/// One distinct record key per header cell.
fn field_keys(headers: &[String]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::with_capacity(headers.len());
    for (i, header) in headers.iter().enumerate() {
        let base =
            if header.is_empty() { format!("column_{}", i + 1) } else { header.clone() };
        let key = unique_key(base, |k| keys.iter().any(|taken| taken == k));
        keys.push(key);
    }
    keys
}

/// `base`, or `base_2`, `base_3`, ... for the first name not `taken`.
fn unique_key(base: String, taken: impl Fn(&str) -> bool) -> String {
    if !taken(&base) {
        return base;
    }
    let mut k = 2;
    loop {
        let candidate = format!("{base}_{k}");
        if !taken(&candidate) {
            return candidate;
        }
        k += 1;
    }
}

/// Line on which a quoted field opens and is never closed.
///
/// Follows the reader's quoting rules: a field is quoted only when `"` is its
/// first character, and `""` inside a quoted field is an escaped quote.
fn unterminated_quote_line(text: &str, delimiter: u8) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut line = 1;
    let mut field_start = true;
    let mut open_since: Option<usize> = None;
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        if open_since.is_some() {
            if byte == b'"' {
                if bytes.get(i + 1) == Some(&b'"') {
                    i += 1;
                } else {
                    open_since = None;
                }
            }
            field_start = false;
        } else if field_start && byte == b'"' {
            open_since = Some(line);
            field_start = false;
        } else {
            field_start = byte == delimiter || byte == b'\n' || byte == b'\r';
        }
        if byte == b'\n' {
            line += 1;
        }
        i += 1;
    }
    open_since
}

/// Sniff the delimiter of `text` and parse it.
///
/// # Errors
///
/// See [`parse_records`].
pub fn parse_text(text: &str) -> Result<(u8, Vec<Record>), String> {
    let delimiter = sniff_delimiter(text, CSV_DELIMITER_CANDIDATES);
    tracing::debug!("Sniffed CSV delimiter {:?}", delimiter as char);
    parse_records(text, delimiter).map(|records| (delimiter, records))
}

fn describe_csv_error(error: csv::Error) -> String {
    match error.position() {
        Some(pos) => format!("malformed CSV at line {}: {}", pos.line(), error),
        None => format!("malformed CSV: {error}"),
    }
}
