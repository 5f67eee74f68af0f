//! LibSVM text format reader
//!
//! Each line is `label index:value index:value ...` with 1-based indices.
//! Sparse rows are densified to the largest index seen in the file, so
//! missing entries read as 0.
//!
//! Example:
//! +1 1:0.5 3:1.2 7:0.8
//! -1 2:0.3 5:2.1

use crate::core::{Dataset, Result, Sample, SelectionError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One parsed line: label and `(zero_based_index, value)` entries
type SparseRow = (f64, Vec<(usize, f64)>);

/// Load a dataset from a LibSVM format file
pub fn read_libsvm<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let file = File::open(path)?;
    parse_libsvm(BufReader::new(file))
}

/// Parse LibSVM lines from any buffered reader
///
/// Blank lines and lines starting with `#` are skipped. Labels are kept as
/// written.
pub fn parse_libsvm<R: BufRead>(reader: R) -> Result<Dataset> {
    let mut rows = Vec::new();
    let mut dimensions = 0;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let row = parse_line(line).map_err(|e| {
            SelectionError::ParseError(format!("line {}: {}", line_num + 1, e))
        })?;
        if let Some(max) = row.1.iter().map(|&(i, _)| i + 1).max() {
            dimensions = dimensions.max(max);
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(SelectionError::InvalidArgument(
            "LibSVM input contains no samples".to_string(),
        ));
    }

    let samples = rows
        .into_iter()
        .map(|(label, entries)| {
            let mut features = vec![0.0; dimensions];
            for (index, value) in entries {
                features[index] = value;
            }
            Sample::new(features, label)
        })
        .collect();
    Dataset::new(samples)
}

fn parse_line(line: &str) -> std::result::Result<SparseRow, String> {
    let mut parts = line.split_whitespace();
    let label_str = parts.next().ok_or("empty line")?;
    let label = label_str
        .parse::<f64>()
        .map_err(|_| format!("invalid label: {label_str}"))?;

    let entries = parts
        .map(|entry| {
            let (index, value) = entry
                .split_once(':')
                .ok_or_else(|| format!("invalid feature format: {entry}"))?;
            let index = index
                .parse::<usize>()
                .map_err(|_| format!("invalid feature index: {index}"))?;
            let value = value
                .parse::<f64>()
                .map_err(|_| format!("invalid feature value: {value}"))?;
            if index == 0 {
                return Err("feature indices start at 1".to_string());
            }
            Ok((index - 1, value))
        })
        .collect::<std::result::Result<Vec<_>, String>>()?;

    Ok((label, entries))
}
