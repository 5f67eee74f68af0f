//! JSON dataset reader: an array of `[[features...], label]` pairs

use crate::core::{Dataset, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let file = File::open(path)?;
    let pairs: Vec<(Vec<f64>, f64)> = serde_json::from_reader(BufReader::new(file))?;
    Dataset::from_pairs(pairs)
}

pub fn parse_json(json: &str) -> Result<Dataset> {
    let pairs: Vec<(Vec<f64>, f64)> = serde_json::from_str(json)?;
    Dataset::from_pairs(pairs)
}
