//! Dataset readers
//!
//! Two on-disk formats are understood: LibSVM sparse text and a JSON array
//! of `[[features], label]` pairs.

pub mod json;
pub mod libsvm;

pub use self::json::{parse_json, read_json};
pub use self::libsvm::{parse_libsvm, read_libsvm};

use crate::core::{Dataset, Result};
use log::debug;
use std::path::Path;

/// Read a dataset, choosing the format from the file extension
///
/// `.json` files are parsed as JSON; anything else as LibSVM.
pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let dataset = if is_json {
        read_json(path)?
    } else {
        read_libsvm(path)?
    };
    debug!(
        "Loaded {} samples with {} features from {}",
        dataset.len(),
        dataset.dim(),
        path.display()
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_dispatch_on_extension() {
        let mut json = Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("Failed to create temp file");
        write!(json, "[[[0.5, 1.0], 2]]").expect("Failed to write");
        json.flush().expect("Failed to flush");

        let mut libsvm = Builder::new()
            .suffix(".ds")
            .tempfile()
            .expect("Failed to create temp file");
        writeln!(libsvm, "2 1:0.5 2:1.0").expect("Failed to write");
        libsvm.flush().expect("Failed to flush");

        let from_json = read_dataset(json.path()).unwrap();
        let from_libsvm = read_dataset(libsvm.path()).unwrap();
        assert_eq!(from_json, from_libsvm);
    }

    #[test]
    fn test_missing_file() {
        assert!(read_dataset("/nonexistent/data.json").is_err());
    }
}
