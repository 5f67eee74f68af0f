//! Cross-validated hyperparameter search

pub mod combinations;
pub mod grid;
pub mod progress;
pub mod split;

pub use self::combinations::{cross_combinations, expand_grid, validate_grid};
pub use self::grid::{best_entry, validate_search, GridSearch, GridSearchEntry, GridSearchResult};
pub use self::progress::{estimate_remaining, Progress, ProgressTracker};
pub use self::split::{split, split_dataset};
