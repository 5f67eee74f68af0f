//! Core types, configuration and traits

pub mod config;
pub mod error;
pub mod params;
pub mod traits;
pub mod types;

pub use self::config::*;
pub use self::error::*;
pub use self::params::*;
pub use self::traits::*;
pub use self::types::*;
