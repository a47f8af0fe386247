//! Foundation crate for engine-tune.
//!
//! Holds the error taxonomy shared by every crate, the user-facing
//! output macros, and home-relative path resolution.

pub mod error;
pub mod output_macros;
pub mod user_paths;

pub use error::{Operation, Result, TuneError};
