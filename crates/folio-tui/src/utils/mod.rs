//! Utility functions for string formatting.

pub mod format;

pub use format::{format_date, format_optional, format_period, join_tags, truncate_string};
