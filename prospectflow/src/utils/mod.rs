//! Utility functions for timestamp handling.

pub mod timestamps;

pub use timestamps::{iso_timestamp, iso_timestamp_of, now_utc, Timestamp};
