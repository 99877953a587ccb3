//! Shared infrastructure: terminal output, progress bars, cache writes and hashing.

pub mod fs_utils;
pub mod hash;
pub mod output;
pub mod progress;
