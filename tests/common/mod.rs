//! Shared fixtures for integration tests.

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;
