#![allow(dead_code)]
//! Shared test utilities for integration tests.
//!
//! - fixture loading (`tests/fixtures/*.json`)
//! - assertion helpers with better failure messages

use std::path::PathBuf;

use sui_replay_inspect::types::wire::ReplayResult;
use sui_replay_inspect::parse_replay;

/// Fixture directory path relative to the project root.
pub const FIXTURE_DIR: &str = "tests/fixtures";

/// Absolute path of a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join(FIXTURE_DIR)
        .join(name)
}

/// Raw JSON text of a fixture.
///
/// # Panics
///
/// Panics if the fixture does not exist.
pub fn fixture_text(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("fixture {} should be readable: {}", name, e))
}

/// Parse a fixture as a replay result.
pub fn load_replay(name: &str) -> ReplayResult {
    assert_ok(parse_replay(&fixture_text(name)), name)
}

/// Assert that a result is Ok and return the inner value.
pub fn assert_ok<T, E: std::fmt::Debug>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("{} failed: {:?}", context, e),
    }
}

/// Assert that an error message contains expected text (case-insensitive).
pub fn assert_error_contains<E: std::fmt::Display>(error: E, expected_text: &str, context: &str) {
    let error_str = error.to_string().to_lowercase();
    assert!(
        error_str.contains(&expected_text.to_lowercase()),
        "{}: error message should contain '{}', got: {}",
        context,
        expected_text,
        error
    );
}
