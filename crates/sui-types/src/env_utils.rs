//! Environment variable parsing utilities.
//!
//! Type-safe helpers for reading configuration from the environment with
//! default values, replacing the usual boilerplate:
//!
//! ```ignore
//! std::env::var("VAR_NAME")
//!     .ok()
//!     .and_then(|v| v.parse::<u32>().ok())
//!     .unwrap_or(default_value)
//! ```
//!
//! # Example
//!
//! ```
//! use sui_replay_types::env_utils::{env_bool_or, env_var, env_var_or};
//!
//! let decimals: u32 = env_var_or("SUI_REPLAY_DECIMALS", 9);
//! let threads: Option<usize> = env_var("SUI_REPLAY_THREADS");
//! let json = env_bool_or("SUI_REPLAY_JSON", false);
//! ```

use std::str::FromStr;

/// Parse an environment variable into a type that implements `FromStr`.
///
/// Returns `None` if the variable is not set or cannot be parsed.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Parse an environment variable with a default value.
///
/// Returns the default if the variable is not set or cannot be parsed.
pub fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    env_var(key).unwrap_or(default)
}

/// Check if an environment variable is set to a truthy value, with a default.
///
/// "1", "true", "yes" and "on" (case-insensitive) are truthy; any other set
/// value is false.
pub fn env_bool_or(key: &str, default: bool) -> bool {
    match std::env::var(key).ok() {
        Some(v) => matches!(
            v.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        None => default,
    }
}

/// Get an environment variable as a string with a default value.
pub fn env_string_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_parsing() {
        std::env::set_var("REPLAY_TEST_U32", " 42 ");
        let val: Option<u32> = env_var("REPLAY_TEST_U32");
        assert_eq!(val, Some(42));

        let missing: Option<u32> = env_var("REPLAY_NONEXISTENT_VAR_1");
        assert_eq!(missing, None);

        std::env::remove_var("REPLAY_TEST_U32");
    }

    #[test]
    fn test_env_var_or() {
        std::env::set_var("REPLAY_TEST_DEFAULT", "not-a-number");
        let val: usize = env_var_or("REPLAY_TEST_DEFAULT", 4);
        assert_eq!(val, 4);

        let default_val: u32 = env_var_or("REPLAY_NONEXISTENT_VAR_2", 9);
        assert_eq!(default_val, 9);

        std::env::remove_var("REPLAY_TEST_DEFAULT");
    }

    #[test]
    fn test_env_bool_or() {
        std::env::set_var("REPLAY_TEST_BOOL_YES", "YES");
        std::env::set_var("REPLAY_TEST_BOOL_OFF", "off");

        assert!(env_bool_or("REPLAY_TEST_BOOL_YES", false));
        assert!(!env_bool_or("REPLAY_TEST_BOOL_OFF", true));
        assert!(env_bool_or("REPLAY_NONEXISTENT_VAR_3", true));

        std::env::remove_var("REPLAY_TEST_BOOL_YES");
        std::env::remove_var("REPLAY_TEST_BOOL_OFF");
    }

    #[test]
    fn test_env_string_or() {
        std::env::set_var("REPLAY_TEST_STRING", "MIST");
        assert_eq!(env_string_or("REPLAY_TEST_STRING", "SUI"), "MIST");
        assert_eq!(env_string_or("REPLAY_NONEXISTENT_VAR_4", "SUI"), "SUI");
        std::env::remove_var("REPLAY_TEST_STRING");
    }
}
