//! The Config structure stores configuration values in a hash map
//! that can be easily passed to data processing functions as a single variable.

// dependencies
use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::str::FromStr;

/// The Config struct gathers configuration values from environment variables,
/// falling back to defaults, and stores them in hash maps organized by data type.
/// Supported data types include bool, usize and f64.
///
/// By convention, Config objects are named `cfg`.
#[derive(Debug, Default)]
pub struct Config {
    pub bool:  HashMap<String, bool>,
    pub usize: HashMap<String, usize>,
    pub f64:   HashMap<String, f64>,
}
impl Config {
    /// Create a new empty Config instance.
    pub fn new() -> Self {
        Self::default()
    }
    /* ------------------------------------------------------------------
    environment variable setters, optional values with defaults
    ------------------------------------------------------------------ */
    /// Set a bool configuration value from an environment variable, or
    /// to `default` if the variable is not set or is empty.
    /// Accepts TRUE/true/T/1 and FALSE/false/F/0.
    /// Panic if the variable is set but cannot be parsed as bool.
    pub fn set_bool_env_or(&mut self, key: &str, default: bool) {
        let value = match Self::get_env_option(key) {
            Some(value_str) => Self::parse_env_bool(key, &value_str),
            None => default,
        };
        self.bool.insert(key.to_string(), value);
    }
    /// Set a usize configuration value from an environment variable, or
    /// to `default` if the variable is not set or is empty.
    /// Panic if the variable is set but cannot be parsed as usize.
    pub fn set_usize_env_or(&mut self, key: &str, default: usize) {
        let value = match Self::get_env_option(key) {
            Some(value_str) => Self::parse_env_string(key, &value_str, "usize"),
            None => default,
        };
        self.usize.insert(key.to_string(), value);
    }
    /// Set an f64 configuration value from an environment variable, or
    /// to `default` if the variable is not set or is empty.
    /// Panic if the variable is set but cannot be parsed as f64.
    pub fn set_f64_env_or(&mut self, key: &str, default: f64) {
        let value = match Self::get_env_option(key) {
            Some(value_str) => Self::parse_env_string(key, &value_str, "f64"),
            None => default,
        };
        self.f64.insert(key.to_string(), value);
    }
    /* ------------------------------------------------------------------
    environment variable helpers
    ------------------------------------------------------------------ */
    // get an environment variable, treating an empty value as unset
    fn get_env_option(key: &str) -> Option<String> {
        Self::clean_env_value(env::var_os(key))
    }
    fn clean_env_value(value: Option<OsString>) -> Option<String> {
        value
            .map(|value| value.to_string_lossy().trim().to_string())
            .filter(|value| !value.is_empty())
    }
    // parse an environment variable string into the desired data type
    fn parse_env_string<T: FromStr>(key: &str, value: &str, data_type: &str) -> T {
        match value.parse::<T>() {
            Ok(parsed_value) => parsed_value,
            Err(_) => panic!("Environment variable {key} string value '{value}' could not be parsed as {data_type}."),
        }
    }
    // parse an environment variable string as an R-like or integer boolean flag
    fn parse_env_bool(key: &str, value: &str) -> bool {
        match value {
            "TRUE"  | "true"  | "T" | "1" => true,
            "FALSE" | "false" | "F" | "0" => false,
            _ => panic!("Environment variable {key} string value '{value}' could not be parsed as bool."),
        }
    }
    /* ------------------------------------------------------------------
    config variable getters
    ------------------------------------------------------------------ */
    /// Get a bool configuration value by key. Panic if the key is not found.
    pub fn get_bool(&self, key: &str) -> bool {
        *self.bool.get(key).unwrap_or_else(|| Self::key_not_found(key, "bool"))
    }
    /// Get a usize configuration value by key. Panic if the key is not found.
    pub fn get_usize(&self, key: &str) -> usize {
        *self.usize.get(key).unwrap_or_else(|| Self::key_not_found(key, "usize"))
    }
    /// Get an f64 configuration value by key. Panic if the key is not found.
    pub fn get_f64(&self, key: &str) -> f64 {
        *self.f64.get(key).unwrap_or_else(|| Self::key_not_found(key, "f64"))
    }
    /* ------------------------------------------------------------------
    config getter helpers
    ------------------------------------------------------------------ */
    fn key_not_found<T>(key: &str, data_type: &str) -> T {
        panic!("Config key {key} not found in {data_type} value map.")
    }
}
