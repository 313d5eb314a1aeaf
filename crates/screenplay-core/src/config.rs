#![forbid(unsafe_code)]

//! Command store configuration.
//!
//! [`StoreConfig`] carries the tunables of a record store. Defaults suit a
//! single terminal window; every field can be overridden from the
//! environment with [`StoreConfig::from_env`]:
//!
//! | Variable | Field |
//! |---|---|
//! | `SCREENPLAY_STORE_INITIAL_CAPACITY` | `initial_capacity` |
//! | `SCREENPLAY_STORE_MAX_ROWS` | `max_rows` |
//! | `SCREENPLAY_RECORD_MAX_LEN` | `max_record_len` |
//!
//! Unparseable values are ignored and the default is kept.

/// Default floor size of a store's region, in bytes.
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

/// Default sanity ceiling on the number of live records.
pub const DEFAULT_MAX_ROWS: usize = 4096;

/// Default maximum payload length of a single record, in bytes.
pub const DEFAULT_MAX_RECORD_LEN: usize = 1024;

/// Smallest region a store will ever be created with.
pub const MIN_INITIAL_CAPACITY: usize = 16;

/// Configuration for a command store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Floor capacity of the region. The store starts here and `clear`
    /// returns to it.
    pub initial_capacity: usize,
    /// Sanity ceiling on live records. Appends beyond it are refused and a
    /// count above it is reported as corruption.
    pub max_rows: usize,
    /// Longest accepted record payload, in bytes.
    pub max_record_len: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_rows: DEFAULT_MAX_ROWS,
            max_record_len: DEFAULT_MAX_RECORD_LEN,
        }
    }
}

impl StoreConfig {
    /// Create a configuration with the given floor capacity and defaults
    /// for everything else.
    #[must_use]
    pub fn new(initial_capacity: usize) -> Self {
        Self::default().with_initial_capacity(initial_capacity)
    }

    /// Defaults overridden by `SCREENPLAY_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// [`from_env`](Self::from_env) uses the process environment; tests pass
    /// a closure over a fixed table instead.
    #[must_use]
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str| lookup(key).and_then(|v| v.trim().parse::<usize>().ok());
        if let Some(v) = parse("SCREENPLAY_STORE_INITIAL_CAPACITY") {
            self = self.with_initial_capacity(v);
        }
        if let Some(v) = parse("SCREENPLAY_STORE_MAX_ROWS") {
            self.max_rows = v;
        }
        if let Some(v) = parse("SCREENPLAY_RECORD_MAX_LEN") {
            self.max_record_len = v;
        }
        self
    }

    /// Set the floor capacity, clamped to [`MIN_INITIAL_CAPACITY`].
    #[must_use]
    pub fn with_initial_capacity(mut self, bytes: usize) -> Self {
        self.initial_capacity = bytes.max(MIN_INITIAL_CAPACITY);
        self
    }

    /// Set the live-record ceiling.
    #[must_use]
    pub fn with_max_rows(mut self, rows: usize) -> Self {
        self.max_rows = rows;
        self
    }

    /// Set the longest accepted payload.
    #[must_use]
    pub fn with_max_record_len(mut self, bytes: usize) -> Self {
        self.max_record_len = bytes;
        self
    }

    /// A configuration without practical row or length limits (for testing).
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_rows: usize::MAX,
            max_record_len: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn table(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn config_default() {
        let c = StoreConfig::default();
        assert_eq!(c.initial_capacity, DEFAULT_INITIAL_CAPACITY);
        assert_eq!(c.max_rows, DEFAULT_MAX_ROWS);
        assert_eq!(c.max_record_len, DEFAULT_MAX_RECORD_LEN);
    }

    #[test]
    fn initial_capacity_is_clamped() {
        assert_eq!(StoreConfig::new(0).initial_capacity, MIN_INITIAL_CAPACITY);
        assert_eq!(StoreConfig::new(4096).initial_capacity, 4096);
    }

    #[test]
    fn overrides_apply() {
        let c = StoreConfig::default().apply_overrides(table(&[
            ("SCREENPLAY_STORE_INITIAL_CAPACITY", "64"),
            ("SCREENPLAY_STORE_MAX_ROWS", " 10 "),
            ("SCREENPLAY_RECORD_MAX_LEN", "80"),
        ]));
        assert_eq!(c, StoreConfig::new(64).with_max_rows(10).with_max_record_len(80));
    }

    #[test]
    fn unparseable_overrides_are_ignored() {
        let c = StoreConfig::default().apply_overrides(table(&[
            ("SCREENPLAY_STORE_MAX_ROWS", "lots"),
            ("SCREENPLAY_RECORD_MAX_LEN", "-3"),
        ]));
        assert_eq!(c, StoreConfig::default());
    }

    #[test]
    fn override_capacity_is_clamped() {
        let c = StoreConfig::default()
            .apply_overrides(table(&[("SCREENPLAY_STORE_INITIAL_CAPACITY", "1")]));
        assert_eq!(c.initial_capacity, MIN_INITIAL_CAPACITY);
    }

    #[test]
    fn config_unlimited() {
        let c = StoreConfig::unlimited();
        assert_eq!(c.max_rows, usize::MAX);
        assert_eq!(c.max_record_len, usize::MAX);
    }
}
