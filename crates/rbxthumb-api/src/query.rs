//! Query-string builder for thumbnail requests.
//!
//! Unset values are never written, so the server falls back to its own
//! defaults instead of receiving an empty or `null` parameter.

use rbxthumb_core::{ThumbnailOptions, UniverseThumbnailOptions};
use std::fmt::Display;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one `key=value` pair
    pub fn push(&mut self, key: &'static str, value: impl Display) -> &mut Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Append `key=value` only when a value is present
    pub fn push_opt<T: Display>(&mut self, key: &'static str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Append one pair per id, e.g. `assetIds=1&assetIds=2`
    pub fn push_ids(&mut self, key: &'static str, ids: &[u64]) -> &mut Self {
        for id in ids {
            self.push(key, id);
        }
        self
    }

    /// Append the formatting options; `returnPolicy` only when `with_policy` is set
    pub fn push_options(&mut self, options: &ThumbnailOptions, with_policy: bool) -> &mut Self {
        if with_policy {
            self.push_opt("returnPolicy", options.return_policy);
        }
        self.push_opt("size", options.size)
            .push_opt("format", options.format)
            .push_opt("isCircular", options.is_circular)
    }

    pub fn push_universe_options(&mut self, options: &UniverseThumbnailOptions) -> &mut Self {
        self.push_opt("countPerUniverse", options.count_per_universe)
            .push_opt("defaults", options.defaults)
            .push_opt("size", options.size)
            .push_opt("format", options.format)
            .push_opt("isCircular", options.is_circular)
    }

    /// First value recorded for `key`
    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[cfg(test)]
    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| *k == key)
    }

    pub fn as_pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
