//! Query parameter map
//!
//! An ordered map so that serialized URLs are stable across runs.

use std::collections::BTreeMap;

/// Query string parameter name carrying the API key
pub const API_KEY_PARAM: &str = "api_key";

/// URL query parameters for a single request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, String>,
}

impl QueryParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a parameter when a non-empty value is present
    #[must_use]
    pub fn param_opt(mut self, key: impl Into<String>, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.insert(key, value);
        }
        self
    }

    /// Insert or replace a parameter in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.params.insert(key.into(), value.to_string());
    }

    /// Copy every parameter of `other` over this set
    pub fn extend(&mut self, other: &QueryParams) {
        for (key, value) in &other.params {
            self.params.insert(key.clone(), value.clone());
        }
    }

    /// True when no parameter is set
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameter names, with the API key value hidden, for log lines
    pub(crate) fn describe(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| {
                if k == API_KEY_PARAM {
                    format!("{k}=***")
                } else {
                    format!("{k}={v}")
                }
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<String, String> {
        &self.params
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (key, value) in iter {
            query.insert(key, value);
        }
        query
    }
}
