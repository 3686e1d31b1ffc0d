//! Resource models
//!
//! Records are read-only and loosely typed: only the fields the client
//! reports on are named, everything else is kept in `extra` so that JSON
//! output round-trips what the server sent.

use crate::http::QueryParams;
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// ============================================================================
// Fees
// ============================================================================

/// A government fee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default)]
    pub name: String,

    /// Amount, accepted as a number or a numeric string
    #[serde(
        default,
        deserialize_with = "lenient_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<Subcategory>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Fee {
    /// `"5000 NGN"`, or `"N/A"` without an amount
    pub fn amount_display(&self) -> String {
        match (self.amount, self.currency.as_deref()) {
            (Some(amount), Some(currency)) => format!("{amount} {currency}"),
            (Some(amount), None) => amount.to_string(),
            (None, _) => "N/A".to_string(),
        }
    }

    /// Name of the parent category, through the subcategory
    pub fn category_name(&self) -> Option<&str> {
        self.subcategory
            .as_ref()?
            .category
            .as_ref()?
            .name
            .as_deref()
    }

    /// Name of the subcategory
    pub fn subcategory_name(&self) -> Option<&str> {
        self.subcategory.as_ref()?.name.as_deref()
    }

    /// Name of the collecting agency, through the source
    pub fn agency_name(&self) -> Option<&str> {
        self.source.as_ref()?.agency.as_ref()?.name.as_deref()
    }
}

/// Subcategory a fee belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Category referenced from a subcategory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Where a fee is published
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency: Option<Agency>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Government agency collecting a fee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agency {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Filters accepted by the fee listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeFilter {
    /// Category name or slug
    pub category: Option<String>,
    /// State
    pub state: Option<String>,
    /// Free-text match on name and description
    pub search: Option<String>,
}

impl FeeFilter {
    /// Empty filter
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Filters as query parameters; empty values are left out
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .param_opt("category", self.category.as_deref())
            .param_opt("state", self.state.as_deref())
            .param_opt("search", self.search.as_deref())
    }
}

// ============================================================================
// Categories
// ============================================================================

/// A fee category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,

    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub fee_count: u64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Category {
    /// Case-insensitive display name match, or exact match on the decimal id
    pub fn matches(&self, identifier: &str) -> bool {
        self.display_name.to_lowercase() == identifier.to_lowercase()
            || self.id.to_string() == identifier
    }
}

/// First category matching `identifier`, see [`Category::matches`]
pub fn find_category<'a>(categories: &'a [Category], identifier: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.matches(identifier))
}

/// A category with the first page of its fees
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryFees {
    pub category: Category,
    pub fees: Vec<Fee>,
    /// Number of fees the server reports for the category
    pub total: u64,
}

// ============================================================================
// Metadata
// ============================================================================

/// API statistics and version information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub api_version: String,

    #[serde(default)]
    pub statistics: Statistics,

    /// Last data refresh; sent as epoch milliseconds or an ISO-8601 string
    #[serde(
        default,
        deserialize_with = "flexible_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_database_update: Option<DateTime<Utc>>,

    #[serde(
        default,
        deserialize_with = "flexible_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub generated_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Record counts reported by the metadata endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub total_fees: u64,
    #[serde(default)]
    pub total_categories: u64,
    #[serde(default)]
    pub total_agencies: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_subcategories: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sources: Option<u64>,
}

// ============================================================================
// Docs & Keys
// ============================================================================

/// Documentation links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Docs {
    #[serde(default)]
    pub repository: String,

    #[serde(default)]
    pub main_documentation: MainDocumentation,

    #[serde(default)]
    pub code_examples: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_links: Option<Value>,
}

/// Primary documentation links
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainDocumentation {
    #[serde(default)]
    pub api_reference: String,
    #[serde(default)]
    pub quick_start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_sources: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
}

/// Response of the key generation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyGrant {
    #[serde(default)]
    pub success: bool,
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================================================
// Serde helpers
// ============================================================================

fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("amount out of range: {n}"))),
        Some(Value::String(s)) => s
            .trim()
            .replace(',', "")
            .parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid amount: '{s}'"))),
        Some(other) => Err(de::Error::custom(format!("invalid amount: {other}"))),
    }
}

fn flexible_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            let millis = n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {n}")))?;
            from_millis(millis).map(Some)
        }
        Some(Value::String(s)) => {
            if let Ok(millis) = s.trim().parse::<i64>() {
                return from_millis(millis).map(Some);
            }
            DateTime::parse_from_rfc3339(s.trim())
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(|e| de::Error::custom(format!("invalid timestamp '{s}': {e}")))
        }
        Some(other) => Err(de::Error::custom(format!("invalid timestamp: {other}"))),
    }
}

fn from_millis<E: de::Error>(millis: i64) -> Result<DateTime<Utc>, E> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| E::custom(format!("timestamp out of range: {millis}")))
}
