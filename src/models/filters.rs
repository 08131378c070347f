//! Filter state and filter catalog.
//!
//! `FilterState` is the single source of truth for what the user currently
//! wants to see; `FilterCatalog` is the server-reported universe of valid
//! filter values. The query-parameter codec (`parse`/`serialize`) round-trips
//! every valid state: sets are comma-joined in insertion order and compared
//! unordered.

use chrono::{Datelike, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Lower bound accepted for publication years.
pub const MIN_YEAR_FLOOR: i32 = 1000;

/// Count sentinel for a user-entered catalog value the server has not
/// confirmed yet.
pub const UNCONFIRMED_COUNT: i64 = -1;

/// Current calendar year, the default upper publication-year bound.
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Availability variants, kept as an inclusive set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "Available to Borrow")]
    AvailableToBorrow,
    #[serde(rename = "Reserved Only")]
    ReservedOnly,
}

impl Availability {
    pub const ALL: [Availability; 2] = [Availability::AvailableToBorrow, Availability::ReservedOnly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::AvailableToBorrow => "Available to Borrow",
            Availability::ReservedOnly => "Reserved Only",
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Available to Borrow" => Ok(Availability::AvailableToBorrow),
            "Reserved Only" => Ok(Availability::ReservedOnly),
            other => Err(format!("Invalid availability: {}", other)),
        }
    }
}

/// What the user currently wants to see for one resource kind.
///
/// `page` is zero-based and reset by the coordinator whenever any other
/// field changes. Sets keep insertion order for serialization but compare
/// as unordered sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_filter_state"))]
pub struct FilterState {
    pub categories: IndexSet<String>,
    pub languages: IndexSet<String>,
    pub min_year: i32,
    pub max_year: i32,
    pub availability: IndexSet<Availability>,
    pub query: String,
    pub page: u32,
}

fn validate_filter_state(state: &FilterState) -> Result<(), ValidationError> {
    if state.min_year < MIN_YEAR_FLOOR {
        return Err(ValidationError::new("min_year_below_floor"));
    }
    if state.min_year > state.max_year {
        return Err(ValidationError::new("min_year_above_max_year"));
    }
    if state.max_year > current_year() {
        return Err(ValidationError::new("max_year_in_future"));
    }
    if state.availability.is_empty() {
        return Err(ValidationError::new("availability_empty"));
    }
    Ok(())
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            categories: IndexSet::new(),
            languages: IndexSet::new(),
            min_year: MIN_YEAR_FLOOR,
            max_year: current_year(),
            availability: Availability::ALL.into_iter().collect(),
            query: String::new(),
            page: 0,
        }
    }
}

fn split_csv(value: &str) -> IndexSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

fn join_csv<'a, I: IntoIterator<Item = &'a str>>(values: I) -> String {
    values.into_iter().collect::<Vec<_>>().join(",")
}

impl FilterState {
    /// Parse the query-parameter representation.
    ///
    /// Absent keys take their documented defaults: `minYear` 1000, `maxYear`
    /// the current calendar year, `query` empty, set-valued keys empty (the
    /// availability set defaults to unrestricted). Malformed numbers and
    /// unknown availability tokens are dropped.
    pub fn parse(params: &[(String, String)]) -> Self {
        let mut state = Self::default();
        for (key, value) in params {
            match key.as_str() {
                "categories" => state.categories = split_csv(value),
                "languages" => state.languages = split_csv(value),
                "availabilities" => {
                    let parsed: IndexSet<Availability> = value
                        .split(',')
                        .filter_map(|token| token.parse().ok())
                        .collect();
                    if !parsed.is_empty() {
                        state.availability = parsed;
                    }
                }
                "minYear" => {
                    if let Ok(year) = value.trim().parse() {
                        state.min_year = year;
                    }
                }
                "maxYear" => {
                    if let Ok(year) = value.trim().parse() {
                        state.max_year = year;
                    }
                }
                "query" => state.query = value.clone(),
                "page" => {
                    if let Ok(page) = value.trim().parse() {
                        state.page = page;
                    }
                }
                _ => {}
            }
        }
        state
    }

    /// Serialize to query parameters; the inverse of [`FilterState::parse`].
    ///
    /// Set-valued fields are one comma-joined value in insertion order and
    /// omitted when empty; the availability set is omitted while
    /// unrestricted. `page` is always included.
    pub fn serialize(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if !self.categories.is_empty() {
            params.push((
                "categories".to_string(),
                join_csv(self.categories.iter().map(String::as_str)),
            ));
        }
        if !self.languages.is_empty() {
            params.push((
                "languages".to_string(),
                join_csv(self.languages.iter().map(String::as_str)),
            ));
        }
        if !self.is_availability_unrestricted() {
            params.push((
                "availabilities".to_string(),
                join_csv(self.availability.iter().map(Availability::as_str)),
            ));
        }
        params.push(("minYear".to_string(), self.min_year.to_string()));
        params.push(("maxYear".to_string(), self.max_year.to_string()));
        if !self.query.is_empty() {
            params.push(("query".to_string(), self.query.clone()));
        }
        params.push(("page".to_string(), self.page.to_string()));
        params
    }

    /// True while every availability variant is included.
    pub fn is_availability_unrestricted(&self) -> bool {
        Availability::ALL.iter().all(|a| self.availability.contains(a))
    }

    /// Trimmed free-text query, `None` when no text search is active.
    pub fn active_query(&self) -> Option<&str> {
        let trimmed = self.query.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Whether any filter deviates from its default, judged against the
    /// given catalog snapshot: year bounds only count when they narrow the
    /// catalog's reported range.
    pub fn has_non_default_filters(&self, catalog: &FilterCatalog) -> bool {
        !self.categories.is_empty()
            || !self.languages.is_empty()
            || !self.is_availability_unrestricted()
            || self.min_year > catalog.published_year_range.min_year
            || self.max_year < catalog.published_year_range.max_year
    }
}

/// Global publication-year bounds across all items of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRange {
    pub min_year: i32,
    pub max_year: i32,
}

/// Server-reported universe of valid filter values for one resource kind.
///
/// Replaced wholesale on every successful fetch. The only client-side
/// mutation is the optimistic insertion of a brand-new user-entered name
/// with [`UNCONFIRMED_COUNT`] until the server confirms it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCatalog {
    #[serde(default)]
    pub categories: IndexMap<String, i64>,
    #[serde(default)]
    pub languages: IndexMap<String, i64>,
    pub published_year_range: YearRange,
}

impl Default for FilterCatalog {
    fn default() -> Self {
        Self {
            categories: IndexMap::new(),
            languages: IndexMap::new(),
            published_year_range: YearRange {
                min_year: MIN_YEAR_FLOOR,
                max_year: current_year(),
            },
        }
    }
}

impl FilterCatalog {
    /// Optimistically add a user-entered category. Returns false when the
    /// name is blank or already known (case-insensitive).
    pub fn add_unconfirmed_category(&mut self, name: &str) -> bool {
        Self::add_unconfirmed(&mut self.categories, name)
    }

    /// Optimistically add a user-entered language.
    pub fn add_unconfirmed_language(&mut self, name: &str) -> bool {
        Self::add_unconfirmed(&mut self.languages, name)
    }

    fn add_unconfirmed(entries: &mut IndexMap<String, i64>, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }
        let exists = entries
            .keys()
            .any(|known| known.eq_ignore_ascii_case(trimmed));
        if exists {
            return false;
        }
        entries.insert(trimmed.to_string(), UNCONFIRMED_COUNT);
        true
    }

    /// Known category names containing the fragment (case-insensitive).
    /// An empty fragment matches nothing.
    pub fn similar_categories(&self, fragment: &str) -> Vec<&str> {
        Self::similar(&self.categories, fragment)
    }

    /// Known language names containing the fragment (case-insensitive).
    pub fn similar_languages(&self, fragment: &str) -> Vec<&str> {
        Self::similar(&self.languages, fragment)
    }

    fn similar<'a>(entries: &'a IndexMap<String, i64>, fragment: &str) -> Vec<&'a str> {
        let needle = fragment.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        entries
            .keys()
            .filter(|name| name.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }
}
