//! Filter engine shared by the applicant and job posting lists.
//!
//! A list is narrowed by three predicates combined with AND: a status tab, a
//! case-insensitive free-text search, and a secondary scope (job id for
//! applicants, company for postings). Filtering never reorders records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Sentinel accepted by the tab and scope parsers to disable the predicate.
pub const ALL: &str = "all";

/// Records that can be narrowed by the filter engine.
pub trait Filterable {
    type Status: Copy + Eq;

    fn status(&self) -> Self::Status;

    /// Key compared against [`Scope::Only`].
    fn secondary_key(&self) -> &str;

    /// Fields inspected by free-text search, in no particular order.
    fn searchable_fields(&self) -> Vec<&str>;
}

/// Status tab selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab<S> {
    All,
    Only(S),
}

impl<S> Default for Tab<S> {
    fn default() -> Self {
        Tab::All
    }
}

impl<S: Copy + Eq> Tab<S> {
    pub fn admits(&self, status: S) -> bool {
        match self {
            Tab::All => true,
            Tab::Only(selected) => *selected == status,
        }
    }
}

impl<S: FromStr> FromStr for Tab<S> {
    type Err = S::Err;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            return Ok(Tab::All);
        }
        trimmed.parse().map(Tab::Only)
    }
}

impl<S: fmt::Display> fmt::Display for Tab<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::All => f.write_str(ALL),
            Tab::Only(status) => write!(f, "{status}"),
        }
    }
}

/// Secondary dimension selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Scope {
    #[default]
    All,
    Only(String),
}

impl Scope {
    pub fn admits(&self, key: &str) -> bool {
        match self {
            Scope::All => true,
            Scope::Only(selected) => selected == key,
        }
    }
}

impl From<String> for Scope {
    fn from(raw: String) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            Scope::All
        } else {
            Scope::Only(trimmed.to_string())
        }
    }
}

impl From<&str> for Scope {
    fn from(raw: &str) -> Self {
        Scope::from(raw.to_string())
    }
}

impl From<Scope> for String {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::All => ALL.to_string(),
            Scope::Only(key) => key,
        }
    }
}

/// The (tab, search, scope) triple narrowing a list for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterCriteria<S> {
    pub tab: Tab<S>,
    pub search: String,
    pub scope: Scope,
}

impl<S> Default for FilterCriteria<S> {
    fn default() -> Self {
        Self {
            tab: Tab::All,
            search: String::new(),
            scope: Scope::All,
        }
    }
}

impl<S: Copy + Eq> FilterCriteria<S> {
    pub fn new(tab: Tab<S>, search: impl Into<String>, scope: Scope) -> Self {
        Self {
            tab,
            search: search.into(),
            scope,
        }
    }

    pub fn matches<T>(&self, record: &T) -> bool
    where
        T: Filterable<Status = S>,
    {
        self.tab.admits(record.status())
            && self.scope.admits(record.secondary_key())
            && matches_search(record, &self.search)
    }
}

fn matches_search<T: Filterable>(record: &T, query: &str) -> bool {
    let needle = query.trim();
    if needle.is_empty() {
        return true;
    }

    let needle = needle.to_lowercase();
    record
        .searchable_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Narrow `records` by `criteria`, preserving input order.
pub fn filter<T>(records: &[Arc<T>], criteria: &FilterCriteria<T::Status>) -> Vec<Arc<T>>
where
    T: Filterable,
{
    records
        .iter()
        .filter(|record| criteria.matches::<T>(record))
        .cloned()
        .collect()
}

/// Badge count for a single tab.
pub fn count_for_tab<T>(records: &[Arc<T>], tab: Tab<T::Status>) -> usize
where
    T: Filterable,
{
    match tab {
        Tab::All => records.len(),
        Tab::Only(_) => records
            .iter()
            .filter(|record| tab.admits(record.status()))
            .count(),
    }
}

/// Caches the last filter result keyed by store version and criteria.
///
/// The store bumps its version on every applied mutation, so a hit is only
/// possible when neither the records nor the criteria changed.
pub struct MemoizedFilter<T: Filterable> {
    last: Option<(u64, FilterCriteria<T::Status>, Vec<Arc<T>>)>,
}

impl<T: Filterable> Default for MemoizedFilter<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: Filterable> MemoizedFilter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &mut self,
        version: u64,
        records: &[Arc<T>],
        criteria: &FilterCriteria<T::Status>,
    ) -> &[Arc<T>] {
        let fresh = matches!(
            &self.last,
            Some((cached_version, cached_criteria, _))
                if *cached_version == version && cached_criteria == criteria
        );

        if !fresh {
            let result = filter(records, criteria);
            self.last = Some((version, criteria.clone(), result));
        }

        match &self.last {
            Some((_, _, result)) => result,
            None => &[],
        }
    }
}
