//! Catalog-backed planner
//!
//! `ReplaySession` answers EXPLAIN requests from a catalog of recorded
//! planner outputs. Each entry records the query, the knobs that were
//! disabled when it was captured, and the planner's JSON document. It
//! behaves like a real session: knob state persists until reset, unknown
//! settings are refused, and unknown queries are invalid.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{SessionError, SessionResult};
use super::knobs::is_known_knob;
use super::{PlannerSession, SessionProvider};

/// One recorded planner answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Query text as submitted
    pub query: String,

    /// Knobs disabled when the plan was recorded
    #[serde(default)]
    pub disabled: BTreeSet<String>,

    /// Raw EXPLAIN (FORMAT JSON) output
    pub plan: Value,
}

/// Recorded planner answers, searched in file order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanCatalog {
    #[serde(default)]
    pub entries: Vec<CatalogEntry>,
}

/// Whitespace- and terminator-insensitive form of a query
pub fn normalize_query(query: &str) -> String {
    query
        .trim()
        .trim_end_matches(';')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl PlanCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog file; an unreadable catalog means no planner
    pub fn load(path: &Path) -> SessionResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SessionError::Unavailable(format!("cannot read plan catalog {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            SessionError::Unavailable(format!("invalid plan catalog {}: {}", path.display(), e))
        })
    }

    /// Builder: record a plan for `query` under the given disabled knobs
    pub fn with_plan(mut self, query: &str, disabled: &[&str], plan: Value) -> Self {
        self.entries.push(CatalogEntry {
            query: query.to_string(),
            disabled: disabled.iter().map(|k| k.to_string()).collect(),
            plan,
        });
        self
    }

    /// Number of recorded plans
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the plan the planner would produce with `disabled` in effect.
    ///
    /// Among the entries for the query, the one with the largest disabled
    /// set that is still a subset of `disabled` wins: a planner that cannot
    /// avoid a disabled strategy keeps using it. Ties go to the earlier entry.
    pub fn lookup(&self, query: &str, disabled: &BTreeSet<String>) -> SessionResult<&Value> {
        let wanted = normalize_query(query);
        let mut candidates = self
            .entries
            .iter()
            .filter(|e| normalize_query(&e.query) == wanted)
            .peekable();

        if candidates.peek().is_none() {
            return Err(SessionError::InvalidQuery(format!(
                "query is not present in the plan catalog: {}",
                wanted
            )));
        }

        let mut best: Option<&CatalogEntry> = None;
        for entry in candidates.filter(|e| e.disabled.is_subset(disabled)) {
            if best.map_or(true, |b| entry.disabled.len() > b.disabled.len()) {
                best = Some(entry);
            }
        }

        best.map(|e| &e.plan).ok_or_else(|| {
            SessionError::Failed(format!("no recorded plan for {} under {:?}", wanted, disabled))
        })
    }
}

/// Planner session answering from a catalog
#[derive(Debug)]
pub struct ReplaySession {
    catalog: Arc<PlanCatalog>,
    disabled: BTreeSet<String>,
    explains: usize,
}

impl ReplaySession {
    /// Open a session over a shared catalog
    pub fn new(catalog: Arc<PlanCatalog>) -> Self {
        Self {
            catalog,
            disabled: BTreeSet::new(),
            explains: 0,
        }
    }

    /// Knobs currently disabled in this session
    pub fn disabled_knobs(&self) -> &BTreeSet<String> {
        &self.disabled
    }

    /// Number of EXPLAIN requests served
    pub fn explain_count(&self) -> usize {
        self.explains
    }
}

impl PlannerSession for ReplaySession {
    fn reset_knobs(&mut self) -> SessionResult<()> {
        self.disabled.clear();
        Ok(())
    }

    fn set_knob(&mut self, knob: &str, enabled: bool) -> SessionResult<()> {
        if !is_known_knob(knob) {
            return Err(SessionError::UnknownKnob(knob.to_string()));
        }
        if enabled {
            self.disabled.remove(knob);
        } else {
            self.disabled.insert(knob.to_string());
        }
        Ok(())
    }

    fn explain(&mut self, query: &str) -> SessionResult<Value> {
        self.explains += 1;
        self.catalog.lookup(query, &self.disabled).cloned()
    }
}

enum CatalogSource {
    File(PathBuf),
    Loaded(Arc<PlanCatalog>),
}

/// Opens one `ReplaySession` per analysis request
pub struct CatalogSessions {
    source: CatalogSource,
}

impl CatalogSessions {
    /// Read the catalog file afresh on every open
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: CatalogSource::File(path.into()),
        }
    }

    /// Serve every session from an in-memory catalog
    pub fn from_catalog(catalog: PlanCatalog) -> Self {
        Self {
            source: CatalogSource::Loaded(Arc::new(catalog)),
        }
    }

    fn catalog(&self) -> SessionResult<Arc<PlanCatalog>> {
        match &self.source {
            CatalogSource::File(path) => PlanCatalog::load(path).map(Arc::new),
            CatalogSource::Loaded(catalog) => Ok(Arc::clone(catalog)),
        }
    }
}

impl SessionProvider for CatalogSessions {
    fn open(&self) -> SessionResult<Box<dyn PlannerSession + Send>> {
        Ok(Box::new(ReplaySession::new(self.catalog()?)))
    }
}
