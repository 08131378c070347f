//! Autocomplete suggestion fetching.
//!
//! Suggestions are a convenience and never block browsing: failures clear
//! the set silently, and responses commit in issue order so a slow early
//! request can never clobber a newer one.

use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    error::ClientResult,
    models::{ResourceKind, SuggestionSet},
    provider::ResourceProvider,
};

pub struct SuggestionService<P: ResourceProvider> {
    provider: Arc<P>,
    kind: ResourceKind,
    min_chars: usize,
    suggestions: SuggestionSet,
    panel_open: bool,
    issued_seq: u64,
    committed_seq: u64,
    closed: bool,
}

impl<P: ResourceProvider> SuggestionService<P> {
    pub fn new(provider: Arc<P>, kind: ResourceKind, min_chars: usize) -> Self {
        Self {
            provider,
            kind,
            min_chars,
            suggestions: SuggestionSet::default(),
            panel_open: false,
            issued_seq: 0,
            committed_seq: 0,
            closed: false,
        }
    }

    pub fn suggestions(&self) -> &SuggestionSet {
        &self.suggestions
    }

    /// The panel is shown only while qualifying text produced at least one
    /// non-empty suggestion group and it has not been dismissed.
    pub fn visible(&self) -> bool {
        self.panel_open && !self.suggestions.is_empty()
    }

    /// React to a (debounced) query change. Queries shorter than the
    /// qualifying length clear the suggestions without a request.
    pub async fn on_query_change(&mut self, query: &str) {
        if self.closed {
            return;
        }
        let trimmed = query.trim();
        if trimmed.chars().count() < self.min_chars {
            self.suggestions.clear();
            self.panel_open = false;
            return;
        }

        let seq = self.issue();
        tracing::debug!(kind = %self.kind, query = trimmed, seq, "fetching suggestions");
        let outcome = self.provider.fetch_suggestions(self.kind, trimmed).await;
        self.resolve(seq, outcome);
    }

    /// Drain a debounced query stream until its producer is dropped.
    pub async fn run_debounced(&mut self, mut queries: watch::Receiver<String>) {
        while queries.changed().await.is_ok() {
            let query = queries.borrow_and_update().clone();
            self.on_query_change(&query).await;
            if self.closed {
                break;
            }
        }
    }

    /// The user picked a suggestion: the panel closes and the chosen value
    /// becomes the search term.
    pub fn select(&mut self, value: &str) -> String {
        self.panel_open = false;
        value.trim().to_string()
    }

    /// Dismiss the panel (outside click or search submission).
    pub fn dismiss(&mut self) {
        self.panel_open = false;
    }

    /// Tear down; pending responses are dropped.
    pub fn close(&mut self) {
        self.closed = true;
    }

    fn issue(&mut self) -> u64 {
        self.issued_seq += 1;
        self.issued_seq
    }

    fn resolve(&mut self, seq: u64, outcome: ClientResult<SuggestionSet>) {
        if self.closed {
            return;
        }
        if seq <= self.committed_seq {
            tracing::debug!(seq, committed = self.committed_seq, "discarding stale suggestions");
            return;
        }
        self.committed_seq = seq;
        match outcome {
            Ok(set) => {
                self.suggestions = set;
                self.panel_open = true;
            }
            Err(err) => {
                // Fail-soft: suggestions are never worth an error surface.
                tracing::warn!(kind = %self.kind, error = %err, "suggestion fetch failed");
                self.suggestions.clear();
            }
        }
    }
}
