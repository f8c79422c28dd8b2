//! Query filtering over the canonical option list.
//!
//! A [`FilteredView`] is derived from the store and the current query and
//! is rebuilt from scratch on every store or query change — it holds
//! canonical *indices*, never copies of the records, so original ordering
//! and group structure are preserved by construction.

use crate::options::{OptionStore, SelectOption};

/// The option subset currently visible in the panel.
#[derive(Debug, Clone, Default)]
pub struct FilteredView {
    indices: Vec<usize>,
    create: Option<String>,
}

/// What the filtered view amounts to, for user-facing empty states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// At least one row (option or create affordance) is visible.
    Matches,
    /// Options exist but none match the query.
    NoMatch,
    /// The store holds no options at all.
    NoOptions,
}

/// A focusable row in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row<'a> {
    /// A canonical option.
    Option(&'a SelectOption),
    /// The synthetic "create new option" affordance carrying the literal
    /// query text. Never part of the canonical list.
    Create(&'a str),
}

impl FilteredView {
    /// Derive the visible subset for `query`.
    ///
    /// Matching is a case-insensitive substring test against labels; the
    /// empty query matches everything. When `allow_create` is set and a
    /// non-empty query matches nothing, a single create row carrying the
    /// query text is exposed instead.
    pub fn build(store: &OptionStore, query: &str, allow_create: bool) -> Self {
        let indices: Vec<usize> = if query.is_empty() {
            (0..store.len()).collect()
        } else {
            let needle = query.to_lowercase();
            store
                .records()
                .iter()
                .enumerate()
                .filter(|(_, r)| r.label.to_lowercase().contains(&needle))
                .map(|(i, _)| i)
                .collect()
        };
        let create = (allow_create && indices.is_empty() && !query.is_empty())
            .then(|| query.to_string());
        Self { indices, create }
    }

    /// Canonical indices of the matching options, in original order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Literal text of the create affordance, if one is exposed.
    pub fn create_text(&self) -> Option<&str> {
        self.create.as_deref()
    }

    /// Number of focusable rows, including the create affordance.
    pub fn row_count(&self) -> usize {
        self.indices.len() + usize::from(self.create.is_some())
    }

    /// Whether no rows are visible at all.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Resolve a row index into its option or create affordance.
    pub fn row<'a>(&'a self, store: &'a OptionStore, row: usize) -> Option<Row<'a>> {
        if row < self.indices.len() {
            store.get(self.indices[row]).map(Row::Option)
        } else if row == self.indices.len() {
            self.create.as_deref().map(Row::Create)
        } else {
            None
        }
    }

    /// Whether a row cannot be focused or committed. The create row is
    /// never disabled; out-of-bounds rows are treated as disabled.
    pub fn is_disabled(&self, store: &OptionStore, row: usize) -> bool {
        match self.row(store, row) {
            Some(Row::Option(opt)) => opt.disabled,
            Some(Row::Create(_)) => false,
            None => true,
        }
    }

    /// Classify the view for empty-state text selection.
    pub fn outcome(&self, store: &OptionStore) -> FilterOutcome {
        if store.is_empty() {
            FilterOutcome::NoOptions
        } else if self.is_empty() {
            FilterOutcome::NoMatch
        } else {
            FilterOutcome::Matches
        }
    }
}
