//! The headless select engine: one synchronous state machine owning the
//! option store, filtered view, selection, query, and panel visibility.
//!
//! Every mutating operation runs to completion inside the caller's event
//! handler and returns the [`SelectEvent`]s it produced, in order. Two
//! rapid interactions are therefore always observed strictly in the order
//! their events fired; nothing is reordered or coalesced.

use crate::events::SelectEvent;
use crate::filter::{FilterOutcome, FilteredView, Row};
use crate::options::{OptionInput, OptionStore};
use crate::panel::PanelState;
use crate::selection::{SelectValue, SelectionManager};
use crate::tags::{self, TagRow};

/// Configuration surface of the select engine.
///
/// `loading` and `loading_text` are display hints only — they carry no
/// internal async lifecycle.
#[derive(Debug, Clone)]
pub struct SelectConfig {
    /// Multi-select mode: the value is an ordered list instead of a scalar.
    pub multiple: bool,
    /// Selection ceiling in multi mode; `0` means unlimited.
    pub multiple_limit: usize,
    /// Enable free-text filtering against option labels.
    pub filterable: bool,
    /// Expose the synthetic create row when filterable and nothing matches.
    pub allow_create: bool,
    /// Expose the clear affordance when a value is present.
    pub clearable: bool,
    /// Collapse overflowing tags into a "+N" indicator.
    pub collapse_tags: bool,
    /// Maximum individually rendered tags when collapsing.
    pub max_collapse_tags: usize,
    /// Suppress all transitions out of Closed and all commits.
    pub disabled: bool,
    /// Display hint: the host is still fetching options.
    pub loading: bool,
    /// Panel text while `loading` is set.
    pub loading_text: String,
    /// Panel text when the store holds no options.
    pub no_data_text: String,
    /// Panel text when options exist but none match the query.
    pub no_match_text: String,
    /// Trigger text when nothing is selected.
    pub placeholder: String,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            multiple: false,
            multiple_limit: 0,
            filterable: false,
            allow_create: false,
            clearable: false,
            collapse_tags: false,
            max_collapse_tags: 1,
            disabled: false,
            loading: false,
            loading_text: "Loading...".to_string(),
            no_data_text: "No data".to_string(),
            no_match_text: "No matching data".to_string(),
            placeholder: "Select...".to_string(),
        }
    }
}

enum CommitTarget {
    Value(String),
    Create(String),
}

/// The select state machine.
///
/// Data flows store → filtered view → panel focus → selection → tags, and
/// each stage is rebuilt or revalidated whenever the stage before it
/// changes. The engine renders nothing; widgets read its state back
/// through the accessors.
#[derive(Debug, Default)]
pub struct SelectEngine {
    config: SelectConfig,
    store: OptionStore,
    filtered: FilteredView,
    selection: SelectionManager,
    panel: PanelState,
    query: String,
}

impl SelectEngine {
    /// Build an engine from its configuration.
    pub fn new(config: SelectConfig) -> Self {
        let selection = if config.multiple {
            SelectionManager::multi(config.multiple_limit)
        } else {
            SelectionManager::single()
        };
        let mut engine = Self {
            config,
            store: OptionStore::new(),
            filtered: FilteredView::default(),
            selection,
            panel: PanelState::new(),
            query: String::new(),
        };
        engine.refresh_filtered();
        engine
    }

    // --- Configuration -------------------------------------------------

    /// The active configuration.
    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// Switch between single and multi mode.
    pub fn set_multiple(&mut self, multiple: bool) {
        self.config.multiple = multiple;
        self.selection.set_multiple(multiple);
    }

    /// Change the selection ceiling (`0` = unlimited).
    pub fn set_multiple_limit(&mut self, limit: usize) {
        self.config.multiple_limit = limit;
        self.selection.set_limit(limit);
    }

    /// Enable or disable free-text filtering.
    pub fn set_filterable(&mut self, filterable: bool) {
        self.config.filterable = filterable;
        if !filterable {
            self.query.clear();
        }
        self.refresh_filtered();
    }

    /// Enable or disable the create affordance.
    pub fn set_allow_create(&mut self, allow_create: bool) {
        self.config.allow_create = allow_create;
        self.refresh_filtered();
    }

    /// Enable or disable the clear affordance.
    pub fn set_clearable(&mut self, clearable: bool) {
        self.config.clearable = clearable;
    }

    /// Enable tag collapsing with the given maximum visible count.
    pub fn set_collapse_tags(&mut self, collapse: bool, max_visible: usize) {
        self.config.collapse_tags = collapse;
        self.config.max_collapse_tags = max_visible;
    }

    /// Disable or re-enable the whole component.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
    }

    /// Set the loading display hint.
    pub fn set_loading(&mut self, loading: bool) {
        self.config.loading = loading;
    }

    /// Set the placeholder shown when nothing is selected.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.config.placeholder = placeholder.into();
    }

    /// Set the panel text shown while loading.
    pub fn set_loading_text(&mut self, text: impl Into<String>) {
        self.config.loading_text = text.into();
    }

    /// Set the panel text shown when the store is empty.
    pub fn set_no_data_text(&mut self, text: impl Into<String>) {
        self.config.no_data_text = text.into();
    }

    /// Set the panel text shown when the query matches nothing.
    pub fn set_no_match_text(&mut self, text: impl Into<String>) {
        self.config.no_match_text = text.into();
    }

    // --- Input ----------------------------------------------------------

    /// Replace the option list from structured or serialized input.
    ///
    /// Malformed serialized input degrades to an empty store: the
    /// diagnostic goes to the logging channel and the component stays
    /// interactive in its no-data state.
    pub fn load_options(&mut self, input: impl Into<OptionInput>) {
        if let Err(err) = self.store.load(input.into()) {
            tracing::warn!(error = %err, "discarding malformed option input");
        }
        self.refresh_filtered();
    }

    /// Replace the committed value (initial/controlled input). Emits
    /// nothing: hosts already know the value they set.
    pub fn set_value(&mut self, value: SelectValue) {
        self.selection.set_value(value);
    }

    /// Update the filter query. No-op unless `filterable`.
    pub fn set_query(&mut self, query: impl Into<String>) {
        if !self.config.filterable {
            return;
        }
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        self.refresh_filtered();
    }

    // --- Accessors -------------------------------------------------------

    /// The canonical option store.
    pub fn store(&self) -> &OptionStore {
        &self.store
    }

    /// The currently visible option subset.
    pub fn filtered(&self) -> &FilteredView {
        &self.filtered
    }

    /// The committed value in its final external form.
    pub fn value(&self) -> SelectValue {
        self.selection.value()
    }

    /// Whether a value is currently committed.
    pub fn is_selected(&self, value: &str) -> bool {
        self.selection.contains(value)
    }

    /// Whether any value is committed.
    pub fn has_value(&self) -> bool {
        !self.selection.is_empty()
    }

    /// The current filter query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.panel.is_open()
    }

    /// The focused filtered-row index, if any.
    pub fn focused(&self) -> Option<usize> {
        self.panel.focused()
    }

    /// Display label for the committed scalar in single mode.
    pub fn selected_label(&self) -> Option<String> {
        match self.selection.value() {
            SelectValue::Single(Some(value)) => Some(
                self.store
                    .label_for(&value)
                    .unwrap_or(value.as_str())
                    .to_string(),
            ),
            _ => None,
        }
    }

    /// The renderable tag row (multi mode; empty otherwise).
    pub fn tags(&self) -> TagRow {
        if !self.selection.is_multi() {
            return TagRow::default();
        }
        let collapse = self
            .config
            .collapse_tags
            .then(|| self.config.max_collapse_tags.max(1));
        tags::build(self.selection.values(), &self.store, collapse)
    }

    /// Text to show in place of the option list, if any: the loading hint,
    /// the no-data text for an empty store, or the no-match text when a
    /// query filtered everything out.
    pub fn panel_hint(&self) -> Option<&str> {
        if self.config.loading {
            return Some(&self.config.loading_text);
        }
        match self.filtered.outcome(&self.store) {
            FilterOutcome::NoOptions => Some(&self.config.no_data_text),
            FilterOutcome::NoMatch => Some(&self.config.no_match_text),
            FilterOutcome::Matches => None,
        }
    }

    // --- Visibility ------------------------------------------------------

    /// Open the panel. Suppressed while disabled.
    pub fn open(&mut self) -> Vec<SelectEvent> {
        if self.config.disabled {
            return Vec::new();
        }
        if self.panel.open() {
            vec![SelectEvent::VisibilityChanged(true)]
        } else {
            Vec::new()
        }
    }

    /// Close the panel. The query resets on the open→closed transition so
    /// reopening shows the full list.
    pub fn close(&mut self) -> Vec<SelectEvent> {
        if !self.panel.close() {
            return Vec::new();
        }
        if !self.query.is_empty() {
            self.query.clear();
            self.refresh_filtered();
        }
        vec![SelectEvent::VisibilityChanged(false)]
    }

    /// Open when closed, close when open.
    pub fn toggle(&mut self) -> Vec<SelectEvent> {
        if self.panel.is_open() {
            self.close()
        } else {
            self.open()
        }
    }

    /// Programmatic blur: force open → closed.
    pub fn blur(&mut self) -> Vec<SelectEvent> {
        self.close()
    }

    // --- Focus navigation ------------------------------------------------

    /// Focus the next non-disabled row.
    pub fn focus_next(&mut self) {
        if !self.panel.is_open() {
            return;
        }
        let rows = self.filtered.row_count();
        let (store, filtered) = (&self.store, &self.filtered);
        self.panel.focus_next(rows, |i| filtered.is_disabled(store, i));
    }

    /// Focus the previous non-disabled row.
    pub fn focus_prev(&mut self) {
        if !self.panel.is_open() {
            return;
        }
        let rows = self.filtered.row_count();
        let (store, filtered) = (&self.store, &self.filtered);
        self.panel.focus_prev(rows, |i| filtered.is_disabled(store, i));
    }

    /// Focus the first non-disabled row.
    pub fn focus_first(&mut self) {
        if !self.panel.is_open() {
            return;
        }
        let rows = self.filtered.row_count();
        let (store, filtered) = (&self.store, &self.filtered);
        self.panel.focus_first(rows, |i| filtered.is_disabled(store, i));
    }

    /// Focus the last non-disabled row.
    pub fn focus_last(&mut self) {
        if !self.panel.is_open() {
            return;
        }
        let rows = self.filtered.row_count();
        let (store, filtered) = (&self.store, &self.filtered);
        self.panel.focus_last(rows, |i| filtered.is_disabled(store, i));
    }

    // --- Commit ----------------------------------------------------------

    /// Commit the focused row (Enter). No focus, no effect.
    pub fn commit_focused(&mut self) -> Vec<SelectEvent> {
        match self.panel.focused() {
            Some(row) => self.commit_row(row),
            None => Vec::new(),
        }
    }

    /// Commit a filtered row (pointer selection).
    pub fn commit_row(&mut self, row: usize) -> Vec<SelectEvent> {
        let target = match self.filtered.row(&self.store, row) {
            Some(Row::Option(opt)) => {
                if opt.disabled {
                    return Vec::new();
                }
                CommitTarget::Value(opt.value.clone())
            }
            Some(Row::Create(text)) => CommitTarget::Create(text.to_string()),
            None => return Vec::new(),
        };
        match target {
            CommitTarget::Value(value) => self.commit_value(&value),
            CommitTarget::Create(text) => self.create_and_commit(&text),
        }
    }

    /// Commit a confirmed choice by value.
    ///
    /// Single mode replaces the scalar and closes the panel; multi mode
    /// toggles membership and leaves the panel open for further selection.
    /// Disabled options and ceiling hits are silent no-ops.
    pub fn commit_value(&mut self, value: &str) -> Vec<SelectEvent> {
        if self.config.disabled {
            return Vec::new();
        }
        if self.store.find(value).is_some_and(|opt| opt.disabled) {
            return Vec::new();
        }
        let mut events = Vec::new();
        if self.selection.commit(value) {
            events.push(SelectEvent::Changed(self.selection.value()));
        }
        if !self.selection.is_multi() {
            events.extend(self.close());
        }
        events
    }

    /// Commit a value that need not exist in the store. Available only
    /// when `allow_create` is enabled.
    pub fn create_and_commit(&mut self, text: &str) -> Vec<SelectEvent> {
        if !self.config.allow_create {
            return Vec::new();
        }
        self.commit_value(text)
    }

    /// Remove a committed value (tag close control).
    pub fn remove_value(&mut self, value: &str) -> Vec<SelectEvent> {
        if self.config.disabled {
            return Vec::new();
        }
        if self.selection.remove(value) {
            vec![
                SelectEvent::TagRemoved(value.to_string()),
                SelectEvent::Changed(self.selection.value()),
            ]
        } else {
            Vec::new()
        }
    }

    /// Remove the most recently committed value (Backspace on an empty
    /// query in multi mode).
    pub fn remove_last(&mut self) -> Vec<SelectEvent> {
        if self.config.disabled {
            return Vec::new();
        }
        match self.selection.pop() {
            Some(value) => vec![
                SelectEvent::TagRemoved(value),
                SelectEvent::Changed(self.selection.value()),
            ],
            None => Vec::new(),
        }
    }

    /// Reset to "no selection" through the clear affordance.
    pub fn clear(&mut self) -> Vec<SelectEvent> {
        if self.config.disabled {
            return Vec::new();
        }
        if self.selection.clear() {
            vec![
                SelectEvent::Cleared,
                SelectEvent::Changed(self.selection.value()),
            ]
        } else {
            Vec::new()
        }
    }

    // --- Internal --------------------------------------------------------

    fn refresh_filtered(&mut self) {
        let allow_create = self.config.allow_create && self.config.filterable;
        self.filtered = FilteredView::build(&self.store, &self.query, allow_create);
        if self.panel.is_open() {
            let rows = self.filtered.row_count();
            let (store, filtered) = (&self.store, &self.filtered);
            self.panel.revalidate(rows, |i| filtered.is_disabled(store, i));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SelectOption;

    fn abc_options() -> Vec<SelectOption> {
        vec![
            SelectOption::new("1", "A"),
            SelectOption::new("2", "B").disabled(true),
            SelectOption::new("3", "C"),
        ]
    }

    fn single_engine() -> SelectEngine {
        let mut engine = SelectEngine::new(SelectConfig::default());
        engine.load_options(abc_options());
        engine
    }

    fn multi_engine(limit: usize) -> SelectEngine {
        let mut engine = SelectEngine::new(SelectConfig {
            multiple: true,
            multiple_limit: limit,
            ..SelectConfig::default()
        });
        engine.load_options(abc_options());
        engine
    }

    #[test]
    fn open_emits_visibility_once() {
        let mut engine = single_engine();
        assert_eq!(engine.open(), vec![SelectEvent::VisibilityChanged(true)]);
        assert!(engine.is_open());
        assert!(engine.open().is_empty());
    }

    #[test]
    fn disabled_suppresses_open() {
        let mut engine = single_engine();
        engine.set_disabled(true);
        assert!(engine.open().is_empty());
        assert!(!engine.is_open());
    }

    #[test]
    fn arrow_navigation_skips_disabled_option() {
        // Options [A, B(disabled), C]: first Down focuses value 1,
        // second Down skips value 2 and lands on value 3.
        let mut engine = single_engine();
        engine.open();
        engine.focus_next();
        assert_eq!(engine.focused(), Some(0));
        engine.focus_next();
        assert_eq!(engine.focused(), Some(2));

        let events = engine.commit_focused();
        assert_eq!(
            events,
            vec![
                SelectEvent::Changed(SelectValue::Single(Some("3".into()))),
                SelectEvent::VisibilityChanged(false),
            ]
        );
        assert!(!engine.is_open());
    }

    #[test]
    fn single_commit_closes_panel_exactly_once() {
        let mut engine = single_engine();
        engine.open();
        let events = engine.commit_value("1");
        let closes = events
            .iter()
            .filter(|e| **e == SelectEvent::VisibilityChanged(false))
            .count();
        assert_eq!(closes, 1);
    }

    #[test]
    fn single_recommit_same_value_still_closes_without_change() {
        let mut engine = single_engine();
        engine.open();
        engine.commit_value("1");
        engine.open();
        let events = engine.commit_value("1");
        assert_eq!(events, vec![SelectEvent::VisibilityChanged(false)]);
    }

    #[test]
    fn commit_on_disabled_option_is_silent() {
        let mut engine = single_engine();
        engine.open();
        assert!(engine.commit_value("2").is_empty());
        assert!(engine.is_open());
        assert!(!engine.has_value());
    }

    #[test]
    fn enter_without_focus_is_a_noop() {
        let mut engine = single_engine();
        engine.open();
        assert!(engine.commit_focused().is_empty());
    }

    #[test]
    fn multi_commit_keeps_panel_open() {
        let mut engine = multi_engine(0);
        engine.open();
        let events = engine.commit_value("1");
        assert_eq!(
            events,
            vec![SelectEvent::Changed(SelectValue::Multi(vec!["1".into()]))]
        );
        assert!(engine.is_open());
    }

    #[test]
    fn multi_limit_silences_third_attempt() {
        let mut engine = multi_engine(2);
        engine.load_options(vec![
            SelectOption::new("1", "A"),
            SelectOption::new("2", "B"),
            SelectOption::new("3", "C"),
        ]);
        engine.open();
        assert_eq!(engine.commit_value("1").len(), 1);
        assert_eq!(engine.commit_value("2").len(), 1);
        assert!(engine.commit_value("3").is_empty());
        assert_eq!(
            engine.value(),
            SelectValue::Multi(vec!["1".into(), "2".into()])
        );
    }

    #[test]
    fn query_filters_and_resets_on_close() {
        let mut engine = single_engine();
        engine.set_filterable(true);
        engine.open();
        engine.set_query("c");
        assert_eq!(engine.filtered().indices(), &[2]);

        engine.close();
        assert_eq!(engine.query(), "");
        assert_eq!(engine.filtered().indices(), &[0, 1, 2]);
    }

    #[test]
    fn focus_is_revalidated_when_filter_shrinks_list() {
        let mut engine = single_engine();
        engine.set_filterable(true);
        engine.open();
        engine.focus_next();
        engine.focus_next();
        assert_eq!(engine.focused(), Some(2));

        engine.set_query("a");
        assert_eq!(engine.focused(), None);
    }

    #[test]
    fn create_affordance_lifecycle() {
        let mut engine = single_engine();
        engine.set_filterable(true);
        engine.set_allow_create(true);
        engine.open();

        engine.set_query("delta");
        assert_eq!(engine.filtered().create_text(), Some("delta"));

        // Committing the create row commits the literal text and closes.
        engine.focus_next();
        let events = engine.commit_focused();
        assert_eq!(
            events,
            vec![
                SelectEvent::Changed(SelectValue::Single(Some("delta".into()))),
                SelectEvent::VisibilityChanged(false),
            ]
        );

        // The affordance is gone after the close reset the query.
        assert_eq!(engine.filtered().create_text(), None);
    }

    #[test]
    fn create_requires_allow_create() {
        let mut engine = single_engine();
        engine.set_filterable(true);
        engine.open();
        engine.set_query("zzz");
        assert_eq!(engine.filtered().create_text(), None);
        assert!(engine.create_and_commit("zzz").is_empty());
    }

    #[test]
    fn malformed_options_degrade_to_no_data() {
        let mut engine = SelectEngine::new(SelectConfig::default());
        engine.load_options("{ not valid json");
        assert!(engine.store().is_empty());
        assert_eq!(engine.panel_hint(), Some("No data"));
        // The component stays interactive.
        assert_eq!(engine.open(), vec![SelectEvent::VisibilityChanged(true)]);
    }

    #[test]
    fn hint_distinguishes_no_match_from_no_data() {
        let mut engine = single_engine();
        engine.set_filterable(true);
        engine.open();
        assert_eq!(engine.panel_hint(), None);
        engine.set_query("zzz");
        assert_eq!(engine.panel_hint(), Some("No matching data"));
    }

    #[test]
    fn loading_hint_wins() {
        let mut engine = single_engine();
        engine.set_loading(true);
        assert_eq!(engine.panel_hint(), Some("Loading..."));
    }

    #[test]
    fn committed_value_survives_store_reload() {
        let mut engine = single_engine();
        engine.open();
        engine.commit_value("1");
        engine.load_options(vec![SelectOption::new("9", "Nine")]);
        assert_eq!(engine.value(), SelectValue::Single(Some("1".into())));
        assert_eq!(engine.selected_label(), Some("1".to_string()));
    }

    #[test]
    fn tag_removal_emits_removed_then_changed() {
        let mut engine = multi_engine(0);
        engine.open();
        engine.commit_value("1");
        engine.commit_value("3");
        let events = engine.remove_value("1");
        assert_eq!(
            events,
            vec![
                SelectEvent::TagRemoved("1".into()),
                SelectEvent::Changed(SelectValue::Multi(vec!["3".into()])),
            ]
        );
        assert!(engine.remove_value("1").is_empty());
    }

    #[test]
    fn remove_last_pops_in_commit_order() {
        let mut engine = multi_engine(0);
        engine.open();
        engine.commit_value("1");
        engine.commit_value("3");
        let events = engine.remove_last();
        assert_eq!(events[0], SelectEvent::TagRemoved("3".into()));
        assert!(engine.remove_last().len() == 2);
        assert!(engine.remove_last().is_empty());
    }

    #[test]
    fn clear_emits_cleared_and_change() {
        let mut engine = multi_engine(0);
        engine.open();
        engine.commit_value("1");
        let events = engine.clear();
        assert_eq!(
            events,
            vec![
                SelectEvent::Cleared,
                SelectEvent::Changed(SelectValue::Multi(vec![])),
            ]
        );
        assert!(engine.clear().is_empty());
    }

    #[test]
    fn toggle_alternates_visibility() {
        let mut engine = single_engine();
        assert_eq!(engine.toggle(), vec![SelectEvent::VisibilityChanged(true)]);
        assert_eq!(engine.toggle(), vec![SelectEvent::VisibilityChanged(false)]);
    }

    #[test]
    fn blur_forces_closed() {
        let mut engine = single_engine();
        engine.open();
        assert_eq!(engine.blur(), vec![SelectEvent::VisibilityChanged(false)]);
        assert!(engine.blur().is_empty());
    }

    #[test]
    fn tags_collapse_through_config() {
        let mut engine = multi_engine(0);
        engine.set_collapse_tags(true, 2);
        engine.open();
        engine.commit_value("1");
        engine.commit_value("3");
        engine.create_and_commit("x"); // ignored: allow_create off
        engine.set_allow_create(true);
        engine.create_and_commit("x");
        let row = engine.tags();
        assert_eq!(row.tags.len(), 2);
        assert_eq!(row.overflow, 1);
        assert_eq!(row.tags[0].label, "A");

        engine.set_collapse_tags(false, 0);
        let row = engine.tags();
        assert_eq!(row.tags.len(), 3);
        // The ad hoc value keeps its literal text as label.
        assert_eq!(row.tags[2].label, "x");
    }

    #[test]
    fn set_value_is_silent_controlled_input() {
        let mut engine = multi_engine(0);
        engine.set_value(SelectValue::Multi(vec!["1".into(), "3".into()]));
        assert_eq!(
            engine.value(),
            SelectValue::Multi(vec!["1".into(), "3".into()])
        );
    }
}
