//! Committed value state for select widgets.
//!
//! The selection references options by value only — removing an option
//! from the store never invalidates a value the user already committed.

/// The externally observable committed value.
///
/// Single mode carries an optional scalar; multi mode an ordered,
/// duplicate-free list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectValue {
    /// Single-select: at most one committed value.
    Single(Option<String>),
    /// Multi-select: committed values in commit order.
    Multi(Vec<String>),
}

impl SelectValue {
    /// Whether no value is committed.
    pub fn is_empty(&self) -> bool {
        match self {
            SelectValue::Single(v) => v.is_none(),
            SelectValue::Multi(v) => v.is_empty(),
        }
    }
}

/// Owns the committed value(s) and enforces the selection ceiling.
///
/// Every mutating operation reports whether the externally observable
/// value changed, so the caller can emit exactly one change notification
/// per logical operation.
#[derive(Debug, Clone)]
pub struct SelectionManager {
    multiple: bool,
    limit: usize,
    values: Vec<String>,
}

impl Default for SelectionManager {
    fn default() -> Self {
        SelectionManager::single()
    }
}

impl SelectionManager {
    /// Single-select manager.
    pub fn single() -> Self {
        Self {
            multiple: false,
            limit: 0,
            values: Vec::new(),
        }
    }

    /// Multi-select manager with a selection ceiling (`0` = unlimited).
    pub fn multi(limit: usize) -> Self {
        Self {
            multiple: true,
            limit,
            values: Vec::new(),
        }
    }

    /// Whether this manager is in multi-select mode.
    pub fn is_multi(&self) -> bool {
        self.multiple
    }

    /// The selection ceiling (`0` = unlimited).
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the ceiling. Values already committed are kept.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    /// Switch between single and multi mode. Switching to single keeps
    /// only the first committed value.
    pub fn set_multiple(&mut self, multiple: bool) {
        self.multiple = multiple;
        if !multiple {
            self.values.truncate(1);
        }
    }

    /// The committed value in its final external form.
    pub fn value(&self) -> SelectValue {
        if self.multiple {
            SelectValue::Multi(self.values.clone())
        } else {
            SelectValue::Single(self.values.first().cloned())
        }
    }

    /// Replace the committed value (initial/controlled input).
    /// A mismatched variant is coerced into the configured mode.
    pub fn set_value(&mut self, value: SelectValue) {
        let incoming: Vec<String> = match value {
            SelectValue::Single(v) => v.into_iter().collect(),
            SelectValue::Multi(v) => v,
        };
        let mut seen: Vec<String> = Vec::with_capacity(incoming.len());
        for v in incoming {
            if !seen.contains(&v) {
                seen.push(v);
            }
        }
        self.values = seen;
        if !self.multiple {
            self.values.truncate(1);
        }
    }

    /// Whether a value is currently committed.
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// Number of committed values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is committed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The committed values in commit order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Whether the ceiling has been reached.
    pub fn at_limit(&self) -> bool {
        self.multiple && self.limit > 0 && self.values.len() >= self.limit
    }

    /// Commit a confirmed choice.
    ///
    /// Single mode replaces the scalar and reports a change only when the
    /// new value differs. Multi mode toggles membership; an add attempt at
    /// the ceiling is a silent no-op.
    pub fn commit(&mut self, value: &str) -> bool {
        if self.multiple {
            if let Some(pos) = self.values.iter().position(|v| v == value) {
                self.values.remove(pos);
                true
            } else if self.at_limit() {
                false
            } else {
                self.values.push(value.to_string());
                true
            }
        } else {
            let changed = self.values.first().map(String::as_str) != Some(value);
            self.values.clear();
            self.values.push(value.to_string());
            changed
        }
    }

    /// Remove a value from a multi-select list (tag close control).
    /// Reports whether the value was present.
    pub fn remove(&mut self, value: &str) -> bool {
        if !self.multiple {
            return false;
        }
        match self.values.iter().position(|v| v == value) {
            Some(pos) => {
                self.values.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove and return the most recently committed value.
    pub fn pop(&mut self) -> Option<String> {
        if self.multiple {
            self.values.pop()
        } else {
            None
        }
    }

    /// Reset to "no selection". Reports whether anything was cleared.
    pub fn clear(&mut self) -> bool {
        if self.values.is_empty() {
            false
        } else {
            self.values.clear();
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_commit_replaces_and_reports_change() {
        let mut sel = SelectionManager::single();
        assert!(sel.commit("a"));
        assert_eq!(sel.value(), SelectValue::Single(Some("a".into())));

        // Same value again: no observable change, but still committed.
        assert!(!sel.commit("a"));
        assert!(sel.commit("b"));
        assert_eq!(sel.value(), SelectValue::Single(Some("b".into())));
    }

    #[test]
    fn multi_commit_toggles_membership() {
        let mut sel = SelectionManager::multi(0);
        assert!(sel.commit("a"));
        assert!(sel.commit("b"));
        assert_eq!(sel.value(), SelectValue::Multi(vec!["a".into(), "b".into()]));

        // Committing an existing value removes it.
        assert!(sel.commit("a"));
        assert_eq!(sel.value(), SelectValue::Multi(vec!["b".into()]));
    }

    #[test]
    fn ceiling_makes_additions_silent_noops() {
        let mut sel = SelectionManager::multi(2);
        assert!(sel.commit("1"));
        assert!(sel.commit("2"));
        assert!(!sel.commit("3"));
        assert_eq!(sel.values(), &["1".to_string(), "2".to_string()]);

        // Toggling off an existing value still works at the ceiling.
        assert!(sel.commit("1"));
        assert_eq!(sel.values(), &["2".to_string()]);
    }

    #[test]
    fn ceiling_never_exceeded_by_any_sequence() {
        let mut sel = SelectionManager::multi(3);
        for v in ["a", "b", "c", "d", "e", "a", "f", "g"] {
            sel.commit(v);
            assert!(sel.len() <= 3);
        }
    }

    #[test]
    fn zero_limit_means_unlimited() {
        let mut sel = SelectionManager::multi(0);
        for i in 0..50 {
            assert!(sel.commit(&i.to_string()));
        }
        assert_eq!(sel.len(), 50);
    }

    #[test]
    fn remove_reports_presence() {
        let mut sel = SelectionManager::multi(0);
        sel.commit("a");
        sel.commit("b");
        assert!(sel.remove("a"));
        assert!(!sel.remove("a"));
        assert_eq!(sel.values(), &["b".to_string()]);
    }

    #[test]
    fn remove_in_single_mode_is_noop() {
        let mut sel = SelectionManager::single();
        sel.commit("a");
        assert!(!sel.remove("a"));
        assert!(!sel.is_empty());
    }

    #[test]
    fn pop_removes_most_recent() {
        let mut sel = SelectionManager::multi(0);
        sel.commit("a");
        sel.commit("b");
        assert_eq!(sel.pop(), Some("b".to_string()));
        assert_eq!(sel.pop(), Some("a".to_string()));
        assert_eq!(sel.pop(), None);
    }

    #[test]
    fn clear_reports_only_when_nonempty() {
        let mut sel = SelectionManager::single();
        assert!(!sel.clear());
        sel.commit("a");
        assert!(sel.clear());
        assert_eq!(sel.value(), SelectValue::Single(None));
    }

    #[test]
    fn set_value_dedupes_and_coerces_mode() {
        let mut sel = SelectionManager::multi(0);
        sel.set_value(SelectValue::Multi(vec![
            "a".into(),
            "b".into(),
            "a".into(),
        ]));
        assert_eq!(sel.values(), &["a".to_string(), "b".to_string()]);

        let mut single = SelectionManager::single();
        single.set_value(SelectValue::Multi(vec!["x".into(), "y".into()]));
        assert_eq!(single.value(), SelectValue::Single(Some("x".into())));
    }

    #[test]
    fn switching_to_single_keeps_first_value() {
        let mut sel = SelectionManager::multi(0);
        sel.commit("a");
        sel.commit("b");
        sel.set_multiple(false);
        assert_eq!(sel.value(), SelectValue::Single(Some("a".into())));
    }
}
