//! Open/closed visibility and keyboard focus for the option panel.
//!
//! `PanelState` tracks whether the panel is open and which *filtered* row
//! holds keyboard focus. Focus indices are not stable across filtering, so
//! the owner must call [`PanelState::revalidate`] whenever the filtered
//! list changes while open.

/// Visibility and focus state for a dropdown panel.
///
/// Navigation never wraps and never lands on a disabled row: movement
/// skips disabled rows in the travel direction and stays put when nothing
/// focusable remains that way.
#[derive(Debug, Clone, Default)]
pub struct PanelState {
    open: bool,
    focused: Option<usize>,
}

impl PanelState {
    /// Closed panel with no focus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The focused row index into the filtered list, if any.
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Open the panel. Returns `true` on the closed→open transition.
    pub fn open(&mut self) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        true
    }

    /// Close the panel and clear focus, regardless of why it closed.
    /// Returns `true` on the open→closed transition.
    pub fn close(&mut self) -> bool {
        self.focused = None;
        if !self.open {
            return false;
        }
        self.open = false;
        true
    }

    /// Move focus to the next non-disabled row. With no current focus,
    /// starts from the first row.
    pub fn focus_next(&mut self, rows: usize, is_disabled: impl Fn(usize) -> bool) {
        if rows == 0 {
            return;
        }
        let start = match self.focused {
            Some(i) => i + 1,
            None => 0,
        };
        if let Some(next) = (start..rows).find(|&i| !is_disabled(i)) {
            self.focused = Some(next);
        }
    }

    /// Move focus to the previous non-disabled row. With no current
    /// focus, starts from the last row.
    pub fn focus_prev(&mut self, rows: usize, is_disabled: impl Fn(usize) -> bool) {
        if rows == 0 {
            return;
        }
        let end = match self.focused {
            Some(i) => i,
            None => rows,
        };
        if let Some(prev) = (0..end).rev().find(|&i| !is_disabled(i)) {
            self.focused = Some(prev);
        }
    }

    /// Jump to the first non-disabled row.
    pub fn focus_first(&mut self, rows: usize, is_disabled: impl Fn(usize) -> bool) {
        if let Some(first) = (0..rows).find(|&i| !is_disabled(i)) {
            self.focused = Some(first);
        }
    }

    /// Jump to the last non-disabled row.
    pub fn focus_last(&mut self, rows: usize, is_disabled: impl Fn(usize) -> bool) {
        if let Some(last) = (0..rows).rev().find(|&i| !is_disabled(i)) {
            self.focused = Some(last);
        }
    }

    /// Re-derive focus after the filtered list changed: a focus that no
    /// longer addresses a valid, non-disabled row is cleared rather than
    /// left dangling.
    pub fn revalidate(&mut self, rows: usize, is_disabled: impl Fn(usize) -> bool) {
        if let Some(i) = self.focused {
            if i >= rows || is_disabled(i) {
                self.focused = None;
            }
        }
    }
}
