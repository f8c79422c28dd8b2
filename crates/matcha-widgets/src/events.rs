//! Typed notifications emitted by the select engine.
//!
//! The engine returns its events synchronously from each mutating
//! operation, so it can be tested without any rendering environment. The
//! [`SelectEmitter`] trait offers a callback-style surface for hosts that
//! prefer one handler per notification kind.

use crate::selection::SelectValue;

/// A notification produced by a select engine operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectEvent {
    /// The committed value changed; carries the new value in its final
    /// external form. At most one per logical operation.
    Changed(SelectValue),
    /// The panel opened (`true`) or closed (`false`).
    VisibilityChanged(bool),
    /// The selection was reset through the clear affordance.
    Cleared,
    /// A tag's close control removed this value.
    TagRemoved(String),
}

/// Callback surface with one method per notification kind.
///
/// All methods default to no-ops so hosts override only what they observe.
/// [`dispatch`](SelectEmitter::dispatch) fans an event batch out to the
/// per-kind methods in order.
pub trait SelectEmitter {
    /// The committed value changed.
    fn changed(&mut self, _value: &SelectValue) {}

    /// The panel opened or closed.
    fn visibility_changed(&mut self, _open: bool) {}

    /// The selection was cleared.
    fn cleared(&mut self) {}

    /// A tag was removed.
    fn tag_removed(&mut self, _value: &str) {}

    /// Deliver a batch of events to the per-kind methods, in order.
    fn dispatch(&mut self, events: &[SelectEvent]) {
        for event in events {
            match event {
                SelectEvent::Changed(value) => self.changed(value),
                SelectEvent::VisibilityChanged(open) => self.visibility_changed(*open),
                SelectEvent::Cleared => self.cleared(),
                SelectEvent::TagRemoved(value) => self.tag_removed(value),
            }
        }
    }
}
