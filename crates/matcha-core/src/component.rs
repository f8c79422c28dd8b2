use crate::command::Command;
use ratatui::{layout::Rect, Frame};

/// A reusable widget that renders into a given [`Rect`] area.
///
/// A `Component` owns its state, mutates it in [`update`](Component::update),
/// and draws it in [`view`](Component::view). The parent decides *where* the
/// widget renders by passing a sub-region of the frame, and *which* widget
/// receives keyboard input by consulting [`focused`](Component::focused).
///
/// # Composition pattern
///
/// Wrap the child's message type in a variant of the parent message and use
/// [`Command::map`] to translate commands:
///
/// ```rust,ignore
/// use matcha_core::{Component, Command};
///
/// struct Form { country: Combobox }
///
/// enum FormMsg { Country(combobox::Message) }
///
/// impl Form {
///     fn update(&mut self, msg: FormMsg) -> Command<FormMsg> {
///         match msg {
///             FormMsg::Country(m) => self.country.update(m).map(FormMsg::Country),
///         }
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    ///
    /// Parent models typically wrap this in one of their own message
    /// variants so that events can be routed to the correct child.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] carrying
    /// any notifications the parent should observe.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into a specific `area` of the [`Frame`].
    ///
    /// Implementations should confine all rendering to the given rectangle
    /// (overlays may extend below it, as dropdown panels do).
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Whether this component currently has focus.
    ///
    /// This is a hint for input routing. A parent can query `focused()` to
    /// decide which child should receive keyboard events. The default
    /// implementation returns `false`.
    fn focused(&self) -> bool {
        false
    }
}
