//! Core seams for the **matcha** widget library.
//!
//! `matcha-core` defines the two types every matcha widget is written
//! against, following the [Elm Architecture]: state lives in a struct, all
//! mutation goes through **update**, and rendering goes through **view**.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Component`] | A reusable widget that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Messages a widget hands back to its parent after an update |
//!
//! Unlike a full application framework, matcha widgets perform no side
//! effects of their own: every operation completes synchronously inside
//! `update`, and a [`Command`] only carries messages (or a quit request)
//! back up the tree. Parents embed a child's message type in their own and
//! translate with [`Command::map`].
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;

pub use command::Command;
pub use component::Component;
