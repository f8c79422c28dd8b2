//! **matcha** -- filterable select and combobox widgets for [`ratatui`].
//!
//! This is the umbrella crate that re-exports everything you need from a
//! single dependency:
//!
//! ```toml
//! [dependencies]
//! matcha = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`matcha_core`] are available at the crate root
//!   ([`Component`], [`Command`]).
//! * The [`widgets`] module re-exports everything from [`matcha_widgets`]
//!   (the select engine, the `Combobox` and `Select` widgets, and their
//!   supporting types).
//! * [`ratatui`] and [`crossterm`] are re-exported so downstream crates do
//!   not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use matcha::widgets::combobox::{Combobox, Message};
//! use matcha::Component;
//!
//! let mut combobox = Combobox::new()
//!     .with_placeholder("Pick a fruit")
//!     .filterable(true)
//!     .with_options(r#"["apple", "banana", "cherry"]"#);
//!
//! // Feed it key events from your update loop:
//! // let cmd = combobox.update(Message::KeyPress(key));
//! // and render it inside view:
//! // combobox.view(frame, area);
//! ```

pub use matcha_core::*;
pub mod widgets {
    pub use matcha_widgets::*;
}

// Re-export dependencies for downstream crates
pub use crossterm;
pub use ratatui;
