//! Select and combobox widgets for the **matcha** library.
//!
//! The heart of this crate is the [`engine`] module: a headless,
//! synchronous state machine that turns a list of option records into a
//! filterable, optionally multi-valued, keyboard-navigable dropdown. The
//! two widgets — [`combobox::Combobox`] and [`select::Select`] — are thin
//! rendering shells over that engine and implement
//! [`matcha_core::Component`], so they compose freely inside [`ratatui`]
//! layouts.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`options`] | Option records, serialized input parsing, group projection |
//! | [`filter`] | Query filtering and the synthetic create row |
//! | [`selection`] | Committed value state (single scalar or multi list) |
//! | [`panel`] | Open/closed visibility and disabled-skipping focus |
//! | [`tags`] | Removable-tag presentation with overflow collapsing |
//! | [`events`] | Typed notifications and the emitter trait |
//! | [`engine`] | The orchestrating state machine and its configuration |
//! | [`combobox`] | The rich filterable/multi-select/creatable widget |
//! | [`select`] | Lightweight single-value dropdown |
//!
//! # Utilities
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`query`] | Single-line query editing state |
//! | [`runeutil`] | Unicode-aware width and truncation helpers |

pub mod combobox;
pub mod engine;
pub mod events;
pub mod filter;
pub mod options;
pub mod panel;
pub mod query;
pub mod runeutil;
pub mod select;
pub mod selection;
pub mod tags;
