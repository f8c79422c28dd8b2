//! Tag presentation for multi-select values.
//!
//! Turns the committed value list into renderable, removable tags. Values
//! that have disappeared from the option store keep their raw value as the
//! label — the selection deliberately outlives the candidate list.

use crate::options::OptionStore;

/// One removable tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// The committed value this tag stands for.
    pub value: String,
    /// Display label, falling back to the raw value when the option is no
    /// longer in the store.
    pub label: String,
}

/// The renderable tag list, with overflow collapsed into a count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRow {
    /// Individually rendered, removable tags.
    pub tags: Vec<Tag>,
    /// Number of committed values hidden behind the "+N" indicator.
    /// Zero means no indicator. The indicator is not removable and never
    /// counts toward the visible maximum.
    pub overflow: usize,
}

/// Build the tag row for the committed values.
///
/// `collapse` bounds the individually rendered tags; `None` renders every
/// value as its own tag.
pub fn build(values: &[String], store: &OptionStore, collapse: Option<usize>) -> TagRow {
    let visible = match collapse {
        Some(max) => values.len().min(max),
        None => values.len(),
    };
    let tags = values[..visible]
        .iter()
        .map(|value| Tag {
            label: store
                .label_for(value)
                .unwrap_or(value.as_str())
                .to_string(),
            value: value.clone(),
        })
        .collect();
    TagRow {
        tags,
        overflow: values.len() - visible,
    }
}
