//! Option records and the store that canonicalizes raw option input.
//!
//! Input arrives either as an already-structured list of [`SelectOption`]s
//! or as a serialized (JSON) form of the same, wrapped in [`OptionInput`].
//! The store resolves the input shape exactly once; everything downstream
//! (filtering, selection, rendering) sees only the canonical record list.

use serde::Deserialize;
use thiserror::Error;

/// A single selectable option.
///
/// `value` is the option's identity and is compared by equality; `label`
/// is the display text; `group`, when present, places the option under a
/// named subheading in the dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Unique identity, committed into the selection on confirm.
    pub value: String,
    /// Display text, also the filter target.
    pub label: String,
    /// Disabled options render dimmed and cannot be focused or committed.
    pub disabled: bool,
    /// Optional group subheading this option renders under.
    pub group: Option<String>,
}

impl SelectOption {
    /// Create an option with distinct value and label.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
            group: None,
        }
    }

    /// Create an option whose label equals its value.
    pub fn bare(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            disabled: false,
            group: None,
        }
    }

    /// Set the disabled flag.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Place this option under a named group.
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// Raw option input, resolved once at the store boundary.
///
/// Call sites never branch on the shape anywhere else: both variants
/// produce the same canonical record list.
#[derive(Debug, Clone)]
pub enum OptionInput {
    /// An already-structured ordered list of records.
    Records(Vec<SelectOption>),
    /// A serialized (JSON) form of the same.
    Serialized(String),
}

impl From<Vec<SelectOption>> for OptionInput {
    fn from(records: Vec<SelectOption>) -> Self {
        OptionInput::Records(records)
    }
}

impl From<&str> for OptionInput {
    fn from(text: &str) -> Self {
        OptionInput::Serialized(text.to_string())
    }
}

impl From<String> for OptionInput {
    fn from(text: String) -> Self {
        OptionInput::Serialized(text)
    }
}

/// Error surfaced when serialized option input cannot be parsed.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The serialized form was not valid option JSON.
    #[error("malformed option input: {0}")]
    Parse(#[from] serde_json::Error),
}

// Serialized-form schema. Entries may be grouped objects, option objects,
// or bare scalars (value doubles as label). Scalar values may be strings
// or numbers; numbers are canonicalized to their string form.

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Number(serde_json::Number),
}

impl RawScalar {
    fn into_string(self) -> String {
        match self {
            RawScalar::Text(s) => s,
            RawScalar::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct RawOption {
    value: RawScalar,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    disabled: bool,
    #[serde(default)]
    group: Option<String>,
}

impl RawOption {
    fn into_record(self, inherited_group: Option<&str>) -> SelectOption {
        let value = self.value.into_string();
        SelectOption {
            label: self.label.unwrap_or_else(|| value.clone()),
            value,
            disabled: self.disabled,
            group: inherited_group
                .map(str::to_string)
                .or(self.group),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Group {
        label: String,
        options: Vec<RawOption>,
    },
    Record(RawOption),
    Bare(RawScalar),
}

fn parse_serialized(text: &str) -> Result<Vec<SelectOption>, OptionsError> {
    let entries: Vec<RawEntry> = serde_json::from_str(text)?;
    let mut records = Vec::new();
    for entry in entries {
        match entry {
            RawEntry::Group { label, options } => {
                records.extend(
                    options
                        .into_iter()
                        .map(|raw| raw.into_record(Some(&label))),
                );
            }
            RawEntry::Record(raw) => records.push(raw.into_record(None)),
            RawEntry::Bare(scalar) => records.push(SelectOption::bare(scalar.into_string())),
        }
    }
    Ok(records)
}

/// Drop duplicate values, keeping the last-declared record at its
/// last-declared position.
fn canonicalize(records: Vec<SelectOption>) -> Vec<SelectOption> {
    let mut out: Vec<SelectOption> = Vec::with_capacity(records.len());
    for record in records {
        if let Some(pos) = out.iter().position(|r| r.value == record.value) {
            out.remove(pos);
        }
        out.push(record);
    }
    out
}

/// Grouped projection of the canonical list.
///
/// Derived on demand; never mutated directly. Groups appear in
/// first-appearance order, ungrouped records keep their original order.
#[derive(Debug, Default)]
pub struct OptionGroups<'a> {
    /// Named groups in first-appearance order.
    pub groups: Vec<OptionGroup<'a>>,
    /// Records with no group, in original order.
    pub ungrouped: Vec<&'a SelectOption>,
}

/// One named group within an [`OptionGroups`] projection.
#[derive(Debug)]
pub struct OptionGroup<'a> {
    /// The group subheading.
    pub name: &'a str,
    /// Members in original order.
    pub members: Vec<&'a SelectOption>,
}

/// Owns the canonical option list for the lifetime of the component.
///
/// Loading is soft-failing: malformed serialized input empties the store
/// and returns the diagnostic instead of propagating a fault into
/// rendering. Re-loading identical input always yields identical output.
#[derive(Debug, Clone, Default)]
pub struct OptionStore {
    records: Vec<SelectOption>,
}

impl OptionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the store contents from raw input.
    ///
    /// On parse failure the store becomes empty and the error is returned
    /// for the hosting environment's logging channel; the component stays
    /// fully interactive in its no-data state.
    pub fn load(&mut self, input: OptionInput) -> Result<(), OptionsError> {
        match input {
            OptionInput::Records(records) => {
                self.records = canonicalize(records);
                Ok(())
            }
            OptionInput::Serialized(text) => match parse_serialized(&text) {
                Ok(records) => {
                    self.records = canonicalize(records);
                    Ok(())
                }
                Err(err) => {
                    self.records.clear();
                    Err(err)
                }
            },
        }
    }

    /// The canonical record list.
    pub fn records(&self) -> &[SelectOption] {
        &self.records
    }

    /// Number of canonical records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at a canonical index.
    pub fn get(&self, index: usize) -> Option<&SelectOption> {
        self.records.get(index)
    }

    /// Find the record for a value.
    pub fn find(&self, value: &str) -> Option<&SelectOption> {
        self.records.iter().find(|r| r.value == value)
    }

    /// Display label for a value, if the value is still present.
    pub fn label_for(&self, value: &str) -> Option<&str> {
        self.find(value).map(|r| r.label.as_str())
    }

    /// Build the grouped projection.
    pub fn groups(&self) -> OptionGroups<'_> {
        let mut projection = OptionGroups::default();
        for record in &self.records {
            match &record.group {
                Some(name) => {
                    match projection
                        .groups
                        .iter_mut()
                        .find(|g| g.name == name.as_str())
                    {
                        Some(group) => group.members.push(record),
                        None => projection.groups.push(OptionGroup {
                            name,
                            members: vec![record],
                        }),
                    }
                }
                None => projection.ungrouped.push(record),
            }
        }
        projection
    }
}
