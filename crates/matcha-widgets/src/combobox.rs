//! Filterable, keyboard-navigable combobox with an overlay option panel.
//!
//! `Combobox` composes the headless [`SelectEngine`](crate::engine) with a
//! [`QueryEditor`](crate::query) and renders a trigger line plus a
//! bordered dropdown overlay anchored below it. Engine notifications are
//! re-emitted as [`Message`]s so hosts observe value and visibility
//! changes through the normal update loop.

use crate::engine::{SelectConfig, SelectEngine};
use crate::events::SelectEvent;
use crate::filter::Row;
use crate::options::OptionInput;
use crate::query::{QueryEdit, QueryEditor};
use crate::runeutil;
use crate::selection::SelectValue;
use crate::tags::TagRow;
use crossterm::event::{KeyCode, KeyEvent};
use matcha_core::command::Command;
use matcha_core::component::Component;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::Frame;

/// Messages for the combobox component.
#[derive(Debug, Clone)]
pub enum Message {
    /// A key press event forwarded to the combobox.
    KeyPress(KeyEvent),
    /// The committed value changed.
    Changed(SelectValue),
    /// The option panel opened or closed.
    VisibilityChanged(bool),
    /// The selection was cleared.
    Cleared,
    /// A committed value was removed from the tag row.
    TagRemoved(String),
}

impl From<SelectEvent> for Message {
    fn from(event: SelectEvent) -> Self {
        match event {
            SelectEvent::Changed(value) => Message::Changed(value),
            SelectEvent::VisibilityChanged(open) => Message::VisibilityChanged(open),
            SelectEvent::Cleared => Message::Cleared,
            SelectEvent::TagRemoved(value) => Message::TagRemoved(value),
        }
    }
}

/// Style configuration for the combobox.
#[derive(Debug, Clone)]
pub struct ComboboxStyle {
    /// Trigger line with a committed value.
    pub trigger: Style,
    /// Trigger line showing the placeholder.
    pub placeholder: Style,
    /// Unfocused option rows.
    pub item: Style,
    /// The keyboard-focused row.
    pub focused_item: Style,
    /// Disabled option rows.
    pub disabled_item: Style,
    /// Group subheadings.
    pub group_header: Style,
    /// Hint text (loading / no data / no match).
    pub hint: Style,
    /// The synthetic create row.
    pub create_item: Style,
}

impl Default for ComboboxStyle {
    fn default() -> Self {
        Self {
            trigger: Style::default(),
            placeholder: Style::default().fg(Color::DarkGray),
            item: Style::default(),
            focused_item: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            disabled_item: Style::default().add_modifier(Modifier::DIM),
            group_header: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            hint: Style::default().fg(Color::DarkGray),
            create_item: Style::default().fg(Color::Green),
        }
    }
}

/// One rendered line of the open panel.
enum PanelLine<'a> {
    Header(&'a str),
    Row(usize),
}

/// A filterable, multi-value-capable dropdown select.
///
/// # Example
///
/// ```ignore
/// use matcha_widgets::combobox::Combobox;
///
/// let combobox = Combobox::new()
///     .with_placeholder("Pick a fruit")
///     .filterable(true)
///     .with_options(vec![]);
/// ```
pub struct Combobox {
    engine: SelectEngine,
    query: QueryEditor,
    max_visible: usize,
    offset: usize,
    style: ComboboxStyle,
    block: Option<Block<'static>>,
}

impl Combobox {
    /// Create a combobox with default configuration.
    pub fn new() -> Self {
        Self::with_config(SelectConfig::default())
    }

    /// Create a combobox from an explicit engine configuration.
    pub fn with_config(config: SelectConfig) -> Self {
        Self {
            engine: SelectEngine::new(config),
            query: QueryEditor::new(),
            max_visible: 8,
            offset: 0,
            style: ComboboxStyle::default(),
            block: Some(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            ),
        }
    }

    /// Set the options (structured or serialized).
    pub fn with_options(mut self, input: impl Into<OptionInput>) -> Self {
        self.engine.load_options(input);
        self
    }

    /// Set the placeholder shown when nothing is selected.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.engine.set_placeholder(placeholder.into());
        self
    }

    /// Enable multi-select mode.
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.engine.set_multiple(multiple);
        self
    }

    /// Cap the number of committed values in multi mode (`0` = unlimited).
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.engine.set_multiple_limit(limit);
        self
    }

    /// Enable free-text filtering.
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.engine.set_filterable(filterable);
        self
    }

    /// Allow committing query text that matches no option.
    pub fn allow_create(mut self, allow: bool) -> Self {
        self.engine.set_allow_create(allow);
        self
    }

    /// Expose the clear affordance (Delete key) when a value is present.
    pub fn clearable(mut self, clearable: bool) -> Self {
        self.engine.set_clearable(clearable);
        self
    }

    /// Collapse overflowing tags into a "+N" indicator.
    pub fn collapse_tags(mut self, max_visible: usize) -> Self {
        self.engine.set_collapse_tags(true, max_visible);
        self
    }

    /// Disable the whole component.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.engine.set_disabled(disabled);
        self
    }

    /// Set the maximum number of visible panel lines before scrolling.
    pub fn with_max_visible(mut self, max: usize) -> Self {
        self.max_visible = max.max(1);
        self
    }

    /// Set the style configuration.
    pub fn with_style(mut self, style: ComboboxStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the panel block, or `None` for a borderless panel.
    pub fn with_block(mut self, block: Option<Block<'static>>) -> Self {
        self.block = block;
        self
    }

    /// Set the committed value programmatically. Emits nothing.
    pub fn set_value(&mut self, value: SelectValue) {
        self.engine.set_value(value);
    }

    /// Replace the options (mutable variant).
    pub fn set_options(&mut self, input: impl Into<OptionInput>) {
        self.engine.load_options(input);
    }

    /// The committed value.
    pub fn value(&self) -> SelectValue {
        self.engine.value()
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.engine.is_open()
    }

    /// The current filter query.
    pub fn query(&self) -> &str {
        self.engine.query()
    }

    /// The tag row rendered in the trigger (multi mode).
    pub fn tags(&self) -> TagRow {
        self.engine.tags()
    }

    /// Direct access to the underlying engine.
    pub fn engine(&self) -> &SelectEngine {
        &self.engine
    }

    /// Force the panel closed, as on focus loss.
    pub fn blur(&mut self) -> Command<Message> {
        let events = self.engine.blur();
        self.query.reset();
        emit(events)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        if self.engine.config().disabled {
            return Command::none();
        }
        if !self.engine.is_open() {
            return match key.code {
                // Space is reserved for the query when filterable.
                KeyCode::Char(' ') if !self.engine.config().filterable => {
                    emit(self.engine.open())
                }
                KeyCode::Enter | KeyCode::Down => emit(self.engine.open()),
                KeyCode::Delete if self.engine.config().clearable => emit(self.engine.clear()),
                _ => Command::none(),
            };
        }

        match key.code {
            KeyCode::Esc => {
                self.query.reset();
                emit(self.engine.close())
            }
            KeyCode::Up => {
                self.engine.focus_prev();
                self.scroll_to_focus();
                Command::none()
            }
            KeyCode::Down => {
                self.engine.focus_next();
                self.scroll_to_focus();
                Command::none()
            }
            KeyCode::Home => {
                self.engine.focus_first();
                self.scroll_to_focus();
                Command::none()
            }
            KeyCode::End => {
                self.engine.focus_last();
                self.scroll_to_focus();
                Command::none()
            }
            KeyCode::Enter => {
                let events = self.engine.commit_focused();
                if !self.engine.is_open() {
                    self.query.reset();
                }
                emit(events)
            }
            KeyCode::Delete if self.engine.config().clearable && self.query.is_empty() => {
                emit(self.engine.clear())
            }
            _ if self.engine.config().filterable => match self.query.handle_key(key) {
                QueryEdit::Changed => {
                    self.engine.set_query(self.query.value());
                    self.offset = 0;
                    Command::none()
                }
                QueryEdit::BackspaceOnEmpty => emit(self.engine.remove_last()),
                QueryEdit::CursorMoved | QueryEdit::Ignored => Command::none(),
            },
            KeyCode::Backspace => emit(self.engine.remove_last()),
            _ => Command::none(),
        }
    }

    /// The panel lines in display order: group subheadings interleaved
    /// with filtered rows, then the create row.
    fn panel_lines(&self) -> Vec<PanelLine<'_>> {
        let store = self.engine.store();
        let filtered = self.engine.filtered();
        let mut lines = Vec::new();
        let mut current_group: Option<&str> = None;
        for (row, &index) in filtered.indices().iter().enumerate() {
            if let Some(option) = store.get(index) {
                let group = option.group.as_deref();
                if group != current_group {
                    if let Some(name) = group {
                        lines.push(PanelLine::Header(name));
                    }
                    current_group = group;
                }
            }
            lines.push(PanelLine::Row(row));
        }
        if filtered.create_text().is_some() {
            lines.push(PanelLine::Row(filtered.indices().len()));
        }
        lines
    }

    fn scroll_to_focus(&mut self) {
        let Some(focused) = self.engine.focused() else {
            self.offset = 0;
            return;
        };
        let lines = self.panel_lines();
        let Some(pos) = lines
            .iter()
            .position(|line| matches!(line, PanelLine::Row(r) if *r == focused))
        else {
            return;
        };
        if pos < self.offset {
            self.offset = pos;
        } else if pos >= self.offset + self.max_visible {
            self.offset = pos + 1 - self.max_visible;
        }
    }

    fn trigger_line(&self) -> Line<'static> {
        let open_marker = if self.engine.is_open() { "▴ " } else { "▾ " };
        let mut spans = vec![Span::raw(open_marker.to_string())];

        if self.engine.config().multiple {
            let row = self.engine.tags();
            for tag in &row.tags {
                spans.push(Span::styled(
                    format!("[{}] ", tag.label),
                    self.style.trigger,
                ));
            }
            if row.overflow > 0 {
                spans.push(Span::styled(
                    format!("[+{}] ", row.overflow),
                    self.style.trigger,
                ));
            }
            if row.tags.is_empty() && row.overflow == 0 && !self.editing_query() {
                spans.push(Span::styled(
                    self.engine.config().placeholder.clone(),
                    self.style.placeholder,
                ));
            }
        } else if !self.editing_query() {
            match self.engine.selected_label() {
                Some(label) => spans.push(Span::styled(label, self.style.trigger)),
                None => spans.push(Span::styled(
                    self.engine.config().placeholder.clone(),
                    self.style.placeholder,
                )),
            }
        }

        if self.editing_query() {
            spans.push(Span::styled(self.query.value(), self.style.trigger));
            spans.push(Span::styled(
                "█".to_string(),
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        Line::from(spans)
    }

    fn editing_query(&self) -> bool {
        self.engine.is_open() && self.engine.config().filterable
    }

    fn render_panel(&self, frame: &mut Frame, anchor: Rect) {
        let lines = self.panel_lines();
        let hint = self.engine.panel_hint();
        let content_lines = if hint.is_some() { 1 } else { lines.len() };
        let visible = content_lines.min(self.max_visible).max(1);
        let border = if self.block.is_some() { 2 } else { 0 };
        let height = (visible + border) as u16;

        let area = Rect::new(anchor.x, anchor.y + anchor.height, anchor.width, height);
        if area.height == 0 || area.width < 4 {
            return;
        }
        frame.render_widget(Clear, area);

        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                frame.render_widget(block.clone(), area);
                inner
            }
            None => area,
        };

        if let Some(text) = hint {
            let row_area = Rect { height: 1, ..inner };
            frame.render_widget(
                Paragraph::new(Span::styled(text.to_string(), self.style.hint)),
                row_area,
            );
            return;
        }

        let width = inner.width as usize;
        for (i, line) in lines.iter().skip(self.offset).take(visible).enumerate() {
            let row_area = Rect {
                y: inner.y + i as u16,
                height: 1,
                ..inner
            };
            let rendered = match line {
                PanelLine::Header(name) => Span::styled(
                    runeutil::truncate(name, width, "…"),
                    self.style.group_header,
                ),
                PanelLine::Row(row) => self.render_row(*row, width),
            };
            frame.render_widget(Paragraph::new(rendered), row_area);
        }
    }

    fn render_row(&self, row: usize, width: usize) -> Span<'static> {
        let focused = self.engine.focused() == Some(row);
        let marker = if focused { "▸ " } else { "  " };
        let text_width = width.saturating_sub(4);
        match self.engine.filtered().row(self.engine.store(), row) {
            Some(Row::Option(option)) => {
                let check = if self.engine.is_selected(&option.value) {
                    "✓ "
                } else {
                    "  "
                };
                let style = if option.disabled {
                    self.style.disabled_item
                } else if focused {
                    self.style.focused_item
                } else {
                    self.style.item
                };
                Span::styled(
                    format!(
                        "{}{}{}",
                        marker,
                        check,
                        runeutil::truncate(&runeutil::sanitize(&option.label), text_width, "…"),
                    ),
                    style,
                )
            }
            Some(Row::Create(text)) => {
                let style = if focused {
                    self.style.focused_item
                } else {
                    self.style.create_item
                };
                Span::styled(
                    format!(
                        "{}+ Create \"{}\"",
                        marker,
                        runeutil::truncate(text, text_width.saturating_sub(10), "…"),
                    ),
                    style,
                )
            }
            None => Span::raw(String::new()),
        }
    }
}

impl Default for Combobox {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Combobox {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) => self.handle_key(key),
            // Re-emitted notifications are for the host, not for us.
            Message::Changed(_)
            | Message::VisibilityChanged(_)
            | Message::Cleared
            | Message::TagRemoved(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, anchor: Rect) {
        let trigger_area = Rect { height: 1, ..anchor };
        frame.render_widget(Paragraph::new(self.trigger_line()), trigger_area);
        if self.engine.is_open() {
            self.render_panel(frame, trigger_area);
        }
    }

    fn focused(&self) -> bool {
        self.engine.is_open()
    }
}

fn emit(events: Vec<SelectEvent>) -> Command<Message> {
    Command::batch(
        events
            .into_iter()
            .map(|event| Command::message(Message::from(event))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SelectOption;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn fruits() -> Vec<SelectOption> {
        vec![
            SelectOption::new("a", "Apple"),
            SelectOption::new("b", "Banana").disabled(true),
            SelectOption::new("c", "Cherry"),
        ]
    }

    fn press(combobox: &mut Combobox, code: KeyCode) -> Vec<Message> {
        combobox
            .update(Message::KeyPress(key(code)))
            .into_messages()
    }

    fn type_str(combobox: &mut Combobox, s: &str) {
        for c in s.chars() {
            press(combobox, KeyCode::Char(c));
        }
    }

    #[test]
    fn enter_opens_then_commits() {
        let mut combobox = Combobox::new().with_options(fruits());
        let msgs = press(&mut combobox, KeyCode::Enter);
        assert!(matches!(msgs[0], Message::VisibilityChanged(true)));
        assert!(combobox.is_open());

        press(&mut combobox, KeyCode::Down);
        let msgs = press(&mut combobox, KeyCode::Enter);
        assert!(matches!(&msgs[0], Message::Changed(SelectValue::Single(Some(v))) if v == "a"));
        assert!(matches!(msgs[1], Message::VisibilityChanged(false)));
        assert!(!combobox.is_open());
    }

    #[test]
    fn space_and_down_open_when_closed() {
        let mut combobox = Combobox::new().with_options(fruits());
        press(&mut combobox, KeyCode::Char(' '));
        assert!(combobox.is_open());

        let mut combobox = Combobox::new().with_options(fruits());
        press(&mut combobox, KeyCode::Down);
        assert!(combobox.is_open());
    }

    #[test]
    fn navigation_skips_disabled_option() {
        let mut combobox = Combobox::new().with_options(fruits());
        press(&mut combobox, KeyCode::Enter);
        press(&mut combobox, KeyCode::Down);
        assert_eq!(combobox.engine().focused(), Some(0));
        press(&mut combobox, KeyCode::Down);
        assert_eq!(combobox.engine().focused(), Some(2));
    }

    #[test]
    fn esc_closes_and_resets_query() {
        let mut combobox = Combobox::new().filterable(true).with_options(fruits());
        press(&mut combobox, KeyCode::Enter);
        type_str(&mut combobox, "che");
        assert_eq!(combobox.query(), "che");

        let msgs = press(&mut combobox, KeyCode::Esc);
        assert!(matches!(msgs[0], Message::VisibilityChanged(false)));
        assert_eq!(combobox.query(), "");
    }

    #[test]
    fn typing_filters_the_panel() {
        let mut combobox = Combobox::new().filterable(true).with_options(fruits());
        press(&mut combobox, KeyCode::Enter);
        type_str(&mut combobox, "an");
        assert_eq!(combobox.engine().filtered().indices(), &[1]);
    }

    #[test]
    fn typing_without_filterable_is_ignored() {
        let mut combobox = Combobox::new().with_options(fruits());
        press(&mut combobox, KeyCode::Enter);
        type_str(&mut combobox, "an");
        assert_eq!(combobox.query(), "");
        assert_eq!(combobox.engine().filtered().indices(), &[0, 1, 2]);
    }

    #[test]
    fn multi_commit_keeps_panel_open_and_backspace_removes() {
        let mut combobox = Combobox::new()
            .multiple(true)
            .filterable(true)
            .with_options(fruits());
        press(&mut combobox, KeyCode::Enter);
        press(&mut combobox, KeyCode::Down);
        let msgs = press(&mut combobox, KeyCode::Enter);
        assert!(matches!(msgs[0], Message::Changed(_)));
        assert!(combobox.is_open());

        // Backspace with an empty query removes the newest tag.
        let msgs = press(&mut combobox, KeyCode::Backspace);
        assert!(matches!(&msgs[0], Message::TagRemoved(v) if v == "a"));
        assert_eq!(combobox.value(), SelectValue::Multi(vec![]));
    }

    #[test]
    fn delete_clears_when_clearable() {
        let mut combobox = Combobox::new().clearable(true).with_options(fruits());
        combobox.set_value(SelectValue::Single(Some("a".into())));
        let msgs = press(&mut combobox, KeyCode::Delete);
        assert!(matches!(msgs[0], Message::Cleared));
        assert!(matches!(msgs[1], Message::Changed(SelectValue::Single(None))));
    }

    #[test]
    fn delete_without_clearable_does_nothing() {
        let mut combobox = Combobox::new().with_options(fruits());
        combobox.set_value(SelectValue::Single(Some("a".into())));
        assert!(press(&mut combobox, KeyCode::Delete).is_empty());
        assert_eq!(combobox.value(), SelectValue::Single(Some("a".into())));
    }

    #[test]
    fn disabled_combobox_ignores_keys() {
        let mut combobox = Combobox::new().disabled(true).with_options(fruits());
        assert!(press(&mut combobox, KeyCode::Enter).is_empty());
        assert!(!combobox.is_open());
    }

    #[test]
    fn create_flow_commits_query_text() {
        let mut combobox = Combobox::new()
            .filterable(true)
            .allow_create(true)
            .with_options(fruits());
        press(&mut combobox, KeyCode::Enter);
        type_str(&mut combobox, "kiwi");
        assert_eq!(combobox.engine().filtered().create_text(), Some("kiwi"));

        press(&mut combobox, KeyCode::Down);
        let msgs = press(&mut combobox, KeyCode::Enter);
        assert!(matches!(&msgs[0], Message::Changed(SelectValue::Single(Some(v))) if v == "kiwi"));
        assert_eq!(combobox.query(), "");
    }

    #[test]
    fn blur_closes_the_panel() {
        let mut combobox = Combobox::new().with_options(fruits());
        press(&mut combobox, KeyCode::Enter);
        let msgs = combobox.blur().into_messages();
        assert!(matches!(msgs[0], Message::VisibilityChanged(false)));
        assert!(!combobox.focused());
    }

    #[test]
    fn scroll_offset_follows_focus() {
        let options: Vec<SelectOption> = (0..10)
            .map(|i| SelectOption::new(i.to_string(), format!("Item {i}")))
            .collect();
        let mut combobox = Combobox::new().with_options(options).with_max_visible(3);
        press(&mut combobox, KeyCode::Enter);
        for _ in 0..5 {
            press(&mut combobox, KeyCode::Down);
        }
        assert_eq!(combobox.engine().focused(), Some(4));
        assert_eq!(combobox.offset, 2);

        press(&mut combobox, KeyCode::Home);
        assert_eq!(combobox.offset, 0);
    }

    #[test]
    fn panel_lines_interleave_group_headers() {
        let mut combobox = Combobox::new().with_options(vec![
            SelectOption::new("1", "One").in_group("Odd"),
            SelectOption::new("2", "Two").in_group("Even"),
            SelectOption::new("0", "Zero"),
        ]);
        press(&mut combobox, KeyCode::Enter);
        let lines = combobox.panel_lines();
        assert_eq!(lines.len(), 5);
        assert!(matches!(lines[0], PanelLine::Header("Odd")));
        assert!(matches!(lines[1], PanelLine::Row(0)));
        assert!(matches!(lines[2], PanelLine::Header("Even")));
        assert!(matches!(lines[4], PanelLine::Row(2)));
    }
}
