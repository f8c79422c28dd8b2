//! Lightweight single-value dropdown picker.
//!
//! A thin, non-filterable front end over the same engine the
//! [`Combobox`](crate::combobox::Combobox) uses: one trigger line, an
//! overlay option list, keyboard navigation, no query input and no tags.
//! Reach for [`Combobox`](crate::combobox::Combobox) when filtering,
//! multi-select, or ad hoc values are needed.

use crate::engine::{SelectConfig, SelectEngine};
use crate::events::SelectEvent;
use crate::options::OptionInput;
use crate::runeutil;
use crate::selection::SelectValue;
use crossterm::event::{KeyCode, KeyEvent};
use matcha_core::command::Command;
use matcha_core::component::Component;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::Frame;

/// Messages for the select component.
#[derive(Debug, Clone)]
pub enum Message {
    /// A key press event forwarded to the select component.
    KeyPress(KeyEvent),
    /// Request to open the option panel.
    Open,
    /// Request to close the option panel.
    Close,
    /// Emitted when the committed value changes.
    Changed(SelectValue),
    /// Emitted when the panel opens or closes.
    VisibilityChanged(bool),
}

/// Visual style configuration for the [`Select`] component.
#[derive(Debug, Clone)]
pub struct SelectStyle {
    /// Style applied to normal option text.
    pub normal: Style,
    /// Style applied to the keyboard-focused option.
    pub focused: Style,
    /// Style applied to disabled options.
    pub disabled: Style,
}

impl Default for SelectStyle {
    fn default() -> Self {
        Self {
            normal: Style::default(),
            focused: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            disabled: Style::default().add_modifier(Modifier::DIM),
        }
    }
}

/// A single-value dropdown picker with keyboard focus tracking.
pub struct Select {
    engine: SelectEngine,
    focus: bool,
    max_visible: usize,
    offset: usize,
    style: SelectStyle,
    block: Option<Block<'static>>,
}

impl Select {
    /// Create a select over the given options.
    pub fn new(options: impl Into<OptionInput>) -> Self {
        let mut engine = SelectEngine::new(SelectConfig::default());
        engine.load_options(options);
        Self {
            engine,
            focus: false,
            max_visible: 10,
            offset: 0,
            style: SelectStyle::default(),
            block: Some(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            ),
        }
    }

    /// Set the placeholder text shown when no option is selected.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.engine.set_placeholder(placeholder.into());
        self
    }

    /// Set the visual style for this select component.
    pub fn with_style(mut self, style: SelectStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the panel block, or `None` for a borderless panel.
    pub fn with_block(mut self, block: Option<Block<'static>>) -> Self {
        self.block = block;
        self
    }

    /// Set the maximum number of visible options before scrolling.
    pub fn with_max_visible(mut self, max: usize) -> Self {
        self.max_visible = max.max(1);
        self
    }

    /// Give this select component keyboard focus.
    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Remove keyboard focus and close the panel if open.
    pub fn blur(&mut self) -> Command<Message> {
        self.focus = false;
        emit(self.engine.blur())
    }

    /// The committed value, if any.
    pub fn selected_value(&self) -> Option<String> {
        match self.engine.value() {
            SelectValue::Single(value) => value,
            SelectValue::Multi(_) => None,
        }
    }

    /// Set the committed value programmatically. Emits nothing.
    pub fn set_value(&mut self, value: Option<String>) {
        self.engine.set_value(SelectValue::Single(value));
    }

    /// Replace the options.
    pub fn set_options(&mut self, input: impl Into<OptionInput>) {
        self.engine.load_options(input);
    }

    /// Direct access to the underlying engine.
    pub fn engine(&self) -> &SelectEngine {
        &self.engine
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        if !self.engine.is_open() {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => emit(self.engine.open()),
                _ => Command::none(),
            };
        }
        match key.code {
            KeyCode::Esc => emit(self.engine.close()),
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
            KeyCode::Enter => emit(self.engine.commit_focused()),
            _ => Command::none(),
        }
    }

    fn scroll_to_focus(&mut self) {
        let Some(focused) = self.engine.focused() else {
            self.offset = 0;
            return;
        };
        if focused < self.offset {
            self.offset = focused;
        } else if focused >= self.offset + self.max_visible {
            self.offset = focused + 1 - self.max_visible;
        }
    }

    fn render_panel(&self, frame: &mut Frame, anchor: Rect) {
        let filtered = self.engine.filtered();
        let hint = self.engine.panel_hint();
        let content = if hint.is_some() {
            1
        } else {
            filtered.row_count()
        };
        let visible = content.min(self.max_visible).max(1);
        let border = if self.block.is_some() { 2 } else { 0 };
        let area = Rect::new(
            anchor.x,
            anchor.y + anchor.height,
            anchor.width,
            (visible + border) as u16,
        );
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
            frame.render_widget(
                Paragraph::new(Span::styled(
                    text.to_string(),
                    Style::default().fg(Color::DarkGray),
                )),
                Rect { height: 1, ..inner },
            );
            return;
        }

        let store = self.engine.store();
        let width = inner.width.saturating_sub(2) as usize;
        for (row, &index) in filtered
            .indices()
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(visible)
        {
            let Some(option) = store.get(index) else {
                continue;
            };
            let focused = self.engine.focused() == Some(row);
            let style = if option.disabled {
                self.style.disabled
            } else if focused {
                self.style.focused
            } else {
                self.style.normal
            };
            let marker = if focused { "▸ " } else { "  " };
            let text = format!(
                "{}{}",
                marker,
                runeutil::truncate(&runeutil::sanitize(&option.label), width, "…"),
            );
            frame.render_widget(
                Paragraph::new(Span::styled(text, style)),
                Rect {
                    y: inner.y + (row - self.offset) as u16,
                    height: 1,
                    ..inner
                },
            );
        }
    }
}

impl Component for Select {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => self.handle_key(key),
            Message::Open => emit(self.engine.open()),
            Message::Close => emit(self.engine.close()),
            _ => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let trigger_area = Rect { height: 1, ..area };
        let display = match self.engine.selected_label() {
            Some(label) => Span::styled(label, self.style.normal),
            None => Span::styled(
                self.engine.config().placeholder.clone(),
                Style::default().fg(Color::DarkGray),
            ),
        };
        let arrow = if self.engine.is_open() { " ▴" } else { " ▾" };
        let line = Line::from(vec![
            display,
            Span::styled(arrow.to_string(), Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line), trigger_area);

        if self.engine.is_open() {
            self.render_panel(frame, trigger_area);
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

fn emit(events: Vec<SelectEvent>) -> Command<Message> {
    Command::batch(
        events
            .into_iter()
            .filter_map(|event| match event {
                SelectEvent::Changed(value) => Some(Message::Changed(value)),
                SelectEvent::VisibilityChanged(open) => Some(Message::VisibilityChanged(open)),
                SelectEvent::Cleared | SelectEvent::TagRemoved(_) => None,
            })
            .map(Command::message),
    )
}
