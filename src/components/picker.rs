// ABOUTME: Bottom-sheet single-select picker: overlay state plus its renderer
// Screens describe what to pick with a PickerSpec; the app owns the one visible sheet

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::components::theme;

/// Everything a screen supplies when it asks for a picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerSpec {
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub disabled: bool,
    pub options: Vec<String>,
    pub current: Option<String>,
}

impl PickerSpec {
    pub fn new(label: &str, options: Vec<String>) -> Self {
        Self {
            label: label.to_string(),
            placeholder: None,
            required: false,
            disabled: false,
            options,
            current: None,
        }
    }

    pub fn from_static(label: &str, options: &[&str]) -> Self {
        Self::new(label, options.iter().map(|o| (*o).to_string()).collect())
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn current(mut self, value: &str) -> Self {
        if !value.is_empty() {
            self.current = Some(value.to_string());
        }
        self
    }
}

/// Default trigger placeholder for a picker labelled `label`
pub fn default_placeholder(label: &str) -> String {
    format!("Select {label}...")
}

/// Text shown on the closed trigger: the value, or the placeholder when empty
pub fn trigger_text(value: &str, label: &str, placeholder: Option<&str>) -> String {
    if value.is_empty() {
        placeholder.map_or_else(|| default_placeholder(label), ToString::to_string)
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BottomSheetPicker {
    label: String,
    placeholder: Option<String>,
    required: bool,
    visible: bool,
    options: Vec<String>,
    highlighted: usize,
}

impl BottomSheetPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure from a spec and open it; returns false (nothing opens) when disabled
    pub fn present(&mut self, spec: PickerSpec) -> bool {
        self.label = spec.label;
        self.placeholder = spec.placeholder;
        self.required = spec.required;
        let highlighted = spec
            .current
            .as_ref()
            .and_then(|current| spec.options.iter().position(|o| o == current))
            .unwrap_or(0);
        let opened = self.open(spec.options, spec.disabled);
        if opened {
            self.highlighted = highlighted;
        }
        opened
    }

    /// Show the candidate list; a disabled picker never opens
    pub fn open(&mut self, options: Vec<String>, disabled: bool) -> bool {
        if disabled {
            return false;
        }
        self.options = options;
        self.highlighted = 0;
        self.visible = true;
        true
    }

    /// Close and hand back the highlighted option
    pub fn select(&mut self) -> Option<String> {
        if !self.visible {
            return None;
        }
        self.visible = false;
        self.options.get(self.highlighted).cloned()
    }

    /// Close without choosing
    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    pub fn highlight_next(&mut self) {
        if !self.options.is_empty() {
            self.highlighted = (self.highlighted + 1) % self.options.len();
        }
    }

    pub fn highlight_prev(&mut self) {
        if !self.options.is_empty() {
            self.highlighted = (self.highlighted + self.options.len() - 1) % self.options.len();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn placeholder(&self) -> String {
        self.placeholder
            .clone()
            .unwrap_or_else(|| default_placeholder(&self.label))
    }
}

pub struct PickerComponent;

impl PickerComponent {
    pub fn new() -> Self {
        Self
    }

    /// Sheet anchored to the bottom of `area`, up to half its height
    pub fn render(&self, frame: &mut Frame, area: Rect, picker: &BottomSheetPicker) {
        if !picker.is_visible() {
            return;
        }

        let wanted = u16::try_from(picker.options().len()).unwrap_or(u16::MAX).saturating_add(4);
        let height = wanted.clamp(5, (area.height / 2).max(5)).min(area.height);
        let sheet = Rect {
            x: area.x,
            y: area.y + area.height - height,
            width: area.width,
            height,
        };

        frame.render_widget(Clear, sheet);

        let marker = if picker.is_required() { " *" } else { "" };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::PANEL_BG))
            .title(format!(" {}{} ", picker.label(), marker))
            .title_style(Style::default().fg(theme::GOLD).add_modifier(Modifier::BOLD));
        let inner = block.inner(sheet);
        frame.render_widget(block, sheet);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        if picker.options().is_empty() {
            let empty = Paragraph::new("No options available")
                .style(Style::default().fg(theme::MUTED))
                .alignment(Alignment::Center);
            frame.render_widget(empty, chunks[0]);
        } else {
            let items: Vec<ListItem> = picker
                .options()
                .iter()
                .map(|option| ListItem::new(option.as_str()))
                .collect();
            let list = List::new(items)
                .style(Style::default().fg(theme::TEXT))
                .highlight_style(
                    Style::default()
                        .fg(theme::DARK_BG)
                        .bg(theme::SELECTION)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("› ");
            let mut state = ListState::default().with_selected(Some(picker.highlighted()));
            frame.render_stateful_widget(list, chunks[0], &mut state);
        }

        let hint = Paragraph::new("↑/↓ move • Enter select • Esc close")
            .style(Style::default().fg(theme::MUTED))
            .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[1]);
    }
}
