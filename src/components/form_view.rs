// ABOUTME: Generic renderer for FormView descriptions: text inputs, picker triggers, tabs, checkboxes, buttons

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::components::theme;
use crate::screens::{FormRow, FormView, RowKind};

pub struct FormComponent;

impl FormComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, view: &FormView) {
        let outer = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::BORDER))
            .style(Style::default().bg(theme::DARK_BG));
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(2), // Subtitle
                Constraint::Min(0),    // Rows
            ])
            .split(inner);

        let title = Paragraph::new(view.title.as_str())
            .style(Style::default().fg(theme::GOLD).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        let subtitle = Paragraph::new(view.subtitle.as_str())
            .style(Style::default().fg(theme::MUTED))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(subtitle, chunks[1]);

        self.render_rows(frame, chunks[2], view);
    }

    fn render_rows(&self, frame: &mut Frame, area: Rect, view: &FormView) {
        let heights: Vec<u16> = view.rows.iter().map(row_height).collect();
        let first = first_visible_row(&heights, view.focused, area.height);

        let mut y = area.y;
        for (index, row) in view.rows.iter().enumerate().skip(first) {
            let height = heights[index];
            if y + height > area.y + area.height {
                break;
            }
            let rect = Rect { x: area.x + 1, y, width: area.width.saturating_sub(2), height };
            self.render_row(frame, rect, row, index == view.focused);
            y += height;
        }
    }

    fn render_row(&self, frame: &mut Frame, area: Rect, row: &FormRow, focused: bool) {
        match &row.kind {
            RowKind::Text { display, placeholder, cursor, masked, revealed } => {
                let line = if display.is_empty() && !focused {
                    Line::from(Span::styled(placeholder.as_str(), Style::default().fg(theme::MUTED)))
                } else if focused {
                    cursor_line(display, *cursor)
                } else {
                    Line::from(Span::styled(display.as_str(), Style::default().fg(theme::TEXT)))
                };
                let mut block = field_block(row, focused);
                if *masked {
                    let toggle = if *revealed { " Ctrl+R hide " } else { " Ctrl+R show " };
                    block = block.title_bottom(
                        Line::from(Span::styled(toggle, Style::default().fg(theme::MUTED)))
                            .alignment(Alignment::Right),
                    );
                }
                frame.render_widget(Paragraph::new(line).block(block), area);
            }
            RowKind::Picker { display, has_value } => {
                let color = if row.disabled {
                    theme::BORDER
                } else if *has_value {
                    theme::TEXT
                } else {
                    theme::MUTED
                };
                let line = Line::from(vec![
                    Span::styled(display.as_str(), Style::default().fg(color)),
                    Span::styled("  ▾", Style::default().fg(theme::MUTED)),
                ]);
                frame.render_widget(Paragraph::new(line).block(field_block(row, focused)), area);
            }
            RowKind::Tabs { options, selected } => {
                let mut spans = Vec::new();
                for (i, option) in options.iter().enumerate() {
                    let style = if Some(i) == *selected {
                        Style::default()
                            .fg(theme::DARK_BG)
                            .bg(theme::SELECTION)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(theme::TEXT)
                    };
                    spans.push(Span::styled(format!(" {option} "), style));
                    if i + 1 < options.len() {
                        spans.push(Span::styled(" │ ", Style::default().fg(theme::BORDER)));
                    }
                }
                let tabs = Paragraph::new(Line::from(spans))
                    .alignment(Alignment::Center)
                    .block(field_block(row, focused));
                frame.render_widget(tabs, area);
            }
            RowKind::Checkbox { checked } => {
                let mark = if *checked { "[x]" } else { "[ ]" };
                let color = if row.invalid { theme::ERROR } else { theme::TEXT };
                let mut style = Style::default().fg(color);
                if focused {
                    style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                }
                let line = Line::from(vec![
                    Span::styled(format!("{mark} "), style),
                    Span::styled(row.label.as_str(), style),
                    required_marker(row),
                ]);
                frame.render_widget(Paragraph::new(line), area);
            }
            RowKind::Button { loading } => {
                let label = if *loading { "Please wait..." } else { row.label.as_str() };
                let style = if row.disabled {
                    Style::default().fg(theme::MUTED).bg(theme::PANEL_BG)
                } else if focused {
                    Style::default()
                        .fg(theme::DARK_BG)
                        .bg(theme::SELECTION)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme::DARK_BG).bg(theme::ACCENT)
                };
                let border = if focused { theme::SELECTION } else { theme::BORDER };
                let button = Paragraph::new(label)
                    .style(style)
                    .alignment(Alignment::Center)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_type(BorderType::Rounded)
                            .border_style(Style::default().fg(border)),
                    );
                frame.render_widget(button, area);
            }
            RowKind::Link => {
                let mut style = Style::default().fg(theme::ACCENT);
                if focused {
                    style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                }
                let link = Paragraph::new(Span::styled(row.label.as_str(), style))
                    .alignment(Alignment::Center);
                frame.render_widget(link, area);
            }
        }
    }
}

impl Default for FormComponent {
    fn default() -> Self {
        Self::new()
    }
}

fn row_height(row: &FormRow) -> u16 {
    match row.kind {
        RowKind::Checkbox { .. } | RowKind::Link => 1,
        _ => 3,
    }
}

/// First row to draw so the focused row fits in `available` lines
fn first_visible_row(heights: &[u16], focused: usize, available: u16) -> usize {
    let mut first = 0;
    let mut used: u16 = heights.iter().take(focused + 1).sum();
    while used > available && first < focused {
        used -= heights[first];
        first += 1;
    }
    first
}

fn required_marker(row: &FormRow) -> Span<'static> {
    if row.required {
        Span::styled(" *", Style::default().fg(theme::ERROR))
    } else {
        Span::raw("")
    }
}

fn field_block(row: &FormRow, focused: bool) -> Block<'_> {
    let border = if row.invalid {
        theme::ERROR
    } else if focused {
        theme::SELECTION
    } else {
        theme::BORDER
    };
    let mut title = vec![Span::styled(
        format!(" {}", row.label),
        Style::default().fg(if row.disabled { theme::MUTED } else { theme::TEXT }),
    )];
    title.push(required_marker(row));
    title.push(Span::raw(" "));

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(Line::from(title));
    if let Some(hint) = &row.hint {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {hint} "),
            Style::default().fg(if row.invalid { theme::ERROR } else { theme::MUTED }),
        )));
    }
    block
}

/// Text with a block cursor at the given character position
fn cursor_line(text: &str, cursor: usize) -> Line<'static> {
    let split = text
        .char_indices()
        .nth(cursor)
        .map_or(text.len(), |(byte, _)| byte);
    let (before, after) = text.split_at(split);
    Line::from(vec![
        Span::styled(before.to_string(), Style::default().fg(theme::TEXT)),
        Span::styled("█", Style::default().fg(theme::SELECTION)),
        Span::styled(after.to_string(), Style::default().fg(theme::TEXT)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_visible_row_scrolls_to_focus() {
        let heights = [3, 3, 3, 1, 3];
        assert_eq!(first_visible_row(&heights, 0, 6), 0);
        assert_eq!(first_visible_row(&heights, 2, 6), 1);
        assert_eq!(first_visible_row(&heights, 4, 7), 2);
    }

    #[test]
    fn test_cursor_line_splits_on_char_boundary() {
        let line = cursor_line("Adé", 2);
        assert_eq!(line.spans[0].content, "Ad");
        assert_eq!(line.spans[2].content, "é");
    }
}
