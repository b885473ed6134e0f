// ABOUTME: Alert dialog component: informational OK alerts and two-button confirmations

use crate::app::alert::{AlertKind, AlertRequest};
use crate::components::theme;
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

pub struct AlertDialogComponent;

impl AlertDialogComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, alert: &AlertRequest) {
        let dialog_width = 60.min(area.width.saturating_sub(4));
        let message_lines = wrapped_height(&alert.message, dialog_width.saturating_sub(2));
        let dialog_height = (message_lines + 5).min(area.height);

        let dialog_area = Rect {
            x: area.x + (area.width - dialog_width) / 2,
            y: area.y + (area.height - dialog_height) / 2,
            width: dialog_width,
            height: dialog_height,
        };

        // Clear only the dialog area so the screen stays visible behind it
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(format!(" {} ", alert.title))
            .title_style(Style::default().fg(theme::GOLD).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::PANEL_BG));
        let inner_area = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Message
                Constraint::Length(2), // Buttons
            ])
            .split(inner_area);

        let message = Paragraph::new(alert.message.as_str())
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(theme::TEXT));
        frame.render_widget(message, chunks[0]);

        match alert.kind {
            AlertKind::Info => {
                let ok = Paragraph::new(alert.confirm_label.as_str())
                    .style(button_style(true))
                    .alignment(Alignment::Center);
                frame.render_widget(ok, chunks[1]);
            }
            AlertKind::Confirm => {
                let button_chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(chunks[1]);

                let confirm = Paragraph::new(alert.confirm_label.as_str())
                    .style(button_style(alert.confirm_selected))
                    .alignment(Alignment::Center);
                frame.render_widget(confirm, button_chunks[0]);

                let cancel = Paragraph::new(alert.cancel_label.as_str())
                    .style(button_style(!alert.confirm_selected))
                    .alignment(Alignment::Center);
                frame.render_widget(cancel, button_chunks[1]);
            }
        }
    }
}

impl Default for AlertDialogComponent {
    fn default() -> Self {
        Self::new()
    }
}

fn button_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(theme::DARK_BG)
            .bg(theme::SELECTION)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme::TEXT)
    }
}

/// Rough line count for `text` wrapped at `width` columns
fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let lines: usize = text
        .lines()
        .map(|line| line.chars().count().max(1).div_ceil(width))
        .sum();
    u16::try_from(lines.max(1)).unwrap_or(u16::MAX)
}
