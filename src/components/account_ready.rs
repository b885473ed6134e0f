// ABOUTME: Final screen renderer: headline, account details and the restart hint

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::components::theme;
use crate::screens::AccountReadyScreen;

pub struct AccountReadyComponent;

impl AccountReadyComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, screen: &AccountReadyScreen) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::SELECTION))
            .style(Style::default().bg(theme::DARK_BG));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled("✓", Style::default().fg(theme::SELECTION))),
            Line::from(""),
            Line::from(Span::styled(
                screen.headline(),
                Style::default().fg(theme::GOLD).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (label, value) in screen.details() {
            lines.push(Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(theme::MUTED)),
                Span::styled(value, Style::default().fg(theme::TEXT)),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme::GOLD).add_modifier(Modifier::BOLD)),
            Span::styled(" start over  ", Style::default().fg(theme::MUTED)),
            Span::styled("Ctrl+C", Style::default().fg(theme::GOLD).add_modifier(Modifier::BOLD)),
            Span::styled(" quit", Style::default().fg(theme::MUTED)),
        ]));

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }
}

impl Default for AccountReadyComponent {
    fn default() -> Self {
        Self::new()
    }
}
