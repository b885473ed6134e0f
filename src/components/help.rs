// ABOUTME: Help overlay component displaying keyboard shortcuts

use ratatui::{
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem},
};

use crate::components::theme;

pub struct HelpComponent;

impl HelpComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 80, area);

        frame.render_widget(Clear, popup_area);

        let heading = Style::default().fg(theme::GOLD).add_modifier(Modifier::BOLD);
        let help_items = vec![
            ListItem::new("Navigation:").style(heading),
            ListItem::new("  Tab/↓      Next field"),
            ListItem::new("  S-Tab/↑    Previous field"),
            ListItem::new("  Enter      Activate button, link or picker"),
            ListItem::new("  Esc        Go back (quit on the first screen)"),
            ListItem::new(""),
            ListItem::new("Editing:").style(heading),
            ListItem::new("  ←/→        Move cursor, switch tabs or slides"),
            ListItem::new("  Home/End   Jump to start/end"),
            ListItem::new("  Space      Toggle checkbox"),
            ListItem::new("  Ctrl+R     Show/hide password"),
            ListItem::new("  Ctrl+V     Paste from clipboard"),
            ListItem::new(""),
            ListItem::new("Pickers and alerts:").style(heading),
            ListItem::new("  ↑/↓        Move highlight"),
            ListItem::new("  Enter      Choose"),
            ListItem::new("  ←/→        Switch alert button"),
            ListItem::new("  Esc        Close"),
            ListItem::new(""),
            ListItem::new("General:").style(heading),
            ListItem::new("  F1         Toggle this help"),
            ListItem::new("  Ctrl+C     Quit"),
        ];

        let help_list = List::new(help_items).style(Style::default().fg(theme::TEXT)).block(
            Block::default()
                .title(" Help - Press F1 or Esc to close ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme::ACCENT))
                .style(Style::default().bg(theme::PANEL_BG)),
        );

        frame.render_widget(help_list, popup_area);
    }
}

impl Default for HelpComponent {
    fn default() -> Self {
        Self::new()
    }
}

/// Rectangle of the given percentage size centered in `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
