// ABOUTME: Carousel renderer: slide title, page dots and the two entry buttons

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::components::theme;
use crate::screens::carousel::{CarouselAction, CarouselScreen};

pub struct CarouselComponent;

impl CarouselComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, screen: &CarouselScreen) {
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
                Constraint::Min(3),    // Slide
                Constraint::Length(1), // Dots
                Constraint::Length(1), // Spacer
                Constraint::Length(3), // Get Started
                Constraint::Length(1), // OR
                Constraint::Length(3), // Log In
            ])
            .split(inner);

        let slide_area = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Min(2)])
            .split(chunks[0])[1];
        let slide = Paragraph::new(screen.title())
            .style(Style::default().fg(theme::GOLD).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(slide, slide_area);

        let dots: Vec<Span> = (0..screen.slide_count())
            .map(|i| {
                if i == screen.current() {
                    Span::styled(" ● ", Style::default().fg(theme::ACCENT))
                } else {
                    Span::styled(" ○ ", Style::default().fg(theme::BORDER))
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(dots)).alignment(Alignment::Center), chunks[1]);

        let button_width = 30.min(inner.width);
        let centered = |rect: Rect| Rect {
            x: rect.x + (rect.width.saturating_sub(button_width)) / 2,
            width: button_width,
            ..rect
        };

        self.render_button(
            frame,
            centered(chunks[3]),
            "Get Started",
            screen.focused() == CarouselAction::GetStarted,
        );
        let or = Paragraph::new("──── OR ────")
            .style(Style::default().fg(theme::MUTED))
            .alignment(Alignment::Center);
        frame.render_widget(or, chunks[4]);
        self.render_button(
            frame,
            centered(chunks[5]),
            "Log In",
            screen.focused() == CarouselAction::Login,
        );
    }

    fn render_button(&self, frame: &mut Frame, area: Rect, label: &str, focused: bool) {
        let (style, border) = if focused {
            (
                Style::default()
                    .fg(theme::DARK_BG)
                    .bg(theme::SELECTION)
                    .add_modifier(Modifier::BOLD),
                theme::SELECTION,
            )
        } else {
            (Style::default().fg(theme::TEXT), theme::BORDER)
        };
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
}

impl Default for CarouselComponent {
    fn default() -> Self {
        Self::new()
    }
}
