// ABOUTME: Main layout component: status bar, the mounted screen, key hints and overlays

use ratatui::{
    prelude::*,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::{
    AccountReadyComponent, AlertDialogComponent, CarouselComponent, FormComponent, HelpComponent,
    OtpComponent, PickerComponent,
};
use crate::app::AppState;
use crate::components::theme;
use crate::screens::Screen;

pub struct LayoutComponent {
    form: FormComponent,
    carousel: CarouselComponent,
    otp: OtpComponent,
    account_ready: AccountReadyComponent,
    picker: PickerComponent,
    alert_dialog: AlertDialogComponent,
    help: HelpComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            form: FormComponent::new(),
            carousel: CarouselComponent::new(),
            otp: OtpComponent::new(),
            account_ready: AccountReadyComponent::new(),
            picker: PickerComponent::new(),
            alert_dialog: AlertDialogComponent::new(),
            help: HelpComponent::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Top status bar
                Constraint::Min(0),    // Screen
                Constraint::Length(3), // Key hints
            ])
            .split(frame.size());

        self.render_status_bar(frame, main_layout[0], state);

        let content = main_layout[1];
        match &state.screen {
            Screen::Carousel(screen) => self.carousel.render(frame, content, screen),
            Screen::VerifyOtp(screen) => self.otp.render(frame, content, screen),
            Screen::AccountReady(screen) => self.account_ready.render(frame, content, screen),
            other => {
                if let Some(view) = other.form_view() {
                    self.form.render(frame, content, &view);
                }
            }
        }

        self.render_menu_bar(frame, main_layout[2], state);

        // Overlays, lowest first; the alert always ends up on top
        if state.picker.is_visible() {
            self.picker.render(frame, content, &state.picker);
        }
        if state.help_visible {
            self.help.render(frame, frame.size());
        }
        if let Some(alert) = &state.alert {
            self.alert_dialog.render(frame, frame.size(), alert);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let mut status_spans = vec![
            Span::styled("bizauth", Style::default().fg(theme::GOLD).add_modifier(Modifier::BOLD)),
            Span::styled("  │  ", Style::default().fg(theme::BORDER)),
        ];

        let trail: Vec<_> = state.router.trail().collect();
        for (i, route) in trail.iter().enumerate() {
            if i > 0 {
                status_spans.push(Span::styled(" › ", Style::default().fg(theme::BORDER)));
            }
            let style = if i + 1 == trail.len() {
                Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::MUTED)
            };
            status_spans.push(Span::styled(route.name(), style));
        }

        if state.screen.controller().is_loading() {
            status_spans.push(Span::styled("  │  ", Style::default().fg(theme::BORDER)));
            status_spans.push(Span::styled("working...", Style::default().fg(theme::WARNING)));
        }

        let status = Paragraph::new(Line::from(status_spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme::ACCENT))
                .style(Style::default().bg(theme::DARK_BG)),
        );
        frame.render_widget(status, area);
    }

    fn render_menu_bar(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let key = |k: &'static str| {
            Span::styled(k, Style::default().fg(theme::GOLD).add_modifier(Modifier::BOLD))
        };
        let desc = |d: &'static str| Span::styled(d, Style::default().fg(theme::MUTED));
        let sep = || Span::styled(" │ ", Style::default().fg(theme::BORDER));

        let spans = if state.alert.is_some() {
            vec![key("←/→"), desc(" choose "), sep(), key("Enter"), desc(" confirm "), sep(), key("Esc"), desc(" close")]
        } else if state.picker.is_visible() {
            vec![key("↑/↓"), desc(" move "), sep(), key("Enter"), desc(" select "), sep(), key("Esc"), desc(" close")]
        } else {
            let back = if state.router.depth() > 1 { " back " } else { " quit " };
            vec![
                key("Tab"),
                desc(" next field "),
                sep(),
                key("Enter"),
                desc(" activate "),
                sep(),
                key("Esc"),
                desc(back),
                sep(),
                key("F1"),
                desc(" help"),
            ]
        };

        let menu = Paragraph::new(Line::from(spans))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(theme::BORDER))
                    .style(Style::default().bg(theme::PANEL_BG)),
            )
            .alignment(Alignment::Center);
        frame.render_widget(menu, area);
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
