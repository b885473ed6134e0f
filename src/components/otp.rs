// ABOUTME: OTP screen renderer: digit boxes, countdown, remaining resends and the two buttons

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::components::theme;
use crate::forms::otp::{ResendPhase, VerifyPhase, MAX_RESEND_ATTEMPTS};
use crate::forms::OTP_LENGTH;
use crate::screens::verify_otp::{OtpFocus, VerifyOtpScreen};

const SLOT_WIDTH: u16 = 5;

pub struct OtpComponent;

impl OtpComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, screen: &VerifyOtpScreen) {
        let otp = screen.otp();
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
                Constraint::Length(2), // Instruction
                Constraint::Length(3), // Slots
                Constraint::Length(1), // Timer
                Constraint::Length(1), // Attempts
                Constraint::Length(3), // Resend
                Constraint::Length(3), // Verify
                Constraint::Min(0),
            ])
            .split(inner);

        let title = Paragraph::new("Verify Your Email")
            .style(Style::default().fg(theme::GOLD).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        let instruction = Paragraph::new(format!(
            "Enter the OTP sent to {}",
            screen.email().unwrap_or("your email")
        ))
        .style(Style::default().fg(theme::MUTED))
        .alignment(Alignment::Center);
        frame.render_widget(instruction, chunks[1]);

        self.render_slots(frame, chunks[2], screen);

        let timer = Paragraph::new(format!("Time remaining: {}", otp.formatted_timer()))
            .style(Style::default().fg(theme::MUTED))
            .alignment(Alignment::Center);
        frame.render_widget(timer, chunks[3]);

        let attempts = otp.resend_attempts();
        if attempts > 0 && attempts < MAX_RESEND_ATTEMPTS {
            let remaining = Paragraph::new(format!(
                "{} resend attempts remaining",
                otp.remaining_attempts()
            ))
            .style(Style::default().fg(theme::MUTED))
            .alignment(Alignment::Center);
            frame.render_widget(remaining, chunks[4]);
        }

        let button_width = 30.min(inner.width);
        let centered = |rect: Rect| Rect {
            x: rect.x + rect.width.saturating_sub(button_width) / 2,
            width: button_width,
            ..rect
        };

        let resend_label = if otp.resend_phase() == ResendPhase::Resending {
            "Sending..."
        } else {
            "Resend Code"
        };
        self.render_button(
            frame,
            centered(chunks[5]),
            resend_label,
            otp.can_resend(),
            screen.focus() == OtpFocus::Resend,
        );

        let verify_label = match otp.phase() {
            VerifyPhase::Submitting => "Verifying...",
            VerifyPhase::Verified => "Verified",
            VerifyPhase::Entering => "Verify",
        };
        self.render_button(
            frame,
            centered(chunks[6]),
            verify_label,
            otp.phase() == VerifyPhase::Entering,
            screen.focus() == OtpFocus::Verify,
        );
    }

    fn render_slots(&self, frame: &mut Frame, area: Rect, screen: &VerifyOtpScreen) {
        let otp = screen.otp();
        let total = SLOT_WIDTH * OTP_LENGTH as u16 + (OTP_LENGTH as u16 - 1);
        let mut x = area.x + area.width.saturating_sub(total) / 2;

        for (index, slot) in otp.slots().iter().enumerate() {
            let focused = screen.focus() == OtpFocus::Slots && otp.focused_slot() == index;
            let border = if otp.has_error() {
                theme::ERROR
            } else if focused {
                theme::SELECTION
            } else {
                theme::BORDER
            };
            let digit = slot.map_or_else(String::new, |c| c.to_string());
            let text_style = if otp.is_editable() {
                Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::MUTED)
            };
            let rect = Rect {
                x,
                y: area.y,
                width: SLOT_WIDTH,
                height: area.height,
            }
            .intersection(area);
            if rect.width == 0 {
                break;
            }
            let slot_widget = Paragraph::new(digit)
                .style(text_style)
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(border)),
                );
            frame.render_widget(slot_widget, rect);
            x += SLOT_WIDTH + 1;
        }
    }

    fn render_button(&self, frame: &mut Frame, area: Rect, label: &str, enabled: bool, focused: bool) {
        let style = if !enabled {
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
}

impl Default for OtpComponent {
    fn default() -> Self {
        Self::new()
    }
}
