// ABOUTME: OTP verification screen: six digit slots, countdown, bounded resend

use std::time::Duration;
use tracing::{debug, info};

use super::{params, FormInput, ScreenCommand, ScreenController};
use crate::app::actions::{ActionOutcome, AsyncAction};
use crate::app::alert::{AlertAction, AlertRequest};
use crate::app::router::{Route, RouteParams};
use crate::app::timer::TickerSpec;
use crate::forms::otp::VerifyPhase;
use crate::forms::{OtpError, OtpState, OTP_LENGTH};
use crate::models::Secret;

const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpFocus {
    Slots,
    Resend,
    Verify,
}

impl OtpFocus {
    fn next(self) -> Self {
        match self {
            Self::Slots => Self::Resend,
            Self::Resend => Self::Verify,
            Self::Verify => Self::Slots,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Slots => Self::Verify,
            Self::Resend => Self::Slots,
            Self::Verify => Self::Resend,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VerifyOtpScreen {
    email: Option<String>,
    identity: RouteParams,
    otp: OtpState,
    focus: OtpFocus,
}

impl VerifyOtpScreen {
    pub fn new(route_params: &RouteParams) -> Self {
        Self {
            email: route_params.get(params::EMAIL),
            identity: route_params.forward(params::IDENTITY),
            otp: OtpState::new(),
            focus: OtpFocus::Slots,
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn otp(&self) -> &OtpState {
        &self.otp
    }

    pub fn focus(&self) -> OtpFocus {
        self.focus
    }

    fn missing_email_alert() -> ScreenCommand {
        ScreenCommand::Alert(AlertRequest::info_then(
            "Error",
            "Email not provided. Please try again.",
            AlertAction::GoBack,
        ))
    }

    fn submit(&mut self) -> ScreenCommand {
        let Some(email) = self.email.clone() else {
            return Self::missing_email_alert();
        };
        match self.otp.begin_submit() {
            Ok(code) => {
                info!("Submitting OTP for verification");
                ScreenCommand::Spawn(AsyncAction::VerifyOtp { email, code: Secret::new(code) })
            }
            Err(e @ OtpError::IncompleteCode) => {
                ScreenCommand::Alert(AlertRequest::info("Error", &e.to_string()))
            }
            Err(e @ OtpError::Expired) => {
                ScreenCommand::Alert(AlertRequest::info("OTP Expired", &e.to_string()))
            }
            Err(e) => {
                debug!("Verify ignored: {}", e);
                ScreenCommand::None
            }
        }
    }

    fn resend(&mut self) -> ScreenCommand {
        let Some(email) = self.email.clone() else {
            return Self::missing_email_alert();
        };
        match self.otp.begin_resend() {
            Ok(()) => ScreenCommand::Spawn(AsyncAction::ResendOtp { email }),
            Err(e @ OtpError::LimitReached) => {
                ScreenCommand::Alert(AlertRequest::info("Limit Reached", &e.to_string()))
            }
            Err(e) => {
                debug!("Resend ignored: {}", e);
                ScreenCommand::None
            }
        }
    }

    fn handle_slot_input(&mut self, input: FormInput) -> ScreenCommand {
        match input {
            FormInput::Char(c) => {
                self.otp.type_char(c);
            }
            FormInput::Backspace => self.otp.backspace(),
            FormInput::Left => self.otp.focus_left(),
            FormInput::Right => self.otp.focus_right(),
            FormInput::Home => self.otp.focus_slot(0),
            FormInput::End => self.otp.focus_slot(OTP_LENGTH - 1),
            FormInput::Paste(text) => {
                if !self.otp.paste(&text) {
                    debug!("Clipboard did not hold a six digit code");
                }
            }
            FormInput::Activate => return self.submit(),
            FormInput::FocusNext | FormInput::FocusPrev | FormInput::ToggleReveal => {}
        }
        ScreenCommand::None
    }
}

impl ScreenController for VerifyOtpScreen {
    fn route(&self) -> Route {
        Route::VerifyOtp
    }

    fn on_mount(&mut self) -> ScreenCommand {
        if self.email.is_none() {
            return Self::missing_email_alert();
        }
        ScreenCommand::None
    }

    fn handle_input(&mut self, input: FormInput) -> ScreenCommand {
        match (self.focus, input) {
            (_, FormInput::FocusNext) => self.focus = self.focus.next(),
            (_, FormInput::FocusPrev) => self.focus = self.focus.prev(),
            (OtpFocus::Slots, input) => return self.handle_slot_input(input),
            (OtpFocus::Resend, FormInput::Activate) => return self.resend(),
            (OtpFocus::Verify, FormInput::Activate) => return self.submit(),
            // Typing a digit from a button jumps back into the slots
            (_, FormInput::Char(c)) if c.is_ascii_digit() => {
                self.focus = OtpFocus::Slots;
                self.otp.type_char(c);
            }
            _ => {}
        }
        ScreenCommand::None
    }

    fn on_outcome(&mut self, outcome: ActionOutcome) -> ScreenCommand {
        match outcome {
            ActionOutcome::OtpVerified(Ok(())) => {
                self.otp.finish_submit(true);
                ScreenCommand::Alert(AlertRequest::info_then(
                    "Success",
                    "Email verified successfully!",
                    AlertAction::Navigate(Route::CreatePassword, self.identity.clone()),
                ))
            }
            ActionOutcome::OtpVerified(Err(e)) => {
                self.otp.finish_submit(false);
                ScreenCommand::Alert(AlertRequest::info("Verification Failed", &e.to_string()))
            }
            ActionOutcome::OtpResent(Ok(())) => {
                self.otp.finish_resend(true);
                info!("OTP resent, {} attempts remaining", self.otp.remaining_attempts());
                self.focus = OtpFocus::Slots;
                ScreenCommand::Alert(AlertRequest::info(
                    "Success",
                    "A new OTP has been sent to your email.",
                ))
            }
            ActionOutcome::OtpResent(Err(e)) => {
                self.otp.finish_resend(false);
                ScreenCommand::Alert(AlertRequest::info("Error", &e.to_string()))
            }
            other => {
                debug!("Verify OTP ignored outcome for {}", other.operation());
                ScreenCommand::None
            }
        }
    }

    fn on_tick(&mut self) -> ScreenCommand {
        if self.otp.tick() {
            info!("OTP countdown expired");
        }
        ScreenCommand::None
    }

    fn ticker(&self) -> Option<TickerSpec> {
        self.otp
            .is_counting_down()
            .then(|| TickerSpec::new(COUNTDOWN_PERIOD, u64::from(self.otp.resend_attempts())))
    }

    fn is_loading(&self) -> bool {
        !self.otp.is_editable() && self.otp.phase() != VerifyPhase::Verified
    }
}
