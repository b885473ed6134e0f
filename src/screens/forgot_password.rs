// ABOUTME: Forgot-password screen: request a reset link for an email address

use tracing::info;

use super::{edit_text, FormInput, FormRow, FormView, ScreenCommand, ScreenController};
use crate::app::actions::{ActionOutcome, AsyncAction};
use crate::app::alert::{AlertAction, AlertRequest};
use crate::app::router::{Route, RouteParams};
use crate::forms::{is_valid_email, TextField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Email,
    Submit,
}

#[derive(Debug, Clone)]
pub struct ForgotPasswordScreen {
    email: TextField,
    focus: Focus,
    has_error: bool,
    is_loading: bool,
}

impl ForgotPasswordScreen {
    pub fn new() -> Self {
        Self {
            email: TextField::new(),
            focus: Focus::Email,
            has_error: false,
            is_loading: false,
        }
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    fn fail(&mut self, message: &str) -> ScreenCommand {
        self.has_error = true;
        ScreenCommand::Alert(AlertRequest::info("Error", message))
    }

    fn submit(&mut self) -> ScreenCommand {
        if self.is_loading {
            return ScreenCommand::None;
        }
        let email = self.email.value().trim();
        if email.is_empty() {
            return self.fail("Please enter your email address.");
        }
        if !is_valid_email(email) {
            return self.fail("Please enter a valid email address.");
        }

        info!("Requesting password reset link");
        let email = email.to_string();
        self.is_loading = true;
        self.has_error = false;
        ScreenCommand::Spawn(AsyncAction::SendResetLink { email })
    }

    pub fn view(&self) -> FormView {
        FormView::new(
            "Forgot Password",
            "Enter your email address below to receive a password reset link.",
        )
        .row(
            FormRow::text("Email Address", &self.email, "Enter your email")
                .required()
                .invalid(self.has_error),
        )
        .row(FormRow::button("Send Reset Link", true, self.is_loading))
        .focused(match self.focus {
            Focus::Email => 0,
            Focus::Submit => 1,
        })
    }
}

impl Default for ForgotPasswordScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenController for ForgotPasswordScreen {
    fn route(&self) -> Route {
        Route::ForgotPassword
    }

    fn handle_input(&mut self, input: FormInput) -> ScreenCommand {
        match (self.focus, input) {
            (_, FormInput::Activate) => return self.submit(),
            (Focus::Email, FormInput::FocusNext | FormInput::FocusPrev) => self.focus = Focus::Submit,
            (Focus::Submit, FormInput::FocusNext | FormInput::FocusPrev) => self.focus = Focus::Email,
            (Focus::Email, input) => {
                if edit_text(&mut self.email, &input) {
                    self.has_error = false;
                }
            }
            (Focus::Submit, _) => {}
        }
        ScreenCommand::None
    }

    fn on_outcome(&mut self, outcome: ActionOutcome) -> ScreenCommand {
        match outcome {
            ActionOutcome::ResetLinkSent(result) => {
                self.is_loading = false;
                match result {
                    Ok(()) => ScreenCommand::Alert(AlertRequest::info_then(
                        "Success",
                        "Password reset link sent to your email.",
                        AlertAction::Navigate(Route::Login, RouteParams::new()),
                    )),
                    Err(e) => self.fail(&e.to_string()),
                }
            }
            other => {
                tracing::debug!("Forgot password ignored outcome for {}", other.operation());
                ScreenCommand::None
            }
        }
    }

    fn is_loading(&self) -> bool {
        self.is_loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;
    use crate::screens::test_support::type_text;

    fn message(cmd: &ScreenCommand) -> &str {
        match cmd {
            ScreenCommand::Alert(alert) => &alert.message,
            other => panic!("expected alert, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_and_invalid_email() {
        let mut screen = ForgotPasswordScreen::new();
        type_text(&mut screen, "   ");
        let cmd = screen.handle_input(FormInput::Activate);
        assert_eq!(message(&cmd), "Please enter your email address.");
        assert!(screen.has_error());

        type_text(&mut screen, "ada@example");
        assert!(!screen.has_error());
        let cmd = screen.handle_input(FormInput::Activate);
        assert_eq!(message(&cmd), "Please enter a valid email address.");
    }

    #[test]
    fn test_sends_trimmed_email_and_returns_to_login() {
        let mut screen = ForgotPasswordScreen::new();
        type_text(&mut screen, " ada@example.com ");
        assert_eq!(
            screen.handle_input(FormInput::Activate),
            ScreenCommand::Spawn(AsyncAction::SendResetLink { email: "ada@example.com".to_string() })
        );
        match screen.on_outcome(ActionOutcome::ResetLinkSent(Ok(()))) {
            ScreenCommand::Alert(alert) => {
                assert_eq!(alert.accept(), AlertAction::Navigate(Route::Login, RouteParams::new()))
            }
            other => panic!("expected alert, got {other:?}"),
        }
        assert!(!screen.is_loading());
    }

    #[test]
    fn test_failure_marks_field() {
        let mut screen = ForgotPasswordScreen::new();
        type_text(&mut screen, "ada@example.com");
        screen.handle_input(FormInput::Activate);
        let cmd = screen.on_outcome(ActionOutcome::ResetLinkSent(Err(BackendError::Unavailable)));
        assert_eq!(message(&cmd), "Service unavailable. Please try again later.");
        assert!(screen.has_error());
    }
}
