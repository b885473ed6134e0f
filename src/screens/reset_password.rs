// ABOUTME: Reset-password screen reached through an emailed link carrying a token

use tracing::{info, warn};

use super::create_password::PasswordField;
use super::{edit_text, params, FormInput, FormRow, FormView, ScreenCommand, ScreenController};
use crate::app::actions::{ActionOutcome, AsyncAction};
use crate::app::alert::{AlertAction, AlertRequest};
use crate::app::router::{Route, RouteParams};
use crate::forms::password::reset_ready;
use crate::forms::{check_passwords, FocusRing, TextField, ValidationErrors};
use crate::models::Secret;

const ROWS: &[PasswordField] = &[PasswordField::Password, PasswordField::Confirm, PasswordField::Submit];

#[derive(Debug, Clone)]
pub struct ResetPasswordScreen {
    token: Option<String>,
    password: TextField,
    confirm: TextField,
    focus: FocusRing,
    errors: ValidationErrors<PasswordField>,
    is_loading: bool,
}

impl ResetPasswordScreen {
    pub fn new(route_params: &RouteParams) -> Self {
        Self {
            token: route_params.get(params::TOKEN),
            password: TextField::masked(),
            confirm: TextField::masked(),
            focus: FocusRing::new(),
            errors: ValidationErrors::new(),
            is_loading: false,
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn errors(&self) -> &ValidationErrors<PasswordField> {
        &self.errors
    }

    fn focused(&self) -> PasswordField {
        ROWS[self.focus.index()]
    }

    fn invalid_link_alert() -> ScreenCommand {
        ScreenCommand::Alert(AlertRequest::info_then(
            "Invalid Link",
            "This password reset link is invalid. Please request a new one.",
            AlertAction::Navigate(Route::ForgotPassword, RouteParams::new()),
        ))
    }

    fn submit(&mut self) -> ScreenCommand {
        if self.is_loading {
            return ScreenCommand::None;
        }
        let Some(token) = self.token.clone() else {
            return Self::invalid_link_alert();
        };
        if let Err(e) = check_passwords(self.password.value(), self.confirm.value()) {
            if e.flags_password() {
                self.errors.mark(PasswordField::Password);
            }
            if e.flags_confirm() {
                self.errors.mark(PasswordField::Confirm);
            }
            return ScreenCommand::Alert(AlertRequest::info("Error", &e.to_string()));
        }

        info!("Submitting password reset");
        self.is_loading = true;
        ScreenCommand::Spawn(AsyncAction::ResetPassword {
            token,
            password: Secret::new(self.password.value()),
        })
    }

    pub fn view(&self) -> FormView {
        FormView::new("Reset Password", "Enter your new password below.")
            .row(
                FormRow::text("New Password", &self.password, "Enter new password")
                    .required()
                    .invalid(self.errors.contains(PasswordField::Password))
                    .hint("At least 8 characters"),
            )
            .row(
                FormRow::text("Confirm Password", &self.confirm, "Re-enter new password")
                    .required()
                    .invalid(self.errors.contains(PasswordField::Confirm)),
            )
            .row(FormRow::button(
                "Reset Password",
                reset_ready(self.password.value(), self.confirm.value()),
                self.is_loading,
            ))
            .focused(self.focus.index())
    }
}

impl ScreenController for ResetPasswordScreen {
    fn route(&self) -> Route {
        Route::ResetPassword
    }

    fn on_mount(&mut self) -> ScreenCommand {
        if self.token.is_none() {
            warn!("Reset password opened without a token");
            return Self::invalid_link_alert();
        }
        ScreenCommand::None
    }

    fn handle_input(&mut self, input: FormInput) -> ScreenCommand {
        match (self.focused(), input) {
            (_, FormInput::FocusNext) => self.focus.next(ROWS.len(), |_| true),
            (_, FormInput::FocusPrev) => self.focus.prev(ROWS.len(), |_| true),
            (PasswordField::Password, FormInput::Activate) => self.focus.next(ROWS.len(), |_| true),
            (_, FormInput::Activate) => return self.submit(),
            (PasswordField::Password, input) => {
                if edit_text(&mut self.password, &input) {
                    self.errors.clear(PasswordField::Password);
                }
            }
            (PasswordField::Confirm, input) => {
                if edit_text(&mut self.confirm, &input) {
                    self.errors.clear(PasswordField::Confirm);
                }
            }
            (PasswordField::Submit, _) => {}
        }
        ScreenCommand::None
    }

    fn on_outcome(&mut self, outcome: ActionOutcome) -> ScreenCommand {
        match outcome {
            ActionOutcome::PasswordReset(result) => {
                self.is_loading = false;
                match result {
                    Ok(()) => ScreenCommand::Alert(AlertRequest::info_then(
                        "Success",
                        "Your password has been reset successfully.",
                        AlertAction::Navigate(Route::Login, RouteParams::new()),
                    )),
                    Err(e) => ScreenCommand::Alert(AlertRequest::info("Error", &e.to_string())),
                }
            }
            other => {
                tracing::debug!("Reset password ignored outcome for {}", other.operation());
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
    use crate::screens::test_support::{alert_title, type_text};

    fn with_token() -> ResetPasswordScreen {
        ResetPasswordScreen::new(&RouteParams::new().with("token", "abc123"))
    }

    fn fill(screen: &mut ResetPasswordScreen, password: &str, confirm: &str) {
        type_text(screen, password);
        screen.handle_input(FormInput::FocusNext);
        type_text(screen, confirm);
    }

    #[test]
    fn test_missing_token_offers_new_link() {
        let mut screen = ResetPasswordScreen::new(&RouteParams::new());
        assert!(!screen.has_token());
        match screen.on_mount() {
            ScreenCommand::Alert(alert) => {
                assert_eq!(alert.title, "Invalid Link");
                assert_eq!(
                    alert.accept(),
                    AlertAction::Navigate(Route::ForgotPassword, RouteParams::new())
                );
                assert_eq!(alert.cancel(), alert.accept());
            }
            other => panic!("expected alert, got {other:?}"),
        }

        fill(&mut screen, "password1", "password1");
        let cmd = screen.handle_input(FormInput::Activate);
        assert_eq!(alert_title(&cmd), Some("Invalid Link"));
    }

    #[test]
    fn test_gate_is_looser_than_submit_rule() {
        let mut screen = with_token();
        fill(&mut screen, "password1", "password2");
        // Enabled even though the confirmation differs
        assert!(!screen.view().rows[2].disabled);

        let cmd = screen.handle_input(FormInput::Activate);
        match cmd {
            ScreenCommand::Alert(alert) => assert_eq!(alert.message, "Passwords do not match."),
            other => panic!("expected alert, got {other:?}"),
        }
        assert!(screen.errors().contains(PasswordField::Confirm));
    }

    #[test]
    fn test_reset_carries_token_and_lands_on_login() {
        let mut screen = with_token();
        fill(&mut screen, "password1", "password1");
        assert_eq!(
            screen.handle_input(FormInput::Activate),
            ScreenCommand::Spawn(AsyncAction::ResetPassword {
                token: "abc123".to_string(),
                password: Secret::new("password1"),
            })
        );
        match screen.on_outcome(ActionOutcome::PasswordReset(Ok(()))) {
            ScreenCommand::Alert(alert) => {
                assert_eq!(alert.message, "Your password has been reset successfully.");
                assert_eq!(alert.accept(), AlertAction::Navigate(Route::Login, RouteParams::new()));
            }
            other => panic!("expected alert, got {other:?}"),
        }
    }
}
