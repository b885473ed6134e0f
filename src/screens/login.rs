// ABOUTME: Login screen for returning users

use tracing::info;

use super::{edit_text, params, FormInput, FormRow, FormView, ScreenCommand, ScreenController};
use crate::app::actions::{ActionOutcome, AsyncAction};
use crate::app::alert::{AlertAction, AlertRequest};
use crate::app::router::{Route, RouteParams};
use crate::forms::{FieldValue, FocusRing, RequiredForm, TextField, ValidationErrors};
use crate::models::Secret;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoginField {
    Email,
    Password,
    Remember,
    ForgotLink,
    Submit,
    SignUpLink,
}

const ROWS: &[LoginField] = &[
    LoginField::Email,
    LoginField::Password,
    LoginField::Remember,
    LoginField::ForgotLink,
    LoginField::Submit,
    LoginField::SignUpLink,
];

#[derive(Debug, Clone)]
pub struct LoginScreen {
    email: TextField,
    password: TextField,
    remember: bool,
    focus: FocusRing,
    errors: ValidationErrors<LoginField>,
    is_loading: bool,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            email: TextField::new(),
            password: TextField::masked(),
            remember: false,
            focus: FocusRing::new(),
            errors: ValidationErrors::new(),
            is_loading: false,
        }
    }

    pub fn focused(&self) -> LoginField {
        ROWS[self.focus.index()]
    }

    pub fn focus(&mut self, field: LoginField) {
        if let Some(index) = ROWS.iter().position(|f| *f == field) {
            self.focus.set(index);
        }
    }

    pub fn remember(&self) -> bool {
        self.remember
    }

    fn submit(&mut self) -> ScreenCommand {
        if self.is_loading {
            return ScreenCommand::None;
        }
        if !self.validate() {
            return ScreenCommand::Alert(AlertRequest::info("Error", "Please fill all fields"));
        }

        info!(remember = self.remember, "Logging in");
        self.is_loading = true;
        ScreenCommand::Spawn(AsyncAction::Login {
            email: self.email.value().trim().to_string(),
            password: Secret::new(self.password.value()),
            remember: self.remember,
        })
    }

    fn activate(&mut self) -> ScreenCommand {
        match self.focused() {
            LoginField::Email => {
                self.focus.next(ROWS.len(), |_| true);
                ScreenCommand::None
            }
            LoginField::Password | LoginField::Submit => self.submit(),
            LoginField::Remember => {
                self.remember = !self.remember;
                ScreenCommand::None
            }
            LoginField::ForgotLink => ScreenCommand::Navigate(Route::ForgotPassword, RouteParams::new()),
            LoginField::SignUpLink => ScreenCommand::Navigate(Route::SignUp, RouteParams::new()),
        }
    }

    pub fn view(&self) -> FormView {
        FormView::new("Hi, Welcome!", "Log in with your email and password to continue.")
            .row(
                FormRow::text("Email Address", &self.email, "Enter your email")
                    .required()
                    .invalid(self.errors.contains(LoginField::Email)),
            )
            .row(
                FormRow::text("Password", &self.password, "Enter your password")
                    .required()
                    .invalid(self.errors.contains(LoginField::Password)),
            )
            .row(FormRow::checkbox("Remember me", self.remember))
            .row(FormRow::link("Forgot password?"))
            .row(FormRow::button("Log In", self.all_required_present(), self.is_loading))
            .row(FormRow::link("Don't have an account? Sign Up"))
            .focused(self.focus.index())
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl RequiredForm for LoginScreen {
    type Field = LoginField;

    fn required_values(&self) -> Vec<(LoginField, FieldValue<'_>)> {
        vec![
            (LoginField::Email, FieldValue::Text(self.email.value())),
            (LoginField::Password, FieldValue::Text(self.password.value())),
        ]
    }

    fn errors(&self) -> &ValidationErrors<LoginField> {
        &self.errors
    }

    fn errors_mut(&mut self) -> &mut ValidationErrors<LoginField> {
        &mut self.errors
    }
}

impl ScreenController for LoginScreen {
    fn route(&self) -> Route {
        Route::Login
    }

    fn handle_input(&mut self, input: FormInput) -> ScreenCommand {
        let field = self.focused();
        match (field, input) {
            (_, FormInput::FocusNext) => self.focus.next(ROWS.len(), |_| true),
            (_, FormInput::FocusPrev) => self.focus.prev(ROWS.len(), |_| true),
            (_, FormInput::Activate) => return self.activate(),
            (LoginField::Remember, FormInput::Char(' ')) => self.remember = !self.remember,
            (LoginField::Email, input) => {
                if edit_text(&mut self.email, &input) {
                    self.errors.clear(field);
                }
            }
            (LoginField::Password, input) => {
                if edit_text(&mut self.password, &input) {
                    self.errors.clear(field);
                }
            }
            _ => {}
        }
        ScreenCommand::None
    }

    fn on_outcome(&mut self, outcome: ActionOutcome) -> ScreenCommand {
        match outcome {
            ActionOutcome::LoggedIn(result) => {
                self.is_loading = false;
                match result {
                    Ok(()) => {
                        let next = RouteParams::new()
                            .with(params::EMAIL, self.email.value().trim())
                            .with(params::OUTCOME, "login");
                        ScreenCommand::Alert(AlertRequest::info_then(
                            "Success",
                            "Logged in successfully",
                            AlertAction::Navigate(Route::AccountReady, next),
                        ))
                    }
                    Err(e) => ScreenCommand::Alert(AlertRequest::info("Error", &e.to_string())),
                }
            }
            other => {
                tracing::debug!("Login ignored outcome for {}", other.operation());
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
    use crate::backend::{BackendError, Operation};
    use crate::screens::test_support::{alert_title, type_text};

    #[test]
    fn test_requires_both_fields() {
        let mut screen = LoginScreen::new();
        type_text(&mut screen, "ada@example.com");
        screen.focus(LoginField::Submit);
        match screen.handle_input(FormInput::Activate) {
            ScreenCommand::Alert(alert) => assert_eq!(alert.message, "Please fill all fields"),
            other => panic!("expected alert, got {other:?}"),
        }
        assert!(screen.errors().contains(LoginField::Password));
        assert!(!screen.errors().contains(LoginField::Email));
    }

    #[test]
    fn test_remember_me_toggles_and_is_sent() {
        let mut screen = LoginScreen::new();
        type_text(&mut screen, "ada@example.com");
        screen.focus(LoginField::Password);
        type_text(&mut screen, "password1");
        screen.focus(LoginField::Remember);
        screen.handle_input(FormInput::Char(' '));
        assert!(screen.remember());

        screen.focus(LoginField::Submit);
        assert_eq!(
            screen.handle_input(FormInput::Activate),
            ScreenCommand::Spawn(AsyncAction::Login {
                email: "ada@example.com".to_string(),
                password: Secret::new("password1"),
                remember: true,
            })
        );
    }

    #[test]
    fn test_success_then_account_ready() {
        let mut screen = LoginScreen::new();
        type_text(&mut screen, "ada@example.com");
        screen.focus(LoginField::Password);
        type_text(&mut screen, "password1");
        screen.handle_input(FormInput::Activate);
        match screen.on_outcome(ActionOutcome::LoggedIn(Ok(()))) {
            ScreenCommand::Alert(alert) => match alert.accept() {
                AlertAction::Navigate(Route::AccountReady, params) => {
                    assert_eq!(params.get("outcome").as_deref(), Some("login"));
                }
                other => panic!("unexpected action {other:?}"),
            },
            other => panic!("expected alert, got {other:?}"),
        }
    }

    #[test]
    fn test_failure_alert() {
        let mut screen = LoginScreen::new();
        let cmd = screen.on_outcome(ActionOutcome::LoggedIn(Err(BackendError::Simulated {
            operation: Operation::Login,
        })));
        assert_eq!(alert_title(&cmd), Some("Error"));
    }

    #[test]
    fn test_links_navigate() {
        let mut screen = LoginScreen::new();
        screen.focus(LoginField::ForgotLink);
        assert_eq!(
            screen.handle_input(FormInput::Activate),
            ScreenCommand::Navigate(Route::ForgotPassword, RouteParams::new())
        );
        screen.focus(LoginField::SignUpLink);
        assert_eq!(
            screen.handle_input(FormInput::Activate),
            ScreenCommand::Navigate(Route::SignUp, RouteParams::new())
        );
    }
}
