// ABOUTME: Create-password screen shown after the email is verified

use tracing::info;

use super::{edit_text, params, FormInput, FormRow, FormView, ScreenCommand, ScreenController};
use crate::app::actions::{ActionOutcome, AsyncAction};
use crate::app::alert::{AlertAction, AlertRequest};
use crate::app::router::{Route, RouteParams};
use crate::forms::password::create_ready;
use crate::forms::{check_passwords, FocusRing, TextField, ValidationErrors};
use crate::models::Secret;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordField {
    Password,
    Confirm,
    Submit,
}

const ROWS: &[PasswordField] = &[PasswordField::Password, PasswordField::Confirm, PasswordField::Submit];

#[derive(Debug, Clone)]
pub struct CreatePasswordScreen {
    email: Option<String>,
    password: TextField,
    confirm: TextField,
    focus: FocusRing,
    errors: ValidationErrors<PasswordField>,
    is_loading: bool,
}

impl CreatePasswordScreen {
    pub fn new(route_params: &RouteParams) -> Self {
        Self {
            email: route_params.get(params::EMAIL),
            password: TextField::masked(),
            confirm: TextField::masked(),
            focus: FocusRing::new(),
            errors: ValidationErrors::new(),
            is_loading: false,
        }
    }

    pub fn focused(&self) -> PasswordField {
        ROWS[self.focus.index()]
    }

    pub fn errors(&self) -> &ValidationErrors<PasswordField> {
        &self.errors
    }

    fn submit(&mut self) -> ScreenCommand {
        if self.is_loading {
            return ScreenCommand::None;
        }
        if let Err(e) = check_passwords(self.password.value(), self.confirm.value()) {
            if e.flags_password() {
                self.errors.mark(PasswordField::Password);
            }
            if e.flags_confirm() {
                self.errors.mark(PasswordField::Confirm);
            }
            return ScreenCommand::Alert(AlertRequest::info("Error", &e.to_string()));
        }

        info!("Creating account password");
        self.is_loading = true;
        ScreenCommand::Spawn(AsyncAction::SetPassword {
            password: Secret::new(self.password.value()),
        })
    }

    pub fn view(&self) -> FormView {
        let subtitle = match &self.email {
            Some(email) => format!("Secure the account for {email}"),
            None => "Choose a password with at least 8 characters".to_string(),
        };
        FormView::new("Create Password", &subtitle)
            .row(
                FormRow::text("Password", &self.password, "Enter password")
                    .required()
                    .invalid(self.errors.contains(PasswordField::Password))
                    .hint("Ctrl+R to show or hide"),
            )
            .row(
                FormRow::text("Confirm Password", &self.confirm, "Re-enter password")
                    .required()
                    .invalid(self.errors.contains(PasswordField::Confirm)),
            )
            .row(FormRow::button(
                "Create Password",
                create_ready(self.password.value(), self.confirm.value()),
                self.is_loading,
            ))
            .focused(self.focus.index())
    }
}

impl ScreenController for CreatePasswordScreen {
    fn route(&self) -> Route {
        Route::CreatePassword
    }

    fn handle_input(&mut self, input: FormInput) -> ScreenCommand {
        match (self.focused(), input) {
            (_, FormInput::FocusNext) => self.focus.next(ROWS.len(), |_| true),
            (_, FormInput::FocusPrev) => self.focus.prev(ROWS.len(), |_| true),
            (PasswordField::Submit, FormInput::Activate) => return self.submit(),
            (PasswordField::Confirm, FormInput::Activate) => return self.submit(),
            (PasswordField::Password, FormInput::Activate) => self.focus.next(ROWS.len(), |_| true),
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
            ActionOutcome::PasswordSet(result) => {
                self.is_loading = false;
                match result {
                    Ok(()) => ScreenCommand::Alert(AlertRequest::info_then(
                        "Success",
                        "Password created successfully!",
                        AlertAction::Navigate(Route::BusinessClassification, RouteParams::new()),
                    )),
                    Err(e) => ScreenCommand::Alert(AlertRequest::info("Error", &e.to_string())),
                }
            }
            other => {
                tracing::debug!("Create password ignored outcome for {}", other.operation());
                ScreenCommand::None
            }
        }
    }

    fn is_loading(&self) -> bool {
        self.is_loading
    }
}
