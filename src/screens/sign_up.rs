// ABOUTME: Sign-up form: identity and phone details, then request an OTP for the email

use tracing::info;

use super::{edit_text, failure_alert, params, FormInput, FormRow, FormView, ScreenCommand, ScreenController};
use crate::app::actions::{ActionOutcome, AsyncAction};
use crate::app::alert::AlertRequest;
use crate::app::router::{Route, RouteParams};
use crate::components::picker::PickerSpec;
use crate::forms::{is_valid_email, FieldValue, FocusRing, RequiredForm, TextField, ValidationErrors};
use crate::models::CallingCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SignUpField {
    FirstName,
    LastName,
    Email,
    CallingCode,
    Phone,
    ReferralCode,
    Submit,
    LoginLink,
}

const ROWS: &[SignUpField] = &[
    SignUpField::FirstName,
    SignUpField::LastName,
    SignUpField::Email,
    SignUpField::CallingCode,
    SignUpField::Phone,
    SignUpField::ReferralCode,
    SignUpField::Submit,
    SignUpField::LoginLink,
];

#[derive(Debug, Clone)]
pub struct SignUpScreen {
    first_name: TextField,
    last_name: TextField,
    email: TextField,
    phone: TextField,
    referral_code: TextField,
    calling_code: CallingCode,
    focus: FocusRing,
    errors: ValidationErrors<SignUpField>,
    is_loading: bool,
}

impl SignUpScreen {
    pub fn new() -> Self {
        Self {
            first_name: TextField::new(),
            last_name: TextField::new(),
            email: TextField::new(),
            phone: TextField::new(),
            referral_code: TextField::new(),
            calling_code: CallingCode::default_code(),
            focus: FocusRing::new(),
            errors: ValidationErrors::new(),
            is_loading: false,
        }
    }

    pub fn focused(&self) -> SignUpField {
        ROWS[self.focus.index()]
    }

    pub fn focus(&mut self, field: SignUpField) {
        if let Some(index) = ROWS.iter().position(|f| *f == field) {
            self.focus.set(index);
        }
    }

    pub fn calling_code(&self) -> CallingCode {
        self.calling_code
    }

    fn text_mut(&mut self, field: SignUpField) -> Option<&mut TextField> {
        match field {
            SignUpField::FirstName => Some(&mut self.first_name),
            SignUpField::LastName => Some(&mut self.last_name),
            SignUpField::Email => Some(&mut self.email),
            SignUpField::Phone => Some(&mut self.phone),
            SignUpField::ReferralCode => Some(&mut self.referral_code),
            SignUpField::CallingCode | SignUpField::Submit | SignUpField::LoginLink => None,
        }
    }

    fn forwarded_params(&self) -> RouteParams {
        RouteParams::new()
            .with(params::EMAIL, self.email.value().trim())
            .with(params::PHONE, &self.calling_code.format_phone(self.phone.value()))
            .with(params::FIRST_NAME, self.first_name.value().trim())
            .with(params::LAST_NAME, self.last_name.value().trim())
    }

    fn activate(&mut self) -> ScreenCommand {
        match self.focused() {
            SignUpField::CallingCode => {
                let options = CallingCode::all().iter().map(CallingCode::option_label).collect();
                ScreenCommand::OpenPicker(
                    PickerSpec::new("Country Code", options).current(&self.calling_code.option_label()),
                )
            }
            SignUpField::Submit => self.submit(),
            SignUpField::LoginLink => ScreenCommand::Navigate(Route::Login, RouteParams::new()),
            _ => {
                self.focus.next(ROWS.len(), |_| true);
                ScreenCommand::None
            }
        }
    }

    fn submit(&mut self) -> ScreenCommand {
        if self.is_loading {
            return ScreenCommand::None;
        }
        if !self.validate() {
            return ScreenCommand::Alert(AlertRequest::info(
                "Missing Info",
                "First name, last name, phone and email are required.",
            ));
        }
        if !is_valid_email(self.email.value()) {
            self.errors.mark(SignUpField::Email);
            return ScreenCommand::Alert(AlertRequest::info(
                "Invalid Email",
                "Please enter a valid email address.",
            ));
        }

        info!("Sign-up submitted, requesting OTP");
        self.is_loading = true;
        ScreenCommand::Spawn(AsyncAction::RequestOtp {
            email: self.email.value().trim().to_string(),
        })
    }

    pub fn view(&self) -> FormView {
        let err = |field| self.errors.contains(field);
        FormView::new("Create an account", "Tell us a little about yourself")
            .row(FormRow::text("First Name", &self.first_name, "e.g. John").required().invalid(err(SignUpField::FirstName)))
            .row(FormRow::text("Last Name", &self.last_name, "e.g. Doe").required().invalid(err(SignUpField::LastName)))
            .row(FormRow::text("Email", &self.email, "e.g. you@example.com").required().invalid(err(SignUpField::Email)))
            .row(FormRow::picker("Country Code", &format!("+{}", self.calling_code.code), None))
            .row(FormRow::text("Phone Number", &self.phone, "701 234 5678").required().invalid(err(SignUpField::Phone)))
            .row(FormRow::text("Referral Code", &self.referral_code, "Optional"))
            .row(FormRow::button("Sign Up", self.all_required_present(), self.is_loading))
            .row(FormRow::link("Already have an account? Log in"))
            .focused(self.focus.index())
    }
}

impl Default for SignUpScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl RequiredForm for SignUpScreen {
    type Field = SignUpField;

    fn required_values(&self) -> Vec<(SignUpField, FieldValue<'_>)> {
        vec![
            (SignUpField::FirstName, FieldValue::Text(self.first_name.value())),
            (SignUpField::LastName, FieldValue::Text(self.last_name.value())),
            (SignUpField::Email, FieldValue::Text(self.email.value())),
            (SignUpField::Phone, FieldValue::Text(self.phone.value())),
        ]
    }

    fn errors(&self) -> &ValidationErrors<SignUpField> {
        &self.errors
    }

    fn errors_mut(&mut self) -> &mut ValidationErrors<SignUpField> {
        &mut self.errors
    }
}

impl ScreenController for SignUpScreen {
    fn route(&self) -> Route {
        Route::SignUp
    }

    fn handle_input(&mut self, input: FormInput) -> ScreenCommand {
        match input {
            FormInput::FocusNext => self.focus.next(ROWS.len(), |_| true),
            FormInput::FocusPrev => self.focus.prev(ROWS.len(), |_| true),
            FormInput::Activate => return self.activate(),
            other => {
                let field = self.focused();
                if let Some(text) = self.text_mut(field) {
                    if edit_text(text, &other) {
                        self.errors.clear(field);
                    }
                }
            }
        }
        ScreenCommand::None
    }

    fn on_picker_selected(&mut self, value: String) -> ScreenCommand {
        if let Some(code) = CallingCode::from_option_label(&value) {
            self.calling_code = code;
        }
        ScreenCommand::None
    }

    fn on_outcome(&mut self, outcome: ActionOutcome) -> ScreenCommand {
        match outcome {
            ActionOutcome::OtpRequested(result) => {
                self.is_loading = false;
                match result {
                    Ok(()) => ScreenCommand::Navigate(Route::VerifyOtp, self.forwarded_params()),
                    Err(e) => failure_alert("Error", &e),
                }
            }
            other => {
                tracing::debug!("Sign-up ignored outcome for {}", other.operation());
                ScreenCommand::None
            }
        }
    }

    fn is_loading(&self) -> bool {
        self.is_loading
    }
}
