// ABOUTME: Screen controllers for the onboarding and authentication flow
// Each screen owns its transient form state and talks to the app only through ScreenCommand

pub mod accept_terms;
pub mod account_ready;
pub mod business;
pub mod carousel;
pub mod contact_person;
pub mod create_password;
pub mod forgot_password;
pub mod login;
pub mod reset_password;
pub mod sign_up;
pub mod verify_otp;
pub mod view;

use std::sync::Arc;
use std::time::Duration;

use crate::app::actions::{ActionOutcome, AsyncAction};
use crate::app::alert::{AlertRequest, ScreenSignal};
use crate::app::router::{Route, RouteParams};
use crate::app::timer::TickerSpec;
use crate::components::picker::PickerSpec;
use crate::forms::{LocationTable, TextField};

pub use accept_terms::AcceptTermsScreen;
pub use account_ready::AccountReadyScreen;
pub use business::BusinessScreen;
pub use carousel::CarouselScreen;
pub use contact_person::ContactPersonScreen;
pub use create_password::CreatePasswordScreen;
pub use forgot_password::ForgotPasswordScreen;
pub use login::LoginScreen;
pub use reset_password::ResetPasswordScreen;
pub use sign_up::SignUpScreen;
pub use verify_otp::VerifyOtpScreen;
pub use view::{FormRow, FormView, RowKind};

/// Route parameter keys shared across screens
pub mod params {
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const TOKEN: &str = "token";
    pub const ACCOUNT_ID: &str = "accountId";
    pub const OUTCOME: &str = "outcome";

    /// Identity fields forwarded sign-up -> OTP -> password -> terms
    pub const IDENTITY: &[&str] = &[EMAIL, PHONE, FIRST_NAME, LAST_NAME];
}

/// Keyboard input after the app has resolved global keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormInput {
    Char(char),
    Backspace,
    Left,
    Right,
    Home,
    End,
    FocusNext,
    FocusPrev,
    Activate,
    Paste(String),
    ToggleReveal,
}

/// What a screen asks the app to do after handling something
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenCommand {
    None,
    Alert(AlertRequest),
    Navigate(Route, RouteParams),
    GoBack,
    /// Clear history and start again at the route
    Restart(Route),
    Spawn(AsyncAction),
    OpenPicker(PickerSpec),
}

/// Shared read-only resources handed to a screen when it mounts
#[derive(Debug, Clone)]
pub struct MountContext {
    pub locations: Arc<LocationTable>,
    pub carousel_period: Duration,
}

pub trait ScreenController: Send {
    fn route(&self) -> Route;

    /// Runs once right after the screen is created
    fn on_mount(&mut self) -> ScreenCommand {
        ScreenCommand::None
    }

    fn handle_input(&mut self, input: FormInput) -> ScreenCommand;

    /// The picker opened from the focused row closed with a value
    fn on_picker_selected(&mut self, _value: String) -> ScreenCommand {
        ScreenCommand::None
    }

    fn on_outcome(&mut self, outcome: ActionOutcome) -> ScreenCommand {
        tracing::debug!("{} ignored outcome for {}", self.route(), outcome.operation());
        ScreenCommand::None
    }

    fn on_signal(&mut self, _signal: ScreenSignal) -> ScreenCommand {
        ScreenCommand::None
    }

    fn on_tick(&mut self) -> ScreenCommand {
        ScreenCommand::None
    }

    /// Ticker the screen currently wants; `None` releases it
    fn ticker(&self) -> Option<TickerSpec> {
        None
    }

    fn is_loading(&self) -> bool {
        false
    }
}

/// The mounted screen
#[derive(Debug)]
pub enum Screen {
    Carousel(CarouselScreen),
    SignUp(SignUpScreen),
    VerifyOtp(VerifyOtpScreen),
    CreatePassword(CreatePasswordScreen),
    ForgotPassword(ForgotPasswordScreen),
    ResetPassword(ResetPasswordScreen),
    Login(LoginScreen),
    Business(BusinessScreen),
    ContactPerson(ContactPersonScreen),
    AcceptTerms(AcceptTermsScreen),
    AccountReady(AccountReadyScreen),
}

impl Screen {
    pub fn mount(route: Route, params: &RouteParams, ctx: &MountContext) -> Self {
        match route {
            Route::Carousel => Self::Carousel(CarouselScreen::new(ctx.carousel_period)),
            Route::SignUp => Self::SignUp(SignUpScreen::new()),
            Route::VerifyOtp => Self::VerifyOtp(VerifyOtpScreen::new(params)),
            Route::CreatePassword => Self::CreatePassword(CreatePasswordScreen::new(params)),
            Route::ForgotPassword => Self::ForgotPassword(ForgotPasswordScreen::new()),
            Route::ResetPassword => Self::ResetPassword(ResetPasswordScreen::new(params)),
            Route::Login => Self::Login(LoginScreen::new()),
            Route::BusinessClassification => {
                Self::Business(BusinessScreen::new(Arc::clone(&ctx.locations)))
            }
            Route::ContactPerson => Self::ContactPerson(ContactPersonScreen::new()),
            Route::AcceptTerms => Self::AcceptTerms(AcceptTermsScreen::new(params)),
            Route::AccountReady => Self::AccountReady(AccountReadyScreen::new(params)),
        }
    }

    pub fn controller(&self) -> &dyn ScreenController {
        match self {
            Self::Carousel(s) => s,
            Self::SignUp(s) => s,
            Self::VerifyOtp(s) => s,
            Self::CreatePassword(s) => s,
            Self::ForgotPassword(s) => s,
            Self::ResetPassword(s) => s,
            Self::Login(s) => s,
            Self::Business(s) => s,
            Self::ContactPerson(s) => s,
            Self::AcceptTerms(s) => s,
            Self::AccountReady(s) => s,
        }
    }

    pub fn controller_mut(&mut self) -> &mut dyn ScreenController {
        match self {
            Self::Carousel(s) => s,
            Self::SignUp(s) => s,
            Self::VerifyOtp(s) => s,
            Self::CreatePassword(s) => s,
            Self::ForgotPassword(s) => s,
            Self::ResetPassword(s) => s,
            Self::Login(s) => s,
            Self::Business(s) => s,
            Self::ContactPerson(s) => s,
            Self::AcceptTerms(s) => s,
            Self::AccountReady(s) => s,
        }
    }

    pub fn route(&self) -> Route {
        self.controller().route()
    }

    /// Form description for screens drawn by the generic form renderer
    pub fn form_view(&self) -> Option<FormView> {
        match self {
            Self::SignUp(s) => Some(s.view()),
            Self::CreatePassword(s) => Some(s.view()),
            Self::ForgotPassword(s) => Some(s.view()),
            Self::ResetPassword(s) => Some(s.view()),
            Self::Login(s) => Some(s.view()),
            Self::Business(s) => Some(s.view()),
            Self::ContactPerson(s) => Some(s.view()),
            Self::AcceptTerms(s) => Some(s.view()),
            Self::Carousel(_) | Self::VerifyOtp(_) | Self::AccountReady(_) => None,
        }
    }
}

/// Apply a cursor or editing key to a text field; true when the value changed
pub fn edit_text(field: &mut TextField, input: &FormInput) -> bool {
    match input {
        FormInput::Char(c) => {
            field.insert_char(*c);
            true
        }
        FormInput::Paste(text) => {
            field.insert_text(text);
            !text.is_empty()
        }
        FormInput::Backspace => field.backspace(),
        FormInput::Left => {
            field.move_cursor_left();
            false
        }
        FormInput::Right => {
            field.move_cursor_right();
            false
        }
        FormInput::Home => {
            field.move_to_start();
            false
        }
        FormInput::End => {
            field.move_to_end();
            false
        }
        FormInput::ToggleReveal => {
            field.toggle_reveal();
            false
        }
        FormInput::FocusNext | FormInput::FocusPrev | FormInput::Activate => false,
    }
}

/// Informational alert for a failed backend call
pub fn failure_alert(title: &str, error: &crate::backend::BackendError) -> ScreenCommand {
    ScreenCommand::Alert(AlertRequest::info(title, &error.to_string()))
}
