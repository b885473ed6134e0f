// ABOUTME: End-to-end flow tests driving App through key input and background outcomes

use async_trait::async_trait;
use mockall::mock;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

use bizauth::app::router::{Route, RouteParams};
use bizauth::app::{App, AppState};
use bizauth::backend::{AuthBackend, BackendError, SimulatedBackend};
use bizauth::config::{AppConfig, SimulationConfig};
use bizauth::forms::LocationTable;
use bizauth::models::{AccountId, BusinessProfile, ContactDetails, Secret};
use bizauth::screens::{FormInput, Screen};

mock! {
    pub Backend {}

    #[async_trait]
    impl AuthBackend for Backend {
        async fn request_otp(&self, email: &str) -> Result<(), BackendError>;
        async fn verify_otp(&self, email: &str, code: &Secret) -> Result<(), BackendError>;
        async fn resend_otp(&self, email: &str) -> Result<(), BackendError>;
        async fn set_password(&self, password: &Secret) -> Result<(), BackendError>;
        async fn send_reset_link(&self, email: &str) -> Result<(), BackendError>;
        async fn reset_password(&self, token: &str, password: &Secret) -> Result<(), BackendError>;
        async fn login(&self, email: &str, password: &Secret, remember: bool) -> Result<(), BackendError>;
        async fn register_business(&self, profile: &BusinessProfile) -> Result<(), BackendError>;
        async fn save_contact_person(&self, contact: &ContactDetails) -> Result<(), BackendError>;
        async fn create_account(&self) -> Result<AccountId, BackendError>;
    }
}

fn locations() -> Arc<LocationTable> {
    Arc::new(LocationTable::embedded().unwrap())
}

fn app_with(backend: impl AuthBackend + 'static, start: Route, params: RouteParams) -> App {
    App::new(AppConfig::default(), Arc::new(backend), locations(), start, params)
}

fn instant_app(start: Route, params: RouteParams) -> App {
    app_with(SimulatedBackend::new(SimulationConfig::instant()), start, params)
}

fn press(app: &mut App, input: FormInput) {
    app.state.handle_form_input(input);
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, FormInput::Char(c));
    }
}

fn next(app: &mut App, times: usize) {
    for _ in 0..times {
        press(app, FormInput::FocusNext);
    }
}

/// Apply background messages until `done` holds
async fn pump_until(app: &mut App, done: impl Fn(&AppState) -> bool) {
    for _ in 0..200 {
        if done(&app.state) {
            return;
        }
        assert!(app.process_next_message().await, "message channel closed");
    }
    panic!("condition never reached; route is {}", app.state.current_route());
}

fn alert_title(state: &AppState) -> Option<&str> {
    state.alert.as_ref().map(|a| a.title.as_str())
}

fn fill_sign_up(app: &mut App) {
    type_text(app, "Ada");
    next(app, 1);
    type_text(app, "Obi");
    next(app, 1);
    type_text(app, "ada@faithmed.ng");
    next(app, 2); // past the calling-code picker
    type_text(app, "08031234567");
    next(app, 2); // past the referral code
}

#[tokio::test(start_paused = true)]
async fn test_sign_up_through_password_creation() {
    let mut app = instant_app(Route::SignUp, RouteParams::new());

    fill_sign_up(&mut app);
    press(&mut app, FormInput::Activate);
    assert!(app.state.screen.controller().is_loading());
    pump_until(&mut app, |s| s.current_route() == Route::VerifyOtp).await;

    let (_, params) = app.state.router.current();
    assert_eq!(params.get("email").as_deref(), Some("ada@faithmed.ng"));
    assert_eq!(params.get("phone").as_deref(), Some("+2348031234567"));

    type_text(&mut app, "123456");
    press(&mut app, FormInput::Activate);
    pump_until(&mut app, |s| s.alert.is_some()).await;
    assert_eq!(alert_title(&app.state), Some("Success"));
    app.state.accept_alert();
    assert_eq!(app.state.current_route(), Route::CreatePassword);

    type_text(&mut app, "password1");
    next(&mut app, 1);
    type_text(&mut app, "password1");
    next(&mut app, 1);
    press(&mut app, FormInput::Activate);
    pump_until(&mut app, |s| s.alert.is_some()).await;
    assert_eq!(
        app.state.alert.as_ref().map(|a| a.message.as_str()),
        Some("Password created successfully!")
    );
    app.state.accept_alert();
    assert_eq!(app.state.current_route(), Route::BusinessClassification);
    assert_eq!(app.state.router.depth(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_rejected_otp_request_stays_on_sign_up() {
    let mut backend = MockBackend::new();
    backend
        .expect_request_otp()
        .withf(|email| email == "ada@faithmed.ng")
        .times(1)
        .returning(|_| Err(BackendError::Rejected("Email already registered".to_string())));

    let mut app = app_with(backend, Route::SignUp, RouteParams::new());
    fill_sign_up(&mut app);
    press(&mut app, FormInput::Activate);
    pump_until(&mut app, |s| s.alert.is_some()).await;

    let alert = app.state.alert.clone().unwrap();
    assert_eq!(alert.title, "Error");
    assert_eq!(alert.message, "Email already registered");
    assert!(!app.state.screen.controller().is_loading());

    app.state.accept_alert();
    assert_eq!(app.state.current_route(), Route::SignUp);
}

#[tokio::test(start_paused = true)]
async fn test_login_lands_on_account_ready() {
    let mut backend = MockBackend::new();
    backend
        .expect_login()
        .withf(|email, password, remember| {
            email == "ops@faithmed.ng" && password.expose() == "password1" && *remember
        })
        .times(1)
        .returning(|_, _, _| Ok(()));

    let mut app = app_with(backend, Route::Login, RouteParams::new());
    type_text(&mut app, "ops@faithmed.ng");
    next(&mut app, 1);
    type_text(&mut app, "password1");
    next(&mut app, 1);
    press(&mut app, FormInput::Char(' ')); // remember me
    next(&mut app, 2);
    press(&mut app, FormInput::Activate);

    pump_until(&mut app, |s| s.alert.is_some()).await;
    assert_eq!(alert_title(&app.state), Some("Success"));
    app.state.cancel_alert(); // Esc runs the same follow-up as OK

    match &app.state.screen {
        Screen::AccountReady(screen) => assert_eq!(screen.headline(), "You're logged in"),
        other => panic!("expected account ready, got {:?}", other.route()),
    }

    press(&mut app, FormInput::Activate);
    assert_eq!(app.state.current_route(), Route::Carousel);
    assert_eq!(app.state.router.depth(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_confirmed_terms_create_the_account() {
    let id = AccountId::new();
    let mut backend = MockBackend::new();
    backend.expect_create_account().times(1).returning(move || Ok(id));

    let params = RouteParams::new()
        .with("email", "ops@faithmed.ng")
        .with("firstName", "Ada")
        .with("lastName", "Obi");
    let mut app = app_with(backend, Route::AcceptTerms, params);

    press(&mut app, FormInput::Activate); // tick the checkbox
    next(&mut app, 1);
    press(&mut app, FormInput::Activate);
    assert_eq!(alert_title(&app.state), Some("Create Account"));

    // Cancel first: nothing is created
    app.state.toggle_alert_selection();
    app.state.accept_alert();
    assert!(app.state.alert.is_none());
    assert!(app.state.pending_async_action.is_none());

    press(&mut app, FormInput::Activate);
    app.state.accept_alert();
    pump_until(&mut app, |s| s.current_route() == Route::AccountReady).await;

    let (_, params) = app.state.router.current();
    assert_eq!(params.get("accountId"), Some(id.to_string()));
    assert_eq!(params.get("outcome").as_deref(), Some("created"));
}

#[tokio::test(start_paused = true)]
async fn test_otp_countdown_unlocks_resend() {
    let mut backend = MockBackend::new();
    backend
        .expect_resend_otp()
        .withf(|email| email == "ada@faithmed.ng")
        .times(1)
        .returning(|_| Ok(()));

    let params = RouteParams::new().with("email", "ada@faithmed.ng");
    let mut app = app_with(backend, Route::VerifyOtp, params);

    let can_resend = |s: &AppState| match &s.screen {
        Screen::VerifyOtp(screen) => screen.otp().can_resend(),
        _ => false,
    };

    // Resend is refused while counting down
    next(&mut app, 1);
    press(&mut app, FormInput::Activate);
    assert!(app.state.pending_async_action.is_none());

    pump_until(&mut app, can_resend).await;
    app.tick().await.unwrap();
    assert!(!app.state.has_ticker());

    press(&mut app, FormInput::Activate);
    pump_until(&mut app, |s| s.alert.is_some()).await;
    assert_eq!(
        app.state.alert.as_ref().map(|a| a.message.as_str()),
        Some("A new OTP has been sent to your email.")
    );
    match &app.state.screen {
        Screen::VerifyOtp(screen) => {
            assert_eq!(screen.otp().remaining_secs(), 60);
            assert_eq!(screen.otp().remaining_attempts(), 2);
        }
        other => panic!("unexpected screen {:?}", other.route()),
    }
}

#[tokio::test(start_paused = true)]
async fn test_leaving_a_screen_cancels_its_request() {
    let mut config = SimulationConfig::instant();
    config.login_ms = 2000;
    let mut app = app_with(SimulatedBackend::new(config), Route::Carousel, RouteParams::new());

    app.state.navigate(Route::Login, RouteParams::new());
    type_text(&mut app, "ops@faithmed.ng");
    next(&mut app, 1);
    type_text(&mut app, "password1");
    next(&mut app, 3);
    press(&mut app, FormInput::Activate);
    app.tick().await.unwrap();
    assert_eq!(app.state.in_flight(), 1);

    assert!(app.state.go_back());
    assert_eq!(app.state.in_flight(), 0);

    tokio::time::advance(Duration::from_secs(3)).await;
    app.tick().await.unwrap();
    assert_eq!(app.state.current_route(), Route::Carousel);
    assert!(app.state.alert.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_offline_backend_keeps_user_on_forgot_password() {
    let mut config = SimulationConfig::instant();
    config.offline = true;
    let mut app = app_with(SimulatedBackend::new(config), Route::ForgotPassword, RouteParams::new());

    type_text(&mut app, "ops@faithmed.ng");
    next(&mut app, 1);
    press(&mut app, FormInput::Activate);
    pump_until(&mut app, |s| s.alert.is_some()).await;

    assert_eq!(
        app.state.alert.as_ref().map(|a| a.message.as_str()),
        Some("Service unavailable. Please try again later.")
    );
    app.state.accept_alert();
    assert_eq!(app.state.current_route(), Route::ForgotPassword);
}
