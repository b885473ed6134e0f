// ABOUTME: Application state: the mounted screen, router history, overlays and async plumbing

use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, warn};

use crate::app::actions::{execute, AsyncAction};
use crate::app::alert::{AlertAction, AlertRequest};
use crate::app::router::{Route, RouteParams, Router};
use crate::app::tasks::{MessagePayload, MessageSender, ScreenMessage, ScreenTasks};
use crate::app::timer::ScopedTicker;
use crate::backend::{AuthBackend, SimulatedBackend};
use crate::components::picker::BottomSheetPicker;
use crate::config::AppConfig;
use crate::forms::LocationTable;
use crate::screens::{FormInput, MountContext, Screen, ScreenCommand};

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub router: Router,
    pub alert: Option<AlertRequest>,
    pub picker: BottomSheetPicker,
    pub help_visible: bool,
    pub should_quit: bool,
    // Async action processing
    pub pending_async_action: Option<AsyncAction>,
    // Flag to force UI refresh after a background message
    pub ui_needs_refresh: bool,
    pub app_config: AppConfig,
    /// Bumped on every mount; messages from older mounts are dropped
    generation: u64,
    mount_ctx: MountContext,
    ticker: Option<ScopedTicker>,
    tasks: ScreenTasks,
}

impl AppState {
    pub fn new(
        app_config: AppConfig,
        locations: Arc<LocationTable>,
        start: Route,
        params: RouteParams,
    ) -> Self {
        let mount_ctx = MountContext {
            locations,
            carousel_period: app_config.carousel.auto_advance(),
        };
        let screen = Screen::mount(start, &params, &mount_ctx);
        let mut state = Self {
            screen,
            router: Router::new(start, params),
            alert: None,
            picker: BottomSheetPicker::new(),
            help_visible: false,
            should_quit: false,
            pending_async_action: None,
            ui_needs_refresh: false,
            app_config,
            generation: 0,
            mount_ctx,
            ticker: None,
            tasks: ScreenTasks::new(),
        };
        let command = state.screen.controller_mut().on_mount();
        state.apply_command(command);
        state
    }

    pub fn current_route(&self) -> Route {
        self.screen.route()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn in_flight(&self) -> usize {
        self.tasks.in_flight()
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Replace the mounted screen with the router's current entry
    fn remount(&mut self) {
        let (route, params) = self.router.current();
        let leaving = self.screen.route();
        if self.screen.controller().is_loading() || self.pending_async_action.is_some() {
            debug!("Leaving {} with a request in flight; cancelling it", leaving);
        }

        // Drop the old screen's resources before the new one exists
        self.tasks.abort_all();
        self.ticker = None;
        self.pending_async_action = None;
        self.picker.dismiss();
        self.alert = None;
        self.generation += 1;

        self.screen = Screen::mount(route, params, &self.mount_ctx);
        info!("Navigated {} -> {} (depth {})", leaving, route, self.router.depth());

        let command = self.screen.controller_mut().on_mount();
        self.apply_command(command);
    }

    pub fn navigate(&mut self, route: Route, params: RouteParams) {
        self.router.navigate(route, params);
        self.remount();
    }

    /// Pop one route; returns false at the root
    pub fn go_back(&mut self) -> bool {
        if self.router.go_back() {
            self.remount();
            true
        } else {
            debug!("Already at the root route; nothing to go back to");
            false
        }
    }

    pub fn restart(&mut self, route: Route) {
        self.router.reset(route);
        self.remount();
    }

    pub fn apply_command(&mut self, command: ScreenCommand) {
        match command {
            ScreenCommand::None => {}
            ScreenCommand::Alert(alert) => {
                debug!("Showing alert: {}", alert.title);
                self.alert = Some(alert);
            }
            ScreenCommand::Navigate(route, params) => self.navigate(route, params),
            ScreenCommand::GoBack => {
                self.go_back();
            }
            ScreenCommand::Restart(route) => self.restart(route),
            ScreenCommand::Spawn(action) => {
                if let Some(previous) = self.pending_async_action.replace(action) {
                    warn!("Replacing unprocessed action {:?}", previous.operation());
                }
            }
            ScreenCommand::OpenPicker(spec) => {
                let label = spec.label.clone();
                if !self.picker.present(spec) {
                    debug!("Picker {} is disabled", label);
                }
            }
        }
    }

    pub fn apply_alert_action(&mut self, action: AlertAction) {
        match action {
            AlertAction::Dismiss => {}
            AlertAction::GoBack => {
                self.go_back();
            }
            AlertAction::Navigate(route, params) => self.navigate(route, params),
            AlertAction::Signal(signal) => {
                let command = self.screen.controller_mut().on_signal(signal);
                self.apply_command(command);
            }
        }
    }

    pub fn accept_alert(&mut self) {
        if let Some(alert) = self.alert.take() {
            self.apply_alert_action(alert.accept());
        }
    }

    pub fn cancel_alert(&mut self) {
        if let Some(alert) = self.alert.take() {
            self.apply_alert_action(alert.cancel());
        }
    }

    pub fn toggle_alert_selection(&mut self) {
        if let Some(alert) = self.alert.as_mut() {
            alert.toggle_selection();
        }
    }

    pub fn select_picker_option(&mut self) {
        if let Some(value) = self.picker.select() {
            let command = self.screen.controller_mut().on_picker_selected(value);
            self.apply_command(command);
        }
    }

    pub fn handle_form_input(&mut self, input: FormInput) {
        let command = self.screen.controller_mut().handle_input(input);
        self.apply_command(command);
    }

    /// Route a background message to the mounted screen
    pub fn handle_message(&mut self, message: ScreenMessage) {
        if message.generation != self.generation {
            debug!(
                "Dropping stale message from generation {} (current {})",
                message.generation, self.generation
            );
            return;
        }
        let command = match message.payload {
            MessagePayload::Tick => self.screen.controller_mut().on_tick(),
            MessagePayload::Outcome(outcome) => self.screen.controller_mut().on_outcome(outcome),
        };
        self.apply_command(command);
        self.ui_needs_refresh = true;
    }

    /// Start, restart or release the ticker to match what the screen wants now
    pub fn sync_ticker(&mut self, tx: &MessageSender) {
        let wanted = self.screen.controller().ticker();
        match (&self.ticker, wanted) {
            (Some(current), Some(spec)) if current.spec() == spec => {}
            (_, Some(spec)) => {
                self.ticker = Some(ScopedTicker::start(spec, self.generation, tx.clone()));
            }
            (Some(_), None) => {
                debug!("Releasing ticker for {}", self.screen.route());
                self.ticker = None;
            }
            (None, None) => {}
        }
    }

    /// Hand the pending action to a task owned by the mounted screen
    pub fn spawn_pending(&mut self, backend: &Arc<dyn AuthBackend>, tx: &MessageSender) {
        let Some(action) = self.pending_async_action.take() else {
            return;
        };
        let backend = Arc::clone(backend);
        let tx = tx.clone();
        let generation = self.generation;
        self.tasks.spawn(async move {
            let outcome = execute(action, backend.as_ref()).await;
            let message = ScreenMessage {
                generation,
                payload: MessagePayload::Outcome(outcome),
            };
            if tx.send(message).is_err() {
                debug!("UI loop gone; dropping outcome");
            }
        });
    }
}

pub struct App {
    pub state: AppState,
    backend: Arc<dyn AuthBackend>,
    tx: MessageSender,
    rx: UnboundedReceiver<ScreenMessage>,
}

impl App {
    pub fn new(
        app_config: AppConfig,
        backend: Arc<dyn AuthBackend>,
        locations: Arc<LocationTable>,
        start: Route,
        params: RouteParams,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(app_config, locations, start, params),
            backend,
            tx,
            rx,
        }
    }

    /// App wired to the simulated backend and the configured location data
    pub fn from_config(app_config: AppConfig, start: Route, params: RouteParams) -> anyhow::Result<Self> {
        let locations = LocationTable::load(app_config.locations.data_file.as_deref())?;
        let backend = SimulatedBackend::new(app_config.simulation.clone());
        Ok(Self::new(app_config, Arc::new(backend), Arc::new(locations), start, params))
    }

    /// Drain background messages, start queued work and reconcile timers
    pub async fn tick(&mut self) -> anyhow::Result<()> {
        while let Ok(message) = self.rx.try_recv() {
            self.state.handle_message(message);
        }
        self.settle();
        Ok(())
    }

    fn settle(&mut self) {
        if let Some(action) = &self.state.pending_async_action {
            info!("Dispatching {}", action.operation());
        }
        self.state.spawn_pending(&self.backend, &self.tx);
        self.state.sync_ticker(&self.tx);
    }

    /// Wait for the next background message and apply it
    pub async fn process_next_message(&mut self) -> bool {
        self.settle();
        match self.rx.recv().await {
            Some(message) => {
                self.state.handle_message(message);
                self.settle();
                true
            }
            None => false,
        }
    }

    /// Check if UI needs immediate refresh and clear the flag
    pub fn needs_ui_refresh(&mut self) -> bool {
        if self.state.ui_needs_refresh {
            self.state.ui_needs_refresh = false;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::actions::ActionOutcome;
    use crate::app::alert::ScreenSignal;
    use crate::screens::test_support::mount_context;
    use crate::screens::Screen;

    fn state_at(route: Route, params: RouteParams) -> AppState {
        AppState::new(AppConfig::default(), mount_context().locations, route, params)
    }

    #[test]
    fn test_missing_email_alert_goes_back() {
        let mut state = state_at(Route::SignUp, RouteParams::new());
        state.navigate(Route::VerifyOtp, RouteParams::new());
        assert!(state.alert.is_some());

        state.accept_alert();
        assert_eq!(state.current_route(), Route::SignUp);
        assert!(state.alert.is_none());
    }

    #[test]
    fn test_navigation_bumps_generation_and_drops_stale_outcomes() {
        let mut state = state_at(Route::Login, RouteParams::new());
        let old = state.generation();
        state.navigate(Route::ForgotPassword, RouteParams::new());
        assert_eq!(state.generation(), old + 1);

        state.handle_message(ScreenMessage {
            generation: old,
            payload: MessagePayload::Outcome(ActionOutcome::LoggedIn(Ok(()))),
        });
        assert!(state.alert.is_none());
        assert_eq!(state.current_route(), Route::ForgotPassword);
    }

    #[test]
    fn test_leaving_screen_clears_pending_work() {
        let mut state = state_at(Route::AcceptTerms, RouteParams::new());
        state.handle_form_input(FormInput::Activate);
        state.apply_alert_action(AlertAction::Signal(ScreenSignal::CreateAccount));
        assert_eq!(state.pending_async_action, Some(AsyncAction::CreateAccount));

        state.restart(Route::Carousel);
        assert!(state.pending_async_action.is_none());
        assert_eq!(state.router.depth(), 1);
    }

    #[test]
    fn test_picker_selection_reaches_screen() {
        let mut state = state_at(Route::SignUp, RouteParams::new());
        for _ in 0..3 {
            state.handle_form_input(FormInput::FocusNext);
        }
        state.handle_form_input(FormInput::Activate);
        assert!(state.picker.is_visible());
        state.picker.highlight_next();
        state.select_picker_option();
        assert!(!state.picker.is_visible());
        match &state.screen {
            Screen::SignUp(screen) => assert_eq!(screen.calling_code().code, "233"),
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn test_go_back_at_root_is_refused() {
        let mut state = state_at(Route::Carousel, RouteParams::new());
        assert!(!state.go_back());
        assert_eq!(state.current_route(), Route::Carousel);
    }
}
