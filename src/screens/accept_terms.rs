// ABOUTME: Terms acceptance: checkbox gate and a confirmation before the account is created

use tracing::{debug, info};

use super::{params, FormInput, FormRow, FormView, ScreenCommand, ScreenController};
use crate::app::actions::{ActionOutcome, AsyncAction};
use crate::app::alert::{AlertAction, AlertRequest, ScreenSignal};
use crate::app::router::{Route, RouteParams};
use crate::forms::FocusRing;
use crate::models::Registrant;

const TERMS_SUMMARY: &str = "Deliveries are scheduled against the business profile you registered. \
You are responsible for the accuracy of pickup addresses and contact details.";
const PRIVACY_SUMMARY: &str = "Contact details are used only to coordinate deliveries and \
account notices. They are never sold to third parties.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermsRow {
    TermsOfService,
    PrivacyPolicy,
    Accept,
    Submit,
}

const ROWS: &[TermsRow] = &[
    TermsRow::TermsOfService,
    TermsRow::PrivacyPolicy,
    TermsRow::Accept,
    TermsRow::Submit,
];

#[derive(Debug, Clone)]
pub struct AcceptTermsScreen {
    registrant: Registrant,
    identity: RouteParams,
    accepted: bool,
    show_unaccepted: bool,
    focus: FocusRing,
    is_loading: bool,
}

impl AcceptTermsScreen {
    pub fn new(route_params: &RouteParams) -> Self {
        let get = |key| route_params.get(key).unwrap_or_default();
        Self {
            registrant: Registrant {
                email: get(params::EMAIL),
                phone: get(params::PHONE),
                first_name: get(params::FIRST_NAME),
                last_name: get(params::LAST_NAME),
            },
            identity: route_params.forward(params::IDENTITY),
            accepted: false,
            show_unaccepted: false,
            focus: FocusRing::at(2),
            is_loading: false,
        }
    }

    pub fn accepted(&self) -> bool {
        self.accepted
    }

    pub fn registrant(&self) -> &Registrant {
        &self.registrant
    }

    fn focused(&self) -> TermsRow {
        ROWS[self.focus.index()]
    }

    fn toggle(&mut self) {
        self.accepted = !self.accepted;
        self.show_unaccepted = false;
    }

    fn submit(&mut self) -> ScreenCommand {
        if self.is_loading {
            return ScreenCommand::None;
        }
        if !self.accepted {
            self.show_unaccepted = true;
            return ScreenCommand::None;
        }
        ScreenCommand::Alert(
            AlertRequest::confirm(
                "Create Account",
                "Are you sure you want to create your business account?",
                AlertAction::Signal(ScreenSignal::CreateAccount),
            )
            .with_labels("Create Account", "Cancel"),
        )
    }

    pub fn view(&self) -> FormView {
        let subtitle = if self.registrant.first_name.is_empty() {
            "Please review our Terms of Service and Privacy Policy before proceeding.".to_string()
        } else {
            format!(
                "{}, please review our Terms of Service and Privacy Policy before proceeding.",
                self.registrant.display_name()
            )
        };
        FormView::new("Terms & Conditions", &subtitle)
            .row(FormRow::link("Terms of Service"))
            .row(FormRow::link("Privacy Policy"))
            .row(
                FormRow::checkbox("I agree to the Terms & Conditions.", self.accepted)
                    .required()
                    .invalid(self.show_unaccepted),
            )
            .row(FormRow::button("Create Account", self.accepted, self.is_loading))
            .focused(self.focus.index())
    }
}

impl ScreenController for AcceptTermsScreen {
    fn route(&self) -> Route {
        Route::AcceptTerms
    }

    fn handle_input(&mut self, input: FormInput) -> ScreenCommand {
        match (self.focused(), input) {
            (_, FormInput::FocusNext) => self.focus.next(ROWS.len(), |_| true),
            (_, FormInput::FocusPrev) => self.focus.prev(ROWS.len(), |_| true),
            (TermsRow::TermsOfService, FormInput::Activate) => {
                return ScreenCommand::Alert(AlertRequest::info("Terms of Service", TERMS_SUMMARY));
            }
            (TermsRow::PrivacyPolicy, FormInput::Activate) => {
                return ScreenCommand::Alert(AlertRequest::info("Privacy Policy", PRIVACY_SUMMARY));
            }
            (TermsRow::Accept, FormInput::Activate | FormInput::Char(' ')) => self.toggle(),
            (TermsRow::Submit, FormInput::Activate) => return self.submit(),
            _ => {}
        }
        ScreenCommand::None
    }

    fn on_signal(&mut self, signal: ScreenSignal) -> ScreenCommand {
        match signal {
            ScreenSignal::CreateAccount if self.accepted && !self.is_loading => {
                info!("Creating business account");
                self.is_loading = true;
                ScreenCommand::Spawn(AsyncAction::CreateAccount)
            }
            ScreenSignal::CreateAccount => ScreenCommand::None,
        }
    }

    fn on_outcome(&mut self, outcome: ActionOutcome) -> ScreenCommand {
        match outcome {
            ActionOutcome::AccountCreated(result) => {
                self.is_loading = false;
                match result {
                    Ok(account_id) => {
                        let mut next = self.identity.clone();
                        next.insert(params::ACCOUNT_ID, &account_id.to_string());
                        next.insert(params::OUTCOME, "created");
                        ScreenCommand::Navigate(Route::AccountReady, next)
                    }
                    Err(e) => ScreenCommand::Alert(AlertRequest::info("Error", &e.to_string())),
                }
            }
            other => {
                debug!("Accept terms ignored outcome for {}", other.operation());
                ScreenCommand::None
            }
        }
    }

    fn is_loading(&self) -> bool {
        self.is_loading
    }
}
