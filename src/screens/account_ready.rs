// ABOUTME: Terminal screen after login or account creation

use super::{params, FormInput, ScreenCommand, ScreenController};
use crate::app::router::{Route, RouteParams};

/// How the user arrived here
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyOutcome {
    Created,
    LoggedIn,
}

#[derive(Debug, Clone)]
pub struct AccountReadyScreen {
    outcome: ReadyOutcome,
    account_id: Option<String>,
    name: Option<String>,
    email: Option<String>,
}

impl AccountReadyScreen {
    pub fn new(route_params: &RouteParams) -> Self {
        let outcome = match route_params.get(params::OUTCOME).as_deref() {
            Some("login") => ReadyOutcome::LoggedIn,
            _ => ReadyOutcome::Created,
        };
        let name = [params::FIRST_NAME, params::LAST_NAME]
            .iter()
            .filter_map(|key| route_params.get(key))
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            outcome,
            account_id: route_params.get(params::ACCOUNT_ID),
            name: (!name.is_empty()).then_some(name),
            email: route_params.get(params::EMAIL),
        }
    }

    pub fn outcome(&self) -> ReadyOutcome {
        self.outcome
    }

    pub fn headline(&self) -> String {
        match (self.outcome, &self.name) {
            (ReadyOutcome::Created, Some(name)) => format!("Welcome aboard, {name}!"),
            (ReadyOutcome::Created, None) => "Your business account is ready".to_string(),
            (ReadyOutcome::LoggedIn, _) => "You're logged in".to_string(),
        }
    }

    /// Label/value pairs shown under the headline
    pub fn details(&self) -> Vec<(&'static str, String)> {
        let mut details = Vec::new();
        if let Some(email) = &self.email {
            details.push(("Email", email.clone()));
        }
        if let Some(id) = &self.account_id {
            details.push(("Account ID", id.clone()));
        }
        details
    }
}

impl ScreenController for AccountReadyScreen {
    fn route(&self) -> Route {
        Route::AccountReady
    }

    fn handle_input(&mut self, input: FormInput) -> ScreenCommand {
        match input {
            FormInput::Activate => ScreenCommand::Restart(Route::Carousel),
            _ => ScreenCommand::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_account_summary() {
        let screen = AccountReadyScreen::new(
            &RouteParams::new()
                .with("firstName", "Ada")
                .with("lastName", "Obi")
                .with("accountId", "1234")
                .with("outcome", "created"),
        );
        assert_eq!(screen.headline(), "Welcome aboard, Ada Obi!");
        assert_eq!(screen.details(), vec![("Account ID", "1234".to_string())]);
    }

    #[test]
    fn test_login_outcome_and_restart() {
        let mut screen = AccountReadyScreen::new(
            &RouteParams::new().with("email", "ada@example.com").with("outcome", "login"),
        );
        assert_eq!(screen.outcome(), ReadyOutcome::LoggedIn);
        assert_eq!(screen.headline(), "You're logged in");
        assert_eq!(
            screen.handle_input(FormInput::Activate),
            ScreenCommand::Restart(Route::Carousel)
        );
        assert_eq!(screen.handle_input(FormInput::Char('x')), ScreenCommand::None);
    }
}
