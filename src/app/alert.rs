// ABOUTME: Blocking alert descriptor with separate confirm and cancel outcomes
// At most one alert is held; showing a new one replaces the previous request wholesale

use crate::app::router::{Route, RouteParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// Single OK button; Enter and Esc both run `on_confirm`
    Info,
    /// Confirm and Cancel buttons; Esc runs `on_cancel`
    Confirm,
}

/// Screen-specific follow-up that only the originating screen knows how to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenSignal {
    CreateAccount,
}

/// What happens when the alert closes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertAction {
    Dismiss,
    GoBack,
    Navigate(Route, RouteParams),
    Signal(ScreenSignal),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRequest {
    pub title: String,
    pub message: String,
    pub kind: AlertKind,
    pub on_confirm: AlertAction,
    pub on_cancel: AlertAction,
    pub confirm_label: String,
    pub cancel_label: String,
    /// Highlighted button for confirm alerts; true = confirm
    pub confirm_selected: bool,
}

impl AlertRequest {
    /// Informational alert that simply closes
    pub fn info(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            kind: AlertKind::Info,
            on_confirm: AlertAction::Dismiss,
            on_cancel: AlertAction::Dismiss,
            confirm_label: "OK".to_string(),
            cancel_label: String::new(),
            confirm_selected: true,
        }
    }

    /// Informational alert whose OK, Esc and backdrop all run `action`
    pub fn info_then(title: &str, message: &str, action: AlertAction) -> Self {
        Self {
            on_confirm: action.clone(),
            on_cancel: action,
            ..Self::info(title, message)
        }
    }

    /// Two-button confirmation; cancel just closes
    pub fn confirm(title: &str, message: &str, on_confirm: AlertAction) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            kind: AlertKind::Confirm,
            on_confirm,
            on_cancel: AlertAction::Dismiss,
            confirm_label: "Confirm".to_string(),
            cancel_label: "Cancel".to_string(),
            confirm_selected: true,
        }
    }

    pub fn with_labels(mut self, confirm: &str, cancel: &str) -> Self {
        self.confirm_label = confirm.to_string();
        self.cancel_label = cancel.to_string();
        self
    }

    pub fn toggle_selection(&mut self) {
        if self.kind == AlertKind::Confirm {
            self.confirm_selected = !self.confirm_selected;
        }
    }

    /// Action for Enter on the highlighted button
    pub fn accept(&self) -> AlertAction {
        if self.confirm_selected {
            self.on_confirm.clone()
        } else {
            self.on_cancel.clone()
        }
    }

    /// Action for Esc or backdrop
    pub fn cancel(&self) -> AlertAction {
        self.on_cancel.clone()
    }
}
