// ABOUTME: Main application structure and state management for the TUI

pub mod actions;
pub mod alert;
pub mod events;
pub mod router;
pub mod state;
pub mod tasks;
pub mod timer;

pub use actions::{ActionOutcome, AsyncAction};
pub use alert::{AlertAction, AlertKind, AlertRequest, ScreenSignal};
pub use events::{AppEvent, EventHandler};
pub use router::{Route, RouteParams, Router};
pub use state::{App, AppState};
