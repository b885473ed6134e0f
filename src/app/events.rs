// ABOUTME: Event handling system for keyboard input and app actions
// Overlays take keys first: alert, then help, then the picker, then the mounted screen

use crate::app::AppState;
use crate::screens::FormInput;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    ToggleHelp,
    /// Esc on a screen: previous route, or quit at the root
    Back,
    // Alert dialog events
    AlertToggle,
    AlertConfirm,
    AlertCancel,
    // Bottom-sheet picker events
    PickerNext,
    PickerPrev,
    PickerSelect,
    PickerDismiss,
    /// Read the system clipboard and paste into the focused field
    PasteFromClipboard,
    /// Anything the mounted screen interprets
    Input(FormInput),
}

pub struct EventHandler;

impl EventHandler {
    fn get_clipboard_text() -> Result<String, Box<dyn std::error::Error>> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        let text = clipboard.get_text()?;
        Ok(text)
    }

    pub fn handle_key_event(key_event: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key_event.code == KeyCode::Char('c') {
            return Some(AppEvent::Quit);
        }

        // Alert dialog blocks everything else
        if state.alert.is_some() {
            return match key_event.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                    Some(AppEvent::AlertToggle)
                }
                KeyCode::Enter => Some(AppEvent::AlertConfirm),
                KeyCode::Esc => Some(AppEvent::AlertCancel),
                _ => None,
            };
        }

        if state.help_visible {
            return match key_event.code {
                KeyCode::F(1) | KeyCode::Esc => Some(AppEvent::ToggleHelp),
                _ => None,
            };
        }

        if state.picker.is_visible() {
            return match key_event.code {
                KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => Some(AppEvent::PickerNext),
                KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => Some(AppEvent::PickerPrev),
                KeyCode::Enter => Some(AppEvent::PickerSelect),
                KeyCode::Esc => Some(AppEvent::PickerDismiss),
                _ => None,
            };
        }

        let input = match key_event.code {
            KeyCode::F(1) => return Some(AppEvent::ToggleHelp),
            KeyCode::Esc => return Some(AppEvent::Back),
            KeyCode::Char('v') if ctrl => return Some(AppEvent::PasteFromClipboard),
            KeyCode::Char('r') if ctrl => FormInput::ToggleReveal,
            KeyCode::Char(_) if ctrl => return None,
            KeyCode::Char(c) => FormInput::Char(c),
            KeyCode::Tab | KeyCode::Down => FormInput::FocusNext,
            KeyCode::BackTab | KeyCode::Up => FormInput::FocusPrev,
            KeyCode::Enter => FormInput::Activate,
            KeyCode::Backspace => FormInput::Backspace,
            KeyCode::Left => FormInput::Left,
            KeyCode::Right => FormInput::Right,
            KeyCode::Home => FormInput::Home,
            KeyCode::End => FormInput::End,
            _ => return None,
        };
        Some(AppEvent::Input(input))
    }

    /// Bracketed paste from the terminal
    pub fn handle_paste(text: String, state: &AppState) -> Option<AppEvent> {
        if state.alert.is_some() || state.picker.is_visible() || state.help_visible {
            return None;
        }
        Some(AppEvent::Input(FormInput::Paste(text)))
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        match event {
            AppEvent::Quit => state.quit(),
            AppEvent::ToggleHelp => state.toggle_help(),
            AppEvent::Back => {
                if !state.go_back() {
                    debug!("Esc at the root route; quitting");
                    state.quit();
                }
            }
            AppEvent::AlertToggle => state.toggle_alert_selection(),
            AppEvent::AlertConfirm => state.accept_alert(),
            AppEvent::AlertCancel => state.cancel_alert(),
            AppEvent::PickerNext => state.picker.highlight_next(),
            AppEvent::PickerPrev => state.picker.highlight_prev(),
            AppEvent::PickerSelect => state.select_picker_option(),
            AppEvent::PickerDismiss => state.picker.dismiss(),
            AppEvent::PasteFromClipboard => match Self::get_clipboard_text() {
                Ok(text) => state.handle_form_input(FormInput::Paste(text)),
                Err(e) => warn!("Failed to read clipboard: {}", e),
            },
            AppEvent::Input(input) => state.handle_form_input(input),
        }
    }
}
