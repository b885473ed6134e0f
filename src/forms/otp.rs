// ABOUTME: One-time passcode entry state machine with countdown and bounded resends
// Pure state; the countdown is driven by an external one-second ticker

use thiserror::Error;

/// Number of digit slots in a passcode
pub const OTP_LENGTH: usize = 6;
/// Countdown start in seconds
pub const TIMER_DURATION_SECS: u32 = 60;
/// Maximum number of resend requests per screen visit
pub const MAX_RESEND_ATTEMPTS: u32 = 3;

/// Reasons a submit or resend request is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OtpError {
    #[error("Please enter a 6-digit OTP")]
    IncompleteCode,

    #[error("Your OTP has expired. Please request a new one.")]
    Expired,

    #[error("A request is already in progress")]
    Busy,

    /// Resend requested before the countdown reached zero
    #[error("Resend is not available yet")]
    NotAvailable,

    #[error("You've reached the maximum number of resend attempts. Please try again later.")]
    LimitReached,
}

/// Verification progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyPhase {
    Entering,
    Submitting,
    Verified,
}

/// Resend sub-machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResendPhase {
    CountingDown,
    Expired,
    Resending,
}

#[derive(Debug, Clone)]
pub struct OtpState {
    slots: [Option<char>; OTP_LENGTH],
    focused_slot: usize,
    remaining_secs: u32,
    resend_attempts: u32,
    has_error: bool,
    phase: VerifyPhase,
    resend_phase: ResendPhase,
}

impl OtpState {
    pub fn new() -> Self {
        Self {
            slots: [None; OTP_LENGTH],
            focused_slot: 0,
            remaining_secs: TIMER_DURATION_SECS,
            resend_attempts: 0,
            has_error: false,
            phase: VerifyPhase::Entering,
            resend_phase: ResendPhase::CountingDown,
        }
    }

    pub fn slots(&self) -> &[Option<char>; OTP_LENGTH] {
        &self.slots
    }

    pub fn focused_slot(&self) -> usize {
        self.focused_slot
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn resend_attempts(&self) -> u32 {
        self.resend_attempts
    }

    pub fn remaining_attempts(&self) -> u32 {
        MAX_RESEND_ATTEMPTS.saturating_sub(self.resend_attempts)
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn phase(&self) -> VerifyPhase {
        self.phase
    }

    pub fn resend_phase(&self) -> ResendPhase {
        self.resend_phase
    }

    /// True only once the countdown has reached zero
    pub fn can_resend(&self) -> bool {
        self.resend_phase == ResendPhase::Expired
    }

    /// Whether the one-second countdown should currently be running
    pub fn is_counting_down(&self) -> bool {
        self.resend_phase == ResendPhase::CountingDown && self.phase != VerifyPhase::Verified
    }

    /// Whether the digit slots accept edits
    pub fn is_editable(&self) -> bool {
        self.phase == VerifyPhase::Entering && self.resend_phase != ResendPhase::Resending
    }

    pub fn code(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Remaining time as `MM:SS`
    pub fn formatted_timer(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }

    /// Set a slot to `value`; rejects anything other than empty or one ASCII digit
    pub fn input(&mut self, slot: usize, value: &str) -> bool {
        if slot >= OTP_LENGTH || !self.is_editable() {
            return false;
        }

        let mut chars = value.chars();
        let digit = match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(c), None) if c.is_ascii_digit() => Some(c),
            _ => return false,
        };

        self.slots[slot] = digit;
        self.has_error = false;
        self.focused_slot = slot;
        if digit.is_some() && slot < OTP_LENGTH - 1 {
            self.focused_slot = slot + 1;
        }
        true
    }

    /// Type a character into the focused slot
    pub fn type_char(&mut self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.input(self.focused_slot, c.encode_utf8(&mut buf))
    }

    /// Clear the focused slot, or step back when it is already empty
    pub fn backspace(&mut self) {
        if !self.is_editable() {
            return;
        }
        if self.slots[self.focused_slot].is_some() {
            self.slots[self.focused_slot] = None;
        } else if self.focused_slot > 0 {
            self.focused_slot -= 1;
            self.slots[self.focused_slot] = None;
        }
        self.has_error = false;
    }

    pub fn focus_slot(&mut self, slot: usize) {
        if slot < OTP_LENGTH {
            self.focused_slot = slot;
        }
    }

    pub fn focus_left(&mut self) {
        self.focused_slot = self.focused_slot.saturating_sub(1);
    }

    pub fn focus_right(&mut self) {
        if self.focused_slot < OTP_LENGTH - 1 {
            self.focused_slot += 1;
        }
    }

    /// Fill all slots from pasted text when it holds exactly six digits
    pub fn paste(&mut self, text: &str) -> bool {
        if !self.is_editable() {
            return false;
        }
        let digits: Vec<char> = text.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != OTP_LENGTH {
            return false;
        }
        for (slot, digit) in self.slots.iter_mut().zip(digits) {
            *slot = Some(digit);
        }
        self.focused_slot = OTP_LENGTH - 1;
        self.has_error = false;
        true
    }

    /// Advance the countdown by one second; returns true when it just expired
    pub fn tick(&mut self) -> bool {
        if !self.is_counting_down() {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.resend_phase = ResendPhase::Expired;
            return true;
        }
        false
    }

    /// Validate the code and move to `Submitting`, returning the code to verify
    pub fn begin_submit(&mut self) -> Result<String, OtpError> {
        if self.phase != VerifyPhase::Entering || self.resend_phase == ResendPhase::Resending {
            return Err(OtpError::Busy);
        }
        if self.filled_count() != OTP_LENGTH {
            self.has_error = true;
            return Err(OtpError::IncompleteCode);
        }
        if self.remaining_secs == 0 {
            self.has_error = true;
            return Err(OtpError::Expired);
        }
        self.phase = VerifyPhase::Submitting;
        Ok(self.code())
    }

    /// Apply the verification result
    pub fn finish_submit(&mut self, verified: bool) {
        if self.phase != VerifyPhase::Submitting {
            return;
        }
        if verified {
            self.phase = VerifyPhase::Verified;
            self.has_error = false;
        } else {
            self.phase = VerifyPhase::Entering;
            self.has_error = true;
        }
    }

    /// Check the resend preconditions and move to `Resending`
    pub fn begin_resend(&mut self) -> Result<(), OtpError> {
        if self.resend_attempts >= MAX_RESEND_ATTEMPTS {
            return Err(OtpError::LimitReached);
        }
        if self.resend_phase != ResendPhase::Expired || self.phase != VerifyPhase::Entering {
            return Err(OtpError::NotAvailable);
        }
        self.resend_phase = ResendPhase::Resending;
        Ok(())
    }

    /// Apply the resend result; success restarts the countdown with empty slots
    pub fn finish_resend(&mut self, sent: bool) {
        if self.resend_phase != ResendPhase::Resending {
            return;
        }
        if sent {
            self.resend_attempts += 1;
            self.slots = [None; OTP_LENGTH];
            self.focused_slot = 0;
            self.has_error = false;
            self.remaining_secs = TIMER_DURATION_SECS;
            self.resend_phase = ResendPhase::CountingDown;
        } else {
            self.resend_phase = ResendPhase::Expired;
        }
    }
}

impl Default for OtpState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expire(state: &mut OtpState) {
        for _ in 0..TIMER_DURATION_SECS {
            state.tick();
        }
    }

    fn fill(state: &mut OtpState, code: &str) {
        for (slot, c) in code.chars().enumerate() {
            assert!(state.input(slot, &c.to_string()));
        }
    }

    #[test]
    fn test_new_state() {
        let state = OtpState::new();
        assert_eq!(state.slots().len(), OTP_LENGTH);
        assert_eq!(state.remaining_secs(), 60);
        assert!(!state.can_resend());
        assert_eq!(state.formatted_timer(), "01:00");
    }

    #[test]
    fn test_timer_counts_down_over_sixty_ticks() {
        let mut state = OtpState::new();
        for tick in 1..=TIMER_DURATION_SECS {
            let expired = state.tick();
            assert_eq!(state.remaining_secs(), TIMER_DURATION_SECS - tick);
            if tick < TIMER_DURATION_SECS {
                assert!(!expired);
                assert!(!state.can_resend(), "resend must stay locked at {}s", state.remaining_secs());
            }
        }
        assert_eq!(state.remaining_secs(), 0);
        assert!(state.can_resend());
        assert!(!state.is_counting_down());

        // Further ticks are no-ops
        assert!(!state.tick());
        assert_eq!(state.remaining_secs(), 0);
    }

    #[test]
    fn test_non_digit_input_is_rejected() {
        let mut state = OtpState::new();
        assert!(!state.input(0, "a"));
        assert!(!state.input(0, "12"));
        assert!(!state.input(0, "٣")); // non-ASCII digit
        assert_eq!(state.slots()[0], None);
    }

    #[test]
    fn test_digit_input_auto_advances_focus() {
        let mut state = OtpState::new();
        assert!(state.input(0, "4"));
        assert_eq!(state.focused_slot(), 1);
        assert!(state.input(5, "9"));
        assert_eq!(state.focused_slot(), 5);
    }

    #[test]
    fn test_five_digits_then_letter_is_incomplete() {
        let mut state = OtpState::new();
        for c in ['1', '2', '3', '4', '5'] {
            assert!(state.type_char(c));
        }
        assert!(!state.type_char('a'));
        assert_eq!(state.code(), "12345");
        assert_eq!(state.begin_submit(), Err(OtpError::IncompleteCode));
        assert!(state.has_error());
        assert_eq!(state.phase(), VerifyPhase::Entering);
    }

    #[test]
    fn test_submit_after_expiry_fails() {
        let mut state = OtpState::new();
        fill(&mut state, "123456");
        expire(&mut state);
        assert_eq!(state.begin_submit(), Err(OtpError::Expired));
    }

    #[test]
    fn test_submit_success_and_failure() {
        let mut state = OtpState::new();
        fill(&mut state, "123456");
        assert_eq!(state.begin_submit(), Ok("123456".to_string()));
        assert_eq!(state.phase(), VerifyPhase::Submitting);
        assert_eq!(state.begin_submit(), Err(OtpError::Busy));
        assert!(!state.input(0, "1"));

        state.finish_submit(false);
        assert_eq!(state.phase(), VerifyPhase::Entering);
        assert!(state.has_error());

        assert!(state.begin_submit().is_ok());
        state.finish_submit(true);
        assert_eq!(state.phase(), VerifyPhase::Verified);
        assert!(!state.is_counting_down());
    }

    #[test]
    fn test_resend_is_noop_while_counting_down() {
        let mut state = OtpState::new();
        state.tick();
        assert_eq!(state.begin_resend(), Err(OtpError::NotAvailable));
        assert_eq!(state.remaining_secs(), 59);
        assert_eq!(state.resend_attempts(), 0);
    }

    #[test]
    fn test_resend_resets_slots_and_timer() {
        let mut state = OtpState::new();
        fill(&mut state, "123");
        expire(&mut state);

        assert!(state.begin_resend().is_ok());
        assert_eq!(state.resend_phase(), ResendPhase::Resending);
        state.finish_resend(true);

        assert_eq!(state.resend_attempts(), 1);
        assert_eq!(state.remaining_secs(), TIMER_DURATION_SECS);
        assert_eq!(state.filled_count(), 0);
        assert_eq!(state.focused_slot(), 0);
        assert!(!state.can_resend());
    }

    #[test]
    fn test_failed_resend_keeps_attempts() {
        let mut state = OtpState::new();
        expire(&mut state);
        state.begin_resend().unwrap();
        state.finish_resend(false);
        assert_eq!(state.resend_attempts(), 0);
        assert!(state.can_resend());
    }

    #[test]
    fn test_resend_limit_reached_without_mutation() {
        let mut state = OtpState::new();
        for _ in 0..MAX_RESEND_ATTEMPTS {
            expire(&mut state);
            state.begin_resend().unwrap();
            state.finish_resend(true);
        }
        expire(&mut state);
        fill(&mut state, "98");
        let before = state.clone();

        assert_eq!(state.begin_resend(), Err(OtpError::LimitReached));
        assert_eq!(state.resend_attempts(), before.resend_attempts());
        assert_eq!(state.remaining_secs(), before.remaining_secs());
        assert_eq!(state.slots(), before.slots());
        assert_eq!(state.remaining_attempts(), 0);
    }

    #[test]
    fn test_paste_requires_six_digits() {
        let mut state = OtpState::new();
        assert!(!state.paste("12 34"));
        assert!(state.paste("code: 123-456"));
        assert_eq!(state.code(), "123456");
        assert!(!state.paste("1234567"));
    }

    #[test]
    fn test_backspace_steps_back_over_empty_slot() {
        let mut state = OtpState::new();
        state.type_char('1');
        state.type_char('2');
        assert_eq!(state.focused_slot(), 2);
        state.backspace();
        assert_eq!(state.focused_slot(), 1);
        assert_eq!(state.code(), "1");
        state.backspace();
        assert_eq!(state.code(), "");
    }
}
