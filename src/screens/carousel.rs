// ABOUTME: Entry screen: auto-advancing slides with manual swipe and the two entry actions

use std::time::Duration;
use tracing::debug;

use super::{FormInput, ScreenCommand, ScreenController};
use crate::app::router::{Route, RouteParams};
use crate::app::timer::TickerSpec;

pub const SLIDES: &[&str] = &[
    "Swift and Reliable Delivery",
    "Precision in Every Package",
    "Built for Critical Moments",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselAction {
    GetStarted,
    Login,
}

#[derive(Debug, Clone)]
pub struct CarouselScreen {
    current: usize,
    period: Duration,
    /// Bumped on manual swipes so the auto-advance period starts over
    epoch: u64,
    focused: CarouselAction,
}

impl CarouselScreen {
    pub fn new(period: Duration) -> Self {
        Self {
            current: 0,
            period,
            epoch: 0,
            focused: CarouselAction::GetStarted,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn title(&self) -> &'static str {
        SLIDES[self.current]
    }

    pub fn slide_count(&self) -> usize {
        SLIDES.len()
    }

    pub fn focused(&self) -> CarouselAction {
        self.focused
    }

    pub fn advance(&mut self) {
        self.current = (self.current + 1) % SLIDES.len();
    }

    fn swipe(&mut self, forward: bool) {
        self.current = if forward {
            (self.current + 1) % SLIDES.len()
        } else {
            (self.current + SLIDES.len() - 1) % SLIDES.len()
        };
        self.epoch += 1;
        debug!("Carousel swiped to slide {}", self.current);
    }

    fn toggle_focus(&mut self) {
        self.focused = match self.focused {
            CarouselAction::GetStarted => CarouselAction::Login,
            CarouselAction::Login => CarouselAction::GetStarted,
        };
    }
}

impl ScreenController for CarouselScreen {
    fn route(&self) -> Route {
        Route::Carousel
    }

    fn handle_input(&mut self, input: FormInput) -> ScreenCommand {
        match input {
            FormInput::Left => self.swipe(false),
            FormInput::Right => self.swipe(true),
            FormInput::FocusNext | FormInput::FocusPrev => self.toggle_focus(),
            FormInput::Activate => {
                let route = match self.focused {
                    CarouselAction::GetStarted => Route::SignUp,
                    CarouselAction::Login => Route::Login,
                };
                return ScreenCommand::Navigate(route, RouteParams::new());
            }
            _ => {}
        }
        ScreenCommand::None
    }

    fn on_tick(&mut self) -> ScreenCommand {
        self.advance();
        ScreenCommand::None
    }

    fn ticker(&self) -> Option<TickerSpec> {
        Some(TickerSpec::new(self.period, self.epoch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> CarouselScreen {
        CarouselScreen::new(Duration::from_millis(3000))
    }

    #[test]
    fn test_auto_advance_wraps_around() {
        let mut carousel = screen();
        for expected in [1, 2, 0, 1] {
            carousel.on_tick();
            assert_eq!(carousel.current(), expected);
        }
    }

    #[test]
    fn test_swipe_moves_and_restarts_period() {
        let mut carousel = screen();
        let before = carousel.ticker().unwrap();
        carousel.handle_input(FormInput::Left);
        assert_eq!(carousel.current(), 2);
        assert_eq!(carousel.title(), "Built for Critical Moments");

        let after = carousel.ticker().unwrap();
        assert_eq!(after.period, before.period);
        assert_ne!(after.epoch, before.epoch);
    }

    #[test]
    fn test_entry_actions() {
        let mut carousel = screen();
        assert_eq!(
            carousel.handle_input(FormInput::Activate),
            ScreenCommand::Navigate(Route::SignUp, RouteParams::new())
        );
        carousel.handle_input(FormInput::FocusNext);
        assert_eq!(carousel.focused(), CarouselAction::Login);
        assert_eq!(
            carousel.handle_input(FormInput::Activate),
            ScreenCommand::Navigate(Route::Login, RouteParams::new())
        );
    }
}
