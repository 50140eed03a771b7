use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::config::CarouselConfig;
use crate::error::{LandingError, Result};
use crate::surface::{tolerate, Surface};
use crate::timer::{Scheduler, Timer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn offset(self) -> isize {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Index arithmetic for a fixed number of feature cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    current_index: usize,
    item_count: usize,
}

impl CarouselState {
    /// `item_count` is clamped to at least one card.
    pub fn new(item_count: usize) -> Self {
        Self {
            current_index: 0,
            item_count: item_count.max(1),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Moves one card in `direction`, wrapping at both ends.
    pub fn step(&mut self, direction: Direction) {
        self.current_index = match direction {
            Direction::Next => (self.current_index + 1) % self.item_count,
            Direction::Previous => (self.current_index + self.item_count - 1) % self.item_count,
        };
    }

    pub fn set_index(&mut self, index: usize) -> Result<()> {
        if index >= self.item_count {
            return Err(LandingError::InvalidIndex {
                index,
                count: self.item_count,
            });
        }
        self.current_index = index;
        Ok(())
    }

    /// Horizontal translation of the card strip, in pixels.
    pub fn offset_px(&self, card_width_px: u32, gap_px: u32) -> u64 {
        let pitch = u64::from(card_width_px) + u64::from(gap_px);
        (self.current_index as u64).saturating_mul(pitch)
    }
}

/// Feature carousel with auto-advance.
///
/// Any manual navigation restarts the auto-advance period, so the next
/// automatic step always comes a full period after the last user action.
pub struct Carousel {
    this: Weak<RefCell<Carousel>>,
    state: CarouselState,
    config: CarouselConfig,
    surface: Rc<dyn Surface>,
    auto_advance: Timer,
}

impl Carousel {
    pub fn new(
        config: &CarouselConfig,
        surface: Rc<dyn Surface>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Rc<RefCell<Self>> {
        Rc::new_cyclic(|this| {
            RefCell::new(Self {
                this: this.clone(),
                state: CarouselState::new(config.item_count),
                config: config.clone(),
                surface,
                auto_advance: Timer::new(scheduler, config.auto_advance_ms),
            })
        })
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index()
    }

    pub fn offset_px(&self) -> u64 {
        self.state
            .offset_px(self.config.card_width_px, self.config.gap_px)
    }

    pub fn is_auto_advancing(&self) -> bool {
        self.auto_advance.is_running()
    }

    /// Renders the initial card and begins auto-advance.
    pub fn start(&mut self) {
        self.render();
        self.restart_auto_advance();
    }

    pub fn stop(&mut self) {
        self.auto_advance.cancel();
    }

    /// User navigation by one card.
    pub fn step(&mut self, direction: Direction) {
        self.state.step(direction);
        self.render();
        self.restart_auto_advance();
    }

    /// User navigation to a specific card. Out-of-range indexes leave the
    /// carousel and its timer untouched.
    pub fn set_index(&mut self, index: usize) -> Result<()> {
        self.state.set_index(index)?;
        self.render();
        self.restart_auto_advance();
        Ok(())
    }

    pub fn render(&self) {
        let index = self.state.current_index();
        log::debug!("feature carousel at {} (offset {}px)", index, self.offset_px());

        tolerate(self.surface.set_style(
            &self.config.wrapper_id,
            "transform",
            &format!("translateX(-{}px)", self.offset_px()),
        ));

        let marker = &self.config.active_marker;
        for i in 0..self.state.item_count() {
            let active = i == index;
            tolerate(
                self.surface
                    .toggle_marker(&self.config.card_id(i), marker, active),
            );

            let dot = self.config.dot_id(i);
            tolerate(self.surface.toggle_marker(&dot, marker, active));
            let color = if active {
                &self.config.active_dot_color
            } else {
                &self.config.inactive_dot_color
            };
            tolerate(self.surface.set_style(&dot, "background-color", color));
        }
    }

    fn advance(&mut self) {
        self.state.step(Direction::Next);
        self.render();
    }

    fn restart_auto_advance(&mut self) {
        let this = self.this.clone();
        self.auto_advance.restart(Box::new(move || {
            let Some(carousel) = this.upgrade() else {
                return;
            };
            match carousel.try_borrow_mut() {
                Ok(mut carousel) => carousel.advance(),
                Err(_) => log::warn!("carousel busy, auto-advance skipped"),
            };
        }));
    }
}

impl fmt::Debug for Carousel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("state", &self.state)
            .field("auto_advance", &self.auto_advance)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;
    use crate::timer::ManualScheduler;

    fn page_surface(config: &CarouselConfig) -> Rc<MemorySurface> {
        let surface = MemorySurface::with_targets([config.wrapper_id.clone()]);
        for i in 0..config.item_count {
            surface.insert(config.card_id(i));
            surface.insert(config.dot_id(i));
        }
        Rc::new(surface)
    }

    fn carousel() -> (Rc<RefCell<Carousel>>, Rc<MemorySurface>, ManualScheduler) {
        let config = CarouselConfig::default();
        let surface = page_surface(&config);
        let clock = ManualScheduler::new();
        let carousel = Carousel::new(&config, surface.clone(), Rc::new(clock.clone()));
        carousel.borrow_mut().start();
        (carousel, surface, clock)
    }

    #[test]
    fn steps_wrap_in_both_directions() {
        let mut state = CarouselState::new(6);
        state.step(Direction::Previous);
        assert_eq!(state.current_index(), 5);
        state.step(Direction::Next);
        assert_eq!(state.current_index(), 0);
        for _ in 0..6 {
            state.step(Direction::Next);
        }
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn set_index_rejects_out_of_range() {
        let mut state = CarouselState::new(6);
        state.set_index(3).unwrap();
        let err = state.set_index(6).unwrap_err();
        assert!(matches!(err, LandingError::InvalidIndex { index: 6, count: 6 }));
        assert_eq!(state.current_index(), 3);
    }

    #[test]
    fn offset_does_not_overflow_on_wide_cards() {
        let mut state = CarouselState::new(6);
        state.set_index(5).unwrap();
        assert_eq!(state.offset_px(u32::MAX, 32), 5 * (u64::from(u32::MAX) + 32));
    }

    #[test]
    fn render_translates_strip_and_marks_one_card() {
        let (carousel, surface, _clock) = carousel();
        carousel.borrow_mut().set_index(2).unwrap();

        assert_eq!(carousel.borrow().offset_px(), 624);
        assert_eq!(
            surface.style("features-wrapper", "transform").as_deref(),
            Some("translateX(-624px)")
        );
        assert_eq!(surface.marked("active"), vec!["feature-card-2", "feature-dot-2"]);
        assert_eq!(
            surface.style("feature-dot-2", "background-color").as_deref(),
            Some("white")
        );
        assert_eq!(
            surface.style("feature-dot-0", "background-color").as_deref(),
            Some("#6b7280")
        );
    }

    #[test]
    fn auto_advance_steps_every_period() {
        let (carousel, surface, clock) = carousel();
        clock.advance(3_000);
        assert_eq!(carousel.borrow().current_index(), 1);
        clock.advance(6_000);
        assert_eq!(carousel.borrow().current_index(), 3);
        assert!(surface.has_marker("feature-card-3", "active"));
        assert!(!surface.has_marker("feature-card-2", "active"));
    }

    #[test]
    fn manual_step_restarts_the_period() {
        let (carousel, _surface, clock) = carousel();
        clock.advance(2_000);
        carousel.borrow_mut().step(Direction::Next);
        assert_eq!(carousel.borrow().current_index(), 1);
        assert_eq!(clock.pending(), 1);
        assert_eq!(clock.next_due_ms(), Some(5_000));

        clock.advance(2_999);
        assert_eq!(carousel.borrow().current_index(), 1);
        clock.advance(1);
        assert_eq!(carousel.borrow().current_index(), 2);
    }

    #[test]
    fn rejected_set_index_keeps_the_timer() {
        let (carousel, _surface, clock) = carousel();
        clock.advance(2_000);
        assert!(carousel.borrow_mut().set_index(9).is_err());
        assert_eq!(clock.next_due_ms(), Some(3_000));
    }

    #[test]
    fn stop_cancels_auto_advance() {
        let (carousel, _surface, clock) = carousel();
        carousel.borrow_mut().stop();
        assert!(!carousel.borrow().is_auto_advancing());
        clock.advance(10_000);
        assert_eq!(carousel.borrow().current_index(), 0);
    }

    #[test]
    fn missing_cards_do_not_stop_navigation() {
        let config = CarouselConfig::default();
        let surface = Rc::new(MemorySurface::new());
        let clock = ManualScheduler::new();
        let carousel = Carousel::new(&config, surface, Rc::new(clock.clone()));
        carousel.borrow_mut().start();
        carousel.borrow_mut().step(Direction::Previous);
        assert_eq!(carousel.borrow().current_index(), 5);
    }
}
