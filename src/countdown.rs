use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::config::CountdownConfig;
use crate::error::{LandingError, Result};
use crate::surface::{tolerate, Surface};
use crate::timer::{Scheduler, Timer};

/// Time left on the offer, as shown in the hero banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountdownState {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl CountdownState {
    /// Both the starting value and the value restored after reaching zero.
    pub const FULL: Self = Self {
        hours: 23,
        minutes: 59,
        seconds: 59,
    };

    pub const ZERO: Self = Self {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    pub fn new(hours: u8, minutes: u8, seconds: u8) -> Result<Self> {
        let state = Self {
            hours,
            minutes,
            seconds,
        };
        state.check()?;
        Ok(state)
    }

    pub fn from_total_seconds(total: u32) -> Result<Self> {
        let max = Self::FULL.total_seconds();
        if total > max {
            return Err(LandingError::OutOfRange {
                field: "total_seconds",
                value: total,
                max,
            });
        }
        Ok(Self {
            hours: (total / 3600) as u8,
            minutes: (total % 3600 / 60) as u8,
            seconds: (total % 60) as u8,
        })
    }

    pub(crate) fn check(&self) -> Result<()> {
        let fields = [
            ("hours", self.hours, 23),
            ("minutes", self.minutes, 59),
            ("seconds", self.seconds, 59),
        ];
        for (field, value, max) in fields {
            if value > max {
                return Err(LandingError::OutOfRange {
                    field,
                    value: u32::from(value),
                    max: u32::from(max),
                });
            }
        }
        Ok(())
    }

    pub fn total_seconds(&self) -> u32 {
        u32::from(self.hours) * 3600 + u32::from(self.minutes) * 60 + u32::from(self.seconds)
    }

    /// One second later. Seconds borrow from minutes, minutes from hours;
    /// once everything is zero the next tick jumps to `reset`.
    pub fn ticked(self, reset: Self) -> Self {
        let Self {
            hours,
            minutes,
            seconds,
        } = self;
        if seconds > 0 {
            Self {
                seconds: seconds - 1,
                ..self
            }
        } else if minutes > 0 {
            Self {
                hours,
                minutes: minutes - 1,
                seconds: 59,
            }
        } else if hours > 0 {
            Self {
                hours: hours - 1,
                minutes: 59,
                seconds: 59,
            }
        } else {
            reset
        }
    }

    /// `HH:MM:SS`, zero padded.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Default for CountdownState {
    fn default() -> Self {
        Self::FULL
    }
}

impl fmt::Display for CountdownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Formats a raw second count as `HH:MM:SS`. Hours are not capped at 24.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = total_seconds % 3600 / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Ticking countdown bound to one display target.
pub struct Countdown {
    this: Weak<RefCell<Countdown>>,
    state: CountdownState,
    reset: CountdownState,
    display_id: String,
    surface: Rc<dyn Surface>,
    timer: Timer,
}

impl Countdown {
    pub fn new(
        config: &CountdownConfig,
        surface: Rc<dyn Surface>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Rc<RefCell<Self>> {
        Rc::new_cyclic(|this| {
            RefCell::new(Self {
                this: this.clone(),
                state: config.start,
                reset: config.reset,
                display_id: config.display_id.clone(),
                surface,
                timer: Timer::new(scheduler, config.tick_ms),
            })
        })
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn render(&self) -> String {
        self.state.render()
    }

    pub fn tick(&mut self) {
        self.state = self.state.ticked(self.reset);
        self.write_display();
    }

    /// Shows the current state, then ticks once per period.
    pub fn start(&mut self) {
        self.write_display();
        let this = self.this.clone();
        self.timer.restart(Box::new(move || {
            let Some(countdown) = this.upgrade() else {
                return;
            };
            match countdown.try_borrow_mut() {
                Ok(mut countdown) => countdown.tick(),
                Err(_) => log::warn!("countdown busy, tick skipped"),
            };
        }));
        log::debug!("countdown started at {}", self.state);
    }

    pub fn stop(&mut self) {
        self.timer.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    fn write_display(&self) {
        let text = self.render();
        tolerate(self.surface.set_text(&self.display_id, &text));
    }
}

impl fmt::Debug for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Countdown")
            .field("state", &self.state)
            .field("display_id", &self.display_id)
            .field("timer", &self.timer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;
    use crate::timer::ManualScheduler;

    fn countdown(surface: &Rc<MemorySurface>, clock: &ManualScheduler) -> Rc<RefCell<Countdown>> {
        Countdown::new(
            &CountdownConfig::default(),
            surface.clone(),
            Rc::new(clock.clone()),
        )
    }

    #[test]
    fn renders_zero_padded_fields() {
        assert_eq!(CountdownState::new(1, 2, 3).unwrap().render(), "01:02:03");
        assert_eq!(CountdownState::FULL.render(), "23:59:59");
        assert_eq!(CountdownState::ZERO.to_string(), "00:00:00");
    }

    #[test]
    fn borrows_across_fields() {
        let reset = CountdownState::FULL;
        let t = CountdownState::new(1, 0, 0).unwrap().ticked(reset);
        assert_eq!(t, CountdownState::new(0, 59, 59).unwrap());
        let t = CountdownState::new(0, 1, 0).unwrap().ticked(reset);
        assert_eq!(t, CountdownState::new(0, 0, 59).unwrap());
        assert_eq!(CountdownState::ZERO.ticked(reset), reset);
    }

    #[test]
    fn full_day_wraps_back_exactly_once() {
        let mut state = CountdownState::FULL;
        let mut returns = 0;
        for _ in 0..86_400 {
            state = state.ticked(CountdownState::FULL);
            state.check().unwrap();
            if state == CountdownState::FULL {
                returns += 1;
            }
        }
        assert_eq!(state, CountdownState::FULL);
        assert_eq!(returns, 1);
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert!(CountdownState::new(24, 0, 0).is_err());
        assert!(CountdownState::new(0, 60, 0).is_err());
        assert!(CountdownState::new(0, 0, 60).is_err());
        assert!(CountdownState::from_total_seconds(86_400).is_err());
        assert_eq!(
            CountdownState::from_total_seconds(3723).unwrap(),
            CountdownState::new(1, 2, 3).unwrap()
        );
    }

    #[test]
    fn format_duration_does_not_cap_hours() {
        assert_eq!(format_duration(3723), "01:02:03");
        assert_eq!(format_duration(100 * 3600), "100:00:00");
    }

    #[test]
    fn timer_ticks_write_the_display() {
        let surface = Rc::new(MemorySurface::with_targets(["countdown-timer"]));
        let clock = ManualScheduler::new();
        let countdown = countdown(&surface, &clock);
        countdown.borrow_mut().start();

        clock.advance(3_000);
        assert_eq!(countdown.borrow().state().render(), "23:59:56");
        assert_eq!(surface.text("countdown-timer").as_deref(), Some("23:59:56"));

        countdown.borrow_mut().stop();
        clock.advance(5_000);
        assert_eq!(countdown.borrow().render(), "23:59:56");
    }

    #[test]
    fn missing_display_is_not_an_error() {
        let surface = Rc::new(MemorySurface::new());
        let clock = ManualScheduler::new();
        let countdown = countdown(&surface, &clock);
        countdown.borrow_mut().start();
        clock.advance(2_000);
        assert_eq!(countdown.borrow().render(), "23:59:57");
    }

    #[test]
    fn start_shows_the_configured_start_at_once() {
        let surface = Rc::new(MemorySurface::with_targets(["countdown-timer"]));
        surface.set_text("countdown-timer", "23:59:59").unwrap();
        let clock = ManualScheduler::new();
        let config = CountdownConfig {
            start: CountdownState::new(0, 5, 0).unwrap(),
            ..CountdownConfig::default()
        };
        let countdown = Countdown::new(&config, surface.clone(), Rc::new(clock.clone()));
        countdown.borrow_mut().start();
        assert_eq!(surface.text("countdown-timer").as_deref(), Some("00:05:00"));

        clock.advance(1_000);
        assert_eq!(surface.text("countdown-timer").as_deref(), Some("00:04:59"));
    }
}
