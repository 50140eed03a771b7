//! Client-side behavior for the CourseMate landing page: offer countdown,
//! auto-rotating feature carousel, scroll-driven section focus, modals and
//! click tracking.
//!
//! Controllers only talk to the page through three seams, [`Surface`],
//! [`Scheduler`] and [`TrackingSink`], so the same [`LandingPage`] runs in
//! the browser ([`browser::BrowserSession`]) or headless against
//! [`MemorySurface`], [`ManualScheduler`] and [`RecordingSink`].

pub mod browser;
pub mod carousel;
pub mod config;
pub mod countdown;
pub mod error;
pub mod focus;
pub mod modal;
pub mod nav;
pub mod page;
pub mod surface;
pub mod timer;
pub mod tracking;

pub use carousel::{Carousel, CarouselState, Direction};
pub use config::LandingConfig;
pub use countdown::{format_duration, Countdown, CountdownState};
pub use error::{LandingError, Result};
pub use focus::{FocusState, FocusTracker};
pub use modal::ModalManager;
pub use page::LandingPage;
pub use surface::{DomSurface, MemorySurface, Surface};
pub use timer::{BrowserScheduler, ManualScheduler, Scheduler, Timer, TimerHandle};
pub use tracking::{ConsoleSink, RecordingSink, TrackingSink};
