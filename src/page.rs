//! The whole landing page: every controller wired to one surface, one
//! scheduler and one tracking sink.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::carousel::{Carousel, Direction};
use crate::config::LandingConfig;
use crate::countdown::{Countdown, CountdownState};
use crate::error::Result;
use crate::focus::FocusTracker;
use crate::modal::ModalManager;
use crate::nav::{self, MobileMenu};
use crate::surface::Surface;
use crate::timer::Scheduler;
use crate::tracking::{self, TrackingSink};

pub const ESCAPE_KEY: &str = "Escape";

pub struct LandingPage {
    config: LandingConfig,
    surface: Rc<dyn Surface>,
    sink: Rc<dyn TrackingSink>,
    countdown: Rc<RefCell<Countdown>>,
    carousel: Rc<RefCell<Carousel>>,
    focus: RefCell<FocusTracker>,
    modals: RefCell<ModalManager>,
    menu: RefCell<MobileMenu>,
}

impl LandingPage {
    pub fn new(
        config: LandingConfig,
        surface: Rc<dyn Surface>,
        scheduler: Rc<dyn Scheduler>,
        sink: Rc<dyn TrackingSink>,
    ) -> Self {
        let countdown = Countdown::new(&config.countdown, surface.clone(), scheduler.clone());
        let carousel = Carousel::new(&config.carousel, surface.clone(), scheduler.clone());
        let focus = FocusTracker::new(&config.focus, surface.clone(), sink.clone());
        let modals = ModalManager::new(&config.modal, surface.clone(), scheduler);
        let menu = MobileMenu::new(&config.nav, surface.clone());

        Self {
            config,
            surface,
            sink,
            countdown,
            carousel,
            focus: RefCell::new(focus),
            modals: RefCell::new(modals),
            menu: RefCell::new(menu),
        }
    }

    pub fn config(&self) -> &LandingConfig {
        &self.config
    }

    pub fn start(&self) {
        self.countdown.borrow_mut().start();
        self.carousel.borrow_mut().start();
        log::info!("landing page started");
    }

    /// Cancels every timer the page owns. Safe to call more than once.
    pub fn teardown(&self) {
        self.countdown.borrow_mut().stop();
        self.carousel.borrow_mut().stop();
        self.modals.borrow_mut().cancel_pending();
        log::debug!("landing page timers cancelled");
    }

    pub fn is_running(&self) -> bool {
        self.countdown.borrow().is_running() || self.carousel.borrow().is_auto_advancing()
    }

    pub fn time_left(&self) -> CountdownState {
        self.countdown.borrow().state()
    }

    pub fn current_feature(&self) -> usize {
        self.carousel.borrow().current_index()
    }

    pub fn focused_section(&self) -> Option<String> {
        self.focus.borrow().focused().map(str::to_string)
    }

    pub fn open_modal(&self) -> Option<String> {
        self.modals.borrow().open_modal().map(str::to_string)
    }

    pub fn is_mobile_menu_open(&self) -> bool {
        self.menu.borrow().is_open()
    }

    pub fn change_feature(&self, direction: Direction) {
        self.carousel.borrow_mut().step(direction);
    }

    pub fn set_feature(&self, index: usize) -> Result<()> {
        self.carousel.borrow_mut().set_index(index)
    }

    pub fn section_visible(&self, section_id: &str) {
        self.focus.borrow_mut().on_section_visible(section_id);
    }

    pub fn show_modal(&self, modal: &str) {
        self.modals.borrow_mut().open(modal);
    }

    pub fn hide_modal(&self, modal: &str) {
        self.modals.borrow_mut().close(modal);
    }

    pub fn hide_all_modals(&self) {
        self.modals.borrow_mut().close_all();
    }

    pub fn key_pressed(&self, key: &str) {
        if key == ESCAPE_KEY {
            self.modals.borrow_mut().on_escape();
        }
    }

    pub fn overlay_clicked(&self, overlay_id: &str) {
        self.modals.borrow_mut().on_overlay_click(overlay_id);
    }

    pub fn scroll_to_section(&self, section_id: &str) {
        nav::scroll_to(self.surface.as_ref(), section_id);
        self.menu.borrow_mut().close();
    }

    pub fn toggle_mobile_menu(&self) {
        self.menu.borrow_mut().toggle();
    }

    /// Simulated sign-in. Returns the message shown to the visitor.
    pub fn submit_login(&self, email: &str) -> String {
        self.sink
            .emit(tracking::LOGIN_ATTEMPT, tracking::login_attempt(email));
        self.hide_modal("login");
        format!("Welcome back! Login attempt for: {}", email)
    }

    /// Simulated account creation. Returns the message shown to the visitor.
    pub fn submit_signup(&self, name: &str, email: &str) -> String {
        self.sink
            .emit(tracking::SIGNUP_ATTEMPT, tracking::signup_attempt(name, email));
        self.hide_modal("signup");
        format!(
            "🎉 Welcome to CourseMate, {}!\n\nAccount created successfully for: {}\n\nYour free trial has started!",
            name, email
        )
    }

    pub fn claim_offer(&self) {
        self.show_modal("signup");
        self.sink.emit(tracking::OFFER_CLAIMED, tracking::bare());
    }

    pub fn watch_demo(&self) {
        self.show_modal("demo");
        self.sink.emit(tracking::DEMO_REQUESTED, tracking::bare());
    }

    pub fn track_button_click(&self, button_text: &str, section: Option<&str>) {
        self.sink.emit(
            tracking::BUTTON_CLICK,
            tracking::button_click(button_text, section),
        );
    }

    /// Best-effort diagnostics for errors nothing else caught.
    pub fn report_error(&self, message: Option<&str>, filename: &str, lineno: u32) {
        self.sink.emit(
            tracking::JAVASCRIPT_ERROR,
            tracking::javascript_error(message, filename, lineno),
        );
    }
}

impl fmt::Debug for LandingPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LandingPage")
            .field("countdown", &self.countdown)
            .field("carousel", &self.carousel)
            .field("focus", &self.focus)
            .field("modals", &self.modals)
            .field("menu", &self.menu)
            .finish()
    }
}
