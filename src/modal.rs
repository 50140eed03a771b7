use std::fmt;
use std::rc::Rc;

use crate::config::ModalConfig;
use crate::surface::{tolerate, Surface, BODY};
use crate::timer::{Scheduler, TimerHandle};

/// Tracks the single open modal and the page scroll lock that comes with it.
pub struct ModalManager {
    open: Option<String>,
    config: ModalConfig,
    surface: Rc<dyn Surface>,
    scheduler: Rc<dyn Scheduler>,
    focus_timer: TimerHandle,
}

impl ModalManager {
    pub fn new(config: &ModalConfig, surface: Rc<dyn Surface>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            open: None,
            config: config.clone(),
            surface,
            scheduler,
            focus_timer: TimerHandle::inert(),
        }
    }

    pub fn open_modal(&self) -> Option<&str> {
        self.open.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Shows `modal`, locks page scroll and focuses its first field shortly
    /// after. A modal without a container on the page is ignored.
    pub fn open(&mut self, modal: &str) {
        let container = self.config.container_id(modal);
        if !self.surface.contains(&container) {
            log::debug!("no container for modal {}", modal);
            return;
        }
        if let Some(current) = self.open.take() {
            if current != modal {
                self.hide(&current);
            }
        }

        tolerate(
            self.surface
                .remove_marker(&container, &self.config.hidden_marker),
        );
        self.lock_scroll(true);
        self.open = Some(modal.to_string());
        log::debug!("modal {} opened", modal);

        let surface = self.surface.clone();
        self.focus_timer = self.scheduler.once(
            self.config.focus_delay_ms,
            Box::new(move || tolerate(surface.focus_first_field(&container))),
        );
    }

    /// Hides `modal`. Scroll unlocks only when it was the open one.
    pub fn close(&mut self, modal: &str) {
        if !self.surface.contains(&self.config.container_id(modal)) {
            return;
        }
        self.hide(modal);
        if self.open.as_deref() == Some(modal) {
            self.open = None;
            self.focus_timer.cancel();
            self.lock_scroll(false);
            log::debug!("modal {} closed", modal);
        }
    }

    /// Hides every known modal and unlocks scroll.
    pub fn close_all(&mut self) {
        for modal in &self.config.modals {
            self.hide(modal);
        }
        if let Some(modal) = &self.open {
            if !self.config.modals.contains(modal) {
                self.hide(modal);
            }
        }
        self.open = None;
        self.focus_timer.cancel();
        self.lock_scroll(false);
    }

    pub fn on_escape(&mut self) {
        if self.is_open() {
            self.close_all();
        }
    }

    /// Handles a click that landed directly on an overlay (not its content).
    pub fn on_overlay_click(&mut self, overlay_id: &str) {
        if let Some(modal) = self.modal_for_overlay(overlay_id) {
            let modal = modal.to_string();
            self.close(&modal);
        }
    }

    /// `signup-modal` -> `signup`.
    pub fn modal_for_overlay<'a>(&self, overlay_id: &'a str) -> Option<&'a str> {
        overlay_id
            .strip_suffix(self.config.id_suffix.as_str())
            .filter(|modal| !modal.is_empty())
    }

    /// Drops any pending field focus.
    pub fn cancel_pending(&mut self) {
        self.focus_timer.cancel();
    }

    fn hide(&self, modal: &str) {
        tolerate(self.surface.add_marker(
            &self.config.container_id(modal),
            &self.config.hidden_marker,
        ));
    }

    fn lock_scroll(&self, locked: bool) {
        let value = if locked { "hidden" } else { "" };
        tolerate(self.surface.set_style(BODY, "overflow", value));
    }
}

impl fmt::Debug for ModalManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalManager")
            .field("open", &self.open)
            .field("focus_timer", &self.focus_timer)
            .finish()
    }
}
