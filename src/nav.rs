use std::fmt;
use std::rc::Rc;

use crate::config::NavConfig;
use crate::surface::{tolerate, Surface};

const OPEN_ICON: &str = "☰";
const CLOSE_ICON: &str = "✕";

/// Burger menu shown on narrow screens.
pub struct MobileMenu {
    open: bool,
    config: NavConfig,
    surface: Rc<dyn Surface>,
}

impl MobileMenu {
    pub fn new(config: &NavConfig, surface: Rc<dyn Surface>) -> Self {
        Self {
            open: false,
            config: config.clone(),
            surface,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        if !self.surface.contains(&self.config.menu_id) {
            return;
        }
        self.open = !self.open;
        tolerate(self.surface.toggle_marker(
            &self.config.menu_id,
            &self.config.hidden_marker,
            !self.open,
        ));
        let icon = if self.open { CLOSE_ICON } else { OPEN_ICON };
        tolerate(self.surface.set_text(&self.config.menu_button_id, icon));
    }

    pub fn close(&mut self) {
        if self.open {
            self.toggle();
        }
    }
}

impl fmt::Debug for MobileMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MobileMenu").field("open", &self.open).finish()
    }
}

/// Smooth-scrolls to a section. Unknown sections are ignored.
pub fn scroll_to(surface: &dyn Surface, section_id: &str) {
    tolerate(surface.scroll_into_view(section_id));
}
