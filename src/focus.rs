use std::fmt;
use std::rc::Rc;

use crate::config::FocusConfig;
use crate::surface::{tolerate, Surface};
use crate::tracking::{self, TrackingSink};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusState {
    pub focused: Option<String>,
    pub previous: Option<String>,
}

/// Keeps exactly one page section marked as focused.
///
/// Crossings are applied strictly in arrival order; the last section to cross
/// the visibility threshold wins. Every change of focus is reported to the
/// tracking sink as a `section_view`. A repeat crossing of the section that
/// already holds focus is ignored and emits nothing. Ids outside the
/// configured sections are ignored too, so the focused section always
/// carries the marker.
pub struct FocusTracker {
    state: FocusState,
    sections: Vec<String>,
    marker: String,
    surface: Rc<dyn Surface>,
    sink: Rc<dyn TrackingSink>,
}

impl FocusTracker {
    pub fn new(config: &FocusConfig, surface: Rc<dyn Surface>, sink: Rc<dyn TrackingSink>) -> Self {
        Self {
            state: FocusState::default(),
            sections: config.sections.clone(),
            marker: config.focused_marker.clone(),
            surface,
            sink,
        }
    }

    pub fn state(&self) -> &FocusState {
        &self.state
    }

    pub fn focused(&self) -> Option<&str> {
        self.state.focused.as_deref()
    }

    /// Entry point for the visibility observer.
    pub fn on_section_visible(&mut self, section_id: &str) {
        if self.focused() == Some(section_id) {
            return;
        }
        if !self.sections.iter().any(|s| s == section_id) {
            log::debug!("ignoring crossing for unobserved section {}", section_id);
            return;
        }

        let previous = self.state.focused.replace(section_id.to_string());
        log::debug!("section focus {:?} -> {}", previous, section_id);
        self.state.previous = previous;

        for section in &self.sections {
            tolerate(
                self.surface
                    .toggle_marker(section, &self.marker, section == section_id),
            );
        }

        self.sink
            .emit(tracking::SECTION_VIEW, tracking::section_view(section_id));
    }
}

impl fmt::Debug for FocusTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusTracker")
            .field("state", &self.state)
            .field("sections", &self.sections)
            .finish()
    }
}
