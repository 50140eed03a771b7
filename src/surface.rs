//! Render targets addressed by stable string ids.

use crate::error::Result;

mod dom;
mod memory;

pub use dom::DomSurface;
pub use memory::MemorySurface;

/// Target id that resolves to the page body.
pub const BODY: &str = "body";

/// Render operations the controllers perform on the page.
///
/// Every operation reports `LandingError::MissingTarget` when the id does not
/// resolve. Controllers treat that as a skipped render, never as a failure.
pub trait Surface {
    fn contains(&self, id: &str) -> bool;

    fn set_text(&self, id: &str, text: &str) -> Result<()>;

    fn set_style(&self, id: &str, property: &str, value: &str) -> Result<()>;

    fn add_marker(&self, id: &str, marker: &str) -> Result<()>;

    fn remove_marker(&self, id: &str, marker: &str) -> Result<()>;

    /// Moves keyboard focus to the first input inside the target.
    fn focus_first_field(&self, id: &str) -> Result<()>;

    fn scroll_into_view(&self, id: &str) -> Result<()>;

    fn toggle_marker(&self, id: &str, marker: &str, on: bool) -> Result<()> {
        if on {
            self.add_marker(id, marker)
        } else {
            self.remove_marker(id, marker)
        }
    }
}

/// Swallows a render failure, logging it instead.
pub(crate) fn tolerate(result: Result<()>) {
    if let Err(err) = result {
        if err.is_missing_target() {
            log::debug!("skipping render: {}", err);
        } else {
            log::warn!("render failed: {}", err);
        }
    }
}
