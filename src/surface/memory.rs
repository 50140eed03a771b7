use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use super::Surface;
use crate::error::{LandingError, Result};

/// Everything rendered into one in-memory target.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TargetState {
    pub text: Option<String>,
    pub styles: BTreeMap<String, String>,
    pub markers: BTreeSet<String>,
    pub focus_requests: usize,
    pub scroll_requests: usize,
}

/// Headless [`Surface`]: a map of target id to [`TargetState`].
///
/// Only registered ids resolve; anything else behaves like a missing DOM
/// element.
#[derive(Debug, Default)]
pub struct MemorySurface {
    targets: RefCell<BTreeMap<String, TargetState>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_targets<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let surface = Self::new();
        for id in ids {
            surface.insert(id);
        }
        surface
    }

    pub fn insert(&self, id: impl Into<String>) {
        self.targets.borrow_mut().entry(id.into()).or_default();
    }

    pub fn insert_with_marker(&self, id: impl Into<String>, marker: &str) {
        self.targets
            .borrow_mut()
            .entry(id.into())
            .or_default()
            .markers
            .insert(marker.to_string());
    }

    pub fn remove(&self, id: &str) {
        self.targets.borrow_mut().remove(id);
    }

    pub fn target(&self, id: &str) -> Option<TargetState> {
        self.targets.borrow().get(id).cloned()
    }

    pub fn text(&self, id: &str) -> Option<String> {
        self.targets.borrow().get(id).and_then(|t| t.text.clone())
    }

    pub fn style(&self, id: &str, property: &str) -> Option<String> {
        self.targets
            .borrow()
            .get(id)
            .and_then(|t| t.styles.get(property).cloned())
    }

    pub fn has_marker(&self, id: &str, marker: &str) -> bool {
        self.targets
            .borrow()
            .get(id)
            .map_or(false, |t| t.markers.contains(marker))
    }

    /// Ids of every target currently carrying `marker`.
    pub fn marked(&self, marker: &str) -> Vec<String> {
        self.targets
            .borrow()
            .iter()
            .filter(|(_, t)| t.markers.contains(marker))
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn update(&self, id: &str, f: impl FnOnce(&mut TargetState)) -> Result<()> {
        let mut targets = self.targets.borrow_mut();
        let target = targets.get_mut(id).ok_or_else(|| LandingError::missing(id))?;
        f(target);
        Ok(())
    }
}

impl Surface for MemorySurface {
    fn contains(&self, id: &str) -> bool {
        self.targets.borrow().contains_key(id)
    }

    fn set_text(&self, id: &str, text: &str) -> Result<()> {
        self.update(id, |t| t.text = Some(text.to_string()))
    }

    fn set_style(&self, id: &str, property: &str, value: &str) -> Result<()> {
        self.update(id, |t| {
            if value.is_empty() {
                t.styles.remove(property);
            } else {
                t.styles.insert(property.to_string(), value.to_string());
            }
        })
    }

    fn add_marker(&self, id: &str, marker: &str) -> Result<()> {
        self.update(id, |t| {
            t.markers.insert(marker.to_string());
        })
    }

    fn remove_marker(&self, id: &str, marker: &str) -> Result<()> {
        self.update(id, |t| {
            t.markers.remove(marker);
        })
    }

    fn focus_first_field(&self, id: &str) -> Result<()> {
        self.update(id, |t| t.focus_requests += 1)
    }

    fn scroll_into_view(&self, id: &str) -> Result<()> {
        self.update(id, |t| t.scroll_requests += 1)
    }
}
