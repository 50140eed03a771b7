use log::Level;
use serde::Deserialize;

use crate::countdown::CountdownState;
use crate::error::{LandingError, Result};

#[cfg(debug_assertions)]
pub fn default_log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn default_log_level() -> Level {
    Level::Info
}

/// Id of the optional `<script type="application/json">` block carrying
/// config overrides.
pub const CONFIG_ELEMENT_ID: &str = "landing-config";

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    pub countdown: CountdownConfig,
    pub carousel: CarouselConfig,
    pub focus: FocusConfig,
    pub modal: ModalConfig,
    pub nav: NavConfig,
}

impl LandingConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.countdown.start.check()?;
        self.countdown.reset.check()?;
        if self.carousel.item_count == 0 {
            return Err(LandingError::ConfigValue(
                "carousel.item_count must be at least 1".to_string(),
            ));
        }
        if self
            .carousel
            .card_width_px
            .checked_add(self.carousel.gap_px)
            .is_none()
        {
            return Err(LandingError::ConfigValue(format!(
                "carousel.card_width_px {} plus gap_px {} overflows",
                self.carousel.card_width_px, self.carousel.gap_px
            )));
        }
        for (field, period) in [
            ("countdown.tick_ms", self.countdown.tick_ms),
            ("carousel.auto_advance_ms", self.carousel.auto_advance_ms),
        ] {
            if period == 0 {
                return Err(LandingError::ConfigValue(format!(
                    "{} must be at least 1",
                    field
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.focus.threshold) {
            return Err(LandingError::ConfigValue(format!(
                "focus.threshold {} is outside 0..=1",
                self.focus.threshold
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    pub display_id: String,
    pub start: CountdownState,
    pub reset: CountdownState,
    pub tick_ms: u32,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            display_id: "countdown-timer".to_string(),
            start: CountdownState::FULL,
            reset: CountdownState::FULL,
            tick_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub item_count: usize,
    pub card_width_px: u32,
    pub gap_px: u32,
    pub auto_advance_ms: u32,
    pub wrapper_id: String,
    pub card_id_prefix: String,
    pub dot_id_prefix: String,
    pub active_marker: String,
    pub active_dot_color: String,
    pub inactive_dot_color: String,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            item_count: 6,
            card_width_px: 280,
            gap_px: 32,
            auto_advance_ms: 3000,
            wrapper_id: "features-wrapper".to_string(),
            card_id_prefix: "feature-card-".to_string(),
            dot_id_prefix: "feature-dot-".to_string(),
            active_marker: "active".to_string(),
            active_dot_color: "white".to_string(),
            inactive_dot_color: "#6b7280".to_string(),
        }
    }
}

impl CarouselConfig {
    pub fn card_id(&self, index: usize) -> String {
        format!("{}{}", self.card_id_prefix, index)
    }

    pub fn dot_id(&self, index: usize) -> String {
        format!("{}{}", self.dot_id_prefix, index)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    pub sections: Vec<String>,
    pub focused_marker: String,
    pub root_margin: String,
    pub threshold: f64,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            sections: ["hero", "features", "pricing", "testimonials", "cta"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            focused_marker: "focused".to_string(),
            root_margin: "-20% 0px -20% 0px".to_string(),
            threshold: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    pub modals: Vec<String>,
    pub id_suffix: String,
    pub hidden_marker: String,
    pub focus_delay_ms: u32,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            modals: ["login", "signup", "demo"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            id_suffix: "-modal".to_string(),
            hidden_marker: "hidden".to_string(),
            focus_delay_ms: 100,
        }
    }
}

impl ModalConfig {
    pub fn container_id(&self, modal: &str) -> String {
        format!("{}{}", modal, self.id_suffix)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub menu_id: String,
    pub menu_button_id: String,
    pub hidden_marker: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            menu_id: "mobile-menu".to_string(),
            menu_button_id: "mobile-menu-button".to_string(),
            hidden_marker: "hidden".to_string(),
        }
    }
}
