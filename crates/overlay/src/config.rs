use crate::error::OverlayError;
use crate::layout::LayoutSignals;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Initial layout flags, before any persisted user preference is applied.
    #[serde(default)]
    pub layout: LayoutSignals,
    #[serde(default)]
    pub dropdown: DropdownSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DropdownSettings {
    /// Upper bound of simultaneously open menus in constrained layouts.
    pub max_open_menus: usize,
    /// Viewports at or below this width count as narrow.
    pub narrow_viewport_px: f64,
    /// CSS selector of the sidebar container.
    pub sidebar_selector: String,
    /// Class carried by every rendered menu panel.
    pub menu_panel_class: String,
}

impl Default for DropdownSettings {
    fn default() -> Self {
        Self {
            max_open_menus: 2,
            narrow_viewport_px: 768.0,
            sidebar_selector: "#main-sidebar".to_string(),
            menu_panel_class: "dropdown-menu".to_string(),
        }
    }
}

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r##"
[layout]
mode = "vertical"
sidebar_size = "large"
direction = "ltr"
sidebar_open = false

[dropdown]
max_open_menus = 2
narrow_viewport_px = 768.0
sidebar_selector = "#main-sidebar"
menu_panel_class = "dropdown-menu"
"##;

impl OverlayConfig {
    pub fn from_toml(contents: &str) -> Result<Self, OverlayError> {
        let config: OverlayConfig = toml::from_str(contents)?;
        if config.dropdown.max_open_menus == 0 {
            log::warn!("max_open_menus = 0 would close every menu on open; using 1");
            return Ok(OverlayConfig {
                dropdown: DropdownSettings {
                    max_open_menus: 1,
                    ..config.dropdown
                },
                ..config
            });
        }
        Ok(config)
    }

    /// Load configuration, preferring `overrides` and falling back to the
    /// embedded default when none is given.
    pub fn load(overrides: Option<&str>) -> anyhow::Result<Self> {
        match overrides {
            Some(contents) => {
                log::info!("Loading overlay config from override");
                Ok(Self::from_toml(contents)?)
            }
            None => {
                log::info!("Using default embedded overlay configuration");
                Ok(Self::from_toml(DEFAULT_CONFIG)?)
            }
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            layout: LayoutSignals::default(),
            dropdown: DropdownSettings::default(),
        }
    }
}
