use crate::overlay::geometry::{ButtonMetrics, Size};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Button column dimensions and the smallest surface that may carry the
/// overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSettings {
    #[serde(default = "default_button_width")]
    pub button_width: i32,
    #[serde(default = "default_button_height")]
    pub button_height: i32,
    #[serde(default = "default_spacing")]
    pub spacing: i32,
    #[serde(default = "default_top_margin")]
    pub top_margin: i32,
    /// The surface must be strictly wider than this to show the overlay.
    #[serde(default = "default_min_surface")]
    pub min_surface_width: i32,
    /// The surface must be strictly taller than this to show the overlay.
    #[serde(default = "default_min_surface")]
    pub min_surface_height: i32,
}

fn default_button_width() -> i32 {
    120
}

fn default_button_height() -> i32 {
    40
}

fn default_spacing() -> i32 {
    10
}

fn default_top_margin() -> i32 {
    10
}

fn default_min_surface() -> i32 {
    50
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            button_width: default_button_width(),
            button_height: default_button_height(),
            spacing: default_spacing(),
            top_margin: default_top_margin(),
            min_surface_width: default_min_surface(),
            min_surface_height: default_min_surface(),
        }
    }
}

impl LayoutSettings {
    pub fn metrics(&self) -> ButtonMetrics {
        ButtonMetrics {
            width: self.button_width,
            height: self.button_height,
            spacing: self.spacing,
            top_margin: self.top_margin,
        }
    }

    pub fn min_surface(&self) -> Size {
        Size::new(self.min_surface_width, self.min_surface_height)
    }
}

/// Deferral delays in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingSettings {
    /// Delay of the named setup timer started by `OverlayController::start`.
    #[serde(default = "default_setup_delay")]
    pub setup_delay_ms: u64,
    #[serde(default = "default_layout_delay")]
    pub first_layout_delay_ms: u64,
    /// Delay of the confirmatory recompute, counted from the first one.
    #[serde(default = "default_layout_delay")]
    pub confirm_layout_delay_ms: u64,
    #[serde(default = "default_short_delay")]
    pub activate_delay_ms: u64,
    #[serde(default = "default_short_delay")]
    pub deactivate_delay_ms: u64,
    #[serde(default = "default_settle_delay")]
    pub show_delay_ms: u64,
    #[serde(default = "default_short_delay")]
    pub hide_delay_ms: u64,
    /// Used for host resize and move.
    #[serde(default = "default_short_delay")]
    pub geometry_delay_ms: u64,
    #[serde(default = "default_settle_delay")]
    pub state_change_delay_ms: u64,
    #[serde(default = "default_short_delay")]
    pub surface_delay_ms: u64,
}

fn default_setup_delay() -> u64 {
    100
}

fn default_layout_delay() -> u64 {
    50
}

fn default_short_delay() -> u64 {
    10
}

fn default_settle_delay() -> u64 {
    50
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            setup_delay_ms: default_setup_delay(),
            first_layout_delay_ms: default_layout_delay(),
            confirm_layout_delay_ms: default_layout_delay(),
            activate_delay_ms: default_short_delay(),
            deactivate_delay_ms: default_short_delay(),
            show_delay_ms: default_settle_delay(),
            hide_delay_ms: default_short_delay(),
            geometry_delay_ms: default_short_delay(),
            state_change_delay_ms: default_settle_delay(),
            surface_delay_ms: default_short_delay(),
        }
    }
}

impl TimingSettings {
    pub fn setup_delay(&self) -> Duration {
        Duration::from_millis(self.setup_delay_ms)
    }

    pub fn first_layout_delay(&self) -> Duration {
        Duration::from_millis(self.first_layout_delay_ms)
    }

    pub fn confirm_layout_delay(&self) -> Duration {
        Duration::from_millis(self.confirm_layout_delay_ms)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OverlaySettings {
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub timing: TimingSettings,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional file that receives log output instead of stdout.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Directory used for saving screenshots. If `None`, a folder under the
    /// current directory is used.
    #[serde(default)]
    pub screenshot_dir: Option<String>,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            layout: LayoutSettings::default(),
            timing: TimingSettings::default(),
            debug_logging: false,
            log_file: None,
            screenshot_dir: None,
        }
    }
}

impl OverlaySettings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn screenshot_dir(&self) -> std::path::PathBuf {
        match &self.screenshot_dir {
            Some(dir) => std::path::PathBuf::from(dir),
            None => std::env::current_dir()
                .unwrap_or_else(|_| std::env::temp_dir())
                .join("overlay_screenshots"),
        }
    }
}
