use bon::Builder;
use std::path::PathBuf;

use crate::instrument::SizeLimits;

/// Window and runtime settings for [`CockpitWindow`](crate::window::CockpitWindow).
#[derive(Debug, Clone, Builder)]
pub struct CockpitConfig {
    #[builder(default = "Cockpit".to_string())]
    pub title: String,
    #[builder(default = 1200)]
    pub window_width: u32,
    #[builder(default = 800)]
    pub window_height: u32,
    #[builder(default = 60.0)]
    pub max_framerate: f64,
    #[builder(default)]
    pub start_in_edit_mode: bool,

    /// TrueType/OpenType file for labels; system fonts are tried when unset.
    pub font_path: Option<PathBuf>,

    #[builder(default)]
    pub layout: LayoutConfig,
}

impl Default for CockpitConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Default panel arrangement.
#[derive(Debug, Clone, Builder)]
pub struct LayoutConfig {
    #[builder(default = 160.0)]
    pub gauge_size: f64,
    #[builder(default = 20.0)]
    pub padding: f64,
    /// Top of the first row as a fraction of canvas height.
    #[builder(default = 0.55)]
    pub top_fraction: f64,
    #[builder(default = SizeLimits::uniform(100.0, 300.0))]
    pub gauge_limits: SizeLimits,

    // Radio head spans two cells
    #[builder(default = 0.8)]
    pub radio_height_factor: f64,
    #[builder(default = SizeLimits {
        min_width: 200.0,
        max_width: 600.0,
        min_height: 80.0,
        max_height: 240.0,
    })]
    pub radio_limits: SizeLimits,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
