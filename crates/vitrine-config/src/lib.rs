//! Configuration for the vitrine showcase.
//!
//! Everything is optional: a missing file, table or key falls back to the
//! built-in page content and animation defaults.

mod alert;
mod error;
pub mod paths;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use vitrine_core::{CarouselSettings, FieldKind, FieldSettings, Section, Slide};

pub use alert::AlertState;
pub use error::ConfigError;

/// Shortest auto-play interval accepted from the config file.
const MIN_INTERVAL_MS: u64 = 500;

/// Faintest accepted trail fill; lower values would never fade old shapes.
const MIN_TRAIL_ALPHA: f64 = 0.05;

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page title shown in the header.
    pub title: String,
    pub field: FieldConfig,
    pub carousel: CarouselConfig,
    pub sections: Vec<Section>,
    pub alert: AlertConfig,
}

/// `[field]`: background animation kind plus optional overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// When false no drawing surface is created and the background stays blank.
    pub enabled: bool,
    pub kind: FieldKind,
    pub density: Option<f64>,
    pub max_entities: Option<usize>,
    pub link_distance: Option<f64>,
    pub trail_alpha: Option<f64>,
    /// Push particles away from the mouse pointer.
    pub pointer_effect: Option<bool>,
}

/// `[carousel]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub interval_ms: u64,
    pub reset_on_manual_jump: bool,
    pub slides: Vec<Slide>,
}

/// `[alert]`: the dismissible fraud warning banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub enabled: bool,
    pub message: String,
    /// Hours after a dismissal before the banner shows again.
    pub reshow_after_hours: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "VISIONX".to_string(),
            field: FieldConfig::default(),
            carousel: CarouselConfig::default(),
            sections: default_sections(),
            alert: AlertConfig::default(),
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            kind: FieldKind::default(),
            density: None,
            max_entities: None,
            link_distance: None,
            trail_alpha: None,
            pointer_effect: None,
        }
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        let settings = CarouselSettings::default();
        Self {
            interval_ms: settings.interval_ms,
            reset_on_manual_jump: settings.reset_on_manual_jump,
            slides: default_slides(),
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            message: "We never ask for payments or passwords by phone or messaging apps. \
                      Report suspicious contacts to our official channels."
                .to_string(),
            reshow_after_hours: 24,
        }
    }
}

impl Config {
    /// Load from the platform config file, or defaults when it is absent or
    /// there is no home directory to look in.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_resolved(paths::config_file())
    }

    fn load_resolved(path: Result<PathBuf, ConfigError>) -> Result<Self, ConfigError> {
        match path {
            Ok(path) => Self::load_from(&path),
            Err(ConfigError::NoHomeDir) => {
                debug!("no home directory, using default config");
                Ok(Self::default())
            }
            Err(err) => Err(err),
        }
    }

    /// Load from `path`, or defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a config document.
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn carousel_settings(&self) -> CarouselSettings {
        CarouselSettings {
            interval_ms: self.carousel.interval_ms.max(MIN_INTERVAL_MS),
            reset_on_manual_jump: self.carousel.reset_on_manual_jump,
        }
    }
}

impl FieldConfig {
    /// Settings for the configured kind.
    pub fn settings(&self) -> FieldSettings {
        self.settings_for(self.kind)
    }

    /// Settings for `kind`: its defaults with this table's overrides applied.
    pub fn settings_for(&self, kind: FieldKind) -> FieldSettings {
        let mut settings = FieldSettings::for_kind(kind);
        if let Some(density) = self.density.filter(|d| d.is_finite() && *d > 0.0) {
            settings.density = density;
        }
        if let Some(max) = self.max_entities {
            settings.max_entities = max;
        }
        if kind == FieldKind::Particles
            && let Some(distance) = self.link_distance.filter(|d| d.is_finite() && *d >= 0.0)
        {
            settings.link_distance = distance;
        }
        if let Some(alpha) = self.trail_alpha.filter(|a| a.is_finite()) {
            settings.trail_alpha = alpha.clamp(MIN_TRAIL_ALPHA, 1.0);
        }
        if self.pointer_effect == Some(false) {
            settings.pointer_radius = 0.0;
        }
        settings
    }
}

fn default_slides() -> Vec<Slide> {
    vec![
        Slide::new(
            "Rural credit, end to end",
            "From project design to release of funds, one team follows every step.",
        ),
        Slide::new(
            "Twenty years in the field",
            "Hundreds of producers financed across the region's main crops.",
        ),
        Slide::new(
            "Registered correspondents",
            "Accredited with the major public and cooperative banks.",
        ),
    ]
}

fn default_sections() -> Vec<Section> {
    vec![
        Section::new(
            "home",
            "Home",
            "Consulting for agribusiness credit and rural finance.",
        ),
        Section::new(
            "areas",
            "Services",
            "Funding projects, insurance, land regularization and \
             environmental licensing for producers of every size.",
        ),
        Section::new(
            "credentials",
            "Credentials",
            "Registered banking correspondent. Certified agronomists and \
             accountants on staff.",
        ),
        Section::new(
            "contact",
            "Contact",
            "Write to us through the official channels listed on this page. \
             We answer within one business day.",
        ),
    ]
}
