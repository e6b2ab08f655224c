//! Game settings and preferences
//!
//! Settings are read at startup and never written back. Sources, in order:
//! defaults, an optional inline JSON block in the page, then URL query
//! overrides such as `?quality=low&particles=off&volume=0.5&mute=1&seed=42`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 256,
            QualityPreset::High => 1024,
        }
    }
}

/// Settings could not be read
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// The inline JSON block did not parse
    Json(String),
    /// A query parameter had a value we don't understand
    InvalidValue { key: String, value: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Json(msg) => write!(f, "invalid settings JSON: {msg}"),
            SettingsError::InvalidValue { key, value } => {
                write!(f, "invalid value {value:?} for setting {key:?}")
            }
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Json(err.to_string())
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects on brick hits
    pub particles: bool,
    /// Show FPS counter in the HUD
    pub show_fps: bool,

    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Start muted
    pub muted: bool,

    /// Fixed RNG seed (random per run when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            show_fps: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.clamp_volumes();
        Ok(settings)
    }

    /// Apply `key=value` overrides from a URL query string (leading `?` optional).
    ///
    /// Unknown keys are ignored; the first bad value aborts with an error and
    /// leaves earlier overrides applied.
    pub fn apply_query(&mut self, query: &str) -> Result<(), SettingsError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let invalid = || SettingsError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
            };

            match key {
                "quality" => self.quality = QualityPreset::parse(value).ok_or_else(invalid)?,
                "particles" => self.particles = parse_flag(value).ok_or_else(invalid)?,
                "fps" => self.show_fps = parse_flag(value).ok_or_else(invalid)?,
                "mute" => self.muted = parse_flag(value).ok_or_else(invalid)?,
                "volume" => self.master_volume = parse_volume(value).ok_or_else(invalid)?,
                "sfx" => self.sfx_volume = parse_volume(value).ok_or_else(invalid)?,
                "seed" => self.seed = Some(value.parse::<u64>().map_err(|_| invalid())?),
                _ => log::debug!("Ignoring unknown setting {key:?}"),
            }
        }
        self.clamp_volumes();
        Ok(())
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Volume actually applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn clamp_volumes(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
    }

    /// Element id of the inline JSON config block
    pub const CONFIG_ELEMENT_ID: &'static str = "game-config";

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let mut settings = Self::default();
        let Some(window) = web_sys::window() else {
            return settings;
        };

        let inline = window
            .document()
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        if let Some(json) = inline {
            match Self::from_json(&json) {
                Ok(parsed) => {
                    log::info!("Loaded settings from page config");
                    settings = parsed;
                }
                Err(e) => log::warn!("{e}; using defaults"),
            }
        }

        if let Ok(search) = window.location().search() {
            if let Err(e) = settings.apply_query(&search) {
                log::warn!("{e}; remaining query overrides skipped");
            }
        }

        settings
    }

    /// Native: defaults only
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

/// Finite volume; NaN and infinities are rejected
fn parse_volume(value: &str) -> Option<f32> {
    value.parse::<f32>().ok().filter(|v| v.is_finite())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "" | "1" | "on" | "true" | "yes" => Some(true),
        "0" | "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.max_particles(), 256);
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_from_json_partial() {
        let settings = Settings::from_json(r#"{"quality":"high","master_volume":3.0}"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.master_volume, 1.0);
        assert!(settings.particles);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_apply_query() {
        let mut settings = Settings::default();
        settings
            .apply_query("?quality=low&particles=off&volume=0.5&mute&seed=42&utm=x")
            .unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(!settings.particles);
        assert_eq!(settings.master_volume, 0.5);
        assert!(settings.muted);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.max_particles(), 0);
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_apply_query_bad_value() {
        let mut settings = Settings::default();
        let err = settings.apply_query("fps=1&quality=ultra").unwrap_err();
        assert_eq!(
            err,
            SettingsError::InvalidValue {
                key: "quality".into(),
                value: "ultra".into()
            }
        );
        // Earlier overrides stay applied
        assert!(settings.show_fps);
    }

    #[test]
    fn test_apply_query_rejects_nan() {
        for query in ["volume=nan", "volume=inf", "sfx=NaN", "sfx=-inf"] {
            let mut settings = Settings::default();
            let err = settings.apply_query(query).unwrap_err();
            assert!(matches!(err, SettingsError::InvalidValue { .. }), "{query}");
            assert!(settings.effective_volume().is_finite());
            assert_eq!(settings.master_volume, 0.8);
            assert_eq!(settings.sfx_volume, 1.0);
        }
    }

    #[test]
    fn test_empty_query() {
        let mut settings = Settings::default();
        settings.apply_query("").unwrap();
        settings.apply_query("?").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_quality_parse() {
        assert_eq!(QualityPreset::parse("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("nope"), None);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }
}
