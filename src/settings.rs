//! Game settings and preferences
//!
//! Read from the page URL query (or a JSON blob) at startup. Never persisted.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

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

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }

    /// Number of background stars
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => 40,
            QualityPreset::Medium => 100,
            QualityPreset::High => 160,
        }
    }

    /// Triangle segments for round shapes (ball, glow, particles)
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 8,
            QualityPreset::Medium => 16,
            QualityPreset::High => 24,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Ball trail
    pub trails: bool,
    /// Particle effects (explosions, sparks)
    pub particles: bool,
    /// Ball glow halo
    pub glow: bool,

    // === Accessibility ===
    /// Reduced motion (no pulsing overlay text)
    pub reduced_motion: bool,

    /// Fixed RNG seed (random per page load when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            trails: true,
            particles: true,
            glow: true,
            reduced_motion: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Parse settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse settings from a URL query string like `?quality=low&trails=off&seed=7`
    ///
    /// Unknown keys and unparseable values are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "quality" => {
                    if let Some(preset) = QualityPreset::parse(value) {
                        settings.quality = preset;
                    }
                }
                "trails" => settings.trails = parse_flag(value).unwrap_or(settings.trails),
                "particles" => {
                    settings.particles = parse_flag(value).unwrap_or(settings.particles)
                }
                "glow" => settings.glow = parse_flag(value).unwrap_or(settings.glow),
                "reduced_motion" => {
                    settings.reduced_motion = parse_flag(value).unwrap_or(settings.reduced_motion)
                }
                "seed" => settings.seed = value.parse().ok().or(settings.seed),
                _ => log::debug!("Ignoring unknown setting: {}", key),
            }
        }
        settings
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Whether the overlay text should pulse
    pub fn overlay_pulse(&self) -> bool {
        !self.reduced_motion
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "on" | "true" | "yes" => Some(true),
        "0" | "off" | "false" | "no" => Some(false),
        _ => None,
    }
}
