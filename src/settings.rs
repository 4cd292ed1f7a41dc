//! Run settings
//!
//! Loaded from a JSON file or built from a preset. Every field has a default,
//! so a settings file only needs the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};
use crate::sim::{Color, GameRules};

/// Canned scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Two particles, pure physics, no game layer
    Duel,
    /// Two players
    Skirmish,
    /// Four players
    #[default]
    Melee,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Duel => "duel",
            Preset::Skirmish => "skirmish",
            Preset::Melee => "melee",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "duel" | "demo" => Some(Preset::Duel),
            "skirmish" | "2p" => Some(Preset::Skirmish),
            "melee" | "4p" => Some(Preset::Melee),
            _ => None,
        }
    }

    pub fn players(&self) -> usize {
        match self {
            Preset::Duel => 0,
            Preset::Skirmish => 2,
            Preset::Melee => 4,
        }
    }

    /// Regular (non-anchor, non-king) particles
    pub fn particle_count(&self) -> usize {
        match self {
            Preset::Duel => 2,
            Preset::Skirmish | Preset::Melee => 100,
        }
    }

    pub fn anchor_ratio(&self) -> f64 {
        match self {
            Preset::Duel => 0.0,
            Preset::Skirmish | Preset::Melee => ANCHOR_RATIO,
        }
    }
}

/// Where tick frames go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RendererKind {
    /// Headless
    None,
    #[default]
    Ascii,
    JsonLines,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub preset: Preset,

    // === Population ===
    /// Regular particles, coloured round-robin across players
    pub particle_count: usize,
    /// 0 disables the colour game entirely
    pub players: usize,
    /// Anchors as a fraction of `particle_count`
    pub anchor_ratio: f64,
    /// RNG seed; random when absent
    pub seed: Option<u64>,

    // === Clock ===
    /// Redraw events per unit of simulated time
    pub redraw_hz: f64,
    pub time_limit: f64,

    // === Game rule ===
    pub growth_factor: f64,
    pub radius_cap: f64,
    pub radius_reset: f64,
    pub neutral_color: Color,

    // === Output ===
    pub renderer: RendererKind,
    /// Delay passed to the renderer after each frame
    pub frame_millis: u64,
    /// Actually sleep for `frame_millis` (off for batch runs)
    pub pace: bool,
    /// ASCII grid width and height in cells
    pub grid_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

impl Settings {
    /// Settings for a preset, all other values at their defaults
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            preset,
            particle_count: preset.particle_count(),
            players: preset.players(),
            anchor_ratio: preset.anchor_ratio(),
            seed: None,

            redraw_hz: REDRAW_HZ,
            time_limit: TIME_LIMIT,

            growth_factor: GROWTH_FACTOR,
            radius_cap: RADIUS_CAP,
            radius_reset: RADIUS_RESET,
            neutral_color: Color::NEUTRAL,

            renderer: RendererKind::Ascii,
            frame_millis: FRAME_MILLIS,
            pace: true,
            grid_size: 40,
        }
    }

    /// Parse and validate settings from JSON text. Fields missing from the
    /// text take the values of the named preset, or melee when none is named.
    pub fn from_json(json: &str) -> Result<Self> {
        let fields: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let preset = match fields.get("preset") {
            Some(value) => Preset::deserialize(value)?,
            None => Preset::default(),
        };

        let serde_json::Value::Object(mut merged) = serde_json::to_value(Self::from_preset(preset))?
        else {
            return Err(SimError::InvalidSettings(
                "settings did not serialize to an object".to_string(),
            ));
        };
        merged.extend(fields);

        let settings: Settings = serde_json::from_value(serde_json::Value::Object(merged))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Simulated time between redraw events
    pub fn tick_period(&self) -> f64 {
        1.0 / self.redraw_hz
    }

    pub fn anchor_count(&self) -> usize {
        (self.particle_count as f64 * self.anchor_ratio).floor() as usize
    }

    /// Game rule constants, or `None` when there are no players
    pub fn game_rules(&self) -> Option<GameRules> {
        (self.players > 0).then_some(GameRules {
            growth_factor: self.growth_factor,
            radius_cap: self.radius_cap,
            radius_reset: self.radius_reset,
            neutral: self.neutral_color,
        })
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(SimError::InvalidSettings(msg));

        if self.players > MAX_PLAYERS {
            return invalid(format!("players must be at most {}, got {}", MAX_PLAYERS, self.players));
        }
        if self.preset == Preset::Duel && self.players != 0 {
            return invalid(format!("the duel preset has no players, got {}", self.players));
        }
        if !self.redraw_hz.is_finite() || self.redraw_hz <= 0.0 {
            return invalid(format!("redraw_hz must be finite and > 0, got {}", self.redraw_hz));
        }
        if !self.time_limit.is_finite() || self.time_limit < 0.0 {
            return invalid(format!("time_limit must be finite and >= 0, got {}", self.time_limit));
        }
        if !self.anchor_ratio.is_finite() || self.anchor_ratio < 0.0 {
            return invalid(format!("anchor_ratio must be finite and >= 0, got {}", self.anchor_ratio));
        }
        if !self.growth_factor.is_finite() || self.growth_factor <= 1.0 {
            return invalid(format!("growth_factor must be > 1, got {}", self.growth_factor));
        }
        if !(self.radius_reset > 0.0 && self.radius_reset <= self.radius_cap) {
            return invalid(format!(
                "need 0 < radius_reset <= radius_cap, got reset {} cap {}",
                self.radius_reset, self.radius_cap
            ));
        }
        if (0..self.players).any(|i| Color::player(i) == self.neutral_color) {
            return invalid(format!("neutral colour {} is also a player colour", self.neutral_color));
        }
        if self.grid_size < 2 {
            return invalid(format!("grid_size must be at least 2, got {}", self.grid_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_run() {
        let s = Settings::default();
        assert_eq!(s.players, 4);
        assert_eq!(s.particle_count, 100);
        assert_eq!(s.anchor_count(), 20);
        assert!((s.tick_period() - 2.0).abs() < 1e-12);
        assert_eq!(s.time_limit, 10_000.0);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!(Preset::from_str("DUEL"), Some(Preset::Duel));
        assert_eq!(Preset::from_str("2p"), Some(Preset::Skirmish));
        assert_eq!(Preset::from_str("Melee"), Some(Preset::Melee));
        assert_eq!(Preset::from_str("chess"), None);
        assert_eq!(Preset::Skirmish.as_str(), "skirmish");
    }

    #[test]
    fn test_duel_disables_game_rules() {
        let s = Settings::from_preset(Preset::Duel);
        assert_eq!(s.players, 0);
        assert!(s.game_rules().is_none());
        assert!(Settings::default().game_rules().is_some());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{ "players": 3, "seed": 7, "renderer": "json-lines" }"#)
            .unwrap();
        assert_eq!(s.players, 3);
        assert_eq!(s.seed, Some(7));
        assert_eq!(s.renderer, RendererKind::JsonLines);
        assert_eq!(s.particle_count, 100);
        assert_eq!(s.growth_factor, GROWTH_FACTOR);
    }

    #[test]
    fn test_json_preset_fills_missing_population() {
        let duel = Settings::from_json(r#"{ "preset": "duel" }"#).unwrap();
        assert_eq!(duel.players, 0);
        assert_eq!(duel.particle_count, 2);
        assert!(duel.game_rules().is_none());

        let s = Settings::from_json(r#"{ "preset": "skirmish", "particle_count": 10 }"#).unwrap();
        assert_eq!(s.players, 2);
        assert_eq!(s.particle_count, 10);
        assert_eq!(s.anchor_ratio, ANCHOR_RATIO);
        assert_eq!(s.time_limit, TIME_LIMIT);
    }

    #[test]
    fn test_json_preset_rejections() {
        assert!(matches!(
            Settings::from_json(r#"{ "preset": "duel", "players": 2 }"#),
            Err(SimError::InvalidSettings(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "preset": "chess" }"#),
            Err(SimError::Json(_))
        ));
        assert!(matches!(Settings::from_json("[1, 2]"), Err(SimError::Json(_))));
    }

    #[test]
    fn test_validation_failures() {
        let mut s = Settings::default();
        s.players = MAX_PLAYERS + 1;
        assert!(matches!(s.validate(), Err(SimError::InvalidSettings(_))));

        let mut s = Settings::default();
        s.redraw_hz = 0.0;
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.radius_reset = 0.05;
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.neutral_color = Color::RED;
        assert!(s.validate().is_err());

        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SimError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_values() {
        let mut s = Settings::from_preset(Preset::Skirmish);
        s.seed = Some(42);
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back.preset, Preset::Skirmish);
        assert_eq!(back.players, 2);
        assert_eq!(back.seed, Some(42));
        assert_eq!(back.renderer, s.renderer);
    }
}
