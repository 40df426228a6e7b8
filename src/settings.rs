//! Scene configuration
//!
//! One immutable value handed to the mapper, the engine and the SVG
//! compiler at construction. Persisted in LocalStorage on the web.

use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// What happens when one projectile overlaps several enemies in a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CollisionPolicy {
    /// A projectile scores at most once, then leaves the playfield
    #[default]
    SingleHit,
    /// A projectile keeps scoring against every enemy it overlaps this frame
    Piercing,
}

impl CollisionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionPolicy::SingleHit => "single-hit",
            CollisionPolicy::Piercing => "piercing",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "single-hit" | "single" => Some(CollisionPolicy::SingleHit),
            "piercing" | "pierce" => Some(CollisionPolicy::Piercing),
            _ => None,
        }
    }
}

/// GitHub's contribution greens, indexed by level
pub const DEFAULT_PALETTE: [&str; 5] = ["#161b22", "#0e4429", "#006d32", "#26a641", "#39d353"];

/// Scene tuning shared by every renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Enemy colors, one per contribution level
    pub palette: [String; 5],

    // === Interactive engine ===
    /// Distance the player keeps from the top and bottom edges
    pub padding: f32,
    /// Frames between week spawns
    pub spawn_interval: u32,
    /// Multi-hit behaviour for projectiles
    pub collision_policy: CollisionPolicy,

    // === Mapper ===
    /// Maximum number of entities placed in the static scene
    pub entity_budget: usize,
    /// Horizontal spread of entry points past the right edge
    pub stream_length: f32,
    /// Seconds for a speed-factor-1 entity to cross the stream
    pub base_duration: f32,
    /// Every Nth retained entity is destroyed at the weapon line (1 = all)
    pub target_every: u32,

    // === Static compiler ===
    /// X coordinate of the weapon line
    pub hit_x: f32,
    /// Entities leave this far past the left edge
    pub exit_margin: f32,
    /// Fraction of the transit spent fading out after a hit
    pub flash_span: f32,
    /// Number of decorative projectile streaks
    pub ambient_streaks: u32,
    /// Number of background stars
    pub star_count: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.map(String::from),

            padding: 20.0,
            spawn_interval: 30,
            collision_policy: CollisionPolicy::SingleHit,

            entity_budget: 100,
            stream_length: 4000.0,
            base_duration: 40.0,
            target_every: 1,

            hit_x: 180.0,
            exit_margin: 200.0,
            flash_span: 0.1,
            ambient_streaks: 6,
            star_count: 30,
        }
    }
}

impl SceneConfig {
    /// Parse a (possibly partial) JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the timing math
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.palette.iter().any(|c| c.trim().is_empty()) {
            return Err(SceneError::InvalidConfig("palette entries must be non-empty".into()));
        }
        if self.spawn_interval == 0 {
            return Err(SceneError::InvalidConfig("spawn_interval must be at least 1".into()));
        }
        if self.target_every == 0 {
            return Err(SceneError::InvalidConfig("target_every must be at least 1".into()));
        }
        if !(self.base_duration.is_finite() && self.base_duration > 0.0) {
            return Err(SceneError::InvalidConfig("base_duration must be positive".into()));
        }
        if !(self.flash_span > 0.0 && self.flash_span <= 1.0) {
            return Err(SceneError::InvalidConfig("flash_span must be in (0, 1]".into()));
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(SceneError::InvalidConfig("padding must be non-negative".into()));
        }
        if !(self.stream_length.is_finite() && self.stream_length >= 0.0) {
            return Err(SceneError::InvalidConfig("stream_length must be non-negative".into()));
        }
        if !(self.exit_margin.is_finite() && self.exit_margin >= 0.0) {
            return Err(SceneError::InvalidConfig("exit_margin must be non-negative".into()));
        }
        Ok(())
    }

    /// Palette entry for a level; out-of-range levels clamp to the top entry
    pub fn color_for_level(&self, level: u8) -> &str {
        &self.palette[crate::clamp_level(level) as usize]
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "contrib_shooter_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded scene config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored scene config: {}", e),
                }
            }
        }

        log::info!("Using default scene config");
        Self::default()
    }

    /// Save config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Scene config saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = SceneConfig::from_json(r#"{"spawn_interval": 10}"#).unwrap();
        assert_eq!(config.spawn_interval, 10);
        assert_eq!(config.entity_budget, 100);
        assert_eq!(config.palette[4], "#39d353");
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = SceneConfig {
            spawn_interval: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(SceneConfig::from_json(r#"{"target_every": 0}"#).is_err());
    }

    #[test]
    fn test_color_for_level_clamps() {
        let config = SceneConfig::default();
        assert_eq!(config.color_for_level(0), "#161b22");
        assert_eq!(config.color_for_level(4), "#39d353");
        assert_eq!(config.color_for_level(9), "#39d353");
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(CollisionPolicy::parse("Piercing"), Some(CollisionPolicy::Piercing));
        assert_eq!(CollisionPolicy::parse("single"), Some(CollisionPolicy::SingleHit));
        assert_eq!(CollisionPolicy::parse("bouncy"), None);
        assert_eq!(
            CollisionPolicy::parse(CollisionPolicy::Piercing.as_str()),
            Some(CollisionPolicy::Piercing)
        );
    }
}
