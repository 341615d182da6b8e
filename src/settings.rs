//! Engine settings
//!
//! Grid size and RNG seed. Serialized as JSON so a front-end can hand the
//! engine its configuration without a bespoke format.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, MIN_GRID_SIZE};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Grid columns
    pub grid_width: i32,
    /// Grid rows
    pub grid_height: i32,
    /// Fixed RNG seed for reproducible runs (None = fresh entropy)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            seed: None,
        }
    }
}

impl Settings {
    /// Settings for a custom grid size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Same settings with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Grid raised to the minimum playable size
    pub fn clamped(&self) -> Self {
        Self {
            grid_width: self.grid_width.max(MIN_GRID_SIZE),
            grid_height: self.grid_height.max(MIN_GRID_SIZE),
            seed: self.seed,
        }
    }

    /// The configured seed, or one drawn from OS entropy
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.grid_width, 20);
        assert_eq!(settings.grid_height, 20);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"seed": 42}"#).unwrap();
        assert_eq!(settings.grid_width, DEFAULT_GRID_WIDTH);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.resolve_seed(), 42);
    }

    #[test]
    fn test_json_roundtrip_and_errors() {
        let settings = Settings::new(30, 24).with_seed(7);
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);

        assert!(Settings::from_json("{\"grid_width\": \"wide\"}").is_err());
    }

    #[test]
    fn test_clamped_enforces_minimum_grid() {
        let settings = Settings::new(3, 40).clamped();
        assert_eq!(settings.grid_width, MIN_GRID_SIZE);
        assert_eq!(settings.grid_height, 40);
    }
}
