//! Startup configuration
//!
//! Every tunable the game needs lives in one immutable `GameConfig` value,
//! built once in `main` and handed to the world, player and renderer
//! constructors. Stored as RON next to the binary; missing fields fall back
//! to the defaults below.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Invalid config: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Display ===
    pub screen_width: usize,
    pub screen_height: usize,
    /// Simulation ticks per second
    pub tick_rate: u32,

    // === Raycasting ===
    /// Field of view in degrees
    pub fov_degrees: f32,
    /// Maximum ray length, in tiles
    pub render_distance: f32,
    /// Number of screen columns cast per frame
    pub ray_count: usize,
    /// Fixed march step, in world units
    pub ray_step: f32,
    /// Edge length of one tile, in world units
    pub tile_size: f32,
    /// Divide ray distance by cos(angle from center) before projecting
    pub fisheye_correction: bool,
    pub show_minimap: bool,

    // === Player ===
    /// Tiles per second
    pub player_speed: f32,
    /// Keyboard turn rate, radians per second
    pub turn_speed: f32,
    /// Radians per pixel of horizontal mouse motion
    pub mouse_sensitivity: f32,
    pub start_health: u32,
    pub max_health: u32,
    pub start_ammo: u32,
    pub max_ammo: u32,
    pub start_points: u32,
    pub weapon: String,

    // === Scoring / waves ===
    pub points_per_kill: u32,
    /// Wave quota is `wave_number * zombies_per_wave`
    pub zombies_per_wave: u32,
    /// Seconds between zombie spawns while a wave still has quota
    pub spawn_interval: f32,

    // === Zombies ===
    /// Tiles per second
    pub zombie_speed: f32,
    pub zombie_health: u32,
    pub zombie_damage: u32,
    /// Seconds between two hits on the player
    pub zombie_attack_cooldown: f32,

    // === Bullets ===
    /// World units per second
    pub bullet_speed: f32,
    pub bullet_damage: u32,
    /// Seconds before an unimpeded bullet disappears
    pub bullet_lifetime: f32,

    /// Seed for spawn point selection
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 1024,
            screen_height: 768,
            tick_rate: 60,

            fov_degrees: 60.0,
            render_distance: 20.0,
            ray_count: 512,
            ray_step: 4.0,
            tile_size: 64.0,
            fisheye_correction: false,
            show_minimap: true,

            player_speed: 5.0,
            turn_speed: 2.0,
            mouse_sensitivity: 0.002,
            start_health: 100,
            max_health: 100,
            start_ammo: 8,
            max_ammo: 8,
            start_points: 500,
            weapon: "M1911".to_string(),

            points_per_kill: 50,
            zombies_per_wave: 6,
            spawn_interval: 2.0,

            zombie_speed: 1.5,
            zombie_health: 100,
            zombie_damage: 25,
            zombie_attack_cooldown: 1.0,

            bullet_speed: 800.0,
            bullet_damage: 50,
            bullet_lifetime: 1.5,

            seed: 0x5eed_cafe,
        }
    }
}

impl GameConfig {
    /// Load and validate a config from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Parse and validate a config from a RON string
    pub fn from_ron(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file is absent or bad
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::Invalid { field, reason })
            }
        }

        check(self.screen_width > 0, "screen_width", "must be positive")?;
        check(self.screen_height > 0, "screen_height", "must be positive")?;
        check(self.tick_rate > 0, "tick_rate", "must be positive")?;
        check(
            self.fov_degrees > 0.0 && self.fov_degrees < 180.0,
            "fov_degrees",
            "must be in (0, 180)",
        )?;
        check(self.render_distance > 0.0, "render_distance", "must be positive")?;
        check(self.ray_count > 0, "ray_count", "must be positive")?;
        check(self.ray_step > 0.0, "ray_step", "must be positive")?;
        check(self.tile_size > 0.0, "tile_size", "must be positive")?;
        check(self.max_health > 0, "max_health", "must be positive")?;
        check(self.max_ammo > 0, "max_ammo", "must be positive")?;
        check(self.spawn_interval >= 0.0, "spawn_interval", "must not be negative")?;
        Ok(())
    }

    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }

    /// Maximum ray length in world units
    pub fn render_limit(&self) -> f32 {
        self.render_distance * self.tile_size
    }

    /// Fixed simulation timestep in seconds
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}
