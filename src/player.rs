//! Player state and movement
//!
//! Position, heading and the health/ammo/score counters. All mutation goes
//! through the methods here; the renderer only ever sees a copied `Pose`.

use std::f32::consts::TAU;

use crate::config::GameConfig;
use crate::world::WallQuery;

/// Position + heading, everything the renderer needs per frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    /// Radians, kept in [0, 2π)
    pub heading: f32,
}

impl Pose {
    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        Self {
            x,
            y,
            heading: normalize_heading(heading),
        }
    }

    /// Unit vector along the heading
    pub fn forward(&self) -> (f32, f32) {
        (self.heading.cos(), self.heading.sin())
    }

    /// Unit vector 90° clockwise on screen (y grows downward)
    pub fn right(&self) -> (f32, f32) {
        (-self.heading.sin(), self.heading.cos())
    }
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn normalize_heading(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// The player
#[derive(Debug, Clone)]
pub struct Player {
    pose: Pose,
    health: u32,
    max_health: u32,
    ammo: u32,
    max_ammo: u32,
    score: u32,
    weapon: String,
    /// World units per second
    speed: f32,
}

impl Player {
    /// Create a player at a world-space position facing +x
    pub fn new(x: f32, y: f32, config: &GameConfig) -> Self {
        log::info!("Player created at ({:.0}, {:.0})", x, y);
        Self {
            pose: Pose::new(x, y, 0.0),
            health: config.start_health.min(config.max_health),
            max_health: config.max_health,
            ammo: config.start_ammo.min(config.max_ammo),
            max_ammo: config.max_ammo,
            score: config.start_points,
            weapon: config.weapon.clone(),
            speed: config.player_speed * config.tile_size,
        }
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn max_ammo(&self) -> u32 {
        self.max_ammo
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn weapon(&self) -> &str {
        &self.weapon
    }

    pub fn is_down(&self) -> bool {
        self.health == 0
    }

    /// Move along a world-axis direction (unit length or zero).
    ///
    /// X and Y are resolved separately, X first, and Y is tested at the
    /// possibly-updated X. Walking diagonally into a wall slides along it.
    pub fn update<W: WallQuery + ?Sized>(&mut self, dt: f32, move_x: f32, move_y: f32, world: &W) {
        if move_x == 0.0 && move_y == 0.0 {
            return;
        }

        let new_x = self.pose.x + move_x * self.speed * dt;
        let new_y = self.pose.y + move_y * self.speed * dt;

        if !world.is_wall(new_x, self.pose.y) {
            self.pose.x = new_x;
        }
        if !world.is_wall(self.pose.x, new_y) {
            self.pose.y = new_y;
        }
    }

    pub fn rotate(&mut self, delta: f32) {
        self.pose.heading = normalize_heading(self.pose.heading + delta);
    }

    /// Fire one round. Returns false (and changes nothing) when empty.
    pub fn shoot(&mut self) -> bool {
        if self.ammo > 0 {
            self.ammo -= 1;
            log::debug!("Shot fired, ammo remaining: {}", self.ammo);
            true
        } else {
            log::debug!("Click, out of ammo");
            false
        }
    }

    pub fn reload(&mut self) {
        self.ammo = self.max_ammo;
        log::debug!("Reloaded {}", self.weapon);
    }

    /// Apply damage; returns true only on the hit that takes health to zero
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.health == 0 {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            log::info!("Player down");
            true
        } else {
            false
        }
    }

    pub fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        log::debug!("+{} points, total {}", points, self.score);
    }

    /// Spend points if the player has enough; no change otherwise
    pub fn spend_points(&mut self, cost: u32) -> bool {
        if self.score >= cost {
            self.score -= cost;
            true
        } else {
            false
        }
    }
}
