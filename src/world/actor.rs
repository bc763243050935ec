//! Dynamic actors living in the grid world
//!
//! Zombies walk straight at the player and hit when close; bullets fly along
//! a fixed direction until they touch a wall, a zombie, or run out of time.
//! Both share one `Actor` enum so the world can keep them in a single list.

use super::tilemap::{TileMap, WallQuery};
use crate::config::GameConfig;
use crate::player::Player;

/// Per-world actor tuning, converted to world units once
#[derive(Debug, Clone, Copy)]
pub struct ActorTuning {
    /// World units per second
    pub zombie_speed: f32,
    pub zombie_health: u32,
    pub zombie_damage: u32,
    pub zombie_attack_cooldown: f32,
    /// Distance at which a zombie can hit the player
    pub zombie_reach: f32,
    /// World units per second
    pub bullet_speed: f32,
    pub bullet_damage: u32,
    pub bullet_lifetime: f32,
    /// Distance at which a bullet connects with a zombie
    pub hit_radius: f32,
}

impl ActorTuning {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            zombie_speed: config.zombie_speed * config.tile_size,
            zombie_health: config.zombie_health,
            zombie_damage: config.zombie_damage,
            zombie_attack_cooldown: config.zombie_attack_cooldown,
            zombie_reach: config.tile_size * 0.5,
            bullet_speed: config.bullet_speed,
            bullet_damage: config.bullet_damage,
            bullet_lifetime: config.bullet_lifetime,
            hit_radius: config.tile_size * 0.35,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Zombie {
    pub x: f32,
    pub y: f32,
    pub health: u32,
    /// Seconds until the next hit is allowed
    pub attack_timer: f32,
}

impl Zombie {
    pub fn new(x: f32, y: f32, tuning: &ActorTuning) -> Self {
        Self {
            x,
            y,
            health: tuning.zombie_health,
            attack_timer: 0.0,
        }
    }

    pub fn take_hit(&mut self, damage: u32) {
        self.health = self.health.saturating_sub(damage);
    }

    fn update(&mut self, dt: f32, player: &mut Player, tiles: &TileMap, tuning: &ActorTuning) {
        self.attack_timer = (self.attack_timer - dt).max(0.0);

        let pose = player.pose();
        let (dx, dy) = (pose.x - self.x, pose.y - self.y);
        let dist = (dx * dx + dy * dy).sqrt();

        if dist <= tuning.zombie_reach {
            if self.attack_timer <= 0.0 && !player.is_down() {
                player.take_damage(tuning.zombie_damage);
                self.attack_timer = tuning.zombie_attack_cooldown;
            }
            return;
        }

        // Same axis-separated sliding as the player
        let step = (tuning.zombie_speed * dt).min(dist - tuning.zombie_reach);
        let new_x = self.x + dx / dist * step;
        let new_y = self.y + dy / dist * step;
        if !tiles.is_wall(new_x, self.y) {
            self.x = new_x;
        }
        if !tiles.is_wall(self.x, new_y) {
            self.y = new_y;
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    /// Unit direction
    pub dir: (f32, f32),
    /// Seconds left to live
    pub ttl: f32,
    /// Set once the bullet has struck something
    pub spent: bool,
}

impl Bullet {
    pub fn new(x: f32, y: f32, heading: f32, tuning: &ActorTuning) -> Self {
        Self {
            x,
            y,
            dir: (heading.cos(), heading.sin()),
            ttl: tuning.bullet_lifetime,
            spent: false,
        }
    }

    fn update(&mut self, dt: f32, tiles: &TileMap, tuning: &ActorTuning) {
        if self.spent {
            return;
        }
        self.ttl -= dt;

        // Sub-step so a fast bullet cannot skip a whole tile in one tick
        let travel = tuning.bullet_speed * dt;
        let max_step = tiles.tile_size() * 0.25;
        let steps = (travel / max_step).ceil().max(1.0) as usize;
        let step = travel / steps as f32;
        for _ in 0..steps {
            self.x += self.dir.0 * step;
            self.y += self.dir.1 * step;
            if tiles.is_wall(self.x, self.y) {
                self.spent = true;
                return;
            }
        }
    }
}

/// Anything the world simulates each tick
#[derive(Debug, Clone)]
pub enum Actor {
    Zombie(Zombie),
    Bullet(Bullet),
}

impl Actor {
    pub fn update(&mut self, dt: f32, player: &mut Player, tiles: &TileMap, tuning: &ActorTuning) {
        match self {
            Actor::Zombie(z) => z.update(dt, player, tiles, tuning),
            Actor::Bullet(b) => b.update(dt, tiles, tuning),
        }
    }

    /// Dead zombie, or bullet that hit something / timed out
    pub fn is_expired(&self) -> bool {
        match self {
            Actor::Zombie(z) => z.health == 0,
            Actor::Bullet(b) => b.spent || b.ttl <= 0.0,
        }
    }

    pub fn position(&self) -> (f32, f32) {
        match self {
            Actor::Zombie(z) => (z.x, z.y),
            Actor::Bullet(b) => (b.x, b.y),
        }
    }

    pub fn is_zombie(&self) -> bool {
        matches!(self, Actor::Zombie(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (TileMap, ActorTuning, Player) {
        let config = GameConfig::default();
        let map = TileMap::bordered(20, 15, config.tile_size);
        let player = Player::new(3.5 * 64.0, 3.5 * 64.0, &config);
        (map, ActorTuning::from_config(&config), player)
    }

    #[test]
    fn test_zombie_walks_toward_player() {
        let (map, tuning, mut player) = setup();
        let mut actor = Actor::Zombie(Zombie::new(10.5 * 64.0, 3.5 * 64.0, &tuning));
        let (x0, _) = actor.position();
        actor.update(0.5, &mut player, &map, &tuning);
        let (x1, y1) = actor.position();
        // 1.5 tiles/s * 64 * 0.5 s = 48 units closer
        assert!((x0 - x1 - 48.0).abs() < 0.01);
        assert!((y1 - 3.5 * 64.0).abs() < 0.01);
        assert_eq!(player.health(), 100);
    }

    #[test]
    fn test_zombie_attack_respects_cooldown() {
        let (map, tuning, mut player) = setup();
        let mut zombie = Actor::Zombie(Zombie::new(3.5 * 64.0 + 10.0, 3.5 * 64.0, &tuning));

        zombie.update(0.1, &mut player, &map, &tuning);
        assert_eq!(player.health(), 75);
        zombie.update(0.1, &mut player, &map, &tuning);
        assert_eq!(player.health(), 75);

        for _ in 0..10 {
            zombie.update(0.1, &mut player, &map, &tuning);
        }
        assert_eq!(player.health(), 50);
    }

    #[test]
    fn test_bullet_stops_at_wall() {
        let (map, tuning, mut player) = setup();
        // Heading east from x = 18 tiles, border at tile 19, 80 units per 0.1 s
        let mut bullet = Actor::Bullet(Bullet::new(18.0 * 64.0, 3.5 * 64.0, 0.0, &tuning));
        bullet.update(0.1, &mut player, &map, &tuning);
        assert!(bullet.is_expired());
        let (x, _) = bullet.position();
        assert!(x >= 19.0 * 64.0 && x < 19.0 * 64.0 + 16.0 + 0.01);
    }

    #[test]
    fn test_bullet_times_out() {
        let (map, tuning, mut player) = setup();
        let mut bullet = Actor::Bullet(Bullet::new(3.5 * 64.0, 3.5 * 64.0, 0.0, &tuning));
        bullet.update(0.01, &mut player, &map, &tuning);
        assert!(!bullet.is_expired());
        if let Actor::Bullet(b) = &mut bullet {
            b.ttl = 0.005;
        }
        bullet.update(0.01, &mut player, &map, &tuning);
        assert!(bullet.is_expired());
    }

    #[test]
    fn test_zombie_expires_at_zero_health() {
        let (_, tuning, _) = setup();
        let mut zombie = Zombie::new(0.0, 0.0, &tuning);
        zombie.take_hit(50);
        assert!(!Actor::Zombie(zombie.clone()).is_expired());
        zombie.take_hit(500);
        assert!(Actor::Zombie(zombie).is_expired());
    }
}
