//! Grid world: static tiles plus the live actor list and wave bookkeeping

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::actor::{Actor, ActorTuning, Bullet, Zombie};
use super::tilemap::{TileCode, TileMap, WallQuery};
use crate::config::GameConfig;
use crate::player::Player;

/// Minimum distance (in tiles) a spawn point should keep from the player
const SPAWN_CLEARANCE_TILES: f32 = 4.0;

/// Wave progress, read by the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveState {
    /// Starts at 1
    pub wave_number: u32,
    /// Zombies of this wave not yet spawned
    pub remaining_to_spawn: u32,
}

pub struct GridWorld {
    tiles: TileMap,
    /// Index arena; removal is swap-remove
    actors: Vec<Actor>,
    wave: WaveState,
    kills: u32,
    spawn_points: Vec<(i32, i32)>,
    spawn_timer: f32,
    spawn_interval: f32,
    zombies_per_wave: u32,
    points_per_kill: u32,
    tuning: ActorTuning,
    rng: Pcg32,
}

impl GridWorld {
    pub fn new(tiles: TileMap, spawn_points: Vec<(i32, i32)>, config: &GameConfig) -> Self {
        log::info!("World initialized, map size {}x{}", tiles.width(), tiles.height());
        Self {
            tiles,
            actors: Vec::new(),
            wave: WaveState {
                wave_number: 1,
                remaining_to_spawn: 0,
            },
            kills: 0,
            spawn_points,
            spawn_timer: 0.0,
            spawn_interval: config.spawn_interval,
            zombies_per_wave: config.zombies_per_wave,
            points_per_kill: config.points_per_kill,
            tuning: ActorTuning::from_config(config),
            rng: Pcg32::seed_from_u64(config.seed),
        }
    }

    pub fn tiles(&self) -> &TileMap {
        &self.tiles
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn wave(&self) -> WaveState {
        self.wave
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn zombies_alive(&self) -> usize {
        self.actors.iter().filter(|a| a.is_zombie()).count()
    }

    /// Zombie count for a given wave, strictly increasing in `wave_number`
    pub fn wave_quota(&self, wave_number: u32) -> u32 {
        wave_number.saturating_mul(self.zombies_per_wave.max(1))
    }

    pub fn spawn_zombie(&mut self, x: f32, y: f32) {
        log::debug!("Zombie spawned at ({:.0}, {:.0})", x, y);
        self.actors.push(Actor::Zombie(Zombie::new(x, y, &self.tuning)));
    }

    /// Launch a bullet from a point along a heading
    pub fn spawn_bullet(&mut self, x: f32, y: f32, heading: f32) {
        self.actors.push(Actor::Bullet(Bullet::new(x, y, heading, &self.tuning)));
    }

    /// Advance every actor, resolve hits, remove the expired and roll waves
    pub fn update(&mut self, dt: f32, player: &mut Player) {
        self.tick_spawner(dt, player);

        let count = self.actors.len();
        for idx in 0..count {
            self.actors[idx].update(dt, player, &self.tiles, &self.tuning);
        }

        self.resolve_bullet_hits();

        // Descending order keeps swap_remove from skipping anything
        let mut idx = self.actors.len();
        while idx > 0 {
            idx -= 1;
            if self.actors[idx].is_expired() {
                let actor = self.actors.swap_remove(idx);
                if actor.is_zombie() {
                    self.kills += 1;
                    player.add_points(self.points_per_kill);
                    log::debug!("Zombie killed ({} total)", self.kills);
                }
            }
        }

        if self.zombies_alive() == 0 && self.wave.remaining_to_spawn == 0 {
            self.start_next_wave();
        }
    }

    fn start_next_wave(&mut self) {
        self.wave.wave_number += 1;
        self.wave.remaining_to_spawn = self.wave_quota(self.wave.wave_number);
        self.spawn_timer = 0.0;
        log::info!(
            "Wave {} starting, {} zombies incoming",
            self.wave.wave_number,
            self.wave.remaining_to_spawn
        );
    }

    fn tick_spawner(&mut self, dt: f32, player: &Player) {
        if self.wave.remaining_to_spawn == 0 {
            return;
        }
        self.spawn_timer -= dt;
        if self.spawn_timer > 0.0 {
            return;
        }
        self.spawn_timer = self.spawn_interval;

        match self.pick_spawn_cell(player) {
            Some((gx, gy)) => {
                let (x, y) = self.tiles.cell_center(gx, gy);
                self.spawn_zombie(x, y);
                self.wave.remaining_to_spawn -= 1;
            }
            None => {
                log::warn!(
                    "No open cell to spawn into, dropping rest of wave {}",
                    self.wave.wave_number
                );
                self.wave.remaining_to_spawn = 0;
            }
        }
    }

    /// Random spawn point away from the player, else any spawn point,
    /// else any open cell
    fn pick_spawn_cell(&mut self, player: &Player) -> Option<(i32, i32)> {
        let pose = player.pose();
        let clearance = SPAWN_CLEARANCE_TILES * self.tiles.tile_size();

        let mut candidates: Vec<(i32, i32)> = if self.spawn_points.is_empty() {
            self.tiles.open_cells().collect()
        } else {
            self.spawn_points.clone()
        };
        if candidates.is_empty() {
            return None;
        }

        let far: Vec<(i32, i32)> = candidates
            .iter()
            .copied()
            .filter(|&(gx, gy)| {
                let (cx, cy) = self.tiles.cell_center(gx, gy);
                let (dx, dy) = (cx - pose.x, cy - pose.y);
                (dx * dx + dy * dy).sqrt() >= clearance
            })
            .collect();
        if !far.is_empty() {
            candidates = far;
        }

        let pick = self.rng.random_range(0..candidates.len());
        Some(candidates[pick])
    }

    /// Each live bullet damages at most one zombie, then is spent
    fn resolve_bullet_hits(&mut self) {
        let bullets: Vec<(usize, f32, f32)> = self
            .actors
            .iter()
            .enumerate()
            .filter_map(|(i, a)| match a {
                Actor::Bullet(b) if !b.spent && b.ttl > 0.0 => Some((i, b.x, b.y)),
                _ => None,
            })
            .collect();

        let r2 = self.tuning.hit_radius * self.tuning.hit_radius;
        for (bullet_idx, bx, by) in bullets {
            let target = self.actors.iter().position(|a| match a {
                Actor::Zombie(z) if z.health > 0 => {
                    let (dx, dy) = (z.x - bx, z.y - by);
                    dx * dx + dy * dy <= r2
                }
                _ => false,
            });

            if let Some(zombie_idx) = target {
                if let Actor::Zombie(z) = &mut self.actors[zombie_idx] {
                    z.take_hit(self.tuning.bullet_damage);
                }
                if let Actor::Bullet(b) = &mut self.actors[bullet_idx] {
                    b.spent = true;
                }
            }
        }
    }
}

impl WallQuery for GridWorld {
    fn is_wall(&self, x: f32, y: f32) -> bool {
        self.tiles.is_wall(x, y)
    }

    fn tile_at(&self, grid_x: i32, grid_y: i32) -> TileCode {
        self.tiles.tile_at(grid_x, grid_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> (GridWorld, Player) {
        let config = GameConfig::default();
        let map = TileMap::bordered(20, 15, config.tile_size);
        let world = GridWorld::new(map, vec![(17, 12), (2, 12)], &config);
        let player = Player::new(3.5 * 64.0, 3.5 * 64.0, &config);
        (world, player)
    }

    #[test]
    fn test_empty_world_rolls_to_next_wave() {
        let (mut world, mut player) = arena();
        assert_eq!(
            world.wave(),
            WaveState {
                wave_number: 1,
                remaining_to_spawn: 0
            }
        );

        world.update(1.0 / 60.0, &mut player);

        let wave = world.wave();
        assert_eq!(wave.wave_number, 2);
        assert_eq!(wave.remaining_to_spawn, world.wave_quota(2));
        assert!(world.wave_quota(2) > world.wave_quota(1));
    }

    #[test]
    fn test_spawner_drains_quota_over_time() {
        let (mut world, mut player) = arena();
        world.update(0.01, &mut player);
        let quota = world.wave().remaining_to_spawn;

        // First spawn comes on the next tick, then one per interval
        world.update(0.01, &mut player);
        assert_eq!(world.zombies_alive(), 1);
        assert_eq!(world.wave().remaining_to_spawn, quota - 1);

        world.update(1.0, &mut player);
        assert_eq!(world.zombies_alive(), 1);
        world.update(1.0, &mut player);
        assert_eq!(world.zombies_alive(), 2);
    }

    #[test]
    fn test_spawns_prefer_far_points() {
        let (mut world, mut player) = arena();
        world.update(0.01, &mut player);
        world.update(0.01, &mut player);
        let (x, y) = world.actors()[0].position();
        let cell = world.tiles().cell_of(x, y);
        assert!(cell == (17, 12) || cell == (2, 12));
    }

    #[test]
    fn test_bullet_kills_zombie_and_awards_points() {
        let (mut world, mut player) = arena();
        let score = player.score();
        world.spawn_zombie(8.5 * 64.0, 3.5 * 64.0);

        // Two 50-damage hits to drop a 100 health zombie
        for _ in 0..2 {
            world.spawn_bullet(8.5 * 64.0 - 10.0, 3.5 * 64.0, 0.0);
            world.update(0.001, &mut player);
        }

        assert_eq!(world.kills(), 1);
        assert_eq!(player.score(), score + 50);
        assert!(world.actors().iter().all(|a| !a.is_zombie()));
    }

    #[test]
    fn test_spent_bullets_are_removed_without_points() {
        let (mut world, mut player) = arena();
        world.update(0.01, &mut player);
        let score = player.score();
        world.spawn_bullet(18.5 * 64.0, 3.5 * 64.0, 0.0);
        world.update(0.1, &mut player);
        assert!(world.actors().iter().all(|a| a.is_zombie()));
        assert_eq!(player.score(), score);
        assert_eq!(world.kills(), 0);
    }

    #[test]
    fn test_wave_holds_while_zombies_alive() {
        let (mut world, mut player) = arena();
        world.spawn_zombie(15.5 * 64.0, 10.5 * 64.0);
        world.update(0.01, &mut player);
        assert_eq!(world.wave().wave_number, 1);
    }

    #[test]
    fn test_world_is_wall_matches_tiles() {
        let (world, _) = arena();
        assert!(world.is_wall(10.0, 10.0));
        assert!(!world.is_wall(200.0, 200.0));
        assert_eq!(world.tile_at(-3, 2), 1);
    }
}
