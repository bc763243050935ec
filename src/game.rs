//! Frame controller
//!
//! Collects input events into a held-control set and a pending rotation,
//! then each tick moves the player, advances the world and renders, always
//! in that order.

use std::collections::HashSet;

use crate::config::GameConfig;
use crate::player::Player;
use crate::rasterizer::{FrameSnapshot, Framebuffer, Raycaster};
use crate::world::{GridWorld, Level, LevelError};

/// Maximum simulation substeps per frame to prevent spiral of death
const MAX_SUBSTEPS: u32 = 8;

/// Logical controls, already decoupled from physical keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
    Reload,
    Pause,
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
}

/// Discrete events delivered by the window layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Control),
    KeyUp(Control),
    /// Pixels moved since the previous event
    MouseMotion { dx: f32, dy: f32 },
    MouseButtonDown(MouseButton),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    Paused,
    GameOver,
}

pub struct FrameController {
    config: GameConfig,
    level: Level,
    world: GridWorld,
    player: Player,
    raycaster: Raycaster,
    /// Controls physically held right now, kept in sync across phases
    held: HashSet<Control>,
    /// Mouse-look radians not yet applied
    pending_rotation: f32,
    /// Frame time not yet consumed by fixed simulation steps
    accumulator: f32,
    phase: GamePhase,
}

impl FrameController {
    pub fn new(config: GameConfig, level: Level) -> Result<Self, LevelError> {
        let (world, player) = Self::spawn(&config, &level)?;
        let raycaster = Raycaster::new(&config);
        log::info!("Game ready on level '{}'", level.name);
        Ok(Self {
            config,
            level,
            world,
            player,
            raycaster,
            held: HashSet::new(),
            pending_rotation: 0.0,
            accumulator: 0.0,
            phase: GamePhase::Playing,
        })
    }

    fn spawn(config: &GameConfig, level: &Level) -> Result<(GridWorld, Player), LevelError> {
        let tiles = level.build_map(config.tile_size)?;
        let (sx, sy) = level.player_start;
        let player = Player::new(
            sx as f32 * config.tile_size,
            sy as f32 * config.tile_size,
            config,
        );
        let world = GridWorld::new(tiles, level.spawn_cells(), config);
        Ok((world, player))
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(Control::Pause) => {
                self.phase = match self.phase {
                    GamePhase::Playing => GamePhase::Paused,
                    GamePhase::Paused => GamePhase::Playing,
                    GamePhase::GameOver => GamePhase::GameOver,
                };
            }
            InputEvent::KeyDown(Control::Restart) => {
                if self.phase == GamePhase::GameOver {
                    self.restart();
                }
            }
            InputEvent::KeyDown(Control::Reload) => {
                if self.phase == GamePhase::Playing {
                    self.player.reload();
                }
            }
            InputEvent::KeyDown(control) => {
                self.held.insert(control);
            }
            InputEvent::KeyUp(control) => {
                self.held.remove(&control);
            }
            InputEvent::MouseMotion { dx, .. } => {
                if self.phase == GamePhase::Playing {
                    self.pending_rotation += dx * self.config.mouse_sensitivity;
                }
            }
            InputEvent::MouseButtonDown(MouseButton::Primary) => {
                if self.phase == GamePhase::Playing && self.player.shoot() {
                    let pose = self.player.pose();
                    self.world.spawn_bullet(pose.x, pose.y, pose.heading);
                }
            }
            InputEvent::MouseButtonDown(MouseButton::Secondary) => {}
        }
    }

    fn is_held(&self, control: Control) -> bool {
        self.held.contains(&control)
    }

    /// World-axis unit movement direction from held keys, or zero
    pub fn movement_vector(&self) -> (f32, f32) {
        let axis = |pos: Control, neg: Control| {
            (self.is_held(pos) as i32 - self.is_held(neg) as i32) as f32
        };
        let forward = axis(Control::Forward, Control::Backward);
        let strafe = axis(Control::StrafeRight, Control::StrafeLeft);
        if forward == 0.0 && strafe == 0.0 {
            return (0.0, 0.0);
        }

        let pose = self.player.pose();
        let (fx, fy) = pose.forward();
        let (rx, ry) = pose.right();
        let x = fx * forward + rx * strafe;
        let y = fy * forward + ry * strafe;
        let len = (x * x + y * y).sqrt();
        (x / len, y / len)
    }

    /// Advance the simulation by one step: rotate, move, then world
    pub fn simulate(&mut self, dt: f32) {
        if self.phase != GamePhase::Playing {
            self.pending_rotation = 0.0;
            return;
        }

        let turn = (self.is_held(Control::TurnRight) as i32
            - self.is_held(Control::TurnLeft) as i32) as f32;
        let rotation = self.pending_rotation + turn * self.config.turn_speed * dt;
        self.pending_rotation = 0.0;
        if rotation != 0.0 {
            self.player.rotate(rotation);
        }

        let (move_x, move_y) = self.movement_vector();
        self.player.update(dt, move_x, move_y, &self.world);
        self.world.update(dt, &mut self.player);

        if self.player.is_down() {
            log::info!(
                "Game over on wave {} with {} kills, {} points",
                self.world.wave().wave_number,
                self.world.kills(),
                self.player.score()
            );
            self.phase = GamePhase::GameOver;
        }
    }

    /// Draw the current state
    pub fn render(&self, fb: &mut Framebuffer) {
        let frame = FrameSnapshot {
            pose: self.player.pose(),
            tiles: self.world.tiles(),
            actors: self.world.actors(),
        };
        self.raycaster.render(fb, &frame);
    }

    /// One full frame: run the fixed simulation steps `frame_dt` covers,
    /// then render once. Returns the number of steps taken.
    pub fn tick(&mut self, frame_dt: f32, fb: &mut Framebuffer) -> u32 {
        let step = self.config.tick_dt();
        self.accumulator += frame_dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= step && substeps < MAX_SUBSTEPS {
            self.simulate(step);
            self.accumulator -= step;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }

        self.render(fb);
        substeps
    }

    fn restart(&mut self) {
        match Self::spawn(&self.config, &self.level) {
            Ok((world, player)) => {
                self.world = world;
                self.player = player;
                self.pending_rotation = 0.0;
                self.accumulator = 0.0;
                self.phase = GamePhase::Playing;
                log::info!("Restarted");
            }
            Err(e) => log::warn!("Restart failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn controller() -> FrameController {
        let config = GameConfig {
            show_minimap: false,
            ..GameConfig::default()
        };
        FrameController::new(config, Level::builtin().unwrap()).unwrap()
    }

    fn press(c: &mut FrameController, control: Control) {
        c.handle_event(InputEvent::KeyDown(control));
    }

    #[test]
    fn test_no_keys_no_movement() {
        let c = controller();
        assert_eq!(c.movement_vector(), (0.0, 0.0));
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut c = controller();
        press(&mut c, Control::Forward);
        press(&mut c, Control::Backward);
        press(&mut c, Control::StrafeLeft);
        press(&mut c, Control::StrafeRight);
        assert_eq!(c.movement_vector(), (0.0, 0.0));
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let mut c = controller();
        press(&mut c, Control::Forward);
        press(&mut c, Control::StrafeRight);
        let (x, y) = c.movement_vector();
        assert!(((x * x + y * y).sqrt() - 1.0).abs() < 1e-5);
        // Heading 0: forward +x, right +y
        assert!(x > 0.0 && y > 0.0);
    }

    #[test]
    fn test_key_up_releases() {
        let mut c = controller();
        press(&mut c, Control::Forward);
        c.handle_event(InputEvent::KeyUp(Control::Forward));
        assert_eq!(c.movement_vector(), (0.0, 0.0));
    }

    #[test]
    fn test_mouse_motion_accumulates_until_tick() {
        let mut c = controller();
        c.handle_event(InputEvent::MouseMotion {
            dx: 100.0,
            dy: 5.0,
        });
        c.handle_event(InputEvent::MouseMotion {
            dx: 50.0,
            dy: 0.0,
        });
        assert_eq!(c.player().pose().heading, 0.0);
        c.simulate(1.0 / 60.0);
        assert!((c.player().pose().heading - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_forward_moves_along_heading() {
        let mut c = controller();
        c.handle_event(InputEvent::MouseMotion {
            dx: FRAC_PI_2 / 0.002,
            dy: 0.0,
        });
        press(&mut c, Control::Forward);
        let before = c.player().pose();
        c.simulate(0.1);
        let after = c.player().pose();
        // Facing +y now
        assert!((after.x - before.x).abs() < 0.01);
        assert!(after.y > before.y + 30.0);
    }

    #[test]
    fn test_click_fires_bullet() {
        let mut c = controller();
        c.handle_event(InputEvent::MouseButtonDown(MouseButton::Primary));
        assert_eq!(c.player().ammo(), 7);
        assert_eq!(c.world().actors().len(), 1);

        c.handle_event(InputEvent::KeyDown(Control::Reload));
        assert_eq!(c.player().ammo(), 8);
    }

    #[test]
    fn test_empty_gun_fires_nothing() {
        let mut c = controller();
        for _ in 0..10 {
            c.handle_event(InputEvent::MouseButtonDown(MouseButton::Primary));
        }
        assert_eq!(c.player().ammo(), 0);
        assert_eq!(c.world().actors().len(), 8);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut c = controller();
        press(&mut c, Control::Pause);
        assert_eq!(c.phase(), GamePhase::Paused);
        press(&mut c, Control::Forward);
        let before = c.player().pose();
        c.simulate(0.5);
        assert_eq!(c.player().pose(), before);
        assert_eq!(c.world().wave().wave_number, 1);

        press(&mut c, Control::Pause);
        assert_eq!(c.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_held_key_survives_pause() {
        let mut c = controller();
        press(&mut c, Control::Forward);
        press(&mut c, Control::Pause);
        press(&mut c, Control::Pause);

        let before = c.player().pose();
        c.simulate(0.1);
        assert!(c.player().pose().x > before.x + 30.0);
    }

    #[test]
    fn test_key_released_while_paused_stops_movement() {
        let mut c = controller();
        press(&mut c, Control::Forward);
        press(&mut c, Control::Pause);
        c.handle_event(InputEvent::KeyUp(Control::Forward));
        press(&mut c, Control::Pause);
        assert_eq!(c.movement_vector(), (0.0, 0.0));
    }

    #[test]
    fn test_tick_runs_world_then_renders() {
        let mut c = controller();
        let mut fb = Framebuffer::new(c.config().screen_width, c.config().screen_height);
        let steps = c.tick(c.config().tick_dt(), &mut fb);
        assert_eq!(steps, 1);
        assert_eq!(c.world().wave().wave_number, 2);
        assert_eq!(fb.get_pixel(512, 384), crate::rasterizer::CROSSHAIR_COLOR);
    }

    #[test]
    fn test_tick_accumulates_short_frames() {
        let mut c = controller();
        let mut fb = Framebuffer::new(64, 48);
        let half = c.config().tick_dt() * 0.5;
        assert_eq!(c.tick(half, &mut fb), 0);
        assert_eq!(c.world().wave().wave_number, 1);
        assert_eq!(c.tick(half * 1.01, &mut fb), 1);
        assert_eq!(c.world().wave().wave_number, 2);
    }

    #[test]
    fn test_tick_caps_substeps() {
        let mut fb = Framebuffer::new(64, 48);

        // Long stalls are clamped to 0.1 s, which is 4.5 steps at 45 Hz
        let config = GameConfig {
            tick_rate: 45,
            show_minimap: false,
            ..GameConfig::default()
        };
        let mut slow = FrameController::new(config, Level::builtin().unwrap()).unwrap();
        assert_eq!(slow.tick(5.0, &mut fb), 4);

        // 100 steps owed at 1 kHz, only MAX_SUBSTEPS run and the rest is dropped
        let config = GameConfig {
            tick_rate: 1000,
            show_minimap: false,
            ..GameConfig::default()
        };
        let mut fast = FrameController::new(config, Level::builtin().unwrap()).unwrap();
        assert_eq!(fast.tick(0.1, &mut fb), MAX_SUBSTEPS);
        assert_eq!(fast.tick(0.0, &mut fb), 0);
    }

    #[test]
    fn test_game_over_and_restart() {
        let mut c = controller();
        let pose = c.player().pose();
        // Park zombies on the player until it goes down
        for _ in 0..4 {
            c.world.spawn_zombie(pose.x + 1.0, pose.y);
        }
        c.simulate(0.01);
        assert_eq!(c.phase(), GamePhase::GameOver);
        assert!(c.player().is_down());

        press(&mut c, Control::Restart);
        assert_eq!(c.phase(), GamePhase::Playing);
        assert_eq!(c.player().health(), 100);
        assert!(c.world().actors().is_empty());
    }
}
