//! Grid Caster: first-person raycasting shooter
//!
//! A Wolfenstein-style renderer on a tile grid:
//! - One ray per screen column, fixed-step marching
//! - Distance-shaded flat walls, flat ceiling and floor
//! - Axis-separated collision so the player slides along walls
//! - Wave-based zombies, a pistol, points
//!
//! Usage: `grid-caster [level.ron]`. Settings are read from `config.ron` in
//! the working directory when present.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod game;
mod hud;
mod player;
mod rasterizer;
mod world;

use config::GameConfig;
use game::{Control, FrameController, GamePhase, InputEvent, MouseButton as GameMouseButton};
use macroquad::prelude::*;
use rasterizer::Framebuffer;
use world::{load_level, Level};

const CONFIG_PATH: &str = "config.ron";

/// Physical key bindings
const BINDINGS: &[(KeyCode, Control)] = &[
    (KeyCode::W, Control::Forward),
    (KeyCode::Up, Control::Forward),
    (KeyCode::S, Control::Backward),
    (KeyCode::Down, Control::Backward),
    (KeyCode::A, Control::StrafeLeft),
    (KeyCode::D, Control::StrafeRight),
    (KeyCode::Left, Control::TurnLeft),
    (KeyCode::Right, Control::TurnRight),
    (KeyCode::R, Control::Reload),
    (KeyCode::Escape, Control::Pause),
    (KeyCode::Enter, Control::Restart),
];

fn window_conf() -> Conf {
    // Logging isn't up yet; main reloads the config and reports problems
    let config = GameConfig::load(CONFIG_PATH).unwrap_or_default();
    Conf {
        window_title: format!("Grid Caster v{}", VERSION),
        window_width: config.screen_width as i32,
        window_height: config.screen_height as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn load_startup_level() -> Level {
    if let Some(path) = std::env::args().nth(1) {
        match load_level(&path) {
            Ok(level) => {
                log::info!("Loaded level {}", path);
                return level;
            }
            Err(e) => log::warn!("Failed to load level {}: {}, using built-in arena", path, e),
        }
    }

    match Level::builtin() {
        Ok(level) => level,
        Err(e) => {
            // Only reachable if the embedded file is broken
            log::error!("Built-in level is invalid: {}", e);
            Level {
                name: "Empty".to_string(),
                tiles: vec![vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 1]],
                player_start: (1, 1),
                spawn_points: Vec::new(),
            }
        }
    }
}

/// Translate this frame's window input into game events
fn collect_events(last_mouse: &mut (f32, f32)) -> Vec<InputEvent> {
    let mut events = Vec::new();

    for &(key, control) in BINDINGS {
        if is_key_pressed(key) {
            events.push(InputEvent::KeyDown(control));
        }
        if is_key_released(key) {
            events.push(InputEvent::KeyUp(control));
        }
    }

    let (mx, my) = mouse_position();
    let (dx, dy) = (mx - last_mouse.0, my - last_mouse.1);
    *last_mouse = (mx, my);
    if dx != 0.0 || dy != 0.0 {
        events.push(InputEvent::MouseMotion { dx, dy });
    }

    if is_mouse_button_pressed(MouseButton::Left) {
        events.push(InputEvent::MouseButtonDown(GameMouseButton::Primary));
    }
    if is_mouse_button_pressed(MouseButton::Right) {
        events.push(InputEvent::MouseButtonDown(GameMouseButton::Secondary));
    }

    events
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("=== Grid Caster v{} ===", VERSION);

    let config = GameConfig::load_or_default(CONFIG_PATH);
    let level = load_startup_level();

    let mut game = match FrameController::new(config, level) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Cannot start level: {}", e);
            return;
        }
    };

    let mut fb = Framebuffer::new(game.config().screen_width, game.config().screen_height);
    let mut last_mouse = mouse_position();
    let mut grabbed = false;

    loop {
        for event in collect_events(&mut last_mouse) {
            game.handle_event(event);
        }

        // Only hold the cursor while actually playing
        let want_grab = game.phase() == GamePhase::Playing;
        if want_grab != grabbed {
            set_cursor_grab(want_grab);
            show_mouse(!want_grab);
            grabbed = want_grab;
        }

        game.tick(get_frame_time(), &mut fb);

        // Convert framebuffer to texture and stretch it over the window
        clear_background(BLACK);
        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
        texture.set_filter(FilterMode::Nearest);
        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(screen_width(), screen_height())),
                ..Default::default()
            },
        );

        hud::draw_hud(&game);

        next_frame().await;
    }
}
