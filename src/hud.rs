//! Heads-up display
//!
//! Drawn with macroquad on top of the uploaded framebuffer. Only reads game
//! state, never changes it.

use macroquad::prelude::*;

use crate::game::{FrameController, GamePhase};
use crate::player::{Player, Pose};
use crate::world::GridWorld;

const PANEL_COLOR: Color = Color::new(0.0, 0.0, 0.0, 0.5);
const MARGIN: f32 = 20.0;

/// Health bar color bands
fn health_color(health: u32) -> Color {
    if health > 70 {
        GREEN
    } else if health > 30 {
        YELLOW
    } else {
        RED
    }
}

fn draw_text_right(text: &str, right: f32, y: f32, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, right - dims.width, y, font_size, color);
}

fn draw_text_centered(text: &str, cx: f32, y: f32, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, cx - dims.width / 2.0, y, font_size, color);
}

/// Draw every HUD widget for the current frame
pub fn draw_hud(game: &FrameController) {
    let player = game.player();
    let world = game.world();

    draw_health(player);
    draw_ammo(player);
    draw_points(player);
    draw_wave_info(world);
    if game.config().show_minimap {
        draw_debug_info(player.pose());
    }

    match game.phase() {
        GamePhase::Playing => {}
        GamePhase::Paused => draw_banner("PAUSED", &["Press ESC to resume"]),
        GamePhase::GameOver => {
            let stats = [
                format!("Wave Reached: {}", world.wave().wave_number),
                format!("Zombies Killed: {}", world.kills()),
                format!("Final Points: {}", player.score()),
                String::new(),
                "Press ENTER to restart".to_string(),
            ];
            let lines: Vec<&str> = stats.iter().map(String::as_str).collect();
            draw_banner("GAME OVER", &lines);
        }
    }
}

fn draw_health(player: &Player) {
    let y = screen_height() - 100.0;
    draw_rectangle(MARGIN, y, 200.0, 20.0, DARKGRAY);

    let fraction = player.health() as f32 / player.max_health().max(1) as f32;
    let fill = fraction * 198.0;
    if fill > 0.0 {
        draw_rectangle(MARGIN + 1.0, y + 1.0, fill, 18.0, health_color(player.health()));
    }

    let text = format!("Health: {}/{}", player.health(), player.max_health());
    draw_text(&text, MARGIN, y + 42.0, 24.0, WHITE);
}

fn draw_ammo(player: &Player) {
    let right = screen_width() - MARGIN;
    let bottom = screen_height() - MARGIN;

    let max = format!("/{}", player.max_ammo());
    let max_dims = measure_text(&max, None, 24, 1.0);
    draw_text(&max, right - max_dims.width, bottom, 24.0, GRAY);
    draw_text_right(&player.ammo().to_string(), right - max_dims.width - 4.0, bottom, 48.0, WHITE);

    draw_text_right(player.weapon(), right, bottom - 60.0, 36.0, WHITE);
}

fn draw_points(player: &Player) {
    draw_text(&format!("Points: {}", player.score()), MARGIN, MARGIN + 24.0, 36.0, YELLOW);
}

fn draw_wave_info(world: &GridWorld) {
    // Top right belongs to the minimap, so this stacks under the points
    draw_text(&format!("Wave: {}", world.wave().wave_number), MARGIN, MARGIN + 60.0, 36.0, WHITE);

    let zombies = world.zombies_alive() as u32 + world.wave().remaining_to_spawn;
    draw_text(&format!("Zombies: {}", zombies), MARGIN, MARGIN + 88.0, 24.0, RED);
}

/// Position, heading in degrees, frame rate
fn debug_lines(pose: Pose, fps: i32) -> [String; 3] {
    [
        format!("Pos: ({:.1}, {:.1})", pose.x, pose.y),
        format!("Angle: {:.1}°", pose.heading.to_degrees()),
        format!("FPS: {}", fps),
    ]
}

fn draw_debug_info(pose: Pose) {
    // Below the wave counter, clear of the minimap
    let top = MARGIN + 124.0;
    for (i, line) in debug_lines(pose, get_fps()).iter().enumerate() {
        draw_text(line, MARGIN, top + i as f32 * 22.0, 20.0, LIGHTGRAY);
    }
}

fn draw_banner(title: &str, lines: &[&str]) {
    let (w, h) = (screen_width(), screen_height());
    draw_rectangle(0.0, 0.0, w, h, PANEL_COLOR);

    let cx = w / 2.0;
    let cy = h / 2.0;
    draw_text_centered(title, cx, cy - 50.0, 48.0, RED);
    for (i, line) in lines.iter().enumerate() {
        draw_text_centered(line, cx, cy + i as f32 * 40.0, 32.0, WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_color_bands() {
        assert_eq!(health_color(100), GREEN);
        assert_eq!(health_color(71), GREEN);
        assert_eq!(health_color(70), YELLOW);
        assert_eq!(health_color(31), YELLOW);
        assert_eq!(health_color(30), RED);
        assert_eq!(health_color(0), RED);
    }

    #[test]
    fn test_debug_lines() {
        let pose = Pose::new(192.0, 224.5, std::f32::consts::FRAC_PI_2);
        let [pos, angle, fps] = debug_lines(pose, 60);
        assert_eq!(pos, "Pos: (192.0, 224.5)");
        assert_eq!(angle, "Angle: 90.0°");
        assert_eq!(fps, "FPS: 60");
    }
}
