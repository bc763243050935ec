//! Overhead minimap in the top-right corner

use super::raycast::FrameSnapshot;
use super::render::Framebuffer;
use super::types::Color;
use crate::world::{Actor, WallQuery, OPEN};

/// Largest side length in pixels
const MINIMAP_SIZE: usize = 200;
const MINIMAP_MARGIN: usize = 10;

/// Draw walls, actors and the player's position/heading
pub fn draw_minimap(fb: &mut Framebuffer, frame: &FrameSnapshot) {
    let tiles = frame.tiles;
    let size = MINIMAP_SIZE.min(fb.width / 4).min(fb.height / 2);
    if size == 0 || fb.width < size + MINIMAP_MARGIN {
        return;
    }

    let world_w = tiles.width() as f32 * tiles.tile_size();
    let world_h = tiles.height() as f32 * tiles.tile_size();
    let scale = size as f32 / world_w.max(world_h);
    let origin_x = (fb.width - size - MINIMAP_MARGIN) as i32;
    let origin_y = MINIMAP_MARGIN as i32;
    let to_screen = |x: f32, y: f32| {
        (origin_x + (x * scale) as i32, origin_y + (y * scale) as i32)
    };

    let (map_w, map_h) = ((world_w * scale) as i32, (world_h * scale) as i32);
    fb.fill_rect(origin_x, origin_y, map_w, map_h, Color::BLACK);

    let cell = tiles.tile_size() * scale;
    for gy in 0..tiles.height() as i32 {
        for gx in 0..tiles.width() as i32 {
            if tiles.tile_at(gx, gy) == OPEN {
                continue;
            }
            let x0 = origin_x + (gx as f32 * cell) as i32;
            let y0 = origin_y + (gy as f32 * cell) as i32;
            let x1 = origin_x + ((gx + 1) as f32 * cell) as i32;
            let y1 = origin_y + ((gy + 1) as f32 * cell) as i32;
            fb.fill_rect(x0, y0, x1 - x0, y1 - y0, Color::WHITE);
        }
    }

    for actor in frame.actors {
        let (x, y) = actor.position();
        let (sx, sy) = to_screen(x, y);
        match actor {
            Actor::Zombie(_) => fb.draw_circle(sx, sy, 2, Color::GREEN),
            Actor::Bullet(_) => fb.set_pixel(sx.max(0) as usize, sy.max(0) as usize, Color::YELLOW),
        }
    }

    let pose = frame.pose;
    let (px, py) = to_screen(pose.x, pose.y);
    let (fx, fy) = pose.forward();
    fb.draw_circle(px, py, 3, Color::RED);
    fb.draw_line(px, py, px + (fx * 10.0) as i32, py + (fy * 10.0) as i32, Color::RED);
}
