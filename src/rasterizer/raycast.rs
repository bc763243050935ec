//! Column raycaster
//!
//! One ray per screen column, marched in fixed world-unit steps from the
//! player until it enters a wall cell or runs past the render limit. The hit
//! distance becomes a centered wall strip (height `tile / distance * screen`),
//! shaded by a linear falloff, between flat ceiling and floor bands.
//!
//! Distances are the raw oblique ray lengths, so walls bulge slightly toward
//! the screen edges. `fisheye_correction` switches to perpendicular distance.
//! Columns never read each other's results.

use super::minimap::draw_minimap;
use super::render::Framebuffer;
use super::types::Color;
use crate::config::GameConfig;
use crate::player::Pose;
use crate::world::{Actor, TileCode, TileMap, WallQuery, OPEN};

pub const CEILING_COLOR: Color = Color::new(64, 64, 128);
pub const FLOOR_COLOR: Color = Color::new(32, 32, 32);
pub const CROSSHAIR_COLOR: Color = Color::WHITE;

/// Crosshair arm length and stroke width in pixels
const CROSSHAIR_SIZE: i32 = 10;
const CROSSHAIR_THICKNESS: i32 = 2;

/// Shade never drops below this
const MIN_SHADE: f32 = 0.1;

/// Base color for a wall style code
pub fn wall_color(code: TileCode) -> Color {
    match code {
        1 => Color::GRAY,
        2 => Color::DARK_GRAY,
        3 => Color::new(150, 70, 50),
        4 => Color::new(60, 90, 150),
        5 => Color::new(90, 130, 70),
        _ => Color::GRAY,
    }
}

/// Read-only view of one frame's state
#[derive(Clone, Copy)]
pub struct FrameSnapshot<'a> {
    pub pose: Pose,
    pub tiles: &'a TileMap,
    pub actors: &'a [Actor],
}

/// Result of marching a single ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World units travelled; the render limit when nothing was hit
    pub distance: f32,
    /// Tile code struck, `OPEN` for a miss
    pub tile: TileCode,
}

/// One screen column's worth of output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallStrip {
    pub x: i32,
    pub width: i32,
    /// First wall row
    pub top: i32,
    /// One past the last wall row
    pub bottom: i32,
    pub color: Color,
}

pub struct Raycaster {
    fov: f32,
    ray_count: usize,
    step: f32,
    max_steps: usize,
    limit: f32,
    tile_size: f32,
    screen_width: usize,
    screen_height: usize,
    fisheye_correction: bool,
    show_minimap: bool,
}

impl Raycaster {
    pub fn new(config: &GameConfig) -> Self {
        let limit = config.render_limit();
        log::info!("Renderer initialized, FOV {}°, {} rays", config.fov_degrees, config.ray_count);
        Self {
            fov: config.fov_radians(),
            ray_count: config.ray_count,
            step: config.ray_step,
            max_steps: (limit / config.ray_step).ceil() as usize,
            limit,
            tile_size: config.tile_size,
            screen_width: config.screen_width,
            screen_height: config.screen_height,
            fisheye_correction: config.fisheye_correction,
            show_minimap: config.show_minimap,
        }
    }

    #[cfg(test)]
    pub fn ray_count(&self) -> usize {
        self.ray_count
    }

    /// Heading of ray `index`, sweeping left to right across the FOV
    pub fn ray_angle(&self, heading: f32, index: usize) -> f32 {
        let start = heading - self.fov / 2.0;
        start + index as f32 * (self.fov / self.ray_count as f32)
    }

    /// March from (x, y) along `angle` until a wall or the render limit
    pub fn cast_ray<W: WallQuery + ?Sized>(&self, world: &W, x: f32, y: f32, angle: f32) -> RayHit {
        let (dx, dy) = (angle.cos(), angle.sin());

        for n in 1..=self.max_steps {
            let distance = n as f32 * self.step;
            let px = x + dx * distance;
            let py = y + dy * distance;
            if world.is_wall(px, py) {
                let gx = (px / self.tile_size).floor() as i32;
                let gy = (py / self.tile_size).floor() as i32;
                return RayHit {
                    distance,
                    tile: world.tile_at(gx, gy),
                };
            }
        }

        RayHit {
            distance: self.limit,
            tile: OPEN,
        }
    }

    /// Projected wall height in pixels, capped at the screen height
    pub fn project_height(&self, distance: f32) -> f32 {
        let screen_h = self.screen_height as f32;
        if distance > 0.0 {
            ((self.tile_size / distance) * screen_h).min(screen_h)
        } else {
            screen_h
        }
    }

    /// Linear distance falloff, floored at 0.1
    pub fn shade_factor(&self, distance: f32) -> f32 {
        (1.0 - distance / self.limit).max(MIN_SHADE)
    }

    /// Pixel span `[start, end)` of column `index`.
    ///
    /// Spans tile the screen exactly for any ray count. With more rays than
    /// pixels some spans are empty.
    pub fn column_span(&self, index: usize) -> (usize, usize) {
        let start = index * self.screen_width / self.ray_count;
        let end = (index + 1) * self.screen_width / self.ray_count;
        (start, end)
    }

    /// Cast ray `index` and turn it into a screen strip
    pub fn column(&self, frame: &FrameSnapshot, index: usize) -> WallStrip {
        let pose = frame.pose;
        let angle = self.ray_angle(pose.heading, index);
        let hit = self.cast_ray(frame.tiles, pose.x, pose.y, angle);

        let distance = if self.fisheye_correction {
            hit.distance * (angle - pose.heading).cos()
        } else {
            hit.distance
        };

        let screen_h = self.screen_height as f32;
        let wall_height = self.project_height(distance);
        let top = ((screen_h - wall_height) / 2.0).floor();
        let bottom = (top + wall_height).min(screen_h);

        let (start, end) = self.column_span(index);
        WallStrip {
            x: start as i32,
            width: (end - start) as i32,
            top: top as i32,
            bottom: bottom as i32,
            color: wall_color(hit.tile).shade(self.shade_factor(hit.distance)),
        }
    }

    /// Paint ceiling, wall and floor bands for one column
    pub fn paint_column(&self, fb: &mut Framebuffer, strip: &WallStrip) {
        let h = self.screen_height as i32;
        fb.fill_rect(strip.x, 0, strip.width, strip.top, CEILING_COLOR);
        fb.fill_rect(strip.x, strip.top, strip.width, strip.bottom - strip.top, strip.color);
        fb.fill_rect(strip.x, strip.bottom, strip.width, h - strip.bottom, FLOOR_COLOR);
    }

    /// Render the full first-person view for one frame
    pub fn render(&self, fb: &mut Framebuffer, frame: &FrameSnapshot) {
        fb.clear(Color::BLACK);

        for index in 0..self.ray_count {
            let strip = self.column(frame, index);
            if strip.width > 0 {
                self.paint_column(fb, &strip);
            }
        }

        self.draw_crosshair(fb);

        if self.show_minimap {
            draw_minimap(fb, frame);
        }
    }

    fn draw_crosshair(&self, fb: &mut Framebuffer) {
        let cx = (self.screen_width / 2) as i32;
        let cy = (self.screen_height / 2) as i32;
        let half = CROSSHAIR_THICKNESS / 2;

        let arm = CROSSHAIR_SIZE * 2 + 1;

        fb.fill_rect(cx - CROSSHAIR_SIZE, cy - half, arm, CROSSHAIR_THICKNESS, CROSSHAIR_COLOR);
        fb.fill_rect(cx - half, cy - CROSSHAIR_SIZE, CROSSHAIR_THICKNESS, arm, CROSSHAIR_COLOR);
    }
}
