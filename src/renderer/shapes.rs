//! Shape generation for 2D primitives
//!
//! All shapes are triangle lists in canvas units (y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use super::vertex::colors::{shade, with_alpha};
use crate::sim::{Rgba, TrailSample};

/// Bevel strip thickness for bricks
const BEVEL: f32 = 3.0;

fn quad(vertices: &mut Vec<Vertex>, corners: [Vec2; 4], colors: [Rgba; 4]) {
    // corners: top-left, top-right, bottom-right, bottom-left
    let [a, b, c, d] = corners;
    let [ca, cb, cc, cd] = colors;
    vertices.push(Vertex::new(a.x, a.y, ca));
    vertices.push(Vertex::new(b.x, b.y, cb));
    vertices.push(Vertex::new(c.x, c.y, cc));

    vertices.push(Vertex::new(a.x, a.y, ca));
    vertices.push(Vertex::new(c.x, c.y, cc));
    vertices.push(Vertex::new(d.x, d.y, cd));
}

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: Rgba) -> Vec<Vertex> {
    gradient_rect(min, size, color, color)
}

/// Rectangle with a vertical color gradient
pub fn gradient_rect(min: Vec2, size: Vec2, top: Rgba, bottom: Rgba) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    let max = min + size;
    quad(
        &mut vertices,
        [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)],
        [top, top, bottom, bottom],
    );
    vertices
}

/// Brick with a lighter top/left and darker bottom/right edge for a raised look
pub fn bevel_brick(min: Vec2, size: Vec2, color: Rgba) -> Vec<Vertex> {
    let light = shade(color, 0.35);
    let dark = shade(color, -0.4);
    let max = min + size;
    let inner_min = min + Vec2::splat(BEVEL);
    let inner_max = max - Vec2::splat(BEVEL);

    let mut vertices = Vec::with_capacity(30);
    // Top strip
    quad(
        &mut vertices,
        [min, Vec2::new(max.x, min.y), Vec2::new(inner_max.x, inner_min.y), inner_min],
        [light; 4],
    );
    // Left strip
    quad(
        &mut vertices,
        [min, inner_min, Vec2::new(inner_min.x, inner_max.y), Vec2::new(min.x, max.y)],
        [light; 4],
    );
    // Bottom strip
    quad(
        &mut vertices,
        [Vec2::new(inner_min.x, inner_max.y), inner_max, max, Vec2::new(min.x, max.y)],
        [dark; 4],
    );
    // Right strip
    quad(
        &mut vertices,
        [Vec2::new(inner_max.x, inner_min.y), Vec2::new(max.x, min.y), max, inner_max],
        [dark; 4],
    );
    // Face
    vertices.extend(gradient_rect(
        inner_min,
        inner_max - inner_min,
        shade(color, 0.1),
        shade(color, -0.1),
    ));
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Rgba, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Soft halo: a ring fading from `color` at `inner_radius` to transparent at `outer_radius`
pub fn glow(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: Rgba,
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    let clear = with_alpha(color, 0.0);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        quad(
            &mut vertices,
            [
                center + dir1 * inner_radius,
                center + dir2 * inner_radius,
                center + dir2 * outer_radius,
                center + dir1 * outer_radius,
            ],
            [color, color, clear, clear],
        );
    }

    vertices
}

/// Ball trail as a tapering ribbon through the samples (oldest first)
///
/// Each sample's width and opacity scale with its alpha.
pub fn ball_trail(trail: &[TrailSample], ball_radius: f32, color: Rgba) -> Vec<Vertex> {
    if trail.len() < 2 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity((trail.len() - 1) * 6);

    for pair in trail.windows(2) {
        let (p1, p2) = (&pair[0], &pair[1]);

        let dir = (p2.pos - p1.pos).normalize_or_zero();
        if dir == Vec2::ZERO {
            continue;
        }
        // Perpendicular for width
        let perp = Vec2::new(-dir.y, dir.x);
        let width1 = ball_radius * p1.alpha;
        let width2 = ball_radius * p2.alpha;
        let color1 = with_alpha(color, p1.alpha * 0.6);
        let color2 = with_alpha(color, p2.alpha * 0.6);

        quad(
            &mut vertices,
            [
                p1.pos + perp * width1,
                p2.pos + perp * width2,
                p2.pos - perp * width2,
                p1.pos - perp * width1,
            ],
            [color1, color2, color2, color1],
        );
    }

    vertices
}

/// 3x5 bitmap glyphs, one row per entry, bit 2 = left column
fn glyph(c: char) -> Option<[u8; 5]> {
    Some(match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        _ => return None,
    })
}

/// Blocky text for score popups, centered on `center`
///
/// Only digits and `+` are drawn; other characters leave a gap.
pub fn pixel_text(text: &str, center: Vec2, pixel: f32, color: Rgba) -> Vec<Vertex> {
    let advance = pixel * 4.0;
    let width = text.chars().count() as f32 * advance - pixel;
    let origin = center - Vec2::new(width / 2.0, pixel * 2.5);

    let mut vertices = Vec::new();
    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else {
            continue;
        };
        let glyph_origin = origin + Vec2::new(i as f32 * advance, 0.0);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..3 {
                if bits & (0b100u8 >> col) != 0 {
                    let min = glyph_origin + Vec2::new(col as f32, row as f32) * pixel;
                    vertices.extend(rect(min, Vec2::splat(pixel), color));
                }
            }
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_rect_corners() {
        let v = rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), RED);
        assert_eq!(v.len(), 6);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_bevel_shades() {
        let v = bevel_brick(Vec2::ZERO, Vec2::new(70.0, 20.0), [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(v.len(), 30);
        // Top strip is lighter than the bottom strip
        assert!(v[0].color[0] > v[12].color[0]);
    }

    #[test]
    fn test_glow_fades_out() {
        let v = glow(Vec2::ZERO, 8.0, 20.0, [0.0, 1.0, 1.0, 0.5], 8);
        assert_eq!(v.len(), 48);
        assert!(v.iter().any(|v| v.color[3] == 0.0));
        assert!(v.iter().any(|v| v.color[3] == 0.5));
    }

    #[test]
    fn test_trail_ribbon() {
        let samples: Vec<TrailSample> = (0..5)
            .map(|i| TrailSample {
                pos: Vec2::new(i as f32 * 4.0, 0.0),
                alpha: i as f32 / 5.0,
            })
            .collect();
        let v = ball_trail(&samples, 8.0, RED);
        assert_eq!(v.len(), 4 * 6);
        // Oldest sample has zero width and opacity
        assert_eq!(v[0].color[3], 0.0);
        assert_eq!(v[0].position, [0.0, 0.0]);

        assert!(ball_trail(&samples[..1], 8.0, RED).is_empty());
    }

    #[test]
    fn test_pixel_text() {
        // '+' has 5 lit pixels, '6' and '0' have 12 each
        let v = pixel_text("+60", Vec2::new(100.0, 100.0), 2.0, RED);
        assert_eq!(v.len(), (5 + 12 + 12) * 6);

        let skipped = pixel_text("x", Vec2::ZERO, 2.0, RED);
        assert!(skipped.is_empty());
    }
}
