//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    use crate::sim::{Rgba, rgb_hex};

    pub const BACKGROUND_TOP: Rgba = rgb_hex(0x0b0221);
    pub const BACKGROUND_BOTTOM: Rgba = rgb_hex(0x1a0b3d);
    pub const STAR: Rgba = [1.0, 1.0, 1.0, 1.0];
    pub const HUD_LINE: Rgba = [0.0, 0.94, 1.0, 0.35];
    pub const BALL: Rgba = [1.0, 1.0, 1.0, 1.0];
    pub const BALL_GLOW: Rgba = [0.0, 0.94, 1.0, 0.45];
    pub const HIGHLIGHT: Rgba = [1.0, 1.0, 1.0, 0.8];
    pub const POPUP: Rgba = rgb_hex(0xfff275);
    pub const OVERLAY_DIM: Rgba = [0.0, 0.0, 0.02, 0.65];

    /// Scale RGB toward white (`amount` > 0) or black (`amount` < 0), keeping alpha
    pub fn shade(color: Rgba, amount: f32) -> Rgba {
        let amount = amount.clamp(-1.0, 1.0);
        let mix = |c: f32| {
            if amount >= 0.0 {
                c + (1.0 - c) * amount
            } else {
                c * (1.0 + amount)
            }
        };
        [mix(color[0]), mix(color[1]), mix(color[2]), color[3]]
    }

    /// Same color with a different alpha
    pub fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
        [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)]
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_shade() {
            let c = [0.5, 0.2, 0.0, 0.7];
            assert_eq!(shade(c, 0.0), c);
            assert_eq!(shade(c, 1.0), [1.0, 1.0, 1.0, 0.7]);
            assert_eq!(shade(c, -1.0), [0.0, 0.0, 0.0, 0.7]);
            let lighter = shade(c, 0.3);
            let darker = shade(c, -0.3);
            assert!(lighter[0] > c[0] && darker[0] < c[0]);
        }

        #[test]
        fn test_with_alpha_clamps() {
            assert_eq!(with_alpha(BALL, 2.0)[3], 1.0);
            assert_eq!(with_alpha(BALL, -0.5)[3], 0.0);
        }
    }
}
