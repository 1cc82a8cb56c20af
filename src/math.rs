//! Math type aliases and conversion helpers.
//!
//! Render space uses `glam` f32 types. Physics space uses rapier's
//! nalgebra types; the helpers below convert between the two.

use rapier2d::prelude::{Real, Vector};
use serde::Deserialize;

pub use glam::{Affine2, Vec2};

/// Converts a render-space `Vec2` to a rapier `Vector`.
pub fn vec2_to_na(v: Vec2) -> Vector<Real> {
    Vector::new(v.x as Real, v.y as Real)
}

/// Converts a rapier `Vector` to a render-space `Vec2`.
pub fn vec2_from_na(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x as f32, v.y as f32)
}

/// Axis-aligned rectangle in texture pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin covering `width` x `height`.
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// True when the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Builds a 2D affine transform from a node's scale, clockwise rotation in
/// degrees, and translation.
pub fn node_affine(position: Vec2, rotation_degrees: f32, scale: Vec2) -> Affine2 {
    Affine2::from_scale_angle_translation(scale, -rotation_degrees.to_radians(), position)
}
