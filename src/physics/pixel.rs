//! Bodies simulated directly in render units.

use rapier2d::prelude::{Real, RigidBody, Rotation};

use super::PhysicsBackend;
use crate::math::{vec2_from_na, vec2_to_na, Vec2};

/// Bodies whose translation is already in render units.
///
/// The body angle runs counter-clockwise while node rotation runs
/// clockwise, so angles are negated in both directions. Translation and
/// rotation are written independently of each other.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelBackend;

impl PhysicsBackend for PixelBackend {
    fn name(&self) -> &'static str {
        "pixel"
    }

    fn position(&self, body: &RigidBody) -> Vec2 {
        vec2_from_na(body.translation())
    }

    fn set_position(&self, body: &mut RigidBody, position: Vec2) {
        body.set_translation(vec2_to_na(position), true);
    }

    fn rotation(&self, body: &RigidBody) -> f32 {
        -(body.rotation().angle() as f32).to_degrees()
    }

    fn set_rotation(&self, body: &mut RigidBody, degrees: f32) {
        body.set_rotation(Rotation::new(-degrees.to_radians() as Real), true);
    }
}
