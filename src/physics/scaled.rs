//! Meter-scaled bodies.

use rapier2d::prelude::{Isometry, Real, RigidBody};

use super::PhysicsBackend;
use crate::error::{SpriteError, SyncError};
use crate::math::{vec2_from_na, vec2_to_na, Vec2};

/// Pixels per meter used when nothing else is configured.
pub const DEFAULT_PTM_RATIO: f32 = 32.0;

/// Bodies simulated in meters, shown in pixels.
///
/// Writes set the full body pose at once: a position write keeps the current
/// angle, a rotation write keeps the current translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledBackend {
    ptm_ratio: f32,
}

impl ScaledBackend {
    pub fn new(ptm_ratio: f32) -> Self {
        Self { ptm_ratio }
    }
}

impl Default for ScaledBackend {
    fn default() -> Self {
        Self::new(DEFAULT_PTM_RATIO)
    }
}

impl PhysicsBackend for ScaledBackend {
    fn name(&self) -> &'static str {
        "scaled"
    }

    fn check_ready(&self) -> Result<(), SyncError> {
        if self.ptm_ratio == 0.0 {
            return Err(SyncError::ZeroPtmRatio);
        }
        Ok(())
    }

    fn position(&self, body: &RigidBody) -> Vec2 {
        vec2_from_na(body.translation()) * self.ptm_ratio
    }

    fn set_position(&self, body: &mut RigidBody, position: Vec2) {
        let angle = body.rotation().angle();
        let translation = vec2_to_na(position / self.ptm_ratio);
        body.set_position(Isometry::new(translation, angle), true);
    }

    fn rotation(&self, body: &RigidBody) -> f32 {
        (body.rotation().angle() as f32).to_degrees()
    }

    fn set_rotation(&self, body: &mut RigidBody, degrees: f32) {
        let translation = *body.translation();
        body.set_position(
            Isometry::new(translation, degrees.to_radians() as Real),
            true,
        );
    }

    fn ptm_ratio(&self) -> Option<f32> {
        Some(self.ptm_ratio)
    }

    fn set_ptm_ratio(&mut self, ratio: f32) -> Result<(), SpriteError> {
        self.ptm_ratio = ratio;
        Ok(())
    }
}
