//! Physics integration with [rapier](https://rapier.rs/).
//!
//! A sprite reads and writes its body through a [`PhysicsBackend`], which
//! fixes the unit and rotation conventions of the body table:
//!
//! - [`ScaledBackend`] — bodies live in meters; a pixels-per-meter (PTM)
//!   ratio converts to render units, angles map to degrees as-is.
//! - [`PixelBackend`] — bodies live in render units; angles are
//!   sign-inverted when mapped to node rotation.

mod pixel;
mod scaled;
mod world;

pub use pixel::PixelBackend;
pub use scaled::{ScaledBackend, DEFAULT_PTM_RATIO};
pub use world::PhysicsWorld2D;

pub use rapier2d;

use rapier2d::prelude::RigidBody;
use serde::Deserialize;

use crate::error::{SpriteError, SyncError};
use crate::math::Vec2;

/// Unit and rotation conventions of a body table.
///
/// Positions are in render units, rotations in node degrees (clockwise
/// positive). Implementations translate to the body's native representation.
pub trait PhysicsBackend {
    /// Short backend name for diagnostics.
    fn name(&self) -> &'static str;

    /// Checks backend-specific preconditions for reading or writing a body.
    fn check_ready(&self) -> Result<(), SyncError> {
        Ok(())
    }

    fn position(&self, body: &RigidBody) -> Vec2;

    fn set_position(&self, body: &mut RigidBody, position: Vec2);

    fn rotation(&self, body: &RigidBody) -> f32;

    fn set_rotation(&self, body: &mut RigidBody, degrees: f32);

    /// Pixels-per-meter ratio, if the backend has one.
    fn ptm_ratio(&self) -> Option<f32> {
        None
    }

    fn set_ptm_ratio(&mut self, _ratio: f32) -> Result<(), SpriteError> {
        Err(SpriteError::Unsupported("set_ptm_ratio", self.name()))
    }
}

/// Backend selection for configuration files and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Meter-scaled bodies with a PTM ratio.
    #[default]
    Scaled,
    /// Bodies in render units.
    Pixel,
}

/// The backend a sprite is bound to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backend {
    Scaled(ScaledBackend),
    Pixel(PixelBackend),
}

impl Backend {
    /// Scaled backend with the given PTM ratio.
    pub fn scaled(ptm_ratio: f32) -> Self {
        Self::Scaled(ScaledBackend::new(ptm_ratio))
    }

    pub fn pixel() -> Self {
        Self::Pixel(PixelBackend)
    }

    /// Builds a backend of `kind`. `ptm_ratio` is ignored for pixel bodies.
    pub fn from_kind(kind: BackendKind, ptm_ratio: f32) -> Self {
        match kind {
            BackendKind::Scaled => Self::scaled(ptm_ratio),
            BackendKind::Pixel => Self::pixel(),
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Scaled(_) => BackendKind::Scaled,
            Self::Pixel(_) => BackendKind::Pixel,
        }
    }

    fn inner(&self) -> &dyn PhysicsBackend {
        match self {
            Self::Scaled(b) => b,
            Self::Pixel(b) => b,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn PhysicsBackend {
        match self {
            Self::Scaled(b) => b,
            Self::Pixel(b) => b,
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::scaled(DEFAULT_PTM_RATIO)
    }
}

impl PhysicsBackend for Backend {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn check_ready(&self) -> Result<(), SyncError> {
        self.inner().check_ready()
    }

    fn position(&self, body: &RigidBody) -> Vec2 {
        self.inner().position(body)
    }

    fn set_position(&self, body: &mut RigidBody, position: Vec2) {
        self.inner().set_position(body, position)
    }

    fn rotation(&self, body: &RigidBody) -> f32 {
        self.inner().rotation(body)
    }

    fn set_rotation(&self, body: &mut RigidBody, degrees: f32) {
        self.inner().set_rotation(body, degrees)
    }

    fn ptm_ratio(&self) -> Option<f32> {
        self.inner().ptm_ratio()
    }

    fn set_ptm_ratio(&mut self, ratio: f32) -> Result<(), SpriteError> {
        self.inner_mut().set_ptm_ratio(ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_kind_selects_variant() {
        assert_eq!(
            Backend::from_kind(BackendKind::Scaled, 16.0),
            Backend::Scaled(ScaledBackend::new(16.0))
        );
        assert_eq!(Backend::from_kind(BackendKind::Pixel, 16.0), Backend::pixel());
        assert_eq!(Backend::pixel().kind(), BackendKind::Pixel);
    }

    #[test]
    fn default_backend_is_scaled() {
        let backend = Backend::default();
        assert_eq!(backend.kind(), BackendKind::Scaled);
        assert_eq!(backend.ptm_ratio(), Some(DEFAULT_PTM_RATIO));
    }

    #[test]
    fn ptm_ratio_only_on_scaled() {
        let mut scaled = Backend::scaled(32.0);
        scaled.set_ptm_ratio(64.0).unwrap();
        assert_eq!(scaled.ptm_ratio(), Some(64.0));

        let mut pixel = Backend::pixel();
        assert_eq!(pixel.ptm_ratio(), None);
        let err = pixel.set_ptm_ratio(64.0).unwrap_err();
        assert!(matches!(err, SpriteError::Unsupported("set_ptm_ratio", "pixel")));
    }
}
