//! Sprites whose transform follows a rapier body.

use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use rapier2d::prelude::{RigidBody, RigidBodyHandle, RigidBodySet};

use crate::error::{SpriteError, SyncError};
use crate::math::{Affine2, Rect, Vec2};
use crate::physics::{Backend, PhysicsBackend};
use crate::scene::{Node, Renderer, Sprite, SpriteFrame, SpriteFrameCache};

/// A sprite driven by a physics body.
///
/// The sprite holds a [`RigidBodyHandle`] into a body set it does not own.
/// Every [`visit`](Self::visit) copies the body's position and, unless
/// [`ignore_body_rotation`](Self::ignore_body_rotation) is set, its rotation
/// into the node before drawing. Position and rotation writes go to the body,
/// so the sprite can also be used to place bodies.
///
/// When no usable body is available (none attached, handle removed from the
/// set, or a zero PTM ratio on the scaled backend) the node keeps its current
/// transform and a warning is logged on each traversal.
#[derive(Debug, Clone)]
pub struct PhysicsSprite {
    sprite: Sprite,
    body: Option<RigidBodyHandle>,
    backend: Backend,
    ignore_body_rotation: bool,
}

impl PhysicsSprite {
    /// Sprite without a texture.
    pub fn new(backend: Backend) -> Self {
        Self::from_sprite(Sprite::new(), backend)
    }

    /// Wraps an existing sprite.
    pub fn from_sprite(sprite: Sprite, backend: Backend) -> Self {
        Self {
            sprite,
            body: None,
            backend,
            ignore_body_rotation: false,
        }
    }

    /// Sprite showing the whole image at `path`.
    pub fn from_file(path: impl AsRef<Path>, backend: Backend) -> Result<Self, SpriteError> {
        match Sprite::from_file(path) {
            Ok(sprite) => Ok(Self::from_sprite(sprite, backend)),
            Err(e) => {
                log::error!("PhysicsSprite::from_file failed: {e}");
                Err(e)
            }
        }
    }

    /// Sprite showing `rect` of the image at `path`.
    ///
    /// Unlike [`from_file`](Self::from_file) the image is not opened, since
    /// the rect already gives the size. A missing file is only noticed by
    /// the renderer that loads the texture.
    pub fn from_file_with_rect(path: impl Into<PathBuf>, rect: Rect, backend: Backend) -> Self {
        Self::from_sprite(Sprite::from_file_with_rect(path, rect), backend)
    }

    pub fn from_sprite_frame(frame: &SpriteFrame, backend: Backend) -> Self {
        Self::from_sprite(Sprite::from_frame(frame), backend)
    }

    /// Sprite showing the cached frame called `name`.
    pub fn from_sprite_frame_name(
        cache: &SpriteFrameCache,
        name: &str,
        backend: Backend,
    ) -> Result<Self, SpriteError> {
        match cache.frame(name) {
            Some(frame) => Ok(Self::from_sprite_frame(frame, backend)),
            None => {
                let err = SpriteError::FrameNotFound(name.to_string());
                log::error!("PhysicsSprite::from_sprite_frame_name: {err}");
                Err(err)
            }
        }
    }

    /// Like [`from_sprite_frame_name`](Self::from_sprite_frame_name), for
    /// names coming from untyped data such as scene files. Only string
    /// values are accepted.
    pub fn from_sprite_frame_value(
        cache: &SpriteFrameCache,
        name: &toml::Value,
        backend: Backend,
    ) -> Result<Self, SpriteError> {
        match name {
            toml::Value::String(name) => Self::from_sprite_frame_name(cache, name, backend),
            other => {
                let err = SpriteError::FrameNameNotString(other.type_str());
                log::error!("PhysicsSprite::from_sprite_frame_value: {err}");
                Err(err)
            }
        }
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    pub fn node(&self) -> &Node {
        &self.sprite.node
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn body(&self) -> Option<RigidBodyHandle> {
        self.body
    }

    /// Attaches (or with `None`, detaches) a body. The handle is not checked
    /// against any body set.
    pub fn set_body(&mut self, body: Option<RigidBodyHandle>) {
        self.body = body;
    }

    /// Pixels-per-meter ratio; `None` on the pixel backend.
    pub fn ptm_ratio(&self) -> Option<f32> {
        self.backend.ptm_ratio()
    }

    pub fn set_ptm_ratio(&mut self, ratio: f32) -> Result<(), SpriteError> {
        self.backend.set_ptm_ratio(ratio)
    }

    pub fn ignore_body_rotation(&self) -> bool {
        self.ignore_body_rotation
    }

    /// When set, the node's own rotation is authoritative and the body angle
    /// is neither read nor written.
    pub fn set_ignore_body_rotation(&mut self, ignore: bool) {
        self.ignore_body_rotation = ignore;
    }

    /// Node rotation in radians.
    ///
    /// Derived from the node on every call, so it cannot drift from writes
    /// made through [`sprite_mut`](Self::sprite_mut) or `DerefMut`.
    pub fn cached_rotation_radians(&self) -> f32 {
        self.sprite.node.rotation.to_radians()
    }

    fn resolve<'b>(&self, bodies: &'b RigidBodySet) -> Result<&'b RigidBody, SyncError> {
        let handle = self.body.ok_or(SyncError::NoBody)?;
        self.backend.check_ready()?;
        bodies.get(handle).ok_or(SyncError::BodyNotFound(handle))
    }

    fn resolve_mut<'b>(
        &self,
        bodies: &'b mut RigidBodySet,
    ) -> Result<&'b mut RigidBody, SyncError> {
        let handle = self.body.ok_or(SyncError::NoBody)?;
        self.backend.check_ready()?;
        bodies.get_mut(handle).ok_or(SyncError::BodyNotFound(handle))
    }

    /// Position in render units, read from the body when one is usable.
    pub fn position(&self, bodies: &RigidBodySet) -> Vec2 {
        match self.resolve(bodies) {
            Ok(body) => self.backend.position(body),
            Err(_) => self.sprite.node.position,
        }
    }

    /// Moves the node and its body to `position` (render units).
    pub fn set_position(&mut self, bodies: &mut RigidBodySet, position: Vec2) {
        self.sprite.node.position = position;
        match self.resolve_mut(bodies) {
            Ok(body) => self.backend.set_position(body, position),
            Err(SyncError::NoBody) => {}
            Err(e) => log::warn!("PhysicsSprite::set_position: body not updated, {e}"),
        }
    }

    /// Rotation in degrees, clockwise positive.
    pub fn rotation(&self, bodies: &RigidBodySet) -> f32 {
        if self.ignore_body_rotation {
            return self.sprite.node.rotation;
        }
        match self.resolve(bodies) {
            Ok(body) => self.backend.rotation(body),
            Err(_) => self.sprite.node.rotation,
        }
    }

    /// Rotates the node to `degrees`, and the body too unless body rotation
    /// is ignored.
    pub fn set_rotation(&mut self, bodies: &mut RigidBodySet, degrees: f32) {
        self.sprite.node.rotation = degrees;
        if self.ignore_body_rotation {
            return;
        }
        match self.resolve_mut(bodies) {
            Ok(body) => self.backend.set_rotation(body, degrees),
            Err(SyncError::NoBody) => {}
            Err(e) => log::warn!("PhysicsSprite::set_rotation: body not updated, {e}"),
        }
    }

    /// Copies the body transform into the node.
    pub fn sync_from_body(&mut self, bodies: &RigidBodySet) -> Result<(), SyncError> {
        let body = self.resolve(bodies)?;
        let position = self.backend.position(body);
        let rotation = (!self.ignore_body_rotation).then(|| self.backend.rotation(body));

        self.sprite.node.position = position;
        if let Some(rotation) = rotation {
            self.sprite.node.rotation = rotation;
        }
        Ok(())
    }

    /// Per-frame traversal: syncs from the body, then draws the sprite tree.
    ///
    /// A failed sync is logged and returned, but drawing still happens with
    /// the node's existing transform.
    pub fn visit(
        &mut self,
        bodies: &RigidBodySet,
        renderer: &mut dyn Renderer,
        parent: Affine2,
    ) -> Result<(), SyncError> {
        let status = self.sync_from_body(bodies);
        if let Err(e) = &status {
            log::warn!(
                "PhysicsSprite {:?}: transform not synced, {e}",
                self.sprite.node.name.as_deref().unwrap_or("<unnamed>")
            );
        }
        self.sprite.visit(renderer, parent);
        status
    }
}

impl Deref for PhysicsSprite {
    type Target = Sprite;

    fn deref(&self) -> &Sprite {
        &self.sprite
    }
}

impl DerefMut for PhysicsSprite {
    fn deref_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}

impl Default for PhysicsSprite {
    fn default() -> Self {
        Self::new(Backend::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::RecordingRenderer;
    use rapier2d::prelude::{nalgebra, vector, RigidBodyBuilder};

    fn bodies_with(x: f32, y: f32, angle: f32) -> (RigidBodySet, RigidBodyHandle) {
        let mut bodies = RigidBodySet::new();
        let handle = bodies.insert(
            RigidBodyBuilder::dynamic()
                .translation(vector![x, y])
                .rotation(angle)
                .build(),
        );
        (bodies, handle)
    }

    fn textured(backend: Backend) -> PhysicsSprite {
        PhysicsSprite::from_file_with_rect("crate.png", Rect::from_size(32.0, 32.0), backend)
    }

    #[test]
    fn sync_copies_scaled_position() {
        let (bodies, handle) = bodies_with(10.0, 5.0, 0.0);
        let mut sprite = textured(Backend::scaled(32.0));
        sprite.set_body(Some(handle));

        sprite.sync_from_body(&bodies).unwrap();
        assert_eq!(sprite.node().position, Vec2::new(320.0, 160.0));
    }

    #[test]
    fn sync_without_body_keeps_transform() {
        let bodies = RigidBodySet::new();
        let mut sprite = textured(Backend::pixel());
        sprite.sprite_mut().node.position = Vec2::new(1.0, 2.0);
        sprite.sprite_mut().node.rotation = 15.0;

        assert_eq!(sprite.sync_from_body(&bodies), Err(SyncError::NoBody));
        assert_eq!(sprite.node().position, Vec2::new(1.0, 2.0));
        assert_eq!(sprite.node().rotation, 15.0);
    }

    #[test]
    fn zero_ratio_skips_sync() {
        let (bodies, handle) = bodies_with(10.0, 5.0, 1.0);
        let mut sprite = textured(Backend::scaled(0.0));
        sprite.set_body(Some(handle));

        assert_eq!(sprite.sync_from_body(&bodies), Err(SyncError::ZeroPtmRatio));
        assert_eq!(sprite.node().position, Vec2::ZERO);
    }

    #[test]
    fn removed_body_is_reported() {
        let mut world = crate::physics::PhysicsWorld2D::default();
        let handle = world.add_body(RigidBodyBuilder::dynamic().build());
        let mut sprite = textured(Backend::pixel());
        sprite.set_body(Some(handle));
        world.remove_body(handle);

        assert_eq!(
            sprite.sync_from_body(&world.bodies),
            Err(SyncError::BodyNotFound(handle))
        );
    }

    #[test]
    fn ignored_rotation_uses_cached_value() {
        let (mut bodies, handle) = bodies_with(0.0, 0.0, 0.3);
        let mut sprite = textured(Backend::scaled(32.0));
        sprite.set_body(Some(handle));
        sprite.set_ignore_body_rotation(true);

        sprite.set_rotation(&mut bodies, 90.0);
        assert_eq!(sprite.rotation(&bodies), 90.0);
        assert!((sprite.cached_rotation_radians() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        // Body angle untouched.
        assert!((bodies[handle].rotation().angle() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn cached_rotation_follows_direct_node_writes() {
        let (mut bodies, handle) = bodies_with(0.0, 0.0, 0.3);
        let mut sprite = textured(Backend::pixel());
        sprite.set_body(Some(handle));
        sprite.set_ignore_body_rotation(true);

        sprite.sprite_mut().node.rotation = 45.0;
        assert!((sprite.cached_rotation_radians() - std::f32::consts::FRAC_PI_4).abs() < 1e-6);

        sprite.node.rotation = -90.0;
        assert!((sprite.cached_rotation_radians() + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(sprite.rotation(&bodies), -90.0);

        sprite.sync_from_body(&bodies).unwrap();
        assert_eq!(sprite.node().rotation, -90.0);
        sprite.set_position(&mut bodies, Vec2::new(4.0, 4.0));
        assert!((bodies[handle].rotation().angle() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn derefs_to_base_sprite() {
        let mut sprite = textured(Backend::default());
        sprite.node.name = Some("crate".to_string());

        assert_eq!(sprite.rect(), Rect::from_size(32.0, 32.0));
        assert_eq!(sprite.texture(), Some(Path::new("crate.png")));
        assert_eq!(sprite.sprite().node.name.as_deref(), Some("crate"));
    }

    #[test]
    fn from_file_with_rect_does_not_open_the_file() {
        let sprite = PhysicsSprite::from_file_with_rect(
            "definitely/missing.png",
            Rect::from_size(8.0, 8.0),
            Backend::pixel(),
        );
        assert_eq!(sprite.texture(), Some(Path::new("definitely/missing.png")));
        assert_eq!(sprite.rect(), Rect::from_size(8.0, 8.0));
    }

    #[test]
    fn set_position_without_body_moves_node() {
        let mut bodies = RigidBodySet::new();
        let mut sprite = PhysicsSprite::default();
        sprite.set_position(&mut bodies, Vec2::new(5.0, 6.0));
        assert_eq!(sprite.position(&bodies), Vec2::new(5.0, 6.0));
    }

    #[test]
    fn visit_draws_even_when_sync_fails() {
        let bodies = RigidBodySet::new();
        let mut sprite = textured(Backend::default());
        let mut renderer = RecordingRenderer::default();

        let status = sprite.visit(&bodies, &mut renderer, Affine2::IDENTITY);
        assert_eq!(status, Err(SyncError::NoBody));
        assert_eq!(renderer.draws.len(), 1);
    }

    #[test]
    fn from_sprite_frame_value_rejects_non_strings() {
        let cache = SpriteFrameCache::new();
        let err = PhysicsSprite::from_sprite_frame_value(
            &cache,
            &toml::Value::Integer(42),
            Backend::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SpriteError::FrameNameNotString("integer")));
    }
}
