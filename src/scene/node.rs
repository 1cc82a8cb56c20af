//! Base scene node and the render sink it draws into.

use std::path::PathBuf;

use crate::math::{node_affine, Affine2, Rect, Vec2};

/// One textured quad emitted by a traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDraw {
    pub name: Option<String>,
    pub texture: PathBuf,
    /// Source rectangle inside the texture, in pixels.
    pub rect: Rect,
    /// Whether the source rectangle is stored rotated 90 degrees in the atlas.
    pub rotated: bool,
    /// Node-to-world transform.
    pub transform: Affine2,
}

/// Receives draw calls during a scene traversal.
///
/// Implemented by the host renderer. The traversal only describes what to
/// draw; batching and GPU submission are the renderer's business.
pub trait Renderer {
    fn draw_sprite(&mut self, draw: &SpriteDraw);
}

/// Renderer that keeps every draw call, in traversal order.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub draws: Vec<SpriteDraw>,
}

impl Renderer for RecordingRenderer {
    fn draw_sprite(&mut self, draw: &SpriteDraw) {
        self.draws.push(draw.clone());
    }
}

/// Transform state shared by every visual node.
///
/// `rotation` is in degrees, positive clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: Option<String>,
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
    pub visible: bool,
    /// Draw order among siblings; lower values draw first.
    pub z_order: i32,
}

impl Node {
    pub fn new() -> Self {
        Self {
            name: None,
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            visible: true,
            z_order: 0,
        }
    }

    /// Set the node position.
    #[must_use]
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Transform from this node's space to its parent's space.
    pub fn local_transform(&self) -> Affine2 {
        node_affine(self.position, self.rotation, self.scale)
    }

    /// Transform from this node's space to world space.
    pub fn world_transform(&self, parent: Affine2) -> Affine2 {
        parent * self.local_transform()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_node_is_identity() {
        let node = Node::default();
        assert_eq!(node.local_transform(), Affine2::IDENTITY);
        assert!(node.visible);
    }

    #[test]
    fn world_transform_composes_parent() {
        let node = Node::new().with_position(Vec2::new(5.0, 0.0));
        let parent = Affine2::from_translation(Vec2::new(10.0, 10.0));
        let world = node.world_transform(parent);
        let origin = world.transform_point2(Vec2::ZERO);
        assert!((origin - Vec2::new(15.0, 10.0)).length() < 1e-5);
    }
}
