//! Textured sprite node.

use std::path::{Path, PathBuf};

use crate::error::SpriteError;
use crate::math::{Affine2, Rect};

use super::{Node, Renderer, SpriteDraw, SpriteFrame};

/// A node that draws a region of a texture, plus child sprites.
#[derive(Debug, Clone, Default)]
pub struct Sprite {
    pub node: Node,
    texture: Option<PathBuf>,
    rect: Rect,
    rotated: bool,
    children: Vec<Sprite>,
}

impl Sprite {
    /// Sprite with no texture. Draws nothing itself, but still visits children.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sprite showing the whole image at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SpriteError> {
        let path = path.as_ref();
        let (width, height) =
            image::image_dimensions(path).map_err(|source| SpriteError::Image {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_file_with_rect(
            path,
            Rect::from_size(width as f32, height as f32),
        ))
    }

    /// Sprite showing `rect` of the image at `path`. The file is not read.
    pub fn from_file_with_rect(path: impl Into<PathBuf>, rect: Rect) -> Self {
        Self {
            texture: Some(path.into()),
            rect,
            ..Self::default()
        }
    }

    pub fn from_frame(frame: &SpriteFrame) -> Self {
        let mut sprite = Self::new();
        sprite.set_frame(frame);
        sprite
    }

    /// Switches the displayed texture region to `frame`.
    pub fn set_frame(&mut self, frame: &SpriteFrame) {
        self.texture = Some(frame.texture.clone());
        self.rect = frame.rect;
        self.rotated = frame.rotated;
    }

    pub fn texture(&self) -> Option<&Path> {
        self.texture.as_deref()
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn add_child(&mut self, child: Sprite) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Sprite] {
        &self.children
    }

    /// Draws this sprite and its children, children ordered by `z_order`.
    /// A sprite with an empty rect draws nothing itself.
    pub fn visit(&self, renderer: &mut dyn Renderer, parent: Affine2) {
        if !self.node.visible {
            return;
        }
        let world = self.node.world_transform(parent);

        if let Some(texture) = self.texture.as_ref().filter(|_| !self.rect.is_empty()) {
            renderer.draw_sprite(&SpriteDraw {
                name: self.node.name.clone(),
                texture: texture.clone(),
                rect: self.rect,
                rotated: self.rotated,
                transform: world,
            });
        }

        let mut order: Vec<&Sprite> = self.children.iter().collect();
        order.sort_by_key(|child| child.node.z_order);
        for child in order {
            child.visit(renderer, world);
        }
    }
}
