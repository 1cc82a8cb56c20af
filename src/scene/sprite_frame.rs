//! Sprite frames and the name-keyed frame cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SpriteError;
use crate::math::Rect;

/// A region of a texture that a sprite can display.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteFrame {
    pub texture: PathBuf,
    /// Region inside the texture, in pixels.
    pub rect: Rect,
    /// The region is stored rotated 90 degrees in the atlas.
    pub rotated: bool,
}

impl SpriteFrame {
    /// Unrotated frame covering `rect`.
    pub fn new(texture: impl Into<PathBuf>, rect: Rect) -> Self {
        Self {
            texture: texture.into(),
            rect,
            rotated: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AtlasFile {
    #[serde(default, rename = "frame")]
    frames: Vec<AtlasFrame>,
}

#[derive(Debug, Deserialize)]
struct AtlasFrame {
    name: String,
    texture: PathBuf,
    rect: Rect,
    #[serde(default)]
    rotated: bool,
}

/// Sprite frames by name.
///
/// Frames are added directly or loaded from a TOML atlas:
///
/// ```toml
/// [[frame]]
/// name = "hero_idle.png"
/// texture = "characters.png"
/// rect = { x = 0.0, y = 0.0, width = 32.0, height = 48.0 }
/// ```
#[derive(Debug, Default)]
pub struct SpriteFrameCache {
    frames: HashMap<String, SpriteFrame>,
}

impl SpriteFrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a frame, replacing any frame with the same name.
    pub fn add_frame(&mut self, name: impl Into<String>, frame: SpriteFrame) {
        self.frames.insert(name.into(), frame);
    }

    pub fn frame(&self, name: &str) -> Option<&SpriteFrame> {
        self.frames.get(name)
    }

    pub fn remove_frame(&mut self, name: &str) -> Option<SpriteFrame> {
        self.frames.remove(name)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Parses an atlas document and adds its frames. Relative texture paths
    /// are resolved against `base_dir`. Returns the number of frames added.
    pub fn load_atlas_str(&mut self, source: &str, base_dir: &Path) -> Result<usize, SpriteError> {
        let atlas: AtlasFile = toml::from_str(source)?;
        let count = atlas.frames.len();
        for entry in atlas.frames {
            let texture = if entry.texture.is_relative() {
                base_dir.join(&entry.texture)
            } else {
                entry.texture
            };
            let frame = SpriteFrame {
                texture,
                rect: entry.rect,
                rotated: entry.rotated,
            };
            self.frames.insert(entry.name, frame);
        }
        log::debug!("Loaded {count} sprite frames");
        Ok(count)
    }

    /// Reads an atlas file and adds its frames.
    pub fn load_atlas(&mut self, path: &Path) -> Result<usize, SpriteError> {
        let source = std::fs::read_to_string(path).map_err(|source| SpriteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        self.load_atlas_str(&source, base_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ATLAS: &str = r#"
[[frame]]
name = "hero.png"
texture = "characters.png"
rect = { x = 0.0, y = 0.0, width = 32.0, height = 48.0 }

[[frame]]
name = "coin.png"
texture = "/abs/items.png"
rect = { x = 64.0, y = 0.0, width = 16.0, height = 16.0 }
rotated = true
"#;

    #[test]
    fn add_and_remove_frames() {
        let mut cache = SpriteFrameCache::new();
        assert!(cache.is_empty());

        cache.add_frame("a", SpriteFrame::new("a.png", Rect::from_size(8.0, 8.0)));
        assert_eq!(cache.len(), 1);
        assert!(cache.frame("a").is_some());
        assert!(cache.frame("b").is_none());

        assert!(cache.remove_frame("a").is_some());
        assert!(cache.is_empty());
    }

    #[test]
    fn load_atlas_resolves_paths() {
        let mut cache = SpriteFrameCache::new();
        let count = cache
            .load_atlas_str(ATLAS, Path::new("assets/sprites"))
            .unwrap();
        assert_eq!(count, 2);

        let hero = cache.frame("hero.png").unwrap();
        assert_eq!(hero.texture, Path::new("assets/sprites/characters.png"));
        assert_eq!(hero.rect.size(), crate::math::Vec2::new(32.0, 48.0));
        assert!(!hero.rotated);

        let coin = cache.frame("coin.png").unwrap();
        assert_eq!(coin.texture, Path::new("/abs/items.png"));
        assert!(coin.rotated);
        assert_eq!(coin.rect, Rect::new(64.0, 0.0, 16.0, 16.0));
    }

    #[test]
    fn load_atlas_rejects_bad_document() {
        let mut cache = SpriteFrameCache::new();
        let err = cache
            .load_atlas_str("[[frame]]\nname = 3\n", Path::new(""))
            .unwrap_err();
        assert!(matches!(err, SpriteError::Config(_)));
        assert!(cache.is_empty());
    }

    #[test]
    fn load_atlas_missing_file() {
        let mut cache = SpriteFrameCache::new();
        let err = cache
            .load_atlas(Path::new("definitely/not/here.toml"))
            .unwrap_err();
        assert!(matches!(err, SpriteError::Io { .. }));
    }
}
