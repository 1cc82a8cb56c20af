//! Error types for sprite construction and body synchronization.

use std::path::PathBuf;

use rapier2d::prelude::RigidBodyHandle;

/// Reasons a traversal could not pull the transform from the physics body.
///
/// None of these are fatal: the sprite keeps its previous transform and is
/// still drawn.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SyncError {
    /// No body handle is attached to the sprite.
    #[error("no physics body attached")]
    NoBody,
    /// The handle no longer resolves in the body set (body was removed).
    #[error("physics body {0:?} not found in body set")]
    BodyNotFound(RigidBodyHandle),
    /// The scaled backend has a zero pixels-per-meter ratio.
    #[error("PTM ratio is zero")]
    ZeroPtmRatio,
}

/// Errors returned by sprite factories and configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum SpriteError {
    /// A sprite-frame name was given as a non-string value.
    #[error("sprite frame name must be a string, got {0}")]
    FrameNameNotString(&'static str),
    /// The sprite-frame cache has no frame with this name.
    #[error("sprite frame not found: {0}")]
    FrameNotFound(String),
    /// Reading an image file failed.
    #[error("failed to read image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// Reading a config or atlas file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A config or atlas document could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    /// The configured pixels-per-meter ratio is zero, negative or not finite.
    #[error("PTM ratio must be positive, got {0}")]
    InvalidPtmRatio(f32),
    /// The operation is not available on the sprite's backend.
    #[error("{0} is not supported by the {1} backend")]
    Unsupported(&'static str, &'static str),
}
