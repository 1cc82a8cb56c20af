//! # Physics Sprite
//!
//! Scene-graph sprites whose position and rotation are driven by rapier 2D
//! rigid bodies.
//!
//! # Features
//! - [`PhysicsSprite`]: a sprite bound to a body handle, synced on every
//!   [`visit`](PhysicsSprite::visit)
//! - Two body conventions behind one [`PhysicsBackend`] trait: meter-scaled
//!   bodies with a PTM ratio, and bodies in render units
//! - Minimal base scene types ([`Node`], [`Sprite`], [`SpriteFrameCache`])
//! - TOML configuration via [`SpriteConfig`]

pub mod config;
pub mod error;
pub mod math;
pub mod physics;
mod physics_sprite;
pub mod scene;

pub use config::SpriteConfig;
pub use error::{SpriteError, SyncError};
pub use physics::{
    Backend, BackendKind, PhysicsBackend, PhysicsWorld2D, PixelBackend, ScaledBackend,
    DEFAULT_PTM_RATIO,
};
pub use physics_sprite::PhysicsSprite;
pub use scene::{
    Node, RecordingRenderer, Renderer, Sprite, SpriteDraw, SpriteFrame, SpriteFrameCache,
};
