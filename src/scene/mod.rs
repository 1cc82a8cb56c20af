//! Scene graph nodes: the base node, sprites, and sprite frames.

mod node;
mod sprite;
mod sprite_frame;

pub use node::*;
pub use sprite::*;
pub use sprite_frame::*;
