//! Headless demo: drops a stack of physics sprites onto the ground and logs
//! their transforms frame by frame.

use std::path::PathBuf;

use clap::Parser;
use physics_sprite::physics::rapier2d::prelude::*;
use physics_sprite::{
    math::{Affine2, Rect, Vec2},
    Backend, BackendKind, PhysicsBackend, PhysicsSprite, PhysicsWorld2D, Renderer, SpriteConfig,
    SpriteDraw, SpriteFrameCache,
};

/// Body convention selection for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliBackend {
    /// Bodies in meters, converted with the PTM ratio.
    Scaled,
    /// Bodies in render units.
    Pixel,
}

impl From<CliBackend> for BackendKind {
    fn from(cli: CliBackend) -> Self {
        match cli {
            CliBackend::Scaled => BackendKind::Scaled,
            CliBackend::Pixel => BackendKind::Pixel,
        }
    }
}

#[derive(Debug, Parser)]
#[command(about = "Physics sprite demo")]
struct Args {
    /// Sprite config file.
    #[arg(long, default_value = "sprite_demo.toml")]
    config: PathBuf,

    /// Overrides the configured backend.
    #[arg(long, value_enum)]
    backend: Option<CliBackend>,

    /// Overrides the configured pixels-per-meter ratio.
    #[arg(long)]
    ptm_ratio: Option<f32>,

    /// Overrides the configured sprite-frame atlas.
    #[arg(long)]
    atlas: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Number of sprites in the stack.
    #[arg(long, default_value_t = 3)]
    count: usize,
}

/// Renderer that logs each draw call.
#[derive(Default)]
struct LogRenderer {
    draws: usize,
}

impl Renderer for LogRenderer {
    fn draw_sprite(&mut self, draw: &SpriteDraw) {
        self.draws += 1;
        let origin = draw.transform.transform_point2(Vec2::ZERO);
        log::trace!(
            "draw {} from {} at ({:.1}, {:.1})",
            draw.name.as_deref().unwrap_or("<unnamed>"),
            draw.texture.display(),
            origin.x,
            origin.y
        );
    }
}

const CRATE_SIZE: f32 = 32.0;

fn make_sprite(frames: &SpriteFrameCache, backend: Backend, index: usize) -> PhysicsSprite {
    let mut sprite = if frames.frame("crate.png").is_some() {
        PhysicsSprite::from_sprite_frame_name(frames, "crate.png", backend)
            .unwrap_or_else(|_| PhysicsSprite::new(backend))
    } else {
        PhysicsSprite::from_file_with_rect(
            "crate.png",
            Rect::from_size(CRATE_SIZE, CRATE_SIZE),
            backend,
        )
    };
    sprite.node.name = Some(format!("crate_{index}"));
    sprite
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = SpriteConfig::load_or_default(&args.config);
    if let Some(backend) = args.backend {
        config.backend = backend.into();
    }
    if let Some(ratio) = args.ptm_ratio {
        config.ptm_ratio = ratio;
    }
    if args.atlas.is_some() {
        config.atlas = args.atlas.clone();
    }
    if let Err(e) = config.validate() {
        log::error!("Invalid sprite config: {e}");
        std::process::exit(2);
    }

    let mut frames = SpriteFrameCache::new();
    if let Some(atlas) = &config.atlas {
        if let Err(e) = frames.load_atlas(atlas) {
            log::error!("Failed to load atlas: {e}");
        }
    }

    let backend = config.backend();
    // Scale from render units into the body table's units.
    let unit = match config.backend {
        BackendKind::Scaled => 1.0 / config.ptm_ratio,
        BackendKind::Pixel => 1.0,
    };
    log::info!(
        "Backend: {:?}, PTM ratio: {:?}",
        config.backend,
        backend.ptm_ratio()
    );

    let mut world = PhysicsWorld2D::from_config(&config);

    let ground = world.add_body(RigidBodyBuilder::fixed().build());
    world.add_collider(
        ColliderBuilder::cuboid(1000.0 * unit, 10.0 * unit).build(),
        ground,
    );

    let mut sprites = Vec::with_capacity(args.count);
    for i in 0..args.count {
        let mut sprite = make_sprite(&frames, backend, i);
        let half = sprite.rect().size() * 0.5 * unit;
        let handle = world.add_body(RigidBodyBuilder::dynamic().build());
        world.add_collider(ColliderBuilder::cuboid(half.x, half.y).build(), handle);
        sprite.set_body(Some(handle));

        // Place through the sprite, in render units.
        let start = Vec2::new(i as f32 * 4.0, 64.0 + i as f32 * (CRATE_SIZE + 4.0));
        sprite.set_position(&mut world.bodies, start);
        sprite.set_rotation(&mut world.bodies, i as f32 * 10.0);
        sprites.push(sprite);
    }

    let mut renderer = LogRenderer::default();
    for frame in 0..args.frames {
        world.step();
        for sprite in &mut sprites {
            let _ = sprite.visit(&world.bodies, &mut renderer, Affine2::IDENTITY);
        }
        if frame % 30 == 0 {
            for sprite in &sprites {
                let node = sprite.node();
                log::info!(
                    "frame {frame}: {} at ({:.1}, {:.1}) rot {:.1}",
                    node.name.as_deref().unwrap_or("<unnamed>"),
                    node.position.x,
                    node.position.y,
                    node.rotation
                );
            }
        }
    }

    log::info!(
        "Simulated {} frames, {} draw calls",
        args.frames,
        renderer.draws
    );
}
