//! Owner of the rapier body table that sprites hold handles into.

use rapier2d::prelude::*;

use crate::config::SpriteConfig;

use super::BackendKind;

/// Standard gravity in meters per second squared.
pub const STANDARD_GRAVITY: Real = 9.81;

/// Rapier simulation state in the units of one sprite backend.
///
/// Scaled worlds simulate in meters. Pixel worlds simulate in render units,
/// so their gravity is scaled by the PTM ratio.
///
/// Sprites only keep [`RigidBodyHandle`]s. The bodies live in
/// [`bodies`](Self::bodies) and leave it only through
/// [`remove_body`](Self::remove_body); a sprite still holding the handle
/// then reports the body as missing.
pub struct PhysicsWorld2D {
    kind: BackendKind,
    pub gravity: Vector<Real>,
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    queries: QueryPipeline,
}

impl PhysicsWorld2D {
    /// Empty world in the units of `kind`. `ptm_ratio` only matters for
    /// pixel worlds, where it converts gravity into render units.
    pub fn for_backend(kind: BackendKind, ptm_ratio: f32) -> Self {
        let down = match kind {
            BackendKind::Scaled => STANDARD_GRAVITY,
            BackendKind::Pixel => STANDARD_GRAVITY * ptm_ratio as Real,
        };
        let mut params = IntegrationParameters::default();
        if kind == BackendKind::Pixel {
            // Contact tolerances are expressed in simulation units.
            params.length_unit = ptm_ratio as Real;
        }
        Self {
            kind,
            gravity: vector![0.0, -down],
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            params,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            queries: QueryPipeline::new(),
        }
    }

    pub fn from_config(config: &SpriteConfig) -> Self {
        Self::for_backend(config.backend, config.ptm_ratio)
    }

    /// Body convention this world was built for.
    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    /// Advances the simulation by one fixed timestep.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            Some(&mut self.queries),
            &(),
            &(),
        );
    }

    pub fn add_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.bodies.insert(body)
    }

    /// Attaches `collider` to the body at `parent`.
    pub fn add_collider(&mut self, collider: Collider, parent: RigidBodyHandle) -> ColliderHandle {
        self.colliders
            .insert_with_parent(collider, parent, &mut self.bodies)
    }

    /// Removes a body together with its colliders and joints.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) -> Option<RigidBody> {
        let removed = self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        if removed.is_none() {
            log::debug!("remove_body: {handle:?} was already gone");
        }
        removed
    }
}

impl Default for PhysicsWorld2D {
    /// Meter-scaled world, matching [`Backend::default`](super::Backend).
    fn default() -> Self {
        Self::for_backend(BackendKind::Scaled, super::DEFAULT_PTM_RATIO)
    }
}
