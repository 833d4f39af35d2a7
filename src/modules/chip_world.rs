/*
One rapier2d simulation world per chip.

Each world is fully independent: its own pipeline, broad/narrow phase,
body and collider sets. It holds exactly two bodies, a fixed ground slab
and the dynamic chip.

World coordinates are y-up (gravity is negative), unlike macroquad's
screen space. screen_map.rs does the flip.
*/

use crate::modules::settings::PhysicsSettings;
use macroquad::prelude::Vec2;
// Import Rapier2D physics engine - provides 2D rigid body physics simulation
use rapier2d::prelude::*;

pub struct ChipWorld {
    index: usize,
    gravity: Vector<Real>,
    integration_params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    chip: RigidBodyHandle,
}

impl ChipWorld {
    /// Build world `index` with its ground and a chip offset by `index` world spacings.
    pub fn new(index: usize, physics: &PhysicsSettings, dt: f32) -> Self {
        let gravity = vector![physics.gravity[0], physics.gravity[1]];

        // Only the timestep is overridden; rapier's solver iteration counts are fixed defaults
        let integration_params = IntegrationParameters {
            dt,
            ..Default::default()
        };

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        // ---------------- Ground ------------------------------------------------
        // Fixed body with infinite mass, a wide slab under every chip
        let ground_body = RigidBodyBuilder::fixed()
            .translation(vector![physics.ground_position[0], physics.ground_position[1]])
            .build();
        let ground_collider = ColliderBuilder::cuboid(
            physics.ground_half_extents[0],
            physics.ground_half_extents[1],
        )
        .density(0.0)
        .build();
        let gh = bodies.insert(ground_body);
        colliders.insert_with_parent(ground_collider, gh, &mut bodies);

        // ---------------- Chip --------------------------------------------------
        let x = physics.chip_start_x + physics.world_spacing * index as f32;
        let chip_body = RigidBodyBuilder::dynamic()
            .translation(vector![x, physics.chip_start_y])
            .build();

        // restitution close to 1 keeps the chip bouncing off the ground
        let chip_collider = ColliderBuilder::ball(physics.chip_radius)
            .density(physics.chip_density)
            .friction(physics.chip_friction)
            .restitution(physics.chip_restitution)
            .build();
        let chip = bodies.insert(chip_body);
        // Attaching the collider gives the chip its mass, so the impulse below has an effect
        colliders.insert_with_parent(chip_collider, chip, &mut bodies);

        if let Some(body) = bodies.get_mut(chip) {
            body.apply_impulse(
                vector![physics.initial_impulse[0], physics.initial_impulse[1]],
                true,
            );
        }

        log::debug!("Chip world {} created, chip at ({}, {})", index, x, physics.chip_start_y);

        Self {
            index,
            gravity,
            integration_params,
            pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies,
            colliders,
            joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            chip,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Advance this world by one fixed timestep.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,
            &(),
            &(),
        );
    }

    /// Position of the chip body, or `None` if the world has lost it.
    pub fn chip_position(&self) -> Option<Vec2> {
        self.bodies.get(self.chip).map(|body| {
            let pos = body.translation();
            Vec2::new(pos.x, pos.y)
        })
    }

    #[cfg(test)]
    pub(crate) fn chip_velocity(&self) -> Option<Vec2> {
        self.bodies.get(self.chip).map(|body| {
            let vel = body.linvel();
            Vec2::new(vel.x, vel.y)
        })
    }

    #[cfg(test)]
    pub(crate) fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn dynamic_body_count(&self) -> usize {
        self.bodies.iter().filter(|(_, b)| b.is_dynamic()).count()
    }

    pub fn fixed_body_count(&self) -> usize {
        self.bodies.iter().filter(|(_, b)| b.is_fixed()).count()
    }

    #[cfg(test)]
    pub(crate) fn remove_chip(&mut self) {
        self.bodies.remove(
            self.chip,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.joints,
            &mut self.multibody_joints,
            true,
        );
    }
}
