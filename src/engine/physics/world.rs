use rapier2d::prelude::*;
use std::num::NonZeroUsize;

/// Fixed physics timestep, 60 updates per second
pub const TIMESTEP: Real = 1.0 / 60.0;

/// Solver iterations per step
const SOLVER_ITERATIONS: usize = 3;

/// Owns the rapier simulation state. All bodies live here and advance
/// through `step`; the solver, broad phase, and narrow phase are rapier's.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
}

impl PhysicsWorld {
    /// Create a world with the given gravity y component (negative = down).
    pub fn new(gravity_y: Real) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = TIMESTEP;
        integration_parameters.num_solver_iterations =
            NonZeroUsize::new(SOLVER_ITERATIONS).unwrap();

        Self {
            gravity: vector![0.0, gravity_y],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
        }
    }

    /// Advance the simulation by one fixed timestep.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    pub fn body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    pub fn body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    pub fn collider_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.collider_set.get_mut(handle)
    }

    /// Swap gravity at runtime; takes effect on the next step.
    pub fn set_gravity(&mut self, gravity_y: Real) {
        self.gravity = vector![0.0, gravity_y];
    }

    pub fn gravity_y(&self) -> Real {
        self.gravity.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::presets;

    #[test]
    fn test_gravity_pulls_bodies_down() {
        let mut world = PhysicsWorld::new(-10.0);
        let handle = world.add_rigid_body(presets::pidgin_body(0.0, 10.0));
        let collider = presets::pidgin_collider(32.0, 48.0, 0.1);
        world.add_collider(collider, handle);

        for _ in 0..10 {
            world.step();
        }

        let body = world.body(handle).unwrap();
        assert!(body.translation().y < 10.0);
        assert!(body.linvel().y < 0.0);
    }

    #[test]
    fn test_set_gravity() {
        let mut world = PhysicsWorld::new(-10.0);
        assert_eq!(world.gravity_y(), -10.0);
        world.set_gravity(-5.0);
        assert_eq!(world.gravity_y(), -5.0);
    }

    #[test]
    fn test_segment_floor_stops_fall() {
        use crate::map::LineSegment;
        use glam::Vec2;

        let mut world = PhysicsWorld::new(-10.0);

        let ground = world.add_rigid_body(presets::ground_body());
        let floor = LineSegment::new(Vec2::new(0.0, 0.0), Vec2::new(600.0, 0.0));
        world.add_collider(presets::edge_collider(&floor), ground);

        let handle = world.add_rigid_body(presets::pidgin_body(1.0, 1.0));
        world.add_collider(presets::pidgin_collider(32.0, 48.0, 0.1), handle);

        for _ in 0..300 {
            world.step();
        }

        // Settled on the floor instead of falling through
        let body = world.body(handle).unwrap();
        assert!(body.translation().y > 0.0);
        assert!(body.linvel().y.abs() < 0.1);
    }
}
