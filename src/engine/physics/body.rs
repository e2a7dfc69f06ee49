use rapier2d::prelude::*;

use super::PIXELS_PER_METER;
use crate::map::LineSegment;

/// Builder for rigid bodies with the configurations this demo needs
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    /// A dynamic body, affected by forces and collisions
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: Isometry::identity(),
            can_sleep: true,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// A fixed (static) body, completely immovable
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            position: Isometry::identity(),
            can_sleep: false,
            locked_axes: LockedAxes::empty(),
        }
    }

    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock rotation so the body keeps a fixed orientation
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Builder for colliders with the shapes this demo needs
pub struct ColliderBuilder2D {
    shape: SharedShape,
    friction: Real,
    restitution: Real,
    density: Real,
}

impl ColliderBuilder2D {
    /// A box collider from full extents in pixels
    pub fn pixel_box(width_px: Real, height_px: Real) -> Self {
        Self {
            shape: SharedShape::cuboid(
                width_px / 2.0 / PIXELS_PER_METER,
                height_px / 2.0 / PIXELS_PER_METER,
            ),
            friction: 0.5,
            restitution: 0.0,
            density: 1.0,
        }
    }

    /// A segment collider from world-pixel endpoints
    pub fn pixel_segment(start: [Real; 2], end: [Real; 2]) -> Self {
        Self {
            shape: SharedShape::segment(
                point![start[0] / PIXELS_PER_METER, start[1] / PIXELS_PER_METER],
                point![end[0] / PIXELS_PER_METER, end[1] / PIXELS_PER_METER],
            ),
            friction: 0.5,
            restitution: 0.0,
            density: 1.0,
        }
    }

    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    pub fn build(self) -> Collider {
        ColliderBuilder::new(self.shape)
            .friction(self.friction)
            .restitution(self.restitution)
            .density(self.density)
            .build()
    }
}

/// Body and collider configurations for the demo's objects
pub mod presets {
    use super::*;

    /// The player body: dynamic, fixed orientation, never sleeps
    pub fn pidgin_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .lock_rotation()
            .can_sleep(false)
            .build()
    }

    /// The player collider: a frictionless box sized in pixels
    pub fn pidgin_collider(width_px: Real, height_px: Real, density: Real) -> Collider {
        ColliderBuilder2D::pixel_box(width_px, height_px)
            .friction(0.0)
            .restitution(0.0)
            .density(density)
            .build()
    }

    /// The single static body carrying all map collision edges
    pub fn ground_body() -> RigidBody {
        BodyBuilder::new_fixed().build()
    }

    /// One merged collision edge as a segment collider
    pub fn edge_collider(segment: &LineSegment) -> Collider {
        ColliderBuilder2D::pixel_segment(
            [segment.start.x, segment.start.y],
            [segment.end.x, segment.end.y],
        )
        .friction(0.2)
        .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec2;

    #[test]
    fn test_pidgin_body_preset() {
        let body = presets::pidgin_body(1.0, 5.0);
        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert!(body.is_rotation_locked());
        assert_relative_eq!(body.translation().x, 1.0);
        assert_relative_eq!(body.translation().y, 5.0);
    }

    #[test]
    fn test_pidgin_collider_is_frictionless_box() {
        let collider = presets::pidgin_collider(32.0, 48.0, 0.1);
        assert_eq!(collider.friction(), 0.0);
        assert_eq!(collider.restitution(), 0.0);

        let cuboid = collider.shape().as_cuboid().unwrap();
        assert_relative_eq!(cuboid.half_extents.x, 16.0 / PIXELS_PER_METER);
        assert_relative_eq!(cuboid.half_extents.y, 24.0 / PIXELS_PER_METER);
    }

    #[test]
    fn test_edge_collider_scales_to_meters() {
        let segment = LineSegment::new(Vec2::new(0.0, 0.0), Vec2::new(120.0, 0.0));
        let collider = presets::edge_collider(&segment);

        let seg = collider.shape().as_segment().unwrap();
        assert_relative_eq!(seg.b.x - seg.a.x, 2.0);
    }

    #[test]
    fn test_ground_body_is_fixed() {
        let body = presets::ground_body();
        assert_eq!(body.body_type(), RigidBodyType::Fixed);
    }
}
