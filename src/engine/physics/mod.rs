// Physics orchestration over rapier2d

pub mod body;
mod world;

pub use body::{presets, BodyBuilder, ColliderBuilder2D};
pub use world::PhysicsWorld;

// Re-export commonly used rapier types for convenience
pub use rapier2d::prelude::{ColliderHandle, Real, RigidBodyHandle, SharedShape, Vector};

/// Rapier works best with small values; using pixels directly makes speeds
/// and accelerations feel wrong. World units are meters, rendering is pixels.
pub const PIXELS_PER_METER: f32 = 60.0;
