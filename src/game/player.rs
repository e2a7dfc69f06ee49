// The pidgin: body lifecycle and per-tick move semantics

use glam::Vec2;
use rapier2d::prelude::{nalgebra, vector, SharedShape};

use super::tuning::Tuning;
use crate::engine::physics::{
    presets, ColliderHandle, PhysicsWorld, RigidBodyHandle, PIXELS_PER_METER,
};
use crate::map::TileMap;

/// Horizontal impulse per tick while steering manually
const MOVE_IMPULSE: f32 = 0.05;

/// Forward force while auto-running below the target speed
const RUN_FORCE: f32 = 1.0;

/// A jump is only allowed while vertical velocity is this close to zero
const JUMP_REST_EPSILON: f32 = 1e-4;

/// Movement flags for one tick, derived fresh from input every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct Moves {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub crouch: bool,
}

/// The player body and its crouch-swappable box collider
pub struct Player {
    body: RigidBodyHandle,
    collider: ColliderHandle,
    pub facing_right: bool,
    pub crouching: bool,
    /// Spawn point in meters
    spawn: Vec2,
}

impl Player {
    /// Create the player body one meter under the map's top edge, so it
    /// starts inside the boundary edges and falls onto the terrain.
    pub fn spawn(physics: &mut PhysicsWorld, map: &TileMap, tuning: &Tuning) -> Self {
        let spawn = Vec2::new(1.0, map.pixel_height() / PIXELS_PER_METER - 1.0);
        let body = physics.add_rigid_body(presets::pidgin_body(spawn.x, spawn.y));
        let collider = physics.add_collider(
            presets::pidgin_collider(tuning.width, tuning.height, tuning.density),
            body,
        );
        Self {
            body,
            collider,
            facing_right: true,
            crouching: false,
            spawn,
        }
    }

    /// Apply one tick of movement to the physics body.
    pub fn apply_moves(&mut self, physics: &mut PhysicsWorld, tuning: &Tuning, moves: Moves) {
        self.crouching = moves.crouch;

        // The collider is rebuilt every tick: crouching halves the box and
        // the width/height keys may have changed it since last tick. Mass
        // follows from density automatically.
        let half_width = tuning.width / 2.0 / PIXELS_PER_METER;
        let half_height = if self.crouching {
            tuning.height / 2.0 / 2.0 / PIXELS_PER_METER
        } else {
            tuning.height / 2.0 / PIXELS_PER_METER
        };
        if let Some(collider) = physics.collider_mut(self.collider) {
            collider.set_shape(SharedShape::cuboid(half_width, half_height));
            if collider.density() != tuning.density {
                collider.set_density(tuning.density);
            }
        }

        let Some(body) = physics.body_mut(self.body) else {
            return;
        };

        if !tuning.auto_run && moves.right {
            body.apply_impulse(vector![MOVE_IMPULSE, 0.0], true);
            self.facing_right = true;
        } else if !tuning.auto_run && moves.left {
            body.apply_impulse(vector![-MOVE_IMPULSE, 0.0], true);
            self.facing_right = false;
        }

        if moves.jump && body.linvel().y.abs() < JUMP_REST_EPSILON {
            body.apply_impulse(vector![0.0, tuning.jump_velocity], true);
        }

        // Forces persist across steps in rapier; reset first so the push
        // only acts for this tick
        body.reset_forces(true);
        if tuning.auto_run && body.linvel().x < tuning.move_speed {
            body.add_force(vector![RUN_FORCE, 0.0], true);
        }
    }

    /// Teleport back to the spawn point, keeping velocity.
    pub fn reset(&self, physics: &mut PhysicsWorld) {
        if let Some(body) = physics.body_mut(self.body) {
            body.set_translation(vector![self.spawn.x, self.spawn.y], true);
        }
    }

    /// Nudge the body by (-dx, -dy) meters, clamped inside the map.
    pub fn back_off(&self, physics: &mut PhysicsWorld, map: &TileMap, dx: f32, dy: f32) {
        let Some(body) = physics.body_mut(self.body) else {
            return;
        };

        let mut new_x = body.translation().x - dx;
        if new_x * PIXELS_PER_METER < 1.0 {
            new_x = 1.0 / PIXELS_PER_METER;
        }
        let mut new_y = body.translation().y - dy;
        if new_y * PIXELS_PER_METER > map.pixel_height() {
            new_y = (map.pixel_height() - 32.0) / PIXELS_PER_METER;
        }
        body.set_translation(vector![new_x, new_y], true);
    }

    /// Zero the body's velocity (used when toggling auto-run).
    pub fn halt(&self, physics: &mut PhysicsWorld) {
        if let Some(body) = physics.body_mut(self.body) {
            body.set_linvel(vector![0.0, 0.0], true);
        }
    }

    /// Body center in world pixels
    pub fn position_px(&self, physics: &PhysicsWorld) -> Vec2 {
        match physics.body(self.body) {
            Some(body) => {
                Vec2::new(body.translation().x, body.translation().y) * PIXELS_PER_METER
            }
            None => Vec2::ZERO,
        }
    }

    /// Linear velocity in meters per second
    pub fn velocity(&self, physics: &PhysicsWorld) -> Vec2 {
        match physics.body(self.body) {
            Some(body) => Vec2::new(body.linvel().x, body.linvel().y),
            None => Vec2::ZERO,
        }
    }

    /// Current collider half extents in pixels
    pub fn half_extents_px(&self, physics: &PhysicsWorld) -> Vec2 {
        physics
            .collider(self.collider)
            .and_then(|c| c.shape().as_cuboid().map(|cuboid| cuboid.half_extents))
            .map(|he| Vec2::new(he.x, he.y) * PIXELS_PER_METER)
            .unwrap_or(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PidginConfig;
    use approx::assert_relative_eq;

    fn make_map() -> TileMap {
        let mut text = String::from("40 20 32 32\n");
        for _ in 0..20 {
            text.push_str(&"0 ".repeat(40));
            text.push('\n');
        }
        TileMap::parse(&text).unwrap()
    }

    fn make_world() -> (PhysicsWorld, TileMap, Tuning, Player) {
        let tuning = Tuning::from_config(&PidginConfig::default());
        let map = make_map();
        let mut physics = PhysicsWorld::new(tuning.gravity_y);
        let player = Player::spawn(&mut physics, &map, &tuning);
        (physics, map, tuning, player)
    }

    #[test]
    fn test_spawn_under_map_top() {
        let (physics, map, _, player) = make_world();
        let pos = player.position_px(&physics);
        assert_relative_eq!(pos.x, PIXELS_PER_METER);
        assert_relative_eq!(pos.y, map.pixel_height() - PIXELS_PER_METER);
    }

    #[test]
    fn test_crouch_halves_hitbox_height() {
        let (mut physics, _, tuning, mut player) = make_world();
        let standing = player.half_extents_px(&physics);

        player.apply_moves(
            &mut physics,
            &tuning,
            Moves {
                crouch: true,
                ..Default::default()
            },
        );
        let crouched = player.half_extents_px(&physics);
        assert!(player.crouching);
        assert_relative_eq!(crouched.x, standing.x);
        assert_relative_eq!(crouched.y, standing.y / 2.0);

        player.apply_moves(&mut physics, &tuning, Moves::default());
        let restored = player.half_extents_px(&physics);
        assert!(!player.crouching);
        assert_relative_eq!(restored.y, standing.y);
    }

    #[test]
    fn test_jump_only_from_vertical_rest() {
        let (mut physics, _, tuning, mut player) = make_world();

        // At rest: the jump impulse kicks in
        player.apply_moves(
            &mut physics,
            &tuning,
            Moves {
                jump: true,
                ..Default::default()
            },
        );
        assert!(player.velocity(&physics).y > 0.0);

        // Already moving vertically: no second jump
        let rising = player.velocity(&physics).y;
        player.apply_moves(
            &mut physics,
            &tuning,
            Moves {
                jump: true,
                ..Default::default()
            },
        );
        assert_relative_eq!(player.velocity(&physics).y, rising);
    }

    #[test]
    fn test_manual_move_flips_facing() {
        let (mut physics, _, mut tuning, mut player) = make_world();
        tuning.auto_run = false;

        player.apply_moves(
            &mut physics,
            &tuning,
            Moves {
                left: true,
                ..Default::default()
            },
        );
        assert!(!player.facing_right);
        assert!(player.velocity(&physics).x < 0.0);

        player.apply_moves(
            &mut physics,
            &tuning,
            Moves {
                right: true,
                ..Default::default()
            },
        );
        assert!(player.facing_right);
    }

    #[test]
    fn test_manual_mode_ignores_run_force() {
        let (mut physics, _, mut tuning, mut player) = make_world();
        tuning.auto_run = false;

        player.apply_moves(&mut physics, &tuning, Moves::default());
        assert_relative_eq!(player.velocity(&physics).x, 0.0);
    }

    #[test]
    fn test_auto_run_accelerates_to_target_speed() {
        let (mut physics, _, tuning, mut player) = make_world();

        for _ in 0..600 {
            player.apply_moves(&mut physics, &tuning, Moves::default());
            physics.step();
        }

        let vx = player.velocity(&physics).x;
        assert!(vx > 0.0);
        // The force cuts out at the target speed, so it can only overshoot
        // by one tick's worth of acceleration
        assert!(vx < tuning.move_speed + 1.0);
    }

    #[test]
    fn test_reset_returns_to_spawn() {
        let (mut physics, _, _, player) = make_world();

        if let Some(body) = physics.body_mut(player.body) {
            body.set_translation(vector![20.0, 3.0], true);
        }
        player.reset(&mut physics);

        let pos = player.position_px(&physics);
        assert_relative_eq!(pos.x, PIXELS_PER_METER);
    }

    #[test]
    fn test_back_off_clamps_at_left_edge() {
        let (mut physics, map, _, player) = make_world();

        for _ in 0..200 {
            player.back_off(&mut physics, &map, 1.0, 0.0);
        }

        let pos = player.position_px(&physics);
        assert_relative_eq!(pos.x, 1.0);
    }
}
