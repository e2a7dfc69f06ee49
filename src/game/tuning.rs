// Runtime-adjustable tuning, driven by the debug keys

use crate::config::PidginConfig;
use crate::engine::input::{Action, InputState};

const GRAVITY_STEP: f32 = 0.1;
const JUMP_STEP: f32 = 0.01;
const SPEED_STEP: f32 = 0.01;
const DENSITY_STEP: f32 = 0.001;
const SIZE_STEP: f32 = 1.0;

/// Mutable tuning state seeded from the config. The debug keys nudge these
/// every tick they are held; values clamp at their physical floor.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    /// World gravity y component, ≤ 0 (negative = down)
    pub gravity_y: f32,
    /// Upward impulse applied on jump, ≥ 0
    pub jump_velocity: f32,
    /// Target horizontal speed while auto-running, ≥ 0
    pub move_speed: f32,
    /// Player collider density, ≥ 0
    pub density: f32,
    /// Player hitbox width in pixels, ≥ 0
    pub width: f32,
    /// Player hitbox height in pixels, ≥ 0
    pub height: f32,
    /// Whether the pidgin runs forward on its own
    pub auto_run: bool,
}

impl Tuning {
    pub fn from_config(config: &PidginConfig) -> Self {
        Self {
            gravity_y: -config.gravity,
            jump_velocity: config.jump_velocity,
            move_speed: config.move_speed,
            density: config.density,
            width: config.pidgin_width,
            height: config.pidgin_height,
            auto_run: true,
        }
    }

    /// Apply one tick of held adjustment keys.
    pub fn apply_adjustments(&mut self, input: &InputState) {
        let before = self.clone();

        if input.is_pressed(Action::GravityUp) {
            self.gravity_y -= GRAVITY_STEP;
        }
        if input.is_pressed(Action::GravityDown) {
            self.gravity_y = (self.gravity_y + GRAVITY_STEP).min(0.0);
        }
        if input.is_pressed(Action::JumpVelocityUp) {
            self.jump_velocity += JUMP_STEP;
        }
        if input.is_pressed(Action::JumpVelocityDown) {
            self.jump_velocity = (self.jump_velocity - JUMP_STEP).max(0.0);
        }
        if input.is_pressed(Action::SpeedUp) {
            self.move_speed += SPEED_STEP;
        }
        if input.is_pressed(Action::SpeedDown) {
            self.move_speed = (self.move_speed - SPEED_STEP).max(0.0);
        }
        if input.is_pressed(Action::DensityUp) {
            self.density += DENSITY_STEP;
        }
        if input.is_pressed(Action::DensityDown) {
            self.density = (self.density - DENSITY_STEP).max(0.0);
        }
        if input.is_pressed(Action::WidthUp) {
            self.width += SIZE_STEP;
        }
        if input.is_pressed(Action::WidthDown) {
            self.width = (self.width - SIZE_STEP).max(0.0);
        }
        if input.is_pressed(Action::HeightUp) {
            self.height += SIZE_STEP;
        }
        if input.is_pressed(Action::HeightDown) {
            self.height = (self.height - SIZE_STEP).max(0.0);
        }

        if *self != before {
            log::debug!(
                "tuning: gravity {:.1} jump {:.2} speed {:.2} density {:.3} box {}x{}",
                -self.gravity_y,
                self.jump_velocity,
                self.move_speed,
                self.density,
                self.width,
                self.height
            );
        }
    }

    pub fn toggle_auto_run(&mut self) {
        self.auto_run = !self.auto_run;
        log::debug!("auto-run {}", if self.auto_run { "on" } else { "off" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> Tuning {
        Tuning::from_config(&PidginConfig::default())
    }

    fn input_holding(actions: &[Action]) -> InputState {
        let mut input = InputState::new();
        for &action in actions {
            input.press_for_test(action);
        }
        input
    }

    #[test]
    fn test_from_config_negates_gravity() {
        let t = tuning();
        assert_eq!(t.gravity_y, -PidginConfig::default().gravity);
        assert!(t.auto_run);
    }

    #[test]
    fn test_gravity_up_strengthens() {
        let mut t = tuning();
        let before = t.gravity_y;
        t.apply_adjustments(&input_holding(&[Action::GravityUp]));
        assert!(t.gravity_y < before);
    }

    #[test]
    fn test_gravity_clamps_at_zero() {
        let mut t = tuning();
        t.gravity_y = -0.05;
        t.apply_adjustments(&input_holding(&[Action::GravityDown]));
        assert_eq!(t.gravity_y, 0.0);
    }

    #[test]
    fn test_jump_velocity_floor() {
        let mut t = tuning();
        t.jump_velocity = 0.005;
        t.apply_adjustments(&input_holding(&[Action::JumpVelocityDown]));
        assert_eq!(t.jump_velocity, 0.0);
        t.apply_adjustments(&input_holding(&[Action::JumpVelocityDown]));
        assert_eq!(t.jump_velocity, 0.0);
    }

    #[test]
    fn test_size_steps_by_one_pixel() {
        let mut t = tuning();
        let (w, h) = (t.width, t.height);
        t.apply_adjustments(&input_holding(&[Action::WidthUp, Action::HeightDown]));
        assert_eq!(t.width, w + 1.0);
        assert_eq!(t.height, h - 1.0);
    }

    #[test]
    fn test_density_step() {
        let mut t = tuning();
        let d = t.density;
        t.apply_adjustments(&input_holding(&[Action::DensityUp]));
        assert!((t.density - (d + 0.001)).abs() < 1e-6);
    }

    #[test]
    fn test_toggle_auto_run() {
        let mut t = tuning();
        t.toggle_auto_run();
        assert!(!t.auto_run);
        t.toggle_auto_run();
        assert!(t.auto_run);
    }
}
